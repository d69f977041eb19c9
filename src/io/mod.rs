//! Input/output abstractions
//!
//! The command session talks to the terminal only through these traits, so
//! tests can script a whole session with mock implementations.

use std::io::{self, BufRead, Write};

/// Source of command lines.
pub trait InputReader {
    /// Show `prompt` and read one line. `Ok(None)` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Sink for game text.
pub trait OutputWriter {
    fn writeln(&mut self, message: &str);

    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            self.writeln(line);
        }
    }
}

/// Terminal I/O implementation using stdin/stdout
pub struct TerminalIO;

impl InputReader for TerminalIO {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input))
    }
}

impl OutputWriter for TerminalIO {
    fn writeln(&mut self, message: &str) {
        println!("{}", message);
    }
}
