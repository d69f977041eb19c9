//! Command-line harness
//!
//! Argument parsing and the interactive/autoplay command session.

mod args;
mod session;

pub use args::Args;
pub use session::{Command, CommandError, Session, SessionEnd};
