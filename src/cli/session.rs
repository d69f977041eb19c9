//! Command session
//!
//! Drives a `TurnEngine` from typed commands: scripted stages run on their
//! own, and the session only stops to ask when an externally controlled ship
//! has the helm.

use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::game_engine::TurnEngine;
use crate::io::{InputReader, OutputWriter};
use crate::models::errors::GameResult;
use crate::models::ship::{ShipId, Side};
use crate::ui::presenters::{EventPresenter, FleetPresenter};

/// One order typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(i32),
    Rotate(i32),
    Board,
    Fire,
    End,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("UNKNOWN COMMAND `{0}`")]
    Unknown(String),
    #[error("`{0}` NEEDS A WHOLE NUMBER")]
    BadNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim().to_ascii_lowercase();
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let mut number = || -> Result<i32, CommandError> {
            words
                .next()
                .and_then(|w| w.parse().ok())
                .ok_or_else(|| CommandError::BadNumber(verb.to_string()))
        };

        match verb {
            "move" | "m" => Ok(Command::Move(number()?)),
            "rotate" | "r" => Ok(Command::Rotate(number()?)),
            "left" | "l" => Ok(Command::Rotate(-1)),
            "right" => Ok(Command::Rotate(1)),
            "board" | "b" => Ok(Command::Board),
            "fire" | "f" => Ok(Command::Fire),
            "end" | "e" => Ok(Command::End),
            "status" | "s" => Ok(Command::Status),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(s.trim().to_string())),
        }
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    MatchOver(Side),
    RoundLimit,
    Quit,
    InputClosed,
}

pub struct Session {
    engine: TurnEngine,
    max_rounds: u32,
}

impl Session {
    pub fn new(engine: TurnEngine, max_rounds: u32) -> Self {
        Session { engine, max_rounds }
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    pub fn run(
        &mut self,
        input: &mut dyn InputReader,
        output: &mut dyn OutputWriter,
    ) -> GameResult<SessionEnd> {
        loop {
            while self.engine.advance() {
                self.flush_events(output);
                if self.engine.round() > self.max_rounds {
                    output.writeln(&format!("THE BATTLE IS BROKEN OFF AFTER {} ROUNDS", self.max_rounds));
                    return Ok(SessionEnd::RoundLimit);
                }
            }
            self.flush_events(output);

            if let Some(winner) = self.engine.winner() {
                return Ok(SessionEnd::MatchOver(winner));
            }
            let Some(ship) = self.engine.active_unit() else {
                warn!(phase = %self.engine.phase(), "engine waiting without an active ship");
                return Ok(SessionEnd::Quit);
            };

            let prompt = match self.engine.battle().ship(ship) {
                Some(s) => format!("{} ({} ACTIONS) COMMAND?", s.name(), s.actions()),
                None => "COMMAND?".to_string(),
            };
            let Some(line) = input.read_line(&prompt)? else {
                return Ok(SessionEnd::InputClosed);
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => {
                    output.writeln("THE FLEET STRIKES ITS COLOURS.");
                    return Ok(SessionEnd::Quit);
                }
                Ok(command) => {
                    // Handle errors from commands - report and re-prompt
                    if let Err(e) = self.execute(ship, command, output) {
                        output.writeln(&format!("UNABLE TO COMPLY: {}", e));
                    }
                }
                Err(e) => {
                    output.writeln(&e.to_string());
                    FleetPresenter::show_help(output);
                }
            }
        }
    }

    fn execute(
        &mut self,
        ship: ShipId,
        command: Command,
        output: &mut dyn OutputWriter,
    ) -> GameResult<()> {
        match command {
            Command::Move(distance) => {
                self.engine.request_move(ship, distance)?;
            }
            Command::Rotate(turns) => {
                self.engine.request_rotate(ship, turns)?;
            }
            Command::Board => match self.engine.possible_boarding_targets(ship).first() {
                Some(&target) => {
                    self.engine.request_board(ship, target)?;
                }
                None => output.writeln("NO ENEMY ALONGSIDE"),
            },
            Command::Fire => match self.engine.possible_ranged_targets(ship).first() {
                Some(&target) => {
                    self.engine.request_ranged_attack(ship, target)?;
                }
                None => output.writeln("NO ENEMY IN THE BROADSIDE ARC"),
            },
            Command::End => self.engine.request_end_turn(ship)?,
            Command::Status => {
                FleetPresenter::show_status(&self.engine, output);
                FleetPresenter::show_chart(self.engine.battle(), output);
            }
            Command::Help => FleetPresenter::show_help(output),
            Command::Quit => {}
        }
        self.flush_events(output);
        Ok(())
    }

    fn flush_events(&mut self, output: &mut dyn OutputWriter) {
        let events = self.engine.drain_events();
        EventPresenter::show_events(&events, self.engine.battle(), output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::game_engine::Control;
    use crate::io::test_utils::{MockInput, MockOutput};

    fn session(config: &MatchConfig, max_rounds: u32) -> Session {
        Session::new(TurnEngine::from_config(config, 17).unwrap(), max_rounds)
    }

    #[test]
    fn parses_commands() {
        assert_eq!("move 2".parse::<Command>(), Ok(Command::Move(2)));
        assert_eq!("  ROTATE -2 ".parse::<Command>(), Ok(Command::Rotate(-2)));
        assert_eq!("left".parse::<Command>(), Ok(Command::Rotate(-1)));
        assert_eq!("right".parse::<Command>(), Ok(Command::Rotate(1)));
        assert_eq!("fire".parse::<Command>(), Ok(Command::Fire));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "move far".parse::<Command>(),
            Err(CommandError::BadNumber("move".to_string()))
        );
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn quit_stops_at_first_prompt() {
        let mut session = session(&MatchConfig::default(), 10);
        let mut input = MockInput::new(vec!["quit"]);
        let mut output = MockOutput::new();

        let end = session.run(&mut input, &mut output).unwrap();
        assert_eq!(end, SessionEnd::Quit);
        assert!(output.contains("BATTLE JOINED"));
        assert!(output.contains("Player Ship 1 TAKES THE HELM"));
    }

    #[test]
    fn closed_input_ends_session() {
        let mut session = session(&MatchConfig::default(), 10);
        let end = session
            .run(&mut MockInput::new(vec![]), &mut MockOutput::new())
            .unwrap();
        assert_eq!(end, SessionEnd::InputClosed);
    }

    #[test]
    fn bad_commands_show_help_and_reprompt() {
        let mut session = session(&MatchConfig::default(), 10);
        let mut input = MockInput::new(vec!["dance", "status", "quit"]);
        let mut output = MockOutput::new();

        session.run(&mut input, &mut output).unwrap();
        assert!(output.contains("UNKNOWN COMMAND `dance`"));
        assert!(output.contains("MOVE N"));
        assert!(output.contains("ROUND 1"));
    }

    #[test]
    fn ending_turn_lets_the_enemy_move() {
        let mut session = session(&MatchConfig::default(), 10);
        let mut input = MockInput::new(vec!["end", "quit"]);
        let mut output = MockOutput::new();

        session.run(&mut input, &mut output).unwrap();
        assert!(output.contains("--- ENEMY TURN ---"));
        assert!(output.contains("=== ROUND 2 ==="));
    }

    #[test]
    fn autoplay_runs_without_input() {
        let config = MatchConfig {
            player_control: Control::Scripted,
            ..MatchConfig::default()
        };
        let mut session = session(&config, 30);
        let mut output = MockOutput::new();

        let end = session.run(&mut MockInput::new(vec![]), &mut output).unwrap();
        assert!(matches!(end, SessionEnd::MatchOver(_) | SessionEnd::RoundLimit));
        assert!(session.engine().round() <= 31);
    }
}
