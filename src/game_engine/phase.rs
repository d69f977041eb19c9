use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ship::Side;

/// Who issues orders for a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    /// Orders arrive through the `request_*` methods.
    External,
    /// The built-in opponent policy plays the side through `advance`.
    Scripted,
}

/// Where the turn engine currently stands.
///
/// Every scripted step is its own phase, so a presentation layer can pause
/// between steps. Nothing changes until the next `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingStart,
    /// An externally controlled ship is active and may take orders.
    AwaitingCommand,
    /// A scripted ship is about to pick and resolve an attack.
    ScriptedDecide,
    /// A scripted ship is about to close on the nearest enemy.
    ScriptedManeuver,
    /// A scripted ship is about to end its turn.
    ScriptedFinish,
    /// Every ship of the active side has acted; `next` goes on the next advance.
    TeamHandoff { next: Side },
    MatchOver { winner: Side },
}

impl TurnPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, TurnPhase::MatchOver { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::AwaitingStart => "awaiting start",
            TurnPhase::AwaitingCommand => "awaiting command",
            TurnPhase::ScriptedDecide => "scripted decide",
            TurnPhase::ScriptedManeuver => "scripted maneuver",
            TurnPhase::ScriptedFinish => "scripted finish",
            TurnPhase::TeamHandoff { .. } => "team handoff",
            TurnPhase::MatchOver { .. } => "match over",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TurnPhase::TeamHandoff { next } => write!(f, "{} to {}", self.name(), next),
            TurnPhase::MatchOver { winner } => write!(f, "{}: {} wins", self.name(), winner),
            _ => write!(f, "{}", self.name()),
        }
    }
}
