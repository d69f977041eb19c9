use std::path::PathBuf;

use thiserror::Error;

use super::position::Cell;
use super::ship::ShipId;

/// A requested move or attack broke one of its preconditions.
/// Rejected requests never change game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("ship {0} does not exist")]
    UnknownShip(ShipId),
    #[error("ship {0} has been destroyed")]
    ShipDestroyed(ShipId),
    #[error("ship {0} has no actions left this turn")]
    NoActionsLeft(ShipId),
    #[error("it is not ship {0}'s turn")]
    NotYourTurn(ShipId),
    #[error("another action is still being resolved")]
    ActionInProgress,
    #[error("the match has not started")]
    MatchNotStarted,
    #[error("the match is over")]
    MatchOver,
    #[error("move distance {distance} is outside 1..={max}")]
    DistanceOutOfRange { distance: i32, max: i32 },
    #[error("destination {0} is blocked or off the map")]
    DestinationBlocked(Cell),
    #[error("ship {0} is not an enemy")]
    NotAnEnemy(ShipId),
    #[error("ship {0} is not alongside")]
    NotAdjacent(ShipId),
    #[error("ship {target} is {distance} cells away, beyond range {range}")]
    OutOfRange { target: ShipId, distance: i32, range: i32 },
    #[error("ship {0} is outside the broadside arc")]
    OutsideArc(ShipId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("malformed dice expression `{0}`")]
    Malformed(String),
    #[error("dice expression `{0}` is too large")]
    TooLarge(String),
}

/// Game-specific error types
#[derive(Debug, Error)]
pub enum GameError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] ActionError),
    #[error(transparent)]
    MalformedDice(#[from] DiceError),
    #[error("cell {cell} is already occupied by ship {occupant}")]
    OccupancyConflict { cell: Cell, occupant: ShipId },
    #[error("no valid spawn cell near {preferred} after {attempts} attempts")]
    NoValidSpawnCell { preferred: Cell, attempts: u32 },
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    /// The rejected-request reason, if this error is an illegal action.
    pub fn as_action_error(&self) -> Option<&ActionError> {
        match self {
            GameError::IllegalAction(err) => Some(err),
            _ => None,
        }
    }
}
