use crate::models::position::Cell;
use crate::models::ship::{ShipId, Side};
use crate::services::combat::{BoardingOutcome, RangedOutcome};
use crate::services::movement::{MoveOutcome, RotateOutcome};

use super::phase::TurnPhase;

/// Notifications pushed by the turn engine, in the order things happened.
/// Collaborators read them with `TurnEngine::drain_events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    MatchStarted { player_ships: usize, enemy_ships: usize },
    SideChanged { side: Side },
    ActiveShipChanged { ship: ShipId, side: Side, actions: u32 },
    RoundChanged { round: u32 },
    PhaseChanged { phase: TurnPhase },
    ShipSpawned { ship: ShipId, side: Side, cell: Cell },
    ShipMoved(MoveOutcome),
    ShipRotated(RotateOutcome),
    BoardingResolved(BoardingOutcome),
    RangedResolved(RangedOutcome),
    ShipDestroyed { ship: ShipId, side: Side },
    UnitTurnEnded { ship: ShipId },
    MatchOver { winner: Side },
}
