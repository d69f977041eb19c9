//! Ship movement
//!
//! Straight-line moves along the ship's facing and turning in place. A move is
//! a single hop: only the destination cell is checked, not the cells between.

use tracing::debug;

use crate::models::battle::Battle;
use crate::models::direction::Direction;
use crate::models::errors::{ActionError, GameResult};
use crate::models::position::Cell;
use crate::models::ship::{Ship, ShipId};

/// State delta of a completed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub ship: ShipId,
    pub from: Cell,
    pub to: Cell,
    pub distance: i32,
    pub actions_left: u32,
}

/// State delta of a completed rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateOutcome {
    pub ship: ShipId,
    pub from: Direction,
    pub to: Direction,
    pub actions_left: u32,
}

/// The cell `distance` steps ahead of `cell` along `facing`.
pub fn movement_target(cell: Cell, facing: Direction, distance: i32) -> Cell {
    cell.walk(facing, distance)
}

fn ready_ship(battle: &Battle, id: ShipId) -> Result<&Ship, ActionError> {
    let ship = battle.living_ship(id)?;
    if !ship.can_act() {
        return Err(ActionError::NoActionsLeft(id));
    }
    Ok(ship)
}

/// Check that `ship` may move `distance` cells straight ahead.
pub fn can_move(battle: &Battle, id: ShipId, distance: i32) -> Result<(), ActionError> {
    let ship = ready_ship(battle, id)?;

    let max = ship.movement_range();
    if distance < 1 || distance > max {
        return Err(ActionError::DistanceOutOfRange { distance, max });
    }

    let target = movement_target(ship.cell(), ship.facing(), distance);
    if !battle.grid().is_valid(target) {
        return Err(ActionError::DestinationBlocked(target));
    }
    Ok(())
}

pub fn is_move_legal(battle: &Battle, id: ShipId, distance: i32) -> bool {
    can_move(battle, id, distance).is_ok()
}

/// Every destination from one step out up to the first blocked step.
pub fn reachable_cells(battle: &Battle, id: ShipId) -> Vec<Cell> {
    let Some(ship) = battle.ship(id) else {
        return Vec::new();
    };
    (1..=ship.movement_range())
        .map(|d| movement_target(ship.cell(), ship.facing(), d))
        .take_while(|cell| battle.grid().is_valid(*cell))
        .collect()
}

/// Longest straight move available, or 0 if the first step is already blocked.
pub fn max_possible_distance(battle: &Battle, id: ShipId) -> i32 {
    reachable_cells(battle, id).len() as i32
}

/// Move `ship` straight ahead and spend one action.
pub fn move_ship(battle: &mut Battle, id: ShipId, distance: i32) -> GameResult<MoveOutcome> {
    can_move(battle, id, distance)?;

    let ship = battle.expect_ship(id)?;
    let from = ship.cell();
    let to = movement_target(from, ship.facing(), distance);

    battle.relocate_ship(id, to)?;
    let ship = battle.expect_ship_mut(id)?;
    ship.use_action();
    debug!(ship = %id, %from, %to, distance, "ship moved");

    Ok(MoveOutcome {
        ship: id,
        from,
        to,
        distance,
        actions_left: ship.actions(),
    })
}

/// Turn `ship` by `turns` sixth-turns (positive is clockwise) and spend one action.
/// Turning in place needs no free cell.
pub fn rotate(battle: &mut Battle, id: ShipId, turns: i32) -> GameResult<RotateOutcome> {
    ready_ship(battle, id)?;

    let ship = battle.expect_ship_mut(id)?;
    let from = ship.facing();
    let to = from.rotated(turns);
    ship.set_facing(to);
    ship.use_action();
    debug!(ship = %id, %from, %to, turns, "ship rotated");

    Ok(RotateOutcome {
        ship: id,
        from,
        to,
        actions_left: ship.actions(),
    })
}
