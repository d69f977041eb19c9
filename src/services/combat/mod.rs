//! Combat system
//!
//! Handles boarding actions, broadside fire, and target selection. Every attack
//! is a two-step protocol: validate with `can_*`, then apply with `resolve_*`.

mod boarding;
mod ranged;
mod targeting;

use tracing::error;

use crate::models::battle::Battle;
use crate::models::dice::DiceExpr;
use crate::models::errors::{ActionError, DiceError};
use crate::models::ship::{Ship, ShipId};

// Re-export public functions
pub use boarding::{can_board, resolve_boarding, BoardingContest, BoardingOutcome, BoardingWinner};
pub use ranged::{can_fire, ranged_damage, resolve_ranged, RangedOutcome};
pub use targeting::{nearest_enemy, possible_boarding_targets, possible_ranged_targets};

/// Common preconditions for every attack: the attacker is afloat with an
/// action to spend, and the target is a living enemy.
fn check_attack<'a>(
    battle: &'a Battle,
    attacker: ShipId,
    target: ShipId,
) -> Result<(&'a Ship, &'a Ship), ActionError> {
    let attacker_ship = battle.living_ship(attacker)?;
    if !attacker_ship.can_act() {
        return Err(ActionError::NoActionsLeft(attacker));
    }
    let target_ship = battle.living_ship(target)?;
    if !attacker_ship.is_enemy_of(target_ship) {
        return Err(ActionError::NotAnEnemy(target));
    }
    Ok((attacker_ship, target_ship))
}

/// Parse one of a ship's weapon profiles, logging a configuration error on failure.
fn weapon_dice(ship: &Ship, expression: &str) -> Result<DiceExpr, DiceError> {
    expression.parse().map_err(|err: DiceError| {
        error!(ship = %ship.id(), name = ship.name(), expression, "{}", err);
        err
    })
}

/// Spend the attacker's action once an attack has resolved, hit or miss.
fn spend_attack_action(battle: &mut Battle, attacker: ShipId) {
    if let Some(ship) = battle.ship_mut(attacker) {
        ship.use_action();
    }
}
