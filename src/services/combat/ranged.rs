use tracing::debug;

use crate::models::battle::Battle;
use crate::models::errors::{ActionError, DiceError, GameResult};
use crate::models::ship::ShipId;

use super::{check_attack, spend_attack_action, weapon_dice};

/// State delta of a resolved broadside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangedOutcome {
    pub attacker: ShipId,
    pub target: ShipId,
    pub roll: i32,
    pub armor: i32,
    pub damage: i32,
    pub destroyed: bool,
    pub dice_error: Option<DiceError>,
}

/// Armor soaks damage; a broadside never heals.
pub fn ranged_damage(roll: i32, armor: i32) -> i32 {
    (roll - armor).max(0)
}

/// Check that `attacker` may fire on `target`.
///
/// The target must be within attack range and lie in the attacker's side arc:
/// guns bear abeam, never over the bow or stern.
pub fn can_fire(battle: &Battle, attacker: ShipId, target: ShipId) -> Result<(), ActionError> {
    let (a, t) = check_attack(battle, attacker, target)?;

    let distance = a.cell().distance(t.cell());
    let range = a.attack_range();
    if distance > range {
        return Err(ActionError::OutOfRange {
            target,
            distance,
            range,
        });
    }

    let arc = battle.grid().side_arc_cells(a.cell(), a.facing(), range);
    if !arc.contains(&t.cell()) {
        return Err(ActionError::OutsideArc(target));
    }
    Ok(())
}

/// Fire a broadside from `attacker` at `target`.
pub fn resolve_ranged(
    battle: &mut Battle,
    attacker: ShipId,
    target: ShipId,
) -> GameResult<RangedOutcome> {
    can_fire(battle, attacker, target)?;

    let (dice, armor) = {
        let a = battle.expect_ship(attacker)?;
        let t = battle.expect_ship(target)?;
        (weapon_dice(a, a.ranged_damage()), t.armor())
    };

    let dice = match dice {
        Ok(dice) => dice,
        Err(err) => {
            spend_attack_action(battle, attacker);
            return Ok(RangedOutcome {
                attacker,
                target,
                roll: 0,
                armor,
                damage: 0,
                destroyed: false,
                dice_error: Some(err),
            });
        }
    };

    let roll = dice.roll(battle.rng_mut());
    let damage = ranged_damage(roll, armor);
    debug!(%attacker, %target, roll, armor, damage, "broadside");

    let destroyed = battle.damage_ship(target, damage)?;
    spend_attack_action(battle, attacker);

    Ok(RangedOutcome {
        attacker,
        target,
        roll,
        armor,
        damage,
        destroyed,
        dice_error: None,
    })
}
