//! Scripted opponent policy
//!
//! Decisions only: nothing here mutates the battle. The turn engine carries
//! out each decision as one staged step.

use crate::models::battle::Battle;
use crate::models::direction::Direction;
use crate::models::ship::ShipId;
use crate::services::combat::{nearest_enemy, possible_boarding_targets, possible_ranged_targets};

/// What a scripted ship attacks this turn, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPlan {
    Board(ShipId),
    Fire(ShipId),
}

/// A one-cell step toward an enemy, with the rotation needed to line it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approach {
    pub target: ShipId,
    pub direction: Direction,
    /// Signed sixth-turns from the current facing; zero means already aligned.
    pub turns: i32,
}

/// Boarding is preferred over a broadside. The first target in each list is taken.
pub fn plan_attack(battle: &Battle, ship: ShipId) -> Option<AttackPlan> {
    if !battle.ship(ship)?.can_act() {
        return None;
    }
    if let Some(&target) = possible_boarding_targets(battle, ship).first() {
        return Some(AttackPlan::Board(target));
    }
    possible_ranged_targets(battle, ship)
        .first()
        .map(|&target| AttackPlan::Fire(target))
}

/// Pick the free neighbouring cell that closes the most distance on the
/// nearest enemy. Ties go to the smaller rotation, then to the lower
/// direction index. Returns `None` if no step gets strictly closer.
pub fn plan_approach(battle: &Battle, ship: ShipId) -> Option<Approach> {
    let me = battle.ship(ship)?;
    if !me.can_act() || me.movement_range() < 1 {
        return None;
    }
    let target = nearest_enemy(battle, ship)?;
    let goal = battle.ship(target)?.cell();
    let current = me.cell().distance(goal);

    let (distance, _, direction) = Direction::ALL
        .into_iter()
        .filter(|dir| battle.grid().is_valid(me.cell().neighbor(*dir)))
        .map(|dir| {
            let turns = me.facing().turns_to(dir);
            (me.cell().neighbor(dir).distance(goal), turns.abs(), dir)
        })
        .min_by_key(|(distance, turns, dir)| (*distance, *turns, dir.index()))?;

    if distance >= current {
        return None;
    }
    Some(Approach {
        target,
        direction,
        turns: me.facing().turns_to(direction),
    })
}
