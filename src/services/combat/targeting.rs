use crate::models::battle::Battle;
use crate::models::ship::{Ship, ShipId};

/// Living enemies of `attacker`, in launch order.
fn living_enemies<'a>(battle: &'a Battle, attacker: &'a Ship) -> impl Iterator<Item = &'a Ship> + 'a {
    battle.living_ships(attacker.side().opponent())
}

/// Enemies alongside `attacker` that it could board.
///
/// Purely geometric: the attacker's remaining actions are not considered.
pub fn possible_boarding_targets(battle: &Battle, attacker: ShipId) -> Vec<ShipId> {
    let Some(ship) = battle.ship(attacker).filter(|s| s.is_alive()) else {
        return Vec::new();
    };
    living_enemies(battle, ship)
        .filter(|enemy| ship.cell().distance(enemy.cell()) == 1)
        .map(|enemy| enemy.id())
        .collect()
}

/// Enemies inside `attacker`'s broadside arc and attack range, ordered by
/// distance and then by launch order.
pub fn possible_ranged_targets(battle: &Battle, attacker: ShipId) -> Vec<ShipId> {
    let Some(ship) = battle.ship(attacker).filter(|s| s.is_alive()) else {
        return Vec::new();
    };
    let arc = battle
        .grid()
        .side_arc_cells(ship.cell(), ship.facing(), ship.attack_range());

    let mut targets: Vec<(i32, ShipId)> = living_enemies(battle, ship)
        .filter(|enemy| arc.contains(&enemy.cell()))
        .map(|enemy| (ship.cell().distance(enemy.cell()), enemy.id()))
        .collect();
    targets.sort();
    targets.into_iter().map(|(_, id)| id).collect()
}

/// Closest living enemy of `ship`, ties broken by launch order.
pub fn nearest_enemy(battle: &Battle, ship: ShipId) -> Option<ShipId> {
    let ship = battle.ship(ship).filter(|s| s.is_alive())?;
    living_enemies(battle, ship)
        .min_by_key(|enemy| (ship.cell().distance(enemy.cell()), enemy.id()))
        .map(|enemy| enemy.id())
}
