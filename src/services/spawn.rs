//! Fleet deployment
//!
//! Ships are launched on a preferred cell, or failing that on one of a few
//! randomly chosen neighbours of it.

use rand::Rng;
use tracing::{info, warn};

use crate::config::MatchConfig;
use crate::models::battle::Battle;
use crate::models::constants::HEX_DIRECTIONS;
use crate::models::direction::Direction;
use crate::models::errors::{GameError, GameResult};
use crate::models::hex_grid::HexGrid;
use crate::models::position::Cell;
use crate::models::ship::{ShipId, ShipStats, Side};

/// Pick a launch cell: `preferred` if it is free, else up to `attempts` random
/// neighbours of it. Neighbours may repeat between attempts.
pub fn find_spawn_cell(
    grid: &HexGrid,
    preferred: Cell,
    attempts: u32,
    rng: &mut impl Rng,
) -> Option<Cell> {
    if grid.is_valid(preferred) {
        return Some(preferred);
    }
    (0..attempts)
        .map(|_| preferred.neighbor(Direction::new(rng.gen_range(0..HEX_DIRECTIONS as i32))))
        .find(|cell| grid.is_valid(*cell))
}

/// A random cell in the side's deployment zone: the western third of the map
/// for the player, the eastern third for the enemy.
pub fn preferred_spawn_cell(grid: &HexGrid, side: Side, rng: &mut impl Rng) -> Option<Cell> {
    let (min, max) = grid.bounds()?;
    let third = ((max.col - min.col + 1) / 3).max(1);
    let col = match side {
        Side::Player => rng.gen_range(min.col..min.col + third),
        Side::Enemy => rng.gen_range(max.col + 1 - third..=max.col),
    };
    let row = rng.gen_range(min.row..=max.row);
    Some(Cell::new(col, row))
}

/// Launch one ship near `preferred`, facing its side's spawn heading.
pub fn spawn_ship(
    battle: &mut Battle,
    side: Side,
    name: impl Into<String>,
    stats: ShipStats,
    preferred: Cell,
    attempts: u32,
) -> GameResult<ShipId> {
    let (grid, rng) = battle.grid_and_rng();
    let Some(cell) = find_spawn_cell(grid, preferred, attempts, rng) else {
        warn!(%side, %preferred, attempts, "no free cell to launch ship");
        return Err(GameError::NoValidSpawnCell {
            preferred,
            attempts,
        });
    };
    battle.launch_ship(name, side, cell, stats)
}

/// Deploy both fleets as configured. Ships whose launch search fails are
/// skipped; the ids of every ship actually launched are returned.
pub fn spawn_fleets(battle: &mut Battle, config: &MatchConfig) -> Vec<ShipId> {
    let fleets = [
        (Side::Player, config.player_ships, &config.player_ship),
        (Side::Enemy, config.enemy_ships, &config.enemy_ship),
    ];

    let mut launched = Vec::new();
    for (side, count, stats) in fleets {
        let mut afloat = 0;
        for _ in 0..count {
            let (grid, rng) = battle.grid_and_rng();
            let Some(preferred) = preferred_spawn_cell(grid, side, rng) else {
                warn!(%side, "map has no cells, fleet not deployed");
                break;
            };
            let name = format!("{} Ship {}", side.title(), afloat + 1);
            match spawn_ship(
                battle,
                side,
                name,
                stats.clone(),
                preferred,
                config.spawn_retry_attempts,
            ) {
                Ok(id) => {
                    afloat += 1;
                    launched.push(id);
                }
                Err(err) => warn!(%side, "{}", err),
            }
        }
        info!(%side, requested = count, launched = afloat, "fleet deployed");
    }
    launched
}
