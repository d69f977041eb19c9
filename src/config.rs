//! Match configuration
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game_engine::Control;
use crate::models::constants::{
    DEFAULT_ENEMY_SHIPS, DEFAULT_MAP_COLUMNS, DEFAULT_MAP_ROWS, DEFAULT_PLAYER_SHIPS,
    DEFAULT_SPAWN_RETRY_ATTEMPTS,
};
use crate::models::dice::DiceExpr;
use crate::models::errors::{DiceError, GameError, GameResult};
use crate::models::hex_grid::HexGrid;
use crate::models::position::Cell;
use crate::models::ship::{ShipStats, Side};

/// Rectangular sea with optional impassable cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub columns: i32,
    pub rows: i32,
    /// Cells removed from the map (rocks, shoals).
    pub obstacles: Vec<Cell>,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            columns: DEFAULT_MAP_COLUMNS,
            rows: DEFAULT_MAP_ROWS,
            obstacles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub map: MapConfig,
    pub player_ships: usize,
    pub enemy_ships: usize,
    pub spawn_retry_attempts: u32,
    pub player_ship: ShipStats,
    pub enemy_ship: ShipStats,
    pub player_control: Control,
    pub enemy_control: Control,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            map: MapConfig::default(),
            player_ships: DEFAULT_PLAYER_SHIPS,
            enemy_ships: DEFAULT_ENEMY_SHIPS,
            spawn_retry_attempts: DEFAULT_SPAWN_RETRY_ATTEMPTS,
            player_ship: ShipStats::default(),
            enemy_ship: ShipStats::default(),
            player_control: Control::External,
            enemy_control: Control::Scripted,
        }
    }
}

impl MatchConfig {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> GameResult<Self> {
        let config: MatchConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Who commands `side`.
    pub fn control(&self, side: Side) -> Control {
        match side {
            Side::Player => self.player_control,
            Side::Enemy => self.enemy_control,
        }
    }

    pub fn stats(&self, side: Side) -> &ShipStats {
        match side {
            Side::Player => &self.player_ship,
            Side::Enemy => &self.enemy_ship,
        }
    }

    /// Reject configurations no match can be played with.
    ///
    /// Malformed dice are only warned about here; a ship with a bad weapon
    /// profile still sails, its attacks just deal nothing. Dice too large to
    /// total safely are rejected outright.
    pub fn validate(&self) -> GameResult<()> {
        if self.map.columns < 1 || self.map.rows < 1 {
            return Err(GameError::InvalidConfig(format!(
                "map must be at least 1x1, got {}x{}",
                self.map.columns, self.map.rows
            )));
        }
        for side in [Side::Player, Side::Enemy] {
            let count = match side {
                Side::Player => self.player_ships,
                Side::Enemy => self.enemy_ships,
            };
            if count == 0 {
                return Err(GameError::InvalidConfig(format!("{side} fleet has no ships")));
            }
            validate_stats(side, self.stats(side), self.max_range())?;
        }
        for side in [Side::Player, Side::Enemy] {
            let guns = self.stats(side).ranged_damage.parse::<DiceExpr>();
            let armor = self.stats(side.opponent()).armor;
            if let Ok(dice) = guns {
                if dice.max_total() <= armor {
                    warn!(%side, %dice, armor, "broadsides can never pierce enemy armor");
                }
            }
        }
        Ok(())
    }

    /// Longest range worth configuring: far enough to cross the whole map.
    pub fn max_range(&self) -> i32 {
        self.map.columns.saturating_add(self.map.rows)
    }

    /// The configured map with its obstacles carved out.
    pub fn build_grid(&self) -> HexGrid {
        let mut grid = HexGrid::rectangle(self.map.columns, self.map.rows);
        for cell in &self.map.obstacles {
            grid.remove_cell(*cell);
        }
        grid
    }
}

fn validate_stats(side: Side, stats: &ShipStats, max_range: i32) -> GameResult<()> {
    let invalid = |what: &str| Err(GameError::InvalidConfig(format!("{side} ship {what}")));
    if stats.max_actions == 0 {
        return invalid("needs at least one action per turn");
    }
    if stats.max_health < 1 {
        return invalid("needs positive health");
    }
    if stats.movement_range < 0 || stats.attack_range < 0 {
        return invalid("ranges cannot be negative");
    }
    if stats.movement_range > max_range || stats.attack_range > max_range {
        return invalid(&format!("ranges cannot exceed {max_range} on this map"));
    }
    for (weapon, expression) in [
        ("ranged", &stats.ranged_damage),
        ("boarding", &stats.boarding_damage),
    ] {
        match expression.parse::<DiceExpr>() {
            Ok(_) => {}
            Err(err @ DiceError::TooLarge(_)) => return invalid(&format!("{weapon} {err}")),
            Err(err) => warn!(%side, weapon, "{}", err),
        }
    }
    Ok(())
}
