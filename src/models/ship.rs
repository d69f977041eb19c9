use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_ARMOR, DEFAULT_ATTACK_RANGE, DEFAULT_BOARDING_DAMAGE, DEFAULT_MAX_ACTIONS,
    DEFAULT_MAX_HEALTH, DEFAULT_MOVEMENT_RANGE, DEFAULT_RANGED_DAMAGE,
};
use super::direction::Direction;
use super::position::Cell;

/// Which fleet a ship sails for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Default heading when a ship of this side is launched.
    /// Player ships face east, enemy ships face west.
    pub fn spawn_facing(&self) -> Direction {
        match self {
            Side::Player => Direction::EAST,
            Side::Enemy => Direction::WEST,
        }
    }

    /// Upper-case tag used in narration and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Side::Player => "PLAYER",
            Side::Enemy => "ENEMY",
        }
    }

    /// Title-case name used for ship names, e.g. "Player Ship 1".
    pub fn title(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Enemy => "Enemy",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Handle to a ship in the battle's ship table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub usize);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tunable combat profile of a ship class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipStats {
    pub max_actions: u32,
    pub max_health: i32,
    pub armor: i32,
    pub movement_range: i32,
    pub attack_range: i32,
    /// Broadside damage, e.g. `2D6`.
    pub ranged_damage: String,
    /// Boarding die; only the die size is used in a boarding contest.
    pub boarding_damage: String,
}

impl Default for ShipStats {
    fn default() -> Self {
        ShipStats {
            max_actions: DEFAULT_MAX_ACTIONS,
            max_health: DEFAULT_MAX_HEALTH,
            armor: DEFAULT_ARMOR,
            movement_range: DEFAULT_MOVEMENT_RANGE,
            attack_range: DEFAULT_ATTACK_RANGE,
            ranged_damage: DEFAULT_RANGED_DAMAGE.to_string(),
            boarding_damage: DEFAULT_BOARDING_DAMAGE.to_string(),
        }
    }
}

/// A warship on the hex map.
#[derive(Debug, Clone)]
pub struct Ship {
    id: ShipId,
    name: String,
    side: Side,
    cell: Cell,
    facing: Direction,
    health: i32,
    actions: u32,
    stats: ShipStats,
    destroyed: bool,
}

impl Ship {
    /// Create a ship at full health and with a full action budget.
    pub fn new(id: ShipId, name: impl Into<String>, side: Side, cell: Cell, stats: ShipStats) -> Self {
        Ship {
            id,
            name: name.into(),
            side,
            cell,
            facing: side.spawn_facing(),
            health: stats.max_health,
            actions: stats.max_actions,
            stats,
            destroyed: false,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.stats.max_health
    }

    pub fn armor(&self) -> i32 {
        self.stats.armor
    }

    pub fn movement_range(&self) -> i32 {
        self.stats.movement_range
    }

    pub fn attack_range(&self) -> i32 {
        self.stats.attack_range
    }

    pub fn actions(&self) -> u32 {
        self.actions
    }

    pub fn max_actions(&self) -> u32 {
        self.stats.max_actions
    }

    pub fn ranged_damage(&self) -> &str {
        &self.stats.ranged_damage
    }

    pub fn boarding_damage(&self) -> &str {
        &self.stats.boarding_damage
    }

    pub fn stats(&self) -> &ShipStats {
        &self.stats
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed && self.health > 0
    }

    pub fn is_destroyed(&self) -> bool {
        !self.is_alive()
    }

    /// A ship may act while it is afloat and has actions left.
    pub fn can_act(&self) -> bool {
        self.is_alive() && self.actions > 0
    }

    pub fn is_enemy_of(&self, other: &Ship) -> bool {
        self.side != other.side
    }

    /// Turn the ship in place without spending an action (setup and scenario use).
    pub fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    pub(crate) fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }

    /// Refill the action budget at the start of the ship's turn.
    pub(crate) fn reset_actions(&mut self) {
        self.actions = self.stats.max_actions;
    }

    /// Spend one action. Returns false if none were left.
    pub(crate) fn use_action(&mut self) -> bool {
        if self.actions == 0 {
            return false;
        }
        self.actions -= 1;
        true
    }

    /// Apply damage. Returns true if this hit sank the ship.
    /// Health is floored at zero and a sunk ship stays sunk.
    pub(crate) fn take_damage(&mut self, damage: i32) -> bool {
        if self.destroyed || damage <= 0 {
            return false;
        }
        self.health = (self.health - damage).max(0);
        if self.health == 0 {
            self.destroyed = true;
            self.actions = 0;
            return true;
        }
        false
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
        self.health = 0;
        self.actions = 0;
    }
}
