//! Battle model
//!
//! Owns the hex map, every ship that has taken part in the battle, and the
//! seeded random number generator used for dice and spawn searches.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::errors::{ActionError, GameResult};
use super::hex_grid::HexGrid;
use super::position::Cell;
use super::ship::{Ship, ShipId, ShipStats, Side};

/// Top-level battle state container.
pub struct Battle {
    grid: HexGrid,
    /// Indexed by `ShipId`. Sunk ships stay in the table, flagged destroyed.
    ships: Vec<Ship>,
    rng: StdRng,
}

impl Battle {
    pub fn new(grid: HexGrid, seed: u64) -> Self {
        Battle {
            grid,
            ships: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // ========== Accessor Methods ==========

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut HexGrid {
        &mut self.grid
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Split borrow for callers that need the map and the dice together.
    pub fn grid_and_rng(&mut self) -> (&HexGrid, &mut StdRng) {
        (&self.grid, &mut self.rng)
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id.0)
    }

    /// Look up a ship, reporting unknown ids as an illegal action.
    pub fn expect_ship(&self, id: ShipId) -> Result<&Ship, ActionError> {
        self.ship(id).ok_or(ActionError::UnknownShip(id))
    }

    pub fn expect_ship_mut(&mut self, id: ShipId) -> Result<&mut Ship, ActionError> {
        self.ship_mut(id).ok_or(ActionError::UnknownShip(id))
    }

    /// Look up a ship that must still be afloat.
    pub fn living_ship(&self, id: ShipId) -> Result<&Ship, ActionError> {
        let ship = self.expect_ship(id)?;
        if !ship.is_alive() {
            return Err(ActionError::ShipDestroyed(id));
        }
        Ok(ship)
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn living_ships(&self, side: Side) -> impl Iterator<Item = &Ship> + '_ {
        self.ships
            .iter()
            .filter(move |s| s.side() == side && s.is_alive())
    }

    /// Living ships of one side, in launch order.
    pub fn living_ship_ids(&self, side: Side) -> Vec<ShipId> {
        self.living_ships(side).map(|s| s.id()).collect()
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.living_ships(side).count()
    }

    /// The ship standing on `cell`, if any.
    pub fn ship_at(&self, cell: Cell) -> Option<&Ship> {
        self.grid.unit_at(cell).and_then(|id| self.ship(id))
    }

    // ========== End Accessor Methods ==========

    // ========== Atomic Update Methods ==========

    /// Register a new ship on `cell`. The cell must be free.
    pub fn launch_ship(
        &mut self,
        name: impl Into<String>,
        side: Side,
        cell: Cell,
        stats: ShipStats,
    ) -> GameResult<ShipId> {
        let id = ShipId(self.ships.len());
        self.grid.place(id, cell)?;
        let ship = Ship::new(id, name, side, cell, stats);
        info!(ship = %id, name = ship.name(), side = %side, %cell, "ship launched");
        self.ships.push(ship);
        Ok(id)
    }

    /// Move a ship's recorded position and its occupancy entry together.
    pub fn relocate_ship(&mut self, id: ShipId, to: Cell) -> GameResult<()> {
        let from = self.expect_ship(id)?.cell();
        self.grid.move_ship(id, from, to)?;
        self.expect_ship_mut(id)?.set_cell(to);
        Ok(())
    }

    /// Apply damage to a ship and, if it sinks, clear it off the map.
    /// Returns true if this damage destroyed the ship.
    pub fn damage_ship(&mut self, id: ShipId, damage: i32) -> Result<bool, ActionError> {
        let ship = self.expect_ship_mut(id)?;
        let sunk = ship.take_damage(damage);
        if sunk {
            self.evict(id);
        }
        Ok(sunk)
    }

    /// Atomically destroy a ship, updating all tracking locations.
    pub fn destroy_ship(&mut self, id: ShipId) -> Result<(), ActionError> {
        self.expect_ship_mut(id)?.mark_destroyed();
        self.evict(id);
        Ok(())
    }

    fn evict(&mut self, id: ShipId) {
        if let Some(ship) = self.ships.get(id.0) {
            let cell = ship.cell();
            if self.grid.unit_at(cell) == Some(id) {
                self.grid.remove(cell);
            }
            info!(ship = %id, name = ship.name(), %cell, "ship destroyed");
        }
    }

    // ========== End Atomic Update Methods ==========
}

// Custom Debug that doesn't expose RNG internals
impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Battle")
            .field("cells", &self.grid.cell_count())
            .field("ships", &self.ships.len())
            .field("player_afloat", &self.living_count(Side::Player))
            .field("enemy_afloat", &self.living_count(Side::Enemy))
            .finish_non_exhaustive()
    }
}
