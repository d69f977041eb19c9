use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use super::direction::Direction;
use super::errors::{GameError, GameResult};
use super::position::Cell;
use super::ship::ShipId;

/// Map topology and occupancy for one battle.
///
/// The valid-cell set is static map data; obstacles are cells that are simply
/// not in the set. The occupancy table holds at most one ship per cell.
#[derive(Debug, Clone, Default)]
pub struct HexGrid {
    cells: BTreeSet<Cell>,
    occupancy: HashMap<Cell, ShipId>,
}

impl HexGrid {
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        HexGrid {
            cells: cells.into_iter().collect(),
            occupancy: HashMap::new(),
        }
    }

    /// A `columns` x `rows` rectangle of cells anchored at (0, 0).
    pub fn rectangle(columns: i32, rows: i32) -> Self {
        Self::from_cells(
            (0..rows).flat_map(|row| (0..columns).map(move |col| Cell::new(col, row))),
        )
    }

    /// Carve a cell out of the map. Returns false if it was not on the map.
    pub fn remove_cell(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Smallest and largest (col, row) on the map, or None for an empty map.
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let first = self.cells.iter().next()?;
        let init = (*first, *first);
        Some(self.cells.iter().fold(init, |(min, max), c| {
            (
                Cell::new(min.col.min(c.col), min.row.min(c.row)),
                Cell::new(max.col.max(c.col), max.row.max(c.row)),
            )
        }))
    }

    /// True if the cell is part of the map, occupied or not.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupancy.contains_key(&cell)
    }

    /// The walkability predicate: on the map and unoccupied.
    pub fn is_valid(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_occupied(cell)
    }

    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Cell {
        cell.neighbor(direction)
    }

    pub fn distance(&self, a: Cell, b: Cell) -> i32 {
        a.distance(b)
    }

    /// Every on-map cell within `radius` of `center`, occupied or not.
    pub fn cells_in_range(&self, center: Cell, radius: i32) -> Vec<Cell> {
        let origin = center.to_axial();
        let mut results = Vec::new();
        for dq in -radius..=radius {
            for dr in (-radius).max(-dq - radius)..=radius.min(-dq + radius) {
                let cell = origin.offset(dq, dr).to_cell();
                if self.contains(cell) {
                    results.push(cell);
                }
            }
        }
        results
    }

    /// Cells along the four broadside rays of a ship facing `facing`.
    ///
    /// Each ray runs up to `radius` cells and stops at the map edge. Ships on
    /// the ray do not stop it.
    pub fn side_arc_cells(&self, center: Cell, facing: Direction, radius: i32) -> Vec<Cell> {
        let mut arc = Vec::new();
        for dir in facing.side_arc() {
            let mut current = center;
            for _ in 0..radius {
                current = current.neighbor(dir);
                if !self.contains(current) {
                    break;
                }
                arc.push(current);
            }
        }
        arc
    }

    pub fn unit_at(&self, cell: Cell) -> Option<ShipId> {
        self.occupancy.get(&cell).copied()
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = (Cell, ShipId)> + '_ {
        self.occupancy.iter().map(|(cell, id)| (*cell, *id))
    }

    /// Record `ship` as the occupant of `cell`.
    /// Fails without touching the table if a different ship holds the cell.
    pub fn place(&mut self, ship: ShipId, cell: Cell) -> GameResult<()> {
        match self.occupancy.get(&cell) {
            Some(&occupant) if occupant != ship => {
                warn!(%cell, %ship, %occupant, "cell already occupied");
                Err(GameError::OccupancyConflict { cell, occupant })
            }
            Some(_) => Ok(()),
            None => {
                self.occupancy.insert(cell, ship);
                debug!(%cell, %ship, "ship placed");
                Ok(())
            }
        }
    }

    /// Clear a cell's occupant, whoever it is.
    pub fn remove(&mut self, cell: Cell) -> Option<ShipId> {
        self.occupancy.remove(&cell)
    }

    /// Move `ship` from `from` to `to`.
    ///
    /// `from` is only cleared if `ship` actually holds it, so an unrelated
    /// occupant is never evicted. A conflict at `to` is reported before anything
    /// changes.
    pub fn move_ship(&mut self, ship: ShipId, from: Cell, to: Cell) -> GameResult<()> {
        if let Some(occupant) = self.unit_at(to) {
            if occupant != ship {
                warn!(cell = %to, %ship, %occupant, "move target already occupied");
                return Err(GameError::OccupancyConflict { cell: to, occupant });
            }
        }
        if self.unit_at(from) == Some(ship) {
            self.remove(from);
        }
        self.place(ship, to)
    }
}
