use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{EVEN_ROW_NEIGHBORS, ODD_ROW_NEIGHBORS};
use super::direction::Direction;

/// An offset coordinate on the pointy-top hex map.
/// Odd rows are shifted half a cell toward +col. Row numbers grow northward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Cell { col, row }
    }

    pub fn is_odd_row(&self) -> bool {
        self.row & 1 == 1
    }

    /// The adjacent cell in `direction`. The offset table depends on row parity.
    pub fn neighbor(&self, direction: Direction) -> Cell {
        let table = if self.is_odd_row() {
            &ODD_ROW_NEIGHBORS
        } else {
            &EVEN_ROW_NEIGHBORS
        };
        let (d_col, d_row) = table[direction.index()];
        Cell::new(self.col + d_col, self.row + d_row)
    }

    /// Walk `steps` cells in a straight line.
    pub fn walk(&self, direction: Direction, steps: i32) -> Cell {
        (0..steps).fold(*self, |cell, _| cell.neighbor(direction))
    }

    pub fn to_axial(&self) -> Axial {
        // (row - parity) is always even, so the halving is exact for negative rows too.
        let q = self.col - (self.row - (self.row & 1)) / 2;
        Axial { q, r: self.row }
    }

    pub fn distance(&self, other: Cell) -> i32 {
        self.to_axial().distance(other.to_axial())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Axial hex coordinate. Only used for distance and range math, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    pub const fn new(q: i32, r: i32) -> Self {
        Axial { q, r }
    }

    pub fn to_cell(&self) -> Cell {
        let col = self.q + (self.r - (self.r & 1)) / 2;
        Cell::new(col, self.r)
    }

    pub fn offset(&self, dq: i32, dr: i32) -> Axial {
        Axial::new(self.q + dq, self.r + dr)
    }

    pub fn distance(&self, other: Axial) -> i32 {
        let dq = other.q - self.q;
        let dr = other.r - self.r;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }
}
