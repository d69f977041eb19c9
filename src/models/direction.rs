//! Type-safe wrapper for hex facings

use std::fmt;

use super::constants::HEX_DIRECTIONS;

/// One of the six edge directions of a pointy-top hex.
///
/// - 0 = East
/// - 1 = South-East
/// - 2 = South-West
/// - 3 = West
/// - 4 = North-West
/// - 5 = North-East
///
/// Values increase clockwise in 60 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Direction(u8);

impl Direction {
    pub const EAST: Direction = Direction(0);
    pub const SOUTH_EAST: Direction = Direction(1);
    pub const SOUTH_WEST: Direction = Direction(2);
    pub const WEST: Direction = Direction(3);
    pub const NORTH_WEST: Direction = Direction(4);
    pub const NORTH_EAST: Direction = Direction(5);

    pub const ALL: [Direction; HEX_DIRECTIONS] = [
        Direction::EAST,
        Direction::SOUTH_EAST,
        Direction::SOUTH_WEST,
        Direction::WEST,
        Direction::NORTH_WEST,
        Direction::NORTH_EAST,
    ];

    /// Create a direction from any integer, wrapping it into `[0, 6)`.
    pub fn new(value: i32) -> Self {
        Direction(value.rem_euclid(HEX_DIRECTIONS as i32) as u8)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn value(&self) -> i32 {
        self.0 as i32
    }

    /// Turn clockwise by `turns` steps (negative turns go counter-clockwise).
    pub fn rotated(&self, turns: i32) -> Self {
        Direction::new(self.value() + turns)
    }

    pub fn opposite(&self) -> Self {
        self.rotated(3)
    }

    /// The four broadside directions: everything except dead ahead and astern.
    pub fn side_arc(&self) -> [Direction; 4] {
        [self.rotated(1), self.rotated(2), self.rotated(4), self.rotated(5)]
    }

    /// Shortest signed rotation from `self` to `target`, in `-2..=3`.
    pub fn turns_to(&self, target: Direction) -> i32 {
        let delta = (target.value() - self.value()).rem_euclid(HEX_DIRECTIONS as i32);
        if delta > 3 {
            delta - HEX_DIRECTIONS as i32
        } else {
            delta
        }
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "EAST",
            1 => "SOUTH-EAST",
            2 => "SOUTH-WEST",
            3 => "WEST",
            4 => "NORTH-WEST",
            _ => "NORTH-EAST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
