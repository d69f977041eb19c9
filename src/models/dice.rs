//! Dice expressions in `{count}D{sides}` notation

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::constants::{MAX_DICE_COUNT, MAX_DICE_SIDES};
use super::errors::DiceError;

/// A parsed dice expression such as `2D6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
}

impl DiceExpr {
    pub fn new(count: u32, sides: u32) -> Self {
        DiceExpr { count, sides }
    }

    /// Sum of `count` independent rolls in `[1, sides]`.
    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        roll_dice(self.count, self.sides, rng)
    }

    /// Roll `count` dice of this expression's size, ignoring its own count.
    pub fn roll_count(&self, count: u32, rng: &mut impl Rng) -> i32 {
        roll_dice(count, self.sides, rng)
    }

    /// Highest total this expression can roll, saturating at `i32::MAX`.
    pub fn max_total(&self) -> i32 {
        i32::try_from(u64::from(self.count) * u64::from(self.sides)).unwrap_or(i32::MAX)
    }
}

/// Totals saturate rather than wrap for hand-built expressions beyond the
/// parser's limits.
fn roll_dice(count: u32, sides: u32, rng: &mut impl Rng) -> i32 {
    if sides == 0 {
        return 0;
    }
    (0..count).fold(0i32, |total, _| {
        let face = i32::try_from(rng.gen_range(1..=sides)).unwrap_or(i32::MAX);
        total.saturating_add(face)
    })
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DiceError::Malformed(s.to_string());
        let upper = s.trim().to_ascii_uppercase();
        let parts: Vec<&str> = upper.split('D').collect();
        if parts.len() != 2 {
            return Err(malformed());
        }

        let count: u32 = parts[0].trim().parse().map_err(|_| malformed())?;
        let sides: u32 = parts[1].trim().parse().map_err(|_| malformed())?;
        if sides == 0 {
            return Err(malformed());
        }
        if count > MAX_DICE_COUNT || sides > MAX_DICE_SIDES {
            return Err(DiceError::TooLarge(s.to_string()));
        }

        Ok(DiceExpr { count, sides })
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}D{}", self.count, self.sides)
    }
}
