//! Match lifecycle and elimination checks

use tracing::info;

use crate::models::battle::Battle;
use crate::models::ship::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Loading,
    Playing,
    GameOver { winner: Side },
}

/// Owns win detection. The match ends the first time a side has no ships
/// afloat, and only the first call to `end_match` counts.
#[derive(Debug, Clone)]
pub struct MatchController {
    state: MatchState,
}

impl Default for MatchController {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchController {
    pub fn new() -> Self {
        MatchController {
            state: MatchState::Loading,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn begin(&mut self) {
        if self.state == MatchState::Loading {
            self.state = MatchState::Playing;
            info!("match started");
        }
    }

    /// The winning side if either fleet has been wiped out.
    /// The player side is checked first.
    pub fn check_elimination(&self, battle: &Battle) -> Option<Side> {
        [Side::Player, Side::Enemy]
            .into_iter()
            .find(|side| battle.living_count(*side) == 0)
            .map(|loser| loser.opponent())
    }

    /// Record the result. Returns false, changing nothing, if the match had
    /// already ended.
    pub fn end_match(&mut self, winner: Side) -> bool {
        if self.is_over() {
            return false;
        }
        self.state = MatchState::GameOver { winner };
        info!(%winner, "match over");
        true
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            MatchState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, MatchState::GameOver { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hex_grid::HexGrid;
    use crate::models::position::Cell;
    use crate::models::ship::ShipStats;

    #[test]
    fn lifecycle_moves_forward_only() {
        let mut controller = MatchController::new();
        assert_eq!(controller.state(), MatchState::Loading);
        controller.begin();
        assert_eq!(controller.state(), MatchState::Playing);

        assert!(controller.end_match(Side::Enemy));
        controller.begin();
        assert_eq!(controller.winner(), Some(Side::Enemy));
    }

    #[test]
    fn end_match_only_counts_once() {
        let mut controller = MatchController::new();
        controller.begin();
        assert!(controller.end_match(Side::Player));
        assert!(!controller.end_match(Side::Enemy));
        assert_eq!(controller.winner(), Some(Side::Player));
    }

    #[test]
    fn elimination_names_the_surviving_side() {
        let mut battle = Battle::new(HexGrid::rectangle(4, 4), 1);
        let p = battle
            .launch_ship("P", Side::Player, Cell::new(0, 0), ShipStats::default())
            .unwrap();
        let e = battle
            .launch_ship("E", Side::Enemy, Cell::new(3, 3), ShipStats::default())
            .unwrap();
        let controller = MatchController::new();

        assert_eq!(controller.check_elimination(&battle), None);
        battle.destroy_ship(e).unwrap();
        assert_eq!(controller.check_elimination(&battle), Some(Side::Player));
        battle.destroy_ship(p).unwrap();
        assert_eq!(controller.check_elimination(&battle), Some(Side::Enemy));
    }
}
