use tracing::debug;

use crate::models::battle::Battle;
use crate::models::constants::{BOARDING_ATTACKER_DICE, BOARDING_DEFENDER_DICE};
use crate::models::errors::{ActionError, DiceError, GameResult};
use crate::models::ship::ShipId;

use super::{check_attack, spend_attack_action, weapon_dice};

/// Which party came out ahead in a boarding contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardingWinner {
    Attacker,
    Defender,
}

/// The pure comparison at the heart of a boarding action. It carries no
/// memory between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardingContest {
    pub attacker_total: i32,
    pub defender_total: i32,
}

impl BoardingContest {
    pub fn from_totals(attacker_total: i32, defender_total: i32) -> Self {
        BoardingContest {
            attacker_total,
            defender_total,
        }
    }

    pub fn winner(&self) -> Option<BoardingWinner> {
        use std::cmp::Ordering;
        match self.attacker_total.cmp(&self.defender_total) {
            Ordering::Greater => Some(BoardingWinner::Attacker),
            Ordering::Less => Some(BoardingWinner::Defender),
            Ordering::Equal => None,
        }
    }

    /// Damage dealt to the loser. Zero on a tie.
    pub fn margin(&self) -> i32 {
        (self.attacker_total - self.defender_total).abs()
    }
}

/// State delta of a resolved boarding action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardingOutcome {
    pub attacker: ShipId,
    pub defender: ShipId,
    pub contest: BoardingContest,
    pub winner: Option<BoardingWinner>,
    /// The ship that took the damage, if anyone did.
    pub damaged: Option<ShipId>,
    pub damage: i32,
    pub destroyed: Vec<ShipId>,
    /// Set when a boarding die could not be parsed; the action then dealt nothing.
    pub dice_error: Option<DiceError>,
}

/// Check that `attacker` may board `target`: an action to spend, an enemy
/// target, and the target alongside (hex distance 1).
pub fn can_board(battle: &Battle, attacker: ShipId, target: ShipId) -> Result<(), ActionError> {
    let (a, t) = check_attack(battle, attacker, target)?;
    if a.cell().distance(t.cell()) != 1 {
        return Err(ActionError::NotAdjacent(target));
    }
    Ok(())
}

/// Resolve a boarding action between `attacker` and `target`.
///
/// The attacker throws three dice and the defender two, each using the die size
/// of its own boarding profile. The higher total wins and the loser takes the
/// difference as damage.
pub fn resolve_boarding(
    battle: &mut Battle,
    attacker: ShipId,
    target: ShipId,
) -> GameResult<BoardingOutcome> {
    can_board(battle, attacker, target)?;

    let (attacker_die, defender_die) = {
        let a = battle.expect_ship(attacker)?;
        let t = battle.expect_ship(target)?;
        (
            weapon_dice(a, a.boarding_damage()),
            weapon_dice(t, t.boarding_damage()),
        )
    };

    let (attacker_die, defender_die) = match (attacker_die, defender_die) {
        (Ok(a), Ok(d)) => (a, d),
        (Err(err), _) | (_, Err(err)) => {
            spend_attack_action(battle, attacker);
            return Ok(BoardingOutcome {
                attacker,
                defender: target,
                contest: BoardingContest::from_totals(0, 0),
                winner: None,
                damaged: None,
                damage: 0,
                destroyed: Vec::new(),
                dice_error: Some(err),
            });
        }
    };

    let rng = battle.rng_mut();
    let contest = BoardingContest::from_totals(
        attacker_die.roll_count(BOARDING_ATTACKER_DICE, rng),
        defender_die.roll_count(BOARDING_DEFENDER_DICE, rng),
    );
    let winner = contest.winner();
    let damage = contest.margin();
    debug!(
        %attacker,
        defender = %target,
        attacker_total = contest.attacker_total,
        defender_total = contest.defender_total,
        "boarding contest"
    );

    let damaged = match winner {
        Some(BoardingWinner::Attacker) => Some(target),
        Some(BoardingWinner::Defender) => Some(attacker),
        None => None,
    };

    let mut destroyed = Vec::new();
    if let Some(loser) = damaged {
        if battle.damage_ship(loser, damage)? {
            destroyed.push(loser);
        }
    }

    spend_attack_action(battle, attacker);

    Ok(BoardingOutcome {
        attacker,
        defender: target,
        contest,
        winner,
        damaged,
        damage,
        destroyed,
        dice_error: None,
    })
}
