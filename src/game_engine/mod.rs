//! Turn engine
//!
//! Decides whose turn it is, which ship is active, and drives the scripted
//! opponent one staged step at a time. Collaborators mutate the battle only
//! through the `request_*` methods and learn what happened from the event
//! queue.

mod events;
mod match_controller;
mod phase;

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

pub use events::MatchEvent;
pub use match_controller::{MatchController, MatchState};
pub use phase::{Control, TurnPhase};

use crate::config::MatchConfig;
use crate::models::battle::Battle;
use crate::models::constants::{DEFAULT_SPAWN_RETRY_ATTEMPTS, FIRST_ROUND};
use crate::models::errors::{ActionError, GameResult};
use crate::models::position::Cell;
use crate::models::ship::{Ship, ShipId, ShipStats, Side};
use crate::services::ai::{self, AttackPlan};
use crate::services::combat::{self, BoardingOutcome, RangedOutcome};
use crate::services::movement::{self, MoveOutcome, RotateOutcome};
use crate::services::spawn;

/// Core turn/action state machine for one match.
pub struct TurnEngine {
    battle: Battle,
    controller: MatchController,
    player_control: Control,
    enemy_control: Control,
    spawn_retry_attempts: u32,
    active_side: Side,
    player_roster: Vec<ShipId>,
    enemy_roster: Vec<ShipId>,
    active_index: usize,
    active_ship: Option<ShipId>,
    round: u32,
    in_progress: bool,
    phase: TurnPhase,
    /// Ships whose destruction has already been handled.
    wrecks: BTreeSet<ShipId>,
    events: Vec<MatchEvent>,
}

impl TurnEngine {
    /// Wrap an already populated battle. The match starts on the first
    /// `start_match` or `advance`.
    pub fn new(battle: Battle, player_control: Control, enemy_control: Control) -> Self {
        TurnEngine {
            battle,
            controller: MatchController::new(),
            player_control,
            enemy_control,
            spawn_retry_attempts: DEFAULT_SPAWN_RETRY_ATTEMPTS,
            active_side: Side::Player,
            player_roster: Vec::new(),
            enemy_roster: Vec::new(),
            active_index: 0,
            active_ship: None,
            round: FIRST_ROUND,
            in_progress: false,
            phase: TurnPhase::AwaitingStart,
            wrecks: BTreeSet::new(),
            events: Vec::new(),
        }
    }

    /// Build the map and both fleets from `config`. Restarting a match is
    /// just calling this again.
    pub fn from_config(config: &MatchConfig, seed: u64) -> GameResult<Self> {
        config.validate()?;
        let mut battle = Battle::new(config.build_grid(), seed);
        let launched = spawn::spawn_fleets(&mut battle, config);

        let mut engine = TurnEngine::new(
            battle,
            config.control(Side::Player),
            config.control(Side::Enemy),
        );
        engine.spawn_retry_attempts = config.spawn_retry_attempts;
        for id in launched {
            engine.push_spawned(id);
        }
        Ok(engine)
    }

    // ========== Queries ==========

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    /// Direct access for scenario setup. Changes made here bypass the turn
    /// rules and produce no events.
    pub fn battle_mut(&mut self) -> &mut Battle {
        &mut self.battle
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    pub fn active_unit(&self) -> Option<ShipId> {
        self.active_ship
    }

    pub fn active_ship(&self) -> Option<&Ship> {
        self.active_ship.and_then(|id| self.battle.ship(id))
    }

    /// True if `side` is the side to move. With `if_in_progress`, also
    /// requires that one of its ships is mid-turn.
    pub fn is_side_turn(&self, side: Side, if_in_progress: bool) -> bool {
        if self.controller.is_over() || self.phase == TurnPhase::AwaitingStart {
            return false;
        }
        self.active_side == side && (!if_in_progress || self.in_progress)
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.battle.living_count(side)
    }

    /// Turn order of `side` as of the start of its latest turn, minus ships
    /// sunk since.
    pub fn roster(&self, side: Side) -> &[ShipId] {
        match side {
            Side::Player => &self.player_roster,
            Side::Enemy => &self.enemy_roster,
        }
    }

    pub fn control(&self, side: Side) -> Control {
        match side {
            Side::Player => self.player_control,
            Side::Enemy => self.enemy_control,
        }
    }

    pub fn match_state(&self) -> MatchState {
        self.controller.state()
    }

    pub fn winner(&self) -> Option<Side> {
        self.controller.winner()
    }

    pub fn is_over(&self) -> bool {
        self.controller.is_over()
    }

    pub fn possible_boarding_targets(&self, ship: ShipId) -> Vec<ShipId> {
        combat::possible_boarding_targets(&self.battle, ship)
    }

    pub fn possible_ranged_targets(&self, ship: ShipId) -> Vec<ShipId> {
        combat::possible_ranged_targets(&self.battle, ship)
    }

    pub fn max_possible_distance(&self, ship: ShipId) -> i32 {
        movement::max_possible_distance(&self.battle, ship)
    }

    pub fn reachable_cells(&self, ship: ShipId) -> Vec<Cell> {
        movement::reachable_cells(&self.battle, ship)
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== Lifecycle ==========

    /// Build both rosters and hand the first turn to the player side.
    /// Does nothing once the match has started.
    pub fn start_match(&mut self) {
        if self.phase != TurnPhase::AwaitingStart {
            warn!(phase = %self.phase, "match already started");
            return;
        }
        self.controller.begin();
        self.player_roster = self.battle.living_ship_ids(Side::Player);
        self.enemy_roster = self.battle.living_ship_ids(Side::Enemy);
        info!(
            player_ships = self.player_roster.len(),
            enemy_ships = self.enemy_roster.len(),
            "match starting"
        );
        self.events.push(MatchEvent::MatchStarted {
            player_ships: self.player_roster.len(),
            enemy_ships: self.enemy_roster.len(),
        });
        self.events.push(MatchEvent::RoundChanged { round: self.round });
        self.start_team_turn(Side::Player);
    }

    fn start_team_turn(&mut self, side: Side) {
        if self.controller.is_over() {
            return;
        }
        self.active_side = side;
        let living = self.battle.living_ship_ids(side);
        *self.roster_mut(side) = living;
        info!(%side, round = self.round, ships = self.roster(side).len(), "team turn");
        self.events.push(MatchEvent::SideChanged { side });

        if self.roster(side).is_empty() {
            self.finish_match(side.opponent());
            return;
        }
        self.activate_from(0);
    }

    /// Refill the ship's actions and hand it control. This is the only place
    /// a ship's action budget is refilled.
    fn start_unit_turn(&mut self, ship: ShipId) {
        let actions = match self.battle.ship_mut(ship) {
            Some(s) => {
                s.reset_actions();
                s.actions()
            }
            None => 0,
        };
        self.active_ship = Some(ship);
        self.in_progress = true;
        debug!(%ship, side = %self.active_side, actions, "unit turn");
        self.events.push(MatchEvent::ActiveShipChanged {
            ship,
            side: self.active_side,
            actions,
        });

        let next = match self.control(self.active_side) {
            Control::External => TurnPhase::AwaitingCommand,
            Control::Scripted => TurnPhase::ScriptedDecide,
        };
        self.set_phase(next);
    }

    /// Activate the first living ship at or after `index` in the active
    /// roster, or hand the turn over if there is none.
    fn activate_from(&mut self, index: usize) {
        let side = self.active_side;
        let next = self
            .roster(side)
            .iter()
            .enumerate()
            .skip(index)
            .find(|(_, id)| self.battle.ship(**id).is_some_and(|s| s.is_alive()))
            .map(|(i, id)| (i, *id));

        match next {
            Some((i, ship)) => {
                self.active_index = i;
                self.start_unit_turn(ship);
            }
            None => {
                self.active_index = self.roster(side).len();
                self.active_ship = None;
                self.in_progress = false;
                self.set_phase(TurnPhase::TeamHandoff {
                    next: side.opponent(),
                });
            }
        }
    }

    /// End the active ship's turn and move to the next ship or side.
    /// Returns false, changing nothing, if no ship is mid-turn.
    pub fn end_unit_turn(&mut self) -> bool {
        let Some(ship) = self.active_ship.filter(|_| self.in_progress) else {
            return false;
        };
        if self.controller.is_over() {
            return false;
        }
        debug!(%ship, "unit turn ended");
        self.events.push(MatchEvent::UnitTurnEnded { ship });
        self.activate_from(self.active_index + 1);
        true
    }

    /// Take a sunk ship out of play. Sinks it first if it is somehow still
    /// afloat. Repeat notifications for the same ship are ignored.
    pub fn on_unit_destroyed(&mut self, ship: ShipId) -> Result<(), ActionError> {
        let side = self.battle.expect_ship(ship)?.side();
        if !self.wrecks.insert(ship) {
            return Ok(());
        }
        if self.battle.living_ship(ship).is_ok() {
            self.battle.destroy_ship(ship)?;
        }
        self.events.push(MatchEvent::ShipDestroyed { ship, side });

        if let Some(pos) = self.roster(side).iter().position(|id| *id == ship) {
            self.roster_mut(side).remove(pos);
            if side == self.active_side && pos < self.active_index {
                self.active_index -= 1;
            }
        }

        if let Some(winner) = self.controller.check_elimination(&self.battle) {
            self.finish_match(winner);
            return Ok(());
        }

        if self.active_ship == Some(ship) {
            // The ships after it have shifted down into its slot.
            self.active_ship = None;
            self.activate_from(self.active_index);
        }
        Ok(())
    }

    /// Perform the next pending stage. Returns false when the engine is
    /// waiting for an external order or the match is over.
    pub fn advance(&mut self) -> bool {
        match self.phase {
            TurnPhase::AwaitingStart => self.start_match(),
            TurnPhase::AwaitingCommand | TurnPhase::MatchOver { .. } => return false,
            TurnPhase::ScriptedDecide => self.scripted_decide(),
            TurnPhase::ScriptedManeuver => self.scripted_maneuver(),
            TurnPhase::ScriptedFinish => {
                self.end_unit_turn();
            }
            TurnPhase::TeamHandoff { next } => {
                if self.active_side == Side::Player {
                    self.round += 1;
                    info!(round = self.round, "new round");
                    self.events.push(MatchEvent::RoundChanged { round: self.round });
                }
                self.start_team_turn(next);
            }
        }
        true
    }

    /// Advance until input is needed, the match ends, or `max_steps` stages
    /// have run. Returns the number of stages performed.
    pub fn run_scripted(&mut self, max_steps: usize) -> usize {
        let mut steps = 0;
        while steps < max_steps && self.advance() {
            steps += 1;
        }
        steps
    }

    // ========== Requests ==========

    pub fn request_move(&mut self, ship: ShipId, distance: i32) -> GameResult<MoveOutcome> {
        self.check_command(ship)?;
        let outcome = movement::move_ship(&mut self.battle, ship, distance)?;
        self.events.push(MatchEvent::ShipMoved(outcome));
        self.end_if_exhausted(ship);
        Ok(outcome)
    }

    pub fn request_rotate(&mut self, ship: ShipId, turns: i32) -> GameResult<RotateOutcome> {
        self.check_command(ship)?;
        let outcome = movement::rotate(&mut self.battle, ship, turns)?;
        self.events.push(MatchEvent::ShipRotated(outcome));
        self.end_if_exhausted(ship);
        Ok(outcome)
    }

    pub fn request_board(&mut self, ship: ShipId, target: ShipId) -> GameResult<BoardingOutcome> {
        self.check_command(ship)?;
        let outcome = combat::resolve_boarding(&mut self.battle, ship, target)?;
        self.record_boarding(outcome.clone());
        self.end_if_exhausted(ship);
        Ok(outcome)
    }

    pub fn request_ranged_attack(
        &mut self,
        ship: ShipId,
        target: ShipId,
    ) -> GameResult<RangedOutcome> {
        self.check_command(ship)?;
        let outcome = combat::resolve_ranged(&mut self.battle, ship, target)?;
        self.record_ranged(outcome.clone());
        self.end_if_exhausted(ship);
        Ok(outcome)
    }

    /// End the turn of an externally controlled ship, forfeiting any actions left.
    pub fn request_end_turn(&mut self, ship: ShipId) -> Result<(), ActionError> {
        self.check_command(ship)?;
        self.end_unit_turn();
        Ok(())
    }

    /// Launch a reinforcement. It joins its side's turn order at the start
    /// of that side's next turn.
    pub fn spawn_ship(
        &mut self,
        side: Side,
        name: impl Into<String>,
        stats: ShipStats,
        preferred: Cell,
    ) -> GameResult<ShipId> {
        if self.controller.is_over() {
            return Err(ActionError::MatchOver.into());
        }
        let id = spawn::spawn_ship(
            &mut self.battle,
            side,
            name,
            stats,
            preferred,
            self.spawn_retry_attempts,
        )?;
        self.push_spawned(id);
        Ok(id)
    }

    // ========== Internals ==========

    fn roster_mut(&mut self, side: Side) -> &mut Vec<ShipId> {
        match side {
            Side::Player => &mut self.player_roster,
            Side::Enemy => &mut self.enemy_roster,
        }
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        if self.phase == phase {
            return;
        }
        debug!(from = %self.phase, to = %phase, "phase");
        self.phase = phase;
        self.events.push(MatchEvent::PhaseChanged { phase });
    }

    fn push_spawned(&mut self, ship: ShipId) {
        if let Some(s) = self.battle.ship(ship) {
            self.events.push(MatchEvent::ShipSpawned {
                ship,
                side: s.side(),
                cell: s.cell(),
            });
        }
    }

    fn finish_match(&mut self, winner: Side) {
        if self.controller.end_match(winner) {
            self.events.push(MatchEvent::MatchOver { winner });
        }
        self.active_ship = None;
        self.in_progress = false;
        self.set_phase(TurnPhase::MatchOver { winner });
    }

    /// Orders are only taken from the active ship of an externally
    /// controlled side while no staged step is pending.
    fn check_command(&self, ship: ShipId) -> Result<(), ActionError> {
        self.battle.expect_ship(ship)?;
        match self.phase {
            TurnPhase::AwaitingStart => Err(ActionError::MatchNotStarted),
            TurnPhase::MatchOver { .. } => Err(ActionError::MatchOver),
            TurnPhase::AwaitingCommand if self.active_ship == Some(ship) => Ok(()),
            TurnPhase::AwaitingCommand => Err(ActionError::NotYourTurn(ship)),
            _ if self.active_ship == Some(ship) => Err(ActionError::ActionInProgress),
            _ => Err(ActionError::NotYourTurn(ship)),
        }
    }

    fn end_if_exhausted(&mut self, ship: ShipId) {
        let exhausted = self.battle.ship(ship).is_some_and(|s| !s.can_act());
        if exhausted && self.active_ship == Some(ship) && self.phase == TurnPhase::AwaitingCommand {
            self.end_unit_turn();
        }
    }

    fn record_boarding(&mut self, outcome: BoardingOutcome) {
        let destroyed = outcome.destroyed.clone();
        self.events.push(MatchEvent::BoardingResolved(outcome));
        self.record_destroyed(&destroyed);
    }

    fn record_ranged(&mut self, outcome: RangedOutcome) {
        let destroyed = outcome.destroyed.then_some(outcome.target);
        self.events.push(MatchEvent::RangedResolved(outcome));
        if let Some(target) = destroyed {
            self.record_destroyed(&[target]);
        }
    }

    fn record_destroyed(&mut self, ships: &[ShipId]) {
        for ship in ships {
            if let Err(err) = self.on_unit_destroyed(*ship) {
                warn!(%ship, "{}", err);
            }
        }
    }

    /// Scripted step one: board if anyone is alongside, else fire if anyone
    /// bears.
    fn scripted_decide(&mut self) {
        let Some(ship) = self.active_ship else {
            self.set_phase(TurnPhase::ScriptedFinish);
            return;
        };

        match ai::plan_attack(&self.battle, ship) {
            Some(AttackPlan::Board(target)) => {
                match combat::resolve_boarding(&mut self.battle, ship, target) {
                    Ok(outcome) => self.record_boarding(outcome),
                    Err(err) => warn!(%ship, %target, "scripted boarding failed: {}", err),
                }
            }
            Some(AttackPlan::Fire(target)) => {
                match combat::resolve_ranged(&mut self.battle, ship, target) {
                    Ok(outcome) => self.record_ranged(outcome),
                    Err(err) => warn!(%ship, %target, "scripted broadside failed: {}", err),
                }
            }
            None => debug!(%ship, "no target in reach"),
        }

        // Sinking (either ship) may already have moved the turn on.
        if self.active_ship == Some(ship) && !self.controller.is_over() {
            self.set_phase(TurnPhase::ScriptedManeuver);
        }
    }

    /// Scripted step two: turn toward the best closing direction if needed,
    /// then step one cell along it.
    fn scripted_maneuver(&mut self) {
        let Some(ship) = self.active_ship else {
            self.set_phase(TurnPhase::ScriptedFinish);
            return;
        };

        if let Some(approach) = ai::plan_approach(&self.battle, ship) {
            // A rotation is only planned when the cell ahead does not close
            // distance, so spending the last action on it forgoes no useful step.
            if approach.turns != 0 {
                match movement::rotate(&mut self.battle, ship, approach.turns) {
                    Ok(outcome) => self.events.push(MatchEvent::ShipRotated(outcome)),
                    Err(err) => warn!(%ship, "scripted rotation failed: {}", err),
                }
            }
            let aligned = self
                .battle
                .ship(ship)
                .is_some_and(|s| s.can_act() && s.facing() == approach.direction);
            if aligned {
                match movement::move_ship(&mut self.battle, ship, 1) {
                    Ok(outcome) => self.events.push(MatchEvent::ShipMoved(outcome)),
                    Err(err) => warn!(%ship, "scripted move failed: {}", err),
                }
            }
        }

        if self.active_ship == Some(ship) {
            self.set_phase(TurnPhase::ScriptedFinish);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::direction::Direction;
    use crate::models::hex_grid::HexGrid;

    fn launch(battle: &mut Battle, side: Side, cell: Cell) -> ShipId {
        battle
            .launch_ship(format!("{side} {cell}"), side, cell, ShipStats::default())
            .unwrap()
    }

    /// Helper: two player ships on the west edge, one enemy far to the east,
    /// both sides externally controlled.
    fn setup_engine_scenario() -> (TurnEngine, ShipId, ShipId, ShipId) {
        let mut battle = Battle::new(HexGrid::rectangle(12, 5), 3);
        let p1 = launch(&mut battle, Side::Player, Cell::new(0, 1));
        let p2 = launch(&mut battle, Side::Player, Cell::new(0, 3));
        let e1 = launch(&mut battle, Side::Enemy, Cell::new(11, 2));
        let engine = TurnEngine::new(battle, Control::External, Control::External);
        (engine, p1, p2, e1)
    }

    #[test]
    fn start_match_hands_first_ship_to_player() {
        let (mut engine, p1, _, _) = setup_engine_scenario();
        assert_eq!(engine.phase(), TurnPhase::AwaitingStart);
        assert!(!engine.is_side_turn(Side::Player, false));

        engine.start_match();
        assert_eq!(engine.match_state(), MatchState::Playing);
        assert_eq!(engine.active_side(), Side::Player);
        assert_eq!(engine.active_unit(), Some(p1));
        assert_eq!(engine.phase(), TurnPhase::AwaitingCommand);
        assert_eq!(engine.round(), 1);
        assert!(engine.is_side_turn(Side::Player, true));
        assert!(!engine.is_side_turn(Side::Enemy, false));
    }

    #[test]
    fn end_unit_turn_walks_roster_then_hands_off() {
        let (mut engine, p1, p2, e1) = setup_engine_scenario();
        engine.start_match();

        assert!(engine.end_unit_turn());
        assert_eq!(engine.active_unit(), Some(p2));
        assert!(engine.end_unit_turn());
        assert_eq!(engine.active_unit(), None);
        assert_eq!(engine.phase(), TurnPhase::TeamHandoff { next: Side::Enemy });
        assert!(!engine.is_side_turn(Side::Player, true));

        assert!(engine.advance());
        assert_eq!(engine.active_side(), Side::Enemy);
        assert_eq!(engine.active_unit(), Some(e1));
        assert_eq!(engine.round(), 2);

        assert!(engine.end_unit_turn());
        assert!(engine.advance());
        assert_eq!(engine.active_unit(), Some(p1));
        assert_eq!(engine.round(), 2);
    }

    #[test]
    fn end_unit_turn_without_active_ship_is_noop() {
        let (mut engine, _, _, _) = setup_engine_scenario();
        assert!(!engine.end_unit_turn());
        assert_eq!(engine.phase(), TurnPhase::AwaitingStart);

        engine.start_match();
        engine.end_unit_turn();
        engine.end_unit_turn();
        let index_before = engine.active_index;
        assert!(!engine.end_unit_turn());
        assert_eq!(engine.active_index, index_before);
        assert_eq!(engine.phase(), TurnPhase::TeamHandoff { next: Side::Enemy });
    }

    #[test]
    fn actions_refill_at_turn_start_only() {
        let (mut engine, p1, _, _) = setup_engine_scenario();
        engine.start_match();
        engine.request_rotate(p1, 1).unwrap();
        assert_eq!(engine.battle().ship(p1).unwrap().actions(), 1);

        engine.end_unit_turn();
        assert_eq!(engine.battle().ship(p1).unwrap().actions(), 1);
    }

    #[test]
    fn spending_last_action_ends_the_turn() {
        let (mut engine, p1, p2, _) = setup_engine_scenario();
        engine.start_match();
        engine.request_move(p1, 1).unwrap();
        assert_eq!(engine.active_unit(), Some(p1));
        engine.request_rotate(p1, -1).unwrap();
        assert_eq!(engine.active_unit(), Some(p2));
    }

    #[test]
    fn requests_from_inactive_ships_are_rejected() {
        let (mut engine, p1, p2, e1) = setup_engine_scenario();
        assert!(matches!(
            engine.request_move(p1, 1).unwrap_err().as_action_error(),
            Some(ActionError::MatchNotStarted)
        ));

        engine.start_match();
        assert!(matches!(
            engine.request_move(p2, 1).unwrap_err().as_action_error(),
            Some(ActionError::NotYourTurn(_))
        ));
        assert!(matches!(
            engine.request_rotate(e1, 1).unwrap_err().as_action_error(),
            Some(ActionError::NotYourTurn(_))
        ));
        assert_eq!(engine.battle().ship(p2).unwrap().cell(), Cell::new(0, 3));
    }

    #[test]
    fn destroying_active_ship_moves_turn_on() {
        let (mut engine, p1, p2, _) = setup_engine_scenario();
        engine.start_match();
        engine.on_unit_destroyed(p1).unwrap();

        assert_eq!(engine.active_unit(), Some(p2));
        assert_eq!(engine.roster(Side::Player), &[p2]);
        assert!(!engine.battle().grid().is_occupied(Cell::new(0, 1)));
    }

    #[test]
    fn destroying_earlier_ship_keeps_active_ship() {
        let (mut engine, p1, p2, _) = setup_engine_scenario();
        engine.start_match();
        engine.end_unit_turn();
        assert_eq!(engine.active_unit(), Some(p2));

        engine.on_unit_destroyed(p1).unwrap();
        assert_eq!(engine.active_unit(), Some(p2));
        assert_eq!(engine.active_index, 0);

        engine.end_unit_turn();
        assert_eq!(engine.phase(), TurnPhase::TeamHandoff { next: Side::Enemy });
    }

    #[test]
    fn last_enemy_sunk_ends_match_once() {
        let (mut engine, _, _, e1) = setup_engine_scenario();
        engine.start_match();
        engine.drain_events();

        engine.on_unit_destroyed(e1).unwrap();
        engine.on_unit_destroyed(e1).unwrap();
        assert_eq!(engine.winner(), Some(Side::Player));
        assert_eq!(engine.phase(), TurnPhase::MatchOver { winner: Side::Player });
        assert!(!engine.advance());

        let overs = engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, MatchEvent::MatchOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn empty_side_loses_at_its_turn_start() {
        let mut battle = Battle::new(HexGrid::rectangle(4, 4), 1);
        launch(&mut battle, Side::Enemy, Cell::new(3, 3));
        let mut engine = TurnEngine::new(battle, Control::External, Control::Scripted);
        engine.start_match();
        assert_eq!(engine.winner(), Some(Side::Enemy));
        assert!(engine.active_unit().is_none());
    }

    #[test]
    fn scripted_ship_closes_distance_and_ends_turn() {
        let mut battle = Battle::new(HexGrid::rectangle(12, 5), 3);
        let _p = launch(&mut battle, Side::Player, Cell::new(0, 2));
        let e = launch(&mut battle, Side::Enemy, Cell::new(11, 2));
        let mut engine = TurnEngine::new(battle, Control::External, Control::Scripted);
        engine.start_match();
        engine.end_unit_turn();

        // Handoff, decide, maneuver, finish, handoff back.
        let steps = engine.run_scripted(100);
        assert_eq!(steps, 5);
        assert_eq!(engine.battle().ship(e).unwrap().cell(), Cell::new(10, 2));
        assert_eq!(engine.battle().ship(e).unwrap().facing(), Direction::WEST);
        assert_eq!(engine.active_side(), Side::Player);
        assert_eq!(engine.phase(), TurnPhase::AwaitingCommand);
    }

    #[test]
    fn scripted_ship_with_one_action_steps_ahead_when_that_closes() {
        let one_action = ShipStats {
            max_actions: 1,
            ..ShipStats::default()
        };
        let mut battle = Battle::new(HexGrid::rectangle(12, 5), 3);
        let _p = launch(&mut battle, Side::Player, Cell::new(0, 1));
        let e = battle
            .launch_ship("Sloop", Side::Enemy, Cell::new(11, 1), one_action.clone())
            .unwrap();
        let mut engine = TurnEngine::new(battle, Control::External, Control::Scripted);
        engine.start_match();
        engine.end_unit_turn();
        engine.run_scripted(100);
        assert_eq!(engine.battle().ship(e).unwrap().cell(), Cell::new(10, 1));
        assert_eq!(engine.battle().ship(e).unwrap().facing(), Direction::WEST);

        // Prey to the north: the cell ahead gains nothing, so the last
        // action goes on lining up.
        let mut battle = Battle::new(HexGrid::rectangle(12, 5), 3);
        let _p = launch(&mut battle, Side::Player, Cell::new(11, 4));
        let e = battle
            .launch_ship("Sloop", Side::Enemy, Cell::new(11, 1), one_action)
            .unwrap();
        let mut engine = TurnEngine::new(battle, Control::External, Control::Scripted);
        engine.start_match();
        engine.end_unit_turn();
        engine.run_scripted(100);
        assert_eq!(engine.battle().ship(e).unwrap().cell(), Cell::new(11, 1));
        assert_eq!(engine.battle().ship(e).unwrap().facing(), Direction::NORTH_WEST);
    }

    #[test]
    fn from_config_takes_control_per_side() {
        let config = MatchConfig {
            player_control: Control::Scripted,
            enemy_control: Control::External,
            ..MatchConfig::default()
        };
        let engine = TurnEngine::from_config(&config, 5).unwrap();
        for side in [Side::Player, Side::Enemy] {
            assert_eq!(engine.control(side), config.control(side));
        }
        assert_eq!(engine.control(Side::Player), Control::Scripted);
    }

    #[test]
    fn reinforcements_join_next_turn() {
        let (mut engine, _, _, _) = setup_engine_scenario();
        engine.start_match();
        let late = engine
            .spawn_ship(Side::Player, "Late", ShipStats::default(), Cell::new(1, 1))
            .unwrap();
        assert!(!engine.roster(Side::Player).contains(&late));
        assert!(engine
            .drain_events()
            .contains(&MatchEvent::ShipSpawned {
                ship: late,
                side: Side::Player,
                cell: Cell::new(1, 1)
            }));
    }
}
