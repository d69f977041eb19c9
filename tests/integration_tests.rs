use pretty_assertions::assert_eq;

use broadside::models::battle::Battle;
use broadside::models::direction::Direction;
use broadside::models::hex_grid::HexGrid;
use broadside::models::position::Cell;
use broadside::models::ship::{ShipId, ShipStats, Side};
use broadside::services::combat::BoardingWinner;
use broadside::{ActionError, Control, GameError, MatchConfig, MatchEvent, TurnEngine, TurnPhase};

fn stats(f: impl FnOnce(&mut ShipStats)) -> ShipStats {
    let mut stats = ShipStats::default();
    f(&mut stats);
    stats
}

fn action_error(err: GameError) -> ActionError {
    err.as_action_error().cloned().expect("expected an illegal action")
}

fn count_match_over(events: &[MatchEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, MatchEvent::MatchOver { .. }))
        .count()
}

#[test]
fn broadside_on_single_row_map() {
    // Five cells in a row, gunship at the west end, target three cells east.
    let mut battle = Battle::new(HexGrid::rectangle(5, 1), 1);
    let gunship = battle
        .launch_ship(
            "Gunship",
            Side::Player,
            Cell::new(0, 0),
            stats(|s| s.ranged_damage = "10D1".to_string()),
        )
        .unwrap();
    let target = battle
        .launch_ship("Target", Side::Enemy, Cell::new(3, 0), stats(|s| s.armor = 4))
        .unwrap();
    let mut engine = TurnEngine::new(battle, Control::External, Control::External);
    engine.start_match();

    // Facing east the target is dead ahead, outside the broadside arc.
    assert_eq!(engine.battle().ship(gunship).unwrap().facing(), Direction::EAST);
    assert!(engine.possible_ranged_targets(gunship).is_empty());
    let err = engine.request_ranged_attack(gunship, target).unwrap_err();
    assert_eq!(action_error(err), ActionError::OutsideArc(target));
    assert_eq!(engine.battle().ship(gunship).unwrap().actions(), 2);

    // Swing the bow off the line and the east ray becomes a flank.
    engine
        .battle_mut()
        .ship_mut(gunship)
        .unwrap()
        .set_facing(Direction::SOUTH_EAST);
    assert_eq!(engine.possible_ranged_targets(gunship), vec![target]);

    let outcome = engine.request_ranged_attack(gunship, target).unwrap();
    assert_eq!(outcome.roll, 10);
    assert_eq!(outcome.damage, 6);
    assert_eq!(engine.battle().ship(target).unwrap().health(), 94);
    assert_eq!(engine.battle().ship(gunship).unwrap().actions(), 1);
    assert!(engine
        .drain_events()
        .contains(&MatchEvent::RangedResolved(outcome)));
}

#[test]
fn sinking_the_last_enemy_ends_match_exactly_once() {
    let boarders = stats(|s| s.boarding_damage = "1D1".to_string());
    let mut battle = Battle::new(HexGrid::rectangle(6, 3), 5);
    let hero = battle
        .launch_ship("Hero", Side::Player, Cell::new(2, 1), boarders)
        .unwrap();
    let prize = battle
        .launch_ship(
            "Prize",
            Side::Enemy,
            Cell::new(3, 1),
            stats(|s| {
                s.max_health = 1;
                s.boarding_damage = "1D1".to_string();
            }),
        )
        .unwrap();
    let mut engine = TurnEngine::new(battle, Control::External, Control::Scripted);
    engine.start_match();

    let outcome = engine.request_board(hero, prize).unwrap();
    assert_eq!(outcome.winner, Some(BoardingWinner::Attacker));
    assert_eq!(outcome.destroyed, vec![prize]);

    assert_eq!(engine.winner(), Some(Side::Player));
    assert_eq!(engine.phase(), TurnPhase::MatchOver { winner: Side::Player });
    assert_eq!(engine.active_unit(), None);

    // Late notifications and requests change nothing.
    engine.on_unit_destroyed(prize).unwrap();
    assert!(!engine.end_unit_turn());
    assert!(!engine.advance());
    let err = engine.request_rotate(hero, 1).unwrap_err();
    assert_eq!(action_error(err), ActionError::MatchOver);

    let events = engine.drain_events();
    assert_eq!(count_match_over(&events), 1);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, MatchEvent::ShipDestroyed { .. }))
            .count(),
        1
    );
}

#[test]
fn end_unit_turn_with_no_active_ship_is_a_noop() {
    let mut battle = Battle::new(HexGrid::rectangle(6, 3), 5);
    battle
        .launch_ship("P", Side::Player, Cell::new(0, 0), ShipStats::default())
        .unwrap();
    battle
        .launch_ship("E", Side::Enemy, Cell::new(5, 2), ShipStats::default())
        .unwrap();
    let mut engine = TurnEngine::new(battle, Control::External, Control::External);

    assert!(!engine.end_unit_turn());
    assert_eq!(engine.phase(), TurnPhase::AwaitingStart);
    assert!(engine.drain_events().is_empty());

    engine.start_match();
    assert!(engine.end_unit_turn());
    engine.drain_events();

    // Between sides nobody holds the helm.
    assert_eq!(engine.active_unit(), None);
    assert!(!engine.end_unit_turn());
    assert_eq!(engine.phase(), TurnPhase::TeamHandoff { next: Side::Enemy });
    assert!(engine.drain_events().is_empty());
}

#[test]
fn round_counter_advances_once_per_full_cycle() {
    let mut battle = Battle::new(HexGrid::rectangle(6, 3), 5);
    battle
        .launch_ship("P", Side::Player, Cell::new(0, 0), ShipStats::default())
        .unwrap();
    battle
        .launch_ship("E", Side::Enemy, Cell::new(5, 2), ShipStats::default())
        .unwrap();
    let mut engine = TurnEngine::new(battle, Control::External, Control::External);
    engine.start_match();

    for expected_round in 1..=3 {
        assert_eq!(engine.round(), expected_round);
        assert_eq!(engine.active_side(), Side::Player);
        engine.end_unit_turn();
        engine.advance();
        assert_eq!(engine.active_side(), Side::Enemy);
        assert_eq!(engine.round(), expected_round + 1);
        engine.end_unit_turn();
        engine.advance();
    }

    let rounds: Vec<u32> = engine
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            MatchEvent::RoundChanged { round } => Some(round),
            _ => None,
        })
        .collect();
    assert_eq!(rounds, vec![1, 2, 3, 4]);
}

#[test]
fn scripted_opponent_boards_then_ends_its_turn() {
    let boarders = stats(|s| s.boarding_damage = "1D1".to_string());
    let mut battle = Battle::new(HexGrid::rectangle(6, 5), 9);
    let player = battle
        .launch_ship("Player", Side::Player, Cell::new(2, 2), boarders.clone())
        .unwrap();
    let raider = battle
        .launch_ship("Raider", Side::Enemy, Cell::new(3, 2), boarders)
        .unwrap();
    let mut engine = TurnEngine::new(battle, Control::External, Control::Scripted);
    engine.start_match();
    engine.request_end_turn(player).unwrap();
    engine.drain_events();

    engine.run_scripted(100);

    // Three dice against two on one-sided dice: the raider wins by one.
    assert_eq!(engine.battle().ship(player).unwrap().health(), 99);
    assert_eq!(engine.battle().ship(raider).unwrap().health(), 100);
    assert_eq!(engine.battle().ship(raider).unwrap().cell(), Cell::new(3, 2));
    assert_eq!(engine.phase(), TurnPhase::AwaitingCommand);
    assert_eq!(engine.active_unit(), Some(player));
    assert_eq!(engine.round(), 2);

    let events = engine.drain_events();
    let boarded = events.iter().position(|e| matches!(e, MatchEvent::BoardingResolved(_)));
    let ended = events
        .iter()
        .position(|e| *e == MatchEvent::UnitTurnEnded { ship: raider });
    assert!(boarded.is_some());
    assert!(boarded < ended);
}

#[test]
fn scripted_turn_pauses_between_stages() {
    let mut battle = Battle::new(HexGrid::rectangle(12, 3), 9);
    let player = battle
        .launch_ship("Player", Side::Player, Cell::new(0, 1), ShipStats::default())
        .unwrap();
    let raider = battle
        .launch_ship("Raider", Side::Enemy, Cell::new(11, 1), ShipStats::default())
        .unwrap();
    let mut engine = TurnEngine::new(battle, Control::External, Control::Scripted);
    engine.start_match();
    engine.request_end_turn(player).unwrap();

    assert!(engine.advance());
    assert_eq!(engine.phase(), TurnPhase::ScriptedDecide);
    let before = engine.battle().ship(raider).unwrap().cell();
    assert_eq!(before, Cell::new(11, 1));

    // Orders are refused while the scripted ship is mid-turn.
    let err = engine.request_move(raider, 1).unwrap_err();
    assert_eq!(action_error(err), ActionError::ActionInProgress);
    let err = engine.request_move(player, 1).unwrap_err();
    assert_eq!(action_error(err), ActionError::NotYourTurn(player));

    assert!(engine.advance());
    assert_eq!(engine.phase(), TurnPhase::ScriptedManeuver);
    assert_eq!(engine.battle().ship(raider).unwrap().cell(), before);

    assert!(engine.advance());
    assert_eq!(engine.phase(), TurnPhase::ScriptedFinish);
    assert_eq!(engine.battle().ship(raider).unwrap().cell(), Cell::new(10, 1));

    assert!(engine.advance());
    assert_eq!(engine.phase(), TurnPhase::TeamHandoff { next: Side::Player });
    assert!(engine.advance());
    assert_eq!(engine.phase(), TurnPhase::AwaitingCommand);
    assert!(!engine.advance());
}

#[test]
fn repelled_boarders_sink_and_turn_moves_on() {
    let mut battle = Battle::new(HexGrid::rectangle(6, 4), 21);
    let doomed = battle
        .launch_ship(
            "Doomed",
            Side::Player,
            Cell::new(2, 1),
            stats(|s| {
                s.max_health = 1;
                s.boarding_damage = "1D1".to_string();
            }),
        )
        .unwrap();
    let second = battle
        .launch_ship("Second", Side::Player, Cell::new(0, 3), ShipStats::default())
        .unwrap();
    let fortress = battle
        .launch_ship(
            "Fortress",
            Side::Enemy,
            Cell::new(3, 1),
            stats(|s| s.boarding_damage = "1D1000".to_string()),
        )
        .unwrap();
    let mut engine = TurnEngine::new(battle, Control::External, Control::External);
    engine.start_match();

    let outcome = engine.request_board(doomed, fortress).unwrap();
    assert_eq!(outcome.winner, Some(BoardingWinner::Defender));
    assert_eq!(outcome.destroyed, vec![doomed]);

    assert_eq!(engine.active_unit(), Some(second));
    assert_eq!(engine.roster(Side::Player), &[second]);
    assert_eq!(engine.winner(), None);
    assert!(!engine.battle().grid().is_occupied(Cell::new(2, 1)));
}

#[test]
fn requests_before_start_are_rejected() {
    let mut engine = TurnEngine::from_config(&MatchConfig::default(), 4).unwrap();
    let err = engine.request_move(ShipId(0), 1).unwrap_err();
    assert_eq!(action_error(err), ActionError::MatchNotStarted);

    let err = engine.request_move(ShipId(99), 1).unwrap_err();
    assert_eq!(action_error(err), ActionError::UnknownShip(ShipId(99)));
}

#[test]
fn same_seed_deploys_same_fleets() {
    let config = MatchConfig::default();
    let a = TurnEngine::from_config(&config, 1234).unwrap();
    let b = TurnEngine::from_config(&config, 1234).unwrap();

    let cells = |e: &TurnEngine| -> Vec<Cell> { e.battle().ships().iter().map(|s| s.cell()).collect() };
    assert_eq!(cells(&a), cells(&b));
    assert_eq!(a.battle().ships().len(), 4);
}

#[test]
fn reinforcement_without_room_is_not_created() {
    let grid = HexGrid::from_cells([Cell::new(0, 0), Cell::new(5, 0)]);
    let mut battle = Battle::new(grid, 2);
    battle
        .launch_ship("P", Side::Player, Cell::new(0, 0), ShipStats::default())
        .unwrap();
    battle
        .launch_ship("E", Side::Enemy, Cell::new(5, 0), ShipStats::default())
        .unwrap();
    let mut engine = TurnEngine::new(battle, Control::External, Control::External);
    engine.start_match();

    let err = engine
        .spawn_ship(Side::Player, "Late", ShipStats::default(), Cell::new(0, 0))
        .unwrap_err();
    assert!(matches!(err, GameError::NoValidSpawnCell { .. }));
    assert_eq!(engine.battle().ships().len(), 2);
}

#[test]
fn autoplay_keeps_engine_invariants() {
    let config = MatchConfig {
        player_control: Control::Scripted,
        ..MatchConfig::default()
    };
    let mut engine = TurnEngine::from_config(&config, 77).unwrap();
    let mut match_overs = 0;

    for _ in 0..3000 {
        let progressed = engine.advance();
        match_overs += count_match_over(&engine.drain_events());

        if let Some(id) = engine.active_unit() {
            let ship = engine.battle().ship(id).unwrap();
            assert!(ship.is_alive());
            assert_eq!(ship.side(), engine.active_side());
        }
        for ship in engine.battle().ships() {
            assert!(ship.actions() <= ship.max_actions());
            assert!(ship.health() <= ship.max_health());
            if ship.is_alive() {
                assert_eq!(engine.battle().grid().unit_at(ship.cell()), Some(ship.id()));
            }
        }
        assert_eq!(
            engine.battle().grid().occupied_cells().count(),
            engine.living_count(Side::Player) + engine.living_count(Side::Enemy)
        );

        if !progressed {
            break;
        }
    }

    assert!(match_overs <= 1);
    assert_eq!(match_overs == 1, engine.is_over());
}
