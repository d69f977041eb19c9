use crate::game_engine::{MatchEvent, TurnEngine};
use crate::io::OutputWriter;
use crate::models::battle::Battle;
use crate::models::position::Cell;
use crate::models::ship::{ShipId, Side};
use crate::services::combat::BoardingWinner;

fn ship_name(battle: &Battle, id: ShipId) -> String {
    battle
        .ship(id)
        .map(|s| s.name().to_string())
        .unwrap_or_else(|| format!("ship {}", id))
}

pub struct EventPresenter;

impl EventPresenter {
    /// One line of narration for `event`, or `None` for bookkeeping events
    /// the player does not need to see.
    pub fn describe(event: &MatchEvent, battle: &Battle) -> Option<String> {
        let name = |id: ShipId| ship_name(battle, id);
        let line = match event {
            MatchEvent::MatchStarted {
                player_ships,
                enemy_ships,
            } => format!(
                "BATTLE JOINED: {} PLAYER SHIPS AGAINST {} ENEMY SHIPS",
                player_ships, enemy_ships
            ),
            MatchEvent::SideChanged { side } => format!("--- {} TURN ---", side),
            MatchEvent::ActiveShipChanged { ship, actions, .. } => {
                format!("{} TAKES THE HELM ({} ACTIONS)", name(*ship), actions)
            }
            MatchEvent::RoundChanged { round } => format!("=== ROUND {} ===", round),
            MatchEvent::PhaseChanged { .. } => return None,
            MatchEvent::ShipSpawned { ship, cell, .. } => {
                format!("{} LAUNCHED AT {}", name(*ship), cell)
            }
            MatchEvent::ShipMoved(m) => format!("{} SAILS {} -> {}", name(m.ship), m.from, m.to),
            MatchEvent::ShipRotated(r) => format!("{} COMES ABOUT TO {}", name(r.ship), r.to),
            MatchEvent::BoardingResolved(b) => {
                if let Some(err) = &b.dice_error {
                    format!("{} BOARDING FAILED: {}", name(b.attacker), err)
                } else {
                    let verdict = match b.winner {
                        Some(BoardingWinner::Attacker) => {
                            format!("{} TAKES {} DAMAGE", name(b.defender), b.damage)
                        }
                        Some(BoardingWinner::Defender) => {
                            format!("BOARDERS REPELLED, {} TAKES {} DAMAGE", name(b.attacker), b.damage)
                        }
                        None => "STALEMATE, NO DAMAGE".to_string(),
                    };
                    format!(
                        "{} BOARDS {} ({} VS {}): {}",
                        name(b.attacker),
                        name(b.defender),
                        b.contest.attacker_total,
                        b.contest.defender_total,
                        verdict
                    )
                }
            }
            MatchEvent::RangedResolved(r) => {
                if let Some(err) = &r.dice_error {
                    format!("{} GUNS SILENT: {}", name(r.attacker), err)
                } else {
                    format!(
                        "{} FIRES ON {}: ROLL {} - ARMOR {} = {} DAMAGE",
                        name(r.attacker),
                        name(r.target),
                        r.roll,
                        r.armor,
                        r.damage
                    )
                }
            }
            MatchEvent::ShipDestroyed { ship, .. } => format!("*** {} HAS BEEN SUNK ***", name(*ship)),
            MatchEvent::UnitTurnEnded { ship } => format!("{} ENDS ITS TURN", name(*ship)),
            MatchEvent::MatchOver { winner } => match winner {
                Side::Player => "*** VICTORY: THE ENEMY FLEET IS DESTROYED ***".to_string(),
                Side::Enemy => "*** DEFEAT: YOUR FLEET HAS BEEN SUNK ***".to_string(),
            },
        };
        Some(line)
    }

    pub fn show_events(events: &[MatchEvent], battle: &Battle, output: &mut dyn OutputWriter) {
        for event in events {
            if let Some(line) = Self::describe(event, battle) {
                output.writeln(&line);
            }
        }
    }
}

pub struct FleetPresenter;

impl FleetPresenter {
    pub fn show_status(engine: &TurnEngine, output: &mut dyn OutputWriter) {
        output.writeln(&format!(
            "ROUND {}   {} TURN   PHASE: {}",
            engine.round(),
            engine.active_side(),
            engine.phase()
        ));
        for ship in engine.battle().ships() {
            let marker = if engine.active_unit() == Some(ship.id()) { '>' } else { ' ' };
            let state = if ship.is_alive() {
                format!(
                    "{} {:<10} HULL {:>3}/{:<3} ACTIONS {}/{}",
                    ship.cell(),
                    ship.facing().to_string(),
                    ship.health(),
                    ship.max_health(),
                    ship.actions(),
                    ship.max_actions()
                )
            } else {
                "SUNK".to_string()
            };
            output.writeln(&format!(
                "{}{:<4}{:<16}{:<7}{}",
                marker,
                ship.id().to_string(),
                ship.name(),
                ship.side().to_string(),
                state
            ));
        }
    }

    /// Text chart of the sea, northmost row first. Odd rows are indented half
    /// a cell. `P`/`E` mark ships, `.` open water, blanks are off the map.
    pub fn render_chart(battle: &Battle) -> Vec<String> {
        let Some((min, max)) = battle.grid().bounds() else {
            return Vec::new();
        };
        (min.row..=max.row)
            .rev()
            .map(|row| {
                let mut line = String::new();
                if row & 1 == 1 {
                    line.push(' ');
                }
                for col in min.col..=max.col {
                    let cell = Cell::new(col, row);
                    let glyph = match battle.ship_at(cell) {
                        Some(ship) if ship.side() == Side::Player => 'P',
                        Some(_) => 'E',
                        None if battle.grid().contains(cell) => '.',
                        None => ' ',
                    };
                    line.push(glyph);
                    line.push(' ');
                }
                line.trim_end().to_string()
            })
            .collect()
    }

    pub fn show_chart(battle: &Battle, output: &mut dyn OutputWriter) {
        output.write_lines(&Self::render_chart(battle));
    }

    pub fn show_help(output: &mut dyn OutputWriter) {
        output.writeln("   MOVE N   = SAIL N CELLS AHEAD");
        output.writeln("   LEFT     = TURN ONE POINT TO PORT");
        output.writeln("   RIGHT    = TURN ONE POINT TO STARBOARD");
        output.writeln("   ROTATE N = TURN N POINTS (NEGATIVE FOR PORT)");
        output.writeln("   BOARD    = BOARD THE FIRST SHIP ALONGSIDE");
        output.writeln("   FIRE     = FIRE A BROADSIDE AT THE FIRST SHIP IN ARC");
        output.writeln("   END      = END THIS SHIP'S TURN");
        output.writeln("   STATUS   = FLEET STATUS AND CHART");
        output.writeln("   QUIT     = LEAVE THE BATTLE");
    }
}
