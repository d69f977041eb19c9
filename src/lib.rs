//! Broadside
//!
//! The simulation core of a turn-based naval tactics game on a hex grid.
//!
//! # Overview
//!
//! Fleets of sailing warships take turns on a pointy-top hex map. Each ship
//! has a small budget of actions per turn: sail straight ahead, come about,
//! board an enemy alongside, or fire a broadside at an enemy abeam. A match
//! ends when one side has no ships afloat.
//!
//! # Modules
//!
//! - [`models`] - Hex coordinates, directions, dice, ships, the map, and battle state
//! - [`services`] - Movement, combat, fleet deployment, and the scripted opponent
//! - [`game_engine`] - Turn/action state machine, events, and the match controller
//! - [`config`] - JSON match configuration
//! - [`io`] - Input/output abstractions for testing
//! - [`ui`] - Text presentation of events and fleet status
//! - [`cli`] - Command-line harness
//!
//! # Example
//!
//! ```rust,no_run
//! use broadside::{MatchConfig, TurnEngine};
//!
//! let mut engine = TurnEngine::from_config(&MatchConfig::default(), 42).unwrap();
//! engine.start_match();
//! for event in engine.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod game_engine;
pub mod io;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use config::MatchConfig;
pub use game_engine::{Control, MatchEvent, MatchState, TurnEngine, TurnPhase};
pub use models::errors::{ActionError, DiceError, GameError, GameResult};
