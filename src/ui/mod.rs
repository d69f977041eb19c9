//! Text presentation
//!
//! Turns match events and fleet state into lines for an `OutputWriter`.
//! Nothing here changes the battle.

pub mod presenters;
