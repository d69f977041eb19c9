//! Game services
//!
//! This module contains the rules that act on a battle: movement, combat,
//! fleet deployment, and the scripted opponent's decisions.

pub mod ai;
pub mod combat;
pub mod movement;
pub mod spawn;
