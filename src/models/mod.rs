//! Domain models
//!
//! This module contains all domain models representing battle entities
//! and concepts. Models are pure data structures with minimal logic.

pub mod battle;
pub mod constants;
pub mod dice;
pub mod direction;
pub mod errors;
pub mod hex_grid;
pub mod position;
pub mod ship;
