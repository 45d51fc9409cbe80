//! Core rules for Blockade: two players claim cells on a shrinking grid,
//! and every move walls off the cell left behind.

pub mod board;
pub mod player;
pub mod util;

pub use board::Game;
