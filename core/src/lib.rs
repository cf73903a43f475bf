//! Minesweeper round engine: mine layout generation, adjacency labels,
//! cascading reveals, marks, and win/loss detection over a flat row-major board.

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use outcome::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod config;
mod error;
mod generator;
mod minefield;
mod outcome;
mod reveal;
mod session;
mod types;
