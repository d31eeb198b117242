//
// Hashiwokakero logic engine
//
// Copyright 2021 Simon Frankau
//

//! Model, rules and solver for Hashiwokakero ("Bridges") puzzles.
//!
//! A [`Board`] is built once from a matrix of island requirements and
//! then played on with [`Board::toggle_bridge`], or finished off with
//! [`Board::solve`]. [`Session`] adds the selection and status handling
//! an interactive front end needs.

pub mod board;
pub mod error;
pub mod hint;
pub mod moves;
pub mod puzzle;
pub mod session;
pub mod solver;
pub mod win;

pub use board::{Board, Island, IslandId, Orientation, Segment};
pub use error::{NoStraightPath, PuzzleError};
pub use hint::Hint;
pub use moves::{ToggleOutcome, Tone};
pub use puzzle::Difficulty;
pub use session::{ClickEvent, Session, Status};
pub use solver::{PartialReason, SolveOutcome, SolvedBy, SolverConfig};
