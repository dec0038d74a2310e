//! Tic-Tac-Toe game engine
//!
//! Positions are immutable values: every move produces a new [`BoardState`].

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BOARD_SIZE, BoardState, CELL_COUNT, Cell, Player};
pub use game::{Candidate, GameRecord, Move, Outcome};
pub use lines::LineAnalyzer;
