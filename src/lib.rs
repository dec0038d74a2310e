//! Tic-tac-toe with agents that learn by self-play
//!
//! This crate provides:
//! - An immutable tic-tac-toe engine with single-move application and
//!   successor enumeration
//! - The [`Agent`](ports::Agent) interface with random, greedy and adaptive
//!   strategies
//! - [`AdaptivePlayer`](agents::AdaptivePlayer), which keeps win/draw/lose
//!   counts per (state, move) pair in a shared [`PolicyStore`](learning::PolicyStore)
//! - A self-play session harness and a small CLI

pub mod agents;
pub mod cli;
pub mod error;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod utils;

pub use agents::{AdaptiveConfig, AdaptivePlayer, AgentKind};
pub use error::{Error, Result};
pub use learning::{OutcomeCounters, OutcomeProbabilities, PolicyFlags, PolicyStore};
pub use tictactoe::{BoardState, Move, Outcome, Player};
