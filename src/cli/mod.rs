//! CLI infrastructure for the tic-tac-toe learner
//!
//! This module provides the command-line interface for self-play training
//! and for playing against a learning agent from the terminal.

pub mod commands;
pub mod config;
pub mod human;
pub mod output;
