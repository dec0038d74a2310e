//! Outcome statistics learned from finished games
//!
//! Each observed (state, move) pair accumulates win/draw/lose counts in a
//! [`PolicyTable`]. A [`PolicyStore`] owns one table per
//! [`PolicyFlags`] combination and is shared by every adaptive agent that
//! should pool what it learns.

pub mod counters;
pub mod store;

pub use counters::{OutcomeCounters, OutcomeProbabilities};
pub use store::{Experience, PolicyFlags, PolicyStore, PolicyTable, StateKey};
