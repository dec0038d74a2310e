//! Ports (trait boundaries) between the game core and whatever drives it.
//!
//! Agents implement [`Agent`]; session harnesses report progress to
//! [`Observer`]s.

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::{Observer, Seat};
