//! Self-play session harness
//!
//! This module drives games between two agents:
//! - [`Session`] alternates seats, plays games and tallies results
//! - observers collect progress, metrics and game records along the way

pub mod observers;
pub mod session;

pub use observers::{JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use session::{Session, SessionConfig, SessionResult, play_game};

pub use crate::ports::{Agent, Observer, Seat};
