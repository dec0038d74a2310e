//! Configuration for adaptive agents.

use serde::{Deserialize, Serialize};

use crate::learning::PolicyFlags;

/// Configuration for creating an [`AdaptivePlayer`](super::AdaptivePlayer).
///
/// `greedy` and `mirrored` are fixed for the agent's lifetime and together
/// select the shared table it reads and writes.
///
/// # Examples
///
/// ```
/// use ttt_learner::agents::AdaptiveConfig;
///
/// let config = AdaptiveConfig::new().greedy(true).mirrored(true).with_seed(42);
/// assert!(config.flags().greedy);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// Take an immediate win whenever one exists
    pub greedy: bool,
    /// Also learn from the opponent's moves, with inverted outcomes
    pub mirrored: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AdaptiveConfig {
    /// Plain configuration: not greedy, not mirrored, unseeded.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    pub fn mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The table selector for this configuration
    pub fn flags(&self) -> PolicyFlags {
        PolicyFlags::new(self.greedy, self.mirrored)
    }
}
