//! Shared configuration types for CLI commands

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, agents::AgentKind};

/// Common configuration shared across commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// Random seed for reproducibility
    pub seed: Option<u64>,

    /// Whether to show progress bars
    pub progress: bool,

    /// Print the full metrics summary after training
    pub verbose: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            seed: None,
            progress: true,
            verbose: false,
        }
    }
}

/// Self-play training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Games per batch
    pub games: usize,

    /// Number of batches; the tally is printed after each one
    pub batches: usize,

    /// Agent in seat A
    pub player_a: AgentKind,

    /// Agent in seat B
    pub player_b: AgentKind,

    /// Swap which seat plays X after every game
    pub alternate_first: bool,

    /// Size of the recent-games window used for metrics
    pub window: usize,

    /// Log the windowed metrics every this many games; 0 turns it off
    pub report_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            games: 500,
            batches: 1,
            player_a: AgentKind::Adaptive {
                greedy: true,
                mirrored: true,
            },
            player_b: AgentKind::Random,
            alternate_first: true,
            window: 100,
            report_every: 0,
        }
    }
}

/// Configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub common: CommonConfig,
    pub train: TrainConfig,
}

impl CliConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let config: CliConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.train.batches == 0 {
            return Err(Error::InvalidConfiguration {
                message: "train.batches must be at least 1".to_string(),
            });
        }
        if self.train.window == 0 {
            return Err(Error::InvalidConfiguration {
                message: "train.window must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
