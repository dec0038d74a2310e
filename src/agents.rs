//! Move-selection strategies
//!
//! - [`RandomAgent`] and [`GreedyRandomAgent`]: stateless baselines
//! - [`AdaptivePlayer`]: learns outcome statistics through a shared
//!   [`PolicyStore`](crate::learning::PolicyStore)
//!
//! [`AgentKind`] names the closed set of automated strategies and builds
//! them behind the [`Agent`] port.

pub mod adaptive;
pub mod config;
pub mod random;

use std::{fmt, str::FromStr, sync::Arc};

pub use adaptive::{AdaptivePlayer, SELECTION_EPSILON};
pub use config::AdaptiveConfig;
pub use random::{GreedyRandomAgent, RandomAgent};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    learning::{PolicyFlags, PolicyStore},
    ports::Agent,
};

const AGENT_KIND_CHOICES: &str =
    "random, greedy, adaptive, adaptive:greedy, adaptive:mirrored, adaptive:greedy,mirrored";

/// An automated strategy and its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgentKind {
    Random,
    GreedyRandom,
    Adaptive { greedy: bool, mirrored: bool },
}

impl AgentKind {
    /// Build the agent. Adaptive agents attach to `store`.
    pub fn build(
        &self,
        name: impl Into<String>,
        store: &Arc<PolicyStore>,
        seed: Option<u64>,
    ) -> Box<dyn Agent> {
        let name = name.into();
        match *self {
            AgentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::with_seed(name, seed)),
                None => Box::new(RandomAgent::new(name)),
            },
            AgentKind::GreedyRandom => match seed {
                Some(seed) => Box::new(GreedyRandomAgent::with_seed(name, seed)),
                None => Box::new(GreedyRandomAgent::new(name)),
            },
            AgentKind::Adaptive { greedy, mirrored } => {
                let mut config = AdaptiveConfig::new().greedy(greedy).mirrored(mirrored);
                if let Some(seed) = seed {
                    config = config.with_seed(seed);
                }
                Box::new(AdaptivePlayer::new(name, config, Arc::clone(store)))
            }
        }
    }

    /// Policy table the agent learns into, for adaptive kinds
    pub fn flags(&self) -> Option<PolicyFlags> {
        match *self {
            AgentKind::Adaptive { greedy, mirrored } => Some(PolicyFlags::new(greedy, mirrored)),
            _ => None,
        }
    }
}

impl TryFrom<String> for AgentKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AgentKind> for String {
    fn from(kind: AgentKind) -> Self {
        kind.to_string()
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let normalized = input.trim().to_ascii_lowercase();
        let parse_error = || Error::ParseAgentKind {
            input: input.to_string(),
            expected: AGENT_KIND_CHOICES.to_string(),
        };

        match normalized.as_str() {
            "random" => return Ok(AgentKind::Random),
            "greedy" | "greedy-random" => return Ok(AgentKind::GreedyRandom),
            "adaptive" => {
                return Ok(AgentKind::Adaptive {
                    greedy: false,
                    mirrored: false,
                });
            }
            _ => {}
        }

        let options = normalized
            .strip_prefix("adaptive:")
            .ok_or_else(parse_error)?;
        let (mut greedy, mut mirrored) = (false, false);
        for option in options.split(',').map(str::trim) {
            match option {
                "greedy" => greedy = true,
                "mirrored" => mirrored = true,
                _ => return Err(parse_error()),
            }
        }
        Ok(AgentKind::Adaptive { greedy, mirrored })
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Random => f.write_str("random"),
            AgentKind::GreedyRandom => f.write_str("greedy"),
            AgentKind::Adaptive {
                greedy: false,
                mirrored: false,
            } => f.write_str("adaptive"),
            AgentKind::Adaptive { greedy, mirrored } => {
                let options: Vec<&str> = [(*greedy, "greedy"), (*mirrored, "mirrored")]
                    .into_iter()
                    .filter_map(|(on, label)| on.then_some(label))
                    .collect();
                write!(f, "adaptive:{}", options.join(","))
            }
        }
    }
}
