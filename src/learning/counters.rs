//! Per-(state, move) outcome counts and their normalized form

use serde::{Deserialize, Serialize};

use crate::tictactoe::Outcome;

/// How often playing a move from a state ended in each outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounters {
    pub win: u64,
    pub draw: u64,
    pub lose: u64,
}

impl OutcomeCounters {
    pub fn new(win: u64, draw: u64, lose: u64) -> Self {
        Self { win, draw, lose }
    }

    /// Count one more game with the given outcome
    pub fn increment(&mut self, outcome: Outcome) {
        let slot = match outcome {
            Outcome::Win => &mut self.win,
            Outcome::Draw => &mut self.draw,
            Outcome::Lose => &mut self.lose,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        self.win + self.draw + self.lose
    }

    /// Empirical outcome frequencies; the uniform prior when nothing is counted
    pub fn probabilities(&self) -> OutcomeProbabilities {
        let total = self.total();
        if total == 0 {
            return OutcomeProbabilities::uniform();
        }
        let total = total as f64;
        OutcomeProbabilities {
            win: self.win as f64 / total,
            draw: self.draw as f64 / total,
            lose: self.lose as f64 / total,
        }
    }
}

/// A probability triple over outcomes, summing to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub win: f64,
    pub draw: f64,
    pub lose: f64,
}

impl OutcomeProbabilities {
    /// Prior for a pair that has never been observed
    pub fn uniform() -> Self {
        let third = 1.0 / 3.0;
        Self {
            win: third,
            draw: third,
            lose: third,
        }
    }

    /// Probability that the game does not end in a loss
    pub fn not_losing(&self) -> f64 {
        self.win + self.draw
    }
}

impl Default for OutcomeProbabilities {
    fn default() -> Self {
        Self::uniform()
    }
}
