//! Shared policy tables
//!
//! The store keeps four independent tables, one per (greedy, mirrored)
//! combination. Agents hold an `Arc<PolicyStore>` and read and write only
//! the table their flags select, so agents with equal flags pool their
//! experience while differently configured agents stay isolated.
//!
//! Each table sits behind its own mutex. A finished game is written under
//! a single lock acquisition, which makes every learning update atomic with
//! respect to other agents sharing the table.

use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};

use super::counters::{OutcomeCounters, OutcomeProbabilities};
use crate::tictactoe::{BoardState, Move, Outcome};

/// A position together with the move played from it
pub type Experience = (BoardState, Move);

/// Canonical key of a position: its nine cells row-major plus the side to move.
///
/// Including the turn keeps X-to-move and O-to-move views of the same grid
/// apart, which matters once mirrored learning writes opponent moves into
/// the same table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl From<&BoardState> for StateKey {
    fn from(state: &BoardState) -> Self {
        StateKey(state.encode())
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The agent flags that select a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyFlags {
    pub greedy: bool,
    pub mirrored: bool,
}

impl PolicyFlags {
    pub const ALL: [PolicyFlags; 4] = [
        PolicyFlags::new(false, false),
        PolicyFlags::new(true, false),
        PolicyFlags::new(false, true),
        PolicyFlags::new(true, true),
    ];

    pub const fn new(greedy: bool, mirrored: bool) -> Self {
        Self { greedy, mirrored }
    }

    fn index(self) -> usize {
        usize::from(self.greedy) | (usize::from(self.mirrored) << 1)
    }
}

impl fmt::Display for PolicyFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}greedy,{}mirrored",
            if self.greedy { "" } else { "!" },
            if self.mirrored { "" } else { "!" }
        )
    }
}

/// Outcome counters keyed by state, then by move
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    entries: HashMap<StateKey, HashMap<Move, OutcomeCounters>>,
}

impl PolicyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for a pair, if it has ever been recorded
    pub fn get(&self, state: &BoardState, mv: Move) -> Option<OutcomeCounters> {
        self.entries
            .get(&StateKey::from(state))
            .and_then(|moves| moves.get(&mv))
            .copied()
    }

    /// Empirical outcome probabilities, or the uniform prior for unseen pairs
    pub fn probabilities(&self, state: &BoardState, mv: Move) -> OutcomeProbabilities {
        self.get(state, mv)
            .map(|counters| counters.probabilities())
            .unwrap_or_else(OutcomeProbabilities::uniform)
    }

    /// Add one to the outcome's counter for every pair, creating entries as needed
    pub fn record(&mut self, pairs: &[Experience], outcome: Outcome) {
        for (state, mv) in pairs {
            self.entries
                .entry(StateKey::from(state))
                .or_default()
                .entry(*mv)
                .or_default()
                .increment(outcome);
        }
    }

    /// Number of distinct states with at least one recorded move
    pub fn state_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct (state, move) pairs
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Sum of every counter in the table
    pub fn total_observations(&self) -> u64 {
        self.entries
            .values()
            .flat_map(HashMap::values)
            .map(OutcomeCounters::total)
            .sum()
    }

    /// States with their recorded moves, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &HashMap<Move, OutcomeCounters>)> {
        self.entries.iter()
    }

    /// The `limit` states with the most observations, busiest first.
    /// Ties are broken by key so the order is stable.
    pub fn busiest_states(&self, limit: usize) -> Vec<(&StateKey, u64)> {
        let mut states: Vec<(&StateKey, u64)> = self
            .iter()
            .map(|(key, moves)| (key, moves.values().map(OutcomeCounters::total).sum()))
            .collect();
        states.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        states.truncate(limit);
        states
    }
}

/// Four policy tables shared between adaptive agents
#[derive(Debug, Default)]
pub struct PolicyStore {
    tables: [Mutex<PolicyTable>; 4],
}

impl PolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, flags: PolicyFlags) -> MutexGuard<'_, PolicyTable> {
        // A panic elsewhere cannot leave a counter half-written, so the data
        // behind a poisoned lock is still consistent.
        self.tables[flags.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn counters(
        &self,
        flags: PolicyFlags,
        state: &BoardState,
        mv: Move,
    ) -> Option<OutcomeCounters> {
        self.table(flags).get(state, mv)
    }

    pub fn outcome_probabilities(
        &self,
        flags: PolicyFlags,
        state: &BoardState,
        mv: Move,
    ) -> OutcomeProbabilities {
        self.table(flags).probabilities(state, mv)
    }

    /// Probabilities for several moves from one state under a single lock
    pub fn outcome_probabilities_for(
        &self,
        flags: PolicyFlags,
        state: &BoardState,
        moves: impl IntoIterator<Item = Move>,
    ) -> Vec<OutcomeProbabilities> {
        let table = self.table(flags);
        moves
            .into_iter()
            .map(|mv| table.probabilities(state, mv))
            .collect()
    }

    /// Apply every batch of a finished game atomically.
    ///
    /// Each batch pairs the experiences with the outcome to credit them with.
    pub fn record_game(&self, flags: PolicyFlags, batches: &[(&[Experience], Outcome)]) {
        let mut table = self.table(flags);
        for (pairs, outcome) in batches {
            table.record(pairs, *outcome);
        }
    }

    pub fn state_count(&self, flags: PolicyFlags) -> usize {
        self.table(flags).state_count()
    }

    pub fn entry_count(&self, flags: PolicyFlags) -> usize {
        self.table(flags).entry_count()
    }

    pub fn total_observations(&self, flags: PolicyFlags) -> u64 {
        self.table(flags).total_observations()
    }

    /// Copy of one table, for inspection
    pub fn snapshot(&self, flags: PolicyFlags) -> PolicyTable {
        self.table(flags).clone()
    }

    /// Forget everything learned under the given flags
    pub fn clear(&self, flags: PolicyFlags) {
        *self.table(flags) = PolicyTable::new();
    }
}
