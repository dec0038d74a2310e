//! Adaptive agent that learns outcome statistics from finished games
//!
//! Move selection samples candidates in proportion to how rarely they were
//! followed by a loss. After each game every recorded (state, move) pair is
//! credited with the final outcome in the shared [`PolicyStore`]. In
//! mirrored mode the opponent's pairs are credited too, with the outcome
//! seen from the opponent's side.

use std::sync::Arc;

use rand::{SeedableRng, random, rngs::StdRng};

use super::config::AdaptiveConfig;
use crate::{
    Error, Result,
    learning::{Experience, OutcomeProbabilities, PolicyFlags, PolicyStore},
    ports::Agent,
    tictactoe::{BoardState, Candidate, Move, Outcome, Player},
    utils::{normalize_weights, roulette_sample},
};

/// Weight floor so untried and always-losing moves can still be chosen
pub const SELECTION_EPSILON: f64 = 1e-9;

/// Self-improving agent backed by a shared policy store
pub struct AdaptivePlayer {
    name: String,
    config: AdaptiveConfig,
    store: Arc<PolicyStore>,
    rng: StdRng,
    /// Mark held during the current game, once known
    mark: Option<Player>,
    own_moves: Vec<Experience>,
    opponent_moves: Vec<Experience>,
}

impl std::fmt::Debug for AdaptivePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptivePlayer")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("mark", &self.mark)
            .field("own_moves", &self.own_moves.len())
            .field("opponent_moves", &self.opponent_moves.len())
            .finish()
    }
}

impl AdaptivePlayer {
    pub fn new(name: String, config: AdaptiveConfig, store: Arc<PolicyStore>) -> Self {
        let seed = config.seed.unwrap_or_else(random);
        Self {
            name,
            config,
            store,
            rng: StdRng::seed_from_u64(seed),
            mark: None,
            own_moves: Vec::new(),
            opponent_moves: Vec::new(),
        }
    }

    pub fn flags(&self) -> PolicyFlags {
        self.config.flags()
    }

    /// Mark played in the current game, if the agent has seen a move yet
    pub fn mark(&self) -> Option<Player> {
        self.mark
    }

    /// Pairs recorded for the agent's own moves this game
    pub fn own_history(&self) -> &[Experience] {
        &self.own_moves
    }

    /// Pairs recorded for the opponent's moves this game (mirrored only)
    pub fn opponent_history(&self) -> &[Experience] {
        &self.opponent_moves
    }

    /// Learned outcome probabilities for playing `mv` from `state`.
    ///
    /// Unseen pairs get the uniform prior.
    pub fn outcome_probabilities(&self, state: &BoardState, mv: Move) -> OutcomeProbabilities {
        self.store.outcome_probabilities(self.flags(), state, mv)
    }

    /// The distribution `select_move` samples from in `state`.
    ///
    /// Greedy agents with an immediate win available get a uniform
    /// distribution over the winning moves. Returns an empty vector for
    /// terminal positions.
    pub fn move_distribution(&self, state: &BoardState) -> Vec<(Move, f64)> {
        let candidates = state.enumerate();
        if candidates.is_empty() {
            return Vec::new();
        }

        if let Some(winning) = self.immediate_wins(&candidates, state.turn()) {
            let p = 1.0 / winning.len() as f64;
            return winning.into_iter().map(|mv| (mv, p)).collect();
        }

        let probabilities = self.selection_probabilities(state, &candidates);
        candidates.iter().map(|c| c.mv).zip(probabilities).collect()
    }

    /// Winning candidates for `mover` when greedy and any exist
    fn immediate_wins(&self, candidates: &[Candidate], mover: Player) -> Option<Vec<Move>> {
        if !self.config.greedy {
            return None;
        }
        let winning: Vec<Move> = candidates
            .iter()
            .filter(|c| c.state.winner() == Some(mover))
            .map(|c| c.mv)
            .collect();
        (!winning.is_empty()).then_some(winning)
    }

    /// Normalized selection weights, in candidate order.
    ///
    /// Each weight is `epsilon + P(win) + P(draw)`; the loss probability is
    /// left out so moves that tend to lose are chosen less often.
    fn selection_probabilities(&self, state: &BoardState, candidates: &[Candidate]) -> Vec<f64> {
        let outcomes = self.store.outcome_probabilities_for(
            self.flags(),
            state,
            candidates.iter().map(|c| c.mv),
        );
        let weights = outcomes.iter().map(|p| SELECTION_EPSILON + p.not_losing());

        normalize_weights(weights)
            .unwrap_or_else(|| vec![1.0 / candidates.len() as f64; candidates.len()])
    }

    fn choose(&mut self, state: &BoardState, candidates: &[Candidate]) -> Move {
        if let Some(winning) = self.immediate_wins(candidates, state.turn()) {
            let uniform = vec![1.0 / winning.len() as f64; winning.len()];
            let index = roulette_sample(&mut self.rng, &uniform).unwrap_or(0);
            return winning[index];
        }

        let probabilities = self.selection_probabilities(state, candidates);
        let index = roulette_sample(&mut self.rng, &probabilities).unwrap_or(candidates.len() - 1);
        candidates[index].mv
    }

    fn clear_history(&mut self) {
        self.own_moves.clear();
        self.opponent_moves.clear();
        self.mark = None;
    }
}

impl Agent for AdaptivePlayer {
    fn select_move(&mut self, state: &BoardState) -> Result<Move> {
        let candidates = state.enumerate();
        if candidates.is_empty() {
            return Err(Error::NoValidMoves);
        }

        self.mark = Some(state.turn());
        let mv = self.choose(state, &candidates);
        self.own_moves.push((*state, mv));
        Ok(mv)
    }

    fn notify_opponent_move(&mut self, state: &BoardState, mv: Move) {
        if self.mark.is_none() {
            self.mark = Some(state.turn().opponent());
        }
        if self.config.mirrored {
            self.opponent_moves.push((*state, mv));
        }
    }

    fn notify_game_ended(&mut self, final_state: &BoardState) {
        if !final_state.is_ended() {
            log::warn!(
                "{}: game reported as ended on a non-terminal position {}",
                self.name,
                final_state.encode()
            );
        }

        let Some(mark) = self.mark else {
            self.clear_history();
            return;
        };

        let outcome = Outcome::for_player(final_state.winner(), mark);
        let mut batches = vec![(self.own_moves.as_slice(), outcome)];
        if self.config.mirrored {
            batches.push((self.opponent_moves.as_slice(), outcome.invert()));
        }
        self.store.record_game(self.flags(), &batches);

        log::debug!(
            "{} [{}] learned {} own pairs as {} and {} opponent pairs as {}",
            self.name,
            self.flags(),
            self.own_moves.len(),
            outcome,
            self.opponent_moves.len(),
            outcome.invert()
        );

        self.clear_history();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
