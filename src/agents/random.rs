//! Baseline agents that ignore history

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{BoardState, Candidate, Move},
};

fn pick_uniform(rng: &mut StdRng, candidates: &[Candidate]) -> Result<Move> {
    if candidates.is_empty() {
        return Err(Error::NoValidMoves);
    }
    let index = rng.random_range(0..candidates.len());
    Ok(candidates[index].mv)
}

/// Plays a uniformly random legal move
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &BoardState) -> Result<Move> {
        pick_uniform(&mut self.rng, &state.enumerate())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Plays a random immediate win when one exists, otherwise a random move
pub struct GreedyRandomAgent {
    name: String,
    rng: StdRng,
}

impl GreedyRandomAgent {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for GreedyRandomAgent {
    fn select_move(&mut self, state: &BoardState) -> Result<Move> {
        let candidates = state.enumerate();
        let winning: Vec<Candidate> = candidates
            .iter()
            .filter(|c| c.state.winner().is_some())
            .copied()
            .collect();

        if winning.is_empty() {
            pick_uniform(&mut self.rng, &candidates)
        } else {
            pick_uniform(&mut self.rng, &winning)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_agent_plays_legal_moves() {
        let mut agent = RandomAgent::with_seed("random".to_string(), 7);
        let mut state = BoardState::initial();
        while !state.is_ended() {
            let mv = agent.select_move(&state).unwrap();
            assert!(state.is_empty(mv));
            state = state.apply_move(mv).unwrap();
        }
    }

    #[test]
    fn random_agent_errors_on_terminal_state() {
        let mut agent = RandomAgent::with_seed("random".to_string(), 7);
        let state = BoardState::from_string("XXXOO....").unwrap();
        assert!(matches!(agent.select_move(&state), Err(Error::NoValidMoves)));
    }

    #[test]
    fn greedy_random_takes_the_win() {
        // X to move, (0,2) completes the top row.
        let state = BoardState::from_string("XX.OO....").unwrap();
        for seed in 0..20 {
            let mut agent = GreedyRandomAgent::with_seed("greedy".to_string(), seed);
            assert_eq!(agent.select_move(&state).unwrap(), Move::new(0, 2).unwrap());
        }
    }
}
