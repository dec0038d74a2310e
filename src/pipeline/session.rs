//! Game loop and multi-game sessions

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Agent, Observer, Seat},
    tictactoe::{BoardState, GameRecord, Player},
};

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of games to play
    pub games: usize,

    /// Random seed; seat A gets `seed`, seat B `seed + 1`
    pub seed: Option<u64>,

    /// Swap which seat plays X after every game
    pub alternate_first: bool,

    /// Seat playing X in the first game
    pub first: Seat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            games: 500,
            seed: None,
            alternate_first: true,
            first: Seat::A,
        }
    }
}

impl SessionConfig {
    /// Seat holding X in the given game
    pub fn x_seat(&self, game_num: usize) -> Seat {
        if self.alternate_first && game_num % 2 == 1 {
            self.first.other()
        } else {
            self.first
        }
    }
}

/// Tally of a session from the seats' point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub total_games: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
}

impl SessionResult {
    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    pub fn a_win_rate(&self) -> f64 {
        self.rate(self.a_wins)
    }

    pub fn b_win_rate(&self) -> f64 {
        self.rate(self.b_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Count one finished game
    pub fn record(&mut self, winner: Option<Seat>) {
        self.total_games += 1;
        match winner {
            Some(Seat::A) => self.a_wins += 1,
            Some(Seat::B) => self.b_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Combine two tallies
    pub fn merge(&mut self, other: &SessionResult) {
        self.total_games += other.total_games;
        self.a_wins += other.a_wins;
        self.b_wins += other.b_wins;
        self.draws += other.draws;
    }
}

/// Plays a series of games between seat A and seat B
///
/// Observers may be borrowed (`Box::new(&mut metrics)`) so the caller can
/// read them back once the session is dropped.
pub struct Session<'a> {
    config: SessionConfig,
    observers: Vec<Box<dyn Observer + 'a>>,
}

impl<'a> Session<'a> {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'a>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play a single game with `x` moving first, reporting moves to the observers
    pub fn play_game(
        &mut self,
        game_num: usize,
        x: &mut dyn Agent,
        o: &mut dyn Agent,
    ) -> Result<GameRecord> {
        play_observed(game_num, x, o, &mut self.observers)
    }

    /// Play the configured number of games
    pub fn run(&mut self, a: &mut dyn Agent, b: &mut dyn Agent) -> Result<SessionResult> {
        if let Some(seed) = self.config.seed {
            a.set_rng_seed(seed);
            b.set_rng_seed(seed.wrapping_add(1));
        }

        log::info!(
            "session start: {} vs {} for {} games",
            a.name(),
            b.name(),
            self.config.games
        );
        for observer in &mut self.observers {
            observer.on_session_start(self.config.games)?;
        }

        let mut result = SessionResult::default();
        for game_num in 0..self.config.games {
            let x_seat = self.config.x_seat(game_num);
            for observer in &mut self.observers {
                observer.on_game_start(game_num, x_seat)?;
            }

            let record = match x_seat {
                Seat::A => self.play_game(game_num, a, b)?,
                Seat::B => self.play_game(game_num, b, a)?,
            };

            let winner = Seat::winner_of(&record, x_seat);
            result.record(winner);
            log::debug!(
                "game {game_num}: {} moves, winner {:?}",
                record.moves.len(),
                winner
            );

            for observer in &mut self.observers {
                observer.on_game_end(game_num, &record, x_seat)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_session_end()?;
        }
        log::info!(
            "session end: A {} / B {} / draws {}",
            result.a_wins,
            result.b_wins,
            result.draws
        );

        Ok(result)
    }
}

/// Play one game, `x` moving first. Both agents are told the result.
///
/// # Errors
///
/// Propagates agent failures and illegal moves returned by an agent.
pub fn play_game(x: &mut dyn Agent, o: &mut dyn Agent) -> Result<GameRecord> {
    play_observed(0, x, o, &mut [])
}

fn play_observed(
    game_num: usize,
    x: &mut dyn Agent,
    o: &mut dyn Agent,
    observers: &mut [Box<dyn Observer + '_>],
) -> Result<GameRecord> {
    let mut state = BoardState::initial();
    let mut moves = Vec::new();

    while !state.is_ended() {
        let (mover, waiting): (&mut dyn Agent, &mut dyn Agent) = match state.turn() {
            Player::X => (&mut *x, &mut *o),
            Player::O => (&mut *o, &mut *x),
        };

        let mv = mover.select_move(&state)?;
        let next = state.apply_move(mv)?;

        for observer in observers.iter_mut() {
            observer.on_move(game_num, moves.len(), &state, mv)?;
        }

        waiting.notify_opponent_move(&state, mv);
        moves.push(mv);
        state = next;
    }

    x.notify_game_ended(&state);
    o.notify_game_ended(&state);

    Ok(GameRecord {
        moves,
        final_state: state,
    })
}
