//! Observer port - abstraction for watching a self-play session
//!
//! Observers collect progress and metrics without coupling the session loop
//! to a particular output.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    tictactoe::{BoardState, GameRecord, Move, Player},
};

/// Which of the two seated agents an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// Seat that won `record` when `x_seat` held X; `None` for a draw
    pub fn winner_of(record: &GameRecord, x_seat: Seat) -> Option<Seat> {
        record.winner().map(|mark| match mark {
            Player::X => x_seat,
            Player::O => x_seat.other(),
        })
    }
}

/// Observer trait for monitoring sessions
///
/// # Event Sequence
///
/// 1. `on_session_start(total_games)` - once
/// 2. For each game:
///    - `on_game_start(game_num, x_seat)`
///    - `on_move(...)` - for each move
///    - `on_game_end(game_num, record, x_seat)`
/// 3. `on_session_end()` - once
///
/// Every method has a no-op default.
pub trait Observer: Send {
    fn on_session_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// `x_seat` is the seat playing X (and therefore moving first) this game.
    fn on_game_start(&mut self, _game_num: usize, _x_seat: Seat) -> Result<()> {
        Ok(())
    }

    /// Called after a move is selected, with the position it was played from.
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &BoardState,
        _mv: Move,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after both agents were notified of the result.
    fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord, _x_seat: Seat) -> Result<()> {
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_session_start(&mut self, total_games: usize) -> Result<()> {
        (**self).on_session_start(total_games)
    }

    fn on_game_start(&mut self, game_num: usize, x_seat: Seat) -> Result<()> {
        (**self).on_game_start(game_num, x_seat)
    }

    fn on_move(
        &mut self,
        game_num: usize,
        step_num: usize,
        state: &BoardState,
        mv: Move,
    ) -> Result<()> {
        (**self).on_move(game_num, step_num, state, mv)
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord, x_seat: Seat) -> Result<()> {
        (**self).on_game_end(game_num, record, x_seat)
    }

    fn on_session_end(&mut self) -> Result<()> {
        (**self).on_session_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(board: &str) -> GameRecord {
        GameRecord {
            moves: Vec::new(),
            final_state: BoardState::from_string(board).unwrap(),
        }
    }

    #[test]
    fn winner_follows_the_seat_holding_the_mark() {
        let x_wins = record("XXXOO....");
        assert_eq!(Seat::winner_of(&x_wins, Seat::A), Some(Seat::A));
        assert_eq!(Seat::winner_of(&x_wins, Seat::B), Some(Seat::B));

        let o_wins = record("XX.OOOX.X");
        assert_eq!(Seat::winner_of(&o_wins, Seat::A), Some(Seat::B));

        assert_eq!(Seat::winner_of(&record("XOXXOOOXX"), Seat::A), None);
    }
}
