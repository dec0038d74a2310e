//! Moves, candidates and game outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BOARD_SIZE, BoardState, CELL_COUNT, Player};

/// A move: 0-indexed row and column, always on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub struct Move {
    row: usize,
    col: usize,
}

/// Unchecked wire form of [`Move`]
#[derive(Deserialize)]
struct RawMove {
    row: usize,
    col: usize,
}

impl TryFrom<RawMove> for Move {
    type Error = crate::Error;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        Move::new(raw.row, raw.col)
    }
}

impl Move {
    /// Create a move, validating both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if either coordinate is >= 3.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Move { row, col })
        } else {
            Err(crate::Error::InvalidPosition { row, col })
        }
    }

    /// Create a move from a row-major cell index (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCellIndex`] if the index is >= 9.
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        if index < CELL_COUNT {
            Ok(Move {
                row: index / BOARD_SIZE,
                col: index % BOARD_SIZE,
            })
        } else {
            Err(crate::Error::InvalidCellIndex { index })
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row-major cell index (0-8)
    pub fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Every cell of the board in row-major order
    pub fn all() -> impl Iterator<Item = Move> {
        (0..CELL_COUNT).map(|i| Move {
            row: i / BOARD_SIZE,
            col: i % BOARD_SIZE,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// A legal move paired with the position it leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub mv: Move,
    pub state: BoardState,
}

/// A game result seen from one player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Lose,
}

impl Outcome {
    /// Outcome for `player` given the winner of a finished game
    pub fn for_player(winner: Option<Player>, player: Player) -> Self {
        match winner {
            Some(w) if w == player => Outcome::Win,
            Some(_) => Outcome::Lose,
            None => Outcome::Draw,
        }
    }

    /// The same result from the other side of the board
    pub fn invert(self) -> Self {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Win => "win",
            Outcome::Draw => "draw",
            Outcome::Lose => "lose",
        };
        f.write_str(label)
    }
}

/// A finished game: the moves in order and the final position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub final_state: BoardState,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        self.final_state.winner()
    }

    /// Replay the moves from the empty board.
    ///
    /// # Errors
    ///
    /// Returns the first move-application error if the history is corrupt.
    pub fn state_sequence(&self) -> Result<Vec<BoardState>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut state = BoardState::initial();
        states.push(state);
        for &mv in &self.moves {
            state = state.apply_move(mv)?;
            states.push(state);
        }
        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_index_roundtrip() {
        for index in 0..CELL_COUNT {
            assert_eq!(Move::from_index(index).unwrap().index(), index);
        }
        assert!(Move::new(0, 3).is_err());
    }

    #[test]
    fn out_of_range_index_reports_the_index() {
        let err = Move::from_index(100).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidCellIndex { index: 100 }));
        assert!(err.to_string().contains("100"));
        assert!(matches!(
            Move::from_index(9),
            Err(crate::Error::InvalidCellIndex { index: 9 })
        ));
    }

    #[test]
    fn deserialize_rejects_off_board_moves() {
        let mv: Move = serde_json::from_str(r#"{"row":2,"col":1}"#).unwrap();
        assert_eq!((mv.row(), mv.col()), (2, 1));
        assert!(serde_json::from_str::<Move>(r#"{"row":3,"col":0}"#).is_err());
    }

    #[test]
    fn move_display_is_row_comma_col() {
        assert_eq!(Move::new(2, 1).unwrap().to_string(), "2,1");
    }

    #[test]
    fn outcome_for_player() {
        assert_eq!(Outcome::for_player(Some(Player::X), Player::X), Outcome::Win);
        assert_eq!(Outcome::for_player(Some(Player::X), Player::O), Outcome::Lose);
        assert_eq!(Outcome::for_player(None, Player::O), Outcome::Draw);
    }

    #[test]
    fn invert_swaps_win_and_lose() {
        assert_eq!(Outcome::Win.invert(), Outcome::Lose);
        assert_eq!(Outcome::Lose.invert(), Outcome::Win);
        assert_eq!(Outcome::Draw.invert(), Outcome::Draw);
    }

    #[test]
    fn record_replays_states() {
        let moves = vec![Move::new(0, 0).unwrap(), Move::new(1, 1).unwrap()];
        let final_state = BoardState::from_string("X...O....").unwrap();
        let record = GameRecord { moves, final_state };
        let states = record.state_sequence().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[2], final_state);
        assert_eq!(record.winner(), None);
    }
}
