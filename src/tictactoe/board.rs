//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    game::{Candidate, Move},
    lines::LineAnalyzer,
};

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player whose mark occupies this cell
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player (mark) in the game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Immutable game position: the grid plus the mark that moves next.
///
/// Winner, tie and end status are derived from the cells on demand and are
/// never stored. The type is `Copy`; applying a move returns a new value and
/// leaves the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    turn: Player,
}

impl BoardState {
    /// Empty board with X to move
    pub fn initial() -> Self {
        Self::from_cells([[Cell::Empty; BOARD_SIZE]; BOARD_SIZE], Player::X)
    }

    /// Build a position from an explicit grid and side to move.
    ///
    /// No reachability check is made; this is meant for analysis and tests.
    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE], turn: Player) -> Self {
        BoardState { cells, turn }
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 9 cell characters in row-major order
    /// (whitespace is ignored) and may end with `_X` or `_O` to set the
    /// player to move. Without a suffix the turn is inferred from the piece
    /// counts: X moves when counts are equal, O when X is one ahead.
    ///
    /// # Errors
    ///
    /// Returns error if the string does not hold exactly 9 cells, a character
    /// is not a valid cell, the suffix is not a player, or the counts rule out
    /// both players.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, suffix) = match cleaned.rsplit_once('_') {
            Some((board, player)) if board.chars().count() == CELL_COUNT => (board, Some(player)),
            _ => (cleaned.as_str(), None),
        };

        let chars: Vec<char> = board_part.chars().collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (i, &c) in chars.iter().enumerate() {
            cells[i / BOARD_SIZE][i % BOARD_SIZE] =
                Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: s.to_string(),
                })?;
        }

        let turn = match suffix {
            Some("X") | Some("x") => Player::X,
            Some("O") | Some("o") => Player::O,
            Some(other) => {
                return Err(crate::Error::InvalidPlayerString {
                    player: other.to_string(),
                    context: s.to_string(),
                });
            }
            None => Self::turn_from_counts(&cells, s)?,
        };

        Ok(BoardState { cells, turn })
    }

    fn turn_from_counts(
        cells: &[[Cell; BOARD_SIZE]; BOARD_SIZE],
        context: &str,
    ) -> Result<Player, crate::Error> {
        let count = |target: Cell| cells.iter().flatten().filter(|&&c| c == target).count();
        let (x, o) = (count(Cell::X), count(Cell::O));
        if x == o {
            Ok(Player::X)
        } else if x == o + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidConfiguration {
                message: format!("piece counts X={x}, O={o} do not fit X-first play in '{context}'"),
            })
        }
    }

    /// The 3x3 grid
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// The mark that moves next
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Get the cell at a move's coordinates
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.row()][mv.col()]
    }

    /// Check if the cell at a move's coordinates is empty
    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv) == Cell::Empty
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// All cells filled and nobody owns a line
    pub fn is_tied(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty) && self.winner().is_none()
    }

    /// Check if the game is over (win or tie)
    pub fn is_ended(&self) -> bool {
        self.winner().is_some() || self.is_tied()
    }

    /// Apply a move for the player to move and return the resulting position.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::GameEnded`] if this position is already terminal
    /// - [`crate::Error::PositionTaken`] if the target cell is occupied
    #[must_use = "apply_move returns a new board state; the original is unchanged"]
    pub fn apply_move(&self, mv: Move) -> Result<BoardState, crate::Error> {
        if self.is_ended() {
            return Err(crate::Error::GameEnded);
        }

        if !self.is_empty(mv) {
            return Err(crate::Error::PositionTaken {
                row: mv.row(),
                col: mv.col(),
            });
        }

        Ok(self.place(mv))
    }

    /// Place the mover's mark on a cell already known to be empty
    fn place(&self, mv: Move) -> BoardState {
        let mut next = *self;
        next.cells[mv.row()][mv.col()] = self.turn.to_cell();
        next.turn = self.turn.opponent();
        next
    }

    /// Every legal continuation, paired with the position it produces.
    ///
    /// A position with a winner yields nothing even when empty cells remain.
    /// Otherwise one candidate is produced per empty cell in row-major order.
    pub fn enumerate(&self) -> Vec<Candidate> {
        if self.winner().is_some() {
            return Vec::new();
        }

        Move::all()
            .filter(|&mv| self.is_empty(mv))
            .map(|mv| Candidate {
                mv,
                state: self.place(mv),
            })
            .collect()
    }

    /// Canonical string key: the nine cells row-major, then `_` and the turn
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells
                .iter()
                .flatten()
                .map(|&c| c.to_char())
                .collect::<String>(),
            self.turn.to_char()
        )
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
