//! Winning line analysis for Tic-Tac-Toe

use super::{BOARD_SIZE, Cell, Player};

/// Utility for scanning the rows, columns and diagonals of a board
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Find the player owning a complete line, if any.
    ///
    /// Rows and columns are checked together in one pass, then the main
    /// diagonal, then the anti-diagonal. Only one player can own a line in a
    /// reachable position, so the order only matters for determinism.
    pub fn winner(cells: &[[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Option<Player> {
        for i in 0..BOARD_SIZE {
            if let Some(player) = Self::line_owner((0..BOARD_SIZE).map(|j| cells[i][j])) {
                return Some(player);
            }
            if let Some(player) = Self::line_owner((0..BOARD_SIZE).map(|j| cells[j][i])) {
                return Some(player);
            }
        }

        if let Some(player) = Self::line_owner((0..BOARD_SIZE).map(|i| cells[i][i])) {
            return Some(player);
        }

        Self::line_owner((0..BOARD_SIZE).map(|i| cells[i][BOARD_SIZE - 1 - i]))
    }

    /// The player whose mark fills every cell of the line
    fn line_owner(mut line: impl Iterator<Item = Cell>) -> Option<Player> {
        let first = line.next()?.to_player()?;
        let target = first.to_cell();
        line.all(|cell| cell == target).then_some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: [&str; 3]) -> [[Cell; 3]; 3] {
        let mut cells = [[Cell::Empty; 3]; 3];
        for (i, row) in rows.iter().enumerate() {
            for (j, c) in row.chars().enumerate() {
                cells[i][j] = Cell::from_char(c).unwrap();
            }
        }
        cells
    }

    #[test]
    fn test_winner_horizontal() {
        let cells = grid(["XXX", "...", "..."]);
        assert_eq!(LineAnalyzer::winner(&cells), Some(Player::X));
    }

    #[test]
    fn test_winner_vertical() {
        let cells = grid([".O.", "XO.", "XO."]);
        assert_eq!(LineAnalyzer::winner(&cells), Some(Player::O));
    }

    #[test]
    fn test_winner_diagonals() {
        let main = grid(["X..", ".X.", "..X"]);
        assert_eq!(LineAnalyzer::winner(&main), Some(Player::X));

        let anti = grid(["..O", ".O.", "O.."]);
        assert_eq!(LineAnalyzer::winner(&anti), Some(Player::O));
    }

    #[test]
    fn test_no_winner_with_mixed_lines() {
        let cells = grid(["XOX", "XOO", "OXX"]);
        assert_eq!(LineAnalyzer::winner(&cells), None);
    }

    #[test]
    fn test_empty_line_is_not_a_win() {
        let cells = [[Cell::Empty; 3]; 3];
        assert_eq!(LineAnalyzer::winner(&cells), None);
    }
}
