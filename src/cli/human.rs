//! Terminal player
//!
//! [`HumanAgent`] implements [`Agent`] by prompting on a writer and reading
//! moves from a reader. Unparseable input and illegal moves are reported and
//! the prompt repeats; the board is never changed by a rejected move.

use std::io::{self, BufRead, Write};

use super::output::render_board;
use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{BoardState, Move, Outcome, Player},
};

/// Parse `"row col"`, `"row,col"` or a single cell index `0-8`
pub fn parse_move(input: &str) -> Result<Move> {
    let invalid = || Error::InvalidMoveInput {
        input: input.trim().to_string(),
    };

    let numbers = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<usize>().map_err(|_| invalid()))
        .collect::<Result<Vec<usize>>>()?;

    match numbers.as_slice() {
        [index] => Move::from_index(*index),
        [row, col] => Move::new(*row, *col),
        _ => Err(invalid()),
    }
}

/// A human player on a terminal-like reader/writer pair
pub struct HumanAgent<R, W> {
    name: String,
    input: R,
    output: W,
    mark: Option<Player>,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            mark: None,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|source| Error::Io {
            operation: "read move".to_string(),
            source,
        })?;
        if read == 0 {
            return Err(Error::Io {
                operation: "read move".to_string(),
                source: io::Error::from(io::ErrorKind::UnexpectedEof),
            });
        }
        Ok(line)
    }
}

impl<R: BufRead + Send, W: Write + Send> Agent for HumanAgent<R, W> {
    fn select_move(&mut self, state: &BoardState) -> Result<Move> {
        if state.is_ended() {
            return Err(Error::NoValidMoves);
        }
        self.mark = Some(state.turn());

        write!(self.output, "\n{}", render_board(state))?;
        loop {
            write!(
                self.output,
                "{} ({}) enter 'row col': ",
                self.name,
                state.turn()
            )?;
            self.output.flush()?;

            let line = self.read_line()?;
            let attempt = parse_move(&line).and_then(|mv| state.apply_move(mv).map(|_| mv));
            match attempt {
                Ok(mv) => return Ok(mv),
                Err(e) if e.is_illegal_move() => writeln!(self.output, "{e}, try again")?,
                Err(e) => return Err(e),
            }
        }
    }

    fn notify_opponent_move(&mut self, state: &BoardState, mv: Move) {
        if self.mark.is_none() {
            self.mark = Some(state.turn().opponent());
        }
        // Display failures must not abort the game
        let _ = writeln!(self.output, "\n{} played {mv}", state.turn());
    }

    fn notify_game_ended(&mut self, final_state: &BoardState) {
        let verdict = match self.mark {
            Some(mark) => match Outcome::for_player(final_state.winner(), mark) {
                Outcome::Win => "You win!",
                Outcome::Draw => "Draw.",
                Outcome::Lose => "You lose.",
            },
            None => "Game over.",
        };
        let _ = write!(self.output, "\n{}{verdict}\n", render_board(final_state));
        self.mark = None;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
