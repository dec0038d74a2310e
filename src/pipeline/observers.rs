//! Observer implementations for self-play sessions
//!
//! Observers allow composable data collection during a session without
//! coupling the game loop to specific output formats.

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Observer, Seat},
    tictactoe::{GameRecord, Move},
};

/// Progress bar observer - Shows session progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    a_wins: usize,
    b_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            a_wins: 0,
            b_wins: 0,
            draws: 0,
        }
    }

    fn tally(&self) -> String {
        format!("A:{} B:{} D:{}", self.a_wins, self.b_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_session_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord, x_seat: Seat) -> Result<()> {
        match Seat::winner_of(record, x_seat) {
            Some(Seat::A) => self.a_wins += 1,
            Some(Seat::B) => self.b_wins += 1,
            None => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts overall and over recent games
pub struct MetricsObserver {
    a_wins: usize,
    b_wins: usize,
    draws: usize,
    total_games: usize,
    total_moves: usize,
    window_size: usize,
    recent: VecDeque<Option<Seat>>,
    report_every: Option<usize>,
}

impl MetricsObserver {
    /// Observer keeping the last `window_size` outcomes (at least one)
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            a_wins: 0,
            b_wins: 0,
            draws: 0,
            total_games: 0,
            total_moves: 0,
            window_size,
            recent: VecDeque::with_capacity(window_size),
            report_every: None,
        }
    }

    /// Log the summary at `info` every `games` finished games
    pub fn with_report_every(mut self, games: usize) -> Self {
        self.report_every = (games > 0).then_some(games);
        self
    }

    fn rate(count: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }

    pub fn a_win_rate(&self) -> f64 {
        Self::rate(self.a_wins, self.total_games)
    }

    pub fn b_win_rate(&self) -> f64 {
        Self::rate(self.b_wins, self.total_games)
    }

    pub fn draw_rate(&self) -> f64 {
        Self::rate(self.draws, self.total_games)
    }

    /// Share of the recent window that ended with `winner`.
    /// `None` counts draws.
    pub fn recent_rate(&self, winner: Option<Seat>) -> f64 {
        let hits = self.recent.iter().filter(|w| **w == winner).count();
        Self::rate(hits, self.recent.len())
    }

    /// Mean number of moves per finished game
    pub fn avg_game_length(&self) -> f64 {
        Self::rate(self.total_moves, self.total_games)
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            a_wins: self.a_wins,
            b_wins: self.b_wins,
            draws: self.draws,
            a_win_rate: self.a_win_rate(),
            b_win_rate: self.b_win_rate(),
            draw_rate: self.draw_rate(),
            window: self.recent.len(),
            recent_a_win_rate: self.recent_rate(Some(Seat::A)),
            recent_b_win_rate: self.recent_rate(Some(Seat::B)),
            recent_draw_rate: self.recent_rate(None),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of session metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    pub a_win_rate: f64,
    pub b_win_rate: f64,
    pub draw_rate: f64,
    /// Number of games in the recent window
    pub window: usize,
    pub recent_a_win_rate: f64,
    pub recent_b_win_rate: f64,
    pub recent_draw_rate: f64,
    pub avg_game_length: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord, x_seat: Seat) -> Result<()> {
        let winner = Seat::winner_of(record, x_seat);
        self.total_games += 1;
        self.total_moves += record.moves.len();
        match winner {
            Some(Seat::A) => self.a_wins += 1,
            Some(Seat::B) => self.b_wins += 1,
            None => self.draws += 1,
        }

        if self.recent.len() == self.window_size {
            self.recent.pop_front();
        }
        self.recent.push_back(winner);

        if let Some(every) = self.report_every
            && self.total_games % every == 0
        {
            let summary = self.summary();
            log::info!(
                "after {} games, last {}: A {:.3} / B {:.3} / draw {:.3}",
                summary.total_games,
                summary.window,
                summary.recent_a_win_rate,
                summary.recent_b_win_rate,
                summary.recent_draw_rate
            );
        }
        Ok(())
    }
}

/// One finished game as written by [`JsonlObserver`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLine {
    pub game_num: usize,
    pub x_seat: Seat,
    pub moves: Vec<Move>,
    /// Winning seat, `None` for a draw
    pub winner: Option<Seat>,
    pub final_state: String,
}

/// JSONL observer - Writes one JSON object per finished game
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create game log {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_end(&mut self, game_num: usize, record: &GameRecord, x_seat: Seat) -> Result<()> {
        let line = GameLine {
            game_num,
            x_seat,
            moves: record.moves.clone(),
            winner: Seat::winner_of(record, x_seat),
            final_state: record.final_state.encode(),
        };

        serde_json::to_writer(&mut self.writer, &line)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
