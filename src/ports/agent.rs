//! Agent port - the capability set every move-selection strategy provides

use crate::{
    Result,
    tictactoe::{BoardState, Move},
};

/// Agent trait - unified interface for human proxies, baselines and learners
///
/// Only [`Agent::select_move`] is required. The notification hooks default to
/// no-ops, so a harness calls them unconditionally and strategies that do not
/// care about the opponent or the result simply leave them out.
///
/// # Call sequence per game
///
/// 1. `select_move` whenever it is this agent's turn
/// 2. `notify_opponent_move` after every move made by the other side
/// 3. `notify_game_ended` once with the terminal position
///
/// # Examples
///
/// ```
/// use ttt_learner::{
///     Result,
///     ports::Agent,
///     tictactoe::{BoardState, Move},
/// };
///
/// struct FirstFree;
///
/// impl Agent for FirstFree {
///     fn select_move(&mut self, state: &BoardState) -> Result<Move> {
///         state
///             .enumerate()
///             .first()
///             .map(|candidate| candidate.mv)
///             .ok_or(ttt_learner::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
///
/// let mut agent = FirstFree;
/// let mv = agent.select_move(&BoardState::initial()).unwrap();
/// assert_eq!((mv.row(), mv.col()), (0, 0));
/// ```
pub trait Agent: Send {
    /// Choose a move for the side to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] when `state` is terminal, or an
    /// I/O error for agents that wait on external input.
    fn select_move(&mut self, state: &BoardState) -> Result<Move>;

    /// Observe a move made by the opponent from `state`.
    fn notify_opponent_move(&mut self, _state: &BoardState, _mv: Move) {}

    /// Observe the terminal position of the finished game.
    fn notify_game_ended(&mut self, _final_state: &BoardState) {}

    /// Get the agent's name.
    ///
    /// Used for identification in session summaries and logging.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Sessions call this when configured with a deterministic seed.
    /// Stateless agents can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
