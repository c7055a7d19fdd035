//! Game session: one game state plus the opponent's RNG and timing.

use crate::config::{ConfigError, DotsConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use strictly_dots::{
    GameState, GreedyOpponent, LineId, Mode, MoveOutcome, OpponentTurn, apply_move,
    resolve_opponent_turn,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Session shared between the caller and scheduled opponent tasks.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// A single dots-and-boxes session.
///
/// Commands pass straight through to the core. The session adds the RNG
/// the heuristic draws from and the presentation delay before it moves.
#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    opponent: GreedyOpponent,
    rng: StdRng,
    opponent_delay: Duration,
}

impl GameSession {
    /// Creates a not-started session from configuration.
    #[instrument(skip(config), fields(grid_size = config.grid_size(), mode = %config.mode()))]
    pub fn new(config: &DotsConfig) -> Result<Self, ConfigError> {
        let size = config.grid()?;
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        info!(%size, "Creating game session");
        Ok(Self {
            state: GameState::new(size, *config.mode()),
            opponent: GreedyOpponent::default(),
            rng,
            opponent_delay: config.opponent_delay(),
        })
    }

    /// Wraps the session for sharing with scheduled tasks.
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Pause before the heuristic moves.
    pub fn opponent_delay(&self) -> Duration {
        self.opponent_delay
    }

    /// Selects the mode; only before start.
    pub fn configure_mode(&mut self, mode: Mode) -> bool {
        self.state.configure_mode(mode)
    }

    /// Starts a fresh game.
    pub fn start(&mut self) {
        self.state.start();
    }

    /// Returns to not-started.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Applies a move for whoever is to move.
    #[instrument(skip(self), fields(line = %line))]
    pub fn apply_move(&mut self, line: LineId) -> MoveOutcome {
        apply_move(&mut self.state, line)
    }

    /// Plays the heuristic's move now, if the ticket is still current.
    #[instrument(skip(self), fields(ai = %self.opponent.name(), ticket = turn.version()))]
    pub fn play_opponent_turn(&mut self, turn: OpponentTurn) -> Option<MoveOutcome> {
        let outcome = resolve_opponent_turn(&mut self.state, turn, &mut self.rng);
        if outcome.is_none() {
            debug!("Opponent turn discarded");
        }
        outcome
    }

    /// Picks a line for the current player with the heuristic.
    ///
    /// Lets a host stand the heuristic in for player 1 during self-play.
    pub fn suggest_move(&mut self) -> Option<LineId> {
        self.opponent.select(&self.state, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_dots::{GameStatus, Player};

    fn session(mode: Mode) -> GameSession {
        GameSession::new(&DotsConfig::new(mode).with_seed(5)).unwrap()
    }

    #[test]
    fn test_new_session_not_started() {
        let session = session(Mode::HumanVsHeuristic);
        assert_eq!(session.state().status(), GameStatus::NotStarted);
        assert_eq!(session.opponent_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_bad_grid_size_is_config_error() {
        let config = DotsConfig::default().with_grid_size(0);
        assert!(GameSession::new(&config).is_err());
    }

    #[test]
    fn test_opponent_turn_after_human_move() {
        let mut session = session(Mode::HumanVsHeuristic);
        session.start();
        let turn = session
            .apply_move(LineId::horizontal(0, 0))
            .opponent_turn()
            .unwrap();
        let outcome = session.play_opponent_turn(turn).unwrap();
        assert_eq!(outcome.applied().unwrap().line().drawn_by, Player::Two);
    }

    #[test]
    fn test_reset_discards_pending_turn() {
        let mut session = session(Mode::HumanVsHeuristic);
        session.start();
        let turn = session
            .apply_move(LineId::horizontal(0, 0))
            .opponent_turn()
            .unwrap();
        session.reset();
        session.start();
        assert!(session.play_opponent_turn(turn).is_none());
        assert!(session.state().lines().is_empty());
    }

    #[test]
    fn test_mode_locked_after_start() {
        let mut session = session(Mode::HumanVsHeuristic);
        assert!(session.configure_mode(Mode::HumanVsHuman));
        session.start();
        assert!(!session.configure_mode(Mode::HumanVsHeuristic));
    }
}
