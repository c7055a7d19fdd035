//! Greedy heuristic opponent.
//!
//! One ply, no lookahead: take the first box on offer in scan order,
//! otherwise draw any open line at random. It never avoids handing the
//! other player a chain.

use super::geometry;
use super::rules;
use super::{GameState, LineId, Player};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Seat the heuristic plays in human-vs-heuristic mode.
pub const HEURISTIC_PLAYER: Player = Player::Two;

/// Undrawn slots in scan order (horizontal row-major, then vertical row-major).
pub fn legal_moves(state: &GameState) -> Vec<LineId> {
    geometry::line_slots(state.size())
        .filter(|line| !state.has_line(*line))
        .collect()
}

/// First undrawn slot in scan order that would close at least one box.
///
/// Each candidate is checked against the current lines plus the candidate.
#[instrument(skip(state), fields(lines = state.lines().len()))]
pub fn completing_move(state: &GameState) -> Option<LineId> {
    geometry::line_slots(state.size())
        .filter(|line| !state.has_line(*line))
        .find(|line| !rules::detect_completions(state, *line, HEURISTIC_PLAYER).is_empty())
}

/// Picks the heuristic's next line, or `None` when the grid is fully drawn.
#[instrument(skip(state, rng), fields(lines = state.lines().len()))]
pub fn choose_move<R>(state: &GameState, rng: &mut R) -> Option<LineId>
where
    R: Rng + ?Sized,
{
    if let Some(line) = completing_move(state) {
        debug!(line = %line, "Heuristic takes a box");
        return Some(line);
    }

    let moves = legal_moves(state);
    let choice = moves.choose(rng).copied();
    debug!(options = moves.len(), choice = ?choice, "Heuristic picks at random");
    choice
}

/// Heuristic player with its own name for logs.
#[derive(Debug, Clone)]
pub struct GreedyOpponent {
    name: String,
}

impl GreedyOpponent {
    /// Creates a named heuristic player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Picks a move; see [`choose_move`].
    #[instrument(skip(self, state, rng), fields(ai = %self.name))]
    pub fn select<R>(&self, state: &GameState, rng: &mut R) -> Option<LineId>
    where
        R: Rng + ?Sized,
    {
        choose_move(state, rng)
    }
}

impl Default for GreedyOpponent {
    fn default() -> Self {
        Self::new("Computer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridSize, Mode, engine};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn playing() -> GameState {
        let mut state = GameState::new(GridSize::new(5).unwrap(), Mode::HumanVsHeuristic);
        state.start();
        state
    }

    #[test]
    fn test_takes_available_box() {
        let mut state = playing();
        state.add_line(LineId::horizontal(2, 2), Player::One);
        state.add_line(LineId::horizontal(3, 2), Player::One);
        state.add_line(LineId::vertical(2, 2), Player::One);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_move(&state, &mut rng), Some(LineId::vertical(2, 3)));
    }

    #[test]
    fn test_first_completing_move_in_scan_order_wins() {
        let mut state = playing();
        // Box (3,3) is missing its top (a horizontal line).
        state.add_line(LineId::horizontal(4, 3), Player::One);
        state.add_line(LineId::vertical(3, 3), Player::One);
        state.add_line(LineId::vertical(3, 4), Player::One);
        // Box (0,0) is missing its right side (a vertical line).
        state.add_line(LineId::horizontal(0, 0), Player::One);
        state.add_line(LineId::horizontal(1, 0), Player::One);
        state.add_line(LineId::vertical(0, 0), Player::One);

        assert_eq!(completing_move(&state), Some(LineId::horizontal(3, 3)));
    }

    #[test]
    fn test_no_completing_move_on_empty_grid() {
        assert_eq!(completing_move(&playing()), None);
    }

    #[test]
    fn test_random_move_is_legal() {
        let mut state = playing();
        state.add_line(LineId::horizontal(0, 0), Player::One);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let line = choose_move(&state, &mut rng).unwrap();
            assert!(!state.has_line(line));
            assert!(geometry::is_valid_line(state.size(), line));
        }
    }

    #[test]
    fn test_none_when_fully_drawn() {
        let mut state = GameState::new(GridSize::new(3).unwrap(), Mode::HumanVsHuman);
        state.start();
        let mut rng = StdRng::seed_from_u64(3);
        while let Some(line) = choose_move(&state, &mut rng) {
            engine::apply_move(&mut state, line);
        }
        assert_eq!(state.remaining_lines(), 0);
        assert!(legal_moves(&state).is_empty());
    }

    #[test]
    fn test_legal_moves_scan_order() {
        let mut state = GameState::new(GridSize::new(2).unwrap(), Mode::HumanVsHuman);
        state.start();
        state.add_line(LineId::horizontal(1, 0), Player::One);
        assert_eq!(
            legal_moves(&state),
            vec![
                LineId::horizontal(0, 0),
                LineId::vertical(0, 0),
                LineId::vertical(0, 1),
            ]
        );
    }

    #[test]
    fn test_named_opponent_delegates() {
        let mut state = playing();
        state.add_line(LineId::horizontal(0, 0), Player::One);
        state.add_line(LineId::horizontal(1, 0), Player::One);
        state.add_line(LineId::vertical(0, 1), Player::One);
        let ai = GreedyOpponent::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(ai.name(), "Computer");
        assert_eq!(ai.select(&state, &mut rng), Some(LineId::vertical(0, 0)));
    }
}
