//! End-of-game detection for dots and boxes.

use super::super::{GameState, Outcome, Player, Scores};
use std::cmp::Ordering;

/// Checks if every box on the grid is claimed.
pub fn is_grid_full(state: &GameState) -> bool {
    state.boxes().len() == state.size().total_boxes()
}

/// Winner by box count, or a tie.
pub fn outcome(scores: &Scores) -> Outcome {
    match scores.player1.cmp(&scores.player2) {
        Ordering::Greater => Outcome::Winner(Player::One),
        Ordering::Less => Outcome::Winner(Player::Two),
        Ordering::Equal => Outcome::Tie,
    }
}
