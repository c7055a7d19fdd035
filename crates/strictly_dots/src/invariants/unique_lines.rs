//! Unique lines invariant: each slot is drawn at most once.

use super::super::GameState;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: no two drawn lines share a (row, col, orientation).
///
/// Every drawn line is also visible through `has_line`.
pub struct UniqueLinesInvariant;

impl Invariant<GameState> for UniqueLinesInvariant {
    fn holds(state: &GameState) -> bool {
        let mut seen = HashSet::with_capacity(state.lines().len());
        state
            .lines()
            .iter()
            .all(|line| seen.insert(line.id) && state.has_line(line.id))
    }

    fn description() -> &'static str {
        "Each line slot is drawn at most once"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Line, LineId, Player, engine};

    #[test]
    fn test_empty_game_holds() {
        assert!(UniqueLinesInvariant::holds(&GameState::default()));
    }

    #[test]
    fn test_repeated_moves_hold() {
        let mut state = GameState::default();
        state.start();
        for _ in 0..3 {
            engine::apply_move(&mut state, LineId::horizontal(2, 2));
        }
        assert!(UniqueLinesInvariant::holds(&state));
        assert_eq!(state.lines().len(), 1);
    }

    #[test]
    fn test_duplicate_entry_violates() {
        let mut state = GameState::default();
        state.start();
        state.add_line(LineId::vertical(1, 1), Player::One);
        state
            .lines_mut()
            .push(Line::new(LineId::vertical(1, 1), Player::Two));
        assert!(!UniqueLinesInvariant::holds(&state));
    }
}
