//! Score consistency invariant: scores always equal box ownership counts.

use super::super::{GameState, Scores};
use super::Invariant;

/// Invariant: each player's score is the number of boxes they own.
pub struct ScoreConsistentInvariant;

impl Invariant<GameState> for ScoreConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        state.scores() == Scores::from_boxes(state.boxes())
    }

    fn description() -> &'static str {
        "Scores match the number of boxes each player owns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoxId, CompletedBox, Player};

    #[test]
    fn test_recorded_boxes_hold() {
        let mut state = GameState::default();
        state.start();
        state.record_boxes(&[CompletedBox::new(BoxId::new(0, 0), Player::Two)]);
        assert!(ScoreConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_unrecounted_box_violates() {
        let mut state = GameState::default();
        state.start();
        state
            .boxes_mut()
            .push(CompletedBox::new(BoxId::new(0, 0), Player::Two));
        assert!(!ScoreConsistentInvariant::holds(&state));
    }
}
