//! Box completion invariant: the box set is exactly the closed boxes.

use super::super::geometry;
use super::super::GameState;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: a box is recorded once if and only if all four sides are drawn.
///
/// Checked in both directions: every closed box on the grid is in the
/// box set, and every box in the set is on the grid and closed.
pub struct BoxCompletionInvariant;

impl Invariant<GameState> for BoxCompletionInvariant {
    fn holds(state: &GameState) -> bool {
        let closed = |id| {
            geometry::bounding_lines(id)
                .iter()
                .all(|line| state.has_line(*line))
        };

        let mut recorded = HashSet::with_capacity(state.boxes().len());
        let recorded_valid = state.boxes().iter().all(|b| {
            recorded.insert(b.id) && state.size().contains_box(b.id) && closed(b.id)
        });
        if !recorded_valid {
            return false;
        }

        geometry::box_slots(state.size())
            .filter(|id| closed(*id))
            .all(|id| recorded.contains(&id))
    }

    fn description() -> &'static str {
        "Boxes are recorded once, exactly when all four sides are drawn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoxId, CompletedBox, LineId, Player};

    #[test]
    fn test_empty_game_holds() {
        assert!(BoxCompletionInvariant::holds(&GameState::default()));
    }

    #[test]
    fn test_unrecorded_closed_box_violates() {
        let mut state = GameState::default();
        state.start();
        for line in geometry::bounding_lines(BoxId::new(2, 1)) {
            state.add_line(line, Player::One);
        }
        assert!(!BoxCompletionInvariant::holds(&state));

        state.record_boxes(&[CompletedBox::new(BoxId::new(2, 1), Player::One)]);
        assert!(BoxCompletionInvariant::holds(&state));
    }

    #[test]
    fn test_open_recorded_box_violates() {
        let mut state = GameState::default();
        state.start();
        state.add_line(LineId::horizontal(0, 0), Player::One);
        state.record_boxes(&[CompletedBox::new(BoxId::new(0, 0), Player::One)]);
        assert!(!BoxCompletionInvariant::holds(&state));
    }
}
