//! Terminal status invariant: finished exactly when the grid is full.

use super::super::{GameState, GameStatus};
use super::Invariant;

/// Invariant: a started game is finished if and only if every box is claimed.
pub struct TerminalStatusInvariant;

impl Invariant<GameState> for TerminalStatusInvariant {
    fn holds(state: &GameState) -> bool {
        match state.status() {
            GameStatus::NotStarted => state.lines().is_empty() && state.boxes().is_empty(),
            GameStatus::Playing => !state.is_grid_full(),
            GameStatus::Finished => state.is_grid_full(),
        }
    }

    fn description() -> &'static str {
        "Game is finished exactly when all boxes are claimed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridSize, LineId, Mode, engine, geometry};

    #[test]
    fn test_fresh_states_hold() {
        let mut state = GameState::default();
        assert!(TerminalStatusInvariant::holds(&state));
        state.start();
        assert!(TerminalStatusInvariant::holds(&state));
    }

    #[test]
    fn test_played_out_game_holds() {
        let mut state = GameState::new(GridSize::new(3).unwrap(), Mode::HumanVsHuman);
        state.start();
        for line in geometry::line_slots(state.size()).collect::<Vec<LineId>>() {
            engine::apply_move(&mut state, line);
            assert!(TerminalStatusInvariant::holds(&state));
        }
        assert_eq!(state.status(), GameStatus::Finished);
    }

    #[test]
    fn test_premature_finish_violates() {
        let mut state = GameState::default();
        state.start();
        state.set_status(GameStatus::Finished);
        assert!(!TerminalStatusInvariant::holds(&state));
    }
}
