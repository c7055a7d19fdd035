//! Pure dots-and-boxes game logic.
//!
//! This crate holds the rules engine and the built-in opponent. It has no
//! I/O and never schedules anything itself; a host drives it through
//! [`GameState`] and [`apply_move`].
//!
//! # Architecture
//!
//! - **Geometry**: valid line slots and the boxes each line borders
//! - **State**: lines, boxes, scores, turn and status
//! - **Rules**: box completion and end-of-game detection
//! - **Engine**: move validation and turn resolution
//! - **Opponent**: one-ply greedy heuristic with random fallback
//! - **Invariants**: properties checked after every applied move
//!
//! # Example
//!
//! ```
//! use strictly_dots::{GameState, GridSize, LineId, Mode, apply_move};
//!
//! let mut state = GameState::new(GridSize::new(5).unwrap(), Mode::HumanVsHuman);
//! state.start();
//! let outcome = apply_move(&mut state, LineId::horizontal(0, 0));
//! assert!(!outcome.is_ignored());
//! assert_eq!(state.lines().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod geometry;
pub mod invariants;
pub mod opponent;
pub mod rules;
mod state;
mod types;

pub use engine::{
    AppliedMove, IgnoredReason, MoveOutcome, OpponentTurn, apply_move, resolve_opponent_turn,
};
pub use geometry::{DEFAULT_GRID_SIZE, GridError, GridSize};
pub use opponent::{GreedyOpponent, HEURISTIC_PLAYER, choose_move};
pub use state::GameState;
pub use types::{
    BoxId, CompletedBox, GameStatus, Line, LineId, Mode, Orientation, Outcome, Player, Scores,
};
