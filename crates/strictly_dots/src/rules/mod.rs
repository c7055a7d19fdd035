//! Game rules for dots and boxes.
//!
//! Pure functions over a [`GameState`](super::GameState). Rules are kept
//! apart from state storage so the move engine and the heuristic share
//! exactly the same completion check.

pub mod completion;
pub mod terminal;

pub use completion::{detect_completions, detect_completions_with};
pub use terminal::{is_grid_full, outcome};
