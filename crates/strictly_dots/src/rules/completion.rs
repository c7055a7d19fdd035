//! Box completion detection.

use super::super::geometry::{self, GridSize};
use super::super::{CompletedBox, GameState, LineId, Player};
use tracing::{instrument, trace};

/// Boxes that `line` closes, owned by `mover`.
///
/// The check runs against the state's lines plus `line` itself, so it gives
/// the same answer whether `line` was just inserted (a real move) or is only
/// being considered (the heuristic's look-ahead). Yields 0, 1 or 2 boxes;
/// 2 only for an interior line that is the last side of both neighbours.
#[instrument(skip(state), fields(line = %line, mover = ?mover))]
pub fn detect_completions(state: &GameState, line: LineId, mover: Player) -> Vec<CompletedBox> {
    detect_completions_with(state.size(), |id| id == line || state.has_line(id), line, mover)
}

/// Completion check over an arbitrary membership test.
///
/// `has_line` must already answer true for `line`.
pub fn detect_completions_with<F>(
    size: GridSize,
    has_line: F,
    line: LineId,
    mover: Player,
) -> Vec<CompletedBox>
where
    F: Fn(LineId) -> bool,
{
    geometry::boxes_adjacent_to_line(size, line)
        .into_iter()
        .filter(|id| {
            let closed = geometry::bounding_lines(*id).iter().all(|side| has_line(*side));
            trace!(box_id = %id, closed, "Checked adjacent box");
            closed
        })
        .map(|id| CompletedBox::new(id, mover))
        .collect()
}
