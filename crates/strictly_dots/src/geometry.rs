//! Grid geometry: which line slots exist and which boxes they border.
//!
//! Everything here is a pure function of the grid size. Out-of-range
//! inputs are never an error; they are simply not valid and border nothing.

use super::types::{BoxId, LineId, Orientation};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: usize = 5;

/// Number of dots per side of a square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GridSize(usize);

impl GridSize {
    /// Smallest grid that contains a box.
    pub const MIN: usize = 2;

    /// Creates a grid size of `dots` per side.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if `dots` is below [`GridSize::MIN`].
    #[track_caller]
    pub fn new(dots: usize) -> Result<Self, GridError> {
        if dots < Self::MIN {
            return Err(GridError::new(format!(
                "grid needs at least {} dots per side, got {}",
                Self::MIN,
                dots
            )));
        }
        Ok(Self(dots))
    }

    /// Dots per side.
    pub fn dots(self) -> usize {
        self.0
    }

    /// Boxes per side (N - 1).
    pub fn boxes_per_side(self) -> usize {
        self.0 - 1
    }

    /// Boxes on the whole grid, (N - 1)^2.
    pub fn total_boxes(self) -> usize {
        self.boxes_per_side() * self.boxes_per_side()
    }

    /// Line slots on the whole grid, 2 * N * (N - 1).
    pub fn total_lines(self) -> usize {
        2 * self.0 * self.boxes_per_side()
    }

    /// Checks that a box lies on the grid.
    pub fn contains_box(self, id: BoxId) -> bool {
        id.row < self.boxes_per_side() && id.col < self.boxes_per_side()
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID_SIZE)
    }
}

impl TryFrom<usize> for GridSize {
    type Error = GridError;

    #[track_caller]
    fn try_from(dots: usize) -> Result<Self, Self::Error> {
        Self::new(dots)
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// Invalid grid construction, with the location that attempted it.
#[derive(Debug, Clone, Display, Error)]
#[display("Grid error: {} at {}:{}", message, file, line)]
pub struct GridError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GridError {
    /// Creates a new grid error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Checks that a line slot exists on the grid.
///
/// Horizontal: row in `[0, N-1]`, col in `[0, N-2]`.
/// Vertical: row in `[0, N-2]`, col in `[0, N-1]`.
pub fn is_valid_line(size: GridSize, line: LineId) -> bool {
    let last = size.dots() - 1;
    match line.orientation {
        Orientation::Horizontal => line.row <= last && line.col < last,
        Orientation::Vertical => line.row < last && line.col <= last,
    }
}

/// Boxes bordered by a line: at most two, none for an invalid slot.
///
/// A horizontal line borders the box above (if `row > 0`) and below
/// (if `row < N-1`); a vertical line borders the box to the left
/// (if `col > 0`) and right (if `col < N-1`).
#[instrument(level = "trace")]
pub fn boxes_adjacent_to_line(size: GridSize, line: LineId) -> Vec<BoxId> {
    if !is_valid_line(size, line) {
        return Vec::new();
    }

    let last = size.dots() - 1;
    let mut boxes = Vec::with_capacity(2);
    match line.orientation {
        Orientation::Horizontal => {
            if line.row > 0 {
                boxes.push(BoxId::new(line.row - 1, line.col));
            }
            if line.row < last {
                boxes.push(BoxId::new(line.row, line.col));
            }
        }
        Orientation::Vertical => {
            if line.col > 0 {
                boxes.push(BoxId::new(line.row, line.col - 1));
            }
            if line.col < last {
                boxes.push(BoxId::new(line.row, line.col));
            }
        }
    }
    boxes
}

/// The four sides of a box: top, bottom, left, right.
pub fn bounding_lines(id: BoxId) -> [LineId; 4] {
    [
        LineId::horizontal(id.row, id.col),
        LineId::horizontal(id.row + 1, id.col),
        LineId::vertical(id.row, id.col),
        LineId::vertical(id.row, id.col + 1),
    ]
}

/// Every line slot in scan order: horizontal row-major, then vertical row-major.
pub fn line_slots(size: GridSize) -> impl Iterator<Item = LineId> {
    let n = size.dots();
    let horizontal =
        (0..n).flat_map(move |row| (0..n - 1).map(move |col| LineId::horizontal(row, col)));
    let vertical =
        (0..n - 1).flat_map(move |row| (0..n).map(move |col| LineId::vertical(row, col)));
    horizontal.chain(vertical)
}

/// Every box in row-major order.
pub fn box_slots(size: GridSize) -> impl Iterator<Item = BoxId> {
    let m = size.boxes_per_side();
    (0..m).flat_map(move |row| (0..m).map(move |col| BoxId::new(row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> GridSize {
        GridSize::new(5).unwrap()
    }

    #[test]
    fn test_grid_size_rejects_degenerate() {
        assert!(GridSize::new(0).is_err());
        assert!(GridSize::new(1).is_err());
        let err = GridSize::new(1).unwrap_err();
        assert!(err.message.contains("at least 2"));
        assert!(err.file.ends_with("geometry.rs"));
    }

    #[test]
    fn test_counts_for_five_dots() {
        let size = five();
        assert_eq!(size.total_boxes(), 16);
        assert_eq!(size.total_lines(), 40);
        assert_eq!(line_slots(size).count(), 40);
        assert_eq!(box_slots(size).count(), 16);
    }

    #[test]
    fn test_line_bounds() {
        let size = five();
        assert!(is_valid_line(size, LineId::horizontal(4, 3)));
        assert!(!is_valid_line(size, LineId::horizontal(4, 4)));
        assert!(!is_valid_line(size, LineId::horizontal(5, 0)));
        assert!(is_valid_line(size, LineId::vertical(3, 4)));
        assert!(!is_valid_line(size, LineId::vertical(4, 0)));
        assert!(!is_valid_line(size, LineId::vertical(0, 5)));
    }

    #[test]
    fn test_edge_lines_border_one_box() {
        let size = five();
        assert_eq!(
            boxes_adjacent_to_line(size, LineId::horizontal(0, 2)),
            vec![BoxId::new(0, 2)]
        );
        assert_eq!(
            boxes_adjacent_to_line(size, LineId::horizontal(4, 2)),
            vec![BoxId::new(3, 2)]
        );
        assert_eq!(
            boxes_adjacent_to_line(size, LineId::vertical(1, 0)),
            vec![BoxId::new(1, 0)]
        );
        assert_eq!(
            boxes_adjacent_to_line(size, LineId::vertical(1, 4)),
            vec![BoxId::new(1, 3)]
        );
    }

    #[test]
    fn test_interior_lines_border_two_boxes() {
        let size = five();
        assert_eq!(
            boxes_adjacent_to_line(size, LineId::horizontal(2, 1)),
            vec![BoxId::new(1, 1), BoxId::new(2, 1)]
        );
        assert_eq!(
            boxes_adjacent_to_line(size, LineId::vertical(2, 1)),
            vec![BoxId::new(2, 0), BoxId::new(2, 1)]
        );
    }

    #[test]
    fn test_invalid_line_borders_nothing() {
        assert!(boxes_adjacent_to_line(five(), LineId::horizontal(0, 9)).is_empty());
        assert!(boxes_adjacent_to_line(five(), LineId::vertical(4, 0)).is_empty());
    }

    #[test]
    fn test_every_bounding_line_is_adjacent_back() {
        let size = five();
        for id in box_slots(size) {
            for line in bounding_lines(id) {
                assert!(is_valid_line(size, line));
                assert!(boxes_adjacent_to_line(size, line).contains(&id));
            }
        }
    }

    #[test]
    fn test_scan_order_is_horizontal_first() {
        let slots: Vec<_> = line_slots(GridSize::new(2).unwrap()).collect();
        assert_eq!(
            slots,
            vec![
                LineId::horizontal(0, 0),
                LineId::horizontal(1, 0),
                LineId::vertical(0, 0),
                LineId::vertical(0, 1),
            ]
        );
    }

    #[test]
    fn test_grid_size_deserializes_with_validation() {
        let size: GridSize = serde_json::from_str("4").unwrap();
        assert_eq!(size.dots(), 4);
        assert!(serde_json::from_str::<GridSize>("1").is_err());
    }
}
