//! Core domain types for dots and boxes.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// Player 1 (always moves first).
    One,
    /// Player 2 (the heuristic's seat in single-player mode).
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the player number (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Display name under the given mode ("Computer" for the heuristic seat).
    pub fn label(self, mode: Mode) -> &'static str {
        match (self, mode) {
            (Player::One, _) => "Player 1",
            (Player::Two, Mode::HumanVsHuman) => "Player 2",
            (Player::Two, Mode::HumanVsHeuristic) => "Computer",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Orientation of a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    /// Connects (row, col) to (row, col + 1).
    Horizontal,
    /// Connects (row, col) to (row + 1, col).
    Vertical,
}

impl Orientation {
    /// Short tag used in logs and move notation.
    pub fn tag(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }
}

/// Identity of a line slot: the dot it starts at plus its orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId {
    /// Row of the starting dot.
    pub row: usize,
    /// Column of the starting dot.
    pub col: usize,
    /// Direction from the starting dot.
    pub orientation: Orientation,
}

impl LineId {
    /// Creates a line identity.
    pub fn new(row: usize, col: usize, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            orientation,
        }
    }

    /// Horizontal line starting at (row, col).
    pub fn horizontal(row: usize, col: usize) -> Self {
        Self::new(row, col, Orientation::Horizontal)
    }

    /// Vertical line starting at (row, col).
    pub fn vertical(row: usize, col: usize) -> Self {
        Self::new(row, col, Orientation::Vertical)
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.row, self.col, self.orientation.tag())
    }
}

/// A drawn line and who drew it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// Which slot was drawn.
    pub id: LineId,
    /// Player who drew it.
    pub drawn_by: Player,
}

impl Line {
    /// Creates a drawn line.
    pub fn new(id: LineId, drawn_by: Player) -> Self {
        Self { id, drawn_by }
    }
}

/// Identity of a unit box by its top-left dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId {
    /// Row of the top-left dot.
    pub row: usize,
    /// Column of the top-left dot.
    pub col: usize,
}

impl BoxId {
    /// Creates a box identity.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for BoxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// A box with all four sides drawn, owned by the player who closed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedBox {
    /// Which box.
    pub id: BoxId,
    /// Player whose move drew the fourth side.
    pub owner: Player,
}

impl CompletedBox {
    /// Creates a completed box.
    pub fn new(id: BoxId, owner: Player) -> Self {
        Self { id, owner }
    }
}

/// Box counts per player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Boxes owned by player 1.
    pub player1: usize,
    /// Boxes owned by player 2.
    pub player2: usize,
}

impl Scores {
    /// Counts owners over a box set.
    pub fn from_boxes(boxes: &[CompletedBox]) -> Self {
        boxes.iter().fold(Self::default(), |mut scores, b| {
            match b.owner {
                Player::One => scores.player1 += 1,
                Player::Two => scores.player2 += 1,
            }
            scores
        })
    }

    /// Score of a single player.
    pub fn of(&self, player: Player) -> usize {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Total boxes claimed.
    pub fn total(&self) -> usize {
        self.player1 + self.player2
    }
}

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No grid yet; waiting for start.
    #[default]
    NotStarted,
    /// Accepting moves.
    Playing,
    /// Every box is claimed.
    Finished,
}

/// Who sits in the player 2 seat.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    /// Two humans share the grid.
    HumanVsHuman,
    /// Player 2 is the greedy heuristic.
    #[default]
    HumanVsHeuristic,
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One player owns more boxes.
    Winner(Player),
    /// Both players own the same number of boxes.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Tie => None,
        }
    }

    /// Returns true if the game was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }

    /// Announcement text under the given mode.
    pub fn announcement(&self, mode: Mode) -> String {
        match self {
            Outcome::Winner(player) => format!("{} wins!", player.label(mode)),
            Outcome::Tie => "It's a tie!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_count_owners() {
        let boxes = [
            CompletedBox::new(BoxId::new(0, 0), Player::One),
            CompletedBox::new(BoxId::new(0, 1), Player::Two),
            CompletedBox::new(BoxId::new(1, 1), Player::One),
        ];
        let scores = Scores::from_boxes(&boxes);
        assert_eq!(scores, Scores { player1: 2, player2: 1 });
        assert_eq!(scores.of(Player::Two), 1);
        assert_eq!(scores.total(), 3);
    }

    #[test]
    fn test_player_labels_follow_mode() {
        assert_eq!(Player::Two.label(Mode::HumanVsHeuristic), "Computer");
        assert_eq!(Player::Two.label(Mode::HumanVsHuman), "Player 2");
        assert_eq!(
            Outcome::Winner(Player::Two).announcement(Mode::HumanVsHeuristic),
            "Computer wins!"
        );
        assert_eq!(Outcome::Tie.announcement(Mode::HumanVsHuman), "It's a tie!");
    }

    #[test]
    fn test_mode_parses_snake_case() {
        let mode: Mode = "human_vs_human".parse().unwrap();
        assert_eq!(mode, Mode::HumanVsHuman);
        assert_eq!(Mode::HumanVsHeuristic.to_string(), "human_vs_heuristic");
    }

    #[test]
    fn test_line_display() {
        assert_eq!(LineId::vertical(2, 3).to_string(), "(2,3,V)");
    }
}
