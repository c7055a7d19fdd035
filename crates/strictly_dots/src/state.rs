//! Authoritative mutable game state.

use super::geometry::{self, GridError, GridSize};
use super::rules;
use super::types::{BoxId, CompletedBox, GameStatus, Line, LineId, Mode, Outcome, Player, Scores};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Complete state of one dots-and-boxes game.
///
/// Lines are kept in draw order for rendering, with a hash index beside
/// them for membership. Scores are never mutated directly; they are
/// recounted from `boxes` whenever the box set changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateSnapshot")]
pub struct GameState {
    size: GridSize,
    mode: Mode,
    status: GameStatus,
    current_player: Player,
    lines: Vec<Line>,
    #[serde(skip)]
    index: HashSet<LineId>,
    boxes: Vec<CompletedBox>,
    scores: Scores,
    version: u64,
}

impl GameState {
    /// Creates a not-started game on a grid of the given size.
    #[instrument]
    pub fn new(size: GridSize, mode: Mode) -> Self {
        Self {
            size,
            mode,
            status: GameStatus::NotStarted,
            current_player: Player::One,
            lines: Vec::new(),
            index: HashSet::new(),
            boxes: Vec::new(),
            scores: Scores::default(),
            version: 0,
        }
    }

    /// Grid size.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Session mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Drawn lines in draw order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Completed boxes in completion order.
    pub fn boxes(&self) -> &[CompletedBox] {
        &self.boxes
    }

    /// Box counts per player.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Bumped by every start, reset and applied move.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Checks if a line slot has been drawn.
    pub fn has_line(&self, line: LineId) -> bool {
        self.index.contains(&line)
    }

    /// Who drew a line, if anyone.
    pub fn drawn_by(&self, line: LineId) -> Option<Player> {
        if !self.has_line(line) {
            return None;
        }
        self.lines.iter().find(|l| l.id == line).map(|l| l.drawn_by)
    }

    /// Owner of a completed box, if completed.
    pub fn owner_of(&self, id: BoxId) -> Option<Player> {
        self.boxes.iter().find(|b| b.id == id).map(|b| b.owner)
    }

    /// Number of undrawn slots.
    pub fn remaining_lines(&self) -> usize {
        self.size.total_lines().saturating_sub(self.lines.len())
    }

    /// True when every box is claimed.
    pub fn is_grid_full(&self) -> bool {
        rules::is_grid_full(self)
    }

    /// Winner or tie, only once the game is finished.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.status != GameStatus::Finished {
            return None;
        }
        Some(rules::outcome(&self.scores))
    }

    /// Draws a line for `player`. No-op if the slot is off the grid or
    /// already drawn.
    ///
    /// Returns true if the line was inserted.
    #[instrument(skip(self), fields(line = %line, player = ?player))]
    pub fn add_line(&mut self, line: LineId, player: Player) -> bool {
        if !geometry::is_valid_line(self.size, line) {
            debug!("Line is off the grid");
            return false;
        }
        if !self.index.insert(line) {
            debug!("Line already drawn");
            return false;
        }
        self.lines.push(Line::new(line, player));
        true
    }

    /// Appends newly completed boxes and recounts scores.
    ///
    /// A box already present keeps its original owner.
    #[instrument(skip(self, completed), fields(count = completed.len()))]
    pub fn record_boxes(&mut self, completed: &[CompletedBox]) {
        for b in completed {
            if self.owner_of(b.id).is_some() {
                warn!(box_id = %b.id, "Box already recorded, keeping original owner");
                continue;
            }
            self.boxes.push(*b);
        }
        self.recompute_scores();
    }

    /// Selects the mode. Accepted only before start.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn configure_mode(&mut self, mode: Mode) -> bool {
        if self.status != GameStatus::NotStarted {
            warn!("Mode can only change before the game starts");
            return false;
        }
        self.mode = mode;
        true
    }

    /// Clears the grid and begins play with player 1.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        self.clear();
        self.status = GameStatus::Playing;
        info!(size = %self.size, mode = %self.mode, version = self.version, "Game started");
    }

    /// Clears the grid and returns to not-started.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.clear();
        self.status = GameStatus::NotStarted;
        info!(version = self.version, "Game reset");
    }

    /// Human-readable summary of the game.
    pub fn status_line(&self) -> String {
        match self.status {
            GameStatus::NotStarted => "Ready to start".to_string(),
            GameStatus::Playing => format!(
                "{} to move. Score {}-{}",
                self.current_player.label(self.mode),
                self.scores.player1,
                self.scores.player2
            ),
            GameStatus::Finished => format!(
                "Game over. {} Score {}-{}",
                rules::outcome(&self.scores).announcement(self.mode),
                self.scores.player1,
                self.scores.player2
            ),
        }
    }

    /// Formats the grid as text: dots, drawn lines and box owners.
    pub fn display(&self) -> String {
        let n = self.size.dots();
        let mut out = String::new();
        for row in 0..n {
            for col in 0..n {
                out.push('+');
                if col + 1 < n {
                    let drawn = self.has_line(LineId::horizontal(row, col));
                    out.push_str(if drawn { "---" } else { "   " });
                }
            }
            out.push('\n');
            if row + 1 == n {
                break;
            }
            for col in 0..n {
                let drawn = self.has_line(LineId::vertical(row, col));
                out.push(if drawn { '|' } else { ' ' });
                if col + 1 < n {
                    match self.owner_of(BoxId::new(row, col)) {
                        Some(owner) => out.push_str(&format!(" {} ", owner.number())),
                        None => out.push_str("   "),
                    }
                }
            }
            out.push('\n');
        }
        out
    }

    pub(crate) fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    fn recompute_scores(&mut self) {
        self.scores = Scores::from_boxes(&self.boxes);
    }

    fn clear(&mut self) {
        self.current_player = Player::One;
        self.lines.clear();
        self.index.clear();
        self.boxes.clear();
        self.recompute_scores();
        self.bump_version();
    }

    /// Mutable line list for invariant tests.
    #[cfg(test)]
    pub(crate) fn lines_mut(&mut self) -> &mut Vec<Line> {
        &mut self.lines
    }

    /// Mutable box list for invariant tests.
    #[cfg(test)]
    pub(crate) fn boxes_mut(&mut self) -> &mut Vec<CompletedBox> {
        &mut self.boxes
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GridSize::default(), Mode::default())
    }
}

/// Serialized form of [`GameState`]; the line index is rebuilt on load.
#[derive(Deserialize)]
struct GameStateSnapshot {
    size: GridSize,
    mode: Mode,
    status: GameStatus,
    current_player: Player,
    lines: Vec<Line>,
    boxes: Vec<CompletedBox>,
    version: u64,
}

impl TryFrom<GameStateSnapshot> for GameState {
    type Error = GridError;

    fn try_from(snapshot: GameStateSnapshot) -> Result<Self, Self::Error> {
        let mut index = HashSet::with_capacity(snapshot.lines.len());
        for line in &snapshot.lines {
            if !geometry::is_valid_line(snapshot.size, line.id) {
                return Err(GridError::new(format!("line {} is off the grid", line.id)));
            }
            if !index.insert(line.id) {
                return Err(GridError::new(format!("line {} drawn twice", line.id)));
            }
        }

        let mut seen = HashSet::with_capacity(snapshot.boxes.len());
        for b in &snapshot.boxes {
            if !snapshot.size.contains_box(b.id) {
                return Err(GridError::new(format!("box {} is off the grid", b.id)));
            }
            if !seen.insert(b.id) {
                return Err(GridError::new(format!("box {} recorded twice", b.id)));
            }
        }

        let scores = Scores::from_boxes(&snapshot.boxes);
        Ok(Self {
            size: snapshot.size,
            mode: snapshot.mode,
            status: snapshot.status,
            current_player: snapshot.current_player,
            lines: snapshot.lines,
            index,
            boxes: snapshot.boxes,
            scores,
            version: snapshot.version,
        })
    }
}
