//! Move engine: turn resolution for dots and boxes.
//!
//! Rejected moves are ordinary outcomes here, not errors. The caller is
//! expected to pre-filter with [`is_valid_line`](crate::geometry::is_valid_line)
//! and [`GameState::has_line`], and anything that slips through degrades
//! to a no-op.

use super::geometry;
use super::invariants::{DotsInvariants, InvariantSet};
use super::opponent::{self, HEURISTIC_PLAYER};
use super::rules;
use super::{CompletedBox, GameState, GameStatus, Line, LineId, Mode, Player};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Why a move changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoredReason {
    /// The game is not in the playing state.
    #[display("game is not being played")]
    NotPlaying,
    /// The slot is off the grid.
    #[display("line {} is off the grid", _0)]
    OutOfBounds(LineId),
    /// The slot is already drawn.
    #[display("line {} is already drawn", _0)]
    AlreadyDrawn(LineId),
}

/// Permission for the heuristic to move, valid only for one state version.
///
/// Issued by [`apply_move`] when the heuristic's seat is next to move. A
/// ticket goes stale as soon as anything else changes the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentTurn {
    version: u64,
}

impl OpponentTurn {
    /// Ticket for the state's current version.
    pub fn for_state(state: &GameState) -> Self {
        Self {
            version: state.version(),
        }
    }

    /// Version the ticket was issued at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Checks that nothing has changed since the ticket was issued.
    pub fn is_current(&self, state: &GameState) -> bool {
        self.version == state.version()
    }
}

/// What an applied move changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AppliedMove {
    /// The line that was drawn.
    line: Line,
    /// Boxes the line closed (0, 1 or 2).
    completed: Vec<CompletedBox>,
    /// Status after the move.
    status: GameStatus,
    /// Player to move next (unchanged after a completing move).
    next_player: Player,
    /// Set when the heuristic should move next.
    opponent_turn: Option<OpponentTurn>,
}

impl AppliedMove {
    /// True if the mover keeps the turn.
    pub fn extra_turn(&self) -> bool {
        !self.completed.is_empty() && self.status == GameStatus::Playing
    }
}

/// Result of [`apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The line was drawn.
    Applied(AppliedMove),
    /// Nothing changed.
    Ignored(IgnoredReason),
}

impl MoveOutcome {
    /// The applied move, if any.
    pub fn applied(&self) -> Option<&AppliedMove> {
        match self {
            MoveOutcome::Applied(applied) => Some(applied),
            MoveOutcome::Ignored(_) => None,
        }
    }

    /// True if the move changed nothing.
    pub fn is_ignored(&self) -> bool {
        matches!(self, MoveOutcome::Ignored(_))
    }

    /// Ticket for the heuristic, if it moves next.
    pub fn opponent_turn(&self) -> Option<OpponentTurn> {
        self.applied().and_then(|applied| applied.opponent_turn)
    }
}

/// Draws `line` for the current player and resolves the turn.
///
/// Ignored (no state change) when the game is not playing, the slot is off
/// the grid, or the slot is already drawn. Otherwise the line is inserted,
/// closed boxes are recorded for the mover, and:
/// - a full grid finishes the game with the turn left where it is;
/// - a completing move keeps the turn;
/// - any other move passes the turn.
///
/// In human-vs-heuristic mode the outcome carries an [`OpponentTurn`]
/// whenever player 2 is to move next and the game is still playing.
#[instrument(
    skip(state),
    fields(line = %line, player = ?state.current_player(), version = state.version())
)]
pub fn apply_move(state: &mut GameState, line: LineId) -> MoveOutcome {
    if state.status() != GameStatus::Playing {
        debug!(status = ?state.status(), "Ignoring move outside play");
        return MoveOutcome::Ignored(IgnoredReason::NotPlaying);
    }

    if !geometry::is_valid_line(state.size(), line) {
        debug!("Ignoring off-grid line");
        return MoveOutcome::Ignored(IgnoredReason::OutOfBounds(line));
    }

    let mover = state.current_player();
    if !state.add_line(line, mover) {
        debug!("Ignoring already drawn line");
        return MoveOutcome::Ignored(IgnoredReason::AlreadyDrawn(line));
    }

    let completed = rules::detect_completions(state, line, mover);
    if !completed.is_empty() {
        state.record_boxes(&completed);
        debug!(count = completed.len(), scores = ?state.scores(), "Boxes completed");
    }
    state.bump_version();

    let opponent_turn = if rules::is_grid_full(state) {
        state.set_status(GameStatus::Finished);
        info!(
            scores = ?state.scores(),
            outcome = ?rules::outcome(&state.scores()),
            "Game finished"
        );
        None
    } else {
        if completed.is_empty() {
            state.set_current_player(mover.opponent());
        }
        heuristic_to_move(state).then(|| OpponentTurn::for_state(state))
    };

    verify_invariants(state);

    MoveOutcome::Applied(AppliedMove {
        line: Line::new(line, mover),
        completed,
        status: state.status(),
        next_player: state.current_player(),
        opponent_turn,
    })
}

/// Plays the heuristic's move for a ticket, if the ticket is still good.
///
/// Returns `None` without touching the state when the ticket is stale, the
/// game is no longer playing, or it is not the heuristic's turn.
#[instrument(skip(state, rng), fields(ticket = turn.version(), version = state.version()))]
pub fn resolve_opponent_turn<R>(
    state: &mut GameState,
    turn: OpponentTurn,
    rng: &mut R,
) -> Option<MoveOutcome>
where
    R: Rng + ?Sized,
{
    if !turn.is_current(state) {
        debug!("Discarding stale opponent turn");
        return None;
    }
    if !heuristic_to_move(state) {
        debug!("Discarding opponent turn, heuristic is not to move");
        return None;
    }

    let line = opponent::choose_move(state, rng)?;
    Some(apply_move(state, line))
}

fn heuristic_to_move(state: &GameState) -> bool {
    state.status() == GameStatus::Playing
        && state.mode() == Mode::HumanVsHeuristic
        && state.current_player() == HEURISTIC_PLAYER
}

fn verify_invariants(state: &GameState) {
    if let Err(violations) = DotsInvariants::check_all(state) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        error!(%descriptions, "Postcondition failed");
    }
}
