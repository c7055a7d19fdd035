//! Delayed, cancellable opponent moves.
//!
//! The core never schedules anything. When a move hands the turn to the
//! heuristic, the host schedules its reply here after the presentation
//! delay. Two things cancel a scheduled reply: aborting the task, or any
//! change to the game state before it fires (the ticket's version no
//! longer matches and the reply is discarded).

use crate::session::SharedSession;
use std::time::Duration;
use strictly_dots::{MoveOutcome, OpponentTurn};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// A pending opponent reply.
#[derive(Debug)]
pub struct ScheduledTurn {
    turn: OpponentTurn,
    handle: JoinHandle<Option<MoveOutcome>>,
}

impl ScheduledTurn {
    /// Ticket this reply was scheduled for.
    pub fn turn(&self) -> OpponentTurn {
        self.turn
    }

    /// Aborts the reply if it has not fired yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the task has fired or been aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the reply.
    ///
    /// `None` if it was discarded as stale, cancelled, or the task failed.
    pub async fn outcome(self) -> Option<MoveOutcome> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => {
                debug!("Opponent turn cancelled");
                None
            }
            Err(e) => {
                warn!(error = %e, "Opponent task failed");
                None
            }
        }
    }
}

/// Schedules heuristic replies against a shared session.
#[derive(Debug, Clone)]
pub struct OpponentScheduler {
    session: SharedSession,
    delay: Duration,
}

impl OpponentScheduler {
    /// Creates a scheduler with an explicit delay.
    pub fn new(session: SharedSession, delay: Duration) -> Self {
        Self { session, delay }
    }

    /// Creates a scheduler using the session's configured delay.
    pub async fn for_session(session: SharedSession) -> Self {
        let delay = session.lock().await.opponent_delay();
        Self::new(session, delay)
    }

    /// Delay before each reply.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules the heuristic's reply for `turn` after the delay.
    #[instrument(
        skip(self),
        fields(ticket = turn.version(), delay_ms = self.delay.as_millis() as u64)
    )]
    pub fn schedule(&self, turn: OpponentTurn) -> ScheduledTurn {
        let session = self.session.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut session = session.lock().await;
            session.play_opponent_turn(turn)
        });
        ScheduledTurn { turn, handle }
    }
}
