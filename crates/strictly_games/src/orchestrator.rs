//! Game orchestration: drives a session and reports what happened.

use crate::scheduler::OpponentScheduler;
use crate::session::SharedSession;
use anyhow::Result;
use strictly_dots::{
    CompletedBox, GameStatus, Line, MoveOutcome, OpponentTurn, Outcome, Player, Scores,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Messages sent from the orchestrator to whoever renders the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A game began.
    Started {
        /// Board as text.
        board: String,
    },
    /// The heuristic is waiting out its delay.
    OpponentThinking,
    /// A line was drawn.
    LineDrawn {
        /// The line and who drew it.
        line: Line,
        /// Boxes the line closed.
        completed: Vec<CompletedBox>,
        /// Scores after the move.
        scores: Scores,
    },
    /// Whose move it is now.
    TurnChanged {
        /// Player to move.
        player: Player,
        /// Board as text.
        board: String,
    },
    /// No boxes left.
    GameOver {
        /// Winner or tie.
        outcome: Outcome,
        /// Final scores.
        scores: Scores,
        /// Announcement text for the session's mode.
        announcement: String,
    },
}

/// Runs games in a session, standing the heuristic in for every human seat.
///
/// Human-seat moves are applied immediately; the heuristic seat's replies
/// go through the [`OpponentScheduler`] exactly as a UI would schedule them.
pub struct Orchestrator {
    session: SharedSession,
    scheduler: OpponentScheduler,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub async fn new(session: SharedSession, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        let scheduler = OpponentScheduler::for_session(session.clone()).await;
        Self {
            session,
            scheduler,
            event_tx,
        }
    }

    /// Starts a fresh game and plays it to the end.
    #[instrument(skip(self))]
    pub async fn run_self_play(&mut self) -> Result<Outcome> {
        info!("Starting self-play game");
        {
            let mut session = self.session.lock().await;
            session.start();
            self.event_tx.send(GameEvent::Started {
                board: session.state().display(),
            })?;
        }

        let mut pending: Option<OpponentTurn> = None;
        loop {
            let outcome = match pending.take() {
                Some(turn) => {
                    self.event_tx.send(GameEvent::OpponentThinking)?;
                    match self.scheduler.schedule(turn).outcome().await {
                        Some(outcome) => outcome,
                        None => anyhow::bail!("Opponent turn was discarded"),
                    }
                }
                None => {
                    let mut session = self.session.lock().await;
                    let Some(line) = session.suggest_move() else {
                        anyhow::bail!("No legal moves while game is playing");
                    };
                    let player = session.state().current_player();
                    debug!(line = %line, ?player, "Stand-in chose line");
                    session.apply_move(line)
                }
            };

            pending = self.report(&outcome).await?;

            let session = self.session.lock().await;
            if session.state().status() == GameStatus::Finished {
                let state = session.state();
                let outcome = state
                    .outcome()
                    .ok_or_else(|| anyhow::anyhow!("Finished game has no outcome"))?;
                info!(?outcome, scores = ?state.scores(), "Self-play game over");
                self.event_tx.send(GameEvent::GameOver {
                    outcome,
                    scores: state.scores(),
                    announcement: outcome.announcement(state.mode()),
                })?;
                return Ok(outcome);
            }
        }
    }

    /// Sends events for a move; returns the heuristic's ticket if it moves next.
    async fn report(&self, outcome: &MoveOutcome) -> Result<Option<OpponentTurn>> {
        let Some(applied) = outcome.applied() else {
            anyhow::bail!("Move unexpectedly ignored: {:?}", outcome);
        };

        let session = self.session.lock().await;
        self.event_tx.send(GameEvent::LineDrawn {
            line: *applied.line(),
            completed: applied.completed().clone(),
            scores: session.state().scores(),
        })?;

        if *applied.status() == GameStatus::Playing {
            self.event_tx.send(GameEvent::TurnChanged {
                player: *applied.next_player(),
                board: session.state().display(),
            })?;
        }

        Ok(*applied.opponent_turn())
    }

    /// Returns the session to not-started, discarding any pending reply.
    pub async fn reset(&mut self) {
        self.session.lock().await.reset();
    }
}
