//! Strictly Games - host for the dots-and-boxes engine
//!
//! Wraps [`strictly_dots`] with what an interactive front end needs around
//! the pure rules: configuration, a session that owns the opponent's RNG,
//! delayed and cancellable opponent replies, and an event stream.
//!
//! # Architecture
//!
//! - **Config**: TOML-backed [`DotsConfig`]
//! - **Session**: [`GameSession`] around one `GameState`
//! - **Scheduler**: [`OpponentScheduler`] for the heuristic's delayed replies
//! - **Orchestrator**: drives a game and emits [`GameEvent`]s
//!
//! # Example
//!
//! ```no_run
//! use strictly_games::{DotsConfig, GameSession, OpponentScheduler};
//! use strictly_dots::{LineId, Mode};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let session = GameSession::new(&DotsConfig::new(Mode::HumanVsHeuristic))?.into_shared();
//! let scheduler = OpponentScheduler::for_session(session.clone()).await;
//!
//! session.lock().await.start();
//! let outcome = session.lock().await.apply_move(LineId::horizontal(0, 0));
//! if let Some(turn) = outcome.opponent_turn() {
//!     let reply = scheduler.schedule(turn).outcome().await;
//!     assert!(reply.is_some());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod orchestrator;
mod scheduler;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, DotsConfig};

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, Orchestrator};

// Crate-level exports - Scheduling
pub use scheduler::{OpponentScheduler, ScheduledTurn};

// Crate-level exports - Session management
pub use session::{GameSession, SharedSession};
