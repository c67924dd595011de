//! # Studytimer Core Library
//!
//! This library provides the core logic for Studytimer, a goal-oriented
//! study-session timer. Every operation is available through the standalone
//! `studytimer` CLI; any other front-end is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Timer Engine**: study/break countdown state machine driven by
//!   `tick()` (wall clock) or `advance()` (fixed steps)
//! - **Goal Ledger**: goals, the current goal, and completed sessions
//! - **Coordinator**: pure zero-crossing rules that log sessions and apply
//!   the break policy
//! - **Storage**: SQLite persistence for goals and sessions, TOML config
//!
//! ## Key Components
//!
//! - [`StudyTimer`]: the owned state container all commands go through
//! - [`TimerEngine`]: countdown state machine
//! - [`GoalLedger`]: goal and session bookkeeping
//! - [`Database`]: goal and session persistence
//! - [`Config`]: application configuration management

pub mod command;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod format;
pub mod ledger;
pub mod storage;
pub mod study;
pub mod timer;

pub use command::Command;
pub use coordinator::FollowUp;
pub use error::{ConfigError, CoreError, DatabaseError, Result};
pub use events::Event;
pub use ledger::{Goal, GoalLedger, GoalSummary, LedgerStats, Session};
pub use storage::{Config, Database, LedgerSink, NullSink, WriteQueue};
pub use study::{SavedTimer, StudySnapshot, StudyTimer};
pub use timer::{BreakPolicy, Clock, ManualClock, Phase, SystemClock, TimerEngine, TimerState};
