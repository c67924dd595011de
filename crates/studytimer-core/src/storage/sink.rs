//! Write-through of new goals and sessions to the persistence collaborator.
//!
//! Sinks are fire-and-forget from the timer's point of view: a failed write
//! is logged by the caller and never rolls back in-memory state.

use std::rc::Rc;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::database::Database;
use crate::error::{CoreError, Result};
use crate::ledger::{Goal, Session};

pub trait LedgerSink {
    fn goal_created(&self, goal: &Goal) -> Result<()>;
    fn session_recorded(&self, session: &Session) -> Result<()>;
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LedgerSink for NullSink {
    fn goal_created(&self, _goal: &Goal) -> Result<()> {
        Ok(())
    }

    fn session_recorded(&self, _session: &Session) -> Result<()> {
        Ok(())
    }
}

impl<S: LedgerSink + ?Sized> LedgerSink for Rc<S> {
    fn goal_created(&self, goal: &Goal) -> Result<()> {
        (**self).goal_created(goal)
    }

    fn session_recorded(&self, session: &Session) -> Result<()> {
        (**self).session_recorded(session)
    }
}

impl<S: LedgerSink + ?Sized> LedgerSink for Arc<S> {
    fn goal_created(&self, goal: &Goal) -> Result<()> {
        (**self).goal_created(goal)
    }

    fn session_recorded(&self, session: &Session) -> Result<()> {
        (**self).session_recorded(session)
    }
}

impl LedgerSink for Database {
    fn goal_created(&self, goal: &Goal) -> Result<()> {
        self.insert_goal(goal)?;
        Ok(())
    }

    fn session_recorded(&self, session: &Session) -> Result<()> {
        self.record_session(session)?;
        Ok(())
    }
}

/// A pending write for the background writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Goal(Goal),
    Session(Session),
}

/// Non-blocking sink: records are queued and written by a [`QueueWriter`]
/// running on the tokio runtime.
#[derive(Debug, Clone)]
pub struct WriteQueue {
    tx: mpsc::UnboundedSender<WriteOp>,
}

impl WriteQueue {
    pub fn channel() -> (Self, QueueWriter) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, QueueWriter { rx })
    }

    fn push(&self, op: WriteOp) -> Result<()> {
        self.tx
            .send(op)
            .map_err(|_| CoreError::Custom("write queue is closed".into()))
    }
}

impl LedgerSink for WriteQueue {
    fn goal_created(&self, goal: &Goal) -> Result<()> {
        self.push(WriteOp::Goal(goal.clone()))
    }

    fn session_recorded(&self, session: &Session) -> Result<()> {
        self.push(WriteOp::Session(session.clone()))
    }
}

pub struct QueueWriter {
    rx: mpsc::UnboundedReceiver<WriteOp>,
}

impl QueueWriter {
    /// Drain the queue into `db` until every [`WriteQueue`] handle is
    /// dropped, then hand the database back.
    pub async fn run(mut self, db: Database) -> Database {
        while let Some(op) = self.rx.recv().await {
            let result = match &op {
                WriteOp::Goal(goal) => db.goal_created(goal),
                WriteOp::Session(session) => db.session_recorded(session),
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, ?op, "background write failed");
            }
        }
        db
    }
}
