//! Goals, sessions and running totals.
//!
//! History is append-only: goals gain time only through session completion
//! and sessions are never edited. `total_study_time` and `total_sessions` are
//! kept incrementally and always equal the sum/count over `sessions`.

mod records;

pub use records::{Goal, GoalSummary, LedgerStats, Session};

use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalLedger {
    goals: Vec<Goal>,
    sessions: Vec<Session>,
    current_goal_id: Option<String>,
    total_study_time: u64,
    total_sessions: u64,
}

impl GoalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn current_goal_id(&self) -> Option<&str> {
        self.current_goal_id.as_deref()
    }

    pub fn current_goal(&self) -> Option<&Goal> {
        self.current_goal_id.as_deref().and_then(|id| self.goal(id))
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn total_study_time(&self) -> u64 {
        self.total_study_time
    }

    pub fn total_sessions(&self) -> u64 {
        self.total_sessions
    }

    pub fn sessions_for<'a>(&'a self, goal_id: &'a str) -> impl Iterator<Item = &'a Session> + 'a {
        self.sessions.iter().filter(move |s| s.goal_id == goal_id)
    }

    /// Goals newest first, with per-goal session counts.
    pub fn history(&self, now_ms: i64) -> Vec<GoalSummary> {
        let mut summaries: Vec<GoalSummary> = self
            .goals
            .iter()
            .map(|goal| GoalSummary {
                goal: goal.clone(),
                session_count: self.sessions_for(&goal.id).count(),
                is_current: self.current_goal_id.as_deref() == Some(goal.id.as_str()),
                is_today: same_local_day(goal.created_at_epoch_ms, now_ms),
            })
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        summaries.sort_by(|a, b| b.goal.created_at_epoch_ms.cmp(&a.goal.created_at_epoch_ms));
        summaries
    }

    pub fn stats(&self, now_ms: i64) -> LedgerStats {
        let mut stats = LedgerStats {
            total_study_secs: self.total_study_time,
            total_sessions: self.total_sessions,
            goal_count: self.goals.len(),
            ..LedgerStats::default()
        };
        for session in &self.sessions {
            if session.completed {
                stats.completed_sessions += 1;
            }
            if same_local_day(session.occurred_at_epoch_ms, now_ms) {
                stats.today_sessions += 1;
                stats.today_study_secs += session.duration;
            }
        }
        stats
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn create_goal(&mut self, description: &str) -> Result<&Goal> {
        self.create_goal_at(description, Utc::now().timestamp_millis())
    }

    /// Append a goal and make it current. Blank descriptions are rejected.
    pub fn create_goal_at(&mut self, description: &str, at_ms: i64) -> Result<&Goal> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::InvalidInput(
                "goal description must not be empty".into(),
            ));
        }
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            created_at_epoch_ms: at_ms,
            total_time_studied: 0,
        };
        self.current_goal_id = Some(goal.id.clone());
        self.goals.push(goal);
        Ok(&self.goals[self.goals.len() - 1])
    }

    pub fn set_current_goal(&mut self, goal_id: &str) -> Result<()> {
        if self.goal(goal_id).is_none() {
            return Err(CoreError::goal_not_found(goal_id));
        }
        self.current_goal_id = Some(goal_id.to_string());
        Ok(())
    }

    pub fn clear_current_goal(&mut self) {
        self.current_goal_id = None;
    }

    pub fn complete_session(&mut self, duration: u64, completed: bool) -> Option<&Session> {
        self.complete_session_at(duration, completed, Utc::now().timestamp_millis())
    }

    /// Record a session against the current goal.
    ///
    /// Returns `None` without touching anything when no goal is current.
    pub fn complete_session_at(
        &mut self,
        duration: u64,
        completed: bool,
        at_ms: i64,
    ) -> Option<&Session> {
        let goal_id = self.current_goal_id.clone()?;
        let goal = self.goals.iter_mut().find(|g| g.id == goal_id)?;
        goal.total_time_studied = goal.total_time_studied.saturating_add(duration);

        self.sessions.push(Session {
            id: Uuid::new_v4().to_string(),
            goal_id,
            occurred_at_epoch_ms: at_ms,
            duration,
            completed,
        });
        self.total_study_time = self.total_study_time.saturating_add(duration);
        self.total_sessions += 1;
        self.sessions.last()
    }

    /// Replace all goals. A current goal that is no longer present is cleared.
    pub fn load_goals(&mut self, goals: Vec<Goal>) {
        self.goals = goals;
        if let Some(id) = self.current_goal_id.as_deref() {
            if self.goal(id).is_none() {
                self.current_goal_id = None;
            }
        }
    }

    /// Replace all sessions and recount the totals from scratch.
    pub fn load_sessions(&mut self, sessions: Vec<Session>) {
        self.total_study_time = sessions.iter().map(|s| s.duration).sum();
        self.total_sessions = sessions.len() as u64;
        self.sessions = sessions;
    }
}

fn same_local_day(a_ms: i64, b_ms: i64) -> bool {
    match (
        Local.timestamp_millis_opt(a_ms).single(),
        Local.timestamp_millis_opt(b_ms).single(),
    ) {
        (Some(a), Some(b)) => a.date_naive() == b.date_naive(),
        _ => false,
    }
}
