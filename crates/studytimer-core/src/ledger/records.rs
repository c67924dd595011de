use serde::{Deserialize, Serialize};

/// A user-declared study objective.
///
/// Serialized with the persistence collaborator's field names
/// (`createdAtEpochMs`, `totalTimeStudied`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub description: String,
    pub created_at_epoch_ms: i64,
    /// Seconds, accumulated only through session completion.
    #[serde(default)]
    pub total_time_studied: u64,
}

/// One completed countdown interval. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub goal_id: String,
    pub occurred_at_epoch_ms: i64,
    /// Seconds actually elapsed.
    pub duration: u64,
    /// False when the session was ended early.
    pub completed: bool,
}

/// A goal plus the per-goal figures shown in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub goal: Goal,
    pub session_count: usize,
    pub is_current: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_study_secs: u64,
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub today_sessions: u64,
    pub today_study_secs: u64,
    pub goal_count: usize,
}
