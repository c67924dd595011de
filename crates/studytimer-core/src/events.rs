use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::{Goal, Session};
use crate::timer::{BreakPolicy, Phase};

/// Every state change in the system produces an Event.
/// The presentation layer polls for events; the audio collaborator listens
/// for `CueThresholdCrossed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseToggled {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    DurationChanged {
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    BreakPolicyChanged {
        policy: BreakPolicy,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero while running.
    PhaseCompleted {
        phase: Phase,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Manual policy: waiting for `start_break` or `skip_break`.
    BreakPromptShown {
        at: DateTime<Utc>,
    },
    BreakStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    BreakSkipped {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    GoalCreated {
        goal: Goal,
        at: DateTime<Utc>,
    },
    CurrentGoalChanged {
        goal_id: Option<String>,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        session: Session,
        at: DateTime<Utc>,
    },
    /// Bulk hydration replaced goals or sessions.
    LedgerLoaded {
        goals: usize,
        sessions: usize,
        at: DateTime<Utc>,
    },
    /// The countdown moved past a configured cue threshold.
    CueThresholdCrossed {
        phase: Phase,
        threshold_secs: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Tag name, as written in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "TimerStarted",
            Event::TimerPaused { .. } => "TimerPaused",
            Event::TimerReset { .. } => "TimerReset",
            Event::PhaseToggled { .. } => "PhaseToggled",
            Event::DurationChanged { .. } => "DurationChanged",
            Event::BreakPolicyChanged { .. } => "BreakPolicyChanged",
            Event::PhaseCompleted { .. } => "PhaseCompleted",
            Event::BreakPromptShown { .. } => "BreakPromptShown",
            Event::BreakStarted { .. } => "BreakStarted",
            Event::BreakSkipped { .. } => "BreakSkipped",
            Event::GoalCreated { .. } => "GoalCreated",
            Event::CurrentGoalChanged { .. } => "CurrentGoalChanged",
            Event::SessionRecorded { .. } => "SessionRecorded",
            Event::LedgerLoaded { .. } => "LedgerLoaded",
            Event::CueThresholdCrossed { .. } => "CueThresholdCrossed",
        }
    }
}
