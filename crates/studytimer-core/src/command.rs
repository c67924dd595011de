//! The command vocabulary accepted by [`StudyTimer::dispatch`](crate::StudyTimer::dispatch).

use serde::{Deserialize, Serialize};

use crate::ledger::{Goal, Session};
use crate::timer::BreakPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // Goal ledger
    CreateGoal { description: String },
    SetCurrentGoal { goal_id: String },
    ClearCurrentGoal,
    CompleteSession { duration_secs: u64, completed: bool },
    LoadGoals { goals: Vec<Goal> },
    LoadSessions { sessions: Vec<Session> },

    // Timer engine
    Start,
    Pause,
    Stop,
    Reset,
    /// Fixed-step countdown.
    Advance { delta_secs: u64 },
    SetRemaining { remaining_secs: u64 },
    /// Recompute the countdown from the wall clock.
    Tick,
    TogglePhase,
    SetStudyDuration { minutes: u32 },
    SetBreakDuration { minutes: u32 },
    StartBreak,
    SkipBreak,
    SetBreakPolicy { policy: BreakPolicy },
    ResetElapsed,

    // Composites
    /// Create a goal and start studying for it right away.
    BeginGoal { description: String },
    /// Change the current goal while idle and reset the countdown.
    SwitchGoal { goal_id: String },
    /// Log the partial study time, drop the current goal and reset.
    SaveForLater,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateGoal { .. } => "create_goal",
            Command::SetCurrentGoal { .. } => "set_current_goal",
            Command::ClearCurrentGoal => "clear_current_goal",
            Command::CompleteSession { .. } => "complete_session",
            Command::LoadGoals { .. } => "load_goals",
            Command::LoadSessions { .. } => "load_sessions",
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::Reset => "reset",
            Command::Advance { .. } => "advance",
            Command::SetRemaining { .. } => "set_remaining",
            Command::Tick => "tick",
            Command::TogglePhase => "toggle_phase",
            Command::SetStudyDuration { .. } => "set_study_duration",
            Command::SetBreakDuration { .. } => "set_break_duration",
            Command::StartBreak => "start_break",
            Command::SkipBreak => "skip_break",
            Command::SetBreakPolicy { .. } => "set_break_policy",
            Command::ResetElapsed => "reset_elapsed",
            Command::BeginGoal { .. } => "begin_goal",
            Command::SwitchGoal { .. } => "switch_goal",
            Command::SaveForLater => "save_for_later",
        }
    }
}
