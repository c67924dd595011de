//! Zero-crossing rules.
//!
//! The coordinator is a pure function from (previous, next) timer views to
//! the follow-up commands that must run before the next tick is accepted.
//! It never touches the engine or the ledger itself; `StudyTimer` applies
//! the follow-ups in order through the owning component's operations.

use crate::timer::{BreakPolicy, Phase, TimerView};

/// A command the coordinator asks the owning components to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Store the elapsed time of the phase that just ended.
    RecordElapsed { phase: Phase, secs: u64 },
    /// Log a session against the current goal (no-op without one).
    CompleteSession { duration_secs: u64, completed: bool },
    /// Switch to the break phase and keep running.
    StartBreak,
    /// Pause and ask the user whether to take the break.
    PromptBreak,
    /// Stop at zero.
    Pause,
    /// Break is over: back to a paused, full study countdown.
    ReturnToStudy,
}

/// True when the countdown went from positive to exactly zero while running.
pub fn is_zero_crossing(prev: &TimerView, next: &TimerView) -> bool {
    prev.running && prev.remaining_secs > 0 && next.remaining_secs == 0 && prev.phase == next.phase
}

/// Follow-ups for one observed countdown change. Empty unless it is a
/// zero-crossing.
pub fn react(prev: &TimerView, next: &TimerView) -> Vec<FollowUp> {
    if !is_zero_crossing(prev, next) {
        return Vec::new();
    }

    let elapsed = next.phase_duration_secs();
    let mut follow_ups = vec![FollowUp::RecordElapsed {
        phase: next.phase,
        secs: elapsed,
    }];

    match next.phase {
        Phase::Study => {
            follow_ups.push(FollowUp::CompleteSession {
                duration_secs: elapsed,
                completed: true,
            });
            follow_ups.push(match next.break_policy {
                BreakPolicy::Automatic => FollowUp::StartBreak,
                BreakPolicy::Manual => FollowUp::PromptBreak,
                BreakPolicy::None => FollowUp::Pause,
            });
        }
        Phase::Break => follow_ups.push(FollowUp::ReturnToStudy),
    }
    follow_ups
}
