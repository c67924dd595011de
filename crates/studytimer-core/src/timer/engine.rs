//! Timer engine implementation.
//!
//! The engine owns the countdown and the phase flag and nothing else. It has
//! no internal threads and never reads the clock: the caller decreases the
//! countdown with `advance()` or overwrites it with `set_remaining()`.
//! Reaching zero does not change the phase; the coordinator decides what
//! happens next.
//!
//! ## State Transitions
//!
//! ```text
//! StudyPaused <-> StudyRunning -> (StudyAwaitingDecision | BreakRunning | StudyPaused)
//! BreakPaused <-> BreakRunning -> StudyPaused
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::phase::{BreakPolicy, Phase};
use crate::error::{CoreError, Result};
use crate::events::Event;

pub const SECS_PER_MINUTE: u64 = 60;
/// 25 minutes.
pub const DEFAULT_STUDY_SECS: u64 = 25 * SECS_PER_MINUTE;
/// 7 minutes.
pub const DEFAULT_BREAK_SECS: u64 = 7 * SECS_PER_MINUTE;

/// Combined phase/run state, mostly for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    StudyRunning,
    StudyPaused,
    StudyAwaitingDecision,
    BreakRunning,
    BreakPaused,
}

/// Read-only copy of the fields the coordinator reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub running: bool,
    pub awaiting_break_decision: bool,
    pub study_secs: u64,
    pub break_secs: u64,
    pub break_policy: BreakPolicy,
}

impl TimerView {
    pub fn phase_duration_secs(&self) -> u64 {
        match self.phase {
            Phase::Study => self.study_secs,
            Phase::Break => self.break_secs,
        }
    }
}

/// Core timer engine.
///
/// All operations are total: configuration is validated at the command
/// boundary before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEngine {
    phase: Phase,
    remaining_secs: u64,
    running: bool,
    study_secs: u64,
    break_secs: u64,
    #[serde(default)]
    break_policy: BreakPolicy,
    /// Set while a manual break prompt is waiting for the user.
    #[serde(default)]
    awaiting_break_decision: bool,
    /// Elapsed seconds of the most recently completed study phase.
    #[serde(default)]
    study_elapsed_secs: u64,
    /// Elapsed seconds of the most recently completed break phase.
    #[serde(default)]
    break_elapsed_secs: u64,
}

impl TimerEngine {
    /// Create an idle engine in the study phase with a full countdown.
    pub fn new(study_secs: u64, break_secs: u64, break_policy: BreakPolicy) -> Self {
        Self {
            phase: Phase::Study,
            remaining_secs: study_secs,
            running: false,
            study_secs,
            break_secs,
            break_policy,
            awaiting_break_decision: false,
            study_elapsed_secs: 0,
            break_elapsed_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn study_secs(&self) -> u64 {
        self.study_secs
    }

    pub fn break_secs(&self) -> u64 {
        self.break_secs
    }

    pub fn break_policy(&self) -> BreakPolicy {
        self.break_policy
    }

    pub fn is_awaiting_break_decision(&self) -> bool {
        self.awaiting_break_decision
    }

    pub fn study_elapsed_secs(&self) -> u64 {
        self.study_elapsed_secs
    }

    pub fn break_elapsed_secs(&self) -> u64 {
        self.break_elapsed_secs
    }

    pub fn duration_of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Study => self.study_secs,
            Phase::Break => self.break_secs,
        }
    }

    /// Configured duration of the current phase.
    pub fn phase_duration_secs(&self) -> u64 {
        self.duration_of(self.phase)
    }

    /// Seconds consumed in the current phase so far.
    pub fn elapsed_in_phase_secs(&self) -> u64 {
        self.phase_duration_secs().saturating_sub(self.remaining_secs)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.phase_duration_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Check a deserialized engine before adopting it. Every command keeps
    /// these invariants, so only hand-edited or corrupt state fails.
    pub fn validate(&self) -> Result<()> {
        if self.study_secs == 0 || self.break_secs == 0 {
            return Err(CoreError::InvalidInput(
                "phase durations must be at least one second".into(),
            ));
        }
        if self.remaining_secs > self.phase_duration_secs() {
            return Err(CoreError::InvalidInput(format!(
                "remaining {}s exceeds the {}s phase",
                self.remaining_secs,
                self.phase_duration_secs()
            )));
        }
        if self.awaiting_break_decision && (self.running || self.phase == Phase::Break) {
            return Err(CoreError::InvalidInput(
                "break prompt pending outside an idle study phase".into(),
            ));
        }
        Ok(())
    }

    pub fn state(&self) -> TimerState {
        match (self.phase, self.running) {
            (Phase::Study, true) => TimerState::StudyRunning,
            (Phase::Study, false) if self.awaiting_break_decision => {
                TimerState::StudyAwaitingDecision
            }
            (Phase::Study, false) => TimerState::StudyPaused,
            (Phase::Break, true) => TimerState::BreakRunning,
            (Phase::Break, false) => TimerState::BreakPaused,
        }
    }

    pub fn view(&self) -> TimerView {
        TimerView {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            running: self.running,
            awaiting_break_decision: self.awaiting_break_decision,
            study_secs: self.study_secs,
            break_secs: self.break_secs,
            break_policy: self.break_policy,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or resume) the countdown.
    ///
    /// A countdown pinned at zero is refilled with the current phase's
    /// duration first, and a pending break prompt is dismissed.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.awaiting_break_decision = false;
        if self.remaining_secs == 0 {
            self.remaining_secs = self.phase_duration_secs();
        }
        self.running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.pause()
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.awaiting_break_decision = false;
        self.remaining_secs = self.phase_duration_secs();
        Some(Event::TimerReset {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Fixed-step countdown. Floors at zero; ignored while paused.
    pub fn advance(&mut self, delta_secs: u64) {
        if !self.running {
            return;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(delta_secs);
    }

    /// Absolute countdown update, clamped to the current phase's duration.
    pub fn set_remaining(&mut self, remaining_secs: u64) {
        self.remaining_secs = remaining_secs.min(self.phase_duration_secs());
    }

    pub fn toggle_phase(&mut self) -> Option<Event> {
        self.phase = self.phase.flipped();
        self.remaining_secs = self.phase_duration_secs();
        self.running = false;
        self.awaiting_break_decision = false;
        Some(Event::PhaseToggled {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn set_study_duration(&mut self, minutes: u32) -> Option<Event> {
        self.set_duration(Phase::Study, u64::from(minutes) * SECS_PER_MINUTE)
    }

    pub fn set_break_duration(&mut self, minutes: u32) -> Option<Event> {
        self.set_duration(Phase::Break, u64::from(minutes) * SECS_PER_MINUTE)
    }

    pub fn set_break_policy(&mut self, policy: BreakPolicy) -> Option<Event> {
        if self.break_policy == policy {
            return None;
        }
        self.break_policy = policy;
        Some(Event::BreakPolicyChanged {
            policy,
            at: Utc::now(),
        })
    }

    /// Pause and wait for the user to choose between a break and more study.
    pub fn prompt_break(&mut self) -> Option<Event> {
        self.running = false;
        self.awaiting_break_decision = true;
        Some(Event::BreakPromptShown { at: Utc::now() })
    }

    pub fn start_break(&mut self) -> Option<Event> {
        self.phase = Phase::Break;
        self.remaining_secs = self.break_secs;
        self.awaiting_break_decision = false;
        self.running = true;
        Some(Event::BreakStarted {
            duration_secs: self.break_secs,
            at: Utc::now(),
        })
    }

    pub fn skip_break(&mut self) -> Option<Event> {
        self.phase = Phase::Study;
        self.remaining_secs = self.study_secs;
        self.awaiting_break_decision = false;
        self.running = false;
        Some(Event::BreakSkipped {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Remember how long the phase that just ended actually ran.
    pub fn record_elapsed(&mut self, phase: Phase, secs: u64) {
        match phase {
            Phase::Study => self.study_elapsed_secs = secs,
            Phase::Break => self.break_elapsed_secs = secs,
        }
    }

    pub fn reset_elapsed(&mut self) {
        self.study_elapsed_secs = 0;
        self.break_elapsed_secs = 0;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn set_duration(&mut self, phase: Phase, secs: u64) -> Option<Event> {
        match phase {
            Phase::Study => self.study_secs = secs,
            Phase::Break => self.break_secs = secs,
        }
        if self.phase == phase {
            if !self.running {
                self.remaining_secs = secs;
            } else {
                // A running countdown keeps its value unless it would now
                // exceed the phase duration.
                self.remaining_secs = self.remaining_secs.min(secs);
            }
        }
        Some(Event::DurationChanged {
            phase,
            duration_secs: secs,
            at: Utc::now(),
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_STUDY_SECS, DEFAULT_BREAK_SECS, BreakPolicy::default())
    }
}
