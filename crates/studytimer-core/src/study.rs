//! The single owned state container.
//!
//! `StudyTimer` holds the timer engine, the goal ledger and the wall-clock
//! anchor, and is the only place commands enter. After every countdown
//! change it asks the coordinator for follow-ups and applies them before
//! returning, so one zero-crossing is handled exactly once and completely
//! before the next tick is accepted. Each component is mutated only through
//! its own operations.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::coordinator::{self, FollowUp};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::format::{format_study_time, format_time, motivational_message};
use crate::ledger::{Goal, GoalLedger, Session};
use crate::storage::{Config, Database, LedgerSink, NullSink};
use crate::timer::{
    crossed_thresholds, BreakPolicy, Clock, Phase, SystemClock, TimerEngine, TimerState,
    TimerView, WallClock, DEFAULT_CUE_THRESHOLDS,
};

/// Read-only view for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySnapshot {
    pub state: TimerState,
    pub phase: Phase,
    pub remaining_secs: u64,
    /// `MM:SS`
    pub remaining_display: String,
    /// 0.0 .. 1.0 through the current phase.
    pub progress: f64,
    pub running: bool,
    pub awaiting_break_decision: bool,
    pub study_secs: u64,
    pub break_secs: u64,
    pub break_policy: BreakPolicy,
    pub study_elapsed_secs: u64,
    pub break_elapsed_secs: u64,
    pub current_goal: Option<Goal>,
    pub total_study_secs: u64,
    /// `2h 30m`
    pub total_study_display: String,
    pub total_sessions: u64,
    pub message: String,
}

/// Timer state that survives between runs. Goals and sessions live in the
/// database and are hydrated separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTimer {
    pub engine: TimerEngine,
    #[serde(default)]
    pub wall_clock: WallClock,
    #[serde(default)]
    pub current_goal_id: Option<String>,
}

pub struct StudyTimer {
    engine: TimerEngine,
    ledger: GoalLedger,
    wall_clock: WallClock,
    cue_thresholds: Vec<u64>,
    clock: Box<dyn Clock>,
    sink: Box<dyn LedgerSink>,
}

impl StudyTimer {
    pub fn new(engine: TimerEngine) -> Self {
        Self {
            engine,
            ledger: GoalLedger::new(),
            wall_clock: WallClock::default(),
            cue_thresholds: DEFAULT_CUE_THRESHOLDS.to_vec(),
            clock: Box::new(SystemClock),
            sink: Box::new(NullSink),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timer_engine()).with_cues(config.cue_thresholds())
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_sink(mut self, sink: impl LedgerSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_cues(mut self, thresholds: Vec<u64>) -> Self {
        self.cue_thresholds = thresholds;
        self
    }

    pub fn with_ledger(mut self, ledger: GoalLedger) -> Self {
        self.ledger = ledger;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn ledger(&self) -> &GoalLedger {
        &self.ledger
    }

    pub fn wall_clock(&self) -> &WallClock {
        &self.wall_clock
    }

    pub fn cue_thresholds(&self) -> &[u64] {
        &self.cue_thresholds
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn snapshot(&self) -> StudySnapshot {
        StudySnapshot {
            state: self.engine.state(),
            phase: self.engine.phase(),
            remaining_secs: self.engine.remaining_secs(),
            remaining_display: format_time(self.engine.remaining_secs()),
            progress: self.engine.progress(),
            running: self.engine.is_running(),
            awaiting_break_decision: self.engine.is_awaiting_break_decision(),
            study_secs: self.engine.study_secs(),
            break_secs: self.engine.break_secs(),
            break_policy: self.engine.break_policy(),
            study_elapsed_secs: self.engine.study_elapsed_secs(),
            break_elapsed_secs: self.engine.break_elapsed_secs(),
            current_goal: self.ledger.current_goal().cloned(),
            total_study_secs: self.ledger.total_study_time(),
            total_study_display: format_study_time(self.ledger.total_study_time()),
            total_sessions: self.ledger.total_sessions(),
            message: motivational_message(self.ledger.total_sessions()).to_string(),
        }
    }

    pub fn saved(&self) -> SavedTimer {
        SavedTimer {
            engine: self.engine.clone(),
            wall_clock: self.wall_clock.clone(),
            current_goal_id: self.ledger.current_goal_id().map(str::to_string),
        }
    }

    /// Put back a saved engine and anchor. Call after hydrating the ledger
    /// so the saved current goal can be re-selected; a goal that no longer
    /// exists is dropped.
    pub fn restore(&mut self, saved: SavedTimer) -> Result<()> {
        saved.engine.validate()?;
        self.engine = saved.engine;
        self.wall_clock = saved.wall_clock;
        if !self.engine.is_running() {
            self.wall_clock.disarm();
        }
        match saved.current_goal_id {
            Some(id) => {
                if let Err(e) = self.ledger.set_current_goal(&id) {
                    warn!(goal_id = %id, error = %e, "saved current goal is gone");
                    self.ledger.clear_current_goal();
                }
            }
            None => self.ledger.clear_current_goal(),
        }
        Ok(())
    }

    /// Load goals and sessions from the persistence collaborator.
    pub fn hydrate(&mut self, db: &Database) -> Result<Vec<Event>> {
        let goals = db.list_goals()?;
        let sessions = db.list_sessions(None)?;
        let mut events = self.load_goals(goals);
        events.extend(self.load_sessions(sessions));
        Ok(events)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn dispatch(&mut self, command: Command) -> Result<Vec<Event>> {
        debug!(command = command.name(), "dispatch");
        match command {
            Command::CreateGoal { description } => self.create_goal(&description),
            Command::SetCurrentGoal { goal_id } => self.set_current_goal(&goal_id),
            Command::ClearCurrentGoal => Ok(self.clear_current_goal()),
            Command::CompleteSession {
                duration_secs,
                completed,
            } => Ok(self.complete_session(duration_secs, completed)),
            Command::LoadGoals { goals } => Ok(self.load_goals(goals)),
            Command::LoadSessions { sessions } => Ok(self.load_sessions(sessions)),
            Command::Start => Ok(self.start()),
            Command::Pause => Ok(self.pause()),
            Command::Stop => Ok(self.stop()),
            Command::Reset => Ok(self.reset()),
            Command::Advance { delta_secs } => Ok(self.advance(delta_secs)),
            Command::SetRemaining { remaining_secs } => Ok(self.set_remaining(remaining_secs)),
            Command::Tick => Ok(self.tick()),
            Command::TogglePhase => Ok(self.toggle_phase()),
            Command::SetStudyDuration { minutes } => self.set_study_duration(minutes),
            Command::SetBreakDuration { minutes } => self.set_break_duration(minutes),
            Command::StartBreak => Ok(self.start_break()),
            Command::SkipBreak => Ok(self.skip_break()),
            Command::SetBreakPolicy { policy } => Ok(self.set_break_policy(policy)),
            Command::ResetElapsed => Ok(self.reset_elapsed()),
            Command::BeginGoal { description } => self.begin_goal(&description),
            Command::SwitchGoal { goal_id } => self.switch_goal(&goal_id),
            Command::SaveForLater => Ok(self.save_for_later()),
        }
    }

    // Goal ledger

    pub fn create_goal(&mut self, description: &str) -> Result<Vec<Event>> {
        let at_ms = self.clock.now_ms();
        let goal = self.ledger.create_goal_at(description, at_ms)?.clone();
        info!(goal_id = %goal.id, "goal created");
        if let Err(e) = self.sink.goal_created(&goal) {
            warn!(goal_id = %goal.id, error = %e, "failed to persist goal");
        }
        let at = Utc::now();
        let goal_id = Some(goal.id.clone());
        Ok(vec![
            Event::GoalCreated { goal, at },
            Event::CurrentGoalChanged { goal_id, at },
        ])
    }

    pub fn set_current_goal(&mut self, goal_id: &str) -> Result<Vec<Event>> {
        self.ledger.set_current_goal(goal_id)?;
        Ok(vec![Event::CurrentGoalChanged {
            goal_id: Some(goal_id.to_string()),
            at: Utc::now(),
        }])
    }

    pub fn clear_current_goal(&mut self) -> Vec<Event> {
        self.ledger.clear_current_goal();
        vec![Event::CurrentGoalChanged {
            goal_id: None,
            at: Utc::now(),
        }]
    }

    /// Log a session against the current goal. Without a current goal this
    /// is a silent no-op.
    pub fn complete_session(&mut self, duration_secs: u64, completed: bool) -> Vec<Event> {
        let at_ms = self.clock.now_ms();
        let Some(session) = self
            .ledger
            .complete_session_at(duration_secs, completed, at_ms)
            .cloned()
        else {
            debug!(duration_secs, "no current goal, session not recorded");
            return Vec::new();
        };

        info!(
            session_id = %session.id,
            goal_id = %session.goal_id,
            duration_secs,
            completed,
            "session recorded"
        );
        if let Err(e) = self.sink.session_recorded(&session) {
            warn!(session_id = %session.id, error = %e, "failed to persist session");
        }
        vec![Event::SessionRecorded {
            session,
            at: Utc::now(),
        }]
    }

    pub fn load_goals(&mut self, goals: Vec<Goal>) -> Vec<Event> {
        self.ledger.load_goals(goals);
        self.ledger_loaded()
    }

    pub fn load_sessions(&mut self, sessions: Vec<Session>) -> Vec<Event> {
        self.ledger.load_sessions(sessions);
        self.ledger_loaded()
    }

    // Timer engine

    pub fn start(&mut self) -> Vec<Event> {
        self.with_engine(TimerEngine::start)
    }

    pub fn pause(&mut self) -> Vec<Event> {
        self.with_engine(TimerEngine::pause)
    }

    pub fn stop(&mut self) -> Vec<Event> {
        self.with_engine(TimerEngine::stop)
    }

    pub fn reset(&mut self) -> Vec<Event> {
        self.with_engine(TimerEngine::reset)
    }

    pub fn toggle_phase(&mut self) -> Vec<Event> {
        self.with_engine(TimerEngine::toggle_phase)
    }

    pub fn start_break(&mut self) -> Vec<Event> {
        self.with_engine(TimerEngine::start_break)
    }

    pub fn skip_break(&mut self) -> Vec<Event> {
        self.with_engine(TimerEngine::skip_break)
    }

    pub fn set_break_policy(&mut self, policy: BreakPolicy) -> Vec<Event> {
        self.with_engine(|engine| engine.set_break_policy(policy))
    }

    pub fn set_study_duration(&mut self, minutes: u32) -> Result<Vec<Event>> {
        validate_minutes("study", minutes)?;
        Ok(self.with_engine(|engine| engine.set_study_duration(minutes)))
    }

    pub fn set_break_duration(&mut self, minutes: u32) -> Result<Vec<Event>> {
        validate_minutes("break", minutes)?;
        Ok(self.with_engine(|engine| engine.set_break_duration(minutes)))
    }

    pub fn reset_elapsed(&mut self) -> Vec<Event> {
        self.engine.reset_elapsed();
        Vec::new()
    }

    /// Fixed-step countdown.
    pub fn advance(&mut self, delta_secs: u64) -> Vec<Event> {
        self.countdown(|engine| engine.advance(delta_secs))
    }

    pub fn set_remaining(&mut self, remaining_secs: u64) -> Vec<Event> {
        self.countdown(|engine| engine.set_remaining(remaining_secs))
    }

    /// Recompute the countdown from the wall clock.
    ///
    /// Handles at most one zero-crossing. When the crossing leaves the timer
    /// running (automatic break), the new anchor is placed at the instant
    /// the study countdown actually hit zero, so time spent suspended counts
    /// against the break.
    pub fn tick(&mut self) -> Vec<Event> {
        let now_ms = self.clock.now_ms();
        let prev = self.engine.view();
        if !prev.running {
            self.wall_clock.disarm();
            return Vec::new();
        }
        let (Some(target), Some(zero_at_ms)) =
            (self.wall_clock.remaining_at(now_ms), self.wall_clock.zero_at_ms())
        else {
            self.wall_clock.arm(now_ms, prev.remaining_secs);
            return Vec::new();
        };
        if target >= prev.remaining_secs {
            return Vec::new();
        }

        self.engine.set_remaining(target);
        let events = self.observe_countdown(prev);
        if target == 0 {
            if self.engine.is_running() {
                self.wall_clock
                    .arm(zero_at_ms.min(now_ms), self.engine.remaining_secs());
            } else {
                self.wall_clock.disarm();
            }
        }
        events
    }

    // Composites

    /// Create a goal, reset the countdown and start studying.
    pub fn begin_goal(&mut self, description: &str) -> Result<Vec<Event>> {
        let mut events = self.create_goal(description)?;
        events.extend(self.reset());
        events.extend(self.start());
        Ok(events)
    }

    /// Select another goal while idle and bring the countdown back to a full
    /// study phase. Ignored while the timer is running or when the goal is
    /// already current.
    pub fn switch_goal(&mut self, goal_id: &str) -> Result<Vec<Event>> {
        if self.ledger.goal(goal_id).is_none() {
            return Err(CoreError::goal_not_found(goal_id));
        }
        if self.engine.is_running() || self.ledger.current_goal_id() == Some(goal_id) {
            debug!(goal_id, "switch ignored");
            return Ok(Vec::new());
        }
        let mut events = self.set_current_goal(goal_id)?;
        events.extend(match self.engine.phase() {
            Phase::Study => self.reset(),
            Phase::Break => self.toggle_phase(),
        });
        Ok(events)
    }

    /// Stop working on the current goal for now. Partially elapsed study
    /// time is logged as an incomplete session before the goal is cleared.
    pub fn save_for_later(&mut self) -> Vec<Event> {
        let mut events = self.tick();
        let elapsed = self.engine.elapsed_in_phase_secs();
        let partial = self.engine.phase() == Phase::Study
            && self.engine.remaining_secs() > 0
            && elapsed > 0;
        if partial {
            events.extend(self.complete_session(elapsed, false));
        }
        events.extend(self.clear_current_goal());
        events.extend(self.reset());
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn ledger_loaded(&self) -> Vec<Event> {
        vec![Event::LedgerLoaded {
            goals: self.ledger.goals().len(),
            sessions: self.ledger.sessions().len(),
            at: Utc::now(),
        }]
    }

    fn with_engine<F>(&mut self, op: F) -> Vec<Event>
    where
        F: FnOnce(&mut TimerEngine) -> Option<Event>,
    {
        let prev = self.engine.view();
        let event = op(&mut self.engine);
        self.resync_clock(prev);
        event.into_iter().collect()
    }

    fn countdown<F>(&mut self, op: F) -> Vec<Event>
    where
        F: FnOnce(&mut TimerEngine),
    {
        let prev = self.engine.view();
        op(&mut self.engine);
        let events = self.observe_countdown(prev);
        self.resync_clock(prev);
        events
    }

    /// Emit cues for the countdown change since `prev` and run the
    /// coordinator's follow-ups if it was a zero-crossing.
    fn observe_countdown(&mut self, prev: TimerView) -> Vec<Event> {
        let next = self.engine.view();
        let mut events = Vec::new();

        if prev.running && prev.phase == next.phase {
            let at = Utc::now();
            for threshold_secs in
                crossed_thresholds(prev.remaining_secs, next.remaining_secs, &self.cue_thresholds)
            {
                events.push(Event::CueThresholdCrossed {
                    phase: next.phase,
                    threshold_secs,
                    at,
                });
            }
        }

        let follow_ups = coordinator::react(&prev, &next);
        if follow_ups.is_empty() {
            return events;
        }

        info!(
            phase = %next.phase,
            elapsed_secs = next.phase_duration_secs(),
            policy = %next.break_policy,
            "phase completed"
        );
        events.push(Event::PhaseCompleted {
            phase: next.phase,
            elapsed_secs: next.phase_duration_secs(),
            at: Utc::now(),
        });
        for follow_up in follow_ups {
            events.extend(self.apply(follow_up));
        }
        events
    }

    fn apply(&mut self, follow_up: FollowUp) -> Vec<Event> {
        debug!(?follow_up, "apply follow-up");
        match follow_up {
            FollowUp::RecordElapsed { phase, secs } => {
                self.engine.record_elapsed(phase, secs);
                Vec::new()
            }
            FollowUp::CompleteSession {
                duration_secs,
                completed,
            } => self.complete_session(duration_secs, completed),
            FollowUp::StartBreak => self.engine.start_break().into_iter().collect(),
            FollowUp::PromptBreak => self.engine.prompt_break().into_iter().collect(),
            FollowUp::Pause => self.engine.pause().into_iter().collect(),
            FollowUp::ReturnToStudy => self.engine.toggle_phase().into_iter().collect(),
        }
    }

    /// Keep the wall-clock anchor in step with the engine: disarmed while
    /// paused, re-taken whenever a running countdown was changed by a
    /// command.
    fn resync_clock(&mut self, prev: TimerView) {
        let next = self.engine.view();
        if !next.running {
            self.wall_clock.disarm();
        } else if !self.wall_clock.is_armed()
            || !prev.running
            || prev.phase != next.phase
            || prev.remaining_secs != next.remaining_secs
        {
            self.wall_clock.arm(self.clock.now_ms(), next.remaining_secs);
        }
    }
}

impl Default for StudyTimer {
    fn default() -> Self {
        Self::new(TimerEngine::default())
    }
}

fn validate_minutes(which: &str, minutes: u32) -> Result<()> {
    if minutes == 0 {
        return Err(CoreError::InvalidInput(format!(
            "{which} duration must be at least one minute"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;

    fn timer(policy: BreakPolicy) -> (StudyTimer, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        let timer = StudyTimer::new(TimerEngine::new(5, 3, policy))
            .with_clock(clock.clone())
            .with_cues(vec![]);
        (timer, clock)
    }

    fn kinds(events: &[Event]) -> Vec<&'static str> {
        events.iter().map(Event::kind).collect()
    }

    #[test]
    fn dispatch_rejects_zero_minute_durations() {
        let (mut t, _) = timer(BreakPolicy::Manual);
        let err = t
            .dispatch(Command::SetStudyDuration { minutes: 0 })
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert_eq!(t.engine().study_secs(), 5);
        assert!(t.dispatch(Command::SetBreakDuration { minutes: 0 }).is_err());
        assert_eq!(t.engine().break_secs(), 3);
    }

    #[test]
    fn start_arms_and_pause_disarms_wall_clock() {
        let (mut t, _) = timer(BreakPolicy::Manual);
        t.start();
        assert_eq!(t.wall_clock().anchor().unwrap().remaining_secs, 5);
        t.pause();
        assert!(!t.wall_clock().is_armed());
    }

    #[test]
    fn tick_recomputes_from_elapsed_time() {
        let (mut t, clock) = timer(BreakPolicy::Manual);
        t.start();
        clock.advance_ms(2_500);
        assert!(t.tick().is_empty());
        assert_eq!(t.engine().remaining_secs(), 3);

        // The anchor is not moved by plain ticks, so fractions carry over.
        clock.advance_ms(500);
        t.tick();
        assert_eq!(t.engine().remaining_secs(), 2);
    }

    #[test]
    fn tick_while_paused_does_nothing() {
        let (mut t, clock) = timer(BreakPolicy::Manual);
        clock.advance_secs(10);
        assert!(t.tick().is_empty());
        assert_eq!(t.engine().remaining_secs(), 5);
    }

    #[test]
    fn automatic_break_anchors_at_the_zero_instant() {
        let (mut t, clock) = timer(BreakPolicy::Automatic);
        t.create_goal("Read").unwrap();
        t.start();
        // Suspended for 7s: study ended 2s ago, 1s of the 3s break is left.
        clock.advance_secs(7);
        let events = t.tick();
        assert!(kinds(&events).contains(&"SessionRecorded"));
        assert_eq!(t.engine().phase(), Phase::Break);
        assert_eq!(t.engine().remaining_secs(), 3);

        t.tick();
        assert_eq!(t.engine().remaining_secs(), 1);
        assert_eq!(t.ledger().total_sessions(), 1);
    }

    #[test]
    fn one_tick_handles_one_crossing() {
        let (mut t, clock) = timer(BreakPolicy::Automatic);
        t.create_goal("Read").unwrap();
        t.start();
        clock.advance_secs(60);
        t.tick();
        assert_eq!(t.engine().phase(), Phase::Break);
        t.tick();
        assert_eq!(t.engine().phase(), Phase::Study);
        assert!(!t.engine().is_running());
        assert_eq!(t.ledger().total_sessions(), 1);
        assert!(!t.wall_clock().is_armed());
    }

    #[test]
    fn cues_fire_on_the_way_down() {
        let (t, _) = timer(BreakPolicy::None);
        let mut t = t.with_cues(vec![2, 0]);
        t.start();
        assert!(t.advance(2).is_empty());
        let events = t.advance(1);
        assert_eq!(kinds(&events), vec!["CueThresholdCrossed"]);
        let events = t.advance(5);
        assert_eq!(kinds(&events)[0], "CueThresholdCrossed");
        assert!(kinds(&events).contains(&"PhaseCompleted"));
    }

    #[test]
    fn save_for_later_logs_partial_time() {
        let (mut t, _) = timer(BreakPolicy::Manual);
        t.begin_goal("Essay").unwrap();
        t.advance(2);
        let events = t.save_for_later();
        assert!(kinds(&events).contains(&"SessionRecorded"));

        let session = &t.ledger().sessions()[0];
        assert_eq!(session.duration, 2);
        assert!(!session.completed);
        assert!(t.ledger().current_goal_id().is_none());
        assert!(!t.engine().is_running());
        assert_eq!(t.engine().remaining_secs(), 5);
    }

    #[test]
    fn save_for_later_after_completion_does_not_double_count() {
        let (mut t, _) = timer(BreakPolicy::None);
        t.begin_goal("Essay").unwrap();
        t.advance(5);
        assert_eq!(t.ledger().total_sessions(), 1);
        t.save_for_later();
        assert_eq!(t.ledger().total_sessions(), 1);
        assert_eq!(t.ledger().total_study_time(), 5);
    }

    #[test]
    fn switch_goal_is_ignored_while_running() {
        let (mut t, _) = timer(BreakPolicy::Manual);
        t.create_goal("First").unwrap();
        let first = t.ledger().current_goal_id().unwrap().to_string();
        t.begin_goal("Second").unwrap();
        t.advance(1);

        assert!(t.switch_goal(&first).unwrap().is_empty());
        assert_ne!(t.ledger().current_goal_id(), Some(first.as_str()));

        t.pause();
        t.switch_goal(&first).unwrap();
        assert_eq!(t.ledger().current_goal_id(), Some(first.as_str()));
        assert_eq!(t.engine().remaining_secs(), 5);

        assert!(matches!(
            t.switch_goal("missing"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn switch_goal_from_break_returns_to_study() {
        let (mut t, _) = timer(BreakPolicy::Manual);
        t.create_goal("First").unwrap();
        let first = t.ledger().current_goal_id().unwrap().to_string();
        t.create_goal("Second").unwrap();
        t.toggle_phase();
        t.switch_goal(&first).unwrap();
        assert_eq!(t.engine().phase(), Phase::Study);
        assert_eq!(t.engine().remaining_secs(), 5);
    }

    #[test]
    fn saved_state_round_trips() {
        let (mut t, clock) = timer(BreakPolicy::Manual);
        t.create_goal("Keep").unwrap();
        t.start();
        let saved = t.saved();
        let json = serde_json::to_string(&saved).unwrap();

        let goals = t.ledger().goals().to_vec();
        let mut restored = StudyTimer::new(TimerEngine::default()).with_clock(clock.clone());
        restored.load_goals(goals);
        restored.restore(serde_json::from_str(&json).unwrap()).unwrap();

        assert_eq!(restored.saved(), saved);
        clock.advance_secs(2);
        restored.tick();
        assert_eq!(restored.engine().remaining_secs(), 3);
    }

    #[test]
    fn restore_drops_missing_goal() {
        let mut t = StudyTimer::default();
        t.restore(SavedTimer {
            engine: TimerEngine::default(),
            wall_clock: WallClock::default(),
            current_goal_id: Some("gone".into()),
        })
        .unwrap();
        assert!(t.ledger().current_goal_id().is_none());
    }

    #[test]
    fn restore_rejects_zero_duration_engine() {
        let (mut t, _clock) = timer(BreakPolicy::Manual);
        t.create_goal("Keep").unwrap();
        let before = t.saved();

        let mut saved = before.clone();
        saved.engine = TimerEngine::new(0, 3, BreakPolicy::Manual);
        saved.engine.start();
        saved.current_goal_id = None;

        let err = t.restore(saved).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)), "got {err:?}");
        assert_eq!(t.saved(), before);
    }
}
