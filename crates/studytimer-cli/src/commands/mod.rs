pub mod config;
pub mod goal;
pub mod session;
pub mod stats;
pub mod timer;

use std::rc::Rc;

use serde::Serialize;
use studytimer_core::timer::SECS_PER_MINUTE;
use studytimer_core::{
    Command, Config, CoreError, Database, Event, SavedTimer, StudySnapshot, StudyTimer,
};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

const TIMER_KEY: &str = "study_timer";

/// A `StudyTimer` backed by the on-disk database. Goals and sessions are
/// written through as they happen; the timer itself is saved to the kv
/// table by [`Workspace::save`].
pub struct Workspace {
    db: Rc<Database>,
    timer: StudyTimer,
    pending: Vec<Event>,
}

impl Workspace {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let db = Rc::new(Database::open()?);
        let mut timer = StudyTimer::from_config(&config).with_sink(Rc::clone(&db));
        timer.hydrate(&db)?;

        if let Some(json) = db.kv_get(TIMER_KEY)? {
            let restored = serde_json::from_str::<SavedTimer>(&json)
                .map_err(CoreError::from)
                .and_then(|saved| timer.restore(saved));
            if let Err(e) = restored {
                tracing::warn!(error = %e, "discarding unreadable timer state");
            }
        }
        let pending = apply_config(&mut timer, &config)?;

        Ok(Self { db, timer, pending })
    }

    pub fn timer(&self) -> &StudyTimer {
        &self.timer
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Catch up with the wall clock, then run `command`.
    pub fn run(&mut self, command: Command) -> Result<Vec<Event>, CoreError> {
        let mut events = std::mem::take(&mut self.pending);
        if command != Command::Tick {
            events.extend(self.timer.dispatch(Command::Tick)?);
        }
        events.extend(self.timer.dispatch(command)?);
        Ok(events)
    }

    /// Tick and save before a read-only view, so phases that ended since
    /// the last invocation are logged and counted.
    pub fn catch_up(&mut self) -> CliResult {
        self.run(Command::Tick)?;
        self.save()
    }

    pub fn save(&self) -> CliResult {
        let json = serde_json::to_string(&self.timer.saved())?;
        self.db.kv_set(TIMER_KEY, &json)?;
        Ok(())
    }
}

/// Bring a restored engine in line with the configured durations and
/// policy. Unchanged settings produce no commands.
fn apply_config(timer: &mut StudyTimer, config: &Config) -> Result<Vec<Event>, CoreError> {
    let engine = timer.engine();
    let mut commands = Vec::new();
    if engine.study_secs() != u64::from(config.timer.study_minutes) * SECS_PER_MINUTE {
        commands.push(Command::SetStudyDuration {
            minutes: config.timer.study_minutes,
        });
    }
    if engine.break_secs() != u64::from(config.timer.break_minutes) * SECS_PER_MINUTE {
        commands.push(Command::SetBreakDuration {
            minutes: config.timer.break_minutes,
        });
    }
    if engine.break_policy() != config.timer.break_policy {
        commands.push(Command::SetBreakPolicy {
            policy: config.timer.break_policy,
        });
    }

    let mut events = Vec::new();
    for command in commands {
        events.extend(timer.dispatch(command)?);
    }
    Ok(events)
}

#[derive(Serialize)]
struct Outcome<'a> {
    snapshot: StudySnapshot,
    events: &'a [Event],
}

/// Print the timer state and the events a command produced.
pub fn print_outcome(timer: &StudyTimer, events: &[Event]) -> CliResult {
    let outcome = Outcome {
        snapshot: timer.snapshot(),
        events,
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Run one command against the saved state and print the outcome.
pub fn execute(command: Command) -> CliResult {
    let mut ws = Workspace::open()?;
    let events = ws.run(command)?;
    ws.save()?;
    print_outcome(ws.timer(), &events)
}
