use clap::Subcommand;
use studytimer_core::Command;

use super::{execute, CliResult, Workspace};

#[derive(Subcommand)]
pub enum SessionAction {
    /// List recorded sessions, oldest first
    List {
        /// Only sessions for this goal
        #[arg(long)]
        goal: Option<String>,
    },
    /// Log a session against the current goal
    Complete {
        /// Session length in seconds
        secs: u64,
        /// Mark the session as not completed
        #[arg(long)]
        incomplete: bool,
    },
}

pub fn run(action: SessionAction) -> CliResult {
    match action {
        SessionAction::List { goal } => {
            let mut ws = Workspace::open()?;
            ws.catch_up()?;
            let sessions = ws.db().list_sessions(goal.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
            Ok(())
        }
        SessionAction::Complete { secs, incomplete } => execute(Command::CompleteSession {
            duration_secs: secs,
            completed: !incomplete,
        }),
    }
}
