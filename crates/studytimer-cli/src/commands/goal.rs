use clap::Subcommand;
use studytimer_core::Command;

use super::{execute, CliResult, Workspace};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal and make it current
    Create {
        /// What you want to study
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// Create a goal and start studying right away
    Begin {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// List goals, newest first
    List,
    /// Make a goal current without touching the timer
    Select {
        /// Goal ID
        id: String,
    },
    /// Switch to another goal while idle and reset the countdown
    Switch {
        /// Goal ID
        id: String,
    },
    /// Clear the current goal
    Clear,
}

pub fn run(action: GoalAction) -> CliResult {
    match action {
        GoalAction::Create { description } => execute(Command::CreateGoal {
            description: description.join(" "),
        }),
        GoalAction::Begin { description } => execute(Command::BeginGoal {
            description: description.join(" "),
        }),
        GoalAction::List => {
            let mut ws = Workspace::open()?;
            ws.catch_up()?;
            let timer = ws.timer();
            let history = timer.ledger().history(timer.now_ms());
            println!("{}", serde_json::to_string_pretty(&history)?);
            Ok(())
        }
        GoalAction::Select { id } => execute(Command::SetCurrentGoal { goal_id: id }),
        GoalAction::Switch { id } => execute(Command::SwitchGoal { goal_id: id }),
        GoalAction::Clear => execute(Command::ClearCurrentGoal),
    }
}
