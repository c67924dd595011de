use clap::Subcommand;
use studytimer_core::Command;

use super::{execute, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Stop the countdown (same as pause)
    Stop,
    /// Refill the current phase and pause
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Count down a fixed number of seconds
    Advance {
        /// Seconds to count down
        secs: u64,
    },
    /// Switch between study and break
    Toggle,
    /// Take the offered break
    StartBreak,
    /// Decline the offered break and go back to study
    SkipBreak,
    /// Log partial study time, clear the current goal and reset
    SaveForLater,
}

pub fn run(action: TimerAction) -> CliResult {
    let command = match action {
        TimerAction::Start => Command::Start,
        TimerAction::Pause => Command::Pause,
        TimerAction::Stop => Command::Stop,
        TimerAction::Reset => Command::Reset,
        TimerAction::Status => Command::Tick,
        TimerAction::Advance { secs } => Command::Advance { delta_secs: secs },
        TimerAction::Toggle => Command::TogglePhase,
        TimerAction::StartBreak => Command::StartBreak,
        TimerAction::SkipBreak => Command::SkipBreak,
        TimerAction::SaveForLater => Command::SaveForLater,
    };
    execute(command)
}
