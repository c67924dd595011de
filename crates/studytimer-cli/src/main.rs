use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studytimer", version, about = "Goal-oriented study timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Study session log
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Study statistics
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("STUDYTIMER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    // Stdout carries the JSON output; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
