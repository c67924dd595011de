mod config;
pub mod database;
pub mod sink;

pub use config::{Config, CuesConfig, TimerConfig};
pub use database::Database;
pub use sink::{LedgerSink, NullSink, QueueWriter, WriteOp, WriteQueue};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `STUDYTIMER_DATA_DIR` wins when set. Otherwise `~/.config/studytimer`,
/// or `~/.config/studytimer-dev` when `STUDYTIMER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("STUDYTIMER_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studytimer-dev")
            } else {
                base_dir.join("studytimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
