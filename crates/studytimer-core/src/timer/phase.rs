use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which interval the countdown currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Study,
    Break,
}

impl Phase {
    pub fn flipped(self) -> Self {
        match self {
            Phase::Study => Phase::Break,
            Phase::Break => Phase::Study,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Study => "study",
            Phase::Break => "break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens when a study countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakPolicy {
    /// The break starts running immediately.
    Automatic,
    /// The timer pauses and waits for `start_break` or `skip_break`.
    #[default]
    Manual,
    /// The timer pauses at zero; the user starts the next session.
    None,
}

impl BreakPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakPolicy::Automatic => "automatic",
            BreakPolicy::Manual => "manual",
            BreakPolicy::None => "none",
        }
    }
}

impl fmt::Display for BreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automatic" | "auto" => Ok(BreakPolicy::Automatic),
            "manual" => Ok(BreakPolicy::Manual),
            "none" | "off" => Ok(BreakPolicy::None),
            other => Err(CoreError::InvalidInput(format!(
                "unknown break policy '{other}' (expected automatic, manual or none)"
            ))),
        }
    }
}
