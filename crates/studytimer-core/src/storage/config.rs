//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Study and break durations (minutes)
//! - Break policy (automatic, manual, none)
//! - Countdown cue thresholds
//!
//! Configuration is stored at `<data dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::format::minutes_to_seconds;
use crate::timer::{BreakPolicy, TimerEngine, DEFAULT_CUE_THRESHOLDS};

/// Timer-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default)]
    pub break_policy: BreakPolicy,
}

/// Audio cue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Remaining-seconds marks that trigger a cue.
    #[serde(default = "default_thresholds")]
    pub thresholds_secs: Vec<u64>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub cues: CuesConfig,
}

fn default_study_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    7
}
fn default_true() -> bool {
    true
}
fn default_thresholds() -> Vec<u64> {
    DEFAULT_CUE_THRESHOLDS.to_vec()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            study_minutes: default_study_minutes(),
            break_minutes: default_break_minutes(),
            break_policy: BreakPolicy::default(),
        }
    }
}

impl Default for CuesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thresholds_secs: default_thresholds(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                if let Some(key) = cfg.zero_duration_key() {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "must be at least 1".into(),
                    });
                }
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field. On error the config is left unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.apply(key, value)?;
        self.save()?;
        Ok(())
    }

    /// Durations must be at least one minute.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.zero_duration_key() {
            Some(key) => Err(CoreError::InvalidInput(format!("{key} must be at least 1"))),
            None => Ok(()),
        }
    }

    fn zero_duration_key(&self) -> Option<&'static str> {
        if self.timer.study_minutes == 0 {
            Some("timer.study_minutes")
        } else if self.timer.break_minutes == 0 {
            Some("timer.break_minutes")
        } else {
            None
        }
    }

    /// A fresh idle engine built from these settings.
    pub fn timer_engine(&self) -> TimerEngine {
        TimerEngine::new(
            minutes_to_seconds(self.timer.study_minutes.into()),
            minutes_to_seconds(self.timer.break_minutes.into()),
            self.timer.break_policy,
        )
    }

    /// Active cue thresholds; empty when cues are disabled.
    pub fn cue_thresholds(&self) -> Vec<u64> {
        if self.cues.enabled {
            self.cues.thresholds_secs.clone()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.timer.study_minutes, 25);
        assert_eq!(cfg.timer.break_minutes, 7);
        assert_eq!(cfg.timer.break_policy, BreakPolicy::Manual);
        assert!(cfg.cues.enabled);
        assert_eq!(cfg.cues.thresholds_secs, vec![60]);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.study_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("timer.break_policy").as_deref(), Some("manual"));
        assert_eq!(cfg.get("cues.enabled").as_deref(), Some("true"));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.apply("timer.study_minutes", "50").unwrap();
        cfg.apply("timer.break_policy", "automatic").unwrap();
        cfg.apply("cues.enabled", "false").unwrap();
        cfg.apply("cues.thresholds_secs", "[300, 60, 0]").unwrap();

        assert_eq!(cfg.timer.study_minutes, 50);
        assert_eq!(cfg.timer.break_policy, BreakPolicy::Automatic);
        assert!(cfg.cue_thresholds().is_empty());
        assert_eq!(cfg.cues.thresholds_secs, vec![300, 60, 0]);
    }

    #[test]
    fn apply_rejects_bad_input_without_change() {
        let mut cfg = Config::default();
        assert!(cfg.apply("timer.nonexistent", "1").is_err());
        assert!(cfg.apply("timer.study_minutes", "lots").is_err());
        assert!(cfg.apply("timer.break_policy", "sometimes").is_err());
        assert!(cfg.apply("cues.enabled", "not_a_bool").is_err());

        let err = cfg.apply("timer.break_minutes", "0").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn timer_engine_uses_configured_minutes() {
        let mut cfg = Config::default();
        cfg.timer.study_minutes = 50;
        cfg.timer.break_minutes = 10;
        cfg.timer.break_policy = BreakPolicy::None;
        let engine = cfg.timer_engine();
        assert_eq!(engine.study_secs(), 3000);
        assert_eq!(engine.break_secs(), 600);
        assert_eq!(engine.remaining_secs(), 3000);
        assert_eq!(engine.break_policy(), BreakPolicy::None);
    }

    #[test]
    fn load_writes_defaults_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.apply("timer.break_minutes", "12").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().timer.break_minutes, 12);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\nbreak_policy = \"none\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timer.break_policy, BreakPolicy::None);
        assert_eq!(cfg.timer.study_minutes, 25);
        assert!(cfg.cues.enabled);
    }

    #[test]
    fn zero_minute_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\nstudy_minutes = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { key, .. } if key == "timer.study_minutes"),
            "got {err:?}"
        );

        std::fs::write(&path, "[timer]\nbreak_minutes = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
