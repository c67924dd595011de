//! Wall-clock timekeeping.
//!
//! The countdown is recomputed from the real time elapsed since the timer
//! was last (re)started, so a suspended or backgrounded host catches up on
//! its next tick instead of silently losing time.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Source of "now" in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Hand-driven clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: Arc::new(AtomicI64::new(start_ms)),
        }
    }

    pub fn set(&self, ms: i64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance_ms(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Countdown value captured at a known instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub epoch_ms: i64,
    pub remaining_secs: u64,
}

/// Recomputes the countdown from an anchor. Disarmed while the timer is
/// not running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallClock {
    #[serde(default)]
    anchor: Option<Anchor>,
}

impl WallClock {
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn is_armed(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn arm(&mut self, epoch_ms: i64, remaining_secs: u64) {
        self.anchor = Some(Anchor {
            epoch_ms,
            remaining_secs,
        });
    }

    pub fn disarm(&mut self) {
        self.anchor = None;
    }

    /// Countdown value at `now_ms`, in whole seconds, floored at zero.
    /// A clock that moved backwards counts as no elapsed time.
    pub fn remaining_at(&self, now_ms: i64) -> Option<u64> {
        self.anchor.map(|a| {
            let elapsed_secs = now_ms.saturating_sub(a.epoch_ms).max(0) / 1000;
            a.remaining_secs.saturating_sub(elapsed_secs as u64)
        })
    }

    /// Instant at which the anchored countdown reaches zero.
    pub fn zero_at_ms(&self) -> Option<i64> {
        self.anchor.map(|a| {
            let remaining_ms = i64::try_from(a.remaining_secs)
                .unwrap_or(i64::MAX)
                .saturating_mul(1000);
            a.epoch_ms.saturating_add(remaining_ms)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(1_000);
        let other = clock.clone();
        clock.advance_secs(2);
        assert_eq!(other.now_ms(), 3_000);
    }

    #[test]
    fn remaining_counts_whole_seconds() {
        let mut wall = WallClock::default();
        assert_eq!(wall.remaining_at(0), None);

        wall.arm(10_000, 60);
        assert_eq!(wall.remaining_at(10_999), Some(60));
        assert_eq!(wall.remaining_at(11_000), Some(59));
        assert_eq!(wall.remaining_at(70_000), Some(0));
        assert_eq!(wall.remaining_at(999_000), Some(0));
    }

    #[test]
    fn backwards_clock_is_ignored() {
        let mut wall = WallClock::default();
        wall.arm(10_000, 60);
        assert_eq!(wall.remaining_at(5_000), Some(60));
    }

    #[test]
    fn zero_instant_follows_anchor() {
        let mut wall = WallClock::default();
        wall.arm(10_000, 5);
        assert_eq!(wall.zero_at_ms(), Some(15_000));
        wall.disarm();
        assert_eq!(wall.zero_at_ms(), None);
    }
}
