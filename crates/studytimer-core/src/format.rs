//! Display helpers shared by the CLI and any other front end.

use crate::timer::SECS_PER_MINUTE;

/// `MM:SS`, minutes not capped at 59.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / SECS_PER_MINUTE, secs % SECS_PER_MINUTE)
}

/// `2h 30m`, or `45m` under an hour.
pub fn format_study_time(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / SECS_PER_MINUTE;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

pub fn minutes_to_seconds(minutes: u64) -> u64 {
    minutes.saturating_mul(SECS_PER_MINUTE)
}

/// Rounded to the nearest minute, halves rounding up.
pub fn seconds_to_minutes(secs: u64) -> u64 {
    secs.saturating_add(SECS_PER_MINUTE / 2) / SECS_PER_MINUTE
}

pub fn motivational_message(sessions: u64) -> &'static str {
    match sessions {
        0 => "Let's get started!",
        1 => "Great start! Keep going!",
        2..=3 => "You're on a roll!",
        4..=7 => "Incredible focus!",
        _ => "You're a study machine!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_both_fields() {
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(420), "07:00");
        assert_eq!(format_time(90), "01:30");
        assert_eq!(format_time(5), "00:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn study_time_uses_hours_when_needed() {
        assert_eq!(format_study_time(9000), "2h 30m");
        assert_eq!(format_study_time(2700), "45m");
        assert_eq!(format_study_time(0), "0m");
    }

    #[test]
    fn minute_conversions() {
        assert_eq!(minutes_to_seconds(25), 1500);
        assert_eq!(minutes_to_seconds(0), 0);
        assert_eq!(seconds_to_minutes(1500), 25);
        assert_eq!(seconds_to_minutes(90), 2);
        assert_eq!(seconds_to_minutes(89), 1);
        assert_eq!(seconds_to_minutes(u64::MAX), u64::MAX / 60);
    }

    #[test]
    fn messages_escalate_with_sessions() {
        assert!(motivational_message(0).contains("started"));
        assert_ne!(motivational_message(1), motivational_message(5));
        assert_eq!(motivational_message(100), "You're a study machine!");
    }
}
