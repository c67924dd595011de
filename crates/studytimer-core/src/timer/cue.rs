/// Default warning cue: one minute left.
pub const DEFAULT_CUE_THRESHOLDS: [u64; 1] = [60];

/// Thresholds the countdown passed when moving from `prev` to `next`.
///
/// A threshold counts as crossed when the countdown was above it and is now
/// at or below it. Zero is the completion cue.
pub fn crossed_thresholds(prev_secs: u64, next_secs: u64, thresholds: &[u64]) -> Vec<u64> {
    let mut crossed: Vec<u64> = thresholds
        .iter()
        .copied()
        .filter(|&t| prev_secs > t && next_secs <= t)
        .collect();
    crossed.sort_unstable_by(|a, b| b.cmp(a));
    crossed.dedup();
    crossed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_on_the_way_down() {
        assert_eq!(crossed_thresholds(61, 60, &[60]), vec![60]);
        assert!(crossed_thresholds(60, 59, &[60]).is_empty());
        assert!(crossed_thresholds(62, 61, &[60]).is_empty());
    }

    #[test]
    fn large_jumps_report_every_threshold_in_order() {
        assert_eq!(crossed_thresholds(300, 0, &[0, 60, 120, 60]), vec![120, 60, 0]);
    }

    #[test]
    fn upward_moves_never_fire() {
        assert!(crossed_thresholds(10, 1500, &[60, 0]).is_empty());
    }
}
