mod clock;
mod cue;
mod engine;
mod phase;

pub use clock::{Anchor, Clock, ManualClock, SystemClock, WallClock};
pub use cue::{crossed_thresholds, DEFAULT_CUE_THRESHOLDS};
pub use engine::{
    TimerEngine, TimerState, TimerView, DEFAULT_BREAK_SECS, DEFAULT_STUDY_SECS, SECS_PER_MINUTE,
};
pub use phase::{BreakPolicy, Phase};
