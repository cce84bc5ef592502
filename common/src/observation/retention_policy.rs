use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// How long a confirmed box keeps suppressing later detections.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    /// Memory is emptied at the start of every cycle; only duplicates inside
    /// one detection batch are suppressed.
    ResetEachCycle,
    #[default]
    Accumulate,
    /// Keeps boxes confirmed during the last `n` completed cycles.
    LastCycles(u64),
    Within(u64),
}

impl Display for RetentionPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RetentionPolicy::ResetEachCycle => write!(f, "reset each cycle"),
            RetentionPolicy::Accumulate => write!(f, "accumulate"),
            RetentionPolicy::LastCycles(cycles) => write!(f, "last {cycles} cycles"),
            RetentionPolicy::Within(seconds) => write!(f, "within {seconds} seconds"),
        }
    }
}
