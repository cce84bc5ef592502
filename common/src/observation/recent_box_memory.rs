use crate::observation::bounding_box::BoundingBox;
use crate::observation::retention_policy::RetentionPolicy;
use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct MemoryEntry {
    pub bounding_box: BoundingBox,
    pub cycle: u64,
    pub observed_at: Option<DateTime<FixedOffset>>,
}

/// Boxes already confirmed as novel. Every entry was novel when inserted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RecentBoxMemory {
    entries: Vec<MemoryEntry>,
    cycle: u64,
    observed_at: Option<DateTime<FixedOffset>>,
}

impl RecentBoxMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    pub fn boxes(&self) -> impl Iterator<Item = &BoundingBox> {
        self.entries.iter().map(|entry| &entry.bounding_box)
    }

    /// Opens the next cycle and drops whatever `policy` no longer retains.
    /// Returns the number of dropped boxes.
    pub fn begin_cycle(&mut self, policy: RetentionPolicy, observed_at: DateTime<FixedOffset>) -> usize {
        self.cycle += 1;
        self.observed_at = Some(observed_at);
        let before = self.entries.len();
        match policy {
            RetentionPolicy::ResetEachCycle => self.entries.clear(),
            RetentionPolicy::Accumulate => {}
            RetentionPolicy::LastCycles(cycles) => {
                let current = self.cycle;
                self.entries.retain(|entry| entry.cycle.saturating_add(cycles) >= current);
            }
            RetentionPolicy::Within(seconds) => {
                // A window reaching past the representable range keeps everything.
                let cutoff = i64::try_from(seconds)
                    .ok()
                    .and_then(TimeDelta::try_seconds)
                    .and_then(|window| observed_at.checked_sub_signed(window));
                if let Some(cutoff) = cutoff {
                    // Entries recorded without a timestamp cannot age out.
                    self.entries.retain(|entry| entry.observed_at.map_or(true, |time| time >= cutoff));
                }
            }
        }
        before - self.entries.len()
    }

    pub fn contains_similar(&self, bounding_box: &BoundingBox, threshold: f64) -> bool {
        self.boxes().any(|known| known.is_similar(bounding_box, threshold))
    }

    pub fn remember(&mut self, bounding_box: BoundingBox) {
        self.entries.push(MemoryEntry {
            bounding_box,
            cycle: self.cycle,
            observed_at: self.observed_at,
        });
    }

    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(4 * 3600).unwrap().with_ymd_and_hms(2024, 4, 11, hour, minute, 0).unwrap()
    }

    fn remembered(memory: &mut RecentBoxMemory, x: f64) {
        memory.remember(BoundingBox::new(x, x, x + 0.1, x + 0.1));
    }

    #[test]
    fn reset_each_cycle_drops_everything() {
        let mut memory = RecentBoxMemory::new();
        memory.begin_cycle(RetentionPolicy::ResetEachCycle, at(10, 0));
        remembered(&mut memory, 0.1);
        remembered(&mut memory, 0.5);
        assert_eq!(memory.begin_cycle(RetentionPolicy::ResetEachCycle, at(10, 1)), 2);
        assert!(memory.is_empty());
    }

    #[test]
    fn accumulate_keeps_everything() {
        let mut memory = RecentBoxMemory::new();
        for minute in 0..5 {
            memory.begin_cycle(RetentionPolicy::Accumulate, at(10, minute));
            remembered(&mut memory, minute as f64 / 10.0);
        }
        assert_eq!(memory.len(), 5);
        assert_eq!(memory.cycle(), 5);
    }

    #[test]
    fn last_cycles_keeps_only_recent_cycles() {
        let policy = RetentionPolicy::LastCycles(2);
        let mut memory = RecentBoxMemory::new();
        for minute in 0..4 {
            memory.begin_cycle(policy, at(10, minute));
            remembered(&mut memory, minute as f64 / 10.0);
        }
        // Cycles 1..=4 recorded; opening cycle 5 keeps cycles 3 and 4.
        assert_eq!(memory.begin_cycle(policy, at(10, 4)), 2);
        let cycles: Vec<u64> = memory.entries().iter().map(|entry| entry.cycle).collect();
        assert_eq!(cycles, vec![3, 4]);
    }

    #[test]
    fn within_drops_boxes_older_than_window() {
        let policy = RetentionPolicy::Within(300);
        let mut memory = RecentBoxMemory::new();
        memory.begin_cycle(policy, at(10, 0));
        remembered(&mut memory, 0.1);
        memory.begin_cycle(policy, at(10, 4));
        remembered(&mut memory, 0.5);
        assert_eq!(memory.begin_cycle(policy, at(10, 5)), 0);
        assert_eq!(memory.begin_cycle(policy, at(10, 6)), 1);
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.entries()[0].bounding_box.x_min, 0.5);
    }

    #[test]
    fn oversized_window_keeps_everything() {
        for seconds in [10_000_000_000_000_000, u64::MAX] {
            let policy = RetentionPolicy::Within(seconds);
            let mut memory = RecentBoxMemory::new();
            memory.begin_cycle(policy, at(10, 0));
            remembered(&mut memory, 0.1);
            assert_eq!(memory.begin_cycle(policy, at(10, 1)), 0);
            assert_eq!(memory.len(), 1);
        }
    }

    #[test]
    fn contains_similar_uses_threshold() {
        let mut memory = RecentBoxMemory::new();
        memory.remember(BoundingBox::new(0.2, 0.2, 0.4, 0.4));
        assert!(memory.contains_similar(&BoundingBox::new(0.205, 0.2, 0.4, 0.4), 0.01));
        assert!(!memory.contains_similar(&BoundingBox::new(0.25, 0.2, 0.4, 0.4), 0.01));
    }
}
