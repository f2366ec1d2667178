use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based, increasing for the lifetime of the log until it is cleared.
    pub index: u32,
    /// Total elapsed time when the lap was recorded.
    pub elapsed_ms: u64,
    /// Time since the previous lap (since zero for the first).
    pub split_ms: u64,
}

/// Recorded laps, kept most recent first for display.
#[derive(Debug, Clone)]
pub struct LapLog {
    recent_first: Vec<Lap>,
    next_index: u32,
}

impl Default for LapLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LapLog {
    pub fn new() -> Self {
        Self {
            recent_first: Vec::new(),
            next_index: 1,
        }
    }

    pub fn record(&mut self, elapsed_ms: u64) -> Lap {
        let previous = self.recent_first.first().map_or(0, |lap| lap.elapsed_ms);
        let lap = Lap {
            index: self.next_index,
            elapsed_ms,
            split_ms: elapsed_ms.saturating_sub(previous),
        };
        self.recent_first.insert(0, lap);
        self.next_index += 1;
        lap
    }

    /// Drop every lap and restart numbering at 1.
    pub fn clear(&mut self) {
        self.recent_first.clear();
        self.next_index = 1;
    }

    pub fn as_slice(&self) -> &[Lap] {
        &self.recent_first
    }

    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    pub fn len(&self) -> usize {
        self.recent_first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent_first.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_recent_lap_comes_first() {
        let mut log = LapLog::new();
        log.record(1_000);
        log.record(2_500);
        log.record(4_000);
        let indices: Vec<u32> = log.as_slice().iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![3, 2, 1]);
    }

    #[test]
    fn splits_measure_time_between_laps() {
        let mut log = LapLog::new();
        assert_eq!(log.record(1_000).split_ms, 1_000);
        assert_eq!(log.record(2_500).split_ms, 1_500);
        assert_eq!(log.record(2_500).split_ms, 0);
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut log = LapLog::new();
        log.record(10);
        log.record(20);
        assert_eq!(log.next_index(), 3);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.next_index(), 1);
        assert_eq!(log.record(30).index, 1);
        assert_eq!(log.len(), 1);
    }
}
