use serde::{Deserialize, Serialize};

/// Tick interval used when the display shows milliseconds.
pub const MILLIS_TICK_INTERVAL_MS: u32 = 10;
/// Tick interval used when the display shows whole seconds.
pub const SECONDS_TICK_INTERVAL_MS: u32 = 1_000;

/// How much of the elapsed time the display shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// `HH:MM:SS.mmm`
    #[default]
    Millis,
    /// `HH:MM:SS`, milliseconds truncated.
    Seconds,
}

/// What happens to the hour field once a run passes 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourPolicy {
    /// Hours keep counting (`25:00:00`, `100:00:00`). Formatting round-trips.
    #[default]
    Unbounded,
    /// Hours wrap modulo 24, like a wall clock.
    Wrap24,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub precision: Precision,
    pub hours: HourPolicy,
    /// Explicit refresh interval. `None` derives it from `precision`.
    pub tick_interval_ms: Option<u32>,
}

impl DisplaySettings {
    /// Refresh interval the tracker schedules its tick at. Never zero.
    pub fn tick_interval(&self) -> u32 {
        match self.tick_interval_ms {
            Some(ms) => ms.max(1),
            None => match self.precision {
                Precision::Millis => MILLIS_TICK_INTERVAL_MS,
                Precision::Seconds => SECONDS_TICK_INTERVAL_MS,
            },
        }
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_hours(mut self, hours: HourPolicy) -> Self {
        self.hours = hours;
        self
    }
}
