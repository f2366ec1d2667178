pub mod clock;
pub mod controls;
pub mod laps;
pub mod scheduler;
pub mod settings;
pub mod theme;
pub mod time_format;
pub mod tracker;

pub use clock::{Clock, ManualClock};
pub use controls::Controls;
pub use laps::{Lap, LapLog};
pub use scheduler::Scheduler;
pub use settings::{DisplaySettings, HourPolicy, Precision};
pub use theme::Theme;
pub use time_format::{format_elapsed, parse_elapsed, write_elapsed};
pub use tracker::{ElapsedTimeTracker, TrackerSink};
