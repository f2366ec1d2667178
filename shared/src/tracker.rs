use crate::clock::Clock;
use crate::controls::Controls;
use crate::laps::{Lap, LapLog};
use crate::scheduler::Scheduler;
use crate::settings::DisplaySettings;
use crate::time_format::{format_elapsed, write_elapsed};

/// Receives everything the view needs to stay consistent with the tracker.
pub trait TrackerSink {
    /// Formatted elapsed time. Called on every tick and every state change.
    fn show_elapsed(&mut self, formatted: &str);
    /// Recorded laps, most recent first.
    fn show_laps(&mut self, laps: &[Lap]);
    fn show_controls(&mut self, controls: Controls);
}

/// Start/stop/reset/lap state machine behind the stopwatch display.
///
/// Elapsed time is `banked + (now - resumed_at)` while running and exactly
/// `accumulated` while stopped; `start` banks the previous total so a pause
/// never loses time. The periodic tick handle exists iff the tracker is
/// running.
pub struct ElapsedTimeTracker<C: Clock, S: Scheduler, V: TrackerSink> {
    clock: C,
    scheduler: S,
    sink: V,
    settings: DisplaySettings,
    running: bool,
    resumed_at_ms: u64,
    banked_ms: u64,
    accumulated_ms: u64,
    laps: LapLog,
    tick_handle: Option<S::Handle>,
    display_buf: String,
}

impl<C: Clock, S: Scheduler, V: TrackerSink> ElapsedTimeTracker<C, S, V> {
    /// Fresh tracker: stopped, zero elapsed, no laps. Nothing is rendered
    /// until [`render`](Self::render) or the first operation.
    pub fn new(clock: C, scheduler: S, sink: V, settings: DisplaySettings) -> Self {
        Self {
            clock,
            scheduler,
            sink,
            settings,
            running: false,
            resumed_at_ms: 0,
            banked_ms: 0,
            accumulated_ms: 0,
            laps: LapLog::new(),
            tick_handle: None,
            display_buf: String::with_capacity(12),
        }
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.resumed_at_ms = self.clock.now_ms();
        self.banked_ms = self.accumulated_ms;
        self.running = true;
        self.schedule_tick();
        self.push_elapsed();
        self.push_controls();
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.refresh();
        self.cancel_tick();
        self.running = false;
        self.push_elapsed();
        self.push_controls();
    }

    /// Back to zero with no laps. Stops first if running; safe to call any time.
    pub fn reset(&mut self) {
        if self.running {
            self.cancel_tick();
            self.running = false;
        }
        self.resumed_at_ms = 0;
        self.banked_ms = 0;
        self.accumulated_ms = 0;
        self.laps.clear();
        self.render();
    }

    /// Record the current elapsed time as a lap. `None` when stopped.
    pub fn record_lap(&mut self) -> Option<Lap> {
        if !self.running {
            return None;
        }
        self.refresh();
        let lap = self.laps.record(self.accumulated_ms);
        self.push_elapsed();
        self.sink.show_laps(self.laps.as_slice());
        Some(lap)
    }

    /// Periodic refresh. Stray ticks delivered after a stop are ignored.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.refresh();
        self.push_elapsed();
    }

    /// Swap display settings. A running tracker moves its tick to the new
    /// interval, cancelling the old one first.
    pub fn apply_settings(&mut self, settings: DisplaySettings) {
        let interval_changed = settings.tick_interval() != self.settings.tick_interval();
        self.settings = settings;
        if self.running && interval_changed {
            self.cancel_tick();
            self.schedule_tick();
        }
        if self.running {
            self.refresh();
        }
        self.push_elapsed();
    }

    /// Push elapsed time, laps and controls to the sink.
    pub fn render(&mut self) {
        self.push_elapsed();
        self.sink.show_laps(self.laps.as_slice());
        self.push_controls();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time as of the last tick or state change.
    pub fn elapsed_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Elapsed time read from the clock right now, without touching state.
    pub fn live_elapsed_ms(&self) -> u64 {
        if self.running {
            self.running_total(self.clock.now_ms())
        } else {
            self.accumulated_ms
        }
    }

    /// Laps, most recent first.
    pub fn laps(&self) -> &[Lap] {
        self.laps.as_slice()
    }

    pub fn controls(&self) -> Controls {
        Controls::derive(self.running, self.accumulated_ms)
    }

    pub fn settings(&self) -> DisplaySettings {
        self.settings
    }

    pub fn formatted(&self) -> String {
        format_elapsed(self.accumulated_ms, &self.settings)
    }

    pub fn sink(&self) -> &V {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut V {
        &mut self.sink
    }

    fn running_total(&self, now_ms: u64) -> u64 {
        self.banked_ms
            .saturating_add(now_ms.saturating_sub(self.resumed_at_ms))
    }

    fn refresh(&mut self) {
        self.accumulated_ms = self.running_total(self.clock.now_ms());
    }

    fn schedule_tick(&mut self) {
        debug_assert!(self.tick_handle.is_none());
        let handle = self.scheduler.schedule_periodic(self.settings.tick_interval());
        self.tick_handle = Some(handle);
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn push_elapsed(&mut self) {
        write_elapsed(&mut self.display_buf, self.accumulated_ms, &self.settings);
        self.sink.show_elapsed(&self.display_buf);
    }

    fn push_controls(&mut self) {
        let controls = self.controls();
        self.sink.show_controls(controls);
    }
}

impl<C: Clock, S: Scheduler, V: TrackerSink> Drop for ElapsedTimeTracker<C, S, V> {
    fn drop(&mut self) {
        self.cancel_tick();
    }
}
