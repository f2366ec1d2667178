use std::rc::Rc;

use gloo_timers::callback::Interval;
use stopwatch_shared::Scheduler;

/// `setInterval`-backed tick source. Every scheduled handle runs the same
/// `on_tick` callback; dropping or cancelling the handle clears the interval.
pub struct IntervalScheduler {
    on_tick: Rc<dyn Fn()>,
}

impl IntervalScheduler {
    pub fn new(on_tick: impl Fn() + 'static) -> Self {
        Self {
            on_tick: Rc::new(on_tick),
        }
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = Interval;

    fn schedule_periodic(&mut self, interval_ms: u32) -> Interval {
        let on_tick = Rc::clone(&self.on_tick);
        Interval::new(interval_ms, move || on_tick())
    }

    fn cancel(&mut self, handle: Interval) {
        let _ = handle.cancel();
    }
}
