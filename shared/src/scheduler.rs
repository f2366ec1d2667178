/// Periodic task source driving the tracker's refresh tick.
///
/// The implementation decides what a tick runs (in the browser, a closure
/// that calls back into the tracker); the tracker only decides when ticking
/// starts and stops, and owns the returned handle until it cancels it.
pub trait Scheduler {
    type Handle;

    /// Start invoking the tick every `interval_ms` until the handle is cancelled.
    fn schedule_periodic(&mut self, interval_ms: u32) -> Self::Handle;

    /// Stop the task behind `handle`. Takes ownership so a handle is cancelled at most once.
    fn cancel(&mut self, handle: Self::Handle);
}
