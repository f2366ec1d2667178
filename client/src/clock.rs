use stopwatch_shared::Clock;

/// Reads `performance.now()` (monotonic, page-load origin). Falls back to
/// `Date.now()` when the Performance API is missing.
pub struct BrowserClock {
    performance: Option<web_sys::Performance>,
}

impl BrowserClock {
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|window| window.performance());
        if performance.is_none() {
            web_sys::console::warn_1(
                &"performance.now() unavailable, falling back to Date.now()".into(),
            );
        }
        Self { performance }
    }
}

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        let now = match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        };
        now.max(0.0) as u64
    }
}
