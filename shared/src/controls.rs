/// Which buttons are enabled. Derived from tracker state on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub lap: bool,
    pub reset: bool,
}

impl Controls {
    pub fn derive(running: bool, elapsed_ms: u64) -> Self {
        Self {
            start: !running,
            stop: running,
            lap: running,
            // Must stay enabled while paused with time on the clock.
            reset: running || elapsed_ms != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_only_allows_start() {
        assert_eq!(
            Controls::derive(false, 0),
            Controls {
                start: true,
                stop: false,
                lap: false,
                reset: false,
            }
        );
    }

    #[test]
    fn running_allows_everything_but_start() {
        let controls = Controls::derive(true, 0);
        assert!(!controls.start);
        assert!(controls.stop);
        assert!(controls.lap);
        assert!(controls.reset);
    }

    #[test]
    fn paused_with_time_keeps_reset_enabled() {
        let controls = Controls::derive(false, 5_000);
        assert!(controls.start);
        assert!(!controls.stop);
        assert!(!controls.lap);
        assert!(controls.reset);
    }
}
