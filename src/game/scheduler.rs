use std::time::{Duration, Instant};

/// Rate limiter between the host's frame callback and the simulation.
///
/// The host may poll as often as it likes; `poll` answers true at most once
/// per interval. A stopped scheduler never fires, so stopping it is the only
/// thing pause and menu transitions have to do.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    last_tick: Option<Instant>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking, measuring the first interval from `now`
    pub fn start(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    pub fn stop(&mut self) {
        self.last_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Returns true when a tick is due and moves the reference to `now`
    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        let Some(last) = self.last_tick else {
            return false;
        };

        if now.saturating_duration_since(last) >= interval {
            self.last_tick = Some(now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_stopped_never_fires() {
        let mut scheduler = TickScheduler::new();
        let now = Instant::now();
        assert!(!scheduler.is_running());
        assert!(!scheduler.poll(now + Duration::from_secs(10), INTERVAL));
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut scheduler = TickScheduler::new();
        let t0 = Instant::now();
        scheduler.start(t0);

        assert!(!scheduler.poll(t0 + Duration::from_millis(16), INTERVAL));
        assert!(!scheduler.poll(t0 + Duration::from_millis(99), INTERVAL));
        assert!(scheduler.poll(t0 + Duration::from_millis(100), INTERVAL));
        assert!(!scheduler.poll(t0 + Duration::from_millis(116), INTERVAL));
        assert!(scheduler.poll(t0 + Duration::from_millis(205), INTERVAL));
    }

    #[test]
    fn test_long_gap_yields_single_tick() {
        let mut scheduler = TickScheduler::new();
        let t0 = Instant::now();
        scheduler.start(t0);

        let late = t0 + Duration::from_secs(5);
        assert!(scheduler.poll(late, INTERVAL));
        assert!(!scheduler.poll(late, INTERVAL));
    }

    #[test]
    fn test_restart_resets_reference() {
        let mut scheduler = TickScheduler::new();
        let t0 = Instant::now();
        scheduler.start(t0);
        scheduler.stop();
        assert!(!scheduler.poll(t0 + Duration::from_secs(1), INTERVAL));

        let resumed = t0 + Duration::from_secs(2);
        scheduler.start(resumed);
        let early = resumed + Duration::from_millis(50);
        let due = resumed + Duration::from_millis(100);
        assert!(!scheduler.poll(early, INTERVAL));
        assert!(scheduler.poll(due, INTERVAL));
    }
}
