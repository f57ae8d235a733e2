use std::time::{Duration, Instant};

/// Default accrual interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Shortest interval accepted from the command line
pub const MIN_TICK_MS: u64 = 50;

/// Get tick duration, bounded below by [`MIN_TICK_MS`]
pub fn tick_duration(tick_ms: u64) -> Duration {
    Duration::from_millis(tick_ms.max(MIN_TICK_MS))
}

/// Periodic schedule for the accrual tick.
///
/// Subscribing and unsubscribing are idempotent, so there is never more than
/// one pending tick no matter how often the owning view (re)attaches.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[cfg(test)]
    pub fn is_subscribed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start ticking. Returns `true` only if this call started the schedule.
    pub fn subscribe(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Stop ticking. Returns `true` only if a schedule was running.
    pub fn unsubscribe(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// True when a tick is due; at most one tick per call, with any missed
    /// intervals collapsed into it
    pub fn poll_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    /// How long the event loop may block before the next tick
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => self.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(1000), ms(1000));
        assert_eq!(tick_duration(1), ms(MIN_TICK_MS));
    }

    #[test]
    fn test_not_due_until_subscribed() {
        let start = Instant::now();
        let mut ticker = Ticker::new(ms(1000));
        assert!(!ticker.poll_due(start + ms(5000)));
        assert_eq!(ticker.until_next(start), ms(1000));
    }

    #[test]
    fn test_subscribe_is_idempotent() {
        let start = Instant::now();
        let mut ticker = Ticker::new(ms(1000));

        assert!(ticker.subscribe(start));
        assert!(!ticker.subscribe(start + ms(500)));
        // The second call did not push the schedule back
        assert!(ticker.poll_due(start + ms(1000)));
        assert!(!ticker.poll_due(start + ms(1000)));
    }

    #[test]
    fn test_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(ms(1000));
        ticker.subscribe(start);

        assert!(!ticker.poll_due(start + ms(999)));
        assert!(ticker.poll_due(start + ms(1000)));
        assert!(!ticker.poll_due(start + ms(1500)));
        assert!(ticker.poll_due(start + ms(2000)));
        assert_eq!(ticker.until_next(start + ms(2250)), ms(750));
    }

    #[test]
    fn test_missed_intervals_collapse() {
        let start = Instant::now();
        let mut ticker = Ticker::new(ms(1000));
        ticker.subscribe(start);

        assert!(ticker.poll_due(start + ms(10_300)));
        assert!(!ticker.poll_due(start + ms(10_400)));
        assert!(ticker.poll_due(start + ms(11_300)));
    }

    #[test]
    fn test_unsubscribe_stops_and_is_idempotent() {
        let start = Instant::now();
        let mut ticker = Ticker::new(ms(1000));
        ticker.subscribe(start);

        assert!(ticker.unsubscribe());
        assert!(!ticker.unsubscribe());
        assert!(!ticker.is_subscribed());
        assert!(!ticker.poll_due(start + ms(3000)));

        assert!(ticker.subscribe(start + ms(3000)));
        assert!(!ticker.poll_due(start + ms(3500)));
        assert!(ticker.poll_due(start + ms(4000)));
    }
}
