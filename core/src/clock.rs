use web_time::{Duration, Instant};

/// Time allowed for a round before it is lost.
pub const ROUND_DURATION: Duration = Duration::from_secs(240);

/// Countdown for a round. Starts on the first reveal, stops when the round
/// ends. The `*_at` methods take the current instant so callers own the clock.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundClock {
    duration: Duration,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl RoundClock {
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
            stopped_at: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.started_at.is_none() {
            log::debug!("Round clock started, {:?} to go", self.duration);
            self.started_at = Some(now);
        }
    }

    pub fn stop_at(&mut self, now: Instant) {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.stopped_at = None;
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .stopped_at
                .unwrap_or(now)
                .saturating_duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.duration.saturating_sub(self.elapsed_at(now))
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.is_started() && self.remaining_at(now).is_zero()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self::new(ROUND_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_clock_never_expires() {
        let clock = RoundClock::new(Duration::from_secs(1));
        let later = Instant::now() + Duration::from_secs(10);

        assert!(!clock.is_expired_at(later));
        assert_eq!(clock.remaining_at(later), Duration::from_secs(1));
    }

    #[test]
    fn counts_down_once_started() {
        let start = Instant::now();
        let mut clock = RoundClock::new(Duration::from_secs(240));

        clock.start_at(start);
        // a second start does not move the origin
        clock.start_at(start + Duration::from_secs(5));

        assert_eq!(
            clock.remaining_at(start + Duration::from_secs(40)),
            Duration::from_secs(200)
        );
        assert!(!clock.is_expired_at(start + Duration::from_secs(239)));
        assert!(clock.is_expired_at(start + Duration::from_secs(240)));
        assert_eq!(
            clock.remaining_at(start + Duration::from_secs(999)),
            Duration::ZERO
        );
    }

    #[test]
    fn stopped_clock_freezes() {
        let start = Instant::now();
        let mut clock = RoundClock::default();

        clock.start_at(start);
        clock.stop_at(start + Duration::from_secs(30));

        assert!(!clock.is_running());
        assert_eq!(
            clock.elapsed_at(start + Duration::from_secs(500)),
            Duration::from_secs(30)
        );
        assert!(!clock.is_expired_at(start + Duration::from_secs(500)));
    }

    #[test]
    fn reset_returns_to_idle() {
        let start = Instant::now();
        let mut clock = RoundClock::default();

        clock.start_at(start);
        clock.reset();

        assert!(!clock.is_started());
        assert_eq!(clock.remaining_at(start), ROUND_DURATION);
    }
}
