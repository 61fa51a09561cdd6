use std::time::{Duration, Instant};

/// Most ticks handed out for one frame. Anything beyond is dropped so a long
/// stall doesn't turn into a burst of catch-up steps.
const MAX_CATCH_UP_TICKS: u32 = 5;

/// Fixed-rate simulation clock.
///
/// Callback-driven frontends feed it real frame durations through
/// [`TickClock::advance`]; a self-driven loop blocks on [`TickClock::wait_for_next_tick`]
/// and feeds the measured wait back into `advance`.
/// Either way the simulation only sees whole ticks.
#[derive(Debug, Clone)]
pub struct TickClock {
    tick_duration: Duration,
    accumulator: Duration,
    last_tick: Option<Instant>,
}

impl TickClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_duration: Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64),
            accumulator: Duration::ZERO,
            last_tick: None,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Add `elapsed` real time and return how many ticks are now due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let due = self.accumulator.as_nanos() / self.tick_duration.as_nanos().max(1);
        if due > MAX_CATCH_UP_TICKS as u128 {
            self.accumulator = Duration::ZERO;
            return MAX_CATCH_UP_TICKS;
        }

        let due = due as u32;
        self.accumulator -= self.tick_duration * due;
        due
    }

    /// Sleep until one tick duration has passed since the previous call.
    /// Returns the real time since that call, one tick duration on the first.
    pub fn wait_for_next_tick(&mut self) -> Duration {
        let elapsed = match self.last_tick {
            Some(last) => {
                let next = last + self.tick_duration;
                let now = Instant::now();
                if next > now {
                    std::thread::sleep(next - now);
                }
                last.elapsed()
            }
            None => self.tick_duration,
        };
        self.last_tick = Some(Instant::now());
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = TickClock::new(60);
        let half = clock.tick_duration() / 2;

        assert_eq!(clock.advance(half), 0);
        assert_eq!(clock.advance(half + Duration::from_micros(10)), 1);
        assert_eq!(clock.advance(half), 0);
    }

    #[test]
    fn two_ticks_in_a_long_frame() {
        let mut clock = TickClock::new(60);
        let elapsed = clock.tick_duration() * 2 + Duration::from_micros(10);
        assert_eq!(clock.advance(elapsed), 2);
    }

    #[test]
    fn catch_up_is_capped() {
        let mut clock = TickClock::new(60);
        assert_eq!(clock.advance(Duration::from_secs(10)), MAX_CATCH_UP_TICKS);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn year_long_stall_is_capped_and_forgotten() {
        let mut clock = TickClock::new(60);
        assert_eq!(clock.advance(Duration::from_secs(365 * 24 * 3600)), MAX_CATCH_UP_TICKS);
        assert_eq!(clock.advance(clock.tick_duration()), 1);
    }

    #[test]
    fn remainder_carries_into_next_frame() {
        let mut clock = TickClock::new(100);
        let tick = clock.tick_duration();

        assert_eq!(clock.advance(tick * 3 + tick / 2), 3);
        assert_eq!(clock.advance(tick / 2), 1);
    }

    #[test]
    fn blocking_wait_reports_at_least_one_tick() {
        let mut clock = TickClock::new(1000);
        let tick = clock.tick_duration();

        assert_eq!(clock.wait_for_next_tick(), tick);
        assert!(clock.wait_for_next_tick() >= tick);
    }
}
