//! # Once-per-Second Animation Clock
//!
//! Decides, for a given wall-clock reading, whether the face must be redrawn
//! now or how long the loop may block before looking again.
//!
//! The displayed second is the wall clock *rounded* to the nearest second.
//! Waits aim for the next whole-second boundary, so the loop wakes just
//! after it and a slightly early wake still rounds to the new second. No
//! second value is drawn twice unless the surface is invalidated.

use chrono::Utc;
use std::time::Duration;

/// Source of wall-clock time as fractional Unix seconds.
pub trait WallClock {
    fn now(&self) -> f64;
}

/// The real system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> f64 {
        let now = Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
    }
}

/// What the loop should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Draw the face for this Unix second.
    Redraw(i64),
    /// Nothing to draw; block on input for at most this long.
    Wait(Duration),
}

/// Second displayed for a wall-clock reading.
pub fn displayed_second(now: f64) -> i64 {
    now.round() as i64
}

/// Time left until the next whole second, never less than 1 ms.
pub fn wait_until_next_second(now: f64) -> Duration {
    let elapsed_ms = (((now - now.floor()) * 1000.0) as u64).min(1000);
    Duration::from_millis((1000 - elapsed_ms).max(1))
}

#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
    last_rendered: Option<i64>,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraw if the displayed second changed, otherwise wait.
    ///
    /// A `Redraw` is recorded as rendered immediately.
    pub fn poll(&mut self, now: f64) -> Tick {
        let second = displayed_second(now);
        if self.last_rendered != Some(second) {
            self.last_rendered = Some(second);
            Tick::Redraw(second)
        } else {
            Tick::Wait(wait_until_next_second(now))
        }
    }

    /// Force the next poll to redraw, e.g. after the surface was resized.
    pub fn invalidate(&mut self) {
        self.last_rendered = None;
    }

    pub fn last_rendered(&self) -> Option<i64> {
        self.last_rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_always_redraws() {
        let mut clock = AnimationClock::new();
        assert_eq!(clock.poll(100.2), Tick::Redraw(100));
        assert_eq!(clock.last_rendered(), Some(100));
    }

    #[test]
    fn same_second_waits_for_the_boundary() {
        let mut clock = AnimationClock::new();
        clock.poll(100.25);
        assert_eq!(clock.poll(100.25), Tick::Wait(Duration::from_millis(750)));
    }

    #[test]
    fn displayed_second_rounds_to_nearest() {
        assert_eq!(displayed_second(99.49), 99);
        assert_eq!(displayed_second(99.5), 100);
        assert_eq!(displayed_second(99.999), 100);
    }

    #[test]
    fn wait_is_at_least_one_millisecond() {
        assert_eq!(wait_until_next_second(5.9999), Duration::from_millis(1));
        assert_eq!(wait_until_next_second(5.0), Duration::from_millis(1000));
    }

    #[test]
    fn invalidate_forces_a_redraw_of_the_same_second() {
        let mut clock = AnimationClock::new();
        clock.poll(7.0);
        clock.invalidate();
        assert_eq!(clock.poll(7.1), Tick::Redraw(7));
    }

    #[test]
    fn system_clock_is_near_chrono_now() {
        let reading = SystemClock.now();
        let reference = Utc::now().timestamp() as f64;
        assert!((reading - reference).abs() < 2.0);
    }
}
