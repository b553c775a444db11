//! Time-based presentation helpers: count-up counters, rotating roles and the
//! scroll-triggered reveal. All functions take times in seconds from the UI clock.

use std::time::Duration;

/// Cubic ease-out on `t` in `[0, 1]`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Value of a counter that climbs linearly from 0 to `target` over `duration` seconds.
///
/// Rounded down, so the target is shown only once the duration has fully elapsed.
pub fn count_up(target: u32, elapsed: f64, duration: f64) -> u32 {
    (progress(elapsed, duration) * f64::from(target)).floor() as u32
}

/// Index of the role to show after `elapsed` seconds, `None` when there are no roles.
pub fn role_index(elapsed: f64, period: Duration, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let period = period.as_secs_f64();
    if period <= 0.0 || elapsed <= 0.0 {
        return Some(0);
    }
    Some((elapsed / period).floor() as usize % len)
}

/// One-shot fade-in that starts the first time a section scrolls into view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reveal {
    started_at: Option<f64>,
}

impl Reveal {
    /// Starts the reveal at `now` unless it already started.
    pub fn trigger(&mut self, now: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.started_at.is_some()
    }

    /// Seconds since the reveal started, 0 before it did.
    pub fn elapsed(&self, now: f64) -> f64 {
        self.started_at.map_or(0.0, |start| (now - start).max(0.0))
    }

    /// Eased opacity in `[0, 1]` for a reveal lasting `duration` seconds.
    pub fn progress(&self, now: f64, duration: f64) -> f32 {
        if !self.is_triggered() {
            return 0.0;
        }
        ease_out_cubic(progress(self.elapsed(now), duration) as f32)
    }
}
