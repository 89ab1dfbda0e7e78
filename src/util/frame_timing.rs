//! Tick pacing for hosts that drive the controller from their own loop.

use web_time::{Duration, Instant};

/// Tick timing with FPS measurement and optional rate limiting.
///
/// The browser paces ticks with `requestAnimationFrame`; native hosts use
/// this to hold the controller at a display-like rate.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target ticks per second (0 = unlimited).
    target_fps: u32,
    /// Minimum tick duration based on target FPS.
    min_tick: Duration,
    /// Last tick timestamp.
    last_tick: Instant,
    /// Smoothed FPS (exponential moving average).
    smoothed_fps: f32,
    /// Weight of the newest sample, 0.0-1.0.
    smoothing: f32,
    /// Ticks completed.
    ticks: u64,
}

impl FrameTiming {
    /// Create a timer with the given tick rate target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_tick = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_tick,
            last_tick: Instant::now(),
            smoothed_fps: if target_fps > 0 { target_fps as f32 } else { 60.0 },
            smoothing: 0.05,
            ticks: 0,
        }
    }

    /// Whether enough time has passed since the last tick.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.min_tick.saturating_sub(self.last_tick.elapsed())
    }

    /// Record a completed tick.
    pub fn end_tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.ticks += 1;

        if elapsed > 0.0 {
            let instant_fps = 1.0 / elapsed;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Smoothed ticks per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Ticks recorded so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Configured target rate (0 = unlimited).
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_ticks() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_tick());
        assert_eq!(timing.remaining(), Duration::ZERO);
    }

    #[test]
    fn limited_waits_after_a_tick() {
        let mut timing = FrameTiming::new(1);
        timing.end_tick();
        assert!(!timing.should_tick());
        assert!(timing.remaining() <= Duration::from_secs(1));
        assert_eq!(timing.ticks(), 1);
    }
}
