//! Inertial play head integrator.
//!
//! Input only adds velocity or flips autoplay; [`Playhead::step`] is the
//! single place the position advances, once per tick.

use crate::options::PlaybackOptions;

/// Continuous play head over frames `0..=last_frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct Playhead {
    /// Index of the final frame (N).
    last_frame: usize,
    /// Displayed frame, always `round(clamp(target, 0, N))`.
    current_frame: usize,
    /// Continuous position accumulating velocity.
    target_frame: f64,
    /// Frames per tick.
    velocity: f64,
    /// Autoplay mode.
    playing: bool,
}

impl Playhead {
    /// Play head at frame 0, at rest.
    #[must_use]
    pub fn new(last_frame: usize) -> Self {
        Self {
            last_frame,
            current_frame: 0,
            target_frame: 0.0,
            velocity: 0.0,
            playing: false,
        }
    }

    /// Advance one tick and return the frame to display.
    ///
    /// Autoplay adds `auto_play_speed` and wraps to exactly 0 once the end is
    /// reached. Otherwise velocity decays by `friction` before being added.
    pub fn step(&mut self, options: &PlaybackOptions) -> usize {
        let last = self.last_frame as f64;

        if self.playing {
            self.target_frame += options.auto_play_speed;
            if self.target_frame >= last {
                self.target_frame = 0.0;
            }
        } else {
            self.velocity *= options.friction;
            if self.velocity.abs() < options.rest_velocity {
                self.velocity = 0.0;
            }
            self.target_frame += self.velocity;
        }

        self.target_frame = self.target_frame.clamp(0.0, last);
        // Non-negative after the clamp, so round() is round-half-up
        self.current_frame = self.target_frame.round() as usize;
        self.current_frame
    }

    /// Add velocity and leave autoplay.
    ///
    /// An impulse that is not finite, or that would make the velocity
    /// overflow, is ignored.
    pub fn push(&mut self, velocity: f64) {
        let pushed = self.velocity + velocity;
        if !pushed.is_finite() {
            log::warn!("ignoring non-finite impulse {velocity}");
            return;
        }
        self.velocity = pushed;
        self.playing = false;
    }

    /// Flip autoplay.
    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Enter or leave autoplay.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Frame shown after the most recent tick.
    #[must_use]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Continuous position.
    #[must_use]
    pub fn target_frame(&self) -> f64 {
        self.target_frame
    }

    /// Current velocity in frames per tick.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Whether autoplay is active.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Index of the final frame (N).
    #[must_use]
    pub fn last_frame(&self) -> usize {
        self.last_frame
    }

    /// Whether the play head is at rest (not playing, no velocity).
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.playing && self.velocity == 0.0
    }
}
