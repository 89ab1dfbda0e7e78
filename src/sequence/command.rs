//! The controller's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by the wheel, a key, a
//! pointer gesture or a programmatic call, is represented as a
//! `ScrubCommand`. Consumers construct commands and pass them to
//! [`ScrubController::execute`](super::ScrubController::execute).

/// A single state change requested by input.
///
/// Commands only touch velocity and the autoplay flag; the play head
/// position itself moves exclusively inside the per-tick integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrubCommand {
    /// Add to the play head velocity and cancel autoplay.
    Impulse {
        /// Frames per tick to add (negative scrubs backward).
        velocity: f64,
    },
    /// Flip autoplay on or off.
    TogglePlayback,
    /// Cancel autoplay without adding velocity (drag start).
    Pause,
}
