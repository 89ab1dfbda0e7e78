use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Play head tuning: inertia, input gains and autoplay rate.
pub struct PlaybackOptions {
    /// Velocity multiplier applied once per tick (0 < friction < 1).
    #[schemars(title = "Friction", range(min = 0.01, max = 0.99), extend("step" = 0.01))]
    pub friction: f64,
    /// Wheel `deltaY` to velocity gain.
    #[schemars(title = "Wheel Sensitivity", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub sensitivity: f64,
    /// Frames advanced per tick while autoplaying.
    #[schemars(title = "Autoplay Speed", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub auto_play_speed: f64,
    /// Velocity added by one arrow-key press.
    #[schemars(title = "Key Impulse", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub key_impulse: f64,
    /// Horizontal drag pixels to velocity gain.
    #[schemars(title = "Drag Gain", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub drag_gain: f64,
    /// Velocities smaller than this snap to zero after decay. Zero keeps
    /// decaying forever.
    #[schemars(skip)]
    pub rest_velocity: f64,
    /// Start in autoplay mode.
    #[schemars(title = "Autoplay On Start")]
    pub autoplay: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            friction: 0.10,
            sensitivity: 0.5,
            auto_play_speed: 1.0,
            key_impulse: 15.0,
            drag_gain: 0.5,
            rest_velocity: 1e-3,
            autoplay: false,
        }
    }
}
