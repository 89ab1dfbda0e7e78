use serde::{Deserialize, Serialize};

/// Controller actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_playback = " "
/// nudge_forward = "ArrowRight"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Start or stop autoplay.
    TogglePlayback,
    /// Push the play head forward by one key impulse.
    NudgeForward,
    /// Push the play head backward by one key impulse.
    NudgeBackward,
}
