use serde::{Deserialize, Serialize};

/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`ScrubCommand`](crate::sequence::ScrubCommand)
/// values. Serde uses an internally tagged form so replay scripts read
/// naturally:
///
/// ```json
/// { "type": "wheel", "delta_y": 100.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse wheel / trackpad scroll.
    Wheel {
        /// Vertical delta in pixels (positive = scroll down).
        delta_y: f64,
    },
    /// A key was pressed.
    KeyDown {
        /// DOM `KeyboardEvent.key` value (`" "`, `"ArrowRight"`, ...).
        key: String,
    },
    /// Primary pointer pressed on the sequence surface.
    PointerDown {
        /// Horizontal position in CSS pixels.
        x: f64,
    },
    /// Pointer moved anywhere in the window.
    PointerMove {
        /// Horizontal position in CSS pixels.
        x: f64,
    },
    /// Primary pointer released anywhere in the window.
    PointerUp,
    /// The page itself tried to scroll.
    PageScroll,
}

impl InputEvent {
    /// Whether the host should suppress the event's default action
    /// (native page scrolling) when the controller is attached.
    #[must_use]
    pub fn claims_default(&self) -> bool {
        matches!(self, Self::Wheel { .. } | Self::PageScroll)
    }
}
