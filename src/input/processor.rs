//! Converts raw platform events into controller commands.
//!
//! The `InputProcessor` owns all transient input state (drag tracking) and
//! the key-binding map. It is the only thing that sits between raw host
//! events and the controller's [`execute`](crate::ScrubController::execute)
//! method, so input never moves the play head directly.

use super::drag::DragTracker;
use super::event::InputEvent;
use super::keyboard::KeyAction;
use crate::options::{KeybindingOptions, Options};
use crate::sequence::ScrubCommand;

/// Converts raw input events into [`ScrubCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In a host event callback:
/// if let Some(cmd) = input_processor.handle_event(&event) {
///     controller.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Pointer drag state.
    drag: DragTracker,
    /// Wheel `deltaY` → velocity gain.
    sensitivity: f64,
    /// Velocity added per arrow-key press.
    key_impulse: f64,
    /// Drag pixels → velocity gain.
    drag_gain: f64,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a processor using the gains and bindings in `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            drag: DragTracker::default(),
            sensitivity: options.playback.sensitivity,
            key_impulse: options.playback.key_impulse,
            drag_gain: options.playback.drag_gain,
            key_bindings: options.keybindings.clone(),
        }
    }

    /// Whether a pointer drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_armed()
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ScrubCommand> {
        let action = self.key_bindings.lookup(key)?;
        Some(match action {
            KeyAction::TogglePlayback => ScrubCommand::TogglePlayback,
            KeyAction::NudgeForward => ScrubCommand::Impulse {
                velocity: self.key_impulse,
            },
            KeyAction::NudgeBackward => ScrubCommand::Impulse {
                velocity: -self.key_impulse,
            },
        })
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<ScrubCommand> {
        match event {
            InputEvent::Wheel { delta_y } => Some(ScrubCommand::Impulse {
                velocity: delta_y * self.sensitivity,
            }),
            InputEvent::KeyDown { key } => self.handle_key_press(key),
            InputEvent::PointerDown { x } => {
                self.drag.press(*x);
                Some(ScrubCommand::Pause)
            }
            InputEvent::PointerMove { x } => {
                let dx = self.drag.motion(*x)?;
                // Dragging right scrubs backward
                (dx != 0.0).then(|| ScrubCommand::Impulse {
                    velocity: -dx * self.drag_gain,
                })
            }
            InputEvent::PointerUp => {
                self.drag.release();
                None
            }
            InputEvent::PageScroll => None,
        }
    }
}
