//! Input handling: event types, drag tracking, and the input processor
//! that converts raw host events into controller commands.

/// Pointer drag state.
mod drag;
/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Converts raw events into controller commands.
pub mod processor;

pub use event::InputEvent;
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
