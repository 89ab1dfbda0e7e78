//! Frame sequence: catalog, play head, base path resolution and the
//! controller that drives them.

/// Frame identifiers and the look-ahead window.
pub mod catalog;
/// Commands produced by input.
pub mod command;
mod controller;
/// Inertial play head.
pub mod playhead;
mod resolver;

pub use catalog::{FrameCatalog, FrameId};
pub use command::ScrubCommand;
pub use controller::ScrubController;
pub use playhead::Playhead;
pub use resolver::resolve_base_path;
