// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Inertial image-sequence scrubbing with windowed frame preloading.
//!
//! Scrubview turns a numbered sequence of still images (a turntable or
//! product spin) into a scrubbable animation. Wheel, keyboard and pointer
//! drag input add velocity to a play head that decays under friction each
//! tick; an optional autoplay mode loops through the sequence. Frames are
//! loaded through a pluggable [`loader::FrameLoader`], cached forever and
//! preloaded a few frames ahead of the play head.
//!
//! # Key entry points
//!
//! - [`ScrubController`] - init, per-tick update and input handling
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`loader::Preloader`] - frame cache, deduplicated loads, look-ahead
//!   window
//! - [`sink::FrameSink`] - where the current frame is shown
//!
//! # Architecture
//!
//! Everything runs on one thread. The host drives ticks (a
//! `requestAnimationFrame` loop in the browser, a timed loop in the CLI)
//! and an executor for background preloads, reached through
//! [`runtime::TaskSpawner`]. Input events become [`sequence::ScrubCommand`]s
//! that only touch velocity and the autoplay flag; the position advances
//! exclusively inside [`ScrubController::tick`].

pub mod error;
pub mod input;
pub mod loader;
pub mod options;
pub mod runtime;
pub mod sequence;
pub mod sink;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use error::ScrubError;
pub use sequence::ScrubController;
