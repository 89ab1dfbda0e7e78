//! Crate-level error types.

use std::fmt;

/// A single frame failed to load.
///
/// Cloneable so one failed load can be reported to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// URL (frame identifier) that was requested.
    pub url: String,
    /// Human-readable cause reported by the loader.
    pub reason: String,
}

impl LoadFailure {
    /// Failure for `url` with the given cause.
    pub fn new(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {}: {}", self.url, self.reason)
    }
}

impl std::error::Error for LoadFailure {}

/// Errors produced by the scrubview crate.
#[derive(Debug)]
pub enum ScrubError {
    /// None of the candidate base paths served the probe frame.
    PathResolution {
        /// Candidates tried, in priority order.
        candidates: Vec<String>,
    },
    /// A single frame failed to load.
    FrameLoad(LoadFailure),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options or script parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but hold out-of-range values.
    InvalidOptions(String),
    /// Browser DOM failure (missing element, rejected listener, ...).
    Dom(String),
}

impl ScrubError {
    /// Multi-line message shown in place of the sequence when
    /// initialization fails.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        match self {
            Self::PathResolution { .. } => format!(
                "Could not load the image sequence. Check that:\n\
                 1. the \"frames\" folder exists on the server\n\
                 2. the images are named correctly\n\
                 3. the files are readable\n\
                 \n\
                 Details: {self}"
            ),
            _ => format!("Could not start the image sequence.\n\nDetails: {self}"),
        }
    }
}

impl fmt::Display for ScrubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathResolution { candidates } => {
                write!(
                    f,
                    "no valid frame path found (tried {})",
                    candidates.join(", ")
                )
            }
            Self::FrameLoad(e) => write!(f, "frame load error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for ScrubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FrameLoad(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LoadFailure> for ScrubError {
    fn from(e: LoadFailure) -> Self {
        Self::FrameLoad(e)
    }
}

impl From<std::io::Error> for ScrubError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_resolution_lists_candidates() {
        let err = ScrubError::PathResolution {
            candidates: vec!["./frames/".into(), "/frames/".into()],
        };
        assert_eq!(
            err.to_string(),
            "no valid frame path found (tried ./frames/, /frames/)"
        );
        let diagnostic = err.diagnostic();
        assert!(diagnostic.contains("\"frames\" folder exists"));
        assert!(diagnostic.ends_with(&err.to_string()));
    }

    #[test]
    fn frame_load_exposes_source() {
        use std::error::Error;

        let err = ScrubError::from(LoadFailure::new("a.png", "404"));
        assert_eq!(err.to_string(), "frame load error: failed to load a.png: 404");
        assert!(err.source().is_some());
    }
}
