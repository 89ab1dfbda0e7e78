//! Ordered, immutable list of frame identifiers.

use std::fmt;
use std::ops::Range;

use crate::options::FrameTemplate;

/// Identifier (URL or relative path) of one frame image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(String);

impl FrameId {
    /// Wrap a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FrameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Frame identifiers for indices `0..=last_frame`, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCatalog {
    base_path: String,
    frames: Vec<FrameId>,
}

impl FrameCatalog {
    /// Generate `last_frame + 1` identifiers as `base_path` followed by the
    /// template file name of each index.
    #[must_use]
    pub fn build(
        base_path: &str,
        template: &FrameTemplate,
        last_frame: usize,
    ) -> Self {
        let frames = (0..=last_frame)
            .map(|i| FrameId::new(format!("{base_path}{}", template.file_name(i))))
            .collect();
        Self {
            base_path: base_path.to_owned(),
            frames,
        }
    }

    /// Base path the catalog was built from.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Index of the final frame (N).
    #[must_use]
    pub fn last_frame(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Number of frames (N + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false` for a built catalog; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Identifier of frame `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FrameId> {
        self.frames.get(index)
    }

    /// All identifiers in index order.
    #[must_use]
    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }

    /// Indices of the `len` frames following `current`, stopping at the
    /// last frame. Empty when `current` is already the last frame.
    #[must_use]
    pub fn window_after(&self, current: usize, len: usize) -> Range<usize> {
        let start = current.saturating_add(1);
        let end = current.saturating_add(len).min(self.last_frame()) + 1;
        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn template() -> FrameTemplate {
        FrameTemplate {
            prefix: "car".into(),
            extension: "png".into(),
            pad_width: 4,
        }
    }

    #[test]
    fn catalog_has_last_frame_plus_one_entries() {
        let mut rng = rand::rng();
        for last in [0, 1, 9, 999, 1000] {
            let catalog = FrameCatalog::build("frames/", &template(), last);
            assert_eq!(catalog.len(), last + 1);
            assert_eq!(catalog.last_frame(), last);
            for _ in 0..16 {
                let i = rng.random_range(0..=last);
                let id = catalog.get(i).unwrap();
                assert!(id.as_str().contains(&format!("{i:04}")), "{id} lacks {i:04}");
            }
        }
    }

    #[test]
    fn identifiers_are_ordered_without_gaps() {
        let catalog = FrameCatalog::build("/frames/", &template(), 12);
        let expected: Vec<String> =
            (0..=12).map(|i| format!("/frames/car{i:04}.png")).collect();
        let actual: Vec<&str> = catalog.frames().iter().map(FrameId::as_str).collect();
        assert_eq!(actual, expected);
        assert_eq!(catalog.base_path(), "/frames/");
        assert_eq!(catalog.get(13), None);
    }

    #[test]
    fn window_follows_current_and_stops_at_end() {
        let catalog = FrameCatalog::build("", &template(), 10);
        assert_eq!(catalog.window_after(0, 5), 1..6);
        assert_eq!(catalog.window_after(7, 5), 8..11);
        assert!(catalog.window_after(10, 5).is_empty());
        assert!(catalog.window_after(3, 0).is_empty());
    }
}
