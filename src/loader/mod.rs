//! Frame loading: the loader seam, the preload cache and the preloader.
//!
//! A [`FrameLoader`] turns a URL into a `'static` future resolving to a
//! handle or a [`LoadFailure`]. The [`Preloader`] owns one loader plus the
//! never-evicting [`FrameCache`], deduplicates concurrent requests for the
//! same frame, and implements the initial batch and look-ahead window.

mod cache;
/// Local directory loader.
pub mod fs;
/// Blocking HTTP loader (`ureq`).
#[cfg(feature = "http")]
pub mod http;
mod preloader;
/// Optional load progress stream.
pub mod progress;
#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::Arc;

pub use cache::FrameCache;
use futures::future::LocalBoxFuture;
pub use preloader::Preloader;
pub use progress::{LoadProgress, ProgressHub};

pub use crate::error::LoadFailure;

/// Future returned by [`FrameLoader::load`].
pub type LoadFuture<H> = LocalBoxFuture<'static, Result<H, LoadFailure>>;

/// Asset source for frame images.
///
/// Implementations issue the request eagerly or lazily as they see fit; the
/// returned future must not borrow the loader so it can be shared between
/// waiters and outlive the call.
pub trait FrameLoader {
    /// Loaded image handle stored in the cache and handed to the sink.
    type Handle: Clone + 'static;

    /// Start loading `url`.
    fn load(&self, url: &str) -> LoadFuture<Self::Handle>;
}

/// Raw bytes of a loaded frame, as produced by the native loaders.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBytes {
    url: Arc<str>,
    bytes: Arc<[u8]>,
}

impl FrameBytes {
    /// Wrap bytes loaded from `url`.
    pub fn new(url: &str, bytes: Vec<u8>) -> Self {
        Self {
            url: Arc::from(url),
            bytes: Arc::from(bytes),
        }
    }

    /// URL the bytes were loaded from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Encoded image bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FrameBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBytes")
            .field("url", &self.url)
            .field("len", &self.bytes.len())
            .finish()
    }
}
