use std::path::{Path, PathBuf};

use futures::FutureExt;

use super::{FrameBytes, FrameLoader, LoadFailure, LoadFuture, LoadProgress, ProgressHub};

/// Serves frame URLs from a local directory, the way a static file server
/// rooted at `root` would.
///
/// Leading `/` is treated as the root, so `/frames/x.png` and
/// `./frames/x.png` name the same file. Reads are synchronous and complete
/// inside the first poll.
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
    progress: ProgressHub,
}

impl DirLoader {
    /// Loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            progress: ProgressHub::default(),
        }
    }

    /// Directory URLs are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mutable access to the progress hub, to subscribe before loading.
    pub fn progress_mut(&mut self) -> &mut ProgressHub {
        &mut self.progress
    }

    /// File path a URL maps to.
    #[must_use]
    pub fn resolve(&self, url: &str) -> PathBuf {
        self.root.join(url.trim_start_matches('/'))
    }
}

impl FrameLoader for DirLoader {
    type Handle = FrameBytes;

    fn load(&self, url: &str) -> LoadFuture<FrameBytes> {
        let path = self.resolve(url);
        let url = url.to_owned();
        let progress = self.progress.clone();
        async move {
            let bytes = std::fs::read(&path).map_err(|e| {
                LoadFailure::new(url.as_str(), format!("{}: {e}", path.display()))
            })?;
            let len = bytes.len() as u64;
            progress.emit(&LoadProgress {
                url: url.clone(),
                loaded: len,
                total: Some(len),
            });
            Ok(FrameBytes::new(&url, bytes))
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("scrubview-{name}-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("frames")).unwrap();
        dir
    }

    #[test]
    fn loads_relative_and_rooted_urls() {
        let dir = scratch_dir("dirloader");
        std::fs::write(dir.join("frames/a.png"), b"png-bytes").unwrap();
        let mut loader = DirLoader::new(&dir);
        let progress = loader.progress_mut().subscribe();

        let dot = block_on(loader.load("./frames/a.png")).unwrap();
        let rooted = block_on(loader.load("/frames/a.png")).unwrap();
        assert_eq!(dot.bytes(), b"png-bytes");
        assert_eq!(dot.url(), "./frames/a.png");
        assert_eq!(rooted.len(), 9);

        let event = progress.try_recv().unwrap();
        assert_eq!(event.loaded, 9);
        assert_eq!(event.total, Some(9));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_a_load_failure() {
        let dir = scratch_dir("dirloader-missing");
        let loader = DirLoader::new(&dir);
        let err = block_on(loader.load("frames/nope.png")).unwrap_err();
        assert_eq!(err.url, "frames/nope.png");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
