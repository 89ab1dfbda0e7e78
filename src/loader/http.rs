use std::io::Read;

use futures::FutureExt;

use super::{FrameBytes, FrameLoader, LoadFailure, LoadFuture, LoadProgress, ProgressHub};

const CHUNK_SIZE: usize = 16 * 1024;

/// Fetches frame URLs from an HTTP origin with `ureq`.
///
/// Relative URLs (`./frames/x.png`, `/frames/x.png`) are joined onto the
/// origin. The request blocks inside the first poll, which is acceptable on
/// the single-threaded native executor this loader is meant for.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    agent: ureq::Agent,
    origin: String,
    progress: ProgressHub,
}

impl HttpLoader {
    /// Loader for `origin` (e.g. `http://localhost:3000`).
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            origin: origin.into(),
            progress: ProgressHub::default(),
        }
    }

    /// Mutable access to the progress hub, to subscribe before loading.
    pub fn progress_mut(&mut self) -> &mut ProgressHub {
        &mut self.progress
    }

    /// Absolute URL a frame URL maps to.
    #[must_use]
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_owned();
        }
        let path = url.trim_start_matches("./").trim_start_matches('/');
        format!("{}/{path}", self.origin.trim_end_matches('/'))
    }
}

fn fetch(
    agent: &ureq::Agent,
    url: &str,
    progress: &ProgressHub,
) -> Result<Vec<u8>, LoadFailure> {
    let mut response = agent.get(url).call().map_err(|e| LoadFailure::new(url, e))?;
    let total = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let mut reader = response.body_mut().as_reader();
    let mut bytes = Vec::with_capacity(total.unwrap_or(0) as usize);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk).map_err(|e| LoadFailure::new(url, e))?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        if progress.has_subscribers() {
            progress.emit(&LoadProgress {
                url: url.to_owned(),
                loaded: bytes.len() as u64,
                total,
            });
        }
    }
    Ok(bytes)
}

impl FrameLoader for HttpLoader {
    type Handle = FrameBytes;

    fn load(&self, url: &str) -> LoadFuture<FrameBytes> {
        let agent = self.agent.clone();
        let absolute = self.absolute_url(url);
        let url = url.to_owned();
        let progress = self.progress.clone();
        async move {
            log::debug!("GET {absolute}");
            let bytes = fetch(&agent, &absolute, &progress)?;
            Ok(FrameBytes::new(&url, bytes))
        }
        .boxed_local()
    }
}
