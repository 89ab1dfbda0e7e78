//! In-memory loader for tests.

use std::cell::RefCell;

use futures::channel::oneshot;
use futures::future::Shared;
use futures::FutureExt;
use rustc_hash::FxHashSet;

use super::{FrameLoader, LoadFailure, LoadFuture};

/// Serves every URL under `prefix` (minus explicit failures) as its own
/// URL string, recording each load it starts.
pub(crate) struct MockLoader {
    prefix: String,
    failing: FxHashSet<String>,
    calls: RefCell<Vec<String>>,
    gate: RefCell<Option<Shared<oneshot::Receiver<()>>>>,
}

impl MockLoader {
    pub(crate) fn serving(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            failing: FxHashSet::default(),
            calls: RefCell::new(Vec::new()),
            gate: RefCell::new(None),
        }
    }

    /// Make `url` fail even though it is under the served prefix.
    pub(crate) fn failing(mut self, url: &str) -> Self {
        let _ = self.failing.insert(url.to_owned());
        self
    }

    /// Hold every load started from now on until the returned sender fires
    /// (or is dropped).
    pub(crate) fn hold(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx.shared());
        tx
    }

    /// Stop holding new loads.
    pub(crate) fn release(&self) {
        *self.gate.borrow_mut() = None;
    }

    /// URLs whose load was started, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// How many loads of `url` were started.
    pub(crate) fn calls_for(&self, url: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == url).count()
    }
}

impl FrameLoader for MockLoader {
    type Handle = String;

    fn load(&self, url: &str) -> LoadFuture<String> {
        self.calls.borrow_mut().push(url.to_owned());
        let result = if url.starts_with(&self.prefix) && !self.failing.contains(url) {
            Ok(url.to_owned())
        } else {
            Err(LoadFailure::new(url, "not found"))
        };
        let gate = self.gate.borrow().clone();
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        }
        .boxed_local()
    }
}
