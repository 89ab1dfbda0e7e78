use std::cell::{Cell, RefCell};

use futures::future::{join_all, Shared};
use futures::FutureExt;
use rustc_hash::FxHashMap;

use super::cache::FrameCache;
use super::{FrameLoader, LoadFailure, LoadFuture};
use crate::sequence::{FrameCatalog, FrameId};

type SharedLoad<H> = Shared<LoadFuture<H>>;

/// Loads frames through a [`FrameLoader`] and caches the results.
///
/// All methods take `&self`: the preloader is shared (behind an `Rc`)
/// between the controller, which reads the cache every tick, and the
/// background window-preload tasks, which fill it. No `RefCell` borrow is
/// held across an await.
pub struct Preloader<L: FrameLoader> {
    loader: L,
    cache: RefCell<FrameCache<L::Handle>>,
    /// Loads started but not yet finished, so concurrent requests for one
    /// frame share a single load.
    in_flight: RefCell<FxHashMap<FrameId, SharedLoad<L::Handle>>>,
    window_busy: Cell<bool>,
    window_len: usize,
    loads_started: Cell<usize>,
}

/// Clears the window-preload flag however the window future ends
/// (completion or being dropped mid-load).
struct WindowGuard<'a>(&'a Cell<bool>);

impl Drop for WindowGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<L: FrameLoader> Preloader<L> {
    /// Preloader with an empty cache and a look-ahead of `window_len` frames.
    pub fn new(loader: L, window_len: usize) -> Self {
        Self {
            loader,
            cache: RefCell::new(FrameCache::default()),
            in_flight: RefCell::new(FxHashMap::default()),
            window_busy: Cell::new(false),
            window_len,
            loads_started: Cell::new(0),
        }
    }

    /// The underlying loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Cached handle for `id`, if its load has completed.
    pub fn cached(&self, id: &FrameId) -> Option<L::Handle> {
        self.cache.borrow().get(id).cloned()
    }

    /// Number of cached frames.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Number of loads issued to the loader so far.
    pub fn loads_started(&self) -> usize {
        self.loads_started.get()
    }

    /// Whether a window preload is currently running.
    pub fn window_in_flight(&self) -> bool {
        self.window_busy.get()
    }

    /// Return the cached handle for `id`, or load, cache and return it.
    ///
    /// A failure is returned to every waiter and nothing is cached, so a
    /// later request tries again.
    pub async fn preload_one(
        &self,
        id: &FrameId,
    ) -> Result<L::Handle, LoadFailure> {
        if let Some(handle) = self.cached(id) {
            return Ok(handle);
        }

        let load = self.join_or_start(id);
        let result = load.clone().await;
        self.finish(id, &load, &result);
        result
    }

    fn join_or_start(&self, id: &FrameId) -> SharedLoad<L::Handle> {
        let mut in_flight = self.in_flight.borrow_mut();
        in_flight
            .entry(id.clone())
            .or_insert_with(|| {
                self.loads_started.set(self.loads_started.get() + 1);
                log::debug!("loading {id}");
                self.loader.load(id.as_str()).shared()
            })
            .clone()
    }

    fn finish(
        &self,
        id: &FrameId,
        load: &SharedLoad<L::Handle>,
        result: &Result<L::Handle, LoadFailure>,
    ) {
        {
            let mut in_flight = self.in_flight.borrow_mut();
            // A retry may already have replaced a failed entry
            if in_flight.get(id).is_some_and(|pending| pending.ptr_eq(load)) {
                let _ = in_flight.remove(id);
            }
        }

        match result {
            Ok(handle) => {
                if self.cache.borrow_mut().insert(id.clone(), handle.clone()) {
                    log::debug!("cached {id}");
                }
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    /// Load frames `[0, count)` concurrently and wait for all of them.
    ///
    /// Failed frames yield `None` in their slot; the batch never aborts.
    pub async fn preload_initial_batch(
        &self,
        catalog: &FrameCatalog,
        count: usize,
    ) -> Vec<Option<L::Handle>> {
        let loads = catalog
            .frames()
            .iter()
            .take(count)
            .map(|id| async move { self.preload_one(id).await.ok() });
        let handles = join_all(loads).await;
        let loaded = handles.iter().filter(|h| h.is_some()).count();
        log::info!("initial batch: {loaded}/{} frames loaded", handles.len());
        handles
    }

    /// Sequentially load the window of frames after `current`.
    ///
    /// Returns `false` without doing anything when another window preload
    /// is still running.
    pub async fn preload_window(
        &self,
        catalog: &FrameCatalog,
        current: usize,
    ) -> bool {
        if self.window_busy.replace(true) {
            return false;
        }
        let _guard = WindowGuard(&self.window_busy);

        for index in catalog.window_after(current, self.window_len) {
            if let Some(id) = catalog.get(index) {
                // Failures are logged in `finish`; the window carries on
                let _ = self.preload_one(id).await;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use futures::future::join;
    use futures::{pin_mut, poll};

    use super::*;
    use crate::loader::testing::MockLoader;
    use crate::options::FrameTemplate;

    fn catalog(last: usize) -> FrameCatalog {
        let template = FrameTemplate {
            prefix: "f".into(),
            extension: "png".into(),
            pad_width: 4,
        };
        FrameCatalog::build("frames/", &template, last)
    }

    #[test]
    fn preload_twice_loads_once() {
        let preloader = Preloader::new(MockLoader::serving("frames/"), 5);
        let id = FrameId::new("frames/f0003.png");

        let first = block_on(preloader.preload_one(&id)).unwrap();
        let second = block_on(preloader.preload_one(&id)).unwrap();
        assert_eq!(first, second);
        assert_eq!(preloader.loader().calls_for(id.as_str()), 1);
        assert_eq!(preloader.loads_started(), 1);
        assert_eq!(preloader.cached(&id), Some(first));
    }

    #[test]
    fn concurrent_requests_share_one_load() {
        let preloader = Preloader::new(MockLoader::serving("frames/"), 5);
        let id = FrameId::new("frames/f0001.png");
        let open = preloader.loader().hold();

        block_on(async {
            let a = preloader.preload_one(&id);
            let b = preloader.preload_one(&id);
            pin_mut!(a, b);
            assert!(poll!(a.as_mut()).is_pending());
            assert!(poll!(b.as_mut()).is_pending());
            assert_eq!(preloader.loader().calls_for(id.as_str()), 1);

            open.send(()).unwrap();
            let (a, b) = join(a, b).await;
            assert_eq!(a.unwrap(), b.unwrap());
        });
        assert_eq!(preloader.cached_len(), 1);
    }

    #[test]
    fn failure_is_not_cached_and_retries() {
        let loader = MockLoader::serving("frames/").failing("frames/f0002.png");
        let preloader = Preloader::new(loader, 5);
        let id = FrameId::new("frames/f0002.png");

        let err = block_on(preloader.preload_one(&id)).unwrap_err();
        assert_eq!(err.url, "frames/f0002.png");
        assert_eq!(preloader.cached(&id), None);

        let _ = block_on(preloader.preload_one(&id));
        assert_eq!(preloader.loader().calls_for(id.as_str()), 2);
    }

    #[test]
    fn initial_batch_tolerates_failures() {
        let loader = MockLoader::serving("frames/").failing("frames/f0001.png");
        let preloader = Preloader::new(loader, 5);
        let catalog = catalog(100);

        let handles = block_on(preloader.preload_initial_batch(&catalog, 4));
        assert_eq!(handles.len(), 4);
        assert!(handles[0].is_some());
        assert!(handles[1].is_none());
        assert!(handles[2].is_some());
        assert!(handles[3].is_some());
        assert_eq!(preloader.cached_len(), 3);
    }

    #[test]
    fn initial_batch_is_capped_by_catalog() {
        let preloader = Preloader::new(MockLoader::serving("frames/"), 5);
        let handles = block_on(preloader.preload_initial_batch(&catalog(2), 20));
        assert_eq!(handles.len(), 3);
    }

    #[test]
    fn window_loads_frames_after_current() {
        let preloader = Preloader::new(MockLoader::serving("frames/"), 5);
        let catalog = catalog(100);

        assert!(block_on(preloader.preload_window(&catalog, 10)));
        let expected: Vec<String> =
            (11..=15).map(|i| format!("frames/f{i:04}.png")).collect();
        assert_eq!(preloader.loader().calls(), expected);
        assert!(!preloader.window_in_flight());

        // Already cached frames are not reloaded
        assert!(block_on(preloader.preload_window(&catalog, 12)));
        assert_eq!(preloader.loads_started(), 7);
    }

    #[test]
    fn window_continues_past_failures() {
        let loader = MockLoader::serving("frames/").failing("frames/f0002.png");
        let preloader = Preloader::new(loader, 3);
        let catalog = catalog(10);

        assert!(block_on(preloader.preload_window(&catalog, 0)));
        assert_eq!(preloader.cached_len(), 2);
        assert_eq!(preloader.cached(&FrameId::new("frames/f0002.png")), None);
    }

    #[test]
    fn second_window_while_busy_is_a_no_op() {
        let preloader = Preloader::new(MockLoader::serving("frames/"), 5);
        let catalog = catalog(100);
        let open = preloader.loader().hold();

        block_on(async {
            let first = preloader.preload_window(&catalog, 0);
            pin_mut!(first);
            assert!(poll!(first.as_mut()).is_pending());
            assert!(preloader.window_in_flight());

            assert!(!preloader.preload_window(&catalog, 50).await);
            assert_eq!(preloader.loads_started(), 1);

            preloader.loader().release();
            open.send(()).unwrap();
            assert!(first.await);
        });

        assert!(!preloader.window_in_flight());
        assert_eq!(preloader.cached_len(), 5);
        let expected: Vec<String> =
            (1..=5).map(|i| format!("frames/f{i:04}.png")).collect();
        assert_eq!(preloader.loader().calls(), expected);
    }

    #[test]
    fn dropping_a_window_clears_the_busy_flag() {
        let preloader = Preloader::new(MockLoader::serving("frames/"), 5);
        let catalog = catalog(100);
        let _open = preloader.loader().hold();

        block_on(async {
            let first = preloader.preload_window(&catalog, 0);
            pin_mut!(first);
            assert!(poll!(first.as_mut()).is_pending());
        });
        assert!(!preloader.window_in_flight());
    }
}
