//! Executor seam for background preloads.
//!
//! Everything runs on one thread: the controller spawns window preloads as
//! local (non-`Send`) tasks and the host executor drives them between
//! ticks.

use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

/// Spawns `'static` local tasks onto the host's executor.
pub trait TaskSpawner {
    /// Run `task` to completion in the background.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

impl TaskSpawner for LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawn_local(task) {
            log::warn!("dropping background task: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use futures::executor::LocalPool;
    use futures::FutureExt;

    use super::*;

    #[test]
    fn local_spawner_runs_on_pool() {
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        TaskSpawner::spawn(&spawner, async move { flag.set(true) }.boxed_local());
        assert!(!ran.get());
        pool.run_until_stalled();
        assert!(ran.get());
    }
}
