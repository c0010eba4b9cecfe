//! Window bookkeeping shared by every window task.
//!
//! Each window runs its control loop on its own worker thread. The only state
//! the threads share is the [`WindowRegistry`]: how many windows are open,
//! whether one of them asked the process to exit, and how many ended in error.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use crate::editor::LoopExit;
use crate::error::EditorResult;

#[derive(Debug, Default)]
struct Counts {
    open: usize,
    exit_requested: bool,
    failures: usize,
}

/// How the process should finish once [`WindowRegistry::wait`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shutdown {
    pub exit_requested: bool,
    pub failures: usize,
}

impl Shutdown {
    pub fn exit_code(&self) -> u8 {
        if !self.exit_requested && self.failures > 0 {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Default)]
pub struct WindowRegistry {
    counts: Mutex<Counts>,
    changed: Condvar,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a new window as open until the returned guard is dropped.
    pub fn register(self: &Arc<Self>) -> WindowGuard {
        self.counts.lock().open += 1;
        WindowGuard {
            registry: Arc::clone(self),
        }
    }

    pub fn open_windows(&self) -> usize {
        self.counts.lock().open
    }

    pub fn request_exit(&self) {
        self.counts.lock().exit_requested = true;
        self.changed.notify_all();
    }

    pub fn record_failure(&self) {
        self.counts.lock().failures += 1;
    }

    /// Blocks until every window has closed or one of them requested an exit.
    pub fn wait(&self) -> Shutdown {
        let mut counts = self.counts.lock();
        while counts.open > 0 && !counts.exit_requested {
            self.changed.wait(&mut counts);
        }

        Shutdown {
            exit_requested: counts.exit_requested,
            failures: counts.failures,
        }
    }
}

/// Marks one open window. Dropping it closes the window.
#[derive(Debug)]
pub struct WindowGuard {
    registry: Arc<WindowRegistry>,
}

impl Drop for WindowGuard {
    fn drop(&mut self) {
        let mut counts = self.registry.counts.lock();
        counts.open -= 1;
        if counts.open == 0 {
            self.registry.changed.notify_all();
        }
    }
}

/// Spawns one worker thread per window.
#[derive(Debug, Default)]
pub struct WindowPool {
    registry: Arc<WindowRegistry>,
    next_id: AtomicUsize,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WindowPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Arc<WindowRegistry> {
        &self.registry
    }

    /// Opens a window and runs `task` for it on a new worker.
    ///
    /// The window counts as open before this returns, so a caller waiting on
    /// the registry right afterwards can't miss it.
    pub fn spawn<F>(&self, task: F) -> io::Result<usize>
    where
        F: FnOnce(usize) -> EditorResult<LoopExit> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let guard = self.registry.register();
        let registry = Arc::clone(&self.registry);

        let handle = thread::Builder::new()
            .name(format!("window-{id}"))
            .spawn(move || {
                let _guard = guard;
                match task(id) {
                    Ok(LoopExit::Quit) => {
                        tracing::info!(window = id, "exit requested");
                        registry.request_exit();
                    }
                    Ok(LoopExit::EndOfInput) => {
                        tracing::info!(window = id, "window closed at end of input");
                    }
                    Err(err) => {
                        tracing::error!(window = id, %err, "window failed");
                        registry.record_failure();
                    }
                }
            })?;

        self.workers.lock().push(handle);
        Ok(id)
    }

    /// Waits for every spawned worker to finish.
    pub fn join(&self) {
        let workers = std::mem::take(&mut *self.workers.lock());
        for worker in workers {
            if worker.join().is_err() {
                tracing::error!("window worker panicked");
            }
        }
    }
}
