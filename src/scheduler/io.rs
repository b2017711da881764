use std::{sync::Arc, time::Duration};

use parking_lot::RwLock;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, trace};

use super::{Scheduler, Task};
use crate::error::SchedulerError;

const NAME: &str = "io";

/// A pool for blocking work that grows on demand and reuses idle workers.
///
/// Backed by the blocking pool of a private tokio runtime: a worker that
/// stays idle longer than `keep_alive` exits. Shutting down, or dropping the
/// last handle, releases the workers without waiting for running tasks.
#[derive(Clone)]
pub struct IoScheduler {
  inner: Arc<IoInner>,
}

struct IoInner {
  runtime: RwLock<Option<Runtime>>,
}

impl IoScheduler {
  /// An I/O scheduler with the default limits.
  pub fn new() -> Result<Self, SchedulerError> { Self::builder().build() }

  pub fn builder() -> IoSchedulerBuilder { IoSchedulerBuilder::default() }
}

/// Configures an [`IoScheduler`].
#[derive(Debug, Clone)]
pub struct IoSchedulerBuilder {
  max_threads: usize,
  keep_alive: Duration,
  thread_name: String,
}

impl Default for IoSchedulerBuilder {
  fn default() -> Self {
    IoSchedulerBuilder {
      max_threads: 512,
      keep_alive: Duration::from_secs(60),
      thread_name: "nanorx-io".to_string(),
    }
  }
}

impl IoSchedulerBuilder {
  /// Upper bound on concurrently running workers; further tasks queue.
  pub fn max_threads(mut self, max_threads: usize) -> Self {
    self.max_threads = max_threads.max(1);
    self
  }

  /// How long an idle worker waits for a new task before exiting.
  pub fn keep_alive(mut self, keep_alive: Duration) -> Self {
    self.keep_alive = keep_alive;
    self
  }

  pub fn thread_name(mut self, name: impl Into<String>) -> Self {
    self.thread_name = name.into();
    self
  }

  pub fn build(self) -> Result<IoScheduler, SchedulerError> {
    let runtime = Builder::new_multi_thread()
      .worker_threads(1)
      .max_blocking_threads(self.max_threads)
      .thread_keep_alive(self.keep_alive)
      .thread_name(self.thread_name)
      .build()
      .map_err(|source| SchedulerError::Spawn { name: NAME, source })?;
    debug!(scheduler = NAME, max_threads = self.max_threads, "scheduler started");
    Ok(IoScheduler { inner: Arc::new(IoInner { runtime: RwLock::new(Some(runtime)) }) })
  }
}

impl IoInner {
  fn shutdown(&self) {
    // never wait here, the last handle may be dropped on one of our workers
    if let Some(runtime) = self.runtime.write().take() {
      runtime.shutdown_background();
      debug!(scheduler = NAME, "scheduler shut down");
    }
  }
}

impl Drop for IoInner {
  fn drop(&mut self) { self.shutdown() }
}

impl Scheduler for IoScheduler {
  fn try_execute(&self, task: Task) -> Result<(), SchedulerError> {
    let guard = self.inner.runtime.read();
    let runtime = guard.as_ref().ok_or(SchedulerError::Shutdown { name: NAME })?;
    trace!(scheduler = NAME, "task submitted");
    // detached, the join handle is not needed
    drop(runtime.spawn_blocking(task));
    Ok(())
  }

  #[inline]
  fn shutdown(&self) { self.inner.shutdown() }

  #[inline]
  fn is_shutdown(&self) -> bool { self.inner.runtime.read().is_none() }
}
