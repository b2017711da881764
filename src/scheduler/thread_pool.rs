use futures::{executor::ThreadPool, future};
use parking_lot::RwLock;
use tracing::{debug, trace};

use super::Task;
use crate::error::SchedulerError;

/// A `futures` thread pool that can be switched off.
///
/// Dropping the pool lets its workers finish the tasks already queued and
/// then exit, so neither `shutdown` nor drop blocks the caller.
pub(crate) struct PoolHandle {
  name: &'static str,
  pool: RwLock<Option<ThreadPool>>,
}

impl PoolHandle {
  pub(crate) fn new(name: &'static str, pool_size: usize) -> Result<Self, SchedulerError> {
    let pool = ThreadPool::builder()
      .pool_size(pool_size.max(1))
      .name_prefix(format!("nanorx-{name}-"))
      .create()
      .map_err(|source| SchedulerError::Spawn { name, source })?;
    debug!(scheduler = name, pool_size, "scheduler started");
    Ok(PoolHandle { name, pool: RwLock::new(Some(pool)) })
  }

  pub(crate) fn try_execute(&self, task: Task) -> Result<(), SchedulerError> {
    let guard = self.pool.read();
    let pool = guard.as_ref().ok_or(SchedulerError::Shutdown { name: self.name })?;
    trace!(scheduler = self.name, "task submitted");
    pool.spawn_ok(future::lazy(move |_| task()));
    Ok(())
  }

  pub(crate) fn shutdown(&self) {
    if self.pool.write().take().is_some() {
      debug!(scheduler = self.name, "scheduler shut down");
    }
  }

  #[inline]
  pub(crate) fn is_shutdown(&self) -> bool { self.pool.read().is_none() }
}
