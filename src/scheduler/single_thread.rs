use std::sync::Arc;

use super::{thread_pool::PoolHandle, Scheduler, Task};
use crate::error::SchedulerError;

/// Runs every task on one dedicated worker thread, in submission order.
///
/// Clones share the worker.
#[derive(Clone)]
pub struct SingleThreadScheduler {
  pool: Arc<PoolHandle>,
}

impl SingleThreadScheduler {
  pub fn new() -> Result<Self, SchedulerError> {
    Ok(SingleThreadScheduler { pool: Arc::new(PoolHandle::new("single-thread", 1)?) })
  }
}

impl Scheduler for SingleThreadScheduler {
  #[inline]
  fn try_execute(&self, task: Task) -> Result<(), SchedulerError> { self.pool.try_execute(task) }

  #[inline]
  fn shutdown(&self) { self.pool.shutdown() }

  #[inline]
  fn is_shutdown(&self) -> bool { self.pool.is_shutdown() }
}
