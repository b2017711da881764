use std::{sync::Arc, thread};

use super::{thread_pool::PoolHandle, Scheduler, Task};
use crate::error::SchedulerError;

/// A fixed pool for CPU-bound work, sized to the available parallelism by
/// default. Tasks run concurrently and in no particular order.
#[derive(Clone)]
pub struct ComputationScheduler {
  pool: Arc<PoolHandle>,
}

impl ComputationScheduler {
  pub fn new() -> Result<Self, SchedulerError> {
    let pool_size = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    Self::with_pool_size(pool_size)
  }

  /// A pool with `pool_size` workers; zero is treated as one.
  pub fn with_pool_size(pool_size: usize) -> Result<Self, SchedulerError> {
    Ok(ComputationScheduler { pool: Arc::new(PoolHandle::new("computation", pool_size)?) })
  }
}

impl Scheduler for ComputationScheduler {
  #[inline]
  fn try_execute(&self, task: Task) -> Result<(), SchedulerError> { self.pool.try_execute(task) }

  #[inline]
  fn shutdown(&self) { self.pool.shutdown() }

  #[inline]
  fn is_shutdown(&self) -> bool { self.pool.is_shutdown() }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::{
    sync::{mpsc::channel, Barrier},
    time::Duration,
  };

  #[test]
  fn smoke() {
    let scheduler = ComputationScheduler::new().unwrap();
    let (tx, rx) = channel();
    scheduler.execute(Box::new(move || tx.send(true).unwrap()));
    assert_eq!(rx.recv_timeout(Duration::from_secs(1)), Ok(true));
  }

  #[test]
  fn workers_run_in_parallel() {
    let scheduler = ComputationScheduler::with_pool_size(2).unwrap();
    // both tasks must be running at once to get past the barrier
    let barrier = Arc::new(Barrier::new(2));
    let (tx, rx) = channel();
    for _ in 0..2 {
      let barrier = barrier.clone();
      let tx = tx.clone();
      scheduler.execute(Box::new(move || {
        barrier.wait();
        tx.send(thread::current().id()).unwrap();
      }));
    }

    let a = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    let b = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_ne!(a, b);
  }

  #[test]
  fn shutdown_rejects() {
    let scheduler = ComputationScheduler::with_pool_size(1).unwrap();
    assert!(!scheduler.is_shutdown());
    scheduler.shutdown();
    scheduler.shutdown();

    let err = scheduler.try_execute(Box::new(|| {})).unwrap_err();
    assert!(matches!(err, SchedulerError::Shutdown { name: "computation" }));
  }
}
