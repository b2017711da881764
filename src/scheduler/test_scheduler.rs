//! A manual scheduler for deterministic tests.
//!
//! Submitted tasks are only queued. They run on the thread that calls
//! [`TestScheduler::run_next`] or [`TestScheduler::flush`], so a test decides
//! exactly when deferred work happens.
//!
//! ```rust
//! use nanorx::prelude::*;
//!
//! let scheduler = TestScheduler::new();
//! let observer = TestObserver::<i32, ()>::new();
//! Observable::of(42).observe_on(scheduler.clone()).subscribe(observer.clone());
//!
//! assert!(observer.items().is_empty());
//! scheduler.flush();
//! assert_eq!(observer.items(), vec![42]);
//! ```

use std::{
  collections::VecDeque,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use parking_lot::Mutex;
use tracing::trace;

use super::{Scheduler, Task};
use crate::error::SchedulerError;

// ==================== Internal State ====================

#[derive(Default)]
struct TestQueue {
  tasks: Mutex<VecDeque<Task>>,
  shutdown: AtomicBool,
}

// ==================== TestScheduler ====================

/// A FIFO queue of tasks drained by hand. Clones share the queue.
#[derive(Clone, Default)]
pub struct TestScheduler {
  queue: Arc<TestQueue>,
}

impl TestScheduler {
  pub fn new() -> Self { Self::default() }

  /// Runs the oldest queued task. Returns `false` if the queue was empty.
  pub fn run_next(&self) -> bool {
    // released before running, the task may submit more work
    let task = self.queue.tasks.lock().pop_front();
    match task {
      Some(task) => {
        task();
        true
      }
      None => false,
    }
  }

  /// Runs queued tasks, including the ones they submit, until the queue is
  /// empty.
  pub fn flush(&self) {
    let mut ran = 0usize;
    while self.run_next() {
      ran += 1;
    }
    trace!(ran, "test scheduler flushed");
  }

  /// Number of tasks waiting to run.
  pub fn pending(&self) -> usize { self.queue.tasks.lock().len() }
}

impl Scheduler for TestScheduler {
  fn try_execute(&self, task: Task) -> Result<(), SchedulerError> {
    if self.is_shutdown() {
      return Err(SchedulerError::Shutdown { name: "test" });
    }
    self.queue.tasks.lock().push_back(task);
    Ok(())
  }

  /// Rejects further tasks. Tasks already queued can still be flushed.
  fn shutdown(&self) { self.queue.shutdown.store(true, Ordering::Release) }

  fn is_shutdown(&self) -> bool { self.queue.shutdown.load(Ordering::Acquire) }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::sync::Mutex as StdMutex;

  #[test]
  fn fifo_and_manual() {
    let scheduler = TestScheduler::new();
    let log = Arc::new(StdMutex::new(vec![]));
    for i in 0..3 {
      let log = log.clone();
      scheduler.execute(Box::new(move || log.lock().unwrap().push(i)));
    }

    assert_eq!(scheduler.pending(), 3);
    assert!(log.lock().unwrap().is_empty());
    assert!(scheduler.run_next());
    assert_eq!(*log.lock().unwrap(), vec![0]);

    scheduler.flush();
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    assert!(!scheduler.run_next());
  }

  #[test]
  fn flush_runs_nested_tasks() {
    let scheduler = TestScheduler::new();
    let log = Arc::new(StdMutex::new(vec![]));
    let c_scheduler = scheduler.clone();
    let c_log = log.clone();
    scheduler.execute(Box::new(move || {
      c_log.lock().unwrap().push("outer");
      let log = c_log.clone();
      c_scheduler.execute(Box::new(move || log.lock().unwrap().push("inner")));
    }));

    scheduler.flush();
    assert_eq!(*log.lock().unwrap(), vec!["outer", "inner"]);
    assert_eq!(scheduler.pending(), 0);
  }

  #[test]
  fn shutdown_keeps_queued() {
    let scheduler = TestScheduler::new();
    scheduler.execute(Box::new(|| {}));
    scheduler.shutdown();

    let err = scheduler.try_execute(Box::new(|| {})).unwrap_err();
    assert!(matches!(err, SchedulerError::Shutdown { name: "test" }));
    assert_eq!(scheduler.pending(), 1);
    scheduler.flush();
    assert_eq!(scheduler.pending(), 0);
  }
}
