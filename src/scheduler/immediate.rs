use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use super::{Scheduler, Task};
use crate::error::SchedulerError;

/// Runs each task inline, on the thread that submits it.
#[derive(Clone, Default)]
pub struct ImmediateScheduler {
  shutdown: Arc<AtomicBool>,
}

impl ImmediateScheduler {
  pub fn new() -> Self { Self::default() }
}

impl Scheduler for ImmediateScheduler {
  fn try_execute(&self, task: Task) -> Result<(), SchedulerError> {
    if self.is_shutdown() {
      return Err(SchedulerError::Shutdown { name: "immediate" });
    }
    task();
    Ok(())
  }

  #[inline]
  fn shutdown(&self) { self.shutdown.store(true, Ordering::Release) }

  #[inline]
  fn is_shutdown(&self) -> bool { self.shutdown.load(Ordering::Acquire) }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::thread;

  #[test]
  fn runs_inline() {
    let observer = TestObserver::<i32, ()>::new();
    Observable::from_iter(0..3)
      .subscribe_on(ImmediateScheduler::new())
      .observe_on(ImmediateScheduler::new())
      .subscribe(observer.clone());

    assert_eq!(observer.items(), vec![0, 1, 2]);
    assert!(observer.is_completed());
    assert!(observer.delivery_threads().iter().all(|id| *id == thread::current().id()));
  }

  #[test]
  fn shutdown_rejects() {
    let scheduler = ImmediateScheduler::new();
    scheduler.shutdown();
    let err = scheduler.try_execute(Box::new(|| {})).unwrap_err();
    assert!(matches!(err, SchedulerError::Shutdown { name: "immediate" }));
  }
}
