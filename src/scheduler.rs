//! Execution contexts for observable work.
//!
//! A [`Scheduler`] accepts tasks and runs them on its own threads. The
//! [`observe_on`](crate::observable::Observable::observe_on) and
//! [`subscribe_on`](crate::observable::Observable::subscribe_on) operators
//! use one to move delivery or production off the calling thread.
//!
//! Every scheduler owns its workers from construction. [`Scheduler::shutdown`]
//! stops accepting new tasks; dropping the last handle does the same.

use std::sync::Arc;

use tracing::warn;

use crate::error::SchedulerError;

#[cfg(feature = "futures-scheduler")]
mod computation;
mod immediate;
#[cfg(feature = "tokio-scheduler")]
mod io;
#[cfg(feature = "futures-scheduler")]
mod single_thread;
mod test_scheduler;
#[cfg(feature = "futures-scheduler")]
mod thread_pool;

#[cfg(feature = "futures-scheduler")]
pub use computation::ComputationScheduler;
pub use immediate::ImmediateScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use io::{IoScheduler, IoSchedulerBuilder};
#[cfg(feature = "futures-scheduler")]
pub use single_thread::SingleThreadScheduler;
pub use test_scheduler::TestScheduler;

/// A unit of work submitted to a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A Scheduler is an object to order task and schedule their execution.
pub trait Scheduler: Send + Sync {
  /// Submits `task`, reporting a rejection instead of dropping it.
  fn try_execute(&self, task: Task) -> Result<(), SchedulerError>;

  /// Submits `task` without waiting for it. A rejected task is logged and
  /// dropped.
  fn execute(&self, task: Task) {
    if let Err(err) = self.try_execute(task) {
      warn!(scheduler = err.scheduler_name(), error = %err, "task rejected");
    }
  }

  /// Stops accepting tasks. Tasks already submitted may still run.
  fn shutdown(&self);

  fn is_shutdown(&self) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
  #[inline]
  fn try_execute(&self, task: Task) -> Result<(), SchedulerError> { (**self).try_execute(task) }

  #[inline]
  fn execute(&self, task: Task) { (**self).execute(task) }

  #[inline]
  fn shutdown(&self) { (**self).shutdown() }

  #[inline]
  fn is_shutdown(&self) -> bool { (**self).is_shutdown() }
}
