use std::io;

/// Errors reported by schedulers.
///
/// Stream errors are not represented here: they travel through the
/// observable's own `Err` type.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
  /// The worker pool backing a scheduler could not be started.
  #[error("failed to start {name} scheduler: {source}")]
  Spawn {
    name: &'static str,
    #[source]
    source: io::Error,
  },

  /// The scheduler was shut down and no longer accepts tasks.
  #[error("{name} scheduler is shut down")]
  Shutdown { name: &'static str },
}

impl SchedulerError {
  /// Name of the scheduler that produced the error.
  pub fn scheduler_name(&self) -> &'static str {
    match self {
      SchedulerError::Spawn { name, .. } | SchedulerError::Shutdown { name } => name,
    }
  }
}
