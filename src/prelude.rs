//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Errors
pub use crate::error::SchedulerError;
// Core types
pub use crate::observable::Observable;
pub use crate::observer::{BoxedObserver, Observer, ObserverAll};
// Schedulers
#[cfg(feature = "futures-scheduler")]
pub use crate::scheduler::{ComputationScheduler, SingleThreadScheduler};
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::{IoScheduler, IoSchedulerBuilder};
pub use crate::scheduler::{ImmediateScheduler, Scheduler, Task, TestScheduler};
pub use crate::subscriber::Subscriber;
// Subscription
pub use crate::subscription::{
  ActionDisposable, BooleanDisposable, CompositeDisposable, Disposable, DisposableRef,
  Subscription,
};
// Test doubles
pub use crate::test_observer::TestObserver;
