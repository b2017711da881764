//! # nanorx: a minimal push-based reactive stream engine
//!
//! An [`Observable`] pushes values to an [`Observer`], followed by at most
//! one terminal event: an error or completion. Operators build a new
//! observable on top of an existing one, and schedulers move work onto
//! other threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use nanorx::prelude::*;
//!
//! let observer = TestObserver::<String, ()>::new();
//! Observable::from_iter(1..=3)
//!   .map(|v| v * 10)
//!   .filter(|v| *v > 20)
//!   .map(|v| v.to_string())
//!   .subscribe(observer.clone());
//!
//! assert_eq!(observer.items(), vec!["30".to_string()]);
//! assert!(observer.is_completed());
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Cold source wrapping a subscription function |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscriber`] | Enforces the termination contract for one subscription |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Scheduler`] | Execution context used by `observe_on` and `subscribe_on` |
//!
//! ## Re-entrancy
//!
//! A [`Subscriber`] holds a lock while the observer it wraps runs, so events
//! for one subscription never overlap. An observer must therefore not emit
//! synchronously into the subscriber that is currently calling it: the lock
//! is not reentrant and the call deadlocks. Emitting into a different
//! subscriber, or scheduling the emission, is fine.
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `SingleThreadScheduler` and
//!   `ComputationScheduler` on the `futures` thread pool
//! - **`tokio-scheduler`** (default): `IoScheduler` on the tokio blocking pool
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscriber`]: subscriber::Subscriber
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler

pub mod error;
pub mod factory;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subscriber;
pub mod subscription;
pub mod test_observer;

// Re-export the prelude module
pub use prelude::*;
