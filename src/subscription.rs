//! Cancellation handles.
//!
//! A [`Disposable`] is a one-way flag: it starts active and can only move to
//! disposed. Every implementation in this module is thread-safe, and calling
//! [`Disposable::dispose`] more than once has the same effect as calling it
//! once.

use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use parking_lot::Mutex;

mod composite;
pub use composite::CompositeDisposable;

/// A handle used to cancel a subscription or release a resource.
pub trait Disposable: Send + Sync {
  /// Moves the handle to the disposed state. Safe to call from any thread
  /// and any number of times.
  fn dispose(&self);

  /// Returns `true` once [`dispose`](Disposable::dispose) has been called.
  fn is_disposed(&self) -> bool;
}

/// Type-erased, shareable disposable. Identity is the pointer, so two clones
/// of the same `Arc` are the same member of a [`CompositeDisposable`].
pub type DisposableRef = Arc<dyn Disposable>;

/// Handle returned from `Observable::subscribe`.
pub type Subscription = Arc<CompositeDisposable>;

impl<T: Disposable + ?Sized> Disposable for Arc<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl<T: Disposable + ?Sized> Disposable for Box<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl Debug for dyn Disposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("dyn Disposable")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

#[inline]
pub(crate) fn same_disposable(a: &DisposableRef, b: &DisposableRef) -> bool {
  std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// The plain flag.
#[derive(Debug, Default)]
pub struct BooleanDisposable {
  disposed: AtomicBool,
}

impl BooleanDisposable {
  pub fn new() -> Self { Self::default() }
}

impl Disposable for BooleanDisposable {
  #[inline]
  fn dispose(&self) { self.disposed.store(true, Ordering::Release); }

  #[inline]
  fn is_disposed(&self) -> bool { self.disposed.load(Ordering::Acquire) }
}

type Action = Box<dyn FnOnce() + Send>;

/// Runs a closure the first time it is disposed.
pub struct ActionDisposable {
  disposed: AtomicBool,
  action: Mutex<Option<Action>>,
}

impl ActionDisposable {
  pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
    Self {
      disposed: AtomicBool::new(false),
      action: Mutex::new(Some(Box::new(action))),
    }
  }
}

impl Disposable for ActionDisposable {
  fn dispose(&self) {
    if !self.disposed.swap(true, Ordering::AcqRel) {
      // run outside the lock, the action may dispose other handles
      let action = self.action.lock().take();
      if let Some(action) = action {
        action();
      }
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.disposed.load(Ordering::Acquire) }
}

impl Debug for ActionDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActionDisposable")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}
