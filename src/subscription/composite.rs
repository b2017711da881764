use std::{
  fmt::{Debug, Formatter},
  sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::trace;

use super::{same_disposable, Disposable, DisposableRef};

/// A thread-safe group of disposables that is itself a [`Disposable`].
///
/// Disposing the group disposes every member exactly once. Once disposed,
/// the group no longer retains anything: a disposable added afterwards is
/// disposed on the spot.
///
/// # Examples
///
/// ```rust
/// use nanorx::prelude::*;
/// use std::sync::Arc;
///
/// let group = CompositeDisposable::new();
/// let member = Arc::new(BooleanDisposable::new());
/// group.add(member.clone());
///
/// group.dispose();
/// assert!(member.is_disposed());
///
/// let late = Arc::new(BooleanDisposable::new());
/// group.add(late.clone());
/// assert!(late.is_disposed());
/// assert!(group.is_empty());
/// ```
#[derive(Default)]
pub struct CompositeDisposable {
  disposed: AtomicBool,
  members: Mutex<SmallVec<[DisposableRef; 2]>>,
}

impl CompositeDisposable {
  pub fn new() -> Self { Self::default() }

  /// Adds `disposable` to the group, or disposes it immediately if the group
  /// is already disposed. Adding the same instance twice keeps one entry.
  /// Members that already report disposed are pruned on the way.
  pub fn add(&self, disposable: DisposableRef) {
    if self.is_same(&disposable) {
      return;
    }
    let mut members = self.members.lock();
    // the flag only flips while the member lock is held
    if self.disposed.load(Ordering::Acquire) {
      drop(members);
      disposable.dispose();
      return;
    }
    members.retain(|m| !m.is_disposed());
    if !members.iter().any(|m| same_disposable(m, &disposable)) {
      members.push(disposable);
    }
  }

  /// Detaches `disposable` without disposing it. Returns whether it was a
  /// member. A disposed group has no members, so this is always `false`
  /// after [`dispose`](Disposable::dispose).
  pub fn remove(&self, disposable: &DisposableRef) -> bool {
    let mut members = self.members.lock();
    match members.iter().position(|m| same_disposable(m, disposable)) {
      Some(idx) => {
        members.remove(idx);
        true
      }
      None => false,
    }
  }

  /// Number of retained members.
  pub fn len(&self) -> usize { self.members.lock().len() }

  pub fn is_empty(&self) -> bool { self.members.lock().is_empty() }

  fn is_same(&self, other: &DisposableRef) -> bool {
    std::ptr::eq(
      self as *const Self as *const (),
      std::sync::Arc::as_ptr(other) as *const (),
    )
  }
}

impl Disposable for CompositeDisposable {
  fn dispose(&self) {
    let members = {
      let mut members = self.members.lock();
      if self.disposed.swap(true, Ordering::AcqRel) {
        return;
      }
      std::mem::take(&mut *members)
    };
    trace!(members = members.len(), "composite disposed");
    // outside the lock, a member's teardown may touch this group again
    for m in members {
      m.dispose();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.disposed.load(Ordering::Acquire) }
}

impl Debug for CompositeDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CompositeDisposable")
      .field("is_disposed", &self.is_disposed())
      .field("members", &self.len())
      .finish()
  }
}
