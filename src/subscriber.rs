use std::sync::Arc;

use tracing::trace;

use crate::{
  observer::{BoxedObserver, Observer},
  rc::MutArc,
  subscription::{ActionDisposable, CompositeDisposable, Disposable, DisposableRef, Subscription},
};

/// Wraps the Observer handed to `subscribe`. While the Observer is the public
/// API for consuming values, every Observer gets converted to a Subscriber,
/// which enforces the push contract and provides the Subscription.
///
/// - values arrive in order, one at a time, then at most one terminal event;
/// - anything after a terminal event, or after the subscription was
///   disposed, is dropped;
/// - delivering a terminal event disposes the subscription, which releases
///   every teardown registered on it, upstream subscriptions included.
///
/// A Subscriber is a cheap handle: clones feed the same observer, so a
/// source may hand them to other threads.
///
/// Events for one subscriber are serialised by a lock that is held while the
/// wrapped observer runs. An observer must not synchronously emit into the
/// subscriber that is calling it.
pub struct Subscriber<Item, Err> {
  observer: MutArc<Option<BoxedObserver<Item, Err>>>,
  subscription: Subscription,
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self {
    Subscriber {
      observer: self.observer.clone(),
      subscription: self.subscription.clone(),
    }
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  pub fn new<O>(observer: O) -> Self
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    Subscriber {
      observer: MutArc::own(Some(Box::new(observer))),
      subscription: Arc::new(CompositeDisposable::new()),
    }
  }

  pub fn next(&self, value: Item) {
    let mut observer = self.observer.rc_deref_mut();
    match observer.as_mut() {
      Some(o) if !self.subscription.is_disposed() => o.next(value),
      _ => trace!("value dropped, subscriber is closed"),
    }
  }

  pub fn error(&self, err: Err) {
    let observer = self.observer.rc_deref_mut().take();
    match observer {
      Some(mut o) if !self.subscription.is_disposed() => o.error(err),
      _ => trace!("error dropped, subscriber is closed"),
    }
    self.subscription.dispose();
  }

  pub fn complete(&self) {
    let observer = self.observer.rc_deref_mut().take();
    match observer {
      Some(mut o) if !self.subscription.is_disposed() => o.complete(),
      _ => trace!("completion dropped, subscriber is closed"),
    }
    self.subscription.dispose();
  }

  /// `true` once a terminal event was delivered or the subscription was
  /// disposed. Sources should stop producing when this turns `true`.
  ///
  /// Lock-free, so it may be polled from inside a downstream callback.
  #[inline]
  pub fn is_closed(&self) -> bool { self.subscription.is_disposed() }

  /// Registers a teardown disposed together with this subscription. If the
  /// subscription is already disposed, `teardown` is disposed right away.
  pub fn add_teardown(&self, teardown: DisposableRef) { self.subscription.add(teardown); }

  /// Registers a closure that runs once when this subscription is disposed.
  pub fn on_dispose(&self, action: impl FnOnce() + Send + 'static) {
    self.add_teardown(Arc::new(ActionDisposable::new(action)));
  }

  /// The handle that cancels this subscription.
  pub fn subscription(&self) -> Subscription { self.subscription.clone() }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subscriber::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subscriber::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subscriber::complete(self) }
}
