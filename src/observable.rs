//! The source side of the push contract.
//!
//! An [`Observable`] is an immutable wrapper around a subscription function.
//! Nothing runs until `subscribe` is called, and every call runs the function
//! again for the new subscriber: two subscriptions never share an execution.

use std::sync::Arc;

use crate::{
  observer::{Observer, ObserverAll},
  subscriber::Subscriber,
  subscription::Subscription,
};

type SubscribeFn<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> Result<(), Err> + Send + Sync;

/// A push-based source of `Item`s that may fail with `Err`.
///
/// Operators consume the observable and return a new one; clone it first to
/// keep the original around. Cloning is cheap.
///
/// # Example
///
/// ```rust
/// use nanorx::prelude::*;
///
/// let source = Observable::<i32, &str>::create(|subscriber| {
///   for v in 1..=4 {
///     subscriber.next(v);
///   }
///   subscriber.complete();
///   Ok(())
/// });
///
/// let observer = TestObserver::new();
/// source.filter(|v| v % 2 == 0).subscribe(observer.clone());
/// assert_eq!(observer.items(), vec![2, 4]);
/// assert!(observer.is_completed());
/// ```
pub struct Observable<Item, Err> {
  subscribe_fn: Arc<SubscribeFn<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  fn clone(&self) -> Self { Observable { subscribe_fn: self.subscribe_fn.clone() } }
}

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Creates an observable from a subscription function.
  ///
  /// The function pushes values into the [`Subscriber`] and may register
  /// cleanup with [`Subscriber::add_teardown`] or
  /// [`Subscriber::on_dispose`]. Returning `Err` delivers it as the
  /// subscription's error, unless a terminal event was already sent.
  pub fn create<F>(f: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> Result<(), Err> + Send + Sync + 'static,
  {
    Observable { subscribe_fn: Arc::new(f) }
  }

  /// Subscribes `observer` and returns the handle that cancels the
  /// subscription.
  ///
  /// Without a scheduler in the chain everything runs on the calling thread
  /// before this returns. Never fails: setup errors reach the observer. A
  /// panic in a user closure is not converted and unwinds out of this call.
  pub fn subscribe<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let subscriber = Subscriber::new(observer);
    self.actual_subscribe(subscriber.clone());
    subscriber.subscription()
  }

  /// Runs the subscription function against an existing subscriber.
  ///
  /// Operators use this to link the upstream subscriber into the downstream
  /// subscription *before* the upstream starts producing, so a downstream
  /// dispose or terminal event reaches a synchronous source while it is
  /// still emitting.
  pub fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) {
    if subscriber.is_closed() {
      return;
    }
    if let Err(err) = (self.subscribe_fn)(subscriber.clone()) {
      subscriber.error(err);
    }
  }

  /// Subscribes with a closure for values; errors and completion are
  /// ignored.
  pub fn subscribe_next<N>(&self, next: N) -> Subscription
  where
    N: FnMut(Item) + Send + 'static,
  {
    self.subscribe_all(next, |_| {}, || {})
  }

  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Item) + Send + 'static,
    E: FnOnce(Err) + Send + 'static,
    C: FnOnce() + Send + 'static,
  {
    self.subscribe(ObserverAll::new(next, error, complete))
  }
}
