//! Merge inner observables produced per item.
//!
//! Every upstream value is mapped to an inner observable that is subscribed
//! immediately, so inner streams run side by side and their values
//! interleave in arrival order. Inner subscriptions are collected in a
//! [`CompositeDisposable`] owned by the outer subscription.
//!
//! Completion follows the *outer* source only: when upstream completes, the
//! downstream completes right away, and inner streams still running after
//! that point are cancelled. Errors from the outer source, the mapping
//! closure or any inner stream are delivered once and cancel every sibling.

use std::sync::Arc;

use crate::{
  observable::Observable,
  observer::Observer,
  subscriber::Subscriber,
  subscription::{CompositeDisposable, Disposable},
};

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Maps each item to an observable and merges their values.
  ///
  /// ```rust
  /// use nanorx::prelude::*;
  ///
  /// let observer = TestObserver::new();
  /// Observable::<_, ()>::from_iter(vec![1, 2])
  ///   .flat_map(|x| Observable::from_iter(vec![format!("{x}A"), format!("{x}B")]))
  ///   .subscribe(observer.clone());
  ///
  /// let mut items = observer.items();
  /// items.sort();
  /// assert_eq!(items, vec!["1A", "1B", "2A", "2B"]);
  /// assert!(observer.is_completed());
  /// ```
  pub fn flat_map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: Send + 'static,
    F: Fn(Item) -> Observable<B, Err> + Send + Sync + 'static,
  {
    self.try_flat_map(move |v| Ok(f(v)))
  }

  /// Like [`flat_map`](Observable::flat_map), but producing the inner
  /// observable may fail.
  pub fn try_flat_map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: Send + 'static,
    F: Fn(Item) -> Result<Observable<B, Err>, Err> + Send + Sync + 'static,
  {
    let func = Arc::new(f);
    Observable::create(move |observer: Subscriber<B, Err>| {
      let inners = Arc::new(CompositeDisposable::new());
      observer.add_teardown(inners.clone());
      let upstream = Subscriber::new(FlatMapObserver {
        observer: observer.clone(),
        func: func.clone(),
        inners,
      });
      observer.add_teardown(upstream.subscription());
      self.actual_subscribe(upstream);
      Ok(())
    })
  }
}

pub struct FlatMapObserver<B, Err, F> {
  observer: Subscriber<B, Err>,
  func: Arc<F>,
  inners: Arc<CompositeDisposable>,
}

impl<Item, B, Err, F> Observer<Item, Err> for FlatMapObserver<B, Err, F>
where
  B: Send + 'static,
  Err: Send + 'static,
  F: Fn(Item) -> Result<Observable<B, Err>, Err>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_closed() {
      return;
    }
    match (self.func)(value) {
      Ok(inner) => {
        let subscriber = Subscriber::new(InnerObserver {
          observer: self.observer.clone(),
          inners: self.inners.clone(),
        });
        // registered first, so a sibling error cancels it even mid-emission
        self.inners.add(subscriber.subscription());
        inner.actual_subscribe(subscriber);
      }
      Err(err) => self.error(err),
    }
  }

  fn error(&mut self, err: Err) {
    self.inners.dispose();
    self.observer.error(err);
  }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }
}

struct InnerObserver<B, Err> {
  observer: Subscriber<B, Err>,
  inners: Arc<CompositeDisposable>,
}

impl<B, Err> Observer<B, Err> for InnerObserver<B, Err> {
  #[inline]
  fn next(&mut self, value: B) { self.observer.next(value) }

  fn error(&mut self, err: Err) {
    self.inners.dispose();
    self.observer.error(err);
  }

  // an inner stream finishing has no downstream effect
  fn complete(&mut self) {}
}
