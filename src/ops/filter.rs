use std::sync::Arc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Emit only those items from an Observable that pass a predicate test
  ///
  /// # Example
  ///
  /// ```
  /// use nanorx::prelude::*;
  /// use std::sync::{Arc, Mutex};
  ///
  /// let coll = Arc::new(Mutex::new(vec![]));
  /// let coll_clone = coll.clone();
  ///
  /// Observable::<_, ()>::from_iter(0..10)
  ///   .filter(|v| *v % 2 == 0)
  ///   .subscribe_next(move |v| coll_clone.lock().unwrap().push(v));
  ///
  /// // only even numbers received.
  /// assert_eq!(*coll.lock().unwrap(), vec![0, 2, 4, 6, 8]);
  /// ```
  pub fn filter<P>(self, predicate: P) -> Observable<Item, Err>
  where
    P: Fn(&Item) -> bool + Send + Sync + 'static,
  {
    self.try_filter(move |v| Ok(predicate(v)))
  }

  /// Like [`filter`](Observable::filter), but the predicate may fail. An
  /// `Err` becomes the stream's error.
  pub fn try_filter<P>(self, predicate: P) -> Observable<Item, Err>
  where
    P: Fn(&Item) -> Result<bool, Err> + Send + Sync + 'static,
  {
    let predicate = Arc::new(predicate);
    Observable::create(move |observer: Subscriber<Item, Err>| {
      let upstream =
        Subscriber::new(FilterObserver { observer: observer.clone(), predicate: predicate.clone() });
      observer.add_teardown(upstream.subscription());
      self.actual_subscribe(upstream);
      Ok(())
    })
  }
}

pub struct FilterObserver<Item, Err, P> {
  observer: Subscriber<Item, Err>,
  predicate: Arc<P>,
}

impl<Item, Err, P> Observer<Item, Err> for FilterObserver<Item, Err, P>
where
  P: Fn(&Item) -> Result<bool, Err>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_closed() {
      return;
    }
    match (self.predicate)(&value) {
      Ok(true) => self.observer.next(value),
      Ok(false) => {}
      Err(err) => self.observer.error(err),
    }
  }

  #[inline]
  fn error(&mut self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }
}
