use std::sync::Arc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  pub fn map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: Send + 'static,
    F: Fn(Item) -> B + Send + Sync + 'static,
  {
    self.try_map(move |v| Ok(f(v)))
  }

  /// Like [`map`](Observable::map), but the closure may fail. An `Err`
  /// becomes the stream's error and the closure is not called again for
  /// this subscription.
  pub fn try_map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: Send + 'static,
    F: Fn(Item) -> Result<B, Err> + Send + Sync + 'static,
  {
    let func = Arc::new(f);
    Observable::create(move |observer: Subscriber<B, Err>| {
      let upstream = Subscriber::new(MapObserver { observer: observer.clone(), func: func.clone() });
      observer.add_teardown(upstream.subscription());
      self.actual_subscribe(upstream);
      Ok(())
    })
  }
}

pub struct MapObserver<B, Err, F> {
  observer: Subscriber<B, Err>,
  func: Arc<F>,
}

impl<Item, B, Err, F> Observer<Item, Err> for MapObserver<B, Err, F>
where
  F: Fn(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_closed() {
      return;
    }
    match (self.func)(value) {
      Ok(v) => self.observer.next(v),
      Err(err) => self.observer.error(err),
    }
  }

  #[inline]
  fn error(&mut self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }
}
