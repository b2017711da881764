//! Ready-made observables.
//!
//! | Method | Values | Terminal event |
//! |--------|--------|----------------|
//! | `of(v)` | `v` | complete |
//! | `from_iter(iter)` | every item of `iter` | complete |
//! | `empty()` | none | complete |
//! | `never()` | none | none |
//! | `throw_err(e)` | none | error `e` |
//!
//! All of them are cold: each subscription replays from the start on the
//! subscribing thread.

use crate::observable::Observable;

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Emits `v` once, then completes.
  pub fn of(v: Item) -> Self
  where
    Item: Clone + Sync,
  {
    Observable::create(move |subscriber| {
      subscriber.next(v.clone());
      subscriber.complete();
      Ok(())
    })
  }

  /// Emits every item of `iter` in order, then completes.
  ///
  /// Stops iterating as soon as the subscription is closed, so an endless
  /// iterator is fine as long as something downstream ends the stream.
  ///
  /// # Examples
  ///
  /// ```
  /// use nanorx::prelude::*;
  ///
  /// let observer = TestObserver::<usize, ()>::new();
  /// Observable::from_iter(0..)
  ///   .try_map(|v| if v < 3 { Ok(v) } else { Err(()) })
  ///   .subscribe(observer.clone());
  /// assert_eq!(observer.items(), vec![0, 1, 2]);
  /// assert!(observer.has_error());
  /// ```
  #[allow(clippy::should_implement_trait)]
  pub fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Item> + Clone + Send + Sync + 'static,
  {
    Observable::create(move |subscriber| {
      for v in iter.clone() {
        if subscriber.is_closed() {
          return Ok(());
        }
        subscriber.next(v);
      }
      subscriber.complete();
      Ok(())
    })
  }

  /// Completes right away without emitting anything.
  pub fn empty() -> Self {
    Observable::create(|subscriber| {
      subscriber.complete();
      Ok(())
    })
  }

  /// Never emits and never terminates. Only a dispose ends it.
  pub fn never() -> Self { Observable::create(|_| Ok(())) }

  /// Fails right away with `err`.
  pub fn throw_err(err: Err) -> Self
  where
    Err: Clone + Sync,
  {
    Observable::create(move |_| Err(err.clone()))
  }
}
