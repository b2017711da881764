//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable. The trait is object safe, so observers can be boxed and
/// chosen at runtime.
///
/// Implementations do not have to guard against misbehaving sources: every
/// observer handed to `Observable::subscribe` is wrapped in a
/// [`Subscriber`](crate::subscriber::Subscriber) that drops anything arriving
/// after a terminal event.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable. No more values follow.
  fn error(&mut self, err: Err);

  /// Handle completion of the observable. No more values follow.
  fn complete(&mut self);
}

/// Boxed observer that can be moved across threads.
pub type BoxedObserver<Item, Err> = Box<dyn Observer<Item, Err> + Send>;

impl<Item, Err, O> Observer<Item, Err> for Box<O>
where
  O: Observer<Item, Err> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: Err) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }
}

// ============================================================================
// Closure observers
// ============================================================================

/// An observer assembled from three closures.
///
/// The terminal closures are `FnOnce`: they are taken out on first use.
pub struct ObserverAll<N, E, C> {
  next: N,
  error: Option<E>,
  complete: Option<C>,
}

impl<N, E, C> ObserverAll<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self {
    ObserverAll { next, error: Some(error), complete: Some(complete) }
  }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  fn error(&mut self, err: Err) {
    if let Some(error) = self.error.take() {
      self.complete = None;
      error(err);
    }
  }

  fn complete(&mut self) {
    if let Some(complete) = self.complete.take() {
      self.error = None;
      complete();
    }
  }
}
