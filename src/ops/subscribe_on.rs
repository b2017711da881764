use crate::{observable::Observable, scheduler::Scheduler, subscriber::Subscriber};

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Runs the upstream subscription on `scheduler` instead of the calling
  /// thread, so the source and everything it does synchronously executes on
  /// a scheduler thread.
  ///
  /// If the subscription is disposed before the task gets to run, the
  /// upstream is never subscribed.
  pub fn subscribe_on<SD>(self, scheduler: SD) -> Observable<Item, Err>
  where
    SD: Scheduler + 'static,
  {
    Observable::create(move |observer: Subscriber<Item, Err>| {
      let source = self.clone();
      scheduler.execute(Box::new(move || source.actual_subscribe(observer)));
      Ok(())
    })
  }
}
