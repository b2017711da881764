use crate::{
  observable::Observable, observer::Observer, scheduler::Scheduler, subscriber::Subscriber,
};

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Delivers every event to the downstream observer on `scheduler`.
  ///
  /// The upstream is still subscribed, and keeps producing, on the calling
  /// thread. Each `next`, `error` and `complete` becomes one task. A
  /// single-worker scheduler keeps the emission order; with a pool the
  /// delivery order is unspecified.
  pub fn observe_on<SD>(self, scheduler: SD) -> Observable<Item, Err>
  where
    SD: Scheduler + Clone + 'static,
  {
    Observable::create(move |observer: Subscriber<Item, Err>| {
      let upstream =
        Subscriber::new(ObserveOnObserver { observer: observer.clone(), scheduler: scheduler.clone() });
      observer.add_teardown(upstream.subscription());
      self.actual_subscribe(upstream);
      Ok(())
    })
  }
}

pub struct ObserveOnObserver<Item, Err, SD> {
  observer: Subscriber<Item, Err>,
  scheduler: SD,
}

macro_rules! schedule_task {
  ($this: ident, |$observer: ident| $task: expr) => {{
    if !$this.observer.is_closed() {
      let $observer = $this.observer.clone();
      $this.scheduler.execute(Box::new(move || $task));
    }
  }};
}

impl<Item, Err, SD> Observer<Item, Err> for ObserveOnObserver<Item, Err, SD>
where
  Item: Send + 'static,
  Err: Send + 'static,
  SD: Scheduler,
{
  fn next(&mut self, value: Item) { schedule_task!(self, |observer| observer.next(value)) }

  fn error(&mut self, err: Err) { schedule_task!(self, |observer| observer.error(err)) }

  fn complete(&mut self) { schedule_task!(self, |observer| observer.complete()) }
}
