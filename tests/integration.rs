//! Integration tests for nanorx
//!
//! Operator chains, several observers on one source, and scheduler hops.

use std::{
  collections::HashSet,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  },
  thread,
  time::Duration,
};

use nanorx::prelude::*;

fn from_vec<T>(values: Vec<T>) -> Observable<T, String>
where
  T: Clone + Send + Sync + 'static,
{
  Observable::create(move |s| {
    for v in values.iter().cloned() {
      s.next(v);
    }
    s.complete();
    Ok(())
  })
}

#[test]
fn delivers_sequence_then_one_completion() {
  let observer = TestObserver::new();
  from_vec(vec!["Hello"]).subscribe(observer.clone());

  assert_eq!(observer.items(), vec!["Hello"]);
  assert!(observer.is_completed());
  assert_eq!(observer.error(), None);
  assert_eq!(observer.terminal_count(), 1);
}

#[test]
fn filter_even() {
  let observer = TestObserver::new();
  from_vec(vec![1, 2, 3, 4]).filter(|v| v % 2 == 0).subscribe(observer.clone());

  assert_eq!(observer.items(), vec![2, 4]);
  assert!(observer.is_completed());
  assert_eq!(observer.error(), None);
}

#[test]
fn combined_operators() {
  let observer = TestObserver::new();
  from_vec(vec![1, 2, 3])
    .map(|v| v * 10)
    .filter(|v| *v > 20)
    .map(|v| v.to_string())
    .subscribe(observer.clone());

  assert_eq!(observer.items(), vec!["30".to_string()]);
  assert!(observer.is_completed());
  assert_eq!(observer.error(), None);
}

#[test]
fn subscription_function_error() {
  let observer = TestObserver::<String, String>::new();
  Observable::create(|_| Err("Subscription failed".to_string())).subscribe(observer.clone());

  assert!(observer.items().is_empty());
  assert_eq!(observer.error(), Some("Subscription failed".to_string()));
  assert!(!observer.is_completed());
}

#[test]
fn deep_operator_nesting() {
  let observer = TestObserver::new();
  from_vec((1..=1000).collect())
    .map(|v| v + 1)
    .filter(|v| v % 2 == 0)
    .map(|v| v * 2)
    .subscribe(observer.clone());

  let expected: Vec<i32> =
    (1..=1000).map(|v| v + 1).filter(|v| v % 2 == 0).map(|v| v * 2).collect();
  assert_eq!(observer.items(), expected);
  assert!(observer.is_completed());
}

#[test]
fn multiple_observers_each_get_a_run() {
  let runs = Arc::new(AtomicUsize::new(0));
  let c_runs = runs.clone();
  let source = Observable::<&str, ()>::create(move |s| {
    c_runs.fetch_add(1, Ordering::SeqCst);
    s.next("Event 1");
    s.next("Event 2");
    s.complete();
    Ok(())
  });

  let first = TestObserver::new();
  let second = TestObserver::new();
  source.subscribe(first.clone());
  source.subscribe(second.clone());

  for observer in [first, second] {
    assert_eq!(observer.items(), vec!["Event 1", "Event 2"]);
    assert!(observer.is_completed());
  }
  assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn mapper_failure_mid_stream() {
  let observer = TestObserver::new();
  from_vec(vec![1, 2, 3, 4])
    .try_map(|v| if v == 3 { Err(format!("bad {v}")) } else { Ok(v) })
    .filter(|_| true)
    .subscribe(observer.clone());

  assert_eq!(observer.items(), vec![1, 2]);
  assert_eq!(observer.error(), Some("bad 3".to_string()));
  assert!(!observer.is_completed());
  assert_eq!(observer.terminal_count(), 1);
}

#[test]
fn flat_map_multiset() {
  let observer = TestObserver::new();
  from_vec(vec![1, 2])
    .flat_map(|x| from_vec(vec![format!("{x}A"), format!("{x}B")]))
    .subscribe(observer.clone());

  let items = observer.items();
  let unique: HashSet<_> = items.iter().cloned().collect();
  let expected: HashSet<_> = ["1A", "1B", "2A", "2B"].iter().map(|s| s.to_string()).collect();
  assert_eq!(items.len(), 4);
  assert_eq!(unique, expected);
  assert!(observer.is_completed());
  assert_eq!(observer.terminal_count(), 1);
}

#[test]
fn dispose_is_idempotent() {
  let disposed = Arc::new(AtomicUsize::new(0));
  let c_disposed = disposed.clone();
  let sub = Observable::<i32, ()>::create(move |s| {
    let disposed = c_disposed.clone();
    s.on_dispose(move || {
      disposed.fetch_add(1, Ordering::SeqCst);
    });
    Ok(())
  })
  .subscribe_next(|_| {});

  assert!(!sub.is_disposed());
  for _ in 0..3 {
    sub.dispose();
    assert!(sub.is_disposed());
  }
  assert_eq!(disposed.load(Ordering::SeqCst), 1);
}

#[test]
fn callbacks_see_every_event() {
  let log = Arc::new(Mutex::new(vec![]));
  let (n, e, c) = (log.clone(), log.clone(), log.clone());
  from_vec(vec![1, 2]).subscribe_all(
    move |v| n.lock().unwrap().push(format!("next {v}")),
    move |err| e.lock().unwrap().push(format!("error {err}")),
    move || c.lock().unwrap().push("complete".to_string()),
  );

  assert_eq!(*log.lock().unwrap(), vec!["next 1", "next 2", "complete"]);
}

#[test]
fn test_scheduler_controls_delivery() {
  let scheduler = TestScheduler::new();
  let observer = TestObserver::new();
  from_vec(vec![1, 2, 3])
    .subscribe_on(scheduler.clone())
    .map(|v| v * 2)
    .observe_on(scheduler.clone())
    .subscribe(observer.clone());

  assert!(observer.items().is_empty());
  scheduler.flush();
  assert_eq!(observer.items(), vec![2, 4, 6]);
  assert!(observer.is_completed());
}

#[cfg(feature = "futures-scheduler")]
#[test]
fn observe_on_single_thread_preserves_order() {
  let scheduler = SingleThreadScheduler::new().unwrap();
  let observer = TestObserver::new();
  from_vec((0..500).collect()).observe_on(scheduler.clone()).subscribe(observer.clone());

  assert!(observer.await_terminal(Duration::from_secs(5)));
  assert_eq!(observer.items(), (0..500).collect::<Vec<i32>>());
  assert!(observer.delivery_threads().iter().all(|id| *id != thread::current().id()));
}

#[cfg(feature = "futures-scheduler")]
#[test]
fn subscribe_on_runs_source_off_caller() {
  let producer_thread = Arc::new(Mutex::new(None));
  let c_producer_thread = producer_thread.clone();
  let source = Observable::<i32, ()>::create(move |s| {
    *c_producer_thread.lock().unwrap() = Some(thread::current().id());
    s.next(1);
    s.complete();
    Ok(())
  });

  let observer = TestObserver::new();
  source.subscribe_on(ComputationScheduler::new().unwrap()).subscribe(observer.clone());

  assert!(observer.await_terminal(Duration::from_secs(3)));
  let producer = producer_thread.lock().unwrap().unwrap();
  assert_ne!(producer, thread::current().id());
  assert!(observer.delivery_threads().iter().all(|id| *id == producer));
}

#[cfg(feature = "futures-scheduler")]
#[test]
fn dispose_stops_infinite_source() {
  let observer = TestObserver::<u64, ()>::new();
  let sub = Observable::from_iter(0..)
    .subscribe_on(ComputationScheduler::with_pool_size(1).unwrap())
    .subscribe(observer.clone());

  assert!(observer.await_items(10, Duration::from_secs(3)));
  sub.dispose();
  let after = observer.item_count();
  thread::sleep(Duration::from_millis(50));

  // at most one in-flight delivery races the dispose
  assert!(observer.item_count() <= after + 1);
  assert!(!observer.is_completed());
}

#[cfg(feature = "tokio-scheduler")]
#[test]
fn io_scheduler_flat_map() {
  let scheduler = IoScheduler::builder().max_threads(4).build().unwrap();
  let observer = TestObserver::<i32, String>::new();
  let gate = Arc::new(Mutex::new(None));
  let c_gate = gate.clone();
  let outer = Observable::create(move |s| {
    s.next(1);
    s.next(2);
    *c_gate.lock().unwrap() = Some(s);
    Ok(())
  });

  let c_scheduler = scheduler.clone();
  outer
    .flat_map(move |x| from_vec(vec![x * 10, x * 10 + 1]).subscribe_on(c_scheduler.clone()))
    .subscribe(observer.clone());

  assert!(observer.await_items(4, Duration::from_secs(3)));
  gate.lock().unwrap().take().unwrap().complete();
  let mut items = observer.items();
  items.sort();
  assert_eq!(items, vec![10, 11, 20, 21]);
  assert!(observer.is_completed());
  scheduler.shutdown();
}
