//! A recording observer for tests.
//!
//! `TestObserver` stores every event it receives, including events that a
//! well-behaved source would never send, so tests can assert both what was
//! delivered and that nothing arrived after a terminal event. Clones share
//! the same record: subscribe one clone and inspect another.
//!
//! ```rust
//! use nanorx::prelude::*;
//!
//! let observer = TestObserver::<i32, ()>::new();
//! Observable::from_iter(vec![1, 2, 3]).subscribe(observer.clone());
//!
//! assert_eq!(observer.items(), vec![1, 2, 3]);
//! assert!(observer.is_completed());
//! ```

use std::{
  sync::Arc,
  thread::{self, ThreadId},
  time::{Duration, Instant},
};

use parking_lot::{Condvar, Mutex};

use crate::observer::Observer;

struct Record<Item, Err> {
  items: Vec<Item>,
  error: Option<Err>,
  completed: bool,
  terminal_count: usize,
  threads: Vec<ThreadId>,
}

struct Shared<Item, Err> {
  record: Mutex<Record<Item, Err>>,
  changed: Condvar,
}

pub struct TestObserver<Item, Err> {
  shared: Arc<Shared<Item, Err>>,
}

impl<Item, Err> Clone for TestObserver<Item, Err> {
  fn clone(&self) -> Self { TestObserver { shared: self.shared.clone() } }
}

impl<Item, Err> Default for TestObserver<Item, Err> {
  fn default() -> Self {
    TestObserver {
      shared: Arc::new(Shared {
        record: Mutex::new(Record {
          items: vec![],
          error: None,
          completed: false,
          terminal_count: 0,
          threads: vec![],
        }),
        changed: Condvar::new(),
      }),
    }
  }
}

impl<Item, Err> TestObserver<Item, Err> {
  pub fn new() -> Self { Self::default() }

  pub fn items(&self) -> Vec<Item>
  where
    Item: Clone,
  {
    self.shared.record.lock().items.clone()
  }

  pub fn item_count(&self) -> usize { self.shared.record.lock().items.len() }

  pub fn error(&self) -> Option<Err>
  where
    Err: Clone,
  {
    self.shared.record.lock().error.clone()
  }

  pub fn has_error(&self) -> bool { self.shared.record.lock().error.is_some() }

  pub fn is_completed(&self) -> bool { self.shared.record.lock().completed }

  /// How many terminal events arrived. Anything above one is a contract
  /// violation upstream.
  pub fn terminal_count(&self) -> usize { self.shared.record.lock().terminal_count }

  /// The thread each event (values and terminal) was delivered on.
  pub fn delivery_threads(&self) -> Vec<ThreadId> { self.shared.record.lock().threads.clone() }

  /// Blocks until a terminal event arrives or `timeout` passes. Returns
  /// whether a terminal event was seen.
  pub fn await_terminal(&self, timeout: Duration) -> bool {
    self.wait_until(timeout, |r| r.terminal_count > 0)
  }

  /// Blocks until at least `count` values arrived or `timeout` passes.
  pub fn await_items(&self, count: usize, timeout: Duration) -> bool {
    self.wait_until(timeout, |r| r.items.len() >= count)
  }

  fn wait_until(&self, timeout: Duration, done: impl Fn(&Record<Item, Err>) -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    let mut record = self.shared.record.lock();
    while !done(&record) {
      if self.shared.changed.wait_until(&mut record, deadline).timed_out() {
        return done(&record);
      }
    }
    true
  }

  fn update(&self, f: impl FnOnce(&mut Record<Item, Err>)) {
    let mut record = self.shared.record.lock();
    f(&mut record);
    record.threads.push(thread::current().id());
    drop(record);
    self.shared.changed.notify_all();
  }
}

impl<Item, Err> Observer<Item, Err> for TestObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.update(|r| r.items.push(value)); }

  fn error(&mut self, err: Err) {
    self.update(|r| {
      r.error = Some(err);
      r.terminal_count += 1;
    });
  }

  fn complete(&mut self) {
    self.update(|r| {
      r.completed = true;
      r.terminal_count += 1;
    });
  }
}
