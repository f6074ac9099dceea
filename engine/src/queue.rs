//! Bounded, thread-safe FIFO queue with close semantics.
//!
//! Backed by a single `Mutex` plus two `Condvar`s (not-empty, not-full), the
//! direct translation of the pthread-mutex/condvar design the pipeline was
//! originally specified with. `close()` is idempotent and wakes every
//! blocked producer and consumer; once closed, `push` always fails but
//! already-enqueued items still drain via `pop`.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

struct State<T> {
    items: VecDeque<T>,
    closed: bool,
}

pub struct BlockingQueue<T> {
    capacity: Option<usize>,
    state: Mutex<State<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> BlockingQueue<T> {
    /// Create an open queue. `capacity = None` means unbounded.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            state: Mutex::new(State {
                items: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Block while the queue is full and open; enqueue and return `Ok(())`.
    /// Returns `Err(item)` immediately if the queue is already closed.
    pub fn push(&self, item: T) -> Result<(), T> {
        let mut state = self.state.lock().unwrap();
        loop {
            if state.closed {
                return Err(item);
            }
            match self.capacity {
                Some(cap) if state.items.len() >= cap => {
                    state = self.not_full.wait(state).unwrap();
                }
                _ => break,
            }
        }
        state.items.push_back(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Block while the queue is empty and open. Returns `Some(item)` on
    /// success, or `None` once the queue is empty *and* closed
    /// (end-of-stream).
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(item) = state.items.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if state.closed {
                return None;
            }
            state = self.not_empty.wait(state).unwrap();
        }
    }

    /// Non-blocking pop: `None` if the queue is currently empty.
    pub fn try_pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        let item = state.items.pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Idempotent. Wakes all blocked producers and consumers.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return;
        }
        state.closed = true;
        drop(state);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn size(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().items.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}
