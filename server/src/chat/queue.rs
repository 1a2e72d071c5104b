//! # Response Queue
//!
//! File: server/src/chat/queue.rs
//!
//! An unbounded FIFO of bot messages shared between the request handlers.
//! `POST /chatbot/` pushes every answer it produces; `GET /response/` pops
//! the oldest one.
//!
//! The queue is not partitioned per client: whoever polls first receives
//! the oldest answer, whichever request produced it. Nothing ever evicts
//! entries, so a queue that is never polled keeps growing.
//!
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Returned by [`ResponseQueue::pop_oldest`] when the queue is empty.
pub const NO_RESPONSE: &str = "No response";

/// Cloneable handle to a shared FIFO of bot messages.
///
/// Clones share the same buffer. The lock is held only for a single push
/// or pop and never across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct ResponseQueue {
    inner: Arc<Mutex<VecDeque<String>>>,
}

impl ResponseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to the tail.
    pub fn push(&self, message: impl Into<String>) {
        self.lock().push_back(message.into());
    }

    /// Removes and returns the head, or `None` when empty.
    pub fn try_pop(&self) -> Option<String> {
        self.lock().pop_front()
    }

    /// Removes and returns the head, or the [`NO_RESPONSE`] sentinel when
    /// the queue is empty (in which case nothing changes).
    pub fn pop_oldest(&self) -> String {
        self.try_pop().unwrap_or_else(|| NO_RESPONSE.to_string())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a VecDeque half-updated
    // for push_back/pop_front, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
