//! Bounded record of Slack event ids already handled, used to drop retries.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::Mutex;

pub const SEEN_EVENTS_CAPACITY: usize = 100;

/// Insertion-ordered set with a fixed capacity. Inserting into a full set
/// evicts the oldest member first.
#[derive(Debug)]
pub struct BoundedSet {
    capacity: usize,
    order: VecDeque<String>,
    members: HashSet<String>,
}

impl BoundedSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Returns `false` when `id` was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.capacity == 0 || self.members.contains(id) {
            return false;
        }

        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }

        self.order.push_back(id.to_string());
        self.members.insert(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Shared handle over a [`BoundedSet`]; the mutex is the only access point.
#[derive(Clone)]
pub struct SeenEvents {
    inner: Arc<Mutex<BoundedSet>>,
}

impl SeenEvents {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BoundedSet::new(capacity))),
        }
    }

    /// Records `event_id`. Returns `false` if it had been seen before.
    pub async fn check_and_record(&self, event_id: &str) -> bool {
        let mut seen = self.inner.lock().await;
        seen.insert(event_id)
    }
}

impl Default for SeenEvents {
    fn default() -> Self {
        Self::new(SEEN_EVENTS_CAPACITY)
    }
}
