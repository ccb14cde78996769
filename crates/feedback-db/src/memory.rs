use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use feedback_types::models::Feedback;
use feedback_types::validation::NewFeedback;

use crate::error::DbError;
use crate::models::{FeedbackDocument, write_timestamp};

/// Records kept by a default [`MemoryStore`]; the oldest are evicted first.
pub const MAX_RETAINED: usize = 1000;

/// Process-local store. Backs the build-time strategy, where no server is
/// reachable, and test suites. Clones share the same records.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    // Oldest first; equal timestamps keep insertion order.
    records: Mutex<VecDeque<FeedbackDocument>>,
    capacity: usize,
    unreachable: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(MAX_RETAINED)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that keeps at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                records: Mutex::new(VecDeque::new()),
                capacity: capacity.max(1),
                unreachable: AtomicBool::new(false),
            }),
        }
    }

    /// Simulate an outage: while unreachable every operation fails.
    pub fn set_reachable(&self, reachable: bool) {
        self.inner.unreachable.store(!reachable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_reachable(&self) -> Result<(), DbError> {
        if self.inner.unreachable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("in-memory store marked unreachable".into()));
        }
        Ok(())
    }

    fn records(&self) -> Result<MutexGuard<'_, VecDeque<FeedbackDocument>>, DbError> {
        self.inner
            .records
            .lock()
            .map_err(|e| DbError::Unavailable(format!("store lock poisoned: {}", e)))
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        self.check_reachable()
    }

    pub async fn list_recent(&self, limit: u32) -> Result<Vec<Feedback>, DbError> {
        self.check_reachable()?;
        let records = self.records()?;

        Ok(records
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .map(Feedback::from)
            .collect())
    }

    pub async fn insert(&self, new: &NewFeedback) -> Result<Feedback, DbError> {
        self.check_reachable()?;
        let doc = FeedbackDocument::new(new.name(), new.message(), write_timestamp());

        let mut records = self.records()?;
        let at = records.partition_point(|d| d.created_at <= doc.created_at);
        records.insert(at, doc.clone());
        while records.len() > self.inner.capacity {
            records.pop_front();
        }

        Ok(doc.into())
    }
}
