//! In-process usage log.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{UsageError, UsageResult};
use crate::models::{NewUsageRecord, UsageFilter, UsageRecord};
use crate::repository::UsageRepository;

/// Append-only in-memory usage log with monotonically increasing IDs.
pub struct InMemoryUsageLog {
    records: Mutex<Vec<UsageRecord>>,
    next_id: AtomicU64,
}

impl InMemoryUsageLog {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryUsageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageRepository for InMemoryUsageLog {
    async fn append(&self, input: NewUsageRecord) -> UsageResult<UsageRecord> {
        let record = UsageRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            soldier_id: input.soldier_id,
            family: input.family,
            kind: input.kind,
            amount: input.amount,
            occurred_at: input.occurred_at,
        };

        let mut records = self
            .records
            .lock()
            .map_err(|_| UsageError::Unavailable("usage log lock poisoned".to_string()))?;
        records.push(record.clone());

        Ok(record)
    }

    async fn query(&self, filter: UsageFilter) -> UsageResult<Vec<UsageRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| UsageError::Unavailable("usage log lock poisoned".to_string()))?;

        let mut matching: Vec<UsageRecord> = records
            .iter()
            .filter(|r| filter.from.is_none_or(|from| r.occurred_at >= from))
            .filter(|r| filter.to.is_none_or(|to| r.occurred_at < to))
            .filter(|r| filter.soldier_id.is_none_or(|id| r.soldier_id == id))
            .cloned()
            .collect();

        // Stable sort: records with equal timestamps keep append order.
        matching.sort_by_key(|r| r.occurred_at);

        Ok(matching)
    }
}
