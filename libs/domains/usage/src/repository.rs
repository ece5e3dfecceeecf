use async_trait::async_trait;

use crate::error::UsageResult;
use crate::models::{NewUsageRecord, UsageFilter, UsageRecord};

/// Repository trait for the append-only usage log
///
/// Records are immutable once written. `append` assigns a unique,
/// monotonically increasing ID; it fails only when the backing store is
/// unavailable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Append one usage record
    async fn append(&self, input: NewUsageRecord) -> UsageResult<UsageRecord>;

    /// Records matching the filter, ordered by `occurred_at` ascending
    async fn query(&self, filter: UsageFilter) -> UsageResult<Vec<UsageRecord>>;
}
