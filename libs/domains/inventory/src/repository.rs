use async_trait::async_trait;
use uuid::Uuid;

use crate::error::LedgerResult;
use crate::models::{CounterFilter, CreateCounter, ResourceCounter, UpdateCounter};

/// Repository trait for ledger persistence
///
/// This trait defines the data access interface for one ledger (one
/// resource family). Implementations can use different storage backends;
/// the in-process store is [`crate::memory::InMemoryLedger`].
///
/// `add`/`sub` are the only mutation paths for quantities. `sub` MUST be a
/// conditional decrement, atomic relative to concurrent callers: the check
/// against the live quantity and the decrement happen as one step, so two
/// racing subtractions can never drive a counter below zero.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Register a new counter
    async fn create(&self, input: CreateCounter) -> LedgerResult<ResourceCounter>;

    /// Get a counter by ID
    async fn get_by_id(&self, id: Uuid) -> LedgerResult<Option<ResourceCounter>>;

    /// Find a counter by kind
    async fn find_by_kind(&self, kind: &str) -> LedgerResult<Option<ResourceCounter>>;

    /// All counters, in registration order
    async fn get_all(&self, filter: CounterFilter) -> LedgerResult<Vec<ResourceCounter>>;

    /// Update an existing counter
    async fn update(&self, id: Uuid, input: UpdateCounter) -> LedgerResult<ResourceCounter>;

    /// Delete a counter by ID
    async fn delete(&self, id: Uuid) -> LedgerResult<bool>;

    /// Increase a counter's quantity; fails on unknown kind
    async fn add(&self, kind: &str, amount: u64) -> LedgerResult<ResourceCounter>;

    /// Conditionally decrease a counter's quantity; fails on unknown kind
    /// or when the live quantity is smaller than `amount`
    async fn sub(&self, kind: &str, amount: u64) -> LedgerResult<ResourceCounter>;
}
