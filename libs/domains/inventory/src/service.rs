//! Ledger Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CounterFilter, CreateCounter, ResourceCounter, StockAdjustment, UpdateCounter};
use crate::repository::LedgerRepository;

/// Service layer for one ledger's business logic
///
/// The service handles validation and duplicate checks, and orchestrates
/// repository operations. Quantity mutations go through `add_stock` and
/// `sub_stock` only.
pub struct LedgerService<R: LedgerRepository> {
    repository: Arc<R>,
}

// Not derived: a derived Clone would demand R: Clone, and the in-memory
// store is deliberately not clonable (one counter table per ledger).
impl<R: LedgerRepository> Clone for LedgerService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: LedgerRepository> LedgerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new counter with validation
    #[instrument(skip(self, input), fields(kind = %input.kind))]
    pub async fn create_counter(&self, input: CreateCounter) -> LedgerResult<ResourceCounter> {
        input
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a counter by ID
    #[instrument(skip(self), fields(counter_id = %id))]
    pub async fn get_counter(&self, id: Uuid) -> LedgerResult<ResourceCounter> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(LedgerError::NotFound(id))
    }

    /// List counters in registration order
    pub async fn list_counters(&self, filter: CounterFilter) -> LedgerResult<Vec<ResourceCounter>> {
        self.repository.get_all(filter).await
    }

    /// Update a counter
    #[instrument(skip(self, input), fields(counter_id = %id))]
    pub async fn update_counter(
        &self,
        id: Uuid,
        input: UpdateCounter,
    ) -> LedgerResult<ResourceCounter> {
        input
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a counter
    #[instrument(skip(self), fields(counter_id = %id))]
    pub async fn delete_counter(&self, id: Uuid) -> LedgerResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(LedgerError::NotFound(id));
        }

        Ok(())
    }

    /// Increase stock of one kind
    #[instrument(skip(self, input), fields(kind = %input.kind, amount = input.amount))]
    pub async fn add_stock(&self, input: StockAdjustment) -> LedgerResult<ResourceCounter> {
        input
            .validate()
            .map_err(|e| LedgerError::InvalidAmount(e.to_string()))?;

        self.repository.add(&input.kind, input.amount).await
    }

    /// Decrease stock of one kind; the decrement is conditional on the
    /// live quantity and never drives the counter negative
    #[instrument(skip(self, input), fields(kind = %input.kind, amount = input.amount))]
    pub async fn sub_stock(&self, input: StockAdjustment) -> LedgerResult<ResourceCounter> {
        input
            .validate()
            .map_err(|e| LedgerError::InvalidAmount(e.to_string()))?;

        self.repository.sub(&input.kind, input.amount).await
    }
}
