//! In-process ledger store.
//!
//! The gateway holds live counters in memory: one mutex guards the whole
//! family's counter table, so every `add`/`sub` is a conditional
//! read-modify-write against the live quantity. Registration order is
//! preserved for `get_all`.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CounterFilter, CreateCounter, ResourceCounter, UpdateCounter};
use crate::repository::LedgerRepository;

/// In-memory ledger for one resource family.
pub struct InMemoryLedger {
    counters: Mutex<Vec<ResourceCounter>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(Vec::new()),
        }
    }

    /// Build a ledger pre-seeded with `(kind, quantity)` pairs.
    pub fn with_counters<I, K>(seed: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        let now = Utc::now();
        let counters = seed
            .into_iter()
            .map(|(kind, quantity)| ResourceCounter {
                id: Uuid::new_v4(),
                kind: kind.into(),
                quantity,
                created_at: now,
                updated_at: now,
            })
            .collect();

        Self {
            counters: Mutex::new(counters),
        }
    }

    fn lock(&self) -> LedgerResult<MutexGuard<'_, Vec<ResourceCounter>>> {
        self.counters
            .lock()
            .map_err(|_| LedgerError::Unavailable("ledger lock poisoned".to_string()))
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn create(&self, input: CreateCounter) -> LedgerResult<ResourceCounter> {
        let mut counters = self.lock()?;

        if counters.iter().any(|c| c.kind == input.kind) {
            return Err(LedgerError::DuplicateKind(input.kind));
        }

        let now = Utc::now();
        let counter = ResourceCounter {
            id: Uuid::new_v4(),
            kind: input.kind,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        };
        counters.push(counter.clone());

        Ok(counter)
    }

    async fn get_by_id(&self, id: Uuid) -> LedgerResult<Option<ResourceCounter>> {
        let counters = self.lock()?;
        Ok(counters.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_kind(&self, kind: &str) -> LedgerResult<Option<ResourceCounter>> {
        let counters = self.lock()?;
        Ok(counters.iter().find(|c| c.kind == kind).cloned())
    }

    async fn get_all(&self, filter: CounterFilter) -> LedgerResult<Vec<ResourceCounter>> {
        let counters = self.lock()?;
        Ok(counters
            .iter()
            .filter(|c| filter.kind.as_deref().is_none_or(|kind| c.kind == kind))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, input: UpdateCounter) -> LedgerResult<ResourceCounter> {
        let mut counters = self.lock()?;

        if let Some(ref new_kind) = input.kind {
            if counters.iter().any(|c| c.kind == *new_kind && c.id != id) {
                return Err(LedgerError::DuplicateKind(new_kind.clone()));
            }
        }

        let counter = counters
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        counter.apply_update(input);

        Ok(counter.clone())
    }

    async fn delete(&self, id: Uuid) -> LedgerResult<bool> {
        let mut counters = self.lock()?;
        let before = counters.len();
        counters.retain(|c| c.id != id);
        Ok(counters.len() < before)
    }

    async fn add(&self, kind: &str, amount: u64) -> LedgerResult<ResourceCounter> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount(
                "amount must be positive".to_string(),
            ));
        }

        let mut counters = self.lock()?;
        let counter = counters
            .iter_mut()
            .find(|c| c.kind == kind)
            .ok_or_else(|| LedgerError::UnknownKind(kind.to_string()))?;

        counter.quantity = counter.quantity.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("quantity overflow for '{}'", kind))
        })?;
        counter.updated_at = Utc::now();

        Ok(counter.clone())
    }

    async fn sub(&self, kind: &str, amount: u64) -> LedgerResult<ResourceCounter> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount(
                "amount must be positive".to_string(),
            ));
        }

        let mut counters = self.lock()?;
        let counter = counters
            .iter_mut()
            .find(|c| c.kind == kind)
            .ok_or_else(|| LedgerError::UnknownKind(kind.to_string()))?;

        // The authoritative check: live quantity under the lock, not any
        // snapshot the caller may have validated against earlier.
        if counter.quantity < amount {
            return Err(LedgerError::InsufficientStock {
                kind: kind.to_string(),
                available: counter.quantity,
                requested: amount,
            });
        }

        counter.quantity -= amount;
        counter.updated_at = Utc::now();

        Ok(counter.clone())
    }
}
