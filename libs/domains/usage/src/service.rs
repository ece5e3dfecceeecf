//! Consumption coordination and usage statistics.
//!
//! `ConsumptionService` is the write path: it turns one consumption
//! request into a sequence of conditional ledger decrements plus usage
//! records, with a compensating increment per applied decrement if the
//! sequence cannot complete. `StatisticsService` is the read path: pure
//! reductions over the usage log.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{UsageError, UsageResult};
use crate::ledger::{LedgerFault, StockLedger};
use crate::models::{
    ConsumeRequest, ConsumptionItem, ConsumptionOutcome, NewUsageRecord, ResourceFamily,
    UsageFilter, UsageRecord,
};
use crate::personnel::{PersonnelDirectory, PersonnelFault};
use crate::repository::UsageRepository;
use crate::retry::{RetryConfig, retry_with_backoff};

/// Coordinates consumption of one resource family's stock.
///
/// Collaborators are injected at construction: the stock ledger, the
/// personnel directory, and the usage log. One instance serves one family;
/// instances for different families may share the usage log and the
/// personnel directory.
pub struct ConsumptionService<L, P, U> {
    family: ResourceFamily,
    ledger: Arc<L>,
    personnel: Arc<P>,
    usage: Arc<U>,
    retry: RetryConfig,
}

impl<L, P, U> ConsumptionService<L, P, U>
where
    L: StockLedger,
    P: PersonnelDirectory,
    U: UsageRepository,
{
    pub fn new(family: ResourceFamily, ledger: Arc<L>, personnel: Arc<P>, usage: Arc<U>) -> Self {
        Self {
            family,
            ledger,
            personnel,
            usage,
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry policy for the read-only snapshot step.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Consume one-or-more kinds from this family's ledger and record the
    /// usage against a soldier.
    ///
    /// Either every item in the request is applied or none is. The only
    /// exception is the audit trail: when stock was debited but a usage
    /// record could not be written, the outcome reports the unrecorded
    /// items instead of rolling the stock back.
    #[instrument(skip(self, request), fields(family = %self.family, soldier_id = %request.soldier_id))]
    pub async fn consume(&self, request: ConsumeRequest) -> UsageResult<ConsumptionOutcome> {
        request
            .validate()
            .map_err(|e| UsageError::Validation(e.to_string()))?;

        if request.soldier_id.is_nil() {
            return Err(UsageError::Validation(
                "soldier_id must not be nil".to_string(),
            ));
        }

        // A kind appearing twice would make "reverse the applied items"
        // ambiguous, so duplicates are rejected up front.
        let mut seen = HashSet::new();
        for item in &request.items {
            if !seen.insert(item.kind.as_str()) {
                return Err(UsageError::Validation(format!(
                    "duplicate kind '{}' in request",
                    item.kind
                )));
            }
        }

        match self.personnel.soldier_exists(request.soldier_id).await {
            Ok(true) => {}
            Ok(false) => return Err(UsageError::UnknownSoldier(request.soldier_id)),
            Err(PersonnelFault::Unavailable(reason)) => {
                return Err(UsageError::Unavailable(reason));
            }
        }

        // Zero-amount items are valid no-ops.
        let items: Vec<ConsumptionItem> = request
            .items
            .iter()
            .filter(|item| item.amount > 0)
            .cloned()
            .collect();

        if items.is_empty() {
            return Ok(ConsumptionOutcome::Applied {
                records: Vec::new(),
            });
        }

        self.precheck(&items).await?;
        self.apply(&items).await?;

        let occurred_at = request.occurred_at.unwrap_or_else(Utc::now);
        let mut records = Vec::with_capacity(items.len());
        let mut unrecorded = Vec::new();

        for item in &items {
            let input = NewUsageRecord {
                soldier_id: request.soldier_id,
                family: self.family,
                kind: item.kind.clone(),
                amount: item.amount,
                occurred_at,
            };
            match self.usage.append(input).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        kind = %item.kind,
                        amount = item.amount,
                        "stock debited but usage record not written: {}",
                        e
                    );
                    unrecorded.push(item.clone());
                }
            }
        }

        if unrecorded.is_empty() {
            Ok(ConsumptionOutcome::Applied { records })
        } else {
            Ok(ConsumptionOutcome::AppliedUnrecorded { records, unrecorded })
        }
    }

    /// Fast-path pre-check against a snapshot, in request order.
    ///
    /// The snapshot read is the only step retried on `Unavailable`; the
    /// authoritative stock check is the conditional decrement in `apply`.
    async fn precheck(&self, items: &[ConsumptionItem]) -> UsageResult<()> {
        let snapshot = retry_with_backoff(|| self.ledger.snapshot(), self.retry.clone())
            .await
            .map_err(fault_to_error)?;

        let levels: HashMap<&str, u64> = snapshot
            .iter()
            .map(|level| (level.kind.as_str(), level.quantity))
            .collect();

        for item in items {
            let available = *levels
                .get(item.kind.as_str())
                .ok_or_else(|| UsageError::UnknownKind(item.kind.clone()))?;

            if available < item.amount {
                return Err(UsageError::InsufficientStock {
                    kind: item.kind.clone(),
                    available,
                    requested: item.amount,
                });
            }
        }

        Ok(())
    }

    /// Apply the decrements in request order; on a mid-sequence failure,
    /// reverse the already-applied items before reporting the failure.
    async fn apply(&self, items: &[ConsumptionItem]) -> UsageResult<()> {
        for (index, item) in items.iter().enumerate() {
            if let Err(fault) = self.ledger.sub(&item.kind, item.amount).await {
                warn!(
                    kind = %item.kind,
                    amount = item.amount,
                    applied = index,
                    "apply failed mid-sequence, compensating: {}",
                    fault
                );
                self.compensate(&items[..index]).await?;
                return Err(fault_to_error(fault));
            }
        }

        Ok(())
    }

    /// Reverse already-applied decrements, newest first. Mutations are
    /// never retried; a failed compensation leaves the ledger inconsistent
    /// and is surfaced as its own error.
    async fn compensate(&self, applied: &[ConsumptionItem]) -> UsageResult<()> {
        let mut stranded = Vec::new();
        let mut reason = String::new();

        for item in applied.iter().rev() {
            if let Err(fault) = self.ledger.add(&item.kind, item.amount).await {
                stranded.push(item.kind.clone());
                reason = fault.to_string();
            }
        }

        if stranded.is_empty() {
            Ok(())
        } else {
            Err(UsageError::CompensationFailed {
                kinds: stranded,
                reason,
            })
        }
    }
}

fn fault_to_error(fault: LedgerFault) -> UsageError {
    match fault {
        LedgerFault::InvalidAmount(msg) => UsageError::Validation(msg),
        LedgerFault::UnknownKind(kind) => UsageError::UnknownKind(kind),
        LedgerFault::Insufficient {
            kind,
            available,
            requested,
        } => UsageError::InsufficientStock {
            kind,
            available,
            requested,
        },
        LedgerFault::Unavailable(msg) => UsageError::Unavailable(msg),
    }
}

/// Read-only reductions over the usage log.
pub struct StatisticsService<U> {
    usage: Arc<U>,
}

impl<U: UsageRepository> StatisticsService<U> {
    pub fn new(usage: Arc<U>) -> Self {
        Self { usage }
    }

    /// Per-kind totals for one family on one UTC day, optionally
    /// restricted to one soldier.
    #[instrument(skip(self), fields(family = %family, date = %date))]
    pub async fn statistics(
        &self,
        family: ResourceFamily,
        date: NaiveDate,
        soldier_id: Option<Uuid>,
    ) -> UsageResult<BTreeMap<String, u64>> {
        let from = date.and_time(NaiveTime::MIN).and_utc();
        let filter = UsageFilter {
            from: Some(from),
            to: Some(from + Duration::days(1)),
            soldier_id,
        };

        let records = self.usage.query(filter).await?;

        let mut totals = BTreeMap::new();
        for record in records.into_iter().filter(|r| r.family == family) {
            *totals.entry(record.kind).or_insert(0) += record.amount;
        }

        Ok(totals)
    }

    /// Raw usage records for a date range / soldier.
    pub async fn records(&self, filter: UsageFilter) -> UsageResult<Vec<UsageRecord>> {
        self.usage.query(filter).await
    }
}
