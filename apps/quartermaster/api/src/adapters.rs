//! Bindings between the usage coordinator's collaborator contracts and
//! the in-process inventory ledgers.
//!
//! A deployment against a remote resource catalog would implement
//! [`StockLedger`] over its service client instead; the coordinator does
//! not change either way.

use async_trait::async_trait;

use domain_inventory::{
    CounterFilter, LedgerError, LedgerRepository, LedgerService, StockAdjustment,
};
use domain_usage::{LedgerFault, StockLedger, StockLevel};

/// Adapts a [`LedgerService`] to the coordinator's [`StockLedger`] contract.
pub struct CatalogLedger<R: LedgerRepository> {
    service: LedgerService<R>,
}

impl<R: LedgerRepository> CatalogLedger<R> {
    pub fn new(service: LedgerService<R>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: LedgerRepository> StockLedger for CatalogLedger<R> {
    async fn snapshot(&self) -> Result<Vec<StockLevel>, LedgerFault> {
        let counters = self
            .service
            .list_counters(CounterFilter::default())
            .await
            .map_err(to_fault)?;

        Ok(counters
            .into_iter()
            .map(|counter| StockLevel {
                kind: counter.kind,
                quantity: counter.quantity,
            })
            .collect())
    }

    async fn add(&self, kind: &str, amount: u64) -> Result<(), LedgerFault> {
        self.service
            .add_stock(StockAdjustment {
                kind: kind.to_string(),
                amount,
            })
            .await
            .map(|_| ())
            .map_err(to_fault)
    }

    async fn sub(&self, kind: &str, amount: u64) -> Result<(), LedgerFault> {
        self.service
            .sub_stock(StockAdjustment {
                kind: kind.to_string(),
                amount,
            })
            .await
            .map(|_| ())
            .map_err(to_fault)
    }
}

fn to_fault(err: LedgerError) -> LedgerFault {
    match err {
        LedgerError::InsufficientStock {
            kind,
            available,
            requested,
        } => LedgerFault::Insufficient {
            kind,
            available,
            requested,
        },
        LedgerError::UnknownKind(kind) => LedgerFault::UnknownKind(kind),
        LedgerError::InvalidAmount(msg) | LedgerError::Validation(msg) => {
            LedgerFault::InvalidAmount(msg)
        }
        LedgerError::Unavailable(msg) => LedgerFault::Unavailable(msg),
        // Catalog CRUD errors have no counterpart in the stock contract;
        // they cannot arise from snapshot/add/sub.
        other => LedgerFault::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_inventory::InMemoryLedger;

    #[tokio::test]
    async fn test_snapshot_reports_counters_in_registration_order() {
        let service = LedgerService::new(InMemoryLedger::with_counters([
            ("weapon", 10),
            ("military vehicle", 4),
        ]));
        let adapter = CatalogLedger::new(service);

        let snapshot = adapter.snapshot().await.unwrap();
        assert_eq!(
            snapshot,
            vec![
                StockLevel {
                    kind: "weapon".to_string(),
                    quantity: 10
                },
                StockLevel {
                    kind: "military vehicle".to_string(),
                    quantity: 4
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_sub_maps_insufficient_stock_fault() {
        let service = LedgerService::new(InMemoryLedger::with_counters([("diesel", 5)]));
        let adapter = CatalogLedger::new(service);

        let fault = adapter.sub("diesel", 9).await.unwrap_err();
        assert!(matches!(
            fault,
            LedgerFault::Insufficient {
                available: 5,
                requested: 9,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_add_maps_unknown_kind_fault() {
        let service = LedgerService::new(InMemoryLedger::new());
        let adapter = CatalogLedger::new(service);

        let fault = adapter.add("diesel", 1).await.unwrap_err();
        assert!(matches!(fault, LedgerFault::UnknownKind(_)));
    }
}
