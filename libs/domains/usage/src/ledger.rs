//! Stock ledger collaborator contract.
//!
//! The coordinator does not own stock; it talks to a resource-catalog
//! service through this trait. The gateway binds an adapter over the
//! in-process inventory ledger; a deployment against a remote catalog
//! would bind its client here instead.

use async_trait::async_trait;
use thiserror::Error;

/// One kind's current stock level, as reported by a ledger snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLevel {
    pub kind: String,
    pub quantity: u64,
}

/// Failures the ledger collaborator can report.
#[derive(Debug, Clone, Error)]
pub enum LedgerFault {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("unknown resource kind: '{0}'")]
    UnknownKind(String),

    #[error("insufficient stock of '{kind}': available {available}, requested {requested}")]
    Insufficient {
        kind: String,
        available: u64,
        requested: u64,
    },

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Ledger operations the coordinator consumes.
///
/// `sub` MUST re-validate against the live quantity at the instant of
/// mutation: the coordinator's snapshot pre-check is advisory only, and
/// concurrent consumers may have depleted stock in between.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Current quantities for every kind, in registration order.
    async fn snapshot(&self) -> Result<Vec<StockLevel>, LedgerFault>;

    /// Increase one kind's quantity. Used as the compensating action.
    async fn add(&self, kind: &str, amount: u64) -> Result<(), LedgerFault>;

    /// Conditionally decrease one kind's quantity.
    async fn sub(&self, kind: &str, amount: u64) -> Result<(), LedgerFault>;
}
