//! Usage Domain
//!
//! The consumption core of the gateway: records which soldier consumed how
//! much of which resource, coordinates multi-kind stock debits against a
//! ledger, and aggregates usage statistics for the dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────┐   ┌────────────────────┐
//! │ ConsumptionService     │   │ StatisticsService  │
//! │ (saga: check → apply   │   │ (pure reduction)   │
//! │  → compensate)         │   │                    │
//! └───┬──────────┬─────┬───┘   └─────────┬──────────┘
//!     │          │     │                 │
//! ┌───▼────┐ ┌───▼───┐ └──────────┐      │
//! │ Stock  │ │ Personnel │    ┌───▼──────▼───┐
//! │ Ledger │ │ Directory │    │ UsageRepository │
//! └────────┘ └───────────┘    └───────────────┘
//! ```
//!
//! All three collaborators are trait objects injected at construction, so
//! tests substitute in-memory fakes and a deployment substitutes service
//! clients without touching the coordinator.

pub mod error;
pub mod handlers;
pub mod ledger;
pub mod memory;
pub mod models;
pub mod personnel;
pub mod repository;
pub mod retry;
pub mod service;

// Re-export commonly used types
pub use error::{UsageError, UsageResult};
pub use ledger::{LedgerFault, StockLedger, StockLevel};
pub use memory::InMemoryUsageLog;
pub use models::{
    ConsumeRequest, ConsumptionItem, ConsumptionOutcome, NewUsageRecord, ResourceFamily,
    UsageFilter, UsageRecord,
};
pub use personnel::{InMemoryRoster, OpenRoster, PersonnelDirectory, PersonnelFault};
pub use repository::UsageRepository;
pub use retry::RetryConfig;
pub use service::{ConsumptionService, StatisticsService};
