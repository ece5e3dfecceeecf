//! Inventory Domain
//!
//! This module provides the inventory ledger for one resource family
//! (ammunition, fuel, vehicles, ...): named counters with non-negative
//! quantities, catalog CRUD, and atomic stock adjustment.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! Each ledger instance is an independent counter namespace: the
//! ammunition ledger and the fuel ledger never see each other's kinds.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{InMemoryLedger, LedgerService};
//!
//! let repository = InMemoryLedger::with_counters([("weapon", 500), ("military vehicle", 40)]);
//! let service = LedgerService::new(repository);
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use models::{CounterFilter, CreateCounter, ResourceCounter, StockAdjustment, UpdateCounter};
pub use repository::LedgerRepository;
pub use service::LedgerService;
