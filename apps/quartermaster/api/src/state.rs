//! Application state management.
//!
//! The shared state passed to all request handlers: one seeded in-memory
//! ledger per resource family, the shared usage log, and the personnel
//! binding. Cloning is cheap (Arc clones all the way down).

use std::sync::Arc;

use domain_inventory::{InMemoryLedger, LedgerService};
use domain_usage::{InMemoryUsageLog, OpenRoster};

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// Ammunition ledger (independent counter namespace)
    pub ammunition: LedgerService<InMemoryLedger>,
    /// Fuel ledger
    pub fuel: LedgerService<InMemoryLedger>,
    /// Vehicle park ledger
    pub vehicles: LedgerService<InMemoryLedger>,
    /// Append-only usage log, shared by both consumption families
    pub usage_log: Arc<InMemoryUsageLog>,
    /// Personnel binding: soldier validity stays with the personnel
    /// subsystem, only presence of an ID is enforced here
    pub personnel: Arc<OpenRoster>,
}

impl AppState {
    /// Build the state from configuration, seeding each family's ledger.
    pub fn from_config(config: Config) -> Self {
        let ammunition = LedgerService::new(InMemoryLedger::with_counters(
            config.seed.ammunition.iter().map(|(k, q)| (k.clone(), *q)),
        ));
        let fuel = LedgerService::new(InMemoryLedger::with_counters(
            config.seed.fuel.iter().map(|(k, q)| (k.clone(), *q)),
        ));
        let vehicles = LedgerService::new(InMemoryLedger::with_counters(
            config.seed.vehicles.iter().map(|(k, q)| (k.clone(), *q)),
        ));

        Self {
            config,
            ammunition,
            fuel,
            vehicles,
            usage_log: Arc::new(InMemoryUsageLog::new()),
            personnel: Arc::new(OpenRoster),
        }
    }
}
