use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A named stock counter within one ledger.
///
/// The quantity is unsigned by construction: no sequence of ledger
/// operations can observe a negative stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResourceCounter {
    /// Unique identifier
    pub id: Uuid,
    /// Counter name, unique within its ledger (e.g. "weapon", "diesel")
    pub kind: String,
    /// Current stock level
    pub quantity: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for registering a new counter in the ledger
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCounter {
    /// Counter name, unique within the ledger
    #[validate(length(min = 1, max = 120))]
    pub kind: String,
    /// Initial stock level (defaults to zero)
    #[serde(default)]
    pub quantity: u64,
}

/// DTO for updating an existing counter
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCounter {
    /// New counter name
    #[validate(length(min = 1, max = 120))]
    pub kind: Option<String>,
    /// Replacement stock level
    pub quantity: Option<u64>,
}

/// DTO for the add/sub stock adjustment endpoints
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StockAdjustment {
    /// Counter name to adjust
    #[validate(length(min = 1, max = 120))]
    pub kind: String,
    /// Amount to add or subtract; must be positive
    #[validate(range(min = 1))]
    pub amount: u64,
}

/// Query filters for listing counters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct CounterFilter {
    /// Restrict the listing to one kind
    pub kind: Option<String>,
}

impl ResourceCounter {
    /// Apply updates from an UpdateCounter DTO
    pub fn apply_update(&mut self, update: UpdateCounter) {
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        self.updated_at = Utc::now();
    }
}
