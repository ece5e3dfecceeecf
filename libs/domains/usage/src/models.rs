use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Resource family: each family is an independent ledger namespace.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceFamily {
    /// Small arms and ordnance stock ("weapon", "military vehicle", ...)
    Ammunition,
    /// Fuel stock ("diesel", "petrol", ...)
    Fuel,
    /// Vehicle park stock
    Vehicle,
}

/// Immutable audit entry: one consumed amount of one kind by one soldier.
///
/// Records are append-only; `id` is unique and monotonically increasing
/// within the recorder that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsageRecord {
    /// Monotonically increasing record ID
    pub id: u64,
    /// Soldier who consumed the resource
    pub soldier_id: Uuid,
    /// Ledger family the kind belongs to
    pub family: ResourceFamily,
    /// Resource kind consumed
    pub kind: String,
    /// Amount consumed
    pub amount: u64,
    /// When the consumption happened
    pub occurred_at: DateTime<Utc>,
}

/// Input for appending a usage record (the recorder assigns the ID).
#[derive(Debug, Clone)]
pub struct NewUsageRecord {
    pub soldier_id: Uuid,
    pub family: ResourceFamily,
    pub kind: String,
    pub amount: u64,
    pub occurred_at: DateTime<Utc>,
}

/// One (kind, amount) pair of a consumption request.
///
/// An amount of zero is valid and is treated as a no-op for that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ConsumptionItem {
    /// Resource kind to consume
    #[validate(length(min = 1, max = 120))]
    pub kind: String,
    /// Amount to consume (zero = no-op)
    pub amount: u64,
}

/// Request to debit one-or-more kinds from a family's ledger and record
/// the consumption against a soldier.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ConsumeRequest {
    /// Soldier drawing the resources
    pub soldier_id: Uuid,
    /// Kinds and amounts to consume, checked and applied in this order
    #[validate(length(min = 1), nested)]
    pub items: Vec<ConsumptionItem>,
    /// When the consumption happened (defaults to now)
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Result of a successful consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumptionOutcome {
    /// Stock debited and every usage record written.
    Applied { records: Vec<UsageRecord> },
    /// Stock debited but one or more usage records could not be written.
    /// The stock mutation stands; the caller must be told the audit trail
    /// is incomplete so recording can be retried.
    AppliedUnrecorded {
        records: Vec<UsageRecord>,
        unrecorded: Vec<ConsumptionItem>,
    },
}

impl ConsumptionOutcome {
    pub fn usage_recorded(&self) -> bool {
        matches!(self, ConsumptionOutcome::Applied { .. })
    }
}

/// Query filter for usage records.
///
/// `from` is inclusive, `to` is exclusive; both optional. Results are
/// ordered by `occurred_at` ascending.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct UsageFilter {
    /// Lower bound (inclusive) on `occurred_at`
    pub from: Option<DateTime<Utc>>,
    /// Upper bound (exclusive) on `occurred_at`
    pub to: Option<DateTime<Utc>>,
    /// Restrict to one soldier
    pub soldier_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_family_round_trips_through_strings() {
        assert_eq!(ResourceFamily::Ammunition.to_string(), "ammunition");
        assert_eq!(
            ResourceFamily::from_str("fuel").unwrap(),
            ResourceFamily::Fuel
        );
        assert!(ResourceFamily::from_str("plasma").is_err());
    }

    #[test]
    fn test_consume_request_requires_items() {
        let request = ConsumeRequest {
            soldier_id: Uuid::new_v4(),
            items: vec![],
            occurred_at: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_consume_request_rejects_empty_kind() {
        let request = ConsumeRequest {
            soldier_id: Uuid::new_v4(),
            items: vec![ConsumptionItem {
                kind: String::new(),
                amount: 3,
            }],
            occurred_at: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_zero_amount_item_is_valid() {
        let request = ConsumeRequest {
            soldier_id: Uuid::new_v4(),
            items: vec![ConsumptionItem {
                kind: "weapon".to_string(),
                amount: 0,
            }],
            occurred_at: None,
        };
        assert!(request.validate().is_ok());
    }
}
