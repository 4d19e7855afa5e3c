use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::CustomerId;

/// Lifecycle status assigned to a customer by the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Registered, no meaningful purchase history yet.
    New,
    Active,
    /// High-value customer.
    Vip,
}

impl CustomerStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            CustomerStatus::New => "new",
            CustomerStatus::Active => "active",
            CustomerStatus::Vip => "vip",
        }
    }
}

/// Read-only customer projection returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: Decimal,
    #[serde(default)]
    pub last_order_date: Option<DateTime<Utc>>,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Checks the customer against a free-text query.
    ///
    /// `needle` is the lower-cased query used for name and email, `raw` is
    /// the trimmed query as typed, used for the phone number.
    pub fn matches_query(&self, needle: &str, raw: &str) -> bool {
        let contains_folded = |value: &Option<String>| {
            value
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(needle))
        };

        contains_folded(&self.name)
            || contains_folded(&self.email)
            || self.phone.as_deref().is_some_and(|p| p.contains(raw))
    }
}

/// Aggregate segment counts computed by the backend, displayed as-is.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentSummary {
    #[serde(default)]
    pub with_orders: u64,
    #[serde(default)]
    pub at_risk: u64,
    #[serde(default)]
    pub repeat_customers: u64,
    #[serde(default)]
    pub new_customers: u64,
    #[serde(default)]
    pub total: u64,
}
