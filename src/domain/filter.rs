//! Fetch modes and advanced filter criteria for the customer list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerStatus;
use crate::domain::types::{Amount, TypeConstraintError};

/// Inactivity threshold, in days, of the at-risk preset.
pub const AT_RISK_INACTIVE_DAYS: u32 = 60;

/// Lifetime spend threshold of the VIP preset.
pub const VIP_MIN_SPENT: i64 = 1000;

/// Server-computed customer segment selectable as a preset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Segment {
    WithOrders,
    AtRisk,
    Vip,
    All,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::WithOrders,
        Segment::AtRisk,
        Segment::Vip,
        Segment::All,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Segment::WithOrders => "with-orders",
            Segment::AtRisk => "at-risk",
            Segment::Vip => "vip",
            Segment::All => "all",
        }
    }
}

/// Optional constraints forwarded to the backend filter endpoint.
///
/// Every field is independent; `None` means no constraint on that dimension.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_spent: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_spent: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_orders: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_orders: Option<u32>,
}

impl FilterCriteria {
    /// Rejects ranges whose lower bound is above the upper bound.
    pub fn validate_ranges(&self) -> Result<(), TypeConstraintError> {
        fn ordered<T: PartialOrd>(low: Option<T>, high: Option<T>) -> bool {
            match (low, high) {
                (Some(low), Some(high)) => low <= high,
                _ => true,
            }
        }

        if ordered(self.date_from, self.date_to)
            && ordered(self.min_spent, self.max_spent)
            && ordered(self.min_orders, self.max_orders)
        {
            Ok(())
        } else {
            Err(TypeConstraintError::InvertedRange)
        }
    }

    /// Returns `true` when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self == &FilterCriteria::default()
    }
}

/// Source of the base customer list held by a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchMode {
    Preset(Segment),
    Filtered(FilterCriteria),
}

impl Default for FetchMode {
    fn default() -> Self {
        FetchMode::Preset(Segment::All)
    }
}

impl FetchMode {
    /// Short identifier used by the mode indicator and export filenames.
    pub fn slug(&self) -> &'static str {
        match self {
            FetchMode::Preset(segment) => segment.slug(),
            FetchMode::Filtered(_) => "filtered",
        }
    }
}
