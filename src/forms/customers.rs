use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::customer::CustomerStatus;
use crate::domain::filter::{FilterCriteria, Segment};
use crate::domain::types::Amount;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Preset button submitted from the customers page.
pub struct SelectModeForm {
    pub mode: Segment,
}

#[derive(Debug, Default, Deserialize)]
/// Advanced filter form. Empty inputs mean "no constraint".
pub struct AdvancedFilterForm {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date_from: String,
    #[serde(default)]
    pub date_to: String,
    #[serde(default)]
    pub min_spent: String,
    #[serde(default)]
    pub max_spent: String,
    #[serde(default)]
    pub min_orders: String,
    #[serde(default)]
    pub max_orders: String,
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

fn parse_status(value: &str) -> Result<Option<CustomerStatus>, FormError> {
    non_blank(value)
        .map(|v| match v {
            "new" => Ok(CustomerStatus::New),
            "active" => Ok(CustomerStatus::Active),
            "vip" => Ok(CustomerStatus::Vip),
            _ => Err(FormError::InvalidStatus),
        })
        .transpose()
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, FormError> {
    non_blank(value)
        .map(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| FormError::InvalidDate))
        .transpose()
}

fn parse_amount(value: &str) -> Result<Option<Amount>, FormError> {
    non_blank(value)
        .map(|v| {
            Decimal::from_str(v)
                .ok()
                .and_then(|d| Amount::new(d).ok())
                .ok_or(FormError::InvalidAmount)
        })
        .transpose()
}

fn parse_count(value: &str) -> Result<Option<u32>, FormError> {
    non_blank(value)
        .map(|v| v.parse::<u32>().map_err(|_| FormError::InvalidOrderCount))
        .transpose()
}

impl TryFrom<AdvancedFilterForm> for FilterCriteria {
    type Error = FormError;

    fn try_from(form: AdvancedFilterForm) -> Result<Self, Self::Error> {
        Ok(FilterCriteria {
            status: parse_status(&form.status)?,
            date_from: parse_date(&form.date_from)?,
            date_to: parse_date(&form.date_to)?,
            min_spent: parse_amount(&form.min_spent)?,
            max_spent: parse_amount(&form.max_spent)?,
            min_orders: parse_count(&form.min_orders)?,
            max_orders: parse_count(&form.max_orders)?,
        })
    }
}
