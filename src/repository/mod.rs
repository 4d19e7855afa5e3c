//! Access to the shop backend API.
//!
//! The backend owns customer data, segment computation and persistence. The
//! traits below are the only seam through which services reach it.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::customer::{Customer, SegmentSummary};
use crate::domain::filter::{
    AT_RISK_INACTIVE_DAYS, FetchMode, FilterCriteria, Segment, VIP_MIN_SPENT,
};
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::{BackendClient, HttpRepository};

#[async_trait]
pub trait CustomerReader: Send + Sync {
    async fn list_customers(&self) -> RepositoryResult<Vec<Customer>>;
    async fn list_customers_with_orders(&self) -> RepositoryResult<Vec<Customer>>;
    async fn list_at_risk_customers(&self, inactive_days: u32) -> RepositoryResult<Vec<Customer>>;
    async fn list_vip_customers(&self, min_spent: Decimal) -> RepositoryResult<Vec<Customer>>;
    async fn filter_customers(&self, criteria: &FilterCriteria)
    -> RepositoryResult<Vec<Customer>>;
    async fn segment_summary(&self) -> RepositoryResult<SegmentSummary>;
}

#[async_trait]
pub trait CustomerWriter: Send + Sync {
    async fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
}

/// Issues the single backend call backing `mode`.
pub async fn fetch_for_mode<R>(repo: &R, mode: &FetchMode) -> RepositoryResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    match mode {
        FetchMode::Preset(Segment::WithOrders) => repo.list_customers_with_orders().await,
        FetchMode::Preset(Segment::AtRisk) => {
            repo.list_at_risk_customers(AT_RISK_INACTIVE_DAYS).await
        }
        FetchMode::Preset(Segment::Vip) => {
            repo.list_vip_customers(Decimal::from(VIP_MIN_SPENT)).await
        }
        FetchMode::Preset(Segment::All) => repo.list_customers().await,
        FetchMode::Filtered(criteria) => repo.filter_customers(criteria).await,
    }
}
