//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;
use rust_decimal::Decimal;

use crate::domain::customer::{Customer, SegmentSummary};
use crate::domain::filter::FilterCriteria;
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerReader, CustomerWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl CustomerReader for Repository {
        async fn list_customers(&self) -> RepositoryResult<Vec<Customer>>;
        async fn list_customers_with_orders(&self) -> RepositoryResult<Vec<Customer>>;
        async fn list_at_risk_customers(
            &self,
            inactive_days: u32,
        ) -> RepositoryResult<Vec<Customer>>;
        async fn list_vip_customers(&self, min_spent: Decimal) -> RepositoryResult<Vec<Customer>>;
        async fn filter_customers(
            &self,
            criteria: &FilterCriteria,
        ) -> RepositoryResult<Vec<Customer>>;
        async fn segment_summary(&self) -> RepositoryResult<SegmentSummary>;
    }

    #[async_trait]
    impl CustomerWriter for Repository {
        async fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
    }
}
