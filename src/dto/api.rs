//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::domain::customer::Customer;

/// Result payload returned by [`crate::services::api::list_customers`].
#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    /// Number of visible customers.
    pub total: usize,
    /// Slug of the mode that produced the list.
    pub mode: &'static str,
    pub customers: Vec<Customer>,
}
