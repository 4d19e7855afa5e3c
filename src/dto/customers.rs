use serde::{Deserialize, Serialize};

use crate::domain::customer::{Customer, SegmentSummary};
use crate::domain::filter::FilterCriteria;

/// Query parameters accepted by the customers page.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    /// Free-text search; `None` keeps the stored query.
    pub search: Option<String>,
}

/// Data required to render the customers template.
#[derive(Debug, Serialize)]
pub struct CustomersPageData {
    /// Visible customers after the free-text filter.
    pub customers: Vec<Customer>,
    /// Size of the base list before the free-text filter.
    pub total_loaded: usize,
    /// Slug of the mode that produced the base list.
    pub mode: &'static str,
    pub search_query: String,
    /// Criteria echoed back to the advanced filter form.
    pub criteria: Option<FilterCriteria>,
    pub summary: Option<SegmentSummary>,
}
