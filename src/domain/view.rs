//! Per-session customer list state.
//!
//! The view owns the last successfully fetched base list, the fetch mode that
//! produced it, the free-text query and the last segment counts. The visible
//! list is always derived from the base list and the query, never stored.

use crate::domain::customer::{Customer, SegmentSummary};
use crate::domain::filter::FetchMode;
use crate::domain::search::apply_text_filter;
use crate::domain::types::CustomerId;

/// Handle for an in-flight fetch. Only the most recently issued ticket may
/// replace the base list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    mode: FetchMode,
}

impl FetchTicket {
    pub fn mode(&self) -> &FetchMode {
        &self.mode
    }
}

#[derive(Clone, Debug, Default)]
pub struct CustomerView {
    base: Vec<Customer>,
    mode: FetchMode,
    query: String,
    generation: u64,
    loaded: bool,
    summary: Option<SegmentSummary>,
}

impl CustomerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch for `mode`, invalidating every earlier ticket.
    pub fn begin_fetch(&mut self, mode: FetchMode) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            mode,
        }
    }

    /// Applies a fetched list if `ticket` is still current.
    ///
    /// Returns `false` and leaves the view untouched for a stale ticket.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, customers: Vec<Customer>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.base = customers;
        self.mode = ticket.mode;
        self.loaded = true;
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> &FetchMode {
        &self.mode
    }

    pub fn base(&self) -> &[Customer] {
        &self.base
    }

    /// Whether any fetch has ever succeeded for this view.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Segment counts from the last summary request; `None` hides the panel.
    pub fn summary(&self) -> Option<&SegmentSummary> {
        self.summary.as_ref()
    }

    pub fn set_summary(&mut self, summary: Option<SegmentSummary>) {
        self.summary = summary;
    }

    /// Customers of the base list matching the current query.
    pub fn visible(&self) -> Vec<&Customer> {
        apply_text_filter(&self.base, &self.query)
    }

    /// Drops a customer from the base list after a confirmed deletion.
    pub fn forget(&mut self, id: CustomerId) {
        self.base.retain(|customer| customer.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{FilterCriteria, Segment};
    use crate::domain::search::tests::customer;

    fn vip_list() -> Vec<Customer> {
        vec![
            customer(1, "Yassine", "y@x.com", "0600000002"),
            customer(2, "Amal", "a@x.com", "0600000001"),
        ]
    }

    fn at_risk_list() -> Vec<Customer> {
        vec![
            customer(3, "Yasmine", "yasmine@x.com", "0600000003"),
            customer(4, "Hamza", "h@x.com", "0600000004"),
        ]
    }

    fn visible_ids(view: &CustomerView) -> Vec<i64> {
        view.visible().iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn switching_mode_keeps_query_and_refilters() {
        let mut view = CustomerView::new();
        let ticket = view.begin_fetch(FetchMode::Preset(Segment::Vip));
        assert!(view.complete_fetch(ticket, vip_list()));
        view.set_query("yas");
        assert_eq!(visible_ids(&view), vec![1]);

        let ticket = view.begin_fetch(FetchMode::Preset(Segment::AtRisk));
        assert!(view.complete_fetch(ticket, at_risk_list()));

        assert_eq!(view.query(), "yas");
        assert_eq!(view.mode().slug(), "at-risk");
        assert_eq!(visible_ids(&view), vec![3]);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut view = CustomerView::new();
        let slow = view.begin_fetch(FetchMode::Preset(Segment::Vip));
        let fast = view.begin_fetch(FetchMode::Preset(Segment::AtRisk));

        assert!(view.complete_fetch(fast, at_risk_list()));
        assert!(!view.complete_fetch(slow, vip_list()));

        assert_eq!(view.mode(), &FetchMode::Preset(Segment::AtRisk));
        assert_eq!(visible_ids(&view), vec![3, 4]);
    }

    #[test]
    fn abandoned_fetch_keeps_last_known_good() {
        let mut view = CustomerView::new();
        let ticket = view.begin_fetch(FetchMode::Preset(Segment::Vip));
        view.complete_fetch(ticket, vip_list());

        // A failed request never reaches `complete_fetch`.
        let _failed = view.begin_fetch(FetchMode::Filtered(FilterCriteria::default()));

        assert_eq!(view.mode().slug(), "vip");
        assert_eq!(view.base().len(), 2);
        assert!(view.is_loaded());
    }

    #[test]
    fn forget_removes_deleted_customer() {
        let mut view = CustomerView::new();
        let ticket = view.begin_fetch(FetchMode::default());
        view.complete_fetch(ticket, vip_list());

        view.forget(CustomerId::new(2).unwrap());

        assert_eq!(visible_ids(&view), vec![1]);
    }

    #[test]
    fn query_changes_keep_the_summary() {
        let mut view = CustomerView::new();
        view.set_summary(Some(SegmentSummary {
            total: 4,
            ..SegmentSummary::default()
        }));

        view.set_query("amal");

        assert_eq!(view.summary().map(|s| s.total), Some(4));
    }
}
