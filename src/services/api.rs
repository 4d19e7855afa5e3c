use uuid::Uuid;

use crate::dto::api::CustomersResponse;
use crate::services::customers::visible_customers;
use crate::view_store::ViewStore;

/// Returns the visible customers of the caller's view as an API payload.
///
/// A non-blank `search` narrows the base list without replacing the stored
/// query.
pub fn list_customers(store: &ViewStore, key: Uuid, search: Option<String>) -> CustomersResponse {
    let search = search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let customers = visible_customers(store, key, search.as_deref());
    let mode = store.snapshot(key).mode().slug();

    CustomersResponse {
        total: customers.len(),
        mode,
        customers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{FetchMode, Segment};
    use crate::domain::search::tests::customer;

    fn store_with(key: Uuid) -> ViewStore {
        let store = ViewStore::new();
        let ticket = store.begin_fetch(key, FetchMode::Preset(Segment::WithOrders));
        store.complete_fetch(
            key,
            ticket,
            vec![
                customer(1, "Amal", "a@x.com", "0600000001"),
                customer(2, "Yassine", "y@x.com", "0600000002"),
            ],
        );
        store
    }

    #[test]
    fn blank_search_falls_back_to_stored_query() {
        let key = Uuid::new_v4();
        let store = store_with(key);
        store.set_query(key, "yass");

        let response = list_customers(&store, key, Some("   ".into()));

        assert_eq!(response.total, 1);
        assert_eq!(response.mode, "with-orders");
        assert_eq!(response.customers[0].id.get(), 2);
    }

    #[test]
    fn explicit_search_overrides_stored_query() {
        let key = Uuid::new_v4();
        let store = store_with(key);
        store.set_query(key, "yass");

        let response = list_customers(&store, key, Some("AMAL".into()));

        assert_eq!(response.total, 1);
        assert_eq!(response.customers[0].id.get(), 1);
        assert_eq!(store.snapshot(key).query(), "yass");
    }

    #[test]
    fn listing_an_unknown_view_registers_nothing() {
        let store = ViewStore::new();

        let response = list_customers(&store, Uuid::new_v4(), None);

        assert_eq!(response.total, 0);
        assert_eq!(response.mode, "all");
        assert!(store.is_empty());
    }
}
