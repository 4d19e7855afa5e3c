//! Free-text filtering of an already fetched customer list.

use crate::domain::customer::Customer;

/// Keeps the customers matching `query`, preserving their order.
///
/// An empty or whitespace-only query keeps every customer. Otherwise name and
/// email are matched case-insensitively while the phone number is matched
/// against the trimmed query as typed.
pub fn apply_text_filter<'a, I>(customers: I, query: &str) -> Vec<&'a Customer>
where
    I: IntoIterator<Item = &'a Customer>,
{
    let raw = query.trim();
    if raw.is_empty() {
        return customers.into_iter().collect();
    }

    let needle = raw.to_lowercase();
    customers
        .into_iter()
        .filter(|customer| customer.matches_query(&needle, raw))
        .collect()
}
