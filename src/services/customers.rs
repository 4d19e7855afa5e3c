//! Services driving the customers admin page.

use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::filter::{FetchMode, FilterCriteria, Segment};
use crate::domain::search::apply_text_filter;
use crate::domain::types::CustomerId;
use crate::dto::customers::{CustomersPageData, CustomersQuery};
use crate::repository::{CustomerReader, CustomerWriter, fetch_for_mode};
use crate::services::{ServiceError, ServiceResult};
use crate::view_store::ViewStore;

/// Result of a fetch that did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetched list replaced the base list.
    Applied { count: usize },
    /// A newer fetch was started meanwhile; this response was dropped.
    Superseded,
}

async fn refresh<R>(
    repo: &R,
    store: &ViewStore,
    key: Uuid,
    mode: FetchMode,
) -> ServiceResult<FetchOutcome>
where
    R: CustomerReader + ?Sized,
{
    let ticket = store.begin_fetch(key, mode);

    let customers = fetch_for_mode(repo, ticket.mode()).await.map_err(|err| {
        log::error!("Failed to fetch customers ({}): {err}", ticket.mode().slug());
        ServiceError::from(err)
    })?;

    let count = customers.len();
    if store.complete_fetch(key, ticket, customers) {
        Ok(FetchOutcome::Applied { count })
    } else {
        log::debug!("Discarded superseded customer fetch for view {key}");
        Ok(FetchOutcome::Superseded)
    }
}

/// Replaces the base list with the given preset segment. The free-text
/// query is left as is.
pub async fn select_fetch_mode<R>(
    repo: &R,
    store: &ViewStore,
    key: Uuid,
    segment: Segment,
) -> ServiceResult<FetchOutcome>
where
    R: CustomerReader + ?Sized,
{
    refresh(repo, store, key, FetchMode::Preset(segment)).await
}

/// Replaces the base list with the backend's filtered list. Supersedes the
/// current preset.
pub async fn apply_advanced_filters<R>(
    repo: &R,
    store: &ViewStore,
    key: Uuid,
    criteria: FilterCriteria,
) -> ServiceResult<FetchOutcome>
where
    R: CustomerReader + ?Sized,
{
    criteria.validate_ranges()?;
    refresh(repo, store, key, FetchMode::Filtered(criteria)).await
}

/// Reloads the segment counts shown above the list. A failure hides the panel.
async fn refresh_summary<R>(repo: &R, store: &ViewStore, key: Uuid)
where
    R: CustomerReader + ?Sized,
{
    let summary = repo
        .segment_summary()
        .await
        .map_err(|err| log::warn!("Failed to load segment summary: {err}"))
        .ok();
    store.with_view(key, |view| view.set_summary(summary));
}

/// Performs the initial fetch of a view that never loaded successfully,
/// together with its segment counts.
pub async fn ensure_loaded<R>(repo: &R, store: &ViewStore, key: Uuid) -> ServiceResult<()>
where
    R: CustomerReader + ?Sized,
{
    let pending = store.with_view(key, |view| (!view.is_loaded()).then(|| view.mode().clone()));
    if let Some(mode) = pending {
        refresh(repo, store, key, mode).await?;
        refresh_summary(repo, store, key).await;
    }
    Ok(())
}

/// Stores the search query, if given, and collects the page data.
///
/// Only re-filters the loaded list; never calls the backend.
pub fn load_customers_page(
    store: &ViewStore,
    key: Uuid,
    query: CustomersQuery,
) -> CustomersPageData {
    if let Some(search) = query.search {
        store.set_query(key, search.trim());
    }

    let view = store.snapshot(key);
    let criteria = match view.mode() {
        FetchMode::Filtered(criteria) => Some(criteria.clone()),
        FetchMode::Preset(_) => None,
    };

    CustomersPageData {
        customers: view.visible().into_iter().cloned().collect(),
        total_loaded: view.base().len(),
        mode: view.mode().slug(),
        search_query: view.query().to_string(),
        criteria,
        summary: view.summary().cloned(),
    }
}

/// Deletes a customer, then reloads the current mode and the segment counts.
pub async fn delete_customer<R>(
    repo: &R,
    store: &ViewStore,
    key: Uuid,
    customer_id: i64,
) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let id = CustomerId::new(customer_id)?;

    repo.delete_customer(id).await.map_err(|err| {
        log::error!("Failed to delete customer {id}: {err}");
        ServiceError::from(err)
    })?;

    let mode = store.with_view(key, |view| {
        view.forget(id);
        view.mode().clone()
    });

    if let Err(err) = refresh(repo, store, key, mode).await {
        log::warn!("Customer {id} deleted but the list could not be reloaded: {err}");
    }
    refresh_summary(repo, store, key).await;

    Ok(())
}

/// Visible customers of the session's view, optionally narrowed by an ad-hoc
/// query instead of the stored one.
pub fn visible_customers(store: &ViewStore, key: Uuid, search: Option<&str>) -> Vec<Customer> {
    let view = store.snapshot(key);
    match search {
        Some(search) => apply_text_filter(view.base(), search)
            .into_iter()
            .cloned()
            .collect(),
        None => view.visible().into_iter().cloned().collect(),
    }
}
