use actix_session::Session;
use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use tera::Tera;

use crate::domain::filter::FilterCriteria;
use crate::dto::customers::CustomersQuery;
use crate::forms::customers::{AdvancedFilterForm, SelectModeForm};
use crate::i18n::Catalog;
use crate::repository::{BackendClient, HttpRepository};
use crate::routes::{
    base_context, collect_alerts, flash_error, flash_success, redirect, render_template,
};
use crate::services::customers::{self as customers_service, FetchOutcome};
use crate::services::export as export_service;
use crate::services::{ServiceError, ServiceResult};
use crate::session::{AdminSession, LOGIN_PATH};
use crate::view_store::ViewStore;

const CUSTOMERS_PATH: &str = "/customers";

/// Ends a session whose token the backend no longer accepts.
fn sign_out(
    session: &Session,
    store: &ViewStore,
    admin: &AdminSession,
    catalog: &Catalog,
) -> HttpResponse {
    log::warn!("Backend rejected the token of view {}", admin.view_key());
    store.remove(admin.view_key());
    session.purge();
    flash_error(catalog, admin.locale(), "error_unauthorized");
    redirect(LOGIN_PATH)
}

/// Turns the outcome of a list change into the redirect back to the page.
fn finish_fetch(
    result: ServiceResult<FetchOutcome>,
    session: &Session,
    store: &ViewStore,
    admin: &AdminSession,
    catalog: &Catalog,
) -> HttpResponse {
    match result {
        Ok(outcome) => {
            log::debug!("Customer fetch for view {}: {outcome:?}", admin.view_key());
        }
        Err(ServiceError::Unauthorized) => return sign_out(session, store, admin, catalog),
        Err(err) => flash_error(catalog, admin.locale(), err.message_key()),
    }
    redirect(CUSTOMERS_PATH)
}

#[get("/customers")]
pub async fn show_customers(
    admin: AdminSession,
    session: Session,
    query: web::Query<CustomersQuery>,
    flash_messages: IncomingFlashMessages,
    backend: web::Data<BackendClient>,
    store: web::Data<ViewStore>,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let repo = HttpRepository::new(&backend, Some(admin.token()));
    let key = admin.view_key();
    let locale = admin.locale();
    let mut alerts = collect_alerts(&flash_messages);

    match customers_service::ensure_loaded(&repo, &store, key).await {
        Ok(()) => {}
        Err(ServiceError::Unauthorized) => return sign_out(&session, &store, &admin, &catalog),
        Err(err) => alerts.push((catalog.text(locale, err.message_key()).to_string(), "danger")),
    }

    let data = customers_service::load_customers_page(&store, key, query.into_inner());

    let mut context = base_context(&alerts, &catalog, locale, "customers");
    context.insert("page", &data);

    render_template(&tera, "customers/index.html", &context)
}

#[post("/customers/mode")]
pub async fn select_mode(
    admin: AdminSession,
    session: Session,
    backend: web::Data<BackendClient>,
    store: web::Data<ViewStore>,
    catalog: web::Data<Catalog>,
    web::Form(form): web::Form<SelectModeForm>,
) -> HttpResponse {
    let repo = HttpRepository::new(&backend, Some(admin.token()));
    let result =
        customers_service::select_fetch_mode(&repo, &store, admin.view_key(), form.mode).await;

    finish_fetch(result, &session, &store, &admin, &catalog)
}

#[post("/customers/filter")]
pub async fn apply_filters(
    admin: AdminSession,
    session: Session,
    backend: web::Data<BackendClient>,
    store: web::Data<ViewStore>,
    catalog: web::Data<Catalog>,
    web::Form(form): web::Form<AdvancedFilterForm>,
) -> HttpResponse {
    let criteria = match FilterCriteria::try_from(form) {
        Ok(criteria) => criteria,
        Err(err) => {
            log::debug!("Rejected filter form: {err}");
            flash_error(&catalog, admin.locale(), ServiceError::from(err).message_key());
            return redirect(CUSTOMERS_PATH);
        }
    };

    let repo = HttpRepository::new(&backend, Some(admin.token()));
    let result =
        customers_service::apply_advanced_filters(&repo, &store, admin.view_key(), criteria).await;

    finish_fetch(result, &session, &store, &admin, &catalog)
}

#[get("/customers/export")]
pub async fn export_customers(
    admin: AdminSession,
    store: web::Data<ViewStore>,
    catalog: web::Data<Catalog>,
) -> HttpResponse {
    match export_service::export_view(&store, admin.view_key(), Utc::now().date_naive()) {
        Ok(export) => {
            log::info!("Exported customers to {}", export.filename);
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(ContentDisposition::attachment(export.filename))
                .body(export.content)
        }
        Err(err) => {
            flash_error(&catalog, admin.locale(), err.message_key());
            redirect(CUSTOMERS_PATH)
        }
    }
}

#[post("/customers/{customer_id}/delete")]
pub async fn delete_customer(
    customer_id: web::Path<i64>,
    admin: AdminSession,
    session: Session,
    backend: web::Data<BackendClient>,
    store: web::Data<ViewStore>,
    catalog: web::Data<Catalog>,
) -> HttpResponse {
    let repo = HttpRepository::new(&backend, Some(admin.token()));

    match customers_service::delete_customer(
        &repo,
        &store,
        admin.view_key(),
        customer_id.into_inner(),
    )
    .await
    {
        Ok(()) => flash_success(&catalog, admin.locale(), "notice_customer_deleted"),
        Err(ServiceError::Unauthorized) => return sign_out(&session, &store, &admin, &catalog),
        Err(err) => flash_error(&catalog, admin.locale(), err.message_key()),
    }

    redirect(CUSTOMERS_PATH)
}
