use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::repository::{BackendClient, HttpRepository};
use crate::services::customers::ensure_loaded;
use crate::services::{ServiceError, api as api_service};
use crate::session::AdminSession;
use crate::view_store::ViewStore;

#[derive(Deserialize)]
struct ApiV1CustomersQueryParams {
    search: Option<String>,
}

/// Visible customers of the caller's view. A view that never loaded is
/// fetched first, so a fresh session sees the same list as the page.
#[get("/v1/customers")]
pub async fn api_v1_customers(
    params: web::Query<ApiV1CustomersQueryParams>,
    admin: AdminSession,
    backend: web::Data<BackendClient>,
    store: web::Data<ViewStore>,
) -> impl Responder {
    let repo = HttpRepository::new(&backend, Some(admin.token()));

    match ensure_loaded(&repo, &store, admin.view_key()).await {
        Ok(()) => {}
        Err(ServiceError::Unauthorized) => return HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to load customers for the API: {err}");
            return HttpResponse::BadGateway().json(json!({ "error": err.message_key() }));
        }
    }

    let response =
        api_service::list_customers(&store, admin.view_key(), params.into_inner().search);
    HttpResponse::Ok().json(response)
}
