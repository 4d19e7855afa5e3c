//! Backend API client built on `reqwest`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::customer::{Customer, SegmentSummary};
use crate::domain::filter::FilterCriteria;
use crate::domain::types::CustomerId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CustomerReader, CustomerWriter};

/// Field under which `GET /customers` may wrap its list.
const ENVELOPE_FIELD: &str = "customers";

/// Shared HTTP client and backend location.
///
/// Cheap to clone; one instance is built at startup and shared by workers.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &str) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build client: {e}")))?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }
}

/// Repository issuing backend calls on behalf of one session.
pub struct HttpRepository<'a> {
    backend: &'a BackendClient,
    token: Option<&'a str>,
}

impl<'a> HttpRepository<'a> {
    pub fn new(backend: &'a BackendClient, token: Option<&'a str>) -> Self {
        Self { backend, token }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.backend.inner.base_url);
        let builder = self.backend.inner.client.request(method, url);
        match self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> RepositoryResult<T> {
        let response = ensure_success(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

async fn ensure_success(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    Err(RepositoryError::from_status(status, message))
}

/// Normalizes the `GET /customers` payload into a plain list.
///
/// The backend answers either with a bare JSON array or with an object
/// holding the array under [`ENVELOPE_FIELD`]. Anything else is an error.
pub fn normalize_customer_listing(payload: Value) -> RepositoryResult<Vec<Customer>> {
    match payload {
        Value::Array(_) => Ok(serde_json::from_value(payload)?),
        Value::Object(mut map) => match map.remove(ENVELOPE_FIELD) {
            Some(list @ Value::Array(_)) => Ok(serde_json::from_value(list)?),
            Some(other) => Err(RepositoryError::UnexpectedShape(format!(
                "`{ENVELOPE_FIELD}` is not a list: {other}"
            ))),
            None => Err(RepositoryError::UnexpectedShape(format!(
                "object without `{ENVELOPE_FIELD}` field"
            ))),
        },
        other => Err(RepositoryError::UnexpectedShape(format!(
            "expected a list or an object, got {other}"
        ))),
    }
}

#[async_trait]
impl CustomerReader for HttpRepository<'_> {
    async fn list_customers(&self) -> RepositoryResult<Vec<Customer>> {
        let payload: Value = self.fetch(self.request(Method::GET, "/customers")).await?;
        normalize_customer_listing(payload)
    }

    async fn list_customers_with_orders(&self) -> RepositoryResult<Vec<Customer>> {
        self.fetch(self.request(Method::GET, "/customers/with-orders"))
            .await
    }

    async fn list_at_risk_customers(&self, inactive_days: u32) -> RepositoryResult<Vec<Customer>> {
        let builder = self
            .request(Method::GET, "/customers/at-risk")
            .query(&[("days", inactive_days)]);
        self.fetch(builder).await
    }

    async fn list_vip_customers(&self, min_spent: Decimal) -> RepositoryResult<Vec<Customer>> {
        let builder = self
            .request(Method::GET, "/customers/vip")
            .query(&[("min_spent", min_spent.to_string())]);
        self.fetch(builder).await
    }

    async fn filter_customers(
        &self,
        criteria: &FilterCriteria,
    ) -> RepositoryResult<Vec<Customer>> {
        let builder = self
            .request(Method::GET, "/customers/filter")
            .query(criteria);
        self.fetch(builder).await
    }

    async fn segment_summary(&self) -> RepositoryResult<SegmentSummary> {
        self.fetch(self.request(Method::GET, "/customers/segments"))
            .await
    }
}

#[async_trait]
impl CustomerWriter for HttpRepository<'_> {
    async fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()> {
        let path = format!("/customers/{id}");
        ensure_success(self.request(Method::DELETE, &path).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": format!("{}@x.com", name.to_lowercase()),
            "status": "active",
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn bare_list_is_accepted() {
        let payload = json!([record(1, "Amal"), record(2, "Yassine")]);

        let customers = normalize_customer_listing(payload).unwrap();

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[1].name.as_deref(), Some("Yassine"));
    }

    #[test]
    fn enveloped_list_is_unwrapped_in_order() {
        let payload = json!({ "customers": [record(2, "Yassine"), record(1, "Amal")], "total": 2 });

        let customers = normalize_customer_listing(payload).unwrap();

        let ids: Vec<i64> = customers.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn unknown_shapes_are_errors() {
        for payload in [
            json!({ "data": [] }),
            json!({ "customers": "none" }),
            json!("customers"),
            json!(null),
        ] {
            assert!(matches!(
                normalize_customer_listing(payload),
                Err(RepositoryError::UnexpectedShape(_))
            ));
        }
    }

    #[test]
    fn malformed_records_are_errors() {
        let payload = json!([{ "id": 0, "status": "active", "created_at": "2024-01-01T00:00:00Z" }]);

        assert!(normalize_customer_listing(payload).is_err());
    }

    #[test]
    fn status_codes_map_to_errors() {
        use reqwest::StatusCode;

        assert!(matches!(
            RepositoryError::from_status(StatusCode::NOT_FOUND, String::new()),
            RepositoryError::NotFound
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            RepositoryError::Unauthorized
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::BAD_GATEWAY, "down".into()),
            RepositoryError::BackendError { status: 502, .. }
        ));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let backend = BackendClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000/api");
    }
}
