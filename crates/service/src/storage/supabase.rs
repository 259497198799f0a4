use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use configs::SupabaseConfig;

use crate::errors::ServiceError;
use crate::storage::LocalizationStore;

/// PostgREST-backed store for the Supabase `localizations` table.
///
/// Rows flow through untyped (`serde_json::Value`), so whatever columns the
/// hosted table carries are passed back to callers verbatim. Mutating calls
/// send `Prefer: return=representation` so the backend reports the affected
/// rows, which is what the bulk-update success check keys off.
pub struct SupabaseStore {
    http: reqwest::Client,
    rest_url: String,
}

impl SupabaseStore {
    pub fn new(cfg: &SupabaseConfig) -> Result<Self, ServiceError> {
        let mut headers = HeaderMap::new();
        let mut api_key =
            HeaderValue::from_str(&cfg.api_key).map_err(ServiceError::storage)?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
            .map_err(ServiceError::storage)?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ServiceError::storage)?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1/{}", cfg.url.trim_end_matches('/'), cfg.table),
        })
    }

    fn eq_id(id: &str) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }

    /// Read the response body as a row set, mapping any non-2xx status to a
    /// storage error carrying the backend's own text.
    async fn rows(resp: reqwest::Response) -> Result<Vec<Value>, ServiceError> {
        let status = resp.status();
        let body = resp.text().await.map_err(ServiceError::storage)?;
        if !status.is_success() {
            return Err(ServiceError::Storage(format!("{status}: {body}")));
        }
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&body).map_err(ServiceError::storage)? {
            Value::Array(rows) => Ok(rows),
            single => Ok(vec![single]),
        }
    }
}

#[async_trait]
impl LocalizationStore for SupabaseStore {
    async fn select_all(&self) -> Result<Vec<Value>, ServiceError> {
        debug!(url = %self.rest_url, "select all rows");
        let resp = self
            .http
            .get(&self.rest_url)
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(ServiceError::storage)?;
        Self::rows(resp).await
    }

    async fn select_one(&self, id: &str) -> Result<Option<Value>, ServiceError> {
        let resp = self
            .http
            .get(&self.rest_url)
            .query(&[("select", "*")])
            .query(&Self::eq_id(id))
            .send()
            .await
            .map_err(ServiceError::storage)?;
        Ok(Self::rows(resp).await?.into_iter().next())
    }

    async fn insert(&self, row: Value) -> Result<Vec<Value>, ServiceError> {
        let resp = self
            .http
            .post(&self.rest_url)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(ServiceError::storage)?;
        Self::rows(resp).await
    }

    async fn update(&self, id: &str, row: Value) -> Result<Vec<Value>, ServiceError> {
        let resp = self
            .http
            .patch(&self.rest_url)
            .query(&Self::eq_id(id))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(ServiceError::storage)?;
        Self::rows(resp).await
    }

    async fn delete(&self, id: &str) -> Result<Vec<Value>, ServiceError> {
        let resp = self
            .http
            .delete(&self.rest_url)
            .query(&Self::eq_id(id))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(ServiceError::storage)?;
        Self::rows(resp).await
    }
}
