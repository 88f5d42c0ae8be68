//! HTTP plumbing shared by all endpoint groups: base URL handling,
//! session cookies, envelope unwrapping, and error surfacing.

use crm_core::config::ApiConfig;
use crm_core::{CrmError, CrmResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Client for the CRM REST API. Authentication rides on a session cookie
/// managed by reqwest's cookie store, matching the backend's
/// credentialed-request contract.
pub struct CrmClient {
    base_url: String,
    http: reqwest::Client,
}

/// Common list parameters: `?page&limit&search`.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        if !term.is_empty() {
            self.search = Some(term);
        }
        self
    }

    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

impl CrmClient {
    pub fn new(config: &ApiConfig) -> CrmResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> CrmResult<T> {
        debug!(path, "GET");
        let response = self.http.get(self.url(path)).query(params).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> CrmResult<T> {
        debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> CrmResult<T> {
        debug!(path, "PUT");
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> CrmResult<()> {
        debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status.as_u16(), &body));
        }
        Ok(())
    }

    /// POST whose 200 body may legitimately be empty or non-JSON; such
    /// bodies come back as `Value::Null` instead of a decode error.
    /// Non-2xx statuses still fail as usual.
    pub(crate) async fn post_lenient<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> CrmResult<serde_json::Value> {
        debug!(path, "POST (lenient)");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), &text));
        }
        Ok(lenient_body(&text))
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> CrmResult<T> {
        debug!(path, "POST multipart");
        let response = self.http.post(self.url(path)).multipart(form).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> CrmResult<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn status_error(status: u16, body: &str) -> CrmError {
        if status == 401 || status == 403 {
            CrmError::Unauthenticated
        } else {
            CrmError::from_response(status, body)
        }
    }
}

/// Body text as JSON, or `Null` when empty or unparseable.
fn lenient_body(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_body_degrades_to_null() {
        assert_eq!(lenient_body(""), serde_json::Value::Null);
        assert_eq!(lenient_body("not json"), serde_json::Value::Null);
        assert_eq!(lenient_body("{\"count\": 2}")["count"], 2);
    }

    #[test]
    fn list_query_omits_empty_search() {
        let params = ListQuery::new(2, 10).params();
        assert_eq!(params.len(), 2);
        assert!(params.contains(&("page", "2".to_string())));

        let params = ListQuery::new(1, 10).search("ada").params();
        assert!(params.contains(&("search", "ada".to_string())));

        let params = ListQuery::new(1, 10).search("").params();
        assert_eq!(params.len(), 2);
    }
}
