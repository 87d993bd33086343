//! HTTP client for the civicd API.

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use civic_common::{ApiResponse, DEFAULT_API_ADDR};

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Discover the API base URL with fallback chain
    ///
    /// Priority:
    /// 1. Explicit --api-url flag (passed as argument)
    /// 2. $CIVICD_API_URL environment variable
    /// 3. http://127.0.0.1:5000 (default daemon bind)
    pub fn discover_base_url(explicit: Option<&str>) -> String {
        if let Some(url) = explicit {
            return url.trim_end_matches('/').to_string();
        }
        if let Ok(url) = std::env::var("CIVICD_API_URL") {
            return url.trim_end_matches('/').to_string();
        }
        format!("http://{}", DEFAULT_API_ADDR)
    }

    /// Discover the bearer token: --token flag, then $CIVICD_TOKEN.
    pub fn discover_token(explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var("CIVICD_TOKEN").ok())
    }

    pub fn new(api_url: Option<&str>, token: Option<&str>) -> Self {
        Self {
            base_url: Self::discover_base_url(api_url),
            token: Self::discover_token(token),
            http: reqwest::Client::new(),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.authorized(self.http.get(self.url(path)));
        let response = request
            .send()
            .await
            .context("daemon unavailable; is civicd running?")?;
        Self::unwrap_envelope(response).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let request = self.authorized(self.http.post(self.url(path)).json(body));
        let response = request
            .send()
            .await
            .context("daemon unavailable; is civicd running?")?;
        Self::unwrap_envelope(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Unpack the `{success, data?, message?}` envelope into data or an error.
    async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .context("decoding daemon response")?;
        if envelope.success {
            envelope
                .data
                .ok_or_else(|| anyhow!("daemon response carried no data"))
        } else {
            Err(anyhow!(envelope
                .message
                .unwrap_or_else(|| "request failed".to_string())))
        }
    }
}
