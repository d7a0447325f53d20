// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Result, WakaTimeError};
use crate::models::{ClientConfig, Method, SummariesQuery};
use crate::response::{HeaderMap, RawResponse};
use crate::transport::{ApiRequest, ReqwestTransport, Transport, TransportOptions};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, trace};
use url::form_urlencoded;

const WAKATIME_API_BASE: &str = "https://wakatime.com/api/v1/";
const SUMMARIES_PATH: &str = "users/current/summaries";
const RATE_LIMIT_HEADER: &str = "X-Ratelimit-Remaining";

/// WakaTime API client authenticated with an API key.
///
/// Clones share the transport but not the rate-limit slot: a clone starts
/// with no rate-limit reading, since it may be switched to another key.
#[derive(Debug)]
pub struct WakaTimeClient {
    api_key: Option<String>,
    base_url: String,
    transport: Arc<dyn Transport>,
    rate_limit_remaining: Mutex<Option<u32>>,
}

impl Clone for WakaTimeClient {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
            rate_limit_remaining: Mutex::new(None),
        }
    }
}

impl WakaTimeClient {
    /// Create a client for the given API key with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client from configuration data: the key itself, or a
    /// structure carrying it as `apiKey`.
    pub fn from_config(config: impl Into<ClientConfig>) -> Result<Self> {
        Self::new(config.into().into_api_key())
    }

    /// Create a client from loosely-typed configuration data.
    ///
    /// # Errors
    /// `Configuration` unless `value` is a string or an object with a string
    /// `apiKey` field.
    ///
    /// # Example
    /// ```no_run
    /// # use wakatime_client::WakaTimeClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = WakaTimeClient::from_config_value(&serde_json::json!({ "apiKey": "waka_123" }))?;
    /// assert_eq!(client.api_key(), Some("waka_123"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config_value(value: &Value) -> Result<Self> {
        Self::from_config(ClientConfig::from_value(value)?)
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> WakaTimeClientBuilder {
        WakaTimeClientBuilder::default()
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `X-Ratelimit-Remaining` as reported by the most recent response.
    pub async fn rate_limit_remaining(&self) -> Option<u32> {
        *self.rate_limit_remaining.lock().await
    }

    /// A user's coding activity for the given time range, as summaries
    /// segmented by day.
    ///
    /// # Arguments
    /// * `start` - Start date of the time range.
    /// * `end` - End date of the time range.
    /// * `project` - Only show time logged to this project.
    /// * `branches` - Only show activity for these branches (comma separated).
    ///
    /// # Example
    /// ```no_run
    /// # use wakatime_client::WakaTimeClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = WakaTimeClient::new("waka_123")?;
    /// let summaries = client
    ///     .get_summaries("2026-10-01", "2026-10-07", Some("chorrosion"), None)
    ///     .await?;
    /// println!("{}", summaries["cumulative_total"]["text"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_summaries(
        &self,
        start: &str,
        end: &str,
        project: Option<&str>,
        branches: Option<&str>,
    ) -> Result<Value> {
        let mut query = SummariesQuery::new(start, end);
        if let Some(project) = project {
            query = query.project(project);
        }
        if let Some(branches) = branches {
            query = query.branches(branches);
        }

        self.summaries(&query).await
    }

    /// Same as [`get_summaries`](Self::get_summaries), taking a prepared query.
    pub async fn summaries(&self, query: &SummariesQuery) -> Result<Value> {
        self.call(SUMMARIES_PATH, &query.params(), Method::Get).await
    }

    /// Perform one authenticated request against `path` and decode the JSON body.
    pub(crate) async fn call(
        &self,
        path: &str,
        params: &[(&str, &str)],
        method: Method,
    ) -> Result<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| WakaTimeError::Authentication {
                path: path.to_string(),
            })?;

        let request = ApiRequest {
            method,
            url: self.request_url(path, api_key, params, method),
            body: (method == Method::Post).then(|| encode_params(params)),
        };

        trace!(target: "wakatime", "{} {}", method.as_str(), path);

        let raw = self.transport.execute(request).await?;
        let response = RawResponse::parse(&raw)?;

        if let Some(status) = response.headers.status_line() {
            debug!(target: "wakatime", "response status: {}", status);
        }
        self.record_rate_limit(&response.headers).await;

        // "0" is treated as no body at all, like an empty one.
        if response.body.is_empty() || response.body == "0" {
            return Err(WakaTimeError::Transport(format!(
                "empty response body from {path}"
            )));
        }

        trace!(target: "wakatime", "response body: {}", response.body);

        serde_json::from_str(&response.body).map_err(|e| {
            WakaTimeError::ResponseFormat(format!("Failed to parse response: {}", e))
        })
    }

    /// Base URL + path + `?api_key=...`, plus the encoded parameters for GET.
    fn request_url(
        &self,
        path: &str,
        api_key: &str,
        params: &[(&str, &str)],
        method: Method,
    ) -> String {
        let key: String = form_urlencoded::byte_serialize(api_key.as_bytes()).collect();
        let mut url = format!("{}{}?api_key={}", self.base_url, path, key);

        if method == Method::Get && !params.is_empty() {
            url.push('&');
            url.push_str(&encode_params(params));
        }

        url
    }

    async fn record_rate_limit(&self, headers: &HeaderMap) {
        let remaining = headers
            .get(RATE_LIMIT_HEADER)
            .and_then(|value| value.trim().parse().ok());
        *self.rate_limit_remaining.lock().await = remaining;
    }
}

fn encode_params(params: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Builder for configuring a WakaTime client.
#[derive(Debug)]
pub struct WakaTimeClientBuilder {
    api_key: Option<String>,
    base_url: String,
    options: TransportOptions,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for WakaTimeClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: WAKATIME_API_BASE.to_string(),
            options: TransportOptions::default(),
            transport: None,
        }
    }
}

impl WakaTimeClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = timeout;
        self
    }

    /// Total time allowed for a request, connection included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Disable TLS certificate verification. Only for trusted test setups.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.options.accept_invalid_certs = accept;
        self
    }

    /// Use a custom transport instead of the reqwest-backed one. Timeout and
    /// TLS settings are then the transport's own business.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build the WakaTime client.
    pub fn build(self) -> Result<WakaTimeClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.options)?),
        };

        Ok(WakaTimeClient {
            api_key: self.api_key,
            base_url: format!("{}/", self.base_url.trim_end_matches('/')),
            transport,
            rate_limit_remaining: Mutex::new(None),
        })
    }
}
