// SPDX-License-Identifier: GPL-3.0-or-later

//! Raw HTTP transport used by the WakaTime client.
//!
//! A [`Transport`] returns the complete response text (status line, header
//! lines, blank line, body) so that header/body separation stays with the
//! client. [`ReqwestTransport`] is the real implementation; tests swap in
//! an in-memory one.

use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{trace, warn};

use crate::error::{Result, WakaTimeError};
use crate::models::Method;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// A fully built request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Form-encoded body, only ever set for POST.
    pub body: Option<String>,
}

#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send `request` and return the raw response text.
    async fn execute(&self, request: ApiRequest) -> Result<String>;
}

/// Connection settings for [`ReqwestTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// Skip TLS certificate verification. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(options: TransportOptions) -> Result<Self> {
        if options.accept_invalid_certs {
            warn!(target: "wakatime", "TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(|e| WakaTimeError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client` (custom proxies, test setups).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<String> {
        let builder = match request.method {
            Method::Get | Method::Unrecognized => self.client.get(&request.url),
            Method::Post => self
                .client
                .post(&request.url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(request.body.unwrap_or_default()),
            Method::Delete => self.client.delete(&request.url),
        };

        let response = builder.header(ACCEPT, "application/json").send().await?;

        let mut raw = format!("{:?} {}\r\n", response.version(), response.status());
        for (name, value) in response.headers() {
            let _ = write!(
                raw,
                "{}: {}\r\n",
                name,
                String::from_utf8_lossy(value.as_bytes())
            );
        }
        raw.push_str("\r\n");

        let body = response.text().await?;
        trace!(target: "wakatime", "received {} body bytes", body.len());
        raw.push_str(&body);

        Ok(raw)
    }
}
