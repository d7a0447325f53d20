// SPDX-License-Identifier: GPL-3.0-or-later

//! WakaTime API client.
//!
//! Authenticates with an API key, fetches a user's coding summaries and
//! returns the decoded JSON exactly as the API sent it.

pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod transport;

pub use client::{WakaTimeClient, WakaTimeClientBuilder};
pub use error::{Result, WakaTimeError};
pub use models::{ClientConfig, Method, SummariesQuery};
pub use response::{HeaderMap, RawResponse};
pub use transport::{ApiRequest, ReqwestTransport, Transport, TransportOptions};
