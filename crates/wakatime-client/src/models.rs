// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, WakaTimeError};

/// Input accepted when constructing a client from configuration data.
///
/// Either the API key itself, or a structure carrying it in an `apiKey` field.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ClientConfig {
    Key(String),
    Settings {
        #[serde(rename = "apiKey")]
        api_key: String,
    },
}

impl ClientConfig {
    /// Interpret loosely-typed configuration data (e.g. read from JSON).
    ///
    /// # Errors
    /// Returns `Configuration` for anything that is neither a string nor an
    /// object with a string `apiKey` field.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value)
            .map_err(|_| WakaTimeError::Configuration("configuration data is missing".to_string()))
    }

    pub fn into_api_key(self) -> String {
        match self {
            ClientConfig::Key(key) => key,
            ClientConfig::Settings { api_key } => api_key,
        }
    }
}

impl From<&str> for ClientConfig {
    fn from(key: &str) -> Self {
        ClientConfig::Key(key.to_string())
    }
}

impl From<String> for ClientConfig {
    fn from(key: String) -> Self {
        ClientConfig::Key(key)
    }
}

/// HTTP verb used by the call routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    /// Parameters go into a form-encoded body.
    Post,
    Delete,
    /// Any verb the API client has no handling for; sent as a bare GET.
    Unrecognized,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get | Method::Unrecognized => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl From<&str> for Method {
    fn from(verb: &str) -> Self {
        match verb {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "DELETE" => Method::Delete,
            _ => Method::Unrecognized,
        }
    }
}

/// Query for `users/current/summaries`.
///
/// `start` and `end` are forwarded exactly as given; the API expects dates
/// such as `2026-10-01`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummariesQuery {
    pub start: String,
    pub end: String,
    /// Only show time logged to this project.
    pub project: Option<String>,
    /// Comma-separated list of branch names.
    pub branches: Option<String>,
}

impl SummariesQuery {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            project: None,
            branches: None,
        }
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn branches(mut self, branches: impl Into<String>) -> Self {
        self.branches = Some(branches.into());
        self
    }

    /// Request parameters in wire order. Unset optional filters are omitted.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("start", self.start.as_str()), ("end", self.end.as_str())];

        if let Some(project) = &self.project {
            params.push(("project", project.as_str()));
        }

        if let Some(branches) = &self.branches {
            params.push(("branches", branches.as_str()));
        }

        params
    }
}
