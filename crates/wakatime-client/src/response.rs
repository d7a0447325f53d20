// SPDX-License-Identifier: GPL-3.0-or-later

//! Splitting a raw HTTP response into its header block and body block.

use tracing::trace;

use crate::error::{Result, WakaTimeError};

/// Key under which the status line is stored in a [`HeaderMap`].
pub const STATUS_LINE_KEY: &str = "http_code";

const SEPARATOR: &str = "\r\n\r\n";

/// Headers of a single response, in the order they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Parse a header block. The first line is the status line; each further
    /// line is split on its first colon and the value is kept as-is.
    pub fn parse(block: &str) -> Self {
        let mut entries = Vec::new();
        let mut lines = block.split("\r\n");

        if let Some(status) = lines.next() {
            entries.push((STATUS_LINE_KEY.to_string(), status.to_string()));
        }

        for line in lines {
            match line.split_once(':') {
                Some((name, value)) => entries.push((name.to_string(), value.to_string())),
                None => trace!(target: "wakatime", "skipping header line without colon: {:?}", line),
            }
        }

        Self { entries }
    }

    /// Case-insensitive lookup; the first matching header wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn status_line(&self) -> Option<&str> {
        self.get(STATUS_LINE_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A raw response split at the first blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Split raw response text into headers and body.
    ///
    /// # Errors
    /// `Transport` when `raw` is empty (nothing came back at all), and
    /// `ResponseFormat` when there is no blank line between headers and body.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(WakaTimeError::Transport("empty response".to_string()));
        }

        let (head, body) = raw.split_once(SEPARATOR).ok_or_else(|| {
            WakaTimeError::ResponseFormat("missing blank line between headers and body".to_string())
        })?;

        Ok(Self {
            headers: HeaderMap::parse(head),
            body: body.to_string(),
        })
    }
}
