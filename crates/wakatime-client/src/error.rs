// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WakaTimeError>;

#[derive(Debug, Error)]
pub enum WakaTimeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Raised before any request is made when no API key is set.
    #[error("Authentication required for {path}: no API key is set")]
    Authentication { path: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response from WakaTime API: {0}")]
    ResponseFormat(String),
}

impl From<reqwest::Error> for WakaTimeError {
    fn from(err: reqwest::Error) -> Self {
        WakaTimeError::Transport(err.to_string())
    }
}
