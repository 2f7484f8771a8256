// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

use crate::document::FieldError;

pub type Result<T> = std::result::Result<T, FanartError>;

#[derive(Debug, Error)]
pub enum FanartError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    HttpStatus(#[from] HttpStatusCodeError),

    #[error("unexpected content type: {content_type}")]
    ContentType { content_type: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("invalid client key: {0}")]
    ClientKey(#[from] reqwest::header::InvalidHeaderValue),
}

impl From<reqwest::Error> for FanartError {
    fn from(err: reqwest::Error) -> Self {
        FanartError::Transport(TransportError::Http(err))
    }
}

/// Failure of the HTTP round trip itself. Returned as-is; nothing is retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// Error raised by a custom [`Transport`](crate::transport::Transport).
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// The service answered with something other than `200 OK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected status code: {status_code}")]
pub struct HttpStatusCodeError {
    pub status_code: u16,
}

impl HttpStatusCodeError {
    pub fn new(status_code: u16) -> Self {
        Self { status_code }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }
}

impl FanartError {
    /// Status code carried by an [`FanartError::HttpStatus`] error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FanartError::HttpStatus(err) => Some(err.status_code),
            _ => None,
        }
    }
}
