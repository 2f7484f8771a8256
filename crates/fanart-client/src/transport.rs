// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Request, Response};

use crate::error::TransportError;

/// Executes a fully built request.
///
/// The client owns one transport and shares it across concurrent calls, so
/// implementations handle their own connection pooling and locking.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

#[async_trait]
impl Transport for Client {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        Client::execute(self, request)
            .await
            .map_err(TransportError::from)
    }
}
