// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-request directives.
//!
//! Each [`RequestOption`] acts in exactly one phase of request construction.
//! The client walks the full option list once per phase, in order, so later
//! options see what earlier ones did within the same phase.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Request, Response};

pub type RequestInterceptor = Arc<dyn Fn(&mut Request) + Send + Sync>;
pub type ResponseInterceptor = Arc<dyn Fn(&mut Response) + Send + Sync>;

#[derive(Clone)]
pub enum RequestOption {
    /// Append a query parameter. Repeated keys are all sent.
    QueryParam { key: String, value: String },
    /// Append a request header. Repeated names are all sent.
    Header { name: HeaderName, value: HeaderValue },
    /// Inspect or rewrite the fully built request before it is sent.
    InterceptRequest(RequestInterceptor),
    /// Inspect or adjust the response before it is validated.
    InterceptResponse(ResponseInterceptor),
}

pub fn with_query_param(key: impl Into<String>, value: impl fmt::Display) -> RequestOption {
    RequestOption::QueryParam {
        key: key.into(),
        value: value.to_string(),
    }
}

pub fn with_request_header(name: HeaderName, value: HeaderValue) -> RequestOption {
    RequestOption::Header { name, value }
}

pub fn with_request_interceptor(
    interceptor: impl Fn(&mut Request) + Send + Sync + 'static,
) -> RequestOption {
    RequestOption::InterceptRequest(Arc::new(interceptor))
}

pub fn with_response_interceptor(
    interceptor: impl Fn(&mut Response) + Send + Sync + 'static,
) -> RequestOption {
    RequestOption::InterceptResponse(Arc::new(interceptor))
}

impl RequestOption {
    pub(crate) fn apply_query(&self, query: &mut Vec<(String, String)>) {
        if let RequestOption::QueryParam { key, value } = self {
            query.push((key.clone(), value.clone()));
        }
    }

    pub(crate) fn apply_headers(&self, headers: &mut HeaderMap) {
        if let RequestOption::Header { name, value } = self {
            headers.append(name.clone(), value.clone());
        }
    }

    pub(crate) fn apply_request(&self, request: &mut Request) {
        if let RequestOption::InterceptRequest(interceptor) = self {
            interceptor(request);
        }
    }

    pub(crate) fn apply_response(&self, response: &mut Response) {
        if let RequestOption::InterceptResponse(interceptor) = self {
            interceptor(response);
        }
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOption::QueryParam { key, .. } => f
                .debug_struct("QueryParam")
                .field("key", key)
                .finish_non_exhaustive(),
            RequestOption::Header { name, .. } => f
                .debug_struct("Header")
                .field("name", name)
                .finish_non_exhaustive(),
            RequestOption::InterceptRequest(_) => f.write_str("InterceptRequest(..)"),
            RequestOption::InterceptResponse(_) => f.write_str("InterceptResponse(..)"),
        }
    }
}
