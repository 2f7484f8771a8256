// SPDX-License-Identifier: GPL-3.0-or-later

//! fanart.tv API client for fetching movie artwork.
//!
//! Responses are decoded into a loosely-typed [`Document`] and read through
//! typed views such as [`Movie`] and [`Image`], whose getters validate one
//! field at a time. Requests are shaped with [`RequestOption`] directives.

pub mod client;
pub mod context;
pub mod document;
pub mod error;
pub mod models;
pub mod options;
pub mod transport;

pub use client::{FanartClient, FanartClientBuilder};
pub use context::Context;
pub use document::{
    as_array, as_bool, as_document, as_f64, as_i64, as_object, as_string, get_field, Document,
    Extract, FieldError, Shape,
};
pub use error::{FanartError, HttpStatusCodeError, Result, TransportError};
pub use models::{ArtworkKind, Image, Movie};
pub use options::{
    with_query_param, with_request_header, with_request_interceptor, with_response_interceptor,
    RequestOption,
};
pub use tokio_util::sync::CancellationToken;
pub use transport::Transport;
