// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Request, Response, StatusCode};
use tracing::{debug, instrument, trace};
use url::Url;

use crate::context::Context;
use crate::document::Document;
use crate::error::{FanartError, HttpStatusCodeError, Result, TransportError};
use crate::models::Movie;
use crate::options::{with_query_param, with_request_header, RequestOption};
use crate::transport::Transport;

const API_BASE_URL: &str = "http://webservice.fanart.tv";
const JSON_MEDIA_TYPE: &str = "application/json";
const API_KEY_PARAM: &str = "api_key";
const CLIENT_KEY_HEADER: &str = "client-key";
const USER_AGENT: &str = concat!("fanart-client/", env!("CARGO_PKG_VERSION"));

/// fanart.tv API client.
///
/// Holds only immutable configuration and a shared transport, so clones are
/// cheap and concurrent calls need no locking. Every call performs exactly
/// one request.
#[derive(Debug, Clone)]
pub struct FanartClient {
    api_key: Option<String>,
    client_key: Option<HeaderValue>,
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl FanartClient {
    /// Create a client authenticated with `api_key` and the default transport.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> FanartClientBuilder {
        FanartClientBuilder::default()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch `path` and decode the response into a [`Document`].
    ///
    /// Configured credentials are appended after `options`, so caller
    /// parameters keep their order. Fails with
    /// [`FanartError::HttpStatus`] for anything but `200 OK`, with
    /// [`FanartError::ContentType`] when the body is not JSON and with
    /// [`FanartError::Decode`] when it is not a JSON object.
    ///
    /// # Example
    /// ```no_run
    /// # use fanart_client::{Context, FanartClient, with_query_param};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = FanartClient::new("my-api-key")?;
    /// let ctx = Context::background();
    /// let document = client
    ///     .get_object(&ctx, "/v3/movies/550", &[with_query_param("lang", "en")])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, ctx, options), fields(options = options.len()))]
    pub async fn get_object(
        &self,
        ctx: &Context,
        path: &str,
        options: &[RequestOption],
    ) -> Result<Document> {
        let options = self.with_credentials(options);
        let request = build_request(&self.base_url, path, &options);

        debug!(target: "fanart", method = %request.method(), path, "sending request");
        let mut response = ctx.run(self.transport.execute(request)).await?;

        for option in &options {
            option.apply_response(&mut response);
        }

        debug!(target: "fanart", status = %response.status(), "response received");
        check_response(&response)?;

        let body = ctx
            .run(async move { response.bytes().await.map_err(TransportError::from) })
            .await?;
        trace!(target: "fanart", bytes = body.len(), "decoding response body");

        serde_json::from_slice(&body).map_err(FanartError::Decode)
    }

    /// Look up movie artwork by TMDB or IMDB id.
    ///
    /// # Example
    /// ```no_run
    /// # use fanart_client::{Context, FanartClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = FanartClient::new("my-api-key")?;
    /// let movie = client.get_movie(&Context::background(), "550", &[]).await?;
    /// println!("{}", movie.name()?);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, ctx, options))]
    pub async fn get_movie(
        &self,
        ctx: &Context,
        id: &str,
        options: &[RequestOption],
    ) -> Result<Movie> {
        let path = format!("/v3/movies/{id}");
        self.get_object(ctx, &path, options).await.map(Movie::from)
    }

    fn with_credentials(&self, options: &[RequestOption]) -> Vec<RequestOption> {
        let mut all = options.to_vec();
        if let Some(api_key) = &self.api_key {
            all.push(with_query_param(API_KEY_PARAM, api_key));
        }
        if let Some(client_key) = &self.client_key {
            all.push(with_request_header(
                HeaderName::from_static(CLIENT_KEY_HEADER),
                client_key.clone(),
            ));
        }
        all
    }
}

/// Run the query, header and request phases of `options` in that order.
fn build_request(base_url: &Url, path: &str, options: &[RequestOption]) -> Request {
    let mut query = Vec::new();
    for option in options {
        option.apply_query(&mut query);
    }

    let mut url = base_url.clone();
    url.set_path(path);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(&query);
    }

    let mut headers = HeaderMap::new();
    for option in options {
        option.apply_headers(&mut headers);
    }

    let mut request = Request::new(Method::GET, url);
    *request.headers_mut() = headers;
    for option in options {
        option.apply_request(&mut request);
    }
    request
}

fn check_response(response: &Response) -> Result<()> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(HttpStatusCodeError::new(status.as_u16()).into());
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();
    if !content_type.contains(JSON_MEDIA_TYPE) {
        return Err(FanartError::ContentType { content_type });
    }

    Ok(())
}

/// Builder for configuring a fanart.tv client.
#[derive(Debug)]
pub struct FanartClientBuilder {
    api_key: Option<String>,
    client_key: Option<String>,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for FanartClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            client_key: None,
            timeout: Duration::from_secs(30),
            transport: None,
        }
    }
}

impl FanartClientBuilder {
    /// Project API key, sent as the `api_key` query parameter. Blank keys are
    /// ignored.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Personal client key, sent as the `client-key` header.
    pub fn client_key(mut self, client_key: impl Into<String>) -> Self {
        self.client_key = Some(client_key.into());
        self
    }

    /// Request timeout of the default transport. Has no effect when a
    /// custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the default `reqwest` transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build the fanart.tv client.
    pub fn build(self) -> Result<FanartClient> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                Client::builder()
                    .timeout(self.timeout)
                    .user_agent(USER_AGENT)
                    .build()?,
            ),
        };

        let client_key = match non_blank(self.client_key) {
            Some(key) => {
                let mut value = HeaderValue::from_str(&key)?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        Ok(FanartClient {
            api_key: non_blank(self.api_key),
            client_key,
            base_url: Url::parse(API_BASE_URL).expect("valid fanart.tv base url"),
            transport,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
