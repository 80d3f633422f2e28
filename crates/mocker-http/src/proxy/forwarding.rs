//! Request forwarding to a route's upstream URL.
//!
//! The upstream receives the inbound method and raw body unchanged, sent to
//! the route's `forwarded` URL as configured. Inbound headers and the query
//! string are not forwarded.

use crate::config::Method;
use crate::error::MockerError;
use crate::response::RouteResponse;
use bytes::Bytes;
use hyper::header::{self, HeaderName};
use hyper::{HeaderMap, StatusCode};
use tracing::debug;

/// Headers that describe the upstream connection or the upstream encoding of
/// the body, and so must not be copied onto our own response
const SKIPPED_RESPONSE_HEADERS: [HeaderName; 7] = [
    header::CONNECTION,
    header::CONTENT_LENGTH,
    header::PROXY_AUTHENTICATE,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// What the upstream answered
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Upstream body decoded as text
    pub body: String,
}

impl UpstreamResponse {
    /// Response for a FORWARDED route: upstream status, headers and text.
    ///
    /// `content-length` is kept only for HEAD, whose empty body would
    /// otherwise be advertised as length 0.
    pub fn into_route_response(self, method: Method) -> RouteResponse {
        let keep_length = method == Method::Head;
        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let length_kept = keep_length && name == header::CONTENT_LENGTH;
            if length_kept || !is_skipped(name) {
                headers.append(name.clone(), value.clone());
            }
        }
        RouteResponse {
            status: self.status,
            headers,
            body: self.body,
        }
    }
}

fn is_skipped(name: &HeaderName) -> bool {
    SKIPPED_RESPONSE_HEADERS.contains(name) || name.as_str() == "keep-alive"
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Head => reqwest::Method::HEAD,
        Method::Delete => reqwest::Method::DELETE,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Patch => reqwest::Method::PATCH,
    }
}

/// Replays inbound requests against upstream URLs
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Send `body` to `url` with `method` and return the upstream reply.
    ///
    /// Upstream 4xx/5xx replies are returned as successful forwards; only
    /// transport failures (connect, timeout, broken body) are errors.
    pub async fn forward(
        &self,
        method: Method,
        url: &reqwest::Url,
        body: Bytes,
    ) -> Result<UpstreamResponse, MockerError> {
        debug!("Forwarding {} to {} ({} bytes)", method, url, body.len());

        let unreachable = |source| MockerError::UpstreamUnreachable {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .request(to_reqwest_method(method), url.clone())
            .body(body)
            .send()
            .await
            .map_err(unreachable)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(unreachable)?;

        debug!("Upstream {} answered {} ({} bytes)", url, status, body.len());

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
