//! Route responses and their conversion to HTTP.
//!
//! - `reader` - loads canned response files
//! - `builder` - turns a `RouteResponse` or an error into a hyper response

mod builder;
mod reader;

pub use builder::{error_response, ResponseBuilder};
pub use reader::read_response;

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{HeaderMap, StatusCode};

/// Content type for mocked and recorded responses
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Body returned for unrecognised route statuses and strategies
pub const UNKNOWN_BODY: &str = "UNKNOWN";

/// The answer the core hands back to the HTTP layer
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RouteResponse {
    /// 200 response with the XML content type
    pub fn xml(body: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE));
        Self {
            status: StatusCode::OK,
            headers,
            body: body.into(),
        }
    }

    /// The "UNKNOWN" fallback; carries no content type
    pub fn unknown() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: UNKNOWN_BODY.to_string(),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn is_unknown(&self) -> bool {
        self.body == UNKNOWN_BODY && self.content_type().is_none()
    }
}
