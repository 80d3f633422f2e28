use super::RouteResponse;
use crate::error::MockerError;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::CONTENT_TYPE;
use hyper::http::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Response, StatusCode};
use std::str::FromStr;

pub struct ResponseBuilder {
    status: StatusCode,
    body: Option<String>,
    headers: HeaderMap,
}

impl ResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        ResponseBuilder {
            status: status_code,
            body: None,
            headers: Default::default(),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::from_str(name), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
                self
            }
            _ => self,
        }
    }

    pub fn merge_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn build_full(self) -> Response<Full<Bytes>> {
        let payload = self.body.map(Bytes::from).unwrap_or_default();
        let mut response = Response::new(Full::new(payload));
        *response.status_mut() = self.status;
        response.headers_mut().extend(self.headers);
        response
    }
}

impl From<RouteResponse> for ResponseBuilder {
    fn from(route_response: RouteResponse) -> Self {
        ResponseBuilder::new(route_response.status)
            .merge_headers(route_response.headers)
            .body(route_response.body)
    }
}

impl From<RouteResponse> for Response<Full<Bytes>> {
    fn from(route_response: RouteResponse) -> Self {
        ResponseBuilder::from(route_response).build_full()
    }
}

/// HTTP status the server answers with for a core error
pub fn error_status(err: &MockerError) -> StatusCode {
    match err {
        MockerError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        MockerError::UpstreamUnreachable { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Create a JSON error response for a core error
pub fn error_response(err: &MockerError) -> Response<Full<Bytes>> {
    let mut body = serde_json::json!({
        "error": err.to_string(),
        "kind": err.kind(),
    });
    if let MockerError::TranscriptWrite {
        status, body: upstream_body, ..
    } = err
    {
        body["upstream_status"] = status.as_u16().into();
        body["upstream_body"] = upstream_body.as_str().into();
    }
    ResponseBuilder::new(error_status(err))
        .header(CONTENT_TYPE.as_str(), "application/json")
        .body(body.to_string())
        .build_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::path::PathBuf;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_builder_with_headers() {
        let response = ResponseBuilder::new(StatusCode::OK)
            .header("X-Custom-Header", "test-value")
            .header("Content-Type", "application/json")
            .build_full();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("X-Custom-Header"),
            Some(&HeaderValue::from_static("test-value"))
        );
        assert_eq!(
            response.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
    }

    #[test]
    fn test_invalid_header_is_skipped() {
        let response = ResponseBuilder::new(StatusCode::OK)
            .header("X-Bad", "line\nbreak")
            .build_full();
        assert!(response.headers().get("X-Bad").is_none());
    }

    #[tokio::test]
    async fn test_route_response_conversion() {
        let response: Response<Full<Bytes>> = RouteResponse::xml("<ok/>").into();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/xml; charset=utf-8"
        );
        assert_eq!(body_string(response).await, "<ok/>");
    }

    #[tokio::test]
    async fn test_error_response_mapping() {
        let not_found = MockerError::RouteNotFound {
            method: "GET".to_string(),
            path: "/x".to_string(),
        };
        assert_eq!(error_response(&not_found).status(), StatusCode::NOT_FOUND);

        let missing = MockerError::NotFound(PathBuf::from("/tmp/a.xml"));
        let response = error_response(&missing);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["kind"], "not_found");
    }
}
