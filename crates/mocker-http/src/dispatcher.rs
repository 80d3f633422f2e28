//! Per-request entry point: resolve the route, wait, then answer by mode.

use crate::config::{Method, RouteStatus};
use crate::error::MockerError;
use crate::proxy::Forwarder;
use crate::recording::TranscriptRecorder;
use crate::response::{RouteResponse, XML_CONTENT_TYPE};
use crate::route::{Route, RouteTable};
use crate::selector::select_response;
use bytes::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::HeaderMap;
use std::sync::Arc;
use tracing::debug;

/// Answers requests for a fixed route table
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    forwarder: Forwarder,
    recorder: TranscriptRecorder,
}

impl Dispatcher {
    pub fn new(routes: RouteTable, client: reqwest::Client) -> Self {
        let forwarder = Forwarder::new(client);
        Self {
            routes: Arc::new(routes),
            recorder: TranscriptRecorder::new(forwarder.clone()),
            forwarder,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Answer one request.
    ///
    /// Fails with `RouteNotFound` when no route matches; otherwise returns
    /// the handler's response or the first error it raised.
    pub async fn handle(
        &self,
        method: Method,
        path: &str,
        body: Bytes,
    ) -> Result<RouteResponse, MockerError> {
        let route = self
            .routes
            .lookup(method, path)
            .ok_or_else(|| MockerError::RouteNotFound {
                method: method.to_string(),
                path: path.to_string(),
            })?;

        route.wait.wait().await;

        self.dispatch(&route, body).await
    }

    /// Answer a request for an already resolved route, without the delay
    pub async fn dispatch(&self, route: &Route, body: Bytes) -> Result<RouteResponse, MockerError> {
        debug!(
            "Dispatching '{}' {} as {:?}",
            route.name, route.key, route.status
        );

        match route.status {
            RouteStatus::Mocked => select_response(route).await,
            RouteStatus::Forwarded => {
                let url = upstream_url(route)?;
                let upstream = self.forwarder.forward(route.method(), url, body).await?;
                Ok(upstream.into_route_response(route.method()))
            }
            RouteStatus::Recording => {
                let url = upstream_url(route)?;
                let (transcript, upstream) = self
                    .recorder
                    .record(&route.response_path, route.method(), url, body)
                    .await?;
                debug!(
                    "Route {} recorded {} and {}",
                    route.key,
                    transcript.request_path.display(),
                    transcript.response_path.display()
                );
                let mut headers = HeaderMap::new();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE));
                Ok(RouteResponse {
                    status: upstream.status,
                    headers,
                    body: upstream.body,
                })
            }
            RouteStatus::Disabled | RouteStatus::Unknown => Ok(RouteResponse::unknown()),
        }
    }
}

fn upstream_url(route: &Route) -> Result<&reqwest::Url, MockerError> {
    route.forwarded.as_ref().ok_or_else(|| {
        MockerError::config(
            &route.name,
            "'forwarded' URL is required for FORWARDED and RECORDING routes",
        )
    })
}
