//! Shared helpers for integration tests: an in-process upstream double and
//! route table builders.

#![allow(dead_code)]

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use mocker_http::config::RouteDefinition;
use mocker_http::{Dispatcher, RouteTable};
use parking_lot::Mutex;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A request as the upstream double saw it
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Bytes,
}

/// Upstream test double that records every request and answers with a
/// fixed status and body
pub struct Upstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Side effect run by the upstream double before it answers
pub type OnRequest = Arc<dyn Fn() + Send + Sync>;

impl Upstream {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::start_with(status, body, Arc::new(|| {})).await
    }

    /// Like `start`, running `on_request` after each request body is read
    pub async fn start_with(status: StatusCode, body: &'static str, on_request: OnRequest) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let captured = Arc::new(Mutex::new(Vec::new()));

        let captured_clone = Arc::clone(&captured);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let captured = Arc::clone(&captured_clone);
                let on_request = Arc::clone(&on_request);
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                        let captured = Arc::clone(&captured);
                        let on_request = Arc::clone(&on_request);
                        async move {
                            let method = req.method().to_string();
                            let path = req.uri().path().to_string();
                            let bytes = req.into_body().collect().await.unwrap().to_bytes();
                            captured.lock().push(CapturedRequest {
                                method,
                                path,
                                body: bytes,
                            });
                            on_request();
                            let response = Response::builder()
                                .status(status)
                                .header("content-type", "text/plain; charset=utf-8")
                                .header("x-upstream", "double")
                                .body(Full::new(Bytes::from_static(body.as_bytes())))
                                .unwrap();
                            Ok::<_, Infallible>(response)
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { addr, captured }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().clone()
    }
}

pub fn definitions(yaml: &str) -> Vec<RouteDefinition> {
    serde_yaml::from_str(yaml).expect("valid route definitions")
}

pub fn dispatcher(yaml: &str) -> Dispatcher {
    let table = RouteTable::from_definitions(&definitions(yaml)).expect("valid route table");
    Dispatcher::new(table, reqwest::Client::new())
}

/// Directory with `count` response files named f0.xml, f1.xml, ...
pub fn response_dir(count: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..count {
        std::fs::write(dir.path().join(format!("f{i}.xml")), format!("<f{i}/>")).unwrap();
    }
    dir
}
