//! HTTP listener that feeds requests to the dispatcher.
//!
//! One task per connection, HTTP/1.1 via hyper. A broadcast channel stops
//! the accept loop; in-flight connections finish on their own.

use crate::config::Method;
use crate::dispatcher::Dispatcher;
use crate::error::MockerError;
use crate::response::{error_response, ResponseBuilder};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

pub struct MockServer {
    dispatcher: Dispatcher,
    listener: TcpListener,
    local_addr: SocketAddr,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl MockServer {
    /// Bind the listener. Port 0 picks a free port; see `local_addr`.
    pub async fn bind(addr: impl ToSocketAddrs, dispatcher: Dispatcher) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        Ok(Self {
            dispatcher,
            listener,
            local_addr,
            shutdown_tx,
            shutdown_rx,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Sender that stops `run` when a message is sent on it
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Accept connections until shutdown is signalled.
    ///
    /// A shutdown sent before `run` starts is not lost.
    pub async fn run(self) {
        let MockServer {
            dispatcher,
            listener,
            local_addr,
            mut shutdown_rx,
            ..
        } = self;

        info!(
            "Serving {} routes on http://{}",
            dispatcher.routes().len(),
            local_addr
        );

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            let dispatcher = dispatcher.clone();
                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                let service = service_fn(move |req| {
                                    let dispatcher = dispatcher.clone();
                                    async move { handle_request(req, dispatcher).await }
                                });
                                if let Err(e) = http1::Builder::new()
                                    .serve_connection(io, service)
                                    .await
                                {
                                    debug!("Connection error from {}: {}", addr, e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Accept error on {}: {}", local_addr, e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Server on {} shutting down", local_addr);
                    break;
                }
            }
        }
    }
}

/// Turn one hyper request into a dispatcher call and its response
pub async fn handle_request(
    req: Request<Incoming>,
    dispatcher: Dispatcher,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();
    let method_str = req.method().as_str().to_string();

    // Methods outside the supported set can never match a route
    let Ok(method) = method_str.parse::<Method>() else {
        return Ok(error_response(&MockerError::RouteNotFound {
            method: method_str,
            path,
        }));
    };

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Failed to read request body for {} {}: {}", method, path, e);
            return Ok(ResponseBuilder::new(StatusCode::BAD_REQUEST)
                .header("content-type", "application/json")
                .body(r#"{"error": "Failed to read request body"}"#)
                .build_full());
        }
    };

    match dispatcher.handle(method, &path, body).await {
        Ok(route_response) => Ok(route_response.into()),
        Err(err) => {
            match err {
                MockerError::RouteNotFound { .. } => debug!("{}", err),
                _ => error!("{} {} failed: {}", method, path, err),
            }
            Ok(error_response(&err))
        }
    }
}
