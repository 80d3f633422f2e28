//! Mocker: an HTTP server that answers a fixed table of routes with canned
//! responses, forwards them to an upstream, or forwards and records the
//! exchange as transcript files.

pub mod behaviors;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod proxy;
pub mod recording;
pub mod response;
pub mod route;
pub mod selector;
pub mod server;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::MockerError;
pub use response::RouteResponse;
pub use route::{Route, RouteTable};
pub use server::MockServer;
