//! Upstream forwarding for FORWARDED and RECORDING routes.
//!
//! - `client` - shared reqwest client creation
//! - `forwarding` - same-method, same-body replay against the upstream URL

mod client;
mod forwarding;

pub use client::create_http_client;
pub use forwarding::{Forwarder, UpstreamResponse};
