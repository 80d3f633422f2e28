//! Route definitions as they appear in the configuration file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// HTTP methods a route can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    Get,
    Post,
    Put,
    Head,
    Delete,
    Options,
    Patch,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Head,
        Method::Delete,
        Method::Options,
        Method::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Head => "HEAD",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                format!("Unsupported method '{s}'. Supported: GET, POST, PUT, HEAD, DELETE, OPTIONS, PATCH")
            })
    }
}

impl TryFrom<String> for Method {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level mode of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteStatus {
    /// Answer from canned response files
    Mocked,
    /// Proxy to the forwarded URL
    Forwarded,
    /// Proxy and write a request/response transcript
    Recording,
    /// Never registered
    Disabled,
    /// Any value this server does not recognise; answers "UNKNOWN"
    #[serde(other)]
    Unknown,
}

/// How a mocked route picks its response file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStrategy {
    /// Always the single file at `response_path`
    Concrete,
    /// Uniformly random file from the response directory
    Random,
    /// Files from the response directory in rotation
    Sequence,
    #[serde(other)]
    Unknown,
}

impl ResponseStrategy {
    /// Strategies that serve from a directory of files
    pub fn uses_directory(&self) -> bool {
        matches!(self, ResponseStrategy::Random | ResponseStrategy::Sequence)
    }
}

/// One route as written in the configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDefinition {
    /// Free-text label, only used in logs
    #[serde(default)]
    pub name: String,
    /// Exact request path
    #[serde(alias = "endpoint")]
    pub path: String,
    pub method: Method,
    /// Declared content format (advisory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Routes without a status are skipped, like DISABLED ones
    #[serde(default)]
    pub status: Option<RouteStatus>,
    #[serde(default, alias = "delay")]
    pub delay_ms: u64,
    /// Upstream URL for FORWARDED and RECORDING routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ResponseStrategy>,
    /// Response file (CONCRETE), response directory (RANDOM, SEQUENCE)
    /// or transcript directory (RECORDING)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_path: Option<PathBuf>,
}

impl RouteDefinition {
    /// Whether this definition should be turned into a live route
    pub fn is_enabled(&self) -> bool {
        !matches!(self.status, None | Some(RouteStatus::Disabled))
    }

    /// Label used in errors and logs; falls back to "METHOD path"
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("{} {}", self.method, self.path)
        } else {
            self.name.clone()
        }
    }

    /// Check the static shape of the definition (no filesystem access)
    pub fn validate(&self) -> Result<(), String> {
        if !self.path.starts_with('/') {
            return Err(format!("path '{}' must start with '/'", self.path));
        }

        match self.status {
            Some(RouteStatus::Forwarded) | Some(RouteStatus::Recording) => {
                let Some(ref forwarded) = self.forwarded else {
                    return Err("'forwarded' URL is required for FORWARDED and RECORDING routes"
                        .to_string());
                };
                let url = reqwest::Url::parse(forwarded)
                    .map_err(|e| format!("invalid forwarded URL '{forwarded}': {e}"))?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(format!(
                        "unsupported forwarded URL scheme '{}'. Currently supported: http, https",
                        url.scheme()
                    ));
                }
                if self.status == Some(RouteStatus::Recording) && self.response_path.is_none() {
                    return Err("'response_path' is required for RECORDING routes".to_string());
                }
            }
            Some(RouteStatus::Mocked) => {
                let needs_path = matches!(
                    self.strategy,
                    Some(ResponseStrategy::Concrete)
                        | Some(ResponseStrategy::Random)
                        | Some(ResponseStrategy::Sequence)
                );
                if needs_path && self.response_path.is_none() {
                    return Err("'response_path' is required for MOCKED routes".to_string());
                }
            }
            _ => {}
        }

        Ok(())
    }
}
