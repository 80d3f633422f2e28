//! Error types for route loading and request dispatch.

use std::path::PathBuf;

/// Errors raised while building the route table or answering a request.
#[derive(Debug, thiserror::Error)]
pub enum MockerError {
    /// Malformed route definition, detected while loading routes
    #[error("Invalid route '{route}': {message}")]
    Config { route: String, message: String },
    /// Response file or directory does not exist (or is not the expected kind)
    #[error("Response path not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Response file is not valid UTF-8
    #[error("Response file {} is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// Any other filesystem failure while reading responses or writing transcripts
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The upstream answered but its transcript file could not be written.
    /// Carries the upstream reply so it is not lost with the write.
    #[error("Failed to write transcript {} (upstream answered {status}): {source}", path.display())]
    TranscriptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        status: hyper::StatusCode,
        body: String,
    },
    /// Transport-level failure talking to the upstream
    #[error("Upstream {url} unreachable: {source}")]
    UpstreamUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// No route registered for the method and path
    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl MockerError {
    pub(crate) fn config(route: impl Into<String>, message: impl Into<String>) -> Self {
        MockerError::Config {
            route: route.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MockerError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            MockerError::Config { .. } => "config",
            MockerError::NotFound(_) => "not_found",
            MockerError::Decode { .. } => "decode",
            MockerError::Io { .. } => "io",
            MockerError::TranscriptWrite { .. } => "transcript_write",
            MockerError::UpstreamUnreachable { .. } => "upstream_unreachable",
            MockerError::RouteNotFound { .. } => "route_not_found",
        }
    }
}
