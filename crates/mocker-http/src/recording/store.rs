//! Transcript recorder for RECORDING routes.

use super::types::{Transcript, TranscriptKey};
use crate::config::Method;
use crate::error::MockerError;
use crate::proxy::{Forwarder, UpstreamResponse};
use bytes::Bytes;
use std::path::Path;
use tracing::{debug, info};

/// Forwards a request and writes the request/response pair to disk
#[derive(Debug, Clone)]
pub struct TranscriptRecorder {
    forwarder: Forwarder,
}

impl TranscriptRecorder {
    pub fn new(forwarder: Forwarder) -> Self {
        Self { forwarder }
    }

    /// Record one exchange under `dir`.
    ///
    /// The request file is written before the upstream call, so a failed or
    /// hung call still leaves the request on disk. The response file is
    /// written once the upstream has answered. A failed request write is an
    /// `Io` error and a failed response write is `TranscriptWrite`, which
    /// still carries the upstream status and body. Upstream failures are
    /// `UpstreamUnreachable`.
    pub async fn record(
        &self,
        dir: &Path,
        method: Method,
        url: &reqwest::Url,
        body: Bytes,
    ) -> Result<(Transcript, UpstreamResponse), MockerError> {
        let key = TranscriptKey::generate();
        let request_path = key.request_path(dir);
        let response_path = key.response_path(dir);

        tokio::fs::write(&request_path, &body)
            .await
            .map_err(|e| MockerError::io(&request_path, e))?;
        debug!("Wrote request transcript {}", request_path.display());

        let upstream = self.forwarder.forward(method, url, body).await?;

        let written = tokio::fs::write(&response_path, upstream.body.as_bytes()).await;
        if let Err(source) = written {
            return Err(MockerError::TranscriptWrite {
                path: response_path,
                source,
                status: upstream.status,
                body: upstream.body,
            });
        }

        info!(
            "Recorded {} {} -> {} as {}",
            method, url, upstream.status, key
        );

        Ok((
            Transcript {
                key,
                request_path,
                response_path,
            },
            upstream,
        ))
    }
}
