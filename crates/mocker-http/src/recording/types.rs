//! Transcript correlation keys and file names.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const REQUEST_SUFFIX: &str = "_req.dat";
pub const RESPONSE_SUFFIX: &str = "_res.dat";

/// Key shared by the request and response files of one recorded exchange.
///
/// Formatted as `YYYYMMDD_HHMMSS_<microseconds>_<uuid>`. The UUID keeps keys
/// unique when two requests arrive within the same microsecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranscriptKey(String);

impl TranscriptKey {
    pub fn generate() -> Self {
        Self::from_parts(Local::now(), Uuid::new_v4())
    }

    pub fn from_parts(timestamp: DateTime<Local>, id: Uuid) -> Self {
        Self(format!("{}_{}", timestamp.format("%Y%m%d_%H%M%S_%6f"), id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn request_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{}", self.0, REQUEST_SUFFIX))
    }

    pub fn response_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{}", self.0, RESPONSE_SUFFIX))
    }

    /// Recover the key from a transcript file name
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        file_name
            .strip_suffix(REQUEST_SUFFIX)
            .or_else(|| file_name.strip_suffix(RESPONSE_SUFFIX))
            .filter(|key| !key.is_empty())
            .map(|key| Self(key.to_string()))
    }
}

impl fmt::Display for TranscriptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Paths written for one recorded exchange
#[derive(Debug, Clone)]
pub struct Transcript {
    pub key: TranscriptKey,
    pub request_path: PathBuf,
    pub response_path: PathBuf,
}
