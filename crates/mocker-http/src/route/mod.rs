//! Live routes built from configuration.
//!
//! A `Route` is built once at startup from a `RouteDefinition` and never
//! reconfigured. The only mutable part is the SEQUENCE cursor, which each
//! route owns.

mod table;

pub use table::{RouteKey, RouteTable};

use crate::behaviors::{SequenceCursor, WaitBehavior};
use crate::config::{Method, ResponseStrategy, RouteDefinition, RouteStatus};
use crate::error::MockerError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Route {
    pub name: String,
    pub key: RouteKey,
    /// Declared content format; shown in logs and `--check` output only
    pub format: Option<String>,
    /// Never `Disabled`: disabled definitions are not turned into routes
    pub status: RouteStatus,
    pub wait: WaitBehavior,
    pub forwarded: Option<reqwest::Url>,
    /// `Unknown` when the definition had no strategy
    pub strategy: ResponseStrategy,
    pub response_path: PathBuf,
    /// Regular files under `response_path`, sorted by file name
    pub files: Vec<PathBuf>,
    pub cursor: SequenceCursor,
}

impl Route {
    /// Build a route from its definition.
    ///
    /// Returns `Ok(None)` for DISABLED definitions and ones without a status.
    /// Discovers the response files for RANDOM and SEQUENCE routes and checks
    /// that every path the route will use exists.
    pub fn from_definition(definition: &RouteDefinition) -> Result<Option<Self>, MockerError> {
        let Some(status) = definition.status else {
            return Ok(None);
        };
        if status == RouteStatus::Disabled {
            return Ok(None);
        }

        let label = definition.label();
        definition
            .validate()
            .map_err(|message| MockerError::config(&label, message))?;

        let strategy = definition.strategy.unwrap_or(ResponseStrategy::Unknown);
        let response_path = definition.response_path.clone().unwrap_or_default();

        let forwarded = match status {
            RouteStatus::Forwarded | RouteStatus::Recording => {
                let raw = definition.forwarded.as_deref().unwrap_or_default();
                let url = reqwest::Url::parse(raw).map_err(|e| {
                    MockerError::config(&label, format!("invalid forwarded URL '{raw}': {e}"))
                })?;
                Some(url)
            }
            _ => None,
        };

        let mut files = Vec::new();
        match status {
            RouteStatus::Mocked if strategy.uses_directory() => {
                files = discover_files(&response_path)?;
                if files.is_empty() {
                    return Err(MockerError::config(
                        &label,
                        format!(
                            "response directory {} contains no files",
                            response_path.display()
                        ),
                    ));
                }
            }
            RouteStatus::Mocked if strategy == ResponseStrategy::Concrete => {
                if !response_path.is_file() {
                    return Err(MockerError::NotFound(response_path));
                }
            }
            RouteStatus::Recording => {
                if !response_path.is_dir() {
                    return Err(MockerError::NotFound(response_path));
                }
            }
            _ => {}
        }

        Ok(Some(Self {
            name: definition.name.clone(),
            key: RouteKey::new(definition.method, definition.path.clone()),
            format: definition.format.clone(),
            status,
            wait: WaitBehavior::from_millis(definition.delay_ms),
            forwarded,
            strategy,
            response_path,
            files,
            cursor: SequenceCursor::new(),
        }))
    }

    pub fn method(&self) -> Method {
        self.key.method
    }

    pub fn path(&self) -> &str {
        &self.key.path
    }

    /// Declared format, or "-" when the definition had none
    pub fn format_label(&self) -> &str {
        self.format.as_deref().unwrap_or("-")
    }
}

/// List the regular files directly inside `dir`, sorted by file name.
///
/// Sorting gives SEQUENCE routes the same rotation order on every platform
/// and every run, whatever order the directory listing yields.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>, MockerError> {
    if !dir.is_dir() {
        return Err(MockerError::NotFound(dir.to_path_buf()));
    }
    let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MockerError::NotFound(dir.to_path_buf()),
        _ => MockerError::io(dir, e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MockerError::io(dir, e))?;
        // Follows symlinks, so a link to a regular file counts as one
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
