//! Data loader module for locating and reading project exports
//!
//! The project database is exported either as JSON (an array of project
//! objects, or an object with a `projects` array) or as a spreadsheet CSV
//! whose headers are the project field names.
//!
//! # Discovery
//!
//! When no path is given explicitly, the loader looks for:
//! - `./projects.json` in the working directory
//! - `<data dir>/firetrack/projects.json`, where the data directory is
//!   `~/.local/share` on Linux, `~/Library/Application Support` on macOS
//!   and `%APPDATA%` on Windows
//!
//! The `FIRETRACK_DATA_PATH` environment variable (read by the CLI) takes
//! precedence over both.

use crate::csv::{self, CsvTable};
use crate::error::{FiretrackError, Result};
use crate::types::ProjectRecord;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// File name looked up during discovery
pub const DEFAULT_FILE_NAME: &str = "projects.json";

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(FiretrackError::Config(format!(
                "Unsupported project export {}: expected a .json or .csv file",
                path.display()
            ))),
        }
    }
}

/// Loader for the project export
#[derive(Debug, Clone)]
pub struct DataLoader {
    path: PathBuf,
}

impl DataLoader {
    /// Create a loader for an explicit path, or discover the export
    ///
    /// # Errors
    ///
    /// Returns [`FiretrackError::NoDataFile`] when no path is given and no
    /// export exists in any discovery location.
    pub fn new(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Using project export from command line: {}", path.display());
            return Ok(Self::from_path(path));
        }

        let path = Self::discover_data_path().ok_or(FiretrackError::NoDataFile)?;
        info!("Discovered project export at {}", path.display());
        Ok(Self::from_path(path))
    }

    /// Create a loader for a known path without discovery
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the export this loader reads
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn discover_data_path() -> Option<PathBuf> {
        let mut candidates = vec![PathBuf::from(DEFAULT_FILE_NAME)];
        if let Some(data_dir) = dirs::data_dir() {
            candidates.push(data_dir.join("firetrack").join(DEFAULT_FILE_NAME));
        }

        candidates.into_iter().find(|candidate| {
            trace!("Checking {}", candidate.display());
            candidate.is_file()
        })
    }

    /// Load every project in the export
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, has an unsupported extension, or a
    /// project cannot be deserialized (for example an unparseable date).
    pub fn load_projects(&self) -> Result<Vec<ProjectRecord>> {
        let projects = match ExportFormat::from_path(&self.path)? {
            ExportFormat::Json => self.load_json_projects()?,
            ExportFormat::Csv => self.load_csv_projects()?,
        };
        info!(
            "Loaded {} projects from {}",
            projects.len(),
            self.path.display()
        );
        Ok(projects)
    }

    fn load_json_projects(&self) -> Result<Vec<ProjectRecord>> {
        let document: Value = load_json_document(&self.path)?;
        let list = match document {
            Value::Object(mut object) => object.remove("projects").ok_or_else(|| {
                self.parse_error("expected an array of projects or a `projects` field")
            })?,
            other => other,
        };
        serde_json::from_value(list).map_err(|e| self.parse_error(e.to_string()))
    }

    fn load_csv_projects(&self) -> Result<Vec<ProjectRecord>> {
        let table = read_csv_file(&self.path)?;
        debug!(
            "Project sheet has {} columns and {} rows",
            table.headers.len(),
            table.len()
        );

        table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let row_number = index + 1;
                let mut object: Map<String, Value> = row
                    .iter()
                    .map(|(column, value)| (column.clone(), Value::String(value.clone())))
                    .collect();

                // Sheets exported without an id column get the row number
                let has_id = object
                    .get("id")
                    .and_then(Value::as_str)
                    .is_some_and(|id| !id.trim().is_empty());
                if !has_id {
                    object.insert("id".to_string(), Value::from(row_number));
                }

                serde_json::from_value(Value::Object(object))
                    .map_err(|e| self.parse_error(format!("row {row_number}: {e}")))
            })
            .collect()
    }

    fn parse_error(&self, error: impl Into<String>) -> FiretrackError {
        FiretrackError::Parse {
            file: self.path.clone(),
            error: error.into(),
        }
    }
}

/// Read and parse a CSV file
pub fn read_csv_file(path: &Path) -> Result<CsvTable> {
    let text = std::fs::read_to_string(path)?;
    let table = csv::parse(&text);
    debug!("Parsed {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Read a JSON document such as a change order or closeout form
pub fn load_json_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| FiretrackError::Parse {
        file: path.to_path_buf(),
        error: e.to_string(),
    })
}
