//! Common test utilities and helpers for firetrack tests
//!
//! This module provides a project builder, a sample portfolio and helpers
//! for writing export files into temporary directories.

use chrono::NaiveDate;
use firetrack::types::{ManagerName, ProjectRecord};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

// Global mutex to serialize environment variable modifications in tests
#[allow(dead_code)]
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Common test managers
#[allow(dead_code)]
pub const TEST_MANAGERS: &[&str] = &["Alice Smith", "Bob Jones", "Carla Diaz"];

/// Builder for creating test ProjectRecord instances
pub struct ProjectBuilder {
    project: ProjectRecord,
}

#[allow(dead_code)]
impl ProjectBuilder {
    /// Create a new builder with only an id set
    pub fn new(id: &str) -> Self {
        Self {
            project: ProjectRecord::new(id),
        }
    }

    pub fn with_pm(mut self, pm: &str) -> Self {
        self.project.pm_name = Some(ManagerName::new(pm));
        self
    }

    pub fn with_contract(mut self, amount: f64) -> Self {
        self.project.contract_amount = Some(amount);
        self
    }

    pub fn with_margins(mut self, start: f64, end: f64) -> Self {
        self.project.margin_start = Some(start);
        self.project.margin_end = Some(end);
        self
    }

    pub fn with_type(mut self, project_type: &str) -> Self {
        self.project.project_type = Some(project_type.to_string());
        self
    }

    /// Set booked and closed dates, `YYYY-MM-DD`
    pub fn with_dates(mut self, booked: &str, closed: &str) -> Self {
        self.project.booked = Some(date(booked));
        self.project.closed = Some(date(closed));
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.project.name = Some(name.to_string());
        self
    }

    pub fn build(self) -> ProjectRecord {
        self.project
    }
}

/// Parse a `YYYY-MM-DD` literal
#[allow(dead_code)]
pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid test date")
}

/// A small portfolio across three managers
///
/// Alice: two Prime jobs (30 and 60 days), margins +2 and +4.
/// Bob: one Retrofit job (10 days), margin -1.
/// Carla: one Prime Retrofit job without dates or margins.
#[allow(dead_code)]
pub fn sample_portfolio() -> Vec<ProjectRecord> {
    vec![
        ProjectBuilder::new("1")
            .with_name("Central Library")
            .with_pm(TEST_MANAGERS[0])
            .with_contract(100_000.0)
            .with_margins(20.0, 22.0)
            .with_type("Prime")
            .with_dates("2024-01-01", "2024-01-31")
            .build(),
        ProjectBuilder::new("2")
            .with_pm(TEST_MANAGERS[0])
            .with_contract(50_000.0)
            .with_margins(18.0, 22.0)
            .with_type("prime install")
            .with_dates("2024-02-01", "2024-04-01")
            .build(),
        ProjectBuilder::new("3")
            .with_pm(TEST_MANAGERS[1])
            .with_contract(25_000.0)
            .with_margins(30.0, 29.0)
            .with_type("Retrofit")
            .with_dates("2024-03-01", "2024-03-11")
            .build(),
        ProjectBuilder::new("4")
            .with_pm(TEST_MANAGERS[2])
            .with_type("Prime Retrofit")
            .build(),
    ]
}

/// Write a file into a fresh temporary directory
///
/// The directory is returned so it outlives the test body.
#[allow(dead_code)]
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    (dir, path)
}

/// Assert two floats are equal within a small tolerance
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
