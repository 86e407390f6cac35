//! Filtering module for project records
//!
//! Supports restricting a project collection by manager, category and
//! booking date. All filters are optional and can be combined.
//!
//! # Examples
//!
//! ```
//! use firetrack_core::filters::ProjectFilter;
//! use firetrack_core::types::ProjectCategory;
//! use chrono::NaiveDate;
//!
//! let filter = ProjectFilter::new()
//!     .with_pm("Alice")
//!     .with_category(ProjectCategory::Retrofit)
//!     .with_booked_since(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! ```

use crate::types::{ProjectCategory, ProjectRecord};
use chrono::NaiveDate;

/// Filter configuration for project records
#[derive(Debug, Default, Clone)]
pub struct ProjectFilter {
    /// Exact, case-sensitive manager name
    pub pm: Option<String>,
    /// Project category
    pub category: Option<ProjectCategory>,
    /// Earliest booking date (inclusive)
    pub booked_since: Option<NaiveDate>,
    /// Latest booking date (inclusive)
    pub booked_until: Option<NaiveDate>,
}

impl ProjectFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the manager filter
    pub fn with_pm(mut self, pm: impl Into<String>) -> Self {
        self.pm = Some(pm.into());
        self
    }

    /// Set the category filter
    pub fn with_category(mut self, category: ProjectCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the earliest booking date
    pub fn with_booked_since(mut self, date: NaiveDate) -> Self {
        self.booked_since = Some(date);
        self
    }

    /// Set the latest booking date
    pub fn with_booked_until(mut self, date: NaiveDate) -> Self {
        self.booked_until = Some(date);
        self
    }

    /// Whether no restriction is configured
    pub fn is_unrestricted(&self) -> bool {
        self.pm.is_none()
            && self.category.is_none()
            && self.booked_since.is_none()
            && self.booked_until.is_none()
    }

    /// Check if a project passes the filter
    pub fn matches(&self, project: &ProjectRecord) -> bool {
        if let Some(pm) = &self.pm {
            if !project.is_managed_by(pm) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if !project.is_category(category) {
                return false;
            }
        }

        // A date bound excludes projects with no booking date
        if self.booked_since.is_some() || self.booked_until.is_some() {
            let Some(booked) = project.booked else {
                return false;
            };
            if self.booked_since.is_some_and(|since| booked < since) {
                return false;
            }
            if self.booked_until.is_some_and(|until| booked > until) {
                return false;
            }
        }

        true
    }

    /// Borrow the matching projects, keeping collection order
    pub fn apply<'a>(&self, projects: &'a [ProjectRecord]) -> Vec<&'a ProjectRecord> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}
