//! Project statistics
//!
//! Summary metrics over a project collection, either for the whole company
//! or for a single project manager: project count, contract value, margin
//! improvement and the booked-to-closed duration of Prime and Retrofit work.
//!
//! Statistics are derived on demand and hold no state; callers recompute
//! them whenever the project collection or the selected manager changes.
//!
//! # Examples
//!
//! ```
//! use firetrack_core::stats::aggregate;
//! use firetrack_core::types::ProjectRecord;
//!
//! let mut project = ProjectRecord::new("p-1");
//! project.contract_amount = Some(50_000.0);
//!
//! let global = aggregate(&[project.clone()], None).unwrap();
//! assert_eq!(global.total_projects, 1);
//!
//! // Filtering on a manager with no projects yields no statistics
//! assert!(aggregate(&[project], Some("Alice")).is_none());
//! ```

use crate::filters::ProjectFilter;
use crate::types::{ManagerName, ProjectCategory, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Aggregated statistics over a set of projects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    /// Number of projects in the set
    pub total_projects: usize,
    /// Sum of contract amounts, absent amounts counting as zero
    pub total_contract_amount: f64,
    /// Mean of `margin_end - margin_start` over projects with both margins
    pub avg_margin_improvement: f64,
    /// Median of the same margin improvements
    pub median_margin_improvement: f64,
    /// Mean booked-to-closed days of Prime projects
    pub avg_prime_duration: f64,
    /// Median booked-to-closed days of Prime projects
    pub median_prime_duration: f64,
    /// Mean booked-to-closed days of Retrofit projects
    pub avg_retrofit_duration: f64,
    /// Median booked-to-closed days of Retrofit projects
    pub median_retrofit_duration: f64,
}

/// Statistics for one project manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    /// Manager the statistics belong to
    pub manager: ManagerName,
    /// Statistics over that manager's projects
    #[serde(flatten)]
    pub stats: ProjectStats,
}

/// Arithmetic mean; 0 for an empty list
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median with the usual even/odd rule; 0 for an empty list
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Days from booking to close
///
/// Both ends are calendar dates, so the span is already a whole number of
/// days. `None` when either date is missing, or when the project closed
/// before it was booked (a data entry mistake).
pub fn duration_days(project: &ProjectRecord) -> Option<i64> {
    let (booked, closed) = (project.booked?, project.closed?);
    let days = (closed - booked).num_days();
    (days >= 0).then_some(days)
}

#[derive(Debug, Default)]
struct StatsAccumulator {
    total_projects: usize,
    total_contract_amount: f64,
    margin_improvements: Vec<f64>,
    prime_durations: Vec<f64>,
    retrofit_durations: Vec<f64>,
}

impl StatsAccumulator {
    fn add_project(&mut self, project: &ProjectRecord) {
        self.total_projects += 1;
        self.total_contract_amount += project.contract_amount.unwrap_or(0.0);

        if let Some(improvement) = project.margin_improvement() {
            self.margin_improvements.push(improvement);
        }

        if let Some(days) = duration_days(project) {
            // A type naming both categories counts toward both
            if project.is_category(ProjectCategory::Prime) {
                self.prime_durations.push(days as f64);
            }
            if project.is_category(ProjectCategory::Retrofit) {
                self.retrofit_durations.push(days as f64);
            }
        }
    }

    fn into_stats(self) -> ProjectStats {
        ProjectStats {
            total_projects: self.total_projects,
            total_contract_amount: self.total_contract_amount,
            avg_margin_improvement: mean(&self.margin_improvements),
            median_margin_improvement: median(&self.margin_improvements),
            avg_prime_duration: mean(&self.prime_durations),
            median_prime_duration: median(&self.prime_durations),
            avg_retrofit_duration: mean(&self.retrofit_durations),
            median_retrofit_duration: median(&self.retrofit_durations),
        }
    }
}

impl ProjectStats {
    /// Compute statistics over every project yielded by the iterator
    pub fn from_projects<'a, I>(projects: I) -> Self
    where
        I: IntoIterator<Item = &'a ProjectRecord>,
    {
        let mut acc = StatsAccumulator::default();
        for project in projects {
            acc.add_project(project);
        }
        acc.into_stats()
    }
}

/// Compute statistics, optionally restricted to one project manager
///
/// Without a manager the result is always present, all zeros for an empty
/// collection. With a manager, only projects whose `pm_name` equals it
/// exactly are counted, and `None` is returned when there are none.
pub fn aggregate(projects: &[ProjectRecord], filter_pm: Option<&str>) -> Option<ProjectStats> {
    let Some(pm) = filter_pm else {
        return Some(ProjectStats::from_projects(projects));
    };

    let selected = ProjectFilter::new().with_pm(pm).apply(projects);
    debug!("{} of {} projects managed by {pm}", selected.len(), projects.len());
    if selected.is_empty() {
        return None;
    }
    Some(ProjectStats::from_projects(selected))
}

/// Distinct non-empty manager names, sorted
pub fn managers(projects: &[ProjectRecord]) -> Vec<ManagerName> {
    projects
        .iter()
        .filter_map(|p| p.pm_name.clone())
        .filter(|name| !name.as_str().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Statistics for every manager, sorted by manager name
pub fn aggregate_by_manager(projects: &[ProjectRecord]) -> Vec<ManagerStats> {
    let mut by_manager: BTreeMap<ManagerName, StatsAccumulator> = BTreeMap::new();

    for project in projects {
        if let Some(pm) = project.pm_name.as_ref().filter(|n| !n.as_str().is_empty()) {
            by_manager.entry(pm.clone()).or_default().add_project(project);
        }
    }

    by_manager
        .into_iter()
        .map(|(manager, acc)| ManagerStats {
            manager,
            stats: acc.into_stats(),
        })
        .collect()
}
