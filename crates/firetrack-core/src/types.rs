//! Core domain types for firetrack
//!
//! This module contains the fundamental types used throughout the firetrack
//! library: strongly-typed identifiers, the project record as exported from
//! the project database, and the informal project categories.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{FiretrackError, Result};
use crate::numeric::deserialize_opt_decimal;

/// Opaque project identifier
///
/// Exports carry either UUID strings or integer keys; both are kept as text.
///
/// # Examples
/// ```
/// use firetrack_core::types::ProjectId;
///
/// let id = ProjectId::new("7f0c1d5e");
/// assert_eq!(id.as_str(), "7f0c1d5e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a new ProjectId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Project manager name
///
/// Managers are identified by free text; comparisons are exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ManagerName(String);

impl ManagerName {
    /// Create a new ManagerName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManagerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Informal project category
///
/// Project types are free text; a category matches when the lowercase type
/// contains the category keyword. A type such as `"Prime Retrofit"` matches
/// both categories.
///
/// # Examples
/// ```
/// use firetrack_core::types::ProjectCategory;
///
/// assert!(ProjectCategory::Prime.matches("Prime Retrofit"));
/// assert!(ProjectCategory::Retrofit.matches("Prime Retrofit"));
/// assert!(!ProjectCategory::Retrofit.matches("New construction"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    /// Prime contract work
    Prime,
    /// Retrofit of an existing system
    Retrofit,
}

impl ProjectCategory {
    /// Substring searched for in the lowercase project type
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Prime => "prime",
            Self::Retrofit => "retrofit",
        }
    }

    /// Check whether a free-text project type falls in this category
    pub fn matches(&self, project_type: &str) -> bool {
        project_type.to_lowercase().contains(self.keyword())
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl std::str::FromStr for ProjectCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prime" => Ok(Self::Prime),
            "retrofit" => Ok(Self::Retrofit),
            _ => Err(format!("Invalid project category: {s}")),
        }
    }
}

/// Parse a calendar date as stored by the project database
///
/// Accepts `YYYY-MM-DD`, and RFC 3339 timestamps at midnight in their own
/// offset (how date columns come back from some exports). A timestamp with a
/// time of day is rejected: durations are counted in whole calendar days.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    match DateTime::parse_from_rfc3339(text) {
        Ok(dt) if dt.time() == NaiveTime::MIN => Ok(dt.date_naive()),
        Ok(_) => Err(FiretrackError::InvalidDate(format!(
            "{text} (expected a calendar date, got a time of day)"
        ))),
        Err(_) => Err(FiretrackError::InvalidDate(text.to_string())),
    }
}

fn deserialize_opt_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => parse_date(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn deserialize_opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

fn deserialize_opt_manager<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<ManagerName>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_opt_text(deserializer)?.map(ManagerName::new))
}

/// A project as exported from the project database
///
/// Every attribute apart from the id is optional; absent values are treated
/// as zero or skipped by the statistics, never as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project identifier
    pub id: ProjectId,
    /// Display name
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub name: Option<String>,
    /// Customer name
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub customer: Option<String>,
    /// Responsible project manager
    #[serde(default, deserialize_with = "deserialize_opt_manager")]
    pub pm_name: Option<ManagerName>,
    /// Contract amount in USD
    #[serde(default, deserialize_with = "deserialize_opt_decimal")]
    pub contract_amount: Option<f64>,
    /// Margin percentage at booking
    #[serde(default, deserialize_with = "deserialize_opt_decimal")]
    pub margin_start: Option<f64>,
    /// Margin percentage at close
    #[serde(default, deserialize_with = "deserialize_opt_decimal")]
    pub margin_end: Option<f64>,
    /// Date the project was booked
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub booked: Option<NaiveDate>,
    /// Date the project was closed
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub closed: Option<NaiveDate>,
    /// Free-text project type, conventionally mentioning Prime or Retrofit
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub project_type: Option<String>,
}

impl ProjectRecord {
    /// Create a record with only an id set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(id),
            name: None,
            customer: None,
            pm_name: None,
            contract_amount: None,
            margin_start: None,
            margin_end: None,
            booked: None,
            closed: None,
            project_type: None,
        }
    }

    /// Margin improvement in percentage points, when both margins are known
    pub fn margin_improvement(&self) -> Option<f64> {
        match (self.margin_start, self.margin_end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Whether the project type falls in the given category
    pub fn is_category(&self, category: ProjectCategory) -> bool {
        self.project_type
            .as_deref()
            .is_some_and(|t| category.matches(t))
    }

    /// Whether the project is managed by exactly this PM
    pub fn is_managed_by(&self, pm: &str) -> bool {
        self.pm_name.as_ref().is_some_and(|name| name.as_str() == pm)
    }

    /// Name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id() {
        let id = ProjectId::new("abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn test_project_id_from_integer() {
        let id: ProjectId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_category_matching_is_case_insensitive() {
        assert!(ProjectCategory::Prime.matches("PRIME"));
        assert!(ProjectCategory::Prime.matches("Subprime work"));
        assert!(ProjectCategory::Retrofit.matches("retrofit - phase 2"));
        assert!(!ProjectCategory::Prime.matches("Retrofit"));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(
            "Prime".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::Prime
        );
        assert_eq!(
            "retrofit".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::Retrofit
        );
        assert!("service".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15T00:00:00+00:00").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15T00:00:00-05:00").unwrap(), expected);
        assert!(matches!(
            parse_date("15/03/2024"),
            Err(FiretrackError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_project_record_deserialization() {
        let json = r#"{
            "id": "p-1",
            "name": "Lincoln Elementary",
            "pm_name": "Alice",
            "contract_amount": "125000.00",
            "margin_start": 22.5,
            "margin_end": 25,
            "booked": "2024-01-01",
            "closed": "",
            "project_type": "Prime",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "p-1");
        assert_eq!(record.pm_name, Some(ManagerName::new("Alice")));
        assert_eq!(record.contract_amount, Some(125000.0));
        assert_eq!(record.margin_improvement(), Some(2.5));
        assert_eq!(record.booked, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(record.closed, None);
        assert!(record.is_category(ProjectCategory::Prime));
        assert!(!record.is_category(ProjectCategory::Retrofit));
    }

    #[test]
    fn test_blank_manager_is_absent() {
        let record: ProjectRecord = serde_json::from_str(r#"{"id": 7, "pm_name": ""}"#).unwrap();
        assert_eq!(record.pm_name, None);
        assert_eq!(record.display_name(), "7");
    }

    #[test]
    fn test_parse_date_rejects_time_of_day() {
        assert!(matches!(
            parse_date("2024-01-03T12:00:00Z"),
            Err(FiretrackError::InvalidDate(_))
        ));

        // Whole-day truncation would report 2 days for a 2.25 day job
        let json = r#"{"id": 1, "booked": "2024-01-01T06:00:00Z", "closed": "2024-01-03T12:00:00Z"}"#;
        let err = serde_json::from_str::<ProjectRecord>(json).unwrap_err();
        assert!(err.to_string().contains("time of day"));
    }

    #[test]
    fn test_project_record_rejects_garbage_dates() {
        let json = r#"{"id": "p-2", "booked": "last tuesday"}"#;
        assert!(serde_json::from_str::<ProjectRecord>(json).is_err());
    }

    #[test]
    fn test_margin_improvement_requires_both() {
        let mut record = ProjectRecord::new("p-3");
        record.margin_start = Some(10.0);
        assert_eq!(record.margin_improvement(), None);
        record.margin_end = Some(15.0);
        assert_eq!(record.margin_improvement(), Some(5.0));
    }

    #[test]
    fn test_is_managed_by_is_exact() {
        let mut record = ProjectRecord::new("p-4");
        record.pm_name = Some(ManagerName::new("Alice"));
        assert!(record.is_managed_by("Alice"));
        assert!(!record.is_managed_by("alice"));
        assert!(!ProjectRecord::new("p-5").is_managed_by("Alice"));
    }
}
