//! Project and milestone domain model.
//!
//! # Responsibility
//! - Define the canonical records rendered as range bars and markers.
//! - Define the wire shape used when hosts hand data over as JSON.
//!
//! # Invariants
//! - `end >= start` is expected for projects but never required; a reversed
//!   range renders with zero width.
//! - Milestone order is display order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle tag shared by projects and milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Finished.
    Completed,
    /// Finished and accepted.
    Success,
    /// Dropped; no longer actionable.
    Cancelled,
    /// Scheduled but not started.
    Pending,
    /// Work is underway.
    InProgress,
}

impl Status {
    /// Stable tag used on the wire and in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Success => "success",
            Self::Cancelled => "cancelled",
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
        }
    }

    /// Returns whether this status is a successful terminal state.
    pub fn is_done(self) -> bool {
        matches!(self, Self::Completed | Self::Success)
    }

    /// Returns whether this status still awaits completion.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

/// Semantic glyph kind for markers and range anchors.
///
/// The engine only picks the kind; artwork belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Trophy,
    Cancelled,
    Alert,
    Clock,
    Rocket,
    Flag,
    Calendar,
}

/// Single-date checkpoint inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub name: String,
    /// Target day; rendered centered inside its day column.
    pub end_date: NaiveDate,
    pub status: Status,
    /// Overrides the status-derived glyph when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Glyph>,
}

impl Milestone {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        end_date: NaiveDate,
        status: Status,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            end_date,
            status,
            icon: None,
        }
    }
}

/// Project rendered as one timeline row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub start: NaiveDate,
    /// Inclusive last day of the project range.
    pub end: NaiveDate,
    #[serde(default = "default_project_status")]
    pub status: Status,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_icon: Option<Glyph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_icon: Option<Glyph>,
}

fn default_project_status() -> Status {
    Status::Pending
}

impl Project {
    /// Creates a pending project without milestones.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            status: Status::Pending,
            milestones: Vec::new(),
            start_icon: None,
            end_icon: None,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_milestone(mut self, milestone: Milestone) -> Self {
        self.milestones.push(milestone);
        self
    }

    /// Returns whether the range is reversed (`end < start`).
    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }
}

/// Parses a JSON array of projects as supplied by a hosting application.
pub fn parse_projects_json(raw: &str) -> Result<Vec<Project>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::{parse_projects_json, Glyph, Milestone, Project, Status};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn status_tags_use_kebab_case() {
        let json = serde_json::to_value(Status::InProgress).expect("serialize status");
        assert_eq!(json, "in-progress");
        assert_eq!(Status::InProgress.as_str(), "in-progress");

        let decoded: Status = serde_json::from_str("\"cancelled\"").expect("decode status");
        assert_eq!(decoded, Status::Cancelled);
    }

    #[test]
    fn status_groups_are_disjoint() {
        assert!(Status::Completed.is_done());
        assert!(Status::Success.is_done());
        assert!(!Status::Cancelled.is_done());
        assert!(!Status::Cancelled.is_open());
        assert!(Status::Pending.is_open());
        assert!(Status::InProgress.is_open());
    }

    #[test]
    fn project_builder_keeps_milestone_order() {
        let project = Project::new("p1", "Cloud Migration", day(2026, 2, 10), day(2026, 2, 14))
            .with_status(Status::InProgress)
            .with_milestone(Milestone::new("m1", "DB Sync", day(2026, 2, 13), Status::Success))
            .with_milestone(Milestone::new("m2", "Go-Live", day(2026, 2, 14), Status::Pending));

        let ids: Vec<&str> = project.milestones.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert_eq!(project.status, Status::InProgress);
        assert!(!project.is_reversed());
    }

    #[test]
    fn parses_host_payload_with_defaults() {
        let raw = r#"[
            {
                "id": "p3",
                "name": "HR Portal",
                "start": "2026-02-15",
                "end": "2026-02-25",
                "end_icon": "calendar",
                "milestones": [
                    { "id": "m6", "name": "Form Logic", "end_date": "2026-02-16", "status": "pending" }
                ]
            }
        ]"#;

        let projects = parse_projects_json(raw).expect("payload should parse");
        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.status, Status::Pending);
        assert_eq!(project.start_icon, None);
        assert_eq!(project.end_icon, Some(Glyph::Calendar));
        assert_eq!(project.milestones[0].end_date, day(2026, 2, 16));
    }

    #[test]
    fn rejects_unknown_status_tag() {
        let raw = r#"[{ "id": "p", "name": "x", "start": "2026-02-15", "end": "2026-02-16", "status": "blocked" }]"#;
        assert!(parse_projects_json(raw).is_err());
    }
}
