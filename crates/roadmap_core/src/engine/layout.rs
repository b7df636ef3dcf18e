//! Full layout pass: window, positions and themes for every element.
//!
//! # Invariants
//! - `today` is captured by the caller once and used for every element.
//! - Output order mirrors input order (projects, then milestones per project).
//! - The pass is idempotent: identical inputs yield identical layouts.

use crate::config::{Chrome, Palette, ResolvedConfig};
use crate::engine::position::{percent_for_date, range_span, DayAnchor};
use crate::engine::status::{milestone_glyph, range_glyphs, resolve_tone, Theme};
use crate::engine::window::{compute_window, ViewWindow};
use crate::engine::{CalendarDay, LayoutResult};
use crate::model::project::{Glyph, Project};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

/// Day-grid column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    /// Day number and short weekday, e.g. `14 Sat`.
    pub label: String,
    pub is_today: bool,
}

/// Vertical "today" line position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TodayMarker {
    pub percent: f64,
}

/// Milestone marker on a project row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneMarker {
    pub id: String,
    pub name: String,
    pub percent: f64,
    pub theme: Theme,
    pub glyph: Glyph,
}

/// One project row: range bar plus its markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub left: f64,
    pub width: f64,
    /// False when the range collapsed to zero width.
    pub range_visible: bool,
    pub theme: Theme,
    pub start_glyph: Glyph,
    pub end_glyph: Glyph,
    pub milestones: Vec<MilestoneMarker>,
}

/// Geometry handed to the presentation layer for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub today: NaiveDate,
    pub window: ViewWindow,
    pub days: Vec<DayColumn>,
    pub today_marker: Option<TodayMarker>,
    pub rows: Vec<ProjectRow>,
    pub palette: Palette,
    pub chrome: Chrome,
}

/// Computes the layout of `projects` around `center` as of `today`.
///
/// # Errors
/// - `InvalidConfiguration` for a non-positive window size.
/// - `DateOutOfRange` when the window leaves the supported calendar.
pub fn build_layout<C: CalendarDay, T: CalendarDay>(
    projects: &[Project],
    center: C,
    today: T,
    config: &ResolvedConfig,
) -> LayoutResult<TimelineLayout> {
    let today = today.calendar_day();
    let window = compute_window(center, config.window_days as i64)?;
    let days = window.days();

    let columns = days
        .iter()
        .map(|date| DayColumn {
            date: *date,
            label: day_label(*date),
            is_today: *date == today,
        })
        .collect();

    let today_marker = if config.show_today_line && window.contains(today) {
        Some(TodayMarker {
            percent: percent_for_date(today, days, DayAnchor::Start)?,
        })
    } else {
        None
    };

    let rows = projects
        .iter()
        .map(|project| layout_row(project, days, today, config))
        .collect::<LayoutResult<Vec<_>>>()?;

    debug!(
        "event=layout_pass module=engine status=ok window_start={} window_days={} projects={} today_visible={}",
        window.first_day(),
        window.len(),
        projects.len(),
        today_marker.is_some()
    );

    Ok(TimelineLayout {
        today,
        window,
        days: columns,
        today_marker,
        rows,
        palette: config.palette.clone(),
        chrome: config.chrome.clone(),
    })
}

fn layout_row(
    project: &Project,
    days: &[NaiveDate],
    today: NaiveDate,
    config: &ResolvedConfig,
) -> LayoutResult<ProjectRow> {
    if project.is_reversed() {
        warn!(
            "event=range_reversed module=engine status=degraded project_id={} start={} end={}",
            project.id, project.start, project.end
        );
    }

    let span = range_span(project.start, project.end, days)?;
    let tone = resolve_tone(project, today, config.late_milestone_policy).tone;
    let (start_glyph, end_glyph) = range_glyphs(project);

    let milestones = project
        .milestones
        .iter()
        .map(|milestone| {
            let tone = resolve_tone(milestone, today, config.late_milestone_policy).tone;
            Ok(MilestoneMarker {
                id: milestone.id.clone(),
                name: milestone.name.clone(),
                percent: percent_for_date(milestone.end_date, days, DayAnchor::Center)?,
                theme: Theme::from_tone(tone, &config.palette),
                glyph: milestone_glyph(milestone, tone),
            })
        })
        .collect::<LayoutResult<Vec<_>>>()?;

    Ok(ProjectRow {
        id: project.id.clone(),
        name: project.name.clone(),
        left: span.left,
        width: span.width,
        range_visible: span.is_visible(),
        theme: Theme::from_tone(tone, &config.palette),
        start_glyph,
        end_glyph,
        milestones,
    })
}

/// Formats a grid header such as `14 Sat`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%-d %a").to_string()
}
