//! Layout engine for project roadmap timelines.
//! Maps projects and milestones onto a scrollable day window and themes them.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod service;

pub use config::{
    validate_window_days, Chrome, ColorOverrides, ConfigError, Labels, LateMilestonePolicy,
    Palette, ResolvedConfig, TimelineConfig, MAX_WINDOW_DAYS,
};
pub use engine::layout::{
    build_layout, day_label, DayColumn, MilestoneMarker, ProjectRow, TimelineLayout, TodayMarker,
};
pub use engine::position::{
    percent_for_date, range_span, range_width, DayAnchor, RangeSpan, MAX_PERCENT, MIN_PERCENT,
};
pub use engine::status::{resolve_theme, resolve_tone, Resolution, Theme, ThemeRule, Themed, Tone};
pub use engine::window::{compute_window, ViewWindow};
pub use engine::{CalendarDay, LayoutError, LayoutResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{parse_projects_json, Glyph, Milestone, Project, Status};
pub use service::navigation::{
    CenterDateStore, Clock, ControlledViewState, FixedClock, InternalViewState, SystemClock,
};
pub use service::timeline_service::TimelineService;

/// Returns the engine crate version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
