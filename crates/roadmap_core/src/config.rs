//! Timeline configuration and palette resolution.
//!
//! # Responsibility
//! - Hold every host-tunable option with its documented fallback value.
//! - Merge partial color overrides over the default palette once per pass.
//! - Reject configuration that would produce undefined geometry.
//!
//! # Invariants
//! - `window_days` must be in `1..=MAX_WINDOW_DAYS`.
//! - Every color token in a resolved palette is a `#rgb` or `#rrggbb` hex value.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

pub const DEFAULT_WINDOW_DAYS: i64 = 7;
/// Widest supported window: one leap year of day columns.
pub const MAX_WINDOW_DAYS: i64 = 366;
pub const DEFAULT_SIDEBAR_WIDTH: u32 = 220;
pub const DEFAULT_ROW_HEIGHT: u32 = 120;
pub const DEFAULT_RANGE_ICON_SIZE: u32 = 16;

/// Configuration error surfaced before any geometry is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `window_days` was zero or negative.
    NonPositiveWindow(i64),
    /// `window_days` exceeded `MAX_WINDOW_DAYS`.
    WindowTooLarge(i64),
    /// A supplied day sequence skipped or repeated a day.
    NonConsecutiveDays { previous: NaiveDate, next: NaiveDate },
    /// Position mapping was requested against an empty day sequence.
    EmptyWindow,
    /// A color override is not a hex color token.
    InvalidColor { token: &'static str, value: String },
    /// Configuration document could not be decoded.
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveWindow(days) => {
                write!(f, "window_days must be positive, got {days}")
            }
            Self::WindowTooLarge(days) => {
                write!(f, "window_days must be at most {MAX_WINDOW_DAYS}, got {days}")
            }
            Self::NonConsecutiveDays { previous, next } => {
                write!(f, "window days must be consecutive, got {next} after {previous}")
            }
            Self::EmptyWindow => write!(f, "view window must contain at least one day"),
            Self::InvalidColor { token, value } => {
                write!(f, "color `{token}` must be a #rgb or #rrggbb hex value, got `{value}`")
            }
            Self::Parse(message) => write!(f, "invalid timeline config: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Which open milestones count as late once their date has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateMilestonePolicy {
    /// Only `in-progress` milestones turn danger after their date.
    #[default]
    InProgressOnly,
    /// Any milestone that is neither done nor cancelled turns danger.
    AnyOpen,
}

/// Fully resolved color tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub success: String,
    pub danger: String,
    pub warning: String,
    pub muted: String,
    pub card: String,
    pub grid: String,
    pub border: String,
    pub background: String,
    pub text: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#3b82f6".to_string(),
            success: "#10b981".to_string(),
            danger: "#ef4444".to_string(),
            warning: "#f59e0b".to_string(),
            muted: "#94a3b8".to_string(),
            card: "#ffffff".to_string(),
            grid: "#f1f5f9".to_string(),
            border: "#e2e8f0".to_string(),
            background: "#f8fafc".to_string(),
            text: "#1e293b".to_string(),
        }
    }
}

/// Partial palette supplied by the host; unset tokens keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    pub primary: Option<String>,
    pub success: Option<String>,
    pub danger: Option<String>,
    pub warning: Option<String>,
    pub muted: Option<String>,
    pub card: Option<String>,
    pub grid: Option<String>,
    pub border: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
}

impl ColorOverrides {
    fn entries(&self) -> [(&'static str, &Option<String>); 10] {
        [
            ("primary", &self.primary),
            ("success", &self.success),
            ("danger", &self.danger),
            ("warning", &self.warning),
            ("muted", &self.muted),
            ("card", &self.card),
            ("grid", &self.grid),
            ("border", &self.border),
            ("background", &self.background),
            ("text", &self.text),
        ]
    }

    /// Checks every set override against the hex color grammar.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (token, value) in self.entries() {
            if let Some(value) = value {
                if !is_hex_color(value) {
                    return Err(ConfigError::InvalidColor {
                        token,
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Merges overrides over `base`, leaving unset tokens untouched.
    pub fn merge_over(&self, base: &Palette) -> Palette {
        let pick = |value: &Option<String>, fallback: &String| {
            value.clone().unwrap_or_else(|| fallback.clone())
        };
        Palette {
            primary: pick(&self.primary, &base.primary),
            success: pick(&self.success, &base.success),
            danger: pick(&self.danger, &base.danger),
            warning: pick(&self.warning, &base.warning),
            muted: pick(&self.muted, &base.muted),
            card: pick(&self.card, &base.card),
            grid: pick(&self.grid, &base.grid),
            border: pick(&self.border, &base.border),
            background: pick(&self.background, &base.background),
            text: pick(&self.text, &base.text),
        }
    }
}

/// Text shown on the header and navigation controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub title: String,
    pub prev: String,
    pub next: String,
    pub today: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Team Roadmap".to_string(),
            prev: "Day".to_string(),
            next: "Day".to_string(),
            today: "Today".to_string(),
        }
    }
}

/// Host-facing timeline options.
///
/// Layout numbers (`sidebar_width`, `row_height`, `range_icon_size`) are
/// passed through to the presentation layer and never affect positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub window_days: i64,
    pub show_today_line: bool,
    pub show_header: bool,
    pub sidebar_width: u32,
    pub row_height: u32,
    pub range_icon_size: u32,
    pub labels: Labels,
    pub colors: ColorOverrides,
    pub late_milestone_policy: LateMilestonePolicy,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            show_today_line: true,
            show_header: true,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            range_icon_size: DEFAULT_RANGE_ICON_SIZE,
            labels: Labels::default(),
            colors: ColorOverrides::default(),
            late_milestone_policy: LateMilestonePolicy::default(),
        }
    }
}

impl TimelineConfig {
    /// Decodes a JSON config document; missing fields take their defaults.
    ///
    /// # Errors
    /// - `ConfigError::Parse` when the document is not valid JSON for this shape.
    /// - Any error `validate()` reports.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects options that cannot produce defined geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_window_days(self.window_days)?;
        self.colors.validate()
    }

    /// Validates and freezes this config for one render pass.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        self.validate()?;
        Ok(ResolvedConfig {
            window_days: self.window_days as usize,
            show_today_line: self.show_today_line,
            palette: self.colors.merge_over(&Palette::default()),
            late_milestone_policy: self.late_milestone_policy,
            chrome: Chrome {
                show_header: self.show_header,
                sidebar_width: self.sidebar_width,
                row_height: self.row_height,
                range_icon_size: self.range_icon_size,
                labels: self.labels.clone(),
            },
        })
    }
}

/// Presentation-only options passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chrome {
    pub show_header: bool,
    pub sidebar_width: u32,
    pub row_height: u32,
    pub range_icon_size: u32,
    pub labels: Labels,
}

/// Per-pass snapshot of the options the engine itself consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub window_days: usize,
    pub show_today_line: bool,
    pub palette: Palette,
    pub late_milestone_policy: LateMilestonePolicy,
    pub chrome: Chrome,
}

/// Checks `window_days` against `1..=MAX_WINDOW_DAYS`.
pub fn validate_window_days(window_days: i64) -> Result<(), ConfigError> {
    if window_days <= 0 {
        return Err(ConfigError::NonPositiveWindow(window_days));
    }
    if window_days > MAX_WINDOW_DAYS {
        return Err(ConfigError::WindowTooLarge(window_days));
    }
    Ok(())
}

/// Returns whether `value` is a `#rgb` or `#rrggbb` token.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{
        is_hex_color, ColorOverrides, ConfigError, LateMilestonePolicy, Palette, TimelineConfig,
        MAX_WINDOW_DAYS,
    };

    #[test]
    fn defaults_match_documented_values() {
        let config = TimelineConfig::default();
        assert_eq!(config.window_days, 7);
        assert!(config.show_today_line);
        assert_eq!(config.sidebar_width, 220);
        assert_eq!(config.row_height, 120);
        assert_eq!(config.range_icon_size, 16);
        assert_eq!(config.labels.title, "Team Roadmap");
        assert_eq!(
            config.late_milestone_policy,
            LateMilestonePolicy::InProgressOnly
        );
    }

    #[test]
    fn rejects_non_positive_window() {
        let config = TimelineConfig {
            window_days: 0,
            ..TimelineConfig::default()
        };
        assert_eq!(
            config.validate().expect_err("zero window must fail"),
            ConfigError::NonPositiveWindow(0)
        );

        let config = TimelineConfig {
            window_days: -3,
            ..TimelineConfig::default()
        };
        assert!(config.resolve().is_err());
    }

    #[test]
    fn rejects_oversized_window() {
        let err = TimelineConfig::from_json_str(r#"{ "window_days": 150000000 }"#)
            .expect_err("huge window must fail");
        assert_eq!(err, ConfigError::WindowTooLarge(150_000_000));

        let widest = TimelineConfig {
            window_days: MAX_WINDOW_DAYS,
            ..TimelineConfig::default()
        };
        assert_eq!(widest.resolve().expect("max window resolves").window_days, 366);
    }

    #[test]
    fn hex_color_grammar() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#10B981"));
        assert!(!is_hex_color("10b981"));
        assert!(!is_hex_color("#10b98"));
        assert!(!is_hex_color("red"));
    }

    #[test]
    fn overrides_merge_over_defaults() {
        let overrides = ColorOverrides {
            primary: Some("#000000".to_string()),
            ..ColorOverrides::default()
        };
        let merged = overrides.merge_over(&Palette::default());
        assert_eq!(merged.primary, "#000000");
        assert_eq!(merged.success, Palette::default().success);
    }

    #[test]
    fn invalid_override_names_the_token() {
        let overrides = ColorOverrides {
            danger: Some("crimson".to_string()),
            ..ColorOverrides::default()
        };
        let err = overrides.validate().expect_err("named colors must fail");
        assert_eq!(
            err,
            ConfigError::InvalidColor {
                token: "danger",
                value: "crimson".to_string()
            }
        );
        assert!(err.to_string().contains("danger"));
    }

    #[test]
    fn json_config_fills_missing_fields() {
        let config = TimelineConfig::from_json_str(
            r##"{ "window_days": 14, "colors": { "muted": "#aaa" }, "late_milestone_policy": "any_open" }"##,
        )
        .expect("config should parse");
        assert_eq!(config.window_days, 14);
        assert_eq!(config.row_height, 120);
        assert_eq!(config.late_milestone_policy, LateMilestonePolicy::AnyOpen);

        let resolved = config.resolve().expect("config should resolve");
        assert_eq!(resolved.window_days, 14);
        assert_eq!(resolved.palette.muted, "#aaa");
    }

    #[test]
    fn json_config_reports_parse_errors() {
        let err = TimelineConfig::from_json_str("{ not json").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
