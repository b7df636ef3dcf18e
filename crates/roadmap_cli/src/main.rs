//! Roadmap layout CLI.
//!
//! # Responsibility
//! - Load a project list (and optional config) from JSON files.
//! - Run one render pass and print the computed geometry.
//! - Act as a minimal host for smoke-checking the engine.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, ValueEnum};
use log::info;
use roadmap_core::{
    init_logging, parse_projects_json, Clock, FixedClock, InternalViewState, SystemClock,
    TimelineConfig, TimelineLayout, TimelineService,
};
use std::fmt::{self, Write as _};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "roadmap", version, about = "Compute roadmap timeline layouts")]
struct Args {
    /// JSON file with an array of projects.
    projects: PathBuf,

    /// Center date of the view window (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    center: Option<NaiveDate>,

    /// Pin "today" instead of reading the system clock.
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Number of visible days; overrides the config file.
    #[arg(long)]
    days: Option<i64>,

    /// JSON timeline config file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[arg(long, default_value_t = roadmap_core::default_log_level().to_string())]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(&args.log_level, log_dir).context("failed to initialize logging")?;
    }

    let raw_projects = std::fs::read_to_string(&args.projects)
        .with_context(|| format!("failed to read {}", args.projects.display()))?;
    let projects = parse_projects_json(&raw_projects)
        .with_context(|| format!("failed to parse projects in {}", args.projects.display()))?;

    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            TimelineConfig::from_json_str(&raw)?
        }
        None => TimelineConfig::default(),
    };
    if let Some(days) = args.days {
        config.window_days = days;
    }

    let layout = match args.today {
        Some(today) => render(&args, config, &projects, FixedClock(midnight(today)))?,
        None => render(&args, config, &projects, SystemClock)?,
    };
    info!(
        "event=cli_render module=cli status=ok projects={} window_start={}",
        projects.len(),
        layout.window.first_day()
    );

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&layout)?,
        OutputFormat::Text => render_text(&layout)?,
    };
    println!("{output}");
    Ok(())
}

fn render<C: Clock>(
    args: &Args,
    config: TimelineConfig,
    projects: &[roadmap_core::Project],
    clock: C,
) -> Result<TimelineLayout> {
    let center = args.center.map(midnight).unwrap_or_else(|| clock.now());
    let service = TimelineService::new(config, InternalViewState::new(center), clock)?;
    Ok(service.render(projects)?)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn render_text(layout: &TimelineLayout) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let labels: Vec<&str> = layout.days.iter().map(|d| d.label.as_str()).collect();
    writeln!(out, "{}", layout.chrome.labels.title)?;
    writeln!(out, "days:  {}", labels.join(" | "))?;
    match layout.today_marker {
        Some(marker) => writeln!(out, "today: {} at {:.2}%", layout.today, marker.percent)?,
        None => writeln!(out, "today: {} (outside window)", layout.today)?,
    }
    for row in &layout.rows {
        let range = if row.range_visible {
            format!("{:.2}% +{:.2}%", row.left, row.width)
        } else {
            "hidden".to_string()
        };
        writeln!(
            out,
            "- {} [{}] range={} tone={:?}",
            row.name, row.id, range, row.theme.tone
        )?;
        for marker in &row.milestones {
            writeln!(
                out,
                "    * {} [{}] at {:.2}% tone={:?} glyph={:?}",
                marker.name, marker.id, marker.percent, marker.theme.tone, marker.glyph
            )?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{midnight, render_text};
    use chrono::NaiveDate;
    use roadmap_core::{build_layout, Milestone, Project, Status, TimelineConfig};

    #[test]
    fn text_output_lists_rows_and_markers() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 2, d).expect("valid day");
        let project = Project::new("p1", "Cloud Migration", day(10), day(14))
            .with_milestone(Milestone::new("m1", "DB Sync", day(13), Status::Success));
        let config = TimelineConfig::default().resolve().expect("config");
        let layout =
            build_layout(&[project], midnight(day(14)), day(14), &config).expect("layout");

        let text = render_text(&layout).expect("text output");
        assert!(text.starts_with("Team Roadmap"));
        assert!(text.contains("14 Sat"));
        assert!(text.contains("Cloud Migration [p1]"));
        assert!(text.contains("DB Sync [m1]"));
        assert!(text.contains("glyph=Trophy"));
    }

    #[test]
    fn text_output_marks_today_outside_window() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 2, d).expect("valid day");
        let config = TimelineConfig::default().resolve().expect("config");
        let layout = build_layout(&[], midnight(day(14)), day(25), &config).expect("layout");

        let text = render_text(&layout).expect("text output");
        assert!(text.contains("today: 2026-02-25 (outside window)"));
        assert_eq!(text.lines().count(), 3);
    }
}
