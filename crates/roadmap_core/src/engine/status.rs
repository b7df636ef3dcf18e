//! Status resolver: ordered theme rules over status and dates.
//!
//! # Responsibility
//! - Decide the tone of a project range or milestone marker.
//! - Turn a tone into concrete color/background tokens from a palette.
//!
//! # Invariants
//! - Rules are evaluated top to bottom; the first match wins.
//! - Explicit terminal statuses always beat date-based rules.
//! - The result depends only on (status, dates, today, policy).

use crate::config::{LateMilestonePolicy, Palette};
use crate::model::project::{Glyph, Milestone, Project, Status};
use chrono::NaiveDate;
use serde::Serialize;

/// Resolved visual tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Danger,
    Muted,
    Primary,
}

/// Dates a themed entity is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Project-style span with inclusive bounds.
    Range { start: NaiveDate, end: NaiveDate },
    /// Milestone-style single target day.
    Due(NaiveDate),
}

/// Capability shared by everything the resolver can theme.
pub trait Themed {
    fn status(&self) -> Status;
    fn schedule(&self) -> Schedule;
}

impl Themed for Project {
    fn status(&self) -> Status {
        self.status
    }

    fn schedule(&self) -> Schedule {
        Schedule::Range {
            start: self.start,
            end: self.end,
        }
    }
}

impl Themed for Milestone {
    fn status(&self) -> Status {
        self.status
    }

    fn schedule(&self) -> Schedule {
        Schedule::Due(self.end_date)
    }
}

/// One entry of the ordered theme rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeRule {
    /// `completed` or `success` status.
    Done,
    /// `cancelled` status.
    Cancelled,
    /// Open range whose start is still ahead of today.
    NotStarted,
    /// Open range whose end is behind today.
    Overdue,
    /// Open milestone past its day, subject to `LateMilestonePolicy`.
    LateMilestone,
}

/// Evaluation order. Changing it changes precedence.
pub const THEME_RULES: [ThemeRule; 5] = [
    ThemeRule::Done,
    ThemeRule::Cancelled,
    ThemeRule::NotStarted,
    ThemeRule::Overdue,
    ThemeRule::LateMilestone,
];

impl ThemeRule {
    /// Returns the tone this rule assigns, or `None` when it does not fire.
    pub fn apply(
        self,
        status: Status,
        schedule: Schedule,
        today: NaiveDate,
        policy: LateMilestonePolicy,
    ) -> Option<Tone> {
        match (self, schedule) {
            (Self::Done, _) if status.is_done() => Some(Tone::Success),
            (Self::Cancelled, _) if status == Status::Cancelled => Some(Tone::Danger),
            (Self::NotStarted, Schedule::Range { start, .. })
                if status.is_open() && today < start =>
            {
                Some(Tone::Muted)
            }
            (Self::Overdue, Schedule::Range { end, .. }) if status.is_open() && today > end => {
                Some(Tone::Danger)
            }
            (Self::LateMilestone, Schedule::Due(due))
                if today > due && is_late_eligible(status, policy) =>
            {
                Some(Tone::Danger)
            }
            _ => None,
        }
    }
}

fn is_late_eligible(status: Status, policy: LateMilestonePolicy) -> bool {
    match policy {
        LateMilestonePolicy::InProgressOnly => status == Status::InProgress,
        LateMilestonePolicy::AnyOpen => status.is_open(),
    }
}

/// Outcome of running the rule list, with the rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub tone: Tone,
    /// `None` means no rule fired and the primary fallback applied.
    pub rule: Option<ThemeRule>,
}

/// Runs the ordered rule list for `entity` as of `today`.
pub fn resolve_tone<T: Themed + ?Sized>(
    entity: &T,
    today: NaiveDate,
    policy: LateMilestonePolicy,
) -> Resolution {
    let status = entity.status();
    let schedule = entity.schedule();
    THEME_RULES
        .iter()
        .find_map(|rule| {
            rule.apply(status, schedule, today, policy)
                .map(|tone| Resolution {
                    tone,
                    rule: Some(*rule),
                })
        })
        .unwrap_or(Resolution {
            tone: Tone::Primary,
            rule: None,
        })
}

/// Concrete color tokens for one rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub tone: Tone,
    pub color: String,
    /// Tone color with a translucent alpha channel (`#rrggbbaa`).
    pub background: String,
}

impl Theme {
    pub fn from_tone(tone: Tone, palette: &Palette) -> Self {
        let (color, alpha) = match tone {
            Tone::Success => (&palette.success, "20"),
            Tone::Danger => (&palette.danger, "20"),
            Tone::Muted => (&palette.muted, "20"),
            Tone::Primary => (&palette.primary, "15"),
        };
        Self {
            tone,
            color: color.clone(),
            background: with_alpha(color, alpha),
        }
    }
}

/// Resolves `entity` straight to palette tokens.
pub fn resolve_theme<T: Themed + ?Sized>(
    entity: &T,
    today: NaiveDate,
    policy: LateMilestonePolicy,
    palette: &Palette,
) -> Theme {
    Theme::from_tone(resolve_tone(entity, today, policy).tone, palette)
}

/// Glyph for a milestone marker, consistent with its resolved tone.
pub fn milestone_glyph(milestone: &Milestone, tone: Tone) -> Glyph {
    if let Some(icon) = milestone.icon {
        return icon;
    }
    match milestone.status {
        status if status.is_done() => Glyph::Trophy,
        Status::Cancelled => Glyph::Cancelled,
        _ if tone == Tone::Danger => Glyph::Alert,
        _ => Glyph::Clock,
    }
}

/// Glyphs drawn at the start and end of a project range.
pub fn range_glyphs(project: &Project) -> (Glyph, Glyph) {
    (
        project.start_icon.unwrap_or(Glyph::Rocket),
        project.end_icon.unwrap_or(Glyph::Flag),
    )
}

// Short `#rgb` tokens are widened first so the alpha suffix stays well-formed.
fn with_alpha(color: &str, alpha: &str) -> String {
    let hex = color.trim_start_matches('#');
    if hex.len() == 3 {
        let widened: String = hex.chars().flat_map(|c| [c, c]).collect();
        format!("#{widened}{alpha}")
    } else {
        format!("#{hex}{alpha}")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        milestone_glyph, range_glyphs, resolve_tone, with_alpha, Theme, ThemeRule, Tone,
    };
    use crate::config::{LateMilestonePolicy, Palette};
    use crate::model::project::{Glyph, Milestone, Project, Status};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn project(status: Status) -> Project {
        Project::new("p", "Project", day(2026, 2, 10), day(2026, 2, 17)).with_status(status)
    }

    #[test]
    fn project_tone_follows_dates_when_open() {
        let policy = LateMilestonePolicy::default();
        let open = project(Status::Pending);
        assert_eq!(resolve_tone(&open, day(2026, 2, 9), policy).tone, Tone::Muted);
        assert_eq!(resolve_tone(&open, day(2026, 2, 10), policy).tone, Tone::Primary);
        assert_eq!(resolve_tone(&open, day(2026, 2, 17), policy).tone, Tone::Primary);
        let overdue = resolve_tone(&open, day(2026, 2, 18), policy);
        assert_eq!(overdue.tone, Tone::Danger);
        assert_eq!(overdue.rule, Some(ThemeRule::Overdue));
    }

    #[test]
    fn explicit_status_beats_dates() {
        let policy = LateMilestonePolicy::AnyOpen;
        let late_day = day(2027, 1, 1);
        let done = resolve_tone(&project(Status::Success), late_day, policy);
        assert_eq!(done.tone, Tone::Success);
        assert_eq!(done.rule, Some(ThemeRule::Done));
        assert_eq!(
            resolve_tone(&project(Status::Completed), day(2020, 1, 1), policy).tone,
            Tone::Success
        );
        assert_eq!(
            resolve_tone(&project(Status::Cancelled), day(2020, 1, 1), policy).tone,
            Tone::Danger
        );
    }

    #[test]
    fn late_pending_milestone_depends_on_policy() {
        let milestone = Milestone::new("m", "Beta", day(2026, 2, 13), Status::Pending);
        let today = day(2026, 2, 14);

        let strict = resolve_tone(&milestone, today, LateMilestonePolicy::InProgressOnly);
        assert_eq!(strict.tone, Tone::Primary);
        assert_eq!(strict.rule, None);

        let loose = resolve_tone(&milestone, today, LateMilestonePolicy::AnyOpen);
        assert_eq!(loose.tone, Tone::Danger);
        assert_eq!(loose.rule, Some(ThemeRule::LateMilestone));
    }

    #[test]
    fn late_in_progress_milestone_is_danger_under_both_policies() {
        let milestone = Milestone::new("m", "Beta", day(2026, 2, 13), Status::InProgress);
        for policy in [LateMilestonePolicy::InProgressOnly, LateMilestonePolicy::AnyOpen] {
            assert_eq!(resolve_tone(&milestone, day(2026, 2, 14), policy).tone, Tone::Danger);
            assert_eq!(resolve_tone(&milestone, day(2026, 2, 13), policy).tone, Tone::Primary);
        }
    }

    #[test]
    fn future_milestone_is_never_muted() {
        let milestone = Milestone::new("m", "Later", day(2026, 3, 1), Status::Pending);
        let policy = LateMilestonePolicy::AnyOpen;
        assert_eq!(resolve_tone(&milestone, day(2026, 2, 14), policy).tone, Tone::Primary);
    }

    #[test]
    fn theme_tokens_carry_alpha_background() {
        let palette = Palette::default();
        let primary = Theme::from_tone(Tone::Primary, &palette);
        assert_eq!(primary.color, "#3b82f6");
        assert_eq!(primary.background, "#3b82f615");

        let danger = Theme::from_tone(Tone::Danger, &palette);
        assert_eq!(danger.background, "#ef444420");
    }

    #[test]
    fn short_hex_is_widened_before_alpha() {
        assert_eq!(with_alpha("#abc", "20"), "#aabbcc20");
        assert_eq!(with_alpha("#aabbcc", "15"), "#aabbcc15");
    }

    #[test]
    fn milestone_glyph_prefers_override_then_status() {
        let mut milestone = Milestone::new("m", "Ship", day(2026, 2, 13), Status::Success);
        assert_eq!(milestone_glyph(&milestone, Tone::Success), Glyph::Trophy);

        milestone.status = Status::Cancelled;
        assert_eq!(milestone_glyph(&milestone, Tone::Danger), Glyph::Cancelled);

        milestone.status = Status::InProgress;
        assert_eq!(milestone_glyph(&milestone, Tone::Danger), Glyph::Alert);
        assert_eq!(milestone_glyph(&milestone, Tone::Primary), Glyph::Clock);

        milestone.icon = Some(Glyph::Calendar);
        assert_eq!(milestone_glyph(&milestone, Tone::Danger), Glyph::Calendar);
    }

    #[test]
    fn range_glyphs_default_to_rocket_and_flag() {
        let mut p = project(Status::Pending);
        assert_eq!(range_glyphs(&p), (Glyph::Rocket, Glyph::Flag));
        p.end_icon = Some(Glyph::Trophy);
        assert_eq!(range_glyphs(&p), (Glyph::Rocket, Glyph::Trophy));
    }
}
