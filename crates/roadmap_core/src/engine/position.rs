//! Position mapper: calendar days to horizontal percentages.
//!
//! # Invariants
//! - Results are finite and clamped to `[MIN_PERCENT, MAX_PERCENT]`.
//! - Dates are normalized to their calendar day before subtraction.
//! - Range widths are never negative.

use crate::config::ConfigError;
use crate::engine::{CalendarDay, LayoutResult};
use chrono::NaiveDate;
use serde::Serialize;

/// Lower overflow bound, so markers just left of the window stay partially visible.
pub const MIN_PERCENT: f64 = -10.0;
/// Upper overflow bound.
pub const MAX_PERCENT: f64 = 110.0;

/// Where inside its day column a date is anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayAnchor {
    /// Left edge of the column; used for range starts and the today line.
    Start,
    /// Column center; used for milestone markers.
    Center,
    /// Right edge; used for range ends.
    End,
    /// Arbitrary fraction, clamped to `[0, 1]`.
    Fraction(f64),
}

impl DayAnchor {
    pub fn fraction(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
            Self::Fraction(value) if value.is_nan() => 0.0,
            Self::Fraction(value) => value.clamp(0.0, 1.0),
        }
    }
}

/// Horizontal extent of a range bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeSpan {
    pub left: f64,
    pub width: f64,
}

impl RangeSpan {
    /// Zero-width ranges are not drawn.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }
}

/// Maps `date` to a percentage of the window width.
///
/// `percent = ((day_index + offset_fraction) / window_len) * 100`, clamped to
/// `[-10, 110]`.
///
/// # Errors
/// - `InvalidConfiguration(EmptyWindow)` when `window` is empty.
pub fn percent_for_date<D: CalendarDay>(
    date: D,
    window: &[NaiveDate],
    anchor: DayAnchor,
) -> LayoutResult<f64> {
    let window_start = *window.first().ok_or(ConfigError::EmptyWindow)?;
    let day_index = (date.calendar_day() - window_start).num_days() as f64;
    let percent = ((day_index + anchor.fraction()) / window.len() as f64) * 100.0;
    Ok(clamp_percent(percent))
}

/// Width from the start of `start`'s column to the end of `end`'s column.
///
/// Reversed or fully clamped ranges collapse to `0.0` instead of inverting.
pub fn range_width<S: CalendarDay, E: CalendarDay>(
    start: S,
    end: E,
    window: &[NaiveDate],
) -> LayoutResult<f64> {
    Ok(range_span(start, end, window)?.width)
}

/// Left edge and width of a start/end range.
pub fn range_span<S: CalendarDay, E: CalendarDay>(
    start: S,
    end: E,
    window: &[NaiveDate],
) -> LayoutResult<RangeSpan> {
    let left = percent_for_date(start, window, DayAnchor::Start)?;
    let right = percent_for_date(end, window, DayAnchor::End)?;
    Ok(RangeSpan {
        left,
        width: (right - left).max(0.0),
    })
}

fn clamp_percent(percent: f64) -> f64 {
    // Day differences are bounded by chrono's calendar, so `percent` is finite.
    percent.clamp(MIN_PERCENT, MAX_PERCENT)
}
