//! Timeline layout engine.
//!
//! # Responsibility
//! - Derive the visible day window from a center date (`window`).
//! - Map calendar days to clamped horizontal percentages (`position`).
//! - Resolve status themes from explicit status and date rules (`status`).
//! - Compose all of the above into one frame of geometry (`layout`).
//!
//! # Invariants
//! - Every function here is pure; "today" is always an explicit argument.
//! - Only configuration contract violations surface as errors.

use crate::config::ConfigError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod layout;
pub mod position;
pub mod status;
pub mod window;

pub type LayoutResult<T> = Result<T, LayoutError>;

/// Error raised by layout computations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    InvalidConfiguration(ConfigError),
    /// Window arithmetic left chrono's representable date range.
    DateOutOfRange { day: NaiveDate, offset_days: i64 },
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration(err) => write!(f, "invalid configuration: {err}"),
            Self::DateOutOfRange {
                day,
                offset_days,
            } => write!(
                f,
                "day {day} shifted by {offset_days} days is outside the supported calendar"
            ),
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfiguration(err) => Some(err),
            Self::DateOutOfRange { .. } => None,
        }
    }
}

impl From<ConfigError> for LayoutError {
    fn from(value: ConfigError) -> Self {
        Self::InvalidConfiguration(value)
    }
}

/// Anything that can be normalized to a calendar day (midnight).
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Shifts `day` by `offset_days`, reporting calendar overflow instead of panicking.
pub(crate) fn shift_day(day: NaiveDate, offset_days: i64) -> LayoutResult<NaiveDate> {
    let shifted = if offset_days >= 0 {
        day.checked_add_days(chrono::Days::new(offset_days.unsigned_abs()))
    } else {
        day.checked_sub_days(chrono::Days::new(offset_days.unsigned_abs()))
    };
    shifted.ok_or(LayoutError::DateOutOfRange {
        day,
        offset_days,
    })
}
