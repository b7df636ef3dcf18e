//! Window calculator.
//!
//! # Invariants
//! - A `ViewWindow` is never empty.
//! - Days are consecutive and strictly increasing.
//! - The center day sits at index `len / 2`.

use crate::config::{validate_window_days, ConfigError};
use crate::engine::{shift_day, CalendarDay, LayoutResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Ordered run of visible calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViewWindow {
    days: Vec<NaiveDate>,
}

impl ViewWindow {
    /// Wraps a pre-computed day sequence.
    ///
    /// # Errors
    /// - `EmptyWindow` when `days` is empty.
    /// - `WindowTooLarge` when `days` is longer than the widest window.
    /// - `NonConsecutiveDays` when any day is not exactly one day after
    ///   its predecessor.
    pub fn from_days(days: Vec<NaiveDate>) -> LayoutResult<Self> {
        if days.is_empty() {
            return Err(ConfigError::EmptyWindow.into());
        }
        validate_window_days(days.len() as i64)?;
        for pair in days.windows(2) {
            if pair[0].succ_opt() != Some(pair[1]) {
                return Err(ConfigError::NonConsecutiveDays {
                    previous: pair[0],
                    next: pair[1],
                }
                .into());
            }
        }
        Ok(Self { days })
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    /// Day at the center index (`len / 2`).
    pub fn center_day(&self) -> NaiveDate {
        self.days[self.days.len() / 2]
    }

    /// Midnight timestamp of the first visible day.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.first_day().and_time(NaiveTime::MIN)
    }

    /// Returns whether `date` falls on one of the visible days.
    pub fn contains<D: CalendarDay>(&self, date: D) -> bool {
        let day = date.calendar_day();
        day >= self.first_day() && day <= self.last_day()
    }
}

/// Computes the `window_days` consecutive days centered on `center`.
///
/// Day `i` is `center + (i - window_days / 2)` after normalizing `center` to
/// midnight.
///
/// # Errors
/// - `InvalidConfiguration(NonPositiveWindow)` when `window_days <= 0`.
/// - `InvalidConfiguration(WindowTooLarge)` above `MAX_WINDOW_DAYS`.
/// - `DateOutOfRange` when the window would leave the supported calendar.
pub fn compute_window<D: CalendarDay>(center: D, window_days: i64) -> LayoutResult<ViewWindow> {
    validate_window_days(window_days)?;

    let center = center.calendar_day();
    let center_offset = window_days / 2;
    let days = (0..window_days)
        .map(|i| shift_day(center, i - center_offset))
        .collect::<LayoutResult<Vec<_>>>()?;

    Ok(ViewWindow { days })
}
