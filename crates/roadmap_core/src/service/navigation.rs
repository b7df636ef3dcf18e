//! Center-date ownership and navigation actions.
//!
//! # Responsibility
//! - Model who owns the center date: the engine (uncontrolled) or the host
//!   (controlled, notified through a callback).
//! - Provide the three navigation actions on top of one `set_center_date`
//!   capability.
//!
//! # Invariants
//! - Controlled stores never mutate their own center date on navigation;
//!   only the host may push a new value through `sync_view_date`.
//! - Uncontrolled stores change only through navigation.

use crate::engine::{LayoutError, LayoutResult};
use chrono::{Days, Local, NaiveDateTime};

/// Source of "now" for one render pass or navigation action.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Ownership policy for the center date.
pub trait CenterDateStore {
    /// Center date the next render pass uses.
    fn center_date(&self) -> NaiveDateTime;

    /// Requests a new center date.
    fn set_center_date(&mut self, date: NaiveDateTime);
}

impl<S: CenterDateStore + ?Sized> CenterDateStore for Box<S> {
    fn center_date(&self) -> NaiveDateTime {
        (**self).center_date()
    }

    fn set_center_date(&mut self, date: NaiveDateTime) {
        (**self).set_center_date(date)
    }
}

/// Engine-owned center date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalViewState {
    center: NaiveDateTime,
}

impl InternalViewState {
    pub fn new(center: NaiveDateTime) -> Self {
        Self { center }
    }

    /// Starts centered on the clock's current instant.
    pub fn starting_now<C: Clock>(clock: &C) -> Self {
        Self::new(clock.now())
    }
}

impl CenterDateStore for InternalViewState {
    fn center_date(&self) -> NaiveDateTime {
        self.center
    }

    fn set_center_date(&mut self, date: NaiveDateTime) {
        self.center = date;
    }
}

/// Host-owned center date; navigation only notifies the host.
pub struct ControlledViewState<F>
where
    F: FnMut(NaiveDateTime),
{
    view_date: NaiveDateTime,
    on_change: F,
}

impl<F> ControlledViewState<F>
where
    F: FnMut(NaiveDateTime),
{
    pub fn new(view_date: NaiveDateTime, on_change: F) -> Self {
        Self {
            view_date,
            on_change,
        }
    }

    /// Applies the host's current view date before the next render.
    pub fn sync_view_date(&mut self, view_date: NaiveDateTime) {
        self.view_date = view_date;
    }
}

impl<F> CenterDateStore for ControlledViewState<F>
where
    F: FnMut(NaiveDateTime),
{
    fn center_date(&self) -> NaiveDateTime {
        self.view_date
    }

    fn set_center_date(&mut self, date: NaiveDateTime) {
        (self.on_change)(date);
    }
}

/// Moves the center date by `days` (negative moves backward).
///
/// Returns the requested center date.
pub fn shift_center<S: CenterDateStore + ?Sized>(
    store: &mut S,
    days: i64,
) -> LayoutResult<NaiveDateTime> {
    let current = store.center_date();
    let next = if days >= 0 {
        current.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        current.checked_sub_days(Days::new(days.unsigned_abs()))
    }
    .ok_or(LayoutError::DateOutOfRange {
        day: current.date(),
        offset_days: days,
    })?;

    store.set_center_date(next);
    Ok(next)
}

/// Re-centers on the clock's current instant.
pub fn jump_to_today<S: CenterDateStore + ?Sized, C: Clock + ?Sized>(
    store: &mut S,
    clock: &C,
) -> NaiveDateTime {
    let now = clock.now();
    store.set_center_date(now);
    now
}
