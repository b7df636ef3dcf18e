//! Timeline use-case service.
//!
//! # Responsibility
//! - Bind one config, one center-date store and one clock for a host.
//! - Run full render passes and the navigation actions against them.
//!
//! # Invariants
//! - Configuration is validated at construction; a service never holds an
//!   invalid config.
//! - "Today" is read from the clock exactly once per render pass.

use crate::config::{ConfigError, TimelineConfig};
use crate::engine::layout::{build_layout, TimelineLayout};
use crate::engine::LayoutResult;
use crate::model::project::Project;
use crate::service::navigation::{
    jump_to_today, shift_center, CenterDateStore, Clock, ControlledViewState, InternalViewState,
    SystemClock,
};
use chrono::NaiveDateTime;
use log::debug;

/// Use-case service wrapper for timeline rendering and navigation.
pub struct TimelineService<S: CenterDateStore, C: Clock> {
    config: TimelineConfig,
    store: S,
    clock: C,
}

impl TimelineService<InternalViewState, SystemClock> {
    /// Self-managed center date starting at the current local time.
    pub fn uncontrolled(config: TimelineConfig) -> Result<Self, ConfigError> {
        let store = InternalViewState::starting_now(&SystemClock);
        Self::new(config, store, SystemClock)
    }
}

impl<F> TimelineService<ControlledViewState<F>, SystemClock>
where
    F: FnMut(NaiveDateTime),
{
    /// Host-owned center date; navigation invokes `on_change`.
    pub fn controlled(
        config: TimelineConfig,
        view_date: NaiveDateTime,
        on_change: F,
    ) -> Result<Self, ConfigError> {
        Self::new(
            config,
            ControlledViewState::new(view_date, on_change),
            SystemClock,
        )
    }
}

impl<S: CenterDateStore, C: Clock> TimelineService<S, C> {
    /// Creates a service, rejecting invalid configuration up front.
    pub fn new(config: TimelineConfig, store: S, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            clock,
        })
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access, e.g. to sync a controlled view date.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn center_date(&self) -> NaiveDateTime {
        self.store.center_date()
    }

    /// Computes one full frame for `projects`.
    ///
    /// # Contract
    /// - Reads the clock once; every element is judged against that day.
    /// - Recomputes everything; nothing is cached between passes.
    pub fn render(&self, projects: &[Project]) -> LayoutResult<TimelineLayout> {
        let today = self.clock.now();
        let resolved = self.config.resolve()?;
        build_layout(projects, self.store.center_date(), today, &resolved)
    }

    /// Moves the window one day back.
    pub fn shift_backward(&mut self) -> LayoutResult<NaiveDateTime> {
        self.shift(-1)
    }

    /// Moves the window one day forward.
    pub fn shift_forward(&mut self) -> LayoutResult<NaiveDateTime> {
        self.shift(1)
    }

    /// Moves the window by `days`.
    pub fn shift(&mut self, days: i64) -> LayoutResult<NaiveDateTime> {
        let next = shift_center(&mut self.store, days)?;
        debug!(
            "event=view_shift module=service status=ok days={} requested_center={}",
            days, next
        );
        Ok(next)
    }

    /// Re-centers the window on the clock's current instant.
    pub fn jump_to_today(&mut self) -> NaiveDateTime {
        let now = jump_to_today(&mut self.store, &self.clock);
        debug!(
            "event=view_today module=service status=ok requested_center={}",
            now
        );
        now
    }

    /// Requests an arbitrary center date (e.g. from a date picker).
    pub fn set_center_date(&mut self, date: NaiveDateTime) {
        self.store.set_center_date(date);
    }
}
