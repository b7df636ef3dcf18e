use chrono::{NaiveDate, NaiveDateTime};
use roadmap_core::{
    CenterDateStore, ControlledViewState, FixedClock, InternalViewState, TimelineConfig,
    TimelineService,
};
use std::cell::RefCell;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn uncontrolled_forward_moves_exactly_one_day() {
    let mut service = TimelineService::new(
        TimelineConfig::default(),
        InternalViewState::new(at(2026, 2, 14)),
        FixedClock(at(2026, 2, 14)),
    )
    .unwrap();
    let config_before = service.config().clone();

    let requested = service.shift_forward().unwrap();

    assert_eq!(requested, at(2026, 2, 15));
    assert_eq!(service.center_date(), at(2026, 2, 15));
    assert_eq!(service.config(), &config_before);
}

#[test]
fn controlled_forward_invokes_callback_without_mutation() {
    let requests = RefCell::new(Vec::new());
    let mut service = TimelineService::new(
        TimelineConfig::default(),
        ControlledViewState::new(at(2026, 2, 14), |date| requests.borrow_mut().push(date)),
        FixedClock(at(2026, 2, 14)),
    )
    .unwrap();

    service.shift_forward().unwrap();
    service.shift_backward().unwrap();
    service.jump_to_today();

    assert_eq!(service.center_date(), at(2026, 2, 14));
    drop(service);
    assert_eq!(
        requests.into_inner(),
        vec![at(2026, 2, 15), at(2026, 2, 13), at(2026, 2, 14)]
    );
}

#[test]
fn controlled_host_drives_the_rendered_window() {
    let requests = RefCell::new(Vec::new());
    let mut service = TimelineService::new(
        TimelineConfig::default(),
        ControlledViewState::new(at(2026, 2, 14), |date| requests.borrow_mut().push(date)),
        FixedClock(at(2026, 2, 14)),
    )
    .unwrap();

    service.shift_forward().unwrap();
    let before_sync = service.render(&[]).unwrap();
    assert_eq!(before_sync.window.center_day(), at(2026, 2, 14).date());

    let requested = *requests.borrow().last().unwrap();
    service.store_mut().sync_view_date(requested);
    let after_sync = service.render(&[]).unwrap();
    assert_eq!(after_sync.window.center_day(), at(2026, 2, 15).date());
}

#[test]
fn explicit_date_replaces_center() {
    let mut store = InternalViewState::new(at(2026, 2, 14));
    store.set_center_date(at(2026, 7, 4));
    assert_eq!(store.center_date(), at(2026, 7, 4));
}
