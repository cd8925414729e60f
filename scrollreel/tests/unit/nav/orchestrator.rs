use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn sections() -> Vec<SectionBounds> {
    vec![
        SectionBounds::new("s1", 0.0, 800.0),
        SectionBounds::new("s2", 800.0, 1200.0),
        SectionBounds::new("s3", 2000.0, 600.0),
    ]
}

#[test]
fn midpoint_selects_current_section() {
    let s = sections();
    assert_eq!(current_index(&s, 0.0, 800.0), Some(0));
    assert_eq!(current_index(&s, 900.0, 800.0), Some(1));
    assert_eq!(current_index(&s, 1700.0, 800.0), Some(2));
}

#[test]
fn gap_falls_back_to_last_passed_section() {
    let s = vec![
        SectionBounds::new("a", 0.0, 500.0),
        SectionBounds::new("b", 1000.0, 500.0),
    ];
    assert_eq!(current_index(&s, 400.0, 800.0), Some(0));
    assert_eq!(current_index(&s, 2000.0, 800.0), Some(1));
}

#[test]
fn advance_lands_inside_next_section() {
    let s = sections();
    let target = advance_target(&s, 900.0, 800.0, 3000.0);
    assert_eq!(target, 2000.0);
    assert!(target >= s[2].top && target < s[2].top + s[2].height);
}

#[test]
fn advance_is_clamped_to_max_scroll() {
    let s = sections();
    assert_eq!(advance_target(&s, 900.0, 800.0, 2400.0), 1600.0);
    // on the last section the target is the document end
    assert_eq!(advance_target(&s, 1900.0, 800.0, 3000.0), 2200.0);
}

#[test]
fn end_of_document_uses_slack() {
    assert!(is_at_end(2190.0, 800.0, 3000.0, 10.0));
    assert!(!is_at_end(2000.0, 800.0, 3000.0, 10.0));
}

#[test]
fn scrolling_flag_clears_after_idle_timeout() {
    let bus = EventBus::new();
    let mut nav = NavigationOrchestrator::new(OwnerId(0), NavOpts::default());
    let scrolling = nav.is_scrolling();
    let flips = Rc::new(Cell::new(0));
    let f = Rc::clone(&flips);
    let _w = scrolling.subscribe(move |_| f.set(f.get() + 1));

    nav.on_scroll(&bus, 0.0, 100.0, 800.0, 3000.0, true);
    nav.on_scroll(&bus, 0.1, 120.0, 800.0, 3000.0, true);
    assert!(scrolling.get());
    // the first timeout was replaced, so only one is pending
    assert_eq!(bus.active_timers(), 1);
    assert!(bus.due_timers(0.2).is_empty());

    for (id, _) in bus.due_timers(0.3) {
        assert!(nav.on_timer(id));
    }
    assert!(!scrolling.get());
    assert_eq!(flips.get(), 2);
}

#[test]
fn at_end_is_observable() {
    let bus = EventBus::new();
    let mut nav = NavigationOrchestrator::new(OwnerId(0), NavOpts::default());
    let at_end = nav.at_end();
    nav.on_scroll(&bus, 0.0, 2190.0, 800.0, 3000.0, true);
    assert!(at_end.get());
    nav.on_scroll(&bus, 0.1, 2000.0, 800.0, 3000.0, true);
    assert!(!at_end.get());
}

#[test]
fn smooth_advance_reaches_target_and_user_scroll_cancels() {
    let bus = EventBus::new();
    let mut nav = NavigationOrchestrator::new(OwnerId(0), NavOpts::default());
    let target = nav.advance(&sections(), 900.0, 800.0, 3000.0);
    let mid = nav.tick(0.4).unwrap();
    assert!(mid > 900.0 && mid < target);
    assert_eq!(nav.tick(1.0), Some(target));
    assert!(!nav.is_advancing());

    nav.advance(&sections(), 0.0, 800.0, 3000.0);
    nav.on_scroll(&bus, 0.0, 10.0, 800.0, 3000.0, true);
    assert!(!nav.is_advancing());
    assert_eq!(nav.tick(0.1), None);
}
