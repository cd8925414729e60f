use std::cell::Cell;
use std::rc::Rc;

use super::*;

#[test]
fn subscribers_see_changes_only() {
    let state = Observable::new(false);
    let view = state.read_only();
    let seen = Rc::new(Cell::new(0));
    let seen2 = Rc::clone(&seen);
    let _w = view.subscribe(move |v| {
        if *v {
            seen2.set(seen2.get() + 1);
        }
    });

    assert!(state.set(true));
    assert!(!state.set(true));
    assert_eq!(seen.get(), 1);
    assert!(view.get());
}

#[test]
fn dropping_watch_unsubscribes() {
    let state = Observable::new(0u32);
    let view = state.read_only();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let w = view.subscribe(move |_| h.set(h.get() + 1));
    assert_eq!(view.subscriber_count(), 1);
    state.set(1);
    drop(w);
    assert_eq!(view.subscriber_count(), 0);
    state.set(2);
    assert_eq!(hits.get(), 1);
}

#[test]
fn subscriber_can_read_during_notification() {
    let state = Observable::new(1u32);
    let view = state.read_only();
    let inner_view = view.clone();
    let last = Rc::new(Cell::new(0));
    let l = Rc::clone(&last);
    let _w = view.subscribe(move |_| l.set(inner_view.get()));
    state.set(7);
    assert_eq!(last.get(), 7);
}

#[test]
fn mapped_view_tracks_source() {
    let state = Observable::new(3u32);
    let (doubled, watch) = state.read_only().map(|v| v * 2);
    assert_eq!(doubled.get(), 6);
    state.set(5);
    assert_eq!(doubled.get(), 10);

    drop(watch);
    state.set(9);
    assert_eq!(doubled.get(), 10);
}

#[test]
fn watch_dropped_by_another_subscriber_stays_dropped() {
    use std::cell::RefCell;

    let state = Observable::new(0u32);
    let view = state.read_only();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let victim: Rc<RefCell<Option<Watch<u32>>>> = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&victim);
    let _killer = view.subscribe(move |_| {
        slot.borrow_mut().take();
    });
    *victim.borrow_mut() = Some(view.subscribe(move |_| h.set(h.get() + 1)));

    state.set(1);
    assert_eq!(view.subscriber_count(), 1);
    state.set(2);
    assert_eq!(hits.get(), 1);
}
