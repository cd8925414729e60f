use super::*;

fn scroll_listener(owner: u32) -> Listener {
    Listener {
        owner: OwnerId(owner),
        kind: EventKind::Scroll,
        scope: ListenerScope::Window,
        purpose: Purpose::Trigger,
    }
}

#[test]
fn dropping_subscription_deregisters() {
    let bus = EventBus::new();
    let a = bus.listen(scroll_listener(1));
    let b = bus.listen(scroll_listener(2));
    assert_eq!(bus.active_listeners(), 2);
    drop(a);
    assert_eq!(bus.active_listeners(), 1);
    assert_eq!(bus.listeners(EventKind::Scroll)[0].owner, OwnerId(2));
    drop(b);
    assert_eq!(bus.active_listeners(), 0);
}

#[test]
fn guards_outliving_the_bus_are_inert() {
    let bus = EventBus::new();
    let sub = bus.listen(scroll_listener(1));
    drop(bus);
    drop(sub);
}

#[test]
fn one_shot_timer_fires_once() {
    let bus = EventBus::new();
    let t = bus.timeout(OwnerId(3), 0.1);
    assert!(bus.due_timers(0.05).is_empty());
    let fired = bus.due_timers(0.1);
    assert_eq!(fired, vec![(t.id(), OwnerId(3))]);
    assert!(bus.due_timers(5.0).is_empty());
    assert_eq!(bus.active_timers(), 0);
}

#[test]
fn interval_coalesces_missed_periods() {
    let bus = EventBus::new();
    let t = bus.interval(OwnerId(1), 0.0, 1.0);
    assert_eq!(bus.due_timers(0.5).len(), 0);
    assert_eq!(bus.due_timers(3.2), vec![(t.id(), OwnerId(1))]);
    // rescheduled to 4.0, the first period boundary after 3.2
    assert!(bus.due_timers(3.9).is_empty());
    assert_eq!(bus.due_timers(4.0).len(), 1);
    assert_eq!(bus.timers_for(OwnerId(1)), 1);
    drop(t);
    assert_eq!(bus.active_timers(), 0);
    assert!(bus.due_timers(10.0).is_empty());
}

#[test]
fn tiny_interval_periods_are_raised_to_the_minimum() {
    let bus = EventBus::new();
    let _t = bus.interval(OwnerId(1), 0.0, 1e-300);
    assert_eq!(bus.due_timers(1_000.0).len(), 1);
    assert!(bus.due_timers(1_000.0).is_empty());
    assert_eq!(bus.due_timers(1_001.0).len(), 1);
}

#[test]
fn count_listeners_filters_by_purpose() {
    let bus = EventBus::new();
    let _a = bus.listen(scroll_listener(1));
    let _b = bus.listen(Listener {
        owner: OwnerId(1),
        kind: EventKind::PointerMove,
        scope: ListenerScope::Window,
        purpose: Purpose::Transform,
    });
    assert_eq!(bus.count_listeners(|l| l.purpose == Purpose::Transform), 1);
    assert_eq!(bus.count_listeners(|l| l.owner == OwnerId(1)), 2);
}
