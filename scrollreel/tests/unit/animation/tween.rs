use super::*;

#[test]
fn tween_reaches_target_after_duration() {
    let mut t = Tween::at_rest(0.0);
    t.retarget(10.0, 1.0, Ease::Linear);
    assert_eq!(t.tick(0.5), 5.0);
    assert_eq!(t.tick(0.75), 10.0);
    assert!(t.is_settled());
}

#[test]
fn retarget_mid_flight_starts_from_current_value() {
    let mut t = Tween::at_rest(0.0);
    t.retarget(100.0, 1.0, Ease::Linear);
    t.tick(0.4);
    assert_eq!(t.value(), 40.0);

    t.retarget(0.0, 1.0, Ease::Linear);
    // first sample after retarget continues from 40, never jumps back to 100 or 0
    let v = t.tick(0.1);
    assert!((v - 36.0).abs() < 1e-9);
}

#[test]
fn zero_duration_snaps() {
    let mut t = Tween::at_rest(1.0);
    t.retarget(3.0, 0.0, Ease::OutQuad);
    assert_eq!(t.value(), 3.0);
    assert!(t.is_settled());
}

#[test]
fn set_last_write_wins_per_slot() {
    let mut set = TweenSet::new();
    let el = ElementId(4);
    set.to(el, Prop::X, 0.0, 20.0, 1.0, Ease::Linear);
    set.tick(0.5);
    set.to(el, Prop::X, 999.0, -20.0, 1.0, Ease::Linear);
    // the `current` hint is ignored for an existing slot
    assert_eq!(set.value(el, Prop::X), Some(10.0));
    assert_eq!(set.in_flight(), 1);
    set.tick(2.0);
    assert_eq!(set.value(el, Prop::X), Some(-20.0));
    assert_eq!(set.in_flight(), 0);

    let mut out = Vec::new();
    set.writes(&mut out);
    assert_eq!(out.len(), 1);
    set.clear();
    assert!(set.is_empty());
}
