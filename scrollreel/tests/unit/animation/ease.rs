use super::*;

fn all() -> Vec<Ease> {
    vec![
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::out_back(),
        Ease::out_elastic(1.0, 0.4),
        Ease::OutBounce,
    ]
}

#[test]
fn every_ease_hits_both_endpoints() {
    for ease in all() {
        assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
    }
}

#[test]
fn progress_outside_unit_interval_is_clamped() {
    for ease in all() {
        assert_eq!(ease.apply(-2.0), ease.apply(0.0));
        assert_eq!(ease.apply(3.0), ease.apply(1.0));
    }
}

#[test]
fn back_and_elastic_overshoot_mid_flight() {
    let back = Ease::OutBack { overshoot: 1.7 };
    assert!((0..100).any(|i| back.apply(f64::from(i) / 100.0) > 1.0));

    let elastic = Ease::out_elastic(1.0, 0.4);
    assert!((1..100).any(|i| elastic.apply(f64::from(i) / 100.0) > 1.0));
}

#[test]
fn in_out_variants_are_symmetric_at_half() {
    for ease in [
        Ease::InOutQuad,
        Ease::InOutCubic,
        Ease::InOutQuart,
        Ease::InOutSine,
    ] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-9, "{ease:?}");
    }
}

#[test]
fn elastic_with_zero_period_is_invalid() {
    assert!(!Ease::out_elastic(1.0, 0.0).is_valid());
    assert!(Ease::OutBounce.is_valid());
}
