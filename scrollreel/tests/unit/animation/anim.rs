use super::*;

#[test]
fn lerp_endpoints() {
    assert_eq!(<f64 as Lerp>::lerp(&2.0, &6.0, 0.0), 2.0);
    assert_eq!(<f64 as Lerp>::lerp(&2.0, &6.0, 1.0), 6.0);
    assert_eq!(<f64 as Lerp>::lerp(&2.0, &6.0, 0.25), 3.0);
}

#[test]
fn neutral_values_match_identity_transform() {
    assert_eq!(Prop::X.neutral(), 0.0);
    assert_eq!(Prop::Scale.neutral(), 1.0);
    assert_eq!(Prop::Opacity.neutral(), 1.0);
    assert!(Prop::RotationY.is_transform());
    assert!(!Prop::Opacity.is_transform());
}

#[test]
fn sanitize_clamps_opacity_and_blur() {
    assert_eq!(Prop::Opacity.sanitize(1.2), 1.0);
    assert_eq!(Prop::Opacity.sanitize(-0.1), 0.0);
    assert_eq!(Prop::Blur.sanitize(-3.0), 0.0);
    assert_eq!(Prop::Scale.sanitize(1.2), 1.2);
}

#[test]
fn per_index_falls_back_past_the_end() {
    let v = TweenValue::PerIndex {
        values: vec![-10.0, 5.0, -5.0],
        fallback: 0.0,
    };
    assert_eq!(v.at(1), 5.0);
    assert_eq!(v.at(3), 0.0);
}

#[test]
fn tween_value_deserializes_number_or_object() {
    let c: TweenValue = serde_json::from_str("1.5").unwrap();
    assert_eq!(c, TweenValue::Const(1.5));
    let p: TweenValue = serde_json::from_str(r#"{"values":[1.0,2.0]}"#).unwrap();
    assert_eq!(p.at(1), 2.0);
    assert_eq!(p.at(9), 0.0);
}
