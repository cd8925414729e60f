use super::*;

#[test]
fn scroll_span_progress_clamps() {
    let s = ScrollSpan::new(100.0, 300.0).unwrap();
    assert_eq!(s.progress(0.0), 0.0);
    assert_eq!(s.progress(200.0), 0.5);
    assert_eq!(s.progress(900.0), 1.0);
    assert!(s.contains(100.0));
    assert!(s.contains(300.0));
    assert!(!s.contains(300.5));
}

#[test]
fn degenerate_span_is_a_step() {
    let s = ScrollSpan::new(50.0, 50.0).unwrap();
    assert!(s.is_degenerate());
    assert_eq!(s.progress(49.9), 0.0);
    assert_eq!(s.progress(50.0), 1.0);
    assert_eq!(s.progress(51.0), 1.0);
}

#[test]
fn inverted_span_is_rejected() {
    assert!(ScrollSpan::new(10.0, 5.0).is_err());
    assert!(ScrollSpan::new(f64::NAN, 5.0).is_err());
}

#[test]
fn length_resolves_against_viewport() {
    let vp = Viewport::new(1000.0, 800.0).unwrap();
    assert_eq!(Length::ViewportHeights(1.5).resolve(vp), 1200.0);
    assert_eq!(Length::Px(42.0).resolve(vp), 42.0);
}

#[test]
fn viewport_rejects_zero() {
    assert!(Viewport::new(0.0, 800.0).is_err());
    assert!(Viewport::new(800.0, f64::INFINITY).is_err());
}

#[test]
fn layout_box_viewport_rect_subtracts_scroll() {
    let b = LayoutBox::new(10.0, 500.0, 100.0, 50.0);
    let r = b.to_viewport_rect(200.0);
    assert_eq!(r.y0, 300.0);
    assert_eq!(r.y1, 350.0);
    assert_eq!(r.x0, 10.0);
    assert!(LayoutBox::new(0.0, 0.0, 10.0, 0.0).is_collapsed());
}
