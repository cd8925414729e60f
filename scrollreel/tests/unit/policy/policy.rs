use super::*;

fn env(width: f64, reduced: bool, fine: bool) -> Environment {
    Environment {
        viewport: Viewport::new(width, 800.0).unwrap(),
        reduced_motion: reduced,
        fine_pointer: fine,
        hover: fine,
    }
}

#[test]
fn full_motion_on_desktop_with_mouse() {
    let p = MotionPolicy::default().profile(&env(1280.0, false, true));
    assert_eq!(p.class, ViewportClass::Desktop);
    assert!(p.scrub && p.pin && p.pointer && p.loops);
    assert!(!p.reduced);
}

#[test]
fn reduced_motion_disables_everything_that_moves() {
    let p = MotionPolicy::default().profile(&env(1280.0, true, true));
    assert!(p.reduced);
    assert!(!p.scrub && !p.pin && !p.pointer && !p.loops);
}

#[test]
fn coarse_pointer_keeps_scroll_motion() {
    let p = MotionPolicy::default().profile(&env(375.0, false, false));
    assert_eq!(p.class, ViewportClass::Mobile);
    assert!(p.scrub && p.pin);
    assert!(!p.pointer);
}

#[test]
fn breakpoint_is_exclusive() {
    let policy = MotionPolicy::default();
    assert_eq!(
        policy.classify(Viewport::new(767.0, 800.0).unwrap()),
        ViewportClass::Mobile
    );
    assert_eq!(
        policy.classify(Viewport::new(768.0, 800.0).unwrap()),
        ViewportClass::Desktop
    );
}
