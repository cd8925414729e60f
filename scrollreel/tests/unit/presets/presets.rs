use super::*;
use crate::foundation::core::Viewport;
use crate::page::engine::{Engine, EngineOpts};
use crate::policy::Environment;
use crate::trigger::pin::PinPhase;

fn engine(env: Environment) -> Engine {
    Engine::new(studio_page(), env, EngineOpts::default()).unwrap()
}

#[test]
fn studio_page_validates_and_survives_json() {
    let page = studio_page();
    page.validate().unwrap();
    assert_eq!(page.sections.len(), 12);
    let nav = page.nav_order();
    assert_eq!(nav.first(), Some(&"hero"));
    assert!(!nav.contains(&"cursor"));

    let back = PageSpec::from_json_str(&page.to_json_pretty().unwrap()).unwrap();
    let ids = |p: &PageSpec| p.sections.iter().map(|s| s.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&back), ids(&page));
    assert_eq!(back.nav, page.nav);
}

#[test]
fn lighter_pins_for_one_and_a_half_viewports() {
    let mut e = engine(Environment::default());
    assert_eq!(e.snapshot().scroll_height, 8300.0 + 1200.0);

    e.scroll(2500.0 + 600.0).unwrap();
    let snap = e.snapshot();
    let lighter = snap.sections.iter().find(|s| s.id == "lighter").unwrap();
    let pin = lighter.pin.unwrap();
    assert_eq!(pin.phase, PinPhase::Pinned);
    assert_eq!(pin.viewport_top, 0.0);
    assert_eq!(pin.translate_y, 600.0);
}

#[test]
fn reduced_motion_studio_has_no_pins_or_transform_listeners() {
    let e = engine(Environment {
        reduced_motion: true,
        ..Environment::default()
    });
    let snap = e.snapshot();
    assert_eq!(snap.scroll_height, 8300.0);
    assert_eq!(snap.registrations.transform_listeners, 0);
}

#[test]
fn hero_word_rotates_on_its_period() {
    let mut e = engine(Environment::default());
    let word = |e: &Engine| {
        e.snapshot()
            .sections
            .iter()
            .find(|s| s.id == "hero")
            .and_then(|s| s.word.clone())
    };
    assert_eq!(word(&e).as_deref(), Some("build"));
    e.tick(2.7).unwrap();
    assert_eq!(word(&e).as_deref(), Some("choreograph"));
}

#[test]
fn mobile_viewport_uses_mobile_class() {
    let e = engine(Environment {
        viewport: Viewport::new(390.0, 844.0).unwrap(),
        ..Environment::default()
    });
    assert!(e.snapshot().overlay.bar.quick_bar_visible);
}
