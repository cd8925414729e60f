use super::*;
use crate::animation::anim::Prop;
use crate::animation::ease::Ease;
use crate::animation::playback::{LoopSpec, TextCycleSpec};
use crate::animation::timeline::{TimelineSpec, TweenSpec};
use crate::effects::pointer::{Magnetic, Parallax, PointerEffect};
use crate::foundation::core::LayoutBox;
use crate::host::document::{ElementSpec, Selector};
use crate::policy::{Environment, MotionPolicy};
use crate::trigger::pin::PinSpec;
use crate::trigger::registry::TriggerSpec;

struct Harness {
    doc: Document,
    bus: EventBus,
    triggers: TriggerRegistry,
    profile: MotionProfile,
}

impl Harness {
    fn new(reduced: bool) -> Self {
        let root = ElementSpec::new("page", LayoutBox::new(0.0, 0.0, 1280.0, 4000.0))
            .child(ElementSpec::new("intro", LayoutBox::new(0.0, 0.0, 1280.0, 800.0)))
            .child(
                ElementSpec::new("stage", LayoutBox::new(0.0, 800.0, 1280.0, 800.0))
                    .child(
                        ElementSpec::new("title", LayoutBox::new(0.0, 900.0, 600.0, 80.0))
                            .class("title"),
                    )
                    .child(
                        ElementSpec::new("blob", LayoutBox::new(0.0, 1000.0, 100.0, 100.0))
                            .class("blob"),
                    ),
            );
        let env = Environment {
            reduced_motion: reduced,
            ..Environment::default()
        };
        Self {
            doc: Document::from_spec(&root, None).unwrap(),
            bus: EventBus::new(),
            triggers: TriggerRegistry::new(),
            profile: MotionPolicy::default().profile(&env),
        }
    }

    fn mount(&mut self, c: &mut SectionController) {
        c.mount(MountCtx {
            doc: &self.doc,
            bus: &self.bus,
            triggers: &self.triggers,
            profile: self.profile,
            now: 0.0,
        })
        .unwrap();
        self.triggers.refresh(&mut self.doc, Viewport::default());
    }
}

fn fade_up() -> TimelineSpec {
    TimelineSpec::new().tween(
        TweenSpec::new(Selector::class("title"), 1.0)
            .from_to(Prop::Y, 40.0, 0.0)
            .from_to(Prop::Opacity, 0.0, 1.0)
            .ease(Ease::Linear),
    )
}

fn entrance_section() -> SectionSpec {
    SectionSpec::new("stage")
        .trigger(TriggerSpec::new(
            "top center".parse().unwrap(),
            "bottom center".parse().unwrap(),
        ))
        .timeline(fade_up())
        .effect(PointerEffect::Parallax(Parallax {
            target: Selector::class("blob"),
            strength: 40.0,
            index_factor: 0.0,
            duration: 1.0,
        }))
}

fn pinned_section() -> SectionSpec {
    SectionSpec::new("stage")
        .trigger(
            TriggerSpec::new("top top".parse().unwrap(), "+=150%".parse().unwrap())
                .pinned(PinSpec::default()),
        )
        .scrub(None)
        .timeline(fade_up())
}

#[test]
fn entrance_plays_on_enter_and_reverses_on_leave_back() {
    let mut h = Harness::new(false);
    let mut c = SectionController::new(entrance_section(), OwnerId(1));
    h.mount(&mut c);
    let title = h.doc.element("title").unwrap();

    c.on_scroll(&h.triggers, 0.0);
    c.render(&mut h.doc);
    assert_eq!(h.doc.computed(title, Prop::Opacity), 0.0);

    // region starts at 800 - 400
    c.on_scroll(&h.triggers, 500.0);
    c.tick(0.5);
    c.render(&mut h.doc);
    assert_eq!(h.doc.computed(title, Prop::Opacity), 0.5);

    c.on_scroll(&h.triggers, 100.0);
    c.tick(0.25);
    c.render(&mut h.doc);
    assert_eq!(h.doc.computed(title, Prop::Opacity), 0.25);
}

#[test]
fn scrubbed_pin_tracks_scroll_exactly() {
    let mut h = Harness::new(false);
    let mut c = SectionController::new(pinned_section(), OwnerId(1));
    h.mount(&mut c);
    let title = h.doc.element("title").unwrap();

    c.on_scroll(&h.triggers, 800.0 + 600.0);
    c.render(&mut h.doc);
    assert_eq!(h.doc.computed(title, Prop::Opacity), 0.5);
    assert!(c.is_pinned());

    c.on_scroll(&h.triggers, 800.0 + 1200.0);
    c.render(&mut h.doc);
    let status = c.status();
    assert_eq!(status.progress, 1.0);
    assert_eq!(status.pin.unwrap().viewport_top, 0.0);
    assert_eq!(h.doc.scroll_height(), 4000.0 + 1200.0);
}

#[test]
fn pinned_targets_are_hit_tested_where_they_are_drawn() {
    let mut h = Harness::new(false);
    let mut c = SectionController::new(
        pinned_section().effect(PointerEffect::Magnetic(Magnetic {
            target: Selector::class("blob"),
            pull: 0.5,
        })),
        OwnerId(1),
    );
    h.mount(&mut c);
    let blob = h.doc.element("blob").unwrap();

    // pinned 600px in: the blob (layout 1000..1100) is drawn at viewport 200..300
    c.on_scroll(&h.triggers, 1400.0);
    assert_eq!(c.status().pin.unwrap().translate_y, 600.0);
    c.on_pointer_move(&h.doc, Point::new(80.0, 290.0), Viewport::default(), 1400.0);
    c.tick(1.0);
    c.render(&mut h.doc);
    assert_eq!(h.doc.computed(blob, Prop::X), 15.0);
    assert_eq!(h.doc.computed(blob, Prop::Y), 20.0);

    // the unpinned layout position (viewport -400..-300) is not a hit
    c.on_pointer_move(&h.doc, Point::new(80.0, 700.0), Viewport::default(), 1400.0);
    c.tick(1.0);
    c.render(&mut h.doc);
    assert_eq!(h.doc.computed(blob, Prop::X), 0.0);
}

#[test]
fn unmount_mid_flight_leaves_nothing_behind() {
    let mut h = Harness::new(false);
    let mut c = SectionController::new(
        entrance_section().text_cycle(TextCycleSpec {
            words: vec!["build".into(), "ship".into()],
            period: 2.6,
        }),
        OwnerId(3),
    );
    h.mount(&mut c);
    let title = h.doc.element("title").unwrap();
    assert!(h.bus.active_listeners() > 0);
    assert_eq!(h.bus.timers_for(OwnerId(3)), 1);

    c.on_scroll(&h.triggers, 500.0);
    c.on_pointer_move(&h.doc, Point::new(10.0, 10.0), Viewport::default(), 500.0);
    c.tick(0.3);
    c.render(&mut h.doc);
    assert!(c.is_animating());
    assert!(h.doc.written_by(OwnerId(3)) > 0);

    let reverted = c.unmount(&mut h.doc);
    assert!(reverted > 0);
    assert_eq!(h.bus.active_listeners(), 0);
    assert_eq!(h.bus.active_timers(), 0);
    assert!(h.triggers.is_empty());
    assert_eq!(h.doc.written_by(OwnerId(3)), 0);
    assert_eq!(h.doc.computed(title, Prop::Opacity), 1.0);
    assert!(!c.is_animating());
}

#[test]
fn reduced_motion_registers_no_transform_listeners_or_pins() {
    let mut h = Harness::new(true);
    let mut c = SectionController::new(
        pinned_section()
            .effect(PointerEffect::Parallax(Parallax {
                target: Selector::class("blob"),
                strength: 40.0,
                index_factor: 0.0,
                duration: 1.0,
            }))
            .looping(LoopSpec {
                target: Selector::class("blob"),
                prop: Prop::Rotation,
                from: 0.0,
                to: 360.0,
                period: 20.0,
                mode: Default::default(),
                ease: Ease::Linear,
            }),
        OwnerId(1),
    );
    h.mount(&mut c);
    assert_eq!(
        h.bus.count_listeners(|l| l.purpose == Purpose::Transform),
        0
    );
    assert_eq!(h.doc.scroll_height(), 4000.0);

    let title = h.doc.element("title").unwrap();
    let blob = h.doc.element("blob").unwrap();
    c.on_scroll(&h.triggers, 1000.0);
    c.tick(2.0);
    c.render(&mut h.doc);
    assert_eq!(h.doc.computed(title, Prop::Opacity), 1.0);
    assert_eq!(h.doc.inline(title, Prop::Y), None);
    assert_eq!(h.doc.inline(blob, Prop::Rotation), None);
    assert!(!c.is_pinned());
}

#[test]
fn profile_without_scrub_plays_scrubbed_sections_as_entrances() {
    let mut h = Harness::new(false);
    h.profile.scrub = false;
    let mut c = SectionController::new(pinned_section(), OwnerId(1));
    h.mount(&mut c);
    let title = h.doc.element("title").unwrap();
    assert_eq!(h.doc.scroll_height(), 4000.0);

    c.on_scroll(&h.triggers, 800.0 + 600.0);
    assert!(!c.is_pinned());
    c.tick(0.5);
    c.render(&mut h.doc);
    assert_eq!(h.doc.computed(title, Prop::Opacity), 0.5);
    assert_eq!(h.doc.computed(title, Prop::Y), 20.0);
}

#[test]
fn missing_root_mounts_inert() {
    let mut h = Harness::new(false);
    let mut c = SectionController::new(
        SectionSpec::new("ghost").timeline(fade_up()),
        OwnerId(1),
    );
    h.mount(&mut c);
    assert!(!c.is_mounted());
    assert_eq!(h.bus.active_listeners(), 0);
    c.on_scroll(&h.triggers, 100.0);
    c.render(&mut h.doc);
    assert_eq!(h.doc.inline_styles().count(), 0);
}

#[test]
fn text_cycle_advances_on_its_timer() {
    let mut h = Harness::new(false);
    let mut c = SectionController::new(
        SectionSpec::new("intro").text_cycle(TextCycleSpec {
            words: vec!["build".into(), "ship".into()],
            period: 2.6,
        }),
        OwnerId(2),
    );
    h.mount(&mut c);
    assert_eq!(c.status().word.as_deref(), Some("build"));
    for (id, owner) in h.bus.due_timers(2.6) {
        assert_eq!(owner, OwnerId(2));
        assert!(c.on_timer(id));
    }
    assert_eq!(c.status().word.as_deref(), Some("ship"));
}
