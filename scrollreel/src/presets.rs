//! Built-in studio landing page.
//!
//! The layout is a fixed desktop measurement (1280 wide); section heights assume an 800 px
//! viewport. Reveal elements carry their visible end state as base style so a page without
//! motion reads correctly.

use crate::{
    animation::anim::Prop,
    animation::ease::Ease,
    animation::playback::{LoopMode, LoopSpec, TextCycleSpec, ToggleActions},
    animation::timeline::{Stagger, StaggerFrom, StaggerSpread, TimelineSpec, TweenSpec},
    effects::pointer::{CursorFollow, EyeFollow, Magnetic, Parallax, PointerEffect, Tilt},
    foundation::core::{LayoutBox, Length},
    host::document::{ElementAction, ElementSpec, Selector},
    overlay::manager::OverlaySpec,
    page::model::PageSpec,
    policy::MotionPolicy,
    section::model::SectionSpec,
    trigger::pin::PinSpec,
    trigger::registry::{Edge, EdgeAnchor, EndSpec, TriggerSpec},
};

const WIDTH: f64 = 1280.0;
const FAQ_ITEMS: usize = 5;

fn block(id: &str, y: f64, h: f64) -> ElementSpec {
    ElementSpec::new(id, LayoutBox::new(0.0, y, WIDTH, h))
}

fn item(id: &str, class: &str, x: f64, y: f64, w: f64, h: f64) -> ElementSpec {
    ElementSpec::new(id, LayoutBox::new(x, y, w, h)).class(class)
}

fn sel(class: &str) -> Selector {
    Selector::class(class)
}

fn edge(element: EdgeAnchor, viewport: EdgeAnchor) -> Edge {
    Edge::new(element, viewport)
}

fn trigger(start: Edge, end: Edge) -> TriggerSpec {
    TriggerSpec::new(start, EndSpec::Edge(end))
}

fn centered() -> TriggerSpec {
    use EdgeAnchor::{Bottom, Center, Top};
    trigger(edge(Top, Center), edge(Bottom, Center))
}

/// "top 80%" to "bottom 20%".
fn early() -> TriggerSpec {
    use EdgeAnchor::{Bottom, Fraction, Top};
    trigger(edge(Top, Fraction(0.8)), edge(Bottom, Fraction(0.2)))
}

fn spin(class: &str, turn: f64, period: f64) -> LoopSpec {
    LoopSpec {
        target: sel(class),
        prop: Prop::Rotation,
        from: 0.0,
        to: turn,
        period,
        mode: LoopMode::Repeat,
        ease: Ease::Linear,
    }
}

fn hero() -> (ElementSpec, SectionSpec) {
    let el = block("hero", 0.0, 900.0)
        .child(item("hero-blob-a", "hero-blobs", 80.0, 60.0, 420.0, 420.0))
        .child(item("hero-blob-b", "hero-blobs", 780.0, 300.0, 380.0, 380.0))
        .child(item("hero-heading", "hero-heading", 120.0, 180.0, 800.0, 160.0))
        .child(item("hero-word", "hero-word", 120.0, 350.0, 400.0, 60.0))
        .child(
            item("hero-cta-primary", "hero-ctas", 120.0, 460.0, 220.0, 64.0)
                .action(ElementAction::OpenModal),
        )
        .child(item("hero-magnet", "magnet", 620.0, 470.0, 96.0, 96.0))
        .child(
            item("hero-cta-secondary", "hero-ctas", 370.0, 460.0, 220.0, 64.0)
                .action(ElementAction::AdvanceSection),
        )
        .child(item("hero-devices", "hero-devices", 760.0, 420.0, 420.0, 360.0))
        .child(item("hero-float", "float-blob", 1040.0, 120.0, 120.0, 120.0));

    let timeline = TimelineSpec::new()
        .tween(
            TweenSpec::new(sel("hero-blobs"), 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .ease(Ease::OutQuad),
        )
        .tween(
            TweenSpec::new(sel("hero-heading"), 0.8)
                .from_to(Prop::Y, 40.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .after(-0.4),
        )
        .tween(
            TweenSpec::new(sel("hero-ctas"), 0.8)
                .from_to(Prop::Y, 30.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger::each(0.1))
                .after(-0.5),
        )
        .tween(
            TweenSpec::new(sel("hero-devices"), 1.2)
                .from_to(Prop::Y, -80.0, 0.0)
                .from_to(Prop::Rotation, -8.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .from_to(Prop::Scale, 0.85, 1.0)
                .ease(Ease::OutBack { overshoot: 1.7 }),
        );
    let mobile = TimelineSpec::new()
        .tween(
            TweenSpec::new(sel("hero-heading"), 0.6)
                .from_to(Prop::Y, 20.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0),
        )
        .tween(
            TweenSpec::new(sel("hero-ctas"), 0.6)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger::each(0.1))
                .after(-0.3),
        );

    let section = SectionSpec::new("hero")
        .trigger(centered())
        .timeline(timeline)
        .mobile_timeline(mobile)
        .effect(PointerEffect::Parallax(Parallax {
            target: sel("hero-blobs"),
            strength: 40.0,
            index_factor: 0.0,
            duration: 1.0,
        }))
        .effect(PointerEffect::Magnetic(Magnetic {
            target: sel("magnet"),
            pull: 0.18,
        }))
        .looping(LoopSpec {
            target: sel("float-blob"),
            prop: Prop::Y,
            from: 0.0,
            to: 20.0,
            period: 4.0,
            mode: LoopMode::PingPong,
            ease: Ease::InOutSine,
        })
        .looping(LoopSpec {
            target: sel("float-blob"),
            prop: Prop::Rotation,
            from: 0.0,
            to: 3.0,
            period: 4.0,
            mode: LoopMode::PingPong,
            ease: Ease::InOutSine,
        })
        .text_cycle(TextCycleSpec {
            words: ["build", "choreograph", "animate", "ship"]
                .map(String::from)
                .to_vec(),
            period: 2.6,
        });
    (el, section)
}

fn denerf() -> (ElementSpec, SectionSpec) {
    let rotations = [-3.0, 2.0, -2.0];
    let mut el = block("denerf", 900.0, 900.0).child(item(
        "pink-card",
        "pink-card",
        100.0,
        960.0,
        1080.0,
        760.0,
    ));
    for (i, rot) in rotations.iter().enumerate() {
        let x = 160.0 + i as f64 * 340.0;
        el = el.child(
            item(&format!("feature-card-{i}"), "feature-card", x, 1260.0, 300.0, 360.0)
                .style(Prop::Rotation, *rot)
                .child(item(
                    &format!("feature-icon-{i}"),
                    "feature-icon",
                    x + 110.0,
                    1300.0,
                    80.0,
                    80.0,
                )),
        );
    }
    let timeline = TimelineSpec::new()
        .tween(
            TweenSpec::new(sel("pink-card"), 1.0)
                .from_to(Prop::Y, 100.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .ease(Ease::OutQuad),
        )
        .tween(
            TweenSpec::new(sel("feature-card"), 0.8)
                .from_to(Prop::Y, 50.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .from_to_each(Prop::Rotation, 0.0, rotations.to_vec(), 0.0)
                .stagger(Stagger::each(0.15))
                .ease(Ease::OutBack { overshoot: 1.5 })
                .after(-0.5),
        )
        .tween(
            TweenSpec::new(sel("feature-icon"), 0.5)
                .from_to(Prop::Scale, 0.0, 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger::each(0.1))
                .ease(Ease::out_elastic(1.0, 0.5))
                .after(-0.3),
        );
    let section = SectionSpec::new("denerf")
        .trigger(early())
        .timeline(timeline);
    (el, section)
}

fn showreel() -> (ElementSpec, SectionSpec) {
    let mut el = block("showreel", 1800.0, 700.0);
    for i in 0..3 {
        el = el.child(item(
            &format!("reel-{i}"),
            "reel-card",
            80.0 + i as f64 * 420.0,
            1960.0,
            400.0,
            420.0,
        ));
    }
    let timeline = TimelineSpec::new().tween(
        TweenSpec::new(sel("reel-card"), 0.6)
            .from_to(Prop::Y, 40.0, 0.0)
            .from_to(Prop::Opacity, 0.0, 1.0)
            .stagger(Stagger::each(0.15)),
    );
    let section = SectionSpec::new("showreel")
        .trigger(centered())
        .entrance(ToggleActions::play_once())
        .timeline(timeline);
    (el, section)
}

fn lighter() -> (ElementSpec, SectionSpec) {
    let avatar_rest = [-10.0, 5.0, -5.0];
    let mut el = block("lighter", 2500.0, 800.0)
        .child(
            item("lighter-text", "lighter-text-container", 80.0, 2600.0, 520.0, 600.0)
                .child(item("lighter-headline", "lighter-headline", 80.0, 2640.0, 520.0, 180.0))
                .child(item("lighter-subcopy", "lighter-subcopy", 80.0, 2840.0, 520.0, 120.0)),
        )
        .child(
            item("lighter-image", "lighter-image", 680.0, 2580.0, 520.0, 640.0).child(item(
                "lighter-image-inner",
                "lighter-image-inner",
                680.0,
                2580.0,
                520.0,
                640.0,
            )),
        )
        .child(item("hiring-badge", "hiring-badge", 1080.0, 2560.0, 140.0, 140.0));
    for (i, rot) in avatar_rest.iter().enumerate() {
        el = el.child(
            item(
                &format!("avatar-{i}"),
                "team-avatar",
                720.0 + i as f64 * 150.0,
                3040.0,
                128.0,
                128.0,
            )
            .style(Prop::Rotation, *rot),
        );
    }
    let timeline = TimelineSpec::new()
        .tween(
            TweenSpec::new(sel("lighter-text-container"), 3.0)
                .from_to(Prop::Y, 0.0, -50.0)
                .ease(Ease::Linear)
                .at(0.0),
        )
        .tween(
            TweenSpec::new(sel("lighter-image"), 3.0)
                .from_to(Prop::Y, 0.0, 50.0)
                .ease(Ease::Linear)
                .at(0.0),
        )
        .tween(
            TweenSpec::new(sel("lighter-headline"), 1.0)
                .from_to(Prop::X, -120.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .from_to(Prop::RotationY, -15.0, 0.0)
                .ease(Ease::OutCubic)
                .at(0.2),
        )
        .tween(
            TweenSpec::new(sel("lighter-subcopy"), 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .from_to(Prop::Y, 30.0, 0.0)
                .ease(Ease::OutQuad)
                .at(0.5),
        )
        .tween(
            TweenSpec::new(sel("lighter-image-inner"), 1.5)
                .from_to(Prop::Scale, 1.3, 1.0)
                .from_to(Prop::Blur, 15.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .ease(Ease::Linear)
                .at(0.0),
        )
        .tween(
            TweenSpec::new(sel("team-avatar"), 0.8)
                .from_to(Prop::Scale, 0.0, 1.0)
                .from_to_each(Prop::Rotation, -30.0, avatar_rest.to_vec(), 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger::each(0.2))
                .ease(Ease::out_elastic(1.0, 0.5))
                .at(1.0),
        )
        .tween(
            TweenSpec::new(sel("hiring-badge"), 0.8)
                .from_to(Prop::X, 50.0, 0.0)
                .from_to(Prop::Y, -30.0, 0.0)
                .from_to(Prop::Rotation, -10.0, 0.0)
                .from_to(Prop::Scale, 0.0, 1.0)
                .ease(Ease::OutBack { overshoot: 2.0 })
                .at(1.5),
        )
        .pause(0.5);
    let section = SectionSpec::new("lighter")
        .trigger(
            TriggerSpec::new(
                edge(EdgeAnchor::Top, EdgeAnchor::Top),
                EndSpec::Distance(Length::ViewportHeights(1.5)),
            )
            .pinned(PinSpec::default()),
        )
        .scrub(Some(1.0))
        .timeline(timeline)
        .effect(PointerEffect::Parallax(Parallax {
            target: sel("team-avatar"),
            strength: 10.0,
            index_factor: 1.0,
            duration: 1.0,
        }));
    (el, section)
}

fn whois() -> (ElementSpec, SectionSpec) {
    let mut card = item("who-card", "who-card", 140.0, 3380.0, 1000.0, 640.0)
        .child(item("who-headline", "who-headline", 200.0, 3440.0, 880.0, 120.0));
    for i in 0..3 {
        card = card.child(item(
            &format!("who-pill-{i}"),
            "who-pill",
            200.0,
            3600.0 + i as f64 * 80.0,
            700.0,
            60.0,
        ));
    }
    card = card.child(
        item("who-cta", "who-cta", 200.0, 3880.0, 240.0, 64.0).action(ElementAction::OpenModal),
    );
    let el = block("whois", 3300.0, 800.0).child(card);
    let timeline = TimelineSpec::new()
        .tween(
            TweenSpec::new(sel("who-card"), 0.8)
                .from_to(Prop::Scale, 0.8, 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .ease(Ease::OutBack { overshoot: 1.2 }),
        )
        .tween(
            TweenSpec::new(sel("who-headline"), 0.8)
                .from_to(Prop::Y, -50.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .ease(Ease::OutBounce),
        )
        .tween(
            TweenSpec::new(sel("who-pill"), 0.6)
                .from_to(Prop::X, -50.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger::each(0.2))
                .ease(Ease::OutQuad),
        )
        .tween(
            TweenSpec::new(sel("who-cta"), 0.5)
                .from_to(Prop::Y, 20.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .after(-0.2),
        );
    let section = SectionSpec::new("whois")
        .trigger(centered())
        .timeline(timeline);
    (el, section)
}

fn blob() -> (ElementSpec, SectionSpec) {
    let mut body = item("blob-body", "blob-body", 440.0, 4260.0, 400.0, 400.0)
        .child(item("blob-mouth", "blob-mouth", 580.0, 4520.0, 120.0, 30.0));
    for (i, x) in [540.0, 680.0].iter().enumerate() {
        body = body.child(
            item(&format!("eye-{i}"), "eye", *x, 4380.0, 60.0, 60.0).child(item(
                &format!("pupil-{i}"),
                "pupil",
                x + 20.0,
                4400.0,
                20.0,
                20.0,
            )),
        );
    }
    let mut orbit = item("tech-orbit", "tech-orbit", 340.0, 4160.0, 600.0, 600.0);
    for i in 0..4 {
        orbit = orbit.child(item(
            &format!("tech-icon-{i}"),
            "tech-icon",
            340.0 + i as f64 * 180.0,
            4160.0,
            64.0,
            64.0,
        ));
    }
    let el = block("blob", 4100.0, 800.0).child(orbit).child(body);
    let timeline = TimelineSpec::new()
        .tween(
            TweenSpec::new(sel("blob-body"), 1.0)
                .from_to(Prop::Scale, 0.0, 1.0)
                .ease(Ease::OutBack { overshoot: 1.2 }),
        )
        .tween(
            TweenSpec::new(sel("eye"), 0.5)
                .from_to(Prop::Scale, 0.0, 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger::each(0.2)),
        )
        .tween(
            TweenSpec::new(sel("blob-mouth"), 0.5)
                .from_to(Prop::ScaleX, 0.0, 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0),
        )
        .tween(
            TweenSpec::new(sel("tech-icon"), 0.5)
                .from_to(Prop::Scale, 0.0, 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger::each(0.1))
                .ease(Ease::OutBack { overshoot: 2.0 }),
        );
    let section = SectionSpec::new("blob")
        .trigger(centered())
        .timeline(timeline)
        .effect(PointerEffect::EyeFollow(EyeFollow {
            target: sel("pupil"),
            max_offset: 3.0,
            falloff: 10.0,
        }))
        .looping(spin("tech-orbit", 360.0, 20.0))
        .looping(spin("tech-icon", -360.0, 20.0));
    (el, section)
}

fn toolbelt() -> (ElementSpec, SectionSpec) {
    let mut orbit = item("tool-orbit", "tool-orbit", 340.0, 5000.0, 600.0, 600.0);
    for i in 0..6 {
        orbit = orbit.child(
            item(
                &format!("tool-icon-{i}"),
                "tool-icon",
                340.0 + i as f64 * 100.0,
                5000.0 + (i % 2) as f64 * 500.0,
                80.0,
                80.0,
            )
            .child(item(
                &format!("tool-icon-inner-{i}"),
                "tool-icon-inner",
                350.0 + i as f64 * 100.0,
                5010.0 + (i % 2) as f64 * 500.0,
                60.0,
                60.0,
            )),
        );
    }
    let el = block("toolbelt", 4900.0, 800.0)
        .child(item("tool-heading", "tool-heading", 140.0, 4940.0, 1000.0, 100.0))
        .child(orbit);
    let timeline = TimelineSpec::new()
        .tween(
            TweenSpec::new(sel("tool-heading"), 1.0)
                .from_to(Prop::Y, 50.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .ease(Ease::OutQuad),
        )
        .tween(
            TweenSpec::new(sel("tool-icon"), 0.8)
                .from_to(Prop::Scale, 0.0, 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger {
                    spread: StaggerSpread::Amount(0.5),
                    from: StaggerFrom::Random { seed: 7 },
                })
                .ease(Ease::OutBack { overshoot: 1.5 })
                .after(-0.5),
        );
    let section = SectionSpec::new("toolbelt")
        .trigger(centered())
        .timeline(timeline)
        .looping(spin("tool-orbit", 360.0, 30.0))
        .looping(spin("tool-icon-inner", -360.0, 30.0));
    (el, section)
}

fn trust() -> (ElementSpec, SectionSpec) {
    let mut el = block("trust", 5700.0, 800.0)
        .child(item("trust-headline", "trust-headline", 140.0, 5760.0, 1000.0, 100.0))
        .child(
            item("progress-bar", "progress-bar", 140.0, 5900.0, 1000.0, 24.0).child(
                item("progress-fill", "progress-bar-fill", 140.0, 5900.0, 1000.0, 24.0)
                    .style(Prop::WidthPct, 100.0),
            ),
        )
        .child(
            item("pay-later-card", "pay-later-card", 140.0, 6100.0, 480.0, 300.0)
                .style(Prop::Rotation, 2.0),
        );
    for i in 0..3 {
        el = el.child(item(
            &format!("trust-badge-{i}"),
            "trust-badge",
            700.0 + i as f64 * 160.0,
            6100.0,
            140.0,
            140.0,
        ));
    }
    let timeline = TimelineSpec::new()
        .tween(
            TweenSpec::new(sel("progress-bar-fill"), 1.5)
                .from_to(Prop::WidthPct, 0.0, 100.0)
                .ease(Ease::InOutQuad),
        )
        .tween(
            TweenSpec::new(sel("trust-badge"), 0.5)
                .from_to(Prop::Scale, 0.0, 1.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .stagger(Stagger::each(0.3))
                .ease(Ease::OutBack { overshoot: 2.0 })
                .after(-0.5),
        )
        .tween(
            TweenSpec::new(sel("pay-later-card"), 0.8)
                .from_to(Prop::X, -50.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .ease(Ease::OutQuad)
                .after(-0.3),
        )
        .tween(
            TweenSpec::new(sel("trust-headline"), 0.8)
                .from_to(Prop::Y, -30.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0)
                .ease(Ease::OutBounce),
        );
    let section = SectionSpec::new("trust")
        .trigger(centered())
        .timeline(timeline)
        .effect(PointerEffect::Tilt(Tilt {
            target: sel("pay-later-card"),
            max_deg: 15.0,
            hover_scale: 1.05,
            rest_rotation: 2.0,
        }));
    (el, section)
}

fn faq() -> (ElementSpec, SectionSpec) {
    let mut el = block("faq", 6500.0, 700.0);
    for i in 0..FAQ_ITEMS {
        el = el.child(
            item(
                &format!("faq-item-{i}"),
                "faq-item",
                240.0,
                6600.0 + i as f64 * 100.0,
                800.0,
                80.0,
            )
            .action(ElementAction::ToggleAccordion(i)),
        );
    }
    let timeline = TimelineSpec::new().tween(
        TweenSpec::new(sel("faq-item"), 0.5)
            .from_to(Prop::Y, 20.0, 0.0)
            .from_to(Prop::Opacity, 0.0, 1.0)
            .stagger(Stagger::each(0.1)),
    );
    let section = SectionSpec::new("faq")
        .trigger(early())
        .timeline(timeline);
    (el, section)
}

fn contact() -> (ElementSpec, SectionSpec) {
    let mut el = block("contact", 7200.0, 700.0);
    for i in 0..3 {
        el = el.child(item(
            &format!("contact-card-{i}"),
            "contact-card",
            80.0 + i as f64 * 380.0,
            7300.0,
            360.0,
            320.0,
        ));
    }
    el = el.child(
        item("contact-cta", "contact-cta", 440.0, 7700.0, 400.0, 64.0)
            .action(ElementAction::OpenModal),
    );
    let timeline = TimelineSpec::new().tween(
        TweenSpec::new(sel("contact-card"), 0.6)
            .from_to(Prop::Y, 40.0, 0.0)
            .from_to(Prop::Opacity, 0.0, 1.0)
            .stagger(Stagger::each(0.15)),
    );
    let section = SectionSpec::new("contact")
        .trigger(centered())
        .timeline(timeline);
    (el, section)
}

fn footer() -> (ElementSpec, SectionSpec) {
    let el = block("footer", 7900.0, 400.0)
        .child(item("footer-logo", "footer-reveal", 80.0, 7960.0, 300.0, 80.0))
        .child(item("footer-links", "footer-reveal", 80.0, 8080.0, 600.0, 120.0));
    let timeline = TimelineSpec::new().tween(
        TweenSpec::new(sel("footer-reveal"), 0.6)
            .from_to(Prop::Opacity, 0.0, 1.0)
            .stagger(Stagger::each(0.2)),
    );
    let section = SectionSpec::new("footer")
        .trigger(trigger(
            edge(EdgeAnchor::Top, EdgeAnchor::Bottom),
            edge(EdgeAnchor::Bottom, EdgeAnchor::Bottom),
        ))
        .entrance(ToggleActions::play_once())
        .timeline(timeline);
    (el, section)
}

fn cursor() -> (ElementSpec, SectionSpec) {
    let el = item("cursor", "cursor", 0.0, 0.0, 48.0, 48.0)
        .child(item("cursor-dot", "cursor-dot", 0.0, 0.0, 12.0, 12.0))
        .child(item("cursor-ring", "cursor-ring", 0.0, 0.0, 48.0, 48.0));
    let section = SectionSpec::new("cursor").effect(PointerEffect::CursorFollow(CursorFollow {
        dot: sel("cursor-dot"),
        ring: sel("cursor-ring"),
        dot_lag: 0.1,
        ring_lag: 0.6,
    }));
    (el, section)
}

fn chrome() -> Vec<ElementSpec> {
    vec![
        item("next-button", "next-button", 1180.0, 0.0, 64.0, 64.0)
            .action(ElementAction::AdvanceSection),
        item("bar-toggle", "bar-toggle", 0.0, 0.0, 64.0, 48.0).action(ElementAction::ToggleBar),
        item("modal-backdrop", "modal-backdrop", 0.0, 0.0, WIDTH, 800.0)
            .style(Prop::Opacity, 0.0)
            .child(
                item("modal", "modal", 340.0, 160.0, 600.0, 480.0)
                    .style(Prop::Scale, 0.8)
                    .style(Prop::Opacity, 0.0)
                    .style(Prop::Y, 20.0)
                    .child(
                        item("modal-close", "modal-close", 880.0, 180.0, 40.0, 40.0)
                            .action(ElementAction::CloseModal),
                    ),
            ),
    ]
}

/// The studio landing page: hero through footer, plus cursor, floating bar and contact modal.
pub fn studio_page() -> PageSpec {
    let parts = [
        hero(),
        denerf(),
        showreel(),
        lighter(),
        whois(),
        blob(),
        toolbelt(),
        trust(),
        faq(),
        contact(),
        footer(),
        cursor(),
    ];
    let mut document = ElementSpec::new("page", LayoutBox::new(0.0, 0.0, WIDTH, 8300.0));
    let mut sections = Vec::with_capacity(parts.len());
    for (el, section) in parts {
        document = document.child(el);
        sections.push(section);
    }
    for el in chrome() {
        document = document.child(el);
    }
    let nav = sections
        .iter()
        .map(|s| s.id.clone())
        .filter(|id| id != "cursor")
        .collect();
    PageSpec {
        document,
        height: Some(8300.0),
        sections,
        nav: Some(nav),
        policy: MotionPolicy::default(),
        overlay: OverlaySpec {
            backdrop: Some(sel("modal-backdrop")),
            dialog: Some(sel("modal")),
        },
        faq_items: FAQ_ITEMS,
    }
}

#[cfg(test)]
#[path = "../tests/unit/presets/presets.rs"]
mod tests;
