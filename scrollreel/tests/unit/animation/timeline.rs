use super::*;
use crate::foundation::core::LayoutBox;
use crate::host::document::ElementSpec;

fn doc() -> Document {
    let mut section = ElementSpec::new("sec", LayoutBox::new(0.0, 0.0, 1000.0, 800.0))
        .child(ElementSpec::new("title", LayoutBox::new(0.0, 100.0, 500.0, 80.0)).class("title"));
    for i in 0..4 {
        section = section.child(
            ElementSpec::new(
                format!("card{i}"),
                LayoutBox::new(0.0, 200.0 + 50.0 * i as f64, 100.0, 40.0),
            )
            .class("card")
            .style(Prop::Opacity, 0.5),
        );
    }
    Document::from_spec(&section, None).unwrap()
}

fn value_of(out: &[StyleWrite], el: ElementId, prop: Prop) -> f64 {
    out.iter()
        .find(|w| w.element == el && w.prop == prop)
        .map(|w| w.value)
        .unwrap()
}

#[test]
fn schedule_resolves_anchors_in_declaration_order() {
    let slots = resolve_schedule(&[
        (Anchor::PreviousEnd(0.0), 1.0),
        (Anchor::PreviousEnd(-0.5), 1.0),
        (Anchor::PreviousStart(0.2), 0.5),
        (Anchor::At(3.0), 0.0),
    ])
    .unwrap();
    assert_eq!(slots[0], StepSlot { start: 0.0, end: 1.0 });
    assert_eq!(slots[1], StepSlot { start: 0.5, end: 1.5 });
    assert_eq!(slots[2], StepSlot { start: 0.7, end: 1.2 });
    assert_eq!(slots[3], StepSlot { start: 3.0, end: 3.0 });
}

#[test]
fn negative_start_is_rejected() {
    let err = resolve_schedule(&[(Anchor::PreviousEnd(-0.5), 1.0)]).unwrap_err();
    assert!(err.to_string().contains("negative start"));
}

#[test]
fn scrub_sample_is_a_pure_function_of_progress() {
    let d = doc();
    let title = d.element("title").unwrap();
    let spec = TimelineSpec::new().tween(
        TweenSpec::new(Selector::class("title"), 1.0)
            .from_to(Prop::Y, 100.0, 0.0)
            .ease(Ease::Linear),
    );
    let tl = Timeline::bind(&spec, &d, ElementId(0), Drive::Scrub).unwrap();

    let at = |p: f64| {
        let mut out = Vec::new();
        tl.sample(Clock::Scroll(p), &mut out).unwrap();
        value_of(&out, title, Prop::Y)
    };
    let forward = at(0.25);
    at(0.9);
    at(0.1);
    assert_eq!(at(0.25), forward);
    assert_eq!(forward, 75.0);
    assert_eq!(at(-1.0), 100.0);
    assert_eq!(at(2.0), 0.0);
}

#[test]
fn staggered_targets_start_in_order() {
    let d = doc();
    let spec = TimelineSpec::new().tween(
        TweenSpec::new(Selector::class("card"), 1.0)
            .from_to(Prop::Opacity, 0.0, 1.0)
            .ease(Ease::Linear)
            .stagger(Stagger::each(0.5)),
    );
    let tl = Timeline::bind(&spec, &d, ElementId(0), Drive::Entrance).unwrap();
    assert!((tl.duration() - 2.5).abs() < 1e-9);

    let mut out = Vec::new();
    tl.sample(Clock::Wall(1.0), &mut out).unwrap();
    let cards: Vec<f64> = (0..4)
        .map(|i| value_of(&out, d.element(&format!("card{i}")).unwrap(), Prop::Opacity))
        .collect();
    assert_eq!(cards, vec![1.0, 0.5, 0.0, 0.0]);
}

#[test]
fn random_stagger_is_deterministic_per_seed() {
    let d = doc();
    let build = |seed| {
        let spec = TimelineSpec::new().tween(
            TweenSpec::new(Selector::class("card"), 0.1)
                .from_to(Prop::Scale, 0.0, 1.0)
                .stagger(Stagger {
                    spread: StaggerSpread::Amount(0.3),
                    from: StaggerFrom::Random { seed },
                }),
        );
        let tl = Timeline::bind(&spec, &d, ElementId(0), Drive::Entrance).unwrap();
        let mut out = Vec::new();
        tl.sample(Clock::Wall(0.15), &mut out).unwrap();
        out.iter().map(|w| w.value).collect::<Vec<_>>()
    };
    assert_eq!(build(7), build(7));
}

#[test]
fn missing_from_inherits_previous_end_or_base() {
    let d = doc();
    let card = d.element("card0").unwrap();
    let spec = TimelineSpec::new()
        .tween(
            TweenSpec::new(Selector::id("card0"), 1.0)
                .to(Prop::Opacity, 1.0)
                .ease(Ease::Linear),
        )
        .tween(
            TweenSpec::new(Selector::id("card0"), 1.0)
                .to(Prop::Opacity, 0.0)
                .ease(Ease::Linear),
        );
    let tl = Timeline::bind(&spec, &d, ElementId(0), Drive::Scrub).unwrap();
    let mut out = Vec::new();
    tl.sample(Clock::Scroll(0.0), &mut out).unwrap();
    assert_eq!(value_of(&out, card, Prop::Opacity), 0.5);
    out.clear();
    tl.sample(Clock::Scroll(0.75), &mut out).unwrap();
    assert!((value_of(&out, card, Prop::Opacity) - 0.5).abs() < 1e-9);
}

#[test]
fn wrong_clock_is_an_error() {
    let d = doc();
    let spec = TimelineSpec::new().tween(
        TweenSpec::new(Selector::class("title"), 1.0).from_to(Prop::X, 0.0, 1.0),
    );
    let scrub = Timeline::bind(&spec, &d, ElementId(0), Drive::Scrub).unwrap();
    let entrance = Timeline::bind(&spec, &d, ElementId(0), Drive::Entrance).unwrap();
    let mut out = Vec::new();
    assert!(scrub.sample(Clock::Wall(0.5), &mut out).is_err());
    assert!(entrance.sample(Clock::Scroll(0.5), &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn unmatched_selector_still_occupies_time() {
    let d = doc();
    let spec = TimelineSpec::new()
        .tween(TweenSpec::new(Selector::class("ghost"), 1.0).from_to(Prop::X, 0.0, 1.0))
        .tween(TweenSpec::new(Selector::class("title"), 1.0).from_to(Prop::X, 0.0, 1.0));
    let tl = Timeline::bind(&spec, &d, ElementId(0), Drive::Entrance).unwrap();
    assert_eq!(tl.duration(), 2.0);
    assert_eq!(tl.track_count(), 1);
    assert_eq!(tl.slots()[1].start, 1.0);
}

#[test]
fn fades_only_keeps_opacity_steps() {
    let spec = TimelineSpec::new()
        .tween(
            TweenSpec::new(Selector::class("title"), 1.0)
                .from_to(Prop::Y, 40.0, 0.0)
                .from_to(Prop::Opacity, 0.0, 1.0),
        )
        .pause(0.5)
        .tween(TweenSpec::new(Selector::class("card"), 1.0).from_to(Prop::Rotation, 0.0, 90.0));
    let reduced = spec.fades_only();
    assert_eq!(reduced.steps.len(), 1);
    let StepSpec::Tween(t) = &reduced.steps[0] else {
        panic!("expected tween");
    };
    assert_eq!(t.props.len(), 1);
    assert_eq!(t.props[0].prop, Prop::Opacity);
}

#[test]
fn validation_rejects_bad_durations() {
    let spec = TimelineSpec::new()
        .tween(TweenSpec::new(Selector::class("title"), -1.0).from_to(Prop::X, 0.0, 1.0));
    assert!(spec.validate().is_err());
    let empty_props = TimelineSpec::new().tween(TweenSpec::new(Selector::class("title"), 1.0));
    assert!(empty_props.validate().is_err());
}
