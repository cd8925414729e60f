use super::*;
use crate::foundation::core::LayoutBox;
use crate::host::document::ElementSpec;

fn doc() -> Document {
    let root = ElementSpec::new("page", LayoutBox::new(0.0, 0.0, 1000.0, 2000.0))
        .child(
            ElementSpec::new("backdrop", LayoutBox::new(0.0, 0.0, 1000.0, 800.0))
                .class("modal-backdrop")
                .style(Prop::Opacity, 0.0)
                .child(
                    ElementSpec::new("dialog", LayoutBox::new(100.0, 100.0, 400.0, 400.0))
                        .class("modal")
                        .style(Prop::Scale, 0.8)
                        .style(Prop::Opacity, 0.0)
                        .style(Prop::Y, 20.0),
                ),
        );
    Document::from_spec(&root, None).unwrap()
}

fn manager(d: &Document) -> (OverlayManager, Observable<bool>) {
    let at_end = Observable::new(false);
    let spec = OverlaySpec {
        backdrop: Some(Selector::class("modal-backdrop")),
        dialog: Some(Selector::class("modal")),
    };
    (OverlayManager::new(&spec, d, OwnerId(1), at_end.read_only(), 3), at_end)
}

#[test]
fn open_request_animates_dialog_in() {
    let mut d = doc();
    let (mut m, _end) = manager(&d);
    let dialog = d.element("dialog").unwrap();
    let open = m.modal_open();

    m.handle().request_open();
    assert!(!open.get());
    m.process(&d);
    assert!(open.get());

    m.tick(0.2);
    m.render(&mut d);
    assert!(m.is_animating());
    assert!(d.computed(dialog, Prop::Scale) > 0.8);

    m.tick(1.0);
    m.render(&mut d);
    assert_eq!(d.computed(dialog, Prop::Scale), 1.0);
    assert_eq!(d.computed(dialog, Prop::Y), 0.0);
    assert_eq!(d.computed(d.element("backdrop").unwrap(), Prop::Opacity), 1.0);
}

#[test]
fn close_mid_open_reverses_from_current_values() {
    let mut d = doc();
    let (mut m, _end) = manager(&d);
    let dialog = d.element("dialog").unwrap();
    let h = m.handle();
    h.request_open();
    m.process(&d);
    m.tick(0.1);
    m.render(&mut d);
    let y_mid = d.computed(dialog, Prop::Y);

    h.request_close();
    m.process(&d);
    m.tick(0.01);
    m.render(&mut d);
    let y_after = d.computed(dialog, Prop::Y);
    assert!((y_after - y_mid).abs() < 1.0, "{y_mid} -> {y_after}");

    m.tick(1.0);
    m.render(&mut d);
    assert_eq!(d.computed(dialog, Prop::Y), 20.0);
    assert!(!m.modal_open().get());
}

#[test]
fn repeated_requests_are_idempotent() {
    let d = doc();
    let (mut m, _end) = manager(&d);
    let open = m.modal_open();
    let h = m.handle();
    h.request_open();
    h.request_open();
    m.process(&d);
    assert!(open.get());
    h.request_close();
    h.request_close();
    m.process(&d);
    assert!(!open.get());
}

#[test]
fn accordion_starts_open_and_toggles() {
    let d = doc();
    let (m, _end) = manager(&d);
    let acc = m.accordion();
    let open = acc.open_index();
    assert_eq!(open.get(), Some(0));
    acc.toggle(0);
    assert_eq!(open.get(), None);
    acc.toggle(2);
    assert_eq!(open.get(), Some(2));
    acc.toggle(1);
    assert_eq!(open.get(), Some(1));
    acc.toggle(9);
    assert_eq!(open.get(), Some(1));
}

#[test]
fn bar_visibility_follows_class_and_end() {
    let d = doc();
    let (m, at_end) = manager(&d);
    let desktop = m.bar().state(ViewportClass::Desktop);
    assert!(!desktop.quick_bar_visible);
    assert!(desktop.next_visible);

    at_end.set(true);
    assert!(!m.bar().state(ViewportClass::Desktop).next_visible);

    let mobile = m.bar().state(ViewportClass::Mobile);
    assert!(mobile.quick_bar_visible && !mobile.next_visible);
    m.bar().toggle();
    assert!(m.bar().minimized().get());
}

#[test]
fn next_button_availability_is_derived_from_end_flag() {
    let d = doc();
    let (m, at_end) = manager(&d);
    let next = m.bar().next_available();
    assert!(next.get());
    assert_eq!(at_end.read_only().subscriber_count(), 1);

    at_end.set(true);
    assert!(!next.get());
    at_end.set(false);
    assert!(next.get());

    drop(m);
    assert_eq!(at_end.read_only().subscriber_count(), 0);
}
