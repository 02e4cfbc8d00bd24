//! Integration tests for the surface input component.
//!
//! These tests exercise the crate end-to-end: raw events are dispatched into
//! in-process window and surface sources, `SurfaceInput` translates them, and
//! a recorder subscribed to every event name on the `LocalEventBus` captures
//! what would reach application code.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use surface_input::{EventBus, LocalEventBus, LocalEventSource, SurfaceInput, SurfaceInputOptions};
use surface_input_core::{
    ButtonState, EventName, HostElement, MouseButton, PointerPosition, RawEvent, RawEventKind,
    RawKeyEvent, RawPointerEvent, RawWheelEvent, SurfaceEvent,
};

// ── Harness ───────────────────────────────────────────────────────────────────

struct Harness {
    window: Rc<LocalEventSource>,
    surface: Rc<LocalEventSource>,
    bus: Rc<LocalEventBus>,
    log: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl Harness {
    fn new() -> Self {
        let bus = Rc::new(LocalEventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in EventName::ALL {
            let log = Rc::clone(&log);
            bus.subscribe(
                name,
                Rc::new(move |event: &SurfaceEvent| log.borrow_mut().push(event.clone())),
            );
        }
        Self {
            window: Rc::new(LocalEventSource::window()),
            surface: Rc::new(LocalEventSource::surface()),
            bus,
            log,
        }
    }

    fn attach(&self) -> SurfaceInput {
        self.attach_with(SurfaceInputOptions::default())
    }

    fn attach_with(&self, options: SurfaceInputOptions) -> SurfaceInput {
        SurfaceInput::attach(
            self.window.clone(),
            self.surface.clone(),
            self.bus.clone(),
            options,
        )
        .expect("attach must succeed on in-process sources")
    }

    fn key(&self, kind: RawEventKind, event: RawKeyEvent) {
        self.window.dispatch(kind, &RawEvent::Key(event));
    }

    fn pointer(&self, kind: RawEventKind, button: u16, page_x: i32, page_y: i32) {
        let event = RawPointerEvent::at_page(button, page_x, page_y, Some(canvas()));
        self.surface.dispatch(kind, &RawEvent::Pointer(event));
    }

    fn published(&self) -> Vec<SurfaceEvent> {
        self.log.borrow().clone()
    }

    fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

/// A surface element whose cumulative page offset is (50, 20).
fn canvas() -> HostElement {
    HostElement::new("CANVAS")
        .with_offset(30, 15)
        .with_offset_parent(HostElement::new("DIV").with_offset(20, 5))
}

fn ctrl(code: u32) -> RawKeyEvent {
    RawKeyEvent {
        ctrl_key: true,
        ..RawKeyEvent::plain(code)
    }
}

// ── Click synthesis ───────────────────────────────────────────────────────────

#[test]
fn test_click_is_published_after_up_and_before_next_down() {
    // Arrange
    let h = Harness::new();
    let _input = h.attach();

    // Act
    h.pointer(RawEventKind::PointerDown, 1, 120, 80);
    h.pointer(RawEventKind::PointerUp, 1, 120, 80);
    h.pointer(RawEventKind::PointerDown, 1, 121, 80);

    // Assert
    assert_eq!(
        h.published(),
        vec![
            SurfaceEvent::PointerDown { x: 70, y: 60 },
            SurfaceEvent::PointerUp { x: 70, y: 60 },
            SurfaceEvent::Clicked { x: 70, y: 60 },
            SurfaceEvent::PointerDown { x: 71, y: 60 },
        ]
    );
}

#[test]
fn test_release_two_pixels_away_is_not_a_click() {
    let h = Harness::new();
    let _input = h.attach();

    // (10,10) -> (12,10) in surface coordinates
    h.pointer(RawEventKind::PointerDown, 1, 60, 30);
    h.pointer(RawEventKind::PointerUp, 1, 62, 30);

    assert_eq!(
        h.published(),
        vec![
            SurfaceEvent::PointerDown { x: 10, y: 10 },
            SurfaceEvent::PointerUp { x: 12, y: 10 },
        ]
    );
}

#[test]
fn test_exactly_one_click_per_pair() {
    let h = Harness::new();
    let _input = h.attach();

    h.pointer(RawEventKind::PointerDown, 1, 100, 100);
    h.pointer(RawEventKind::PointerUp, 1, 100, 100);
    h.pointer(RawEventKind::PointerUp, 1, 100, 100);

    let clicks = h
        .published()
        .into_iter()
        .filter(|e| e.name() == EventName::Clicked)
        .count();
    assert_eq!(clicks, 1);
}

#[test]
fn test_click_synthesis_can_be_turned_off() {
    let h = Harness::new();
    let _input = h.attach_with(SurfaceInputOptions {
        click_synthesis: false,
        ..SurfaceInputOptions::default()
    });

    h.pointer(RawEventKind::PointerDown, 1, 120, 80);
    h.pointer(RawEventKind::PointerUp, 1, 120, 80);

    assert!(!h.published().iter().any(|e| e.name() == EventName::Clicked));
}

// ── Gating ────────────────────────────────────────────────────────────────────

#[test]
fn test_disabled_input_publishes_nothing_and_mutates_nothing() {
    // Arrange
    let h = Harness::new();
    let input = h.attach();
    input.set_enabled(false);
    let before = input.snapshot();
    h.clear();

    // Act
    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(65));
    h.key(RawEventKind::KeyDown, ctrl(83));
    h.pointer(RawEventKind::PointerDown, 1, 120, 80);
    h.pointer(RawEventKind::PointerUp, 1, 120, 80);
    h.pointer(RawEventKind::DoubleClick, 1, 120, 80);

    // Assert
    assert!(h.published().is_empty());
    assert_eq!(input.snapshot(), before);
}

#[test]
fn test_reenabling_does_not_replay_suppressed_events() {
    let h = Harness::new();
    let input = h.attach();
    input.set_enabled(false);
    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(65));
    h.clear();

    input.set_enabled(true);

    assert_eq!(h.published(), vec![SurfaceEvent::Enabled { value: true }]);
    assert!(!input.is_key_down(65u32));
}

#[test]
fn test_set_enabled_publishes_only_on_change() {
    // Arrange
    let h = Harness::new();
    let input = h.attach();

    // Act
    input.set_enabled(true);
    input.set_enabled(false);
    input.set_enabled(true);

    // Assert
    assert_eq!(
        h.published(),
        vec![
            SurfaceEvent::Enabled { value: false },
            SurfaceEvent::Enabled { value: true },
        ]
    );
}

#[test]
fn test_subscriber_can_disable_input_while_handling_an_event() {
    // Arrange – a keydown subscriber closes the gate.
    let h = Harness::new();
    let slot: Rc<RefCell<Weak<SurfaceInput>>> = Rc::new(RefCell::new(Weak::new()));
    {
        let slot = Rc::clone(&slot);
        h.bus.subscribe(
            EventName::KeyDown,
            Rc::new(move |_: &SurfaceEvent| {
                if let Some(input) = slot.borrow().upgrade() {
                    input.set_enabled(false);
                }
            }),
        );
    }
    let input = Rc::new(h.attach());
    *slot.borrow_mut() = Rc::downgrade(&input);

    // Act
    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(65));
    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(66));

    // Assert
    assert_eq!(
        h.published(),
        vec![
            SurfaceEvent::KeyDown { key_code: 65 },
            SurfaceEvent::Enabled { value: false },
        ]
    );
    assert!(!input.is_enabled());
    assert!(input.is_key_down(65u32));
    assert!(!input.is_key_down(66u32));
}

// ── Keyboard ──────────────────────────────────────────────────────────────────

#[test]
fn test_ctrl_chord_sets_modifier_without_publishing() {
    let h = Harness::new();
    let input = h.attach();

    h.key(RawEventKind::KeyDown, ctrl(17));

    assert!(input.ctrl_down());
    assert!(h.published().is_empty());
}

#[test]
fn test_plain_keydown_tracks_and_publishes_code() {
    let h = Harness::new();
    let input = h.attach();

    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(65));

    assert!(input.is_key_down(65u32));
    assert_eq!(h.published(), vec![SurfaceEvent::KeyDown { key_code: 65 }]);
}

#[test]
fn test_keyup_clears_held_key() {
    let h = Harness::new();
    let input = h.attach();

    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(65));
    h.key(RawEventKind::KeyUp, RawKeyEvent::plain(65));

    assert!(input.keys_down().is_empty());
    assert_eq!(h.published().last(), Some(&SurfaceEvent::KeyUp { key_code: 65 }));
}

#[test]
fn test_keys_aimed_at_text_entry_are_ignored() {
    // Arrange
    let h = Harness::new();
    let input = h.attach();
    let before = input.snapshot();
    let into_input = RawKeyEvent {
        target: Some(HostElement::new("input")),
        ..RawKeyEvent::plain(65)
    };
    let into_editable = RawKeyEvent {
        target: Some(HostElement::new("DIV").content_editable()),
        ..ctrl(66)
    };

    // Act
    h.key(RawEventKind::KeyDown, into_input.clone());
    h.key(RawEventKind::KeyUp, into_input);
    h.key(RawEventKind::KeyDown, into_editable);

    // Assert
    assert!(h.published().is_empty());
    assert_eq!(input.snapshot(), before);
}

// ── Pointer ───────────────────────────────────────────────────────────────────

#[test]
fn test_doubleclick_with_left_button_clears_left_and_right_only() {
    // Arrange
    let h = Harness::new();
    let input = h.attach();
    h.pointer(RawEventKind::PointerDown, 1, 60, 30);
    h.pointer(RawEventKind::PointerDown, 2, 60, 30);
    h.pointer(RawEventKind::PointerDown, 3, 60, 30);

    // Act
    h.pointer(RawEventKind::DoubleClick, 1, 60, 30);

    // Assert
    assert!(!input.is_button_down(MouseButton::Left));
    assert!(!input.is_button_down(MouseButton::Right));
    assert!(input.is_button_down(MouseButton::Middle));
    assert_eq!(
        h.published().last(),
        Some(&SurfaceEvent::DoubleClick { x: 10, y: 10 })
    );
}

#[test]
fn test_page_coordinates_are_made_surface_relative() {
    let h = Harness::new();
    let _input = h.attach();

    h.pointer(RawEventKind::PointerMove, 0, 120, 80);

    assert_eq!(h.published(), vec![SurfaceEvent::PointerMove { x: 70, y: 60 }]);
}

#[test]
fn test_global_coordinates_pass_through_unchanged() {
    let h = Harness::new();
    let _input = h.attach();
    let event = RawPointerEvent {
        button: 0,
        position: PointerPosition::Global { x: 7, y: 9 },
    };

    h.surface.dispatch(RawEventKind::PointerMove, &RawEvent::Pointer(event));

    assert_eq!(h.published(), vec![SurfaceEvent::PointerMove { x: 7, y: 9 }]);
}

#[test]
fn test_unknown_button_is_published_without_state_change() {
    let h = Harness::new();
    let input = h.attach();

    h.pointer(RawEventKind::PointerDown, 4, 120, 80);

    assert_eq!(h.published(), vec![SurfaceEvent::PointerDown { x: 70, y: 60 }]);
    assert_eq!(input.buttons(), ButtonState::default());
}

#[test]
fn test_wheel_publishes_raw_event_and_normalized_delta() {
    // Arrange
    let h = Harness::new();
    let _input = h.attach();
    let raw = RawWheelEvent {
        delta_y: 0.0,
        wheel_delta: Some(120.0),
        detail: None,
        position: None,
    };

    // Act
    h.surface.dispatch(RawEventKind::Wheel, &RawEvent::Wheel(raw.clone()));

    // Assert
    assert_eq!(h.published(), vec![SurfaceEvent::Wheel { raw, delta: 3.0 }]);
}

// ── Reset and teardown ────────────────────────────────────────────────────────

#[test]
fn test_reset_forgets_held_state_and_pending_click() {
    // Arrange
    let h = Harness::new();
    let input = h.attach();
    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(65));
    h.pointer(RawEventKind::PointerDown, 1, 120, 80);

    // Act
    input.reset();
    h.clear();
    h.pointer(RawEventKind::PointerUp, 1, 120, 80);

    // Assert
    assert!(input.keys_down().is_empty());
    assert!(!input.is_button_down(MouseButton::Left));
    assert_eq!(h.published(), vec![SurfaceEvent::PointerUp { x: 70, y: 60 }]);
}

#[test]
fn test_detach_removes_every_listener_it_added() {
    // Arrange
    let h = Harness::new();
    let recorders = h.bus.subscriber_count();
    let input = h.attach();

    // Act
    input.detach();

    // Assert
    assert_eq!(h.window.listener_count(), 0);
    assert_eq!(h.surface.listener_count(), 0);
    assert_eq!(h.bus.subscriber_count(), recorders);
}

#[test]
fn test_events_after_detach_are_not_translated() {
    let h = Harness::new();
    h.attach().detach();

    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(65));
    h.pointer(RawEventKind::PointerDown, 1, 120, 80);
    h.pointer(RawEventKind::PointerUp, 1, 120, 80);

    assert!(h.published().is_empty());
}

#[test]
fn test_two_components_on_one_bus_detach_independently() {
    let h = Harness::new();
    let first = h.attach();
    let second = h.attach();
    assert_eq!(h.window.listener_count(), 4);

    first.detach();
    h.key(RawEventKind::KeyDown, RawKeyEvent::plain(65));

    assert_eq!(h.window.listener_count(), 2);
    assert_eq!(h.published(), vec![SurfaceEvent::KeyDown { key_code: 65 }]);
    assert!(second.is_key_down(65u32));
}

#[test]
fn test_click_on_one_surface_is_published_once_when_two_components_share_a_bus() {
    // Arrange – one bus, one window, two separate surfaces.
    let h = Harness::new();
    let other_surface = Rc::new(LocalEventSource::surface());
    let _first = h.attach();
    let _second = SurfaceInput::attach(
        h.window.clone(),
        other_surface.clone(),
        h.bus.clone(),
        SurfaceInputOptions::default(),
    )
    .expect("attach second component");

    // Act
    h.pointer(RawEventKind::PointerDown, 1, 55, 25);
    h.pointer(RawEventKind::PointerUp, 1, 55, 25);

    // Assert
    assert_eq!(
        h.published(),
        vec![
            SurfaceEvent::PointerDown { x: 5, y: 5 },
            SurfaceEvent::PointerUp { x: 5, y: 5 },
            SurfaceEvent::Clicked { x: 5, y: 5 },
        ]
    );
}

#[test]
fn test_press_on_one_surface_and_release_on_another_is_not_a_click() {
    let h = Harness::new();
    let other_surface = Rc::new(LocalEventSource::surface());
    let _first = h.attach();
    let _second = SurfaceInput::attach(
        h.window.clone(),
        other_surface.clone(),
        h.bus.clone(),
        SurfaceInputOptions::default(),
    )
    .expect("attach second component");

    h.pointer(RawEventKind::PointerDown, 1, 55, 25);
    let release = RawPointerEvent::at_page(1, 55, 25, Some(canvas()));
    other_surface.dispatch(RawEventKind::PointerUp, &RawEvent::Pointer(release));

    assert!(!h.published().iter().any(|e| e.name() == EventName::Clicked));
}
