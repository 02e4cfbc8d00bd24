//! ClickSynthesizer: turns a matching `pointerdown` / `pointerup` pair into a
//! `clicked` event.
//!
//! Each component owns its own synthesizer and feeds it only the pointer
//! events it translated itself.  The synthesizer never subscribes to the bus,
//! so several components sharing one bus cannot arm or fire each other's
//! clicks.
//!
//! # Ordering
//!
//! The component publishes the `pointerup` first and the returned `clicked`
//! right after it.  A bus that queues nested publishes (such as
//! `LocalEventBus`) keeps that order even when the raw event arrives from
//! inside another delivery.

use std::cell::Cell;

use surface_input_core::{ClickState, SurfaceEvent};
use tracing::debug;

/// Per-component click state machine.
#[derive(Debug, Default)]
pub struct ClickSynthesizer {
    state: Cell<ClickState>,
}

impl ClickSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one translated event and returns `clicked` when `event` is the
    /// `pointerup` completing a pair.  Other events are ignored.
    pub fn observe(&self, event: &SurfaceEvent) -> Option<SurfaceEvent> {
        let mut clicks = self.state.get();
        let clicked = clicks.observe(event);
        self.state.set(clicks);

        if let Some(clicked) = &clicked {
            debug!(?clicked, "click synthesized");
        }
        clicked
    }

    /// Returns `true` while a `pointerdown` is waiting for its `pointerup`.
    pub fn is_armed(&self) -> bool {
        self.state.get().is_armed()
    }

    /// Forgets a pending `pointerdown`.
    pub fn reset(&self) {
        self.state.set(ClickState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_pair_yields_clicked() {
        // Arrange
        let clicks = ClickSynthesizer::new();

        // Act
        let on_down = clicks.observe(&SurfaceEvent::PointerDown { x: 5, y: 6 });
        let on_up = clicks.observe(&SurfaceEvent::PointerUp { x: 5, y: 6 });

        // Assert
        assert_eq!(on_down, None);
        assert_eq!(on_up, Some(SurfaceEvent::Clicked { x: 5, y: 6 }));
        assert!(!clicks.is_armed());
    }

    #[test]
    fn test_moved_release_yields_nothing() {
        let clicks = ClickSynthesizer::new();

        clicks.observe(&SurfaceEvent::PointerDown { x: 10, y: 10 });
        let on_up = clicks.observe(&SurfaceEvent::PointerUp { x: 12, y: 10 });

        assert_eq!(on_up, None);
        assert!(!clicks.is_armed());
    }

    #[test]
    fn test_reset_disarms_pending_press() {
        let clicks = ClickSynthesizer::new();

        clicks.observe(&SurfaceEvent::PointerDown { x: 1, y: 1 });
        assert!(clicks.is_armed());
        clicks.reset();

        assert_eq!(clicks.observe(&SurfaceEvent::PointerUp { x: 1, y: 1 }), None);
    }

    #[test]
    fn test_non_pointer_events_leave_state_alone() {
        let clicks = ClickSynthesizer::new();
        clicks.observe(&SurfaceEvent::PointerDown { x: 3, y: 3 });

        assert_eq!(clicks.observe(&SurfaceEvent::KeyDown { key_code: 65 }), None);
        assert_eq!(clicks.observe(&SurfaceEvent::Enabled { value: true }), None);

        assert!(clicks.is_armed());
    }
}
