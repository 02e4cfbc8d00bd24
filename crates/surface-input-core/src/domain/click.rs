//! Click recognition over the normalized pointer stream.
//!
//! A click is a `pointerdown` followed by a `pointerup` at exactly the same
//! surface coordinates.  There is no timeout and no button distinction.

use crate::events::surface::SurfaceEvent;

/// Two-state click recognizer.  At most one down is pending at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ClickState {
    #[default]
    Idle,
    /// Holds the coordinates of the most recent `pointerdown`.
    Armed { x: i32, y: i32 },
}

impl ClickState {
    /// Records a `pointerdown`.  A newer down replaces any pending one.
    pub fn on_pointer_down(&mut self, x: i32, y: i32) {
        *self = ClickState::Armed { x, y };
    }

    /// Consumes a `pointerup` and returns the synthesized `clicked` event when
    /// it lands on the armed coordinates.  Always returns to idle.
    pub fn on_pointer_up(&mut self, x: i32, y: i32) -> Option<SurfaceEvent> {
        let armed = std::mem::take(self);
        match armed {
            ClickState::Armed { x: down_x, y: down_y } if down_x == x && down_y == y => {
                Some(SurfaceEvent::Clicked { x, y })
            }
            _ => None,
        }
    }

    /// Feeds any normalized event; only `pointerdown` / `pointerup` matter.
    pub fn observe(&mut self, event: &SurfaceEvent) -> Option<SurfaceEvent> {
        match *event {
            SurfaceEvent::PointerDown { x, y } => {
                self.on_pointer_down(x, y);
                None
            }
            SurfaceEvent::PointerUp { x, y } => self.on_pointer_up(x, y),
            _ => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, ClickState::Armed { .. })
    }
}
