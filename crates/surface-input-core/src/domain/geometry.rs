//! Coordinate and wheel-delta normalization.
//!
//! Hosts report pointer positions relative to the page.  The surface may sit
//! anywhere on the page, nested inside positioned containers, so its local
//! origin is the sum of the offsets along the target's offset-parent chain:
//!
//! ```text
//! x = page_x - Σ offset_left
//! y = page_y - Σ offset_top
//! ```
//!
//! Host-supplied offsets are untrusted, so sums are taken in `i64` and the
//! results clamped into `i32`.

use crate::events::raw::{HostElement, PointerPosition, RawWheelEvent};

/// Legacy `wheelDelta` units per normalized step (one notch = 120 = 3 steps).
const WHEEL_DELTA_UNITS_PER_STEP: f64 = 40.0;

/// Sums the offsets of `element` and all of its offset parents, saturating at
/// the `i32` bounds.
pub fn cumulative_offset(element: &HostElement) -> (i32, i32) {
    let (left, top) = wide_offset(element);
    (clamp_to_i32(left), clamp_to_i32(top))
}

fn wide_offset(element: &HostElement) -> (i64, i64) {
    element.offset_chain().fold((0, 0), |(left, top), e| {
        (left + i64::from(e.offset_left), top + i64::from(e.offset_top))
    })
}

fn clamp_to_i32(value: i64) -> i32 {
    // Lossless after the clamp.
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Converts a raw pointer position into surface-relative coordinates.
///
/// Page positions are corrected by the target's cumulative offset (zero when
/// the host supplied no target).  Legacy global positions are returned as-is.
pub fn surface_coordinates(position: &PointerPosition) -> (i32, i32) {
    match position {
        PointerPosition::Page {
            page_x,
            page_y,
            target,
        } => {
            let (left, top) = target.as_ref().map(wide_offset).unwrap_or((0, 0));
            (
                clamp_to_i32(i64::from(*page_x) - left),
                clamp_to_i32(i64::from(*page_y) - top),
            )
        }
        PointerPosition::Global { x, y } => (*x, *y),
    }
}

/// Collapses the host's wheel fields into one signed step count.
///
/// Positive values scroll away from the user.  The legacy `wheel_delta` field
/// wins when present and non-zero, then the legacy `detail` field, then the
/// standard `delta_y`.
pub fn normalize_wheel_delta(event: &RawWheelEvent) -> f64 {
    if let Some(wheel_delta) = event.wheel_delta.filter(|d| *d != 0.0) {
        return wheel_delta / WHEEL_DELTA_UNITS_PER_STEP;
    }
    if let Some(detail) = event.detail.filter(|d| *d != 0.0) {
        return -detail;
    }
    if event.delta_y != 0.0 {
        return -event.delta_y / WHEEL_DELTA_UNITS_PER_STEP;
    }
    0.0
}
