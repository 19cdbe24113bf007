use crate::constants::{MAX_HOST_DELTA_SEC, POINTER_NDC_LIMIT};
use blob_core::FrameInput;
use glam::Vec2;

/// Turn raw host numbers into a frame input the engine can trust: non-finite
/// values become zero, delta is clamped, the pointer is kept in NDC range.
pub fn sanitize_input(elapsed: f32, delta: f32, px: f32, py: f32) -> FrameInput {
    let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
    let pointer = Vec2::new(finite(px), finite(py))
        .clamp(Vec2::splat(-POINTER_NDC_LIMIT), Vec2::splat(POINTER_NDC_LIMIT));
    FrameInput::new(
        finite(elapsed).max(0.0),
        finite(delta).clamp(0.0, MAX_HOST_DELTA_SEC),
        pointer,
    )
}

/// Client pixel position to NDC (+y up) for a canvas of the given CSS size.
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if !(width > 0.0 && height > 0.0) {
        return Vec2::ZERO;
    }
    Vec2::new(x / width * 2.0 - 1.0, 1.0 - y / height * 2.0)
        .clamp(Vec2::splat(-POINTER_NDC_LIMIT), Vec2::splat(POINTER_NDC_LIMIT))
}
