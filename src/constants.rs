// Host-side tuning for the browser binding.
//
// The engine's own constants live in `blob_core::constants`; these only cover
// how raw browser inputs are cleaned up before they reach it.

// Longest frame delta passed through (seconds). Background tabs can report
// multi-second deltas; the engine shifts its timers on resume instead.
pub const MAX_HOST_DELTA_SEC: f32 = 0.25;

// Pointer coordinates are normalized device coordinates.
pub const POINTER_NDC_LIMIT: f32 = 1.0;

// Floats per vertex in the flattened buffer (position xyz + normal xyz).
pub const FLOATS_PER_VERTEX: usize = 6;
