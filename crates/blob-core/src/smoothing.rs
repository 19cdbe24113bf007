//! Exponential smoothing for head orientation and other slow followers.
//!
//! Factors are fractions of the remaining distance covered per 60 Hz frame.
//! Unlike the springs this never overshoots, which keeps head rotation
//! independent of the bounce/squash physics.

use crate::constants::REFERENCE_FPS;
use glam::Vec2;

/// Fraction of a value kept after `dt` seconds when `retain` is kept per
/// reference frame.
#[inline]
pub fn per_frame_retain(retain: f32, dt_sec: f32) -> f32 {
    let frames = (dt_sec.max(0.0) * REFERENCE_FPS).max(0.0);
    retain.clamp(0.0, 1.0).powf(frames)
}

/// Lerp factor covering `factor` of the distance per reference frame.
#[inline]
pub fn per_frame_alpha(factor: f32, dt_sec: f32) -> f32 {
    1.0 - per_frame_retain(1.0 - factor.clamp(0.0, 1.0), dt_sec)
}

/// Yaw/pitch follower: `current = lerp(current, target, factor)` each frame.
#[derive(Clone, Debug)]
pub struct OrientationSmoother {
    factor: f32,
    current: Vec2,
    target: Vec2,
}

impl OrientationSmoother {
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.clamp(0.0, 1.0),
            current: Vec2::ZERO,
            target: Vec2::ZERO,
        }
    }

    pub fn set_target(&mut self, yaw: f32, pitch: f32) {
        self.target = Vec2::new(yaw, pitch);
    }

    /// Step toward the target and return the new `(yaw, pitch)`.
    pub fn advance(&mut self, dt_sec: f32) -> (f32, f32) {
        let alpha = per_frame_alpha(self.factor, dt_sec);
        self.current = self.current.lerp(self.target, alpha);
        (self.current.x, self.current.y)
    }

    pub fn yaw(&self) -> f32 {
        self.current.x
    }

    pub fn pitch(&self) -> f32 {
        self.current.y
    }

    pub fn target(&self) -> (f32, f32) {
        (self.target.x, self.target.y)
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }
}
