//! Runtime configuration for a character and its presets.
//!
//! Every field has a default built from `constants.rs`; hosts may override any
//! subset (all structs are `#[serde(default)]`).

use crate::constants::*;
use crate::deform::DisplacementParams;
use crate::error::{invalid, Result};
use crate::expression::{BlinkConfig, ExpressionConfig};
use crate::gaze::GazeConfig;
use crate::mesh::DetailLevel;
use crate::notifications::NotificationConfig;
use crate::sparkles::SparkleConfig;
use crate::spring::SpringStep;
use serde::{Deserialize, Serialize};

/// Springs driving the body's secondary motion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub bounce_loop: Vec<SpringStep>,
    pub squash_loop: Vec<SpringStep>,
    pub click_squash_from: f32,
    pub click_squash_to: f32,
    pub click_tension: f32,
    pub click_friction: f32,
    pub impact_decay_per_frame: f32,
    pub yaw_smoothing: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            bounce_loop: BOUNCE_LOOP.iter().copied().map(SpringStep::from).collect(),
            squash_loop: SQUASH_LOOP.iter().copied().map(SpringStep::from).collect(),
            click_squash_from: CLICK_SQUASH_FROM,
            click_squash_to: CLICK_SQUASH_TO,
            click_tension: CLICK_SQUASH_TENSION,
            click_friction: CLICK_SQUASH_FRICTION,
            impact_decay_per_frame: IMPACT_DECAY_PER_FRAME,
            yaw_smoothing: BODY_YAW_SMOOTHING,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
    pub detail: DetailLevel,
    /// Faceless characters skip gaze, expressions, blinks and the overlay.
    pub face: bool,
    pub sparkles_enabled: bool,
    pub seed: u64,
    pub noise_seed: u32,
    pub body: BodyConfig,
    pub displacement: DisplacementParams,
    pub gaze: GazeConfig,
    pub expression: ExpressionConfig,
    pub blink: BlinkConfig,
    pub notifications: NotificationConfig,
    pub sparkles: SparkleConfig,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self::primary()
    }
}

impl CharacterConfig {
    /// The full-size mascot with face, overlay and sparkles.
    pub fn primary() -> Self {
        Self {
            position: [0.0; 3],
            scale: 1.0,
            color: PRIMARY_COLOR,
            detail: DetailLevel::Rough,
            face: true,
            sparkles_enabled: true,
            seed: 42,
            noise_seed: NOISE_SEED,
            body: BodyConfig::default(),
            displacement: DisplacementParams::default(),
            gaze: GazeConfig::default(),
            expression: ExpressionConfig::default(),
            blink: BlinkConfig::default(),
            notifications: NotificationConfig::default(),
            sparkles: SparkleConfig::default(),
        }
    }

    /// Small faceless background blob.
    pub fn companion(position: [f32; 3], scale: f32, color: [f32; 3]) -> Self {
        Self {
            position,
            scale,
            color,
            face: false,
            sparkles_enabled: false,
            ..Self::primary()
        }
    }

    /// Reduced mascot shown next to a competing UI panel.
    pub fn mini() -> Self {
        Self {
            position: MINI_POSITION,
            scale: MINI_SCALE,
            detail: DetailLevel::Smooth,
            sparkles_enabled: false,
            ..Self::primary()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid("scale", "must be positive"));
        }
        validate_steps("body.bounce_loop", &self.body.bounce_loop)?;
        validate_steps("body.squash_loop", &self.body.squash_loop)?;
        if !(self.body.click_tension > 0.0 && self.body.click_friction > 0.0) {
            return Err(invalid("body.click", "tension and friction must be positive"));
        }
        unit_open("body.impact_decay_per_frame", self.body.impact_decay_per_frame)?;
        unit_half_open("body.yaw_smoothing", self.body.yaw_smoothing)?;

        let d = &self.displacement;
        if !(d.frequency > 0.0 && d.amplitude >= 0.0 && d.ripple_max >= 0.0) {
            return Err(invalid(
                "displacement",
                "frequency must be positive; amplitude and ripple non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&d.frequency_drop) {
            return Err(invalid("displacement.frequency_drop", "must be in [0, 1]"));
        }

        let g = &self.gaze;
        if g.idle_base_sec - g.idle_jitter_sec.abs() <= 0.0 {
            return Err(invalid("gaze.idle", "jitter must be smaller than the base interval"));
        }
        if g.hold_sec < 0.0 || g.return_sec < 0.0 {
            return Err(invalid("gaze", "hold and return durations must be non-negative"));
        }
        ordered("gaze.yaw", g.yaw_min, g.yaw_max)?;
        if g.yaw_min <= 0.0 {
            return Err(invalid("gaze.yaw_min", "must be positive"));
        }

        let e = &self.expression;
        ordered("expression.interval", e.interval_min_sec, e.interval_max_sec)?;
        ordered("expression.hold", e.hold_min_sec, e.hold_max_sec)?;
        if e.interval_min_sec <= 0.0 {
            return Err(invalid("expression.interval_min_sec", "must be positive"));
        }
        if !e.transients.iter().any(|(_, w)| *w > 0.0) {
            return Err(invalid("expression.transients", "needs a positive weight"));
        }

        let b = &self.blink;
        ordered("blink.interval", b.interval_min_sec, b.interval_max_sec)?;
        if b.interval_min_sec <= 0.0 {
            return Err(invalid("blink.interval_min_sec", "must be positive"));
        }

        let n = &self.notifications;
        if n.visible_lines == 0 {
            return Err(invalid("notifications.visible_lines", "must be at least 1"));
        }
        if n.interval_sec <= 0.0 {
            return Err(invalid("notifications.interval_sec", "must be positive"));
        }
        unit_open("notifications.scroll_decay", n.scroll_decay)?;
        unit_half_open("notifications.fade_rate", n.fade_rate)?;
        Ok(())
    }
}

fn validate_steps(field: &'static str, steps: &[SpringStep]) -> Result<()> {
    if steps.is_empty() {
        return Err(invalid(field, "needs at least one step"));
    }
    if steps
        .iter()
        .any(|s| !(s.tension > 0.0 && s.friction > 0.0 && s.target.is_finite()))
    {
        return Err(invalid(field, "tension and friction must be positive"));
    }
    Ok(())
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<()> {
    if min > max {
        return Err(invalid(field, format!("min {min} exceeds max {max}")));
    }
    Ok(())
}

fn unit_open(field: &'static str, v: f32) -> Result<()> {
    if !(v > 0.0 && v < 1.0) {
        return Err(invalid(field, "must be in (0, 1)"));
    }
    Ok(())
}

fn unit_half_open(field: &'static str, v: f32) -> Result<()> {
    if !(v > 0.0 && v <= 1.0) {
        return Err(invalid(field, "must be in (0, 1]"));
    }
    Ok(())
}
