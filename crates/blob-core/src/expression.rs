//! Mouth expressions and blinks.
//!
//! Both run on their own randomized timers, independent of the gaze. The
//! mouth follows [`ExpressionScheduler`]; the eyes follow the gaze first and
//! blinks second (see [`resolve_eyes`]).

use crate::constants::*;
use crate::gaze::LookDirection;
use crate::random::{chance, pick_weighted, uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouthVariant {
    #[default]
    Happy,
    Excited,
    Surprised,
    Small,
}

impl MouthVariant {
    /// Glyph the host draws for this mouth.
    pub fn glyph(self) -> &'static str {
        match self {
            MouthVariant::Happy => "‿",
            MouthVariant::Excited => "D",
            MouthVariant::Surprised => "o",
            MouthVariant::Small => "─",
        }
    }

    /// Roll applied to the glyph (the grin is a sideways "D").
    pub fn rotation(self) -> f32 {
        match self {
            MouthVariant::Excited => -FRAC_PI_2,
            _ => 0.0,
        }
    }

    /// Glyph size relative to the baseline mouth.
    pub fn font_scale(self) -> f32 {
        match self {
            MouthVariant::Excited => 1.5,
            _ => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "lowercase")]
pub enum EyeVariant {
    #[default]
    Open,
    Closed,
    Looking(LookDirection),
}

impl EyeVariant {
    pub fn glyph(self) -> &'static str {
        match self {
            EyeVariant::Open => "^",
            EyeVariant::Closed => "─",
            EyeVariant::Looking(LookDirection::Left) => "<",
            EyeVariant::Looking(LookDirection::Right) => ">",
            EyeVariant::Looking(LookDirection::None) => "•",
        }
    }
}

/// Eye priority: looking beats blinking beats open.
pub fn resolve_eyes(looking: bool, direction: LookDirection, blinking: bool) -> EyeVariant {
    if looking {
        EyeVariant::Looking(direction)
    } else if blinking {
        EyeVariant::Closed
    } else {
        EyeVariant::Open
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionConfig {
    pub interval_min_sec: f32,
    pub interval_max_sec: f32,
    pub override_probability: f32,
    pub hold_min_sec: f32,
    pub hold_max_sec: f32,
    /// Transient mouths and their relative weights.
    pub transients: Vec<(MouthVariant, f32)>,
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            interval_min_sec: EXPRESSION_INTERVAL_MIN_SEC,
            interval_max_sec: EXPRESSION_INTERVAL_MAX_SEC,
            override_probability: EXPRESSION_OVERRIDE_PROBABILITY,
            hold_min_sec: EXPRESSION_HOLD_MIN_SEC,
            hold_max_sec: EXPRESSION_HOLD_MAX_SEC,
            transients: vec![
                (MouthVariant::Excited, 0.25),
                (MouthVariant::Surprised, 0.15),
                (MouthVariant::Small, 0.1),
            ],
        }
    }
}

/// Occasional short-lived mouth overrides that always revert to happy.
#[derive(Clone, Debug)]
pub struct ExpressionScheduler {
    config: ExpressionConfig,
    current: MouthVariant,
    revert_at: Option<f32>,
    next_fire_at: f32,
}

impl ExpressionScheduler {
    pub fn new<R: Rng + ?Sized>(config: ExpressionConfig, now: f32, rng: &mut R) -> Self {
        let mut s = Self {
            config,
            current: MouthVariant::Happy,
            revert_at: None,
            next_fire_at: now,
        };
        s.schedule(now, rng);
        s
    }

    /// Apply the revert and/or timer fire due at `now`. Returns the mouth when
    /// it changed.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) -> Option<MouthVariant> {
        let before = self.current;
        if let Some(at) = self.revert_at {
            if now >= at {
                self.current = MouthVariant::Happy;
                self.revert_at = None;
            }
        }
        if now >= self.next_fire_at {
            let fired_at = self.next_fire_at;
            if chance(rng, self.config.override_probability) {
                if let Some(mouth) = pick_weighted(rng, &self.config.transients) {
                    let hold = uniform(rng, self.config.hold_min_sec, self.config.hold_max_sec);
                    self.current = mouth;
                    self.revert_at = Some(now + hold);
                    log::debug!("[expression] {:?} for {:.0}ms", mouth, hold * 1000.0);
                }
            }
            self.schedule(fired_at.max(now - self.config.interval_max_sec), rng);
        }
        (self.current != before).then_some(self.current)
    }

    fn schedule<R: Rng + ?Sized>(&mut self, from: f32, rng: &mut R) {
        let wait = uniform(rng, self.config.interval_min_sec, self.config.interval_max_sec);
        self.next_fire_at = from + wait.max(f32::EPSILON);
    }

    pub fn shift(&mut self, by: f32) {
        self.next_fire_at += by;
        if let Some(at) = self.revert_at.as_mut() {
            *at += by;
        }
    }

    pub fn current(&self) -> MouthVariant {
        self.current
    }

    pub fn revert_at(&self) -> Option<f32> {
        self.revert_at
    }

    pub fn next_fire_at(&self) -> f32 {
        self.next_fire_at
    }

    pub fn config(&self) -> &ExpressionConfig {
        &self.config
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    pub interval_min_sec: f32,
    pub interval_max_sec: f32,
    pub probability: f32,
    pub duration_sec: f32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            interval_min_sec: BLINK_INTERVAL_MIN_SEC,
            interval_max_sec: BLINK_INTERVAL_MAX_SEC,
            probability: BLINK_PROBABILITY,
            duration_sec: BLINK_DURATION_SEC,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BlinkScheduler {
    config: BlinkConfig,
    open_at: Option<f32>,
    next_fire_at: f32,
}

impl BlinkScheduler {
    pub fn new<R: Rng + ?Sized>(config: BlinkConfig, now: f32, rng: &mut R) -> Self {
        let mut s = Self {
            config,
            open_at: None,
            next_fire_at: now,
        };
        s.schedule(now, rng);
        s
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        if let Some(at) = self.open_at {
            if now >= at {
                self.open_at = None;
            }
        }
        if now >= self.next_fire_at {
            if chance(rng, self.config.probability) {
                self.open_at = Some(now + self.config.duration_sec.max(0.0));
                log::trace!("[blink] at {:.2}", now);
            }
            let fired_at = self.next_fire_at;
            self.schedule(fired_at.max(now - self.config.interval_max_sec), rng);
        }
    }

    fn schedule<R: Rng + ?Sized>(&mut self, from: f32, rng: &mut R) {
        let wait = uniform(rng, self.config.interval_min_sec, self.config.interval_max_sec);
        self.next_fire_at = from + wait.max(f32::EPSILON);
    }

    pub fn shift(&mut self, by: f32) {
        self.next_fire_at += by;
        if let Some(at) = self.open_at.as_mut() {
            *at += by;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.open_at.is_some()
    }

    pub fn next_fire_at(&self) -> f32 {
        self.next_fire_at
    }
}
