//! Ambient sparkle particles drifting off the body.

use crate::constants::*;
use crate::random::uniform;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    pub count: usize,
    pub radius: f32,
    pub radius_jitter: f32,
    pub life_min_sec: f32,
    pub life_span_sec: f32,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            count: SPARKLE_COUNT,
            radius: SPARKLE_RADIUS,
            radius_jitter: SPARKLE_RADIUS_JITTER,
            life_min_sec: SPARKLE_LIFE_MIN_SEC,
            life_span_sec: SPARKLE_LIFE_SPAN_SEC,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Sparkle {
    position: Vec3,
    velocity: Vec3,
    life: f32,
    max_life: f32,
    scale: f32,
    opacity: f32,
}

/// Per-instance data for the host's instanced draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SparkleInstance {
    pub position: [f32; 3],
    /// Base scale already multiplied by the life-cycle opacity.
    pub scale: f32,
    /// Roll about the view axis, applied after billboarding.
    pub spin: f32,
}

/// Fade in over the first 20% of life, out over the last 30%.
#[inline]
pub fn life_opacity(life_ratio: f32) -> f32 {
    if life_ratio < SPARKLE_FADE_IN {
        life_ratio.max(0.0) / SPARKLE_FADE_IN
    } else if life_ratio > SPARKLE_FADE_OUT_START {
        (1.0 - (life_ratio - SPARKLE_FADE_OUT_START) / (1.0 - SPARKLE_FADE_OUT_START)).max(0.0)
    } else {
        1.0
    }
}

#[derive(Clone, Debug)]
pub struct SparkleField {
    config: SparkleConfig,
    sparkles: Vec<Sparkle>,
}

impl SparkleField {
    pub fn new<R: Rng + ?Sized>(config: SparkleConfig, rng: &mut R) -> Self {
        let count = config.count;
        let sparkles = (0..count)
            .map(|i| {
                // Stagger the first spawns so they don't all pop together.
                let stagger = i as f32 * (SPARKLE_STAGGER_SEC / count.max(1) as f32);
                spawn(&config, stagger, rng)
            })
            .collect();
        Self { config, sparkles }
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, dt_sec: f32, rng: &mut R) {
        let dt = dt_sec.max(0.0);
        for (i, s) in self.sparkles.iter_mut().enumerate() {
            s.life += dt;
            if s.life >= s.max_life {
                *s = spawn(&self.config, 0.0, rng);
                continue;
            }
            s.opacity = life_opacity(s.life / s.max_life);
            s.position += s.velocity * dt;
            let phase = i as f32;
            s.position.x += (s.life * 2.0 + phase).sin() * dt * 0.05;
            s.position.y += (s.life * 1.5 + phase).cos() * dt * 0.03;
        }
    }

    pub fn instances(&self) -> Vec<SparkleInstance> {
        self.sparkles
            .iter()
            .map(|s| SparkleInstance {
                position: s.position.to_array(),
                scale: s.scale * s.opacity,
                spin: s.life * SPARKLE_SPIN_RATE,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }
}

fn spawn<R: Rng + ?Sized>(config: &SparkleConfig, initial_life: f32, rng: &mut R) -> Sparkle {
    let theta = uniform(rng, 0.0, TAU);
    let phi = uniform(rng, -1.0, 1.0).clamp(-1.0, 1.0).acos();
    let r = config.radius + (rng.gen::<f32>() - 0.5) * config.radius_jitter;
    let position = Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    );
    let speed = SPARKLE_SPEED_MIN + rng.gen::<f32>() * SPARKLE_SPEED_SPAN;
    let mut velocity = position.normalize_or_zero() * speed;
    velocity.y += SPARKLE_UPWARD_BIAS;
    Sparkle {
        position,
        velocity,
        life: initial_life,
        max_life: config.life_min_sec + rng.gen::<f32>() * config.life_span_sec,
        scale: 0.6 + rng.gen::<f32>() * 0.8,
        opacity: 0.0,
    }
}
