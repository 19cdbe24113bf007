//! One animated blob: body deformation, springs, head turns, face and overlay
//! advanced together once per frame.
//!
//! Within a tick the discrete schedulers run first, so a state flip and its
//! first smoothed step land in the same frame.

use crate::config::CharacterConfig;
use crate::constants::*;
use crate::deform::{DeformationEngine, ImpactEnergy};
use crate::error::Result;
use crate::expression::{
    resolve_eyes, BlinkScheduler, EyeVariant, ExpressionScheduler, MouthVariant,
};
use crate::gaze::{GazeScheduler, LookDirection};
use crate::mesh::{BlobVertex, DetailLevel};
use crate::noise_field::NoiseField;
use crate::notifications::{NotificationScroller, RenderedLine};
use crate::smoothing::OrientationSmoother;
use crate::sparkles::{SparkleField, SparkleInstance};
use crate::spring::SpringDirector;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

// A tick arriving this long after the previous one means the character was
// not being advanced; pending timers are pushed back by the gap.
const RESUME_GAP_SEC: f32 = 0.5;

/// Host inputs for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the host clock started.
    pub elapsed: f32,
    /// Seconds since the previous rendered frame.
    pub delta: f32,
    /// Pointer in normalized device coordinates, `[-1, 1]` on both axes.
    pub pointer: Vec2,
}

impl FrameInput {
    pub fn new(elapsed: f32, delta: f32, pointer: Vec2) -> Self {
        Self {
            elapsed,
            delta,
            pointer,
        }
    }
}

/// Face overlay state for this frame, in body-local space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FaceFrame {
    pub eye: EyeVariant,
    pub mouth: MouthVariant,
    pub look_direction: LookDirection,
    pub eye_glyph: &'static str,
    pub mouth_glyph: &'static str,
    pub mouth_rotation: f32,
    pub mouth_scale: f32,
    pub offset: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    /// Column-major local transform (offset then rotation).
    pub transform: [f32; 16],
}

/// Everything a host needs to draw one character except the vertex buffer,
/// which is borrowed separately via [`Character::vertices`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CharacterFrame {
    /// Column-major body transform.
    pub body_transform: [f32; 16],
    pub color: [f32; 3],
    pub impact: f32,
    pub looking: bool,
    pub face: Option<FaceFrame>,
    pub notifications: Vec<RenderedLine>,
    pub sparkles: Vec<SparkleInstance>,
}

struct FaceRig {
    gaze: GazeScheduler,
    expression: ExpressionScheduler,
    blink: BlinkScheduler,
    face_orientation: OrientationSmoother,
    follow: OrientationSmoother,
    notifications: NotificationScroller,
}

pub struct Character {
    config: CharacterConfig,
    rng: StdRng,
    deform: DeformationEngine,
    springs: SpringDirector,
    impact: ImpactEnergy,
    body_orientation: OrientationSmoother,
    face: Option<FaceRig>,
    sparkles: Option<SparkleField>,
    clock: f32,
}

impl Character {
    pub fn new(config: CharacterConfig) -> Result<Self> {
        Self::starting_at(config, 0.0)
    }

    /// Build a character whose timers start at host time `now`.
    pub fn starting_at(config: CharacterConfig, now: f32) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut springs = SpringDirector::new();
        springs.register_channel(BOUNCE_CHANNEL, 0.0)?;
        springs.register_channel(SQUASH_CHANNEL, 1.0)?;
        springs.run_loop(BOUNCE_CHANNEL, &config.body.bounce_loop)?;
        springs.run_loop(SQUASH_CHANNEL, &config.body.squash_loop)?;

        let face = config.face.then(|| FaceRig {
            gaze: GazeScheduler::new(config.gaze, now, &mut rng),
            expression: ExpressionScheduler::new(config.expression.clone(), now, &mut rng),
            blink: BlinkScheduler::new(config.blink, now, &mut rng),
            face_orientation: OrientationSmoother::new(FACE_YAW_SMOOTHING),
            follow: OrientationSmoother::new(FACE_FOLLOW_SMOOTHING),
            notifications: NotificationScroller::new(config.notifications),
        });
        let sparkles = config
            .sparkles_enabled
            .then(|| SparkleField::new(config.sparkles, &mut rng));

        log::info!(
            "[character] scale={} detail={} face={} seed={}",
            config.scale,
            config.detail,
            config.face,
            config.seed
        );

        Ok(Self {
            deform: DeformationEngine::new(
                config.detail,
                config.displacement,
                NoiseField::new(config.noise_seed),
            ),
            springs,
            impact: ImpactEnergy::new(config.body.impact_decay_per_frame),
            body_orientation: OrientationSmoother::new(config.body.yaw_smoothing),
            face,
            sparkles,
            clock: now,
            rng,
            config,
        })
    }

    /// Advance one frame and return its draw state.
    pub fn tick(&mut self, input: FrameInput) -> CharacterFrame {
        let now = input.elapsed;
        let dt = input.delta.max(0.0);
        let gap = now - self.clock;
        if gap > RESUME_GAP_SEC.max(dt * 2.0) {
            log::debug!("[character] resumed after {:.2}s; shifting timers", gap);
            self.shift_timers(gap - dt);
        }
        self.clock = now;

        // Discrete state first.
        if let Some(face) = self.face.as_mut() {
            for t in face.gaze.advance(now, &mut self.rng) {
                log::debug!("[gaze] {:?} -> {:?} at {:.2}", t.from, t.to, now);
            }
            face.expression.advance(now, &mut self.rng);
            face.blink.advance(now, &mut self.rng);

            let (yaw, pitch) = face.gaze.aim();
            self.body_orientation.set_target(yaw, pitch);
            face.face_orientation.set_target(yaw, pitch);
            face.follow.set_target(
                input.pointer.x * FACE_POINTER_FOLLOW,
                input.pointer.y * FACE_POINTER_FOLLOW,
            );
        }

        // Continuous state.
        let (body_yaw, body_pitch) = self.body_orientation.advance(dt);
        self.springs.advance(dt);
        self.deform.compute_frame(now, self.impact.value());
        let impact = self.impact.value();
        self.impact.decay(dt);
        if let Some(sparkles) = self.sparkles.as_mut() {
            sparkles.advance(dt, &mut self.rng);
        }

        let body_transform = self.body_transform(body_yaw, body_pitch);
        let (face, notifications, looking) = match self.face.as_mut() {
            Some(face) => {
                let (face_yaw, face_pitch) = face.face_orientation.advance(dt);
                let (fx, fy) = face.follow.advance(dt);
                let looking = face.gaze.is_looking();
                face.notifications.update(now, dt, looking, &mut self.rng);
                let frame = face_frame(
                    face,
                    now,
                    Vec2::new(fx, fy),
                    face_yaw - body_yaw,
                    face_pitch - body_pitch,
                );
                (Some(frame), face.notifications.render(), looking)
            }
            None => (None, Vec::new(), false),
        };

        CharacterFrame {
            body_transform: body_transform.to_cols_array(),
            color: self.config.color,
            impact,
            looking,
            face,
            notifications,
            sparkles: self
                .sparkles
                .as_ref()
                .map(SparkleField::instances)
                .unwrap_or_default(),
        }
    }

    /// Click/tap: full impact energy plus a squash one-shot. Safe at any
    /// point between ticks.
    pub fn click(&mut self) {
        self.impact.hit();
        let b = &self.config.body;
        if let Err(e) = self.springs.trigger(
            SQUASH_CHANNEL,
            b.click_squash_from,
            b.click_squash_to,
            b.click_tension,
            b.click_friction,
        ) {
            log::warn!("[character] click squash failed: {}", e);
        }
        log::debug!("[character] click at {:.2}", self.clock);
    }

    pub fn set_detail(&mut self, detail: DetailLevel) {
        self.config.detail = detail;
        self.deform.set_detail(detail);
    }

    fn shift_timers(&mut self, by: f32) {
        if let Some(face) = self.face.as_mut() {
            face.gaze.shift(by);
            face.expression.shift(by);
            face.blink.shift(by);
            face.notifications.shift(by);
        }
    }

    fn body_transform(&self, yaw: f32, pitch: f32) -> Mat4 {
        let bounce = self.springs.value(BOUNCE_CHANNEL).unwrap_or(0.0);
        let squash = self.springs.value(SQUASH_CHANNEL).unwrap_or(1.0).max(0.05);
        let s = self.config.scale;
        let position = Vec3::from_array(self.config.position) + Vec3::Y * bounce * s;
        Mat4::from_scale_rotation_translation(
            Vec3::new(s / squash, s * squash, s / squash),
            Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0),
            position,
        )
    }

    pub fn vertices(&self) -> &[BlobVertex] {
        self.deform.vertices()
    }

    pub fn indices(&self) -> &[u32] {
        self.deform.mesh().indices()
    }

    pub fn detail(&self) -> DetailLevel {
        self.deform.detail()
    }

    pub fn impact(&self) -> f32 {
        self.impact.value()
    }

    pub fn springs(&self) -> &SpringDirector {
        &self.springs
    }

    pub fn deformation(&self) -> &DeformationEngine {
        &self.deform
    }

    pub fn body_orientation(&self) -> (f32, f32) {
        (self.body_orientation.yaw(), self.body_orientation.pitch())
    }

    pub fn gaze(&self) -> Option<&GazeScheduler> {
        self.face.as_ref().map(|f| &f.gaze)
    }

    pub fn expression(&self) -> Option<&ExpressionScheduler> {
        self.face.as_ref().map(|f| &f.expression)
    }

    pub fn notifications(&self) -> Option<&NotificationScroller> {
        self.face.as_ref().map(|f| &f.notifications)
    }

    pub fn is_looking(&self) -> bool {
        self.face
            .as_ref()
            .map(|f| f.gaze.is_looking())
            .unwrap_or(false)
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }
}

fn face_frame(face: &FaceRig, now: f32, follow: Vec2, yaw: f32, pitch: f32) -> FaceFrame {
    let looking = face.gaze.is_looking();
    let direction = face.gaze.direction();
    let eye = resolve_eyes(looking, direction, face.blink.is_closed());
    let mouth = face.expression.current();
    let roll = (now * FACE_ROLL_FREQUENCY).sin() * FACE_ROLL_AMPLITUDE;
    let base = Vec3::from_array(FACE_BASE_OFFSET);
    let offset = base + Vec3::new(follow.x, follow.y, 0.0);
    let transform = Mat4::from_rotation_translation(
        Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll),
        offset,
    );
    FaceFrame {
        eye,
        mouth,
        look_direction: direction,
        eye_glyph: eye.glyph(),
        mouth_glyph: mouth.glyph(),
        mouth_rotation: mouth.rotation(),
        mouth_scale: mouth.font_scale(),
        offset: offset.to_array(),
        yaw,
        pitch,
        roll,
        transform: transform.to_cols_array(),
    }
}
