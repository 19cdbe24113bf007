//! Head-turn scheduling.
//!
//! A four-phase state machine driven by `next_fire_at` timestamps on the
//! render clock. Consumers read only [`GazeScheduler::is_looking`] and
//! [`GazeScheduler::direction`]; the phase enum is exposed for tests and
//! diagnostics.

use crate::constants::*;
use crate::random::{jittered, uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookDirection {
    Left,
    Right,
    #[default]
    None,
}

impl LookDirection {
    /// Yaw sign: left is positive (counter-clockwise seen from above).
    pub fn sign(self) -> f32 {
        match self {
            LookDirection::Left => 1.0,
            LookDirection::Right => -1.0,
            LookDirection::None => 0.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            LookDirection::Left => LookDirection::Right,
            LookDirection::Right => LookDirection::Left,
            LookDirection::None => LookDirection::None,
        }
    }
}

/// How the next turn direction is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPolicy {
    #[default]
    Alternate,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GazePhase {
    Idle,
    Turning,
    Holding,
    Returning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GazeTransition {
    pub from: GazePhase,
    pub to: GazePhase,
}

pub type GazeTransitions = SmallVec<[GazeTransition; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub idle_base_sec: f32,
    pub idle_jitter_sec: f32,
    pub hold_sec: f32,
    pub return_sec: f32,
    pub yaw_min: f32,
    pub yaw_max: f32,
    pub pitch_max: f32,
    pub policy: TurnPolicy,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            idle_base_sec: GAZE_IDLE_BASE_SEC,
            idle_jitter_sec: GAZE_IDLE_JITTER_SEC,
            hold_sec: GAZE_HOLD_SEC,
            return_sec: GAZE_RETURN_SEC,
            yaw_min: GAZE_YAW_MIN,
            yaw_max: GAZE_YAW_MAX,
            pitch_max: GAZE_PITCH_MAX,
            policy: TurnPolicy::Alternate,
        }
    }
}

impl GazeConfig {
    /// Longest possible idle wait.
    pub fn max_idle_sec(&self) -> f32 {
        self.idle_base_sec + self.idle_jitter_sec.abs()
    }
}

#[derive(Clone, Debug)]
pub struct GazeScheduler {
    config: GazeConfig,
    phase: GazePhase,
    direction: LookDirection,
    last_direction: LookDirection,
    target_yaw: f32,
    target_pitch: f32,
    next_fire_at: f32,
}

impl GazeScheduler {
    /// Start idle at `now`, with the first turn scheduled from `rng`.
    pub fn new<R: Rng + ?Sized>(config: GazeConfig, now: f32, rng: &mut R) -> Self {
        let mut s = Self {
            config,
            phase: GazePhase::Idle,
            direction: LookDirection::None,
            // First alternate turn goes left.
            last_direction: LookDirection::Right,
            target_yaw: 0.0,
            target_pitch: 0.0,
            next_fire_at: now,
        };
        s.schedule_idle(now, rng);
        s
    }

    /// Apply every transition due at `now`. Several may fire in one call when
    /// the clock jumped.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) -> GazeTransitions {
        let mut fired = GazeTransitions::new();
        // Bounded so a huge clock jump cannot spin forever.
        for _ in 0..16 {
            if now < self.next_fire_at {
                break;
            }
            let at = self.next_fire_at;
            match self.phase {
                GazePhase::Idle => {
                    self.begin_turn(rng);
                    fired.push(self.enter(GazePhase::Turning));
                    // Motion is carried by the smoother; turning has no timer.
                    fired.push(self.enter(GazePhase::Holding));
                    self.next_fire_at = at + self.config.hold_sec.max(0.0);
                }
                GazePhase::Turning | GazePhase::Holding => {
                    // Targets stay set until Idle; `aim` heads home meanwhile.
                    fired.push(self.enter(GazePhase::Returning));
                    self.next_fire_at = at + self.config.return_sec.max(0.0);
                }
                GazePhase::Returning => {
                    fired.push(self.enter(GazePhase::Idle));
                    self.direction = LookDirection::None;
                    self.target_yaw = 0.0;
                    self.target_pitch = 0.0;
                    self.schedule_idle(at, rng);
                }
            }
        }
        fired
    }

    fn begin_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let direction = match self.config.policy {
            TurnPolicy::Alternate => self.last_direction.opposite(),
            TurnPolicy::Random => {
                if rng.gen::<bool>() {
                    LookDirection::Left
                } else {
                    LookDirection::Right
                }
            }
        };
        let magnitude = uniform(rng, self.config.yaw_min, self.config.yaw_max);
        self.direction = direction;
        self.last_direction = direction;
        self.target_yaw = direction.sign() * magnitude;
        self.target_pitch = jittered(rng, 0.0, self.config.pitch_max);
        log::debug!(
            "[gaze] turn {:?} yaw={:.3} pitch={:.3}",
            direction,
            self.target_yaw,
            self.target_pitch
        );
    }

    fn schedule_idle<R: Rng + ?Sized>(&mut self, from: f32, rng: &mut R) {
        let wait = jittered(rng, self.config.idle_base_sec, self.config.idle_jitter_sec);
        self.next_fire_at = from + wait.max(0.0);
    }

    fn enter(&mut self, to: GazePhase) -> GazeTransition {
        let t = GazeTransition {
            from: self.phase,
            to,
        };
        self.phase = to;
        t
    }

    /// Push pending timers later by `by` seconds (the character was paused).
    pub fn shift(&mut self, by: f32) {
        self.next_fire_at += by;
    }

    pub fn is_looking(&self) -> bool {
        self.phase != GazePhase::Idle
    }

    pub fn direction(&self) -> LookDirection {
        self.direction
    }

    pub fn phase(&self) -> GazePhase {
        self.phase
    }

    /// Yaw/pitch of the current (or just finished) turn. Zero in Idle.
    pub fn target(&self) -> (f32, f32) {
        (self.target_yaw, self.target_pitch)
    }

    /// Orientation the body should be heading toward: the turn target while
    /// Turning or Holding, straight ahead otherwise.
    pub fn aim(&self) -> (f32, f32) {
        match self.phase {
            GazePhase::Turning | GazePhase::Holding => self.target(),
            GazePhase::Idle | GazePhase::Returning => (0.0, 0.0),
        }
    }

    pub fn next_fire_at(&self) -> f32 {
        self.next_fire_at
    }

    pub fn config(&self) -> &GazeConfig {
        &self.config
    }
}
