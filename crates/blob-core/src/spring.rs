//! Damped springs and the director that sequences them.
//!
//! Each named channel carries one scalar spring plus an optional cyclic loop
//! program and an optional one-shot program. Programs are explicit step lists
//! advanced when the spring settles, so a one-shot only perturbs the shared
//! spring and never moves the loop's step index.

use crate::constants::{
    SPRING_MAX_FRAME_SEC, SPRING_MAX_STEP_SEC, SPRING_SETTLE_EPSILON, SPRING_SETTLE_VELOCITY,
};
use crate::error::{BlobError, Result};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// Defaults for channels that have not been given a step yet.
const DEFAULT_TENSION: f32 = 170.0;
const DEFAULT_FRICTION: f32 = 26.0;

/// One entry of a spring program: where to go and how stiffly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringStep {
    pub target: f32,
    pub tension: f32,
    pub friction: f32,
}

impl SpringStep {
    pub const fn new(target: f32, tension: f32, friction: f32) -> Self {
        Self {
            target,
            tension,
            friction,
        }
    }
}

impl From<(f32, f32, f32)> for SpringStep {
    fn from((target, tension, friction): (f32, f32, f32)) -> Self {
        Self::new(target, tension, friction)
    }
}

/// Single damped spring for one scalar.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringChannel {
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
    pub tension: f32,
    pub friction: f32,
}

impl SpringChannel {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            target: initial,
            tension: DEFAULT_TENSION,
            friction: DEFAULT_FRICTION,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Retarget and re-parameterize mid-flight; value and velocity carry over.
    pub fn apply(&mut self, step: SpringStep) {
        self.target = step.target;
        self.tension = step.tension;
        self.friction = step.friction;
    }

    /// One semi-implicit Euler step.
    #[inline]
    pub fn step(&mut self, dt_sec: f32) {
        let acceleration = self.tension * (self.target - self.value) - self.friction * self.velocity;
        self.velocity += acceleration * dt_sec;
        self.value += self.velocity * dt_sec;
        if !(self.value.is_finite() && self.velocity.is_finite()) {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < SPRING_SETTLE_EPSILON
            && self.velocity.abs() < SPRING_SETTLE_VELOCITY
    }

    fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }
}

/// What a one-shot program does once its last step settles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnComplete {
    /// Stay at the final target; the loop program waits for `resume_loop`.
    Hold,
    /// Hand the channel back to its loop program at the step it was on.
    #[default]
    Resume,
}

type Steps = SmallVec<[SpringStep; 4]>;

#[derive(Clone, Debug)]
struct Program {
    steps: Steps,
    index: usize,
}

impl Program {
    fn current(&self) -> SpringStep {
        self.steps[self.index]
    }
}

#[derive(Clone, Debug)]
struct OneShot {
    program: Program,
    on_complete: OnComplete,
}

#[derive(Clone, Debug)]
struct Slot {
    spring: SpringChannel,
    looping: Option<Program>,
    one_shot: Option<OneShot>,
    held: bool,
}

impl Slot {
    fn after_substep(&mut self) {
        if !self.spring.is_settled() {
            return;
        }
        if let Some(shot) = self.one_shot.as_mut() {
            self.spring.snap();
            shot.program.index += 1;
            if shot.program.index < shot.program.steps.len() {
                self.spring.apply(shot.program.current());
                return;
            }
            let on_complete = shot.on_complete;
            self.one_shot = None;
            match on_complete {
                OnComplete::Hold => self.held = true,
                OnComplete::Resume => {
                    if let Some(program) = &self.looping {
                        self.spring.apply(program.current());
                    }
                }
            }
            return;
        }
        if self.held {
            return;
        }
        if let Some(program) = self.looping.as_mut() {
            if program.steps.len() > 1 {
                self.spring.snap();
                program.index = (program.index + 1) % program.steps.len();
                self.spring.apply(program.current());
            }
        }
    }
}

/// Owns the named spring channels and advances them once per frame.
#[derive(Clone, Debug, Default)]
pub struct SpringDirector {
    slots: FnvHashMap<String, Slot>,
}

impl SpringDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_channel(&mut self, name: &str, initial: f32) -> Result<()> {
        if self.slots.contains_key(name) {
            return Err(BlobError::DuplicateChannel(name.to_string()));
        }
        self.slots.insert(
            name.to_string(),
            Slot {
                spring: SpringChannel::new(initial),
                looping: None,
                one_shot: None,
                held: false,
            },
        );
        Ok(())
    }

    /// Install a cyclic program. Each step runs until the channel settles.
    /// A running one-shot keeps control until it completes.
    pub fn run_loop(&mut self, name: &str, steps: &[SpringStep]) -> Result<()> {
        if steps.is_empty() {
            return Err(BlobError::EmptySequence(name.to_string()));
        }
        let slot = self.slot_mut(name)?;
        let program = Program {
            steps: steps.iter().copied().collect(),
            index: 0,
        };
        if slot.one_shot.is_none() {
            slot.spring.apply(program.current());
        }
        slot.looping = Some(program);
        slot.held = false;
        Ok(())
    }

    /// Install a finite program, interrupting the loop (last write wins).
    pub fn play_once(
        &mut self,
        name: &str,
        steps: &[SpringStep],
        on_complete: OnComplete,
    ) -> Result<()> {
        if steps.is_empty() {
            return Err(BlobError::EmptySequence(name.to_string()));
        }
        let slot = self.slot_mut(name)?;
        let program = Program {
            steps: steps.iter().copied().collect(),
            index: 0,
        };
        slot.spring.apply(program.current());
        slot.one_shot = Some(OneShot {
            program,
            on_complete,
        });
        slot.held = false;
        Ok(())
    }

    /// Jump to `from` and spring to `to`, then resume the loop program.
    /// Retriggering before the previous one-shot settles restarts it.
    pub fn trigger(
        &mut self,
        name: &str,
        from: f32,
        to: f32,
        tension: f32,
        friction: f32,
    ) -> Result<()> {
        self.play_once(
            name,
            &[SpringStep::new(to, tension, friction)],
            OnComplete::Resume,
        )?;
        let slot = self.slot_mut(name)?;
        slot.spring.value = from;
        slot.spring.velocity = 0.0;
        Ok(())
    }

    /// Release a channel held by a completed `OnComplete::Hold` program.
    pub fn resume_loop(&mut self, name: &str) -> Result<()> {
        let slot = self.slot_mut(name)?;
        slot.held = false;
        if slot.one_shot.is_none() {
            if let Some(program) = &slot.looping {
                slot.spring.apply(program.current());
            }
        }
        Ok(())
    }

    /// Integrate every channel by `dt_sec`, in fixed sub-steps.
    pub fn advance(&mut self, dt_sec: f32) {
        if dt_sec.is_nan() || dt_sec <= 0.0 {
            return;
        }
        let dt = dt_sec.min(SPRING_MAX_FRAME_SEC);
        let substeps = (dt / SPRING_MAX_STEP_SEC).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        for slot in self.slots.values_mut() {
            for _ in 0..substeps {
                slot.spring.step(h);
                slot.after_substep();
            }
        }
    }

    pub fn value(&self, name: &str) -> Option<f32> {
        self.slots.get(name).map(|s| s.spring.value)
    }

    pub fn channel(&self, name: &str) -> Option<&SpringChannel> {
        self.slots.get(name).map(|s| &s.spring)
    }

    /// Current step of the loop program, if one is installed.
    pub fn loop_index(&self, name: &str) -> Option<usize> {
        self.slots
            .get(name)
            .and_then(|s| s.looping.as_ref())
            .map(|p| p.index)
    }

    pub fn is_one_shot_active(&self, name: &str) -> bool {
        self.slots
            .get(name)
            .map(|s| s.one_shot.is_some())
            .unwrap_or(false)
    }

    pub fn is_held(&self, name: &str) -> bool {
        self.slots.get(name).map(|s| s.held).unwrap_or(false)
    }

    pub fn channel_count(&self) -> usize {
        self.slots.len()
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut Slot> {
        self.slots
            .get_mut(name)
            .ok_or_else(|| BlobError::UnknownChannel(name.to_string()))
    }
}
