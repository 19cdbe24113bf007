//! Animation engine for the blob mascot.
//!
//! Platform-free: hosts call [`Stage::tick`] (or [`Character::tick`]) once per
//! rendered frame with the elapsed and delta time, then upload
//! [`Character::vertices`] and draw the returned transforms and overlays.

pub mod character;
pub mod config;
pub mod constants;
pub mod deform;
pub mod error;
pub mod expression;
pub mod gaze;
pub mod mesh;
pub mod noise_field;
pub mod notifications;
pub mod random;
pub mod smoothing;
pub mod sparkles;
pub mod spring;
pub mod stage;

pub use character::{Character, CharacterFrame, FaceFrame, FrameInput};
pub use config::{BodyConfig, CharacterConfig};
pub use deform::{DeformationEngine, DisplacementParams, ImpactEnergy};
pub use error::{BlobError, Result};
pub use expression::{
    BlinkConfig, BlinkScheduler, EyeVariant, ExpressionConfig, ExpressionScheduler, MouthVariant,
};
pub use gaze::{GazeConfig, GazePhase, GazeScheduler, LookDirection, TurnPolicy};
pub use mesh::{BaseMesh, BlobVertex, DetailLevel};
pub use noise_field::NoiseField;
pub use notifications::{NotificationConfig, NotificationScroller, RenderedLine};
pub use smoothing::OrientationSmoother;
pub use sparkles::{SparkleConfig, SparkleField, SparkleInstance};
pub use spring::{OnComplete, SpringChannel, SpringDirector, SpringStep};
pub use stage::{Role, StagedFrame, Stage};
