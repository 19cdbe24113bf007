//! Noise-driven surface deformation of the blob body.
//!
//! Every frame each base vertex is pushed along its own direction by ambient
//! noise plus a traveling ripple that only exists right after a click.

use crate::constants::*;
use crate::mesh::{recompute_normals, BaseMesh, BlobVertex, DetailLevel};
use crate::noise_field::NoiseField;
use crate::smoothing::per_frame_retain;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Baseline displacement parameters plus how a click modifies them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplacementParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub time_speed: f32,
    pub frequency_drop: f32,
    pub amplitude_gain: f32,
    pub ripple_max: f32,
    pub ripple_wavenumber: f32,
    pub ripple_speed: f32,
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            frequency: NOISE_FREQUENCY,
            amplitude: NOISE_AMPLITUDE,
            time_speed: NOISE_TIME_SPEED,
            frequency_drop: IMPACT_FREQUENCY_DROP,
            amplitude_gain: IMPACT_AMPLITUDE_GAIN,
            ripple_max: RIPPLE_MAX,
            ripple_wavenumber: RIPPLE_WAVENUMBER,
            ripple_speed: RIPPLE_SPEED,
        }
    }
}

/// Parameters actually used for one frame after applying impact energy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveDisplacement {
    pub frequency: f32,
    pub amplitude: f32,
    pub time_speed: f32,
    pub ripple: f32,
    pub ripple_wavenumber: f32,
    pub ripple_speed: f32,
}

impl EffectiveDisplacement {
    /// Largest relative radius change this frame can produce.
    pub fn max_offset(&self) -> f32 {
        self.amplitude.abs() + self.ripple.abs()
    }
}

impl DisplacementParams {
    /// Softer, bigger wobble as `impact` rises toward 1.
    pub fn effective(&self, impact: f32) -> EffectiveDisplacement {
        let impact = impact.clamp(0.0, 1.0);
        EffectiveDisplacement {
            frequency: self.frequency * (1.0 - self.frequency_drop * impact).max(0.0),
            amplitude: self.amplitude * (1.0 + self.amplitude_gain * impact),
            time_speed: self.time_speed,
            ripple: self.ripple_max * impact,
            ripple_wavenumber: self.ripple_wavenumber,
            ripple_speed: self.ripple_speed,
        }
    }
}

/// Residual energy from the last click; decays geometrically per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactEnergy {
    value: f32,
    decay_per_frame: f32,
}

impl ImpactEnergy {
    pub fn new(decay_per_frame: f32) -> Self {
        Self {
            value: 0.0,
            decay_per_frame: decay_per_frame.clamp(0.0, 1.0),
        }
    }

    /// Always resets to exactly 1.0.
    pub fn hit(&mut self) {
        self.value = 1.0;
    }

    pub fn decay(&mut self, dt_sec: f32) {
        self.value *= per_frame_retain(self.decay_per_frame, dt_sec);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn decay_per_frame(&self) -> f32 {
        self.decay_per_frame
    }
}

impl Default for ImpactEnergy {
    fn default() -> Self {
        Self::new(IMPACT_DECAY_PER_FRAME)
    }
}

/// Captured undeformed positions the displacement is applied to.
#[derive(Clone, Debug)]
pub struct BaselineBuffer {
    positions: Vec<Vec3>,
}

impl BaselineBuffer {
    pub fn capture(mesh: &BaseMesh) -> Self {
        Self {
            positions: mesh.positions().to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

/// Radial displacement factor for one vertex direction; `1.0` means untouched.
#[inline]
pub fn displacement_factor(
    noise: &NoiseField,
    dir: Vec3,
    t: f32,
    fx: &EffectiveDisplacement,
) -> f32 {
    let tt = t * fx.time_speed;
    let n = noise.sample(
        dir.x * fx.frequency + tt * NOISE_AXIS_TIME_RATES[0],
        dir.y * fx.frequency + tt * NOISE_AXIS_TIME_RATES[1],
        dir.z * fx.frequency + tt * NOISE_AXIS_TIME_RATES[2],
    );
    let ripple = if fx.ripple != 0.0 {
        fx.ripple * (dir.y * fx.ripple_wavenumber - t * fx.ripple_speed).sin()
    } else {
        0.0
    };
    1.0 + n * fx.amplitude + ripple
}

/// Displace `baseline` into `out`. Returns the number of degenerate vertices,
/// which are copied through undisplaced.
pub fn displace_positions(
    noise: &NoiseField,
    baseline: &[Vec3],
    t: f32,
    fx: &EffectiveDisplacement,
    out: &mut Vec<Vec3>,
) -> usize {
    out.clear();
    out.reserve(baseline.len());
    let mut degenerate = 0;
    for &p in baseline {
        let len = p.length();
        if !(len.is_finite() && len > DEGENERATE_LENGTH) {
            degenerate += 1;
            out.push(if p.is_finite() { p } else { Vec3::ZERO });
            continue;
        }
        let factor = displacement_factor(noise, p / len, t, fx);
        out.push(p * factor);
    }
    degenerate
}

/// Owns the body geometry and its per-frame vertex buffer.
pub struct DeformationEngine {
    noise: NoiseField,
    params: DisplacementParams,
    mesh: BaseMesh,
    baseline: Option<BaselineBuffer>,
    displaced: Vec<Vec3>,
    normals: Vec<Vec3>,
    vertices: Vec<BlobVertex>,
    // Time and impact of the last computed frame.
    last_frame: Option<(f32, f32)>,
    warned_degenerate: bool,
}

impl DeformationEngine {
    pub fn new(detail: DetailLevel, params: DisplacementParams, noise: NoiseField) -> Self {
        Self::with_mesh(BaseMesh::icosphere(detail), params, noise)
    }

    pub fn with_mesh(mesh: BaseMesh, params: DisplacementParams, noise: NoiseField) -> Self {
        Self {
            noise,
            params,
            mesh,
            baseline: None,
            displaced: Vec::new(),
            normals: Vec::new(),
            vertices: Vec::new(),
            last_frame: None,
            warned_degenerate: false,
        }
    }

    /// Replace the geometry. The old baseline is dropped and recaptured from
    /// the new mesh on the next frame.
    pub fn set_detail(&mut self, detail: DetailLevel) {
        if detail == self.mesh.detail() {
            return;
        }
        let mesh = BaseMesh::icosphere(detail);
        log::info!(
            "[deform] detail {} -> {} ({} -> {} vertices)",
            self.mesh.detail(),
            detail,
            self.mesh.vertex_count(),
            mesh.vertex_count()
        );
        self.replace_mesh(mesh);
    }

    /// Swap in `mesh`. If a frame was already out, it is recomputed on the
    /// new mesh at the same time and impact so the vertex buffer always
    /// matches [`Self::mesh`]'s indices.
    pub fn replace_mesh(&mut self, mesh: BaseMesh) {
        self.mesh = mesh;
        self.baseline = None;
        self.warned_degenerate = false;
        match self.last_frame {
            Some((t, impact)) => {
                self.compute_frame(t, impact);
            }
            None => {
                self.displaced.clear();
                self.normals.clear();
                self.vertices.clear();
            }
        }
    }

    /// Compute this frame's vertex buffer from the baseline, time and impact.
    pub fn compute_frame(&mut self, t: f32, impact: f32) -> &[BlobVertex] {
        if let Some(b) = &self.baseline {
            if b.len() != self.mesh.vertex_count() {
                log::warn!(
                    "[deform] stale baseline ({} vertices, mesh has {}); recapturing",
                    b.len(),
                    self.mesh.vertex_count()
                );
                self.baseline = None;
            }
        }
        let mesh = &self.mesh;
        let baseline = self
            .baseline
            .get_or_insert_with(|| BaselineBuffer::capture(mesh));

        let fx = self.params.effective(impact);
        let degenerate =
            displace_positions(&self.noise, &baseline.positions, t, &fx, &mut self.displaced);
        if degenerate > 0 && !self.warned_degenerate {
            log::warn!("[deform] {} degenerate vertices left undisplaced", degenerate);
            self.warned_degenerate = true;
        }

        self.normals.resize(self.displaced.len(), Vec3::ZERO);
        recompute_normals(&self.displaced, mesh.indices(), &mut self.normals);

        self.vertices.clear();
        self.vertices.extend(
            self.displaced
                .iter()
                .zip(&self.normals)
                .map(|(p, n)| BlobVertex {
                    position: p.to_array(),
                    normal: n.to_array(),
                }),
        );
        self.last_frame = Some((t, impact));
        log::trace!("[deform] t={:.3} impact={:.3} verts={}", t, impact, self.vertices.len());
        &self.vertices
    }

    pub fn vertices(&self) -> &[BlobVertex] {
        &self.vertices
    }

    pub fn mesh(&self) -> &BaseMesh {
        &self.mesh
    }

    pub fn detail(&self) -> DetailLevel {
        self.mesh.detail()
    }

    pub fn params(&self) -> &DisplacementParams {
        &self.params
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline(&self) -> Option<&BaselineBuffer> {
        self.baseline.as_ref()
    }
}
