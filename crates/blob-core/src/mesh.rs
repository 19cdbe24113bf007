//! Base geometry for the blob body and the vertex layout handed to hosts.

use crate::constants::{DEGENERATE_LENGTH, ROUGH_SUBDIVISIONS, SMOOTH_SUBDIVISIONS};
use crate::error::BlobError;
use fnv::FnvHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geometry detail level selected by the host UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    #[default]
    Rough,
    Smooth,
}

impl DetailLevel {
    pub fn subdivisions(self) -> u32 {
        match self {
            DetailLevel::Rough => ROUGH_SUBDIVISIONS,
            DetailLevel::Smooth => SMOOTH_SUBDIVISIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DetailLevel::Rough => "rough",
            DetailLevel::Smooth => "smooth",
        }
    }
}

impl FromStr for DetailLevel {
    type Err = BlobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rough" => Ok(DetailLevel::Rough),
            "smooth" => Ok(DetailLevel::Smooth),
            other => Err(BlobError::UnknownDetail(other.to_string())),
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of the per-frame vertex buffer, laid out for direct upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlobVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Immutable undeformed geometry: positions, unit normals and triangles.
#[derive(Clone, Debug)]
pub struct BaseMesh {
    detail: DetailLevel,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl BaseMesh {
    /// Unit icosphere subdivided according to `detail`.
    pub fn icosphere(detail: DetailLevel) -> Self {
        let (positions, indices) = build_icosphere(detail.subdivisions());
        let normals = positions.iter().map(|p| p.normalize_or_zero()).collect();
        Self {
            detail,
            positions,
            normals,
            indices,
        }
    }

    /// Arbitrary geometry; normals are derived from the triangles.
    pub fn from_parts(detail: DetailLevel, positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut normals = vec![Vec3::ZERO; positions.len()];
        recompute_normals(&positions, &indices, &mut normals);
        Self {
            detail,
            positions,
            normals,
            indices,
        }
    }

    pub fn detail(&self) -> DetailLevel {
        self.detail
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Area-weighted smooth normals. Vertices that touch no valid triangle fall
/// back to their radial direction, or +Y when even that is degenerate.
pub fn recompute_normals(positions: &[Vec3], indices: &[u32], normals: &mut [Vec3]) {
    for n in normals.iter_mut() {
        *n = Vec3::ZERO;
    }
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        // Cross product length is twice the area, which is the weighting we want.
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        if !face.is_finite() {
            continue;
        }
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    for (n, p) in normals.iter_mut().zip(positions) {
        *n = match n.try_normalize() {
            Some(v) => v,
            None if p.length() > DEGENERATE_LENGTH => p.normalize(),
            None => Vec3::Y,
        };
    }
}

fn build_icosphere(subdivisions: u32) -> (Vec<Vec3>, Vec<u32>) {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut positions: Vec<Vec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];

    for _ in 0..subdivisions {
        let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
        let mut next = Vec::with_capacity(indices.len() * 4);
        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let ab = midpoint(&mut positions, &mut midpoints, a, b);
            let bc = midpoint(&mut positions, &mut midpoints, b, c);
            let ca = midpoint(&mut positions, &mut midpoints, c, a);
            next.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
        }
        indices = next;
    }
    (positions, indices)
}

fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut FnvHashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&i) = cache.get(&key) {
        return i;
    }
    let mid = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
    let i = positions.len() as u32;
    positions.push(mid);
    cache.insert(key, i);
    i
}
