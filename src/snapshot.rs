use crate::constants::FLOATS_PER_VERTEX;
use blob_core::{BlobVertex, StagedFrame};
use serde::Serialize;

/// What `BlobStage::snapshot` hands to JavaScript after each tick.
#[derive(Clone, Debug, Serialize)]
pub struct StageSnapshot<'a> {
    pub competing_ui_open: bool,
    pub characters: &'a [StagedFrame],
}

/// Interleaved `[px, py, pz, nx, ny, nz, ...]` view of a vertex buffer.
pub fn flatten_vertices(vertices: &[BlobVertex]) -> &[f32] {
    let floats: &[f32] = bytemuck::cast_slice(vertices);
    debug_assert_eq!(floats.len(), vertices.len() * FLOATS_PER_VERTEX);
    floats
}
