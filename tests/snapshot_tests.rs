// Host-side tests for the snapshot helpers of the browser binding.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod snapshot {
    include!("../src/snapshot.rs");
}

use blob_core::{CharacterConfig, FrameInput, Stage};
use constants::*;
use glam::Vec2;
use snapshot::*;

fn ticked_stage() -> (Stage, Vec<blob_core::StagedFrame>) {
    let mut stage = Stage::new(CharacterConfig::primary()).unwrap();
    let frames = stage.tick(FrameInput::new(0.0, 1.0 / 60.0, Vec2::ZERO));
    (stage, frames)
}

#[test]
fn flattened_vertices_interleave_position_and_normal() {
    let (stage, _) = ticked_stage();
    let c = stage.visible_character(0).unwrap();
    let flat = flatten_vertices(c.vertices());
    assert_eq!(flat.len(), c.vertices().len() * FLOATS_PER_VERTEX);
    let v = c.vertices()[5];
    assert_eq!(&flat[30..33], &v.position);
    assert_eq!(&flat[33..36], &v.normal);
}

#[test]
fn flattening_an_empty_buffer_is_empty() {
    assert!(flatten_vertices(&[]).is_empty());
}

#[test]
fn snapshot_references_every_visible_frame() {
    let (stage, frames) = ticked_stage();
    let snap = StageSnapshot {
        competing_ui_open: stage.competing_ui_open(),
        characters: &frames,
    };
    assert!(!snap.competing_ui_open);
    assert_eq!(snap.characters.len(), stage.visible_count());
}
