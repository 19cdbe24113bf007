use blob_core::constants::COMPANION_SCALES;
use blob_core::{CharacterConfig, DetailLevel, FrameInput, Role, Stage};
use glam::Vec2;

const FRAME: f32 = 1.0 / 60.0;

fn input(t: f32) -> FrameInput {
    FrameInput::new(t, FRAME, Vec2::ZERO)
}

#[test]
fn default_stage_emits_primary_then_companions() {
    let mut stage = Stage::new(CharacterConfig::primary()).unwrap();
    let frames = stage.tick(input(0.0));
    let roles: Vec<_> = frames.iter().map(|f| f.role).collect();
    assert_eq!(
        roles,
        vec![Role::Primary, Role::Companion(0), Role::Companion(1)]
    );
    assert!(frames[0].frame.face.is_some());
    assert!(frames[1].frame.face.is_none() && frames[2].frame.face.is_none());
    assert_eq!(stage.visible_count(), 3);
    assert_eq!(stage.companions()[1].config().scale, COMPANION_SCALES[1]);
}

#[test]
fn competing_ui_swaps_in_the_mini_mascot() {
    let mut stage = Stage::new(CharacterConfig::primary()).unwrap();
    stage.tick(input(0.0));
    stage.set_competing_ui_open(true);
    let frames = stage.tick(input(FRAME));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].role, Role::Mini);
    assert!(frames[0].frame.face.is_some());
    assert_eq!(stage.visible_count(), 1);
    assert_eq!(stage.visible_character(0).unwrap().detail(), DetailLevel::Smooth);
    assert!(stage.visible_character(1).is_none());
}

#[test]
fn hidden_characters_are_not_advanced() {
    let mut stage = Stage::new(CharacterConfig::primary()).unwrap();
    stage.tick(input(0.0));
    stage.click();
    assert_eq!(stage.primary().impact(), 1.0);

    stage.set_competing_ui_open(true);
    let mut t = 0.0;
    for _ in 0..60 {
        t += FRAME;
        stage.tick(input(t));
    }
    assert_eq!(stage.primary().impact(), 1.0, "primary kept still while hidden");
    assert_eq!(stage.mini().impact(), 0.0);

    stage.click();
    assert_eq!(stage.mini().impact(), 1.0, "click lands on the visible mascot");

    stage.set_competing_ui_open(false);
    stage.tick(input(t + FRAME));
    assert!(stage.primary().impact() < 1.0);
}

#[test]
fn detail_applies_to_primary_and_companions_only() {
    let mut stage = Stage::new(CharacterConfig::primary()).unwrap();
    stage.set_detail(DetailLevel::Smooth);
    stage.tick(input(0.0));
    for c in stage.visible() {
        assert_eq!(c.detail(), DetailLevel::Smooth);
        assert_eq!(c.vertices().len(), 2562);
    }
    stage.set_detail(DetailLevel::Rough);
    assert_eq!(stage.primary().detail(), DetailLevel::Rough);
    assert_eq!(stage.mini().detail(), DetailLevel::Smooth);
}

#[test]
fn invalid_primary_fails_stage_construction() {
    let cfg = CharacterConfig {
        scale: 0.0,
        ..CharacterConfig::primary()
    };
    assert!(Stage::new(cfg).is_err());
}

#[test]
fn mini_shown_late_starts_from_idle() {
    let mut stage = Stage::new(CharacterConfig::primary()).unwrap();
    let mut t = 0.0;
    for _ in 0..(60 * 30) {
        t += FRAME;
        stage.tick(input(t));
    }
    stage.set_competing_ui_open(true);
    let frames = stage.tick(input(t + FRAME));
    assert!(!frames[0].frame.looking, "mini must not replay missed turns");
    assert!(stage.mini().gaze().unwrap().next_fire_at() > t);
}
