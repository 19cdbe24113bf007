use blob_core::constants::{COMPANION_SCALES, MINI_SCALE};
use blob_core::{BlobError, CharacterConfig, DetailLevel, MouthVariant, SpringStep};

fn invalid_field(cfg: &CharacterConfig) -> &'static str {
    match cfg.validate() {
        Err(BlobError::InvalidConfig { field, .. }) => field,
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn presets_validate() {
    CharacterConfig::primary().validate().unwrap();
    CharacterConfig::mini().validate().unwrap();
    CharacterConfig::companion([1.0, 0.0, 0.0], COMPANION_SCALES[0], [0.5; 3])
        .validate()
        .unwrap();
}

#[test]
fn presets_differ_where_expected() {
    let primary = CharacterConfig::primary();
    assert!(primary.face && primary.sparkles_enabled);
    assert_eq!(primary.detail, DetailLevel::Rough);

    let companion = CharacterConfig::companion([2.0, 0.5, -0.5], 0.35, [0.1, 0.2, 0.3]);
    assert!(!companion.face && !companion.sparkles_enabled);
    assert_eq!(companion.scale, 0.35);
    assert_eq!(companion.color, [0.1, 0.2, 0.3]);

    let mini = CharacterConfig::mini();
    assert!(mini.face && !mini.sparkles_enabled);
    assert_eq!(mini.detail, DetailLevel::Smooth);
    assert_eq!(mini.scale, MINI_SCALE);
}

#[test]
fn rejects_non_positive_scale() {
    let cfg = CharacterConfig {
        scale: 0.0,
        ..CharacterConfig::primary()
    };
    assert_eq!(invalid_field(&cfg), "scale");
}

#[test]
fn rejects_empty_or_slack_spring_loops() {
    let mut cfg = CharacterConfig::primary();
    cfg.body.bounce_loop.clear();
    assert_eq!(invalid_field(&cfg), "body.bounce_loop");

    let mut cfg = CharacterConfig::primary();
    cfg.body.squash_loop = vec![SpringStep::new(1.0, 0.0, 10.0)];
    assert_eq!(invalid_field(&cfg), "body.squash_loop");
}

#[test]
fn rejects_decay_outside_unit_interval() {
    let mut cfg = CharacterConfig::primary();
    cfg.body.impact_decay_per_frame = 1.0;
    assert_eq!(invalid_field(&cfg), "body.impact_decay_per_frame");
}

#[test]
fn rejects_inverted_ranges() {
    let mut cfg = CharacterConfig::primary();
    cfg.expression.interval_min_sec = 9.0;
    assert_eq!(invalid_field(&cfg), "expression.interval");

    let mut cfg = CharacterConfig::primary();
    cfg.gaze.yaw_min = 0.8;
    assert_eq!(invalid_field(&cfg), "gaze.yaw");
}

#[test]
fn rejects_weightless_transient_table() {
    let mut cfg = CharacterConfig::primary();
    cfg.expression.transients = vec![(MouthVariant::Excited, 0.0)];
    assert_eq!(invalid_field(&cfg), "expression.transients");
}

#[test]
fn rejects_zero_visible_lines() {
    let mut cfg = CharacterConfig::primary();
    cfg.notifications.visible_lines = 0;
    assert_eq!(invalid_field(&cfg), "notifications.visible_lines");
}

#[test]
fn with_seed_only_changes_seed() {
    let a = CharacterConfig::primary();
    let b = CharacterConfig::primary().with_seed(9);
    assert_eq!(b.seed, 9);
    assert_eq!(CharacterConfig { seed: a.seed, ..b }, a);
}
