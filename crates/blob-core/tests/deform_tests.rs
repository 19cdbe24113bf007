use blob_core::deform::{displacement_factor, BaselineBuffer};
use blob_core::{
    BaseMesh, DeformationEngine, DetailLevel, DisplacementParams, ImpactEnergy, NoiseField,
};
use glam::Vec3;

fn engine(detail: DetailLevel) -> DeformationEngine {
    DeformationEngine::new(detail, DisplacementParams::default(), NoiseField::default())
}

fn radii(engine: &DeformationEngine) -> Vec<f32> {
    engine
        .vertices()
        .iter()
        .map(|v| Vec3::from_array(v.position).length())
        .collect()
}

#[test]
fn icosphere_vertex_counts_per_detail() {
    let rough = BaseMesh::icosphere(DetailLevel::Rough);
    assert_eq!(rough.vertex_count(), 162);
    assert_eq!(rough.triangle_count(), 320);
    let smooth = BaseMesh::icosphere(DetailLevel::Smooth);
    assert_eq!(smooth.vertex_count(), 2562);
    assert_eq!(smooth.triangle_count(), 5120);
    for p in rough.positions() {
        assert!((p.length() - 1.0).abs() < 1e-5, "vertex off the unit sphere");
    }
}

#[test]
fn detail_level_parses_and_rejects_unknown() {
    assert_eq!("rough".parse::<DetailLevel>().ok(), Some(DetailLevel::Rough));
    assert_eq!(" Smooth ".parse::<DetailLevel>().ok(), Some(DetailLevel::Smooth));
    assert!("glossy".parse::<DetailLevel>().is_err());
    assert_eq!(DetailLevel::Smooth.to_string(), "smooth");
}

#[test]
fn resting_frame_is_bounded_by_ambient_amplitude() {
    let mut e = engine(DetailLevel::Rough);
    let amp = DisplacementParams::default().amplitude;
    for &t in &[0.0_f32, 0.5, 3.25, 17.0, 120.0] {
        e.compute_frame(t, 0.0);
        for r in radii(&e) {
            assert!(
                r >= 1.0 - amp - 1e-4 && r <= 1.0 + amp + 1e-4,
                "radius {r} outside ambient bound at t={t}"
            );
        }
    }
}

#[test]
fn impact_frame_is_bounded_by_effective_amplitude_plus_ripple() {
    let mut e = engine(DetailLevel::Rough);
    let fx = DisplacementParams::default().effective(1.0);
    let bound = fx.max_offset();
    for i in 0..20 {
        let t = i as f32 * 0.37;
        e.compute_frame(t, 1.0);
        for r in radii(&e) {
            assert!(
                (r - 1.0).abs() <= bound + 1e-4,
                "radius {r} exceeds {bound} at t={t}"
            );
        }
    }
}

#[test]
fn zero_impact_has_no_ripple() {
    let fx = DisplacementParams::default().effective(0.0);
    assert_eq!(fx.ripple, 0.0);
    let hit = DisplacementParams::default().effective(1.0);
    assert!(hit.ripple > 0.0);
}

#[test]
fn impact_lowers_frequency_and_raises_amplitude() {
    let params = DisplacementParams::default();
    let base = params.effective(0.0);
    let hit = params.effective(1.0);
    let half = params.effective(0.5);
    assert!(hit.frequency < base.frequency);
    assert!(hit.amplitude > base.amplitude);
    assert!(half.frequency < base.frequency && half.frequency > hit.frequency);
    assert_eq!(base.frequency, params.frequency);
    assert_eq!(base.amplitude, params.amplitude);
}

#[test]
fn impact_energy_decays_geometrically_and_resets_to_one() {
    let mut impact = ImpactEnergy::default();
    assert_eq!(impact.value(), 0.0);
    impact.hit();
    assert_eq!(impact.value(), 1.0);
    for _ in 0..10 {
        impact.decay(1.0 / 60.0);
    }
    let expected = impact.decay_per_frame().powi(10);
    assert!((impact.value() - expected).abs() < 1e-4, "{} vs {expected}", impact.value());
    impact.hit();
    assert_eq!(impact.value(), 1.0, "a new hit resets exactly regardless of prior value");
}

#[test]
fn impact_energy_is_small_two_seconds_after_a_hit() {
    let mut impact = ImpactEnergy::default();
    impact.hit();
    for _ in 0..120 {
        impact.decay(1.0 / 60.0);
    }
    assert!(impact.value() < 0.05);
}

#[test]
fn impact_decay_is_frame_rate_independent() {
    let mut at60 = ImpactEnergy::default();
    let mut at30 = ImpactEnergy::default();
    at60.hit();
    at30.hit();
    for _ in 0..60 {
        at60.decay(1.0 / 60.0);
    }
    for _ in 0..30 {
        at30.decay(1.0 / 30.0);
    }
    assert!((at60.value() - at30.value()).abs() < 1e-4);
}

#[test]
fn baseline_is_captured_lazily_on_first_frame() {
    let mut e = engine(DetailLevel::Rough);
    assert!(!e.has_baseline());
    assert!(e.vertices().is_empty());
    e.compute_frame(0.0, 0.0);
    assert!(e.has_baseline());
    assert_eq!(e.vertices().len(), 162);
}

#[test]
fn detail_swap_discards_and_recaptures_baseline() {
    let mut e = engine(DetailLevel::Rough);
    e.compute_frame(1.0, 0.0);
    assert_eq!(e.baseline().map(BaselineBuffer::len), Some(162));

    e.set_detail(DetailLevel::Smooth);
    assert_eq!(
        e.baseline().map(BaselineBuffer::len),
        Some(2562),
        "swap must recapture from the new mesh"
    );
    assert_eq!(e.vertices().len(), 2562);
    let verts = e.compute_frame(1.1, 0.3).len();
    assert_eq!(verts, 2562);
    assert_eq!(e.baseline().map(BaselineBuffer::len), Some(2562));

    e.set_detail(DetailLevel::Rough);
    assert_eq!(e.compute_frame(1.2, 0.0).len(), 162);
}

#[test]
fn detail_swap_before_any_frame_leaves_buffer_empty() {
    let mut e = engine(DetailLevel::Rough);
    e.set_detail(DetailLevel::Smooth);
    assert!(!e.has_baseline());
    assert!(e.vertices().is_empty());
    assert_eq!(e.compute_frame(0.0, 0.0).len(), 2562);
}

#[test]
fn setting_same_detail_keeps_baseline() {
    let mut e = engine(DetailLevel::Rough);
    e.compute_frame(0.0, 0.0);
    e.set_detail(DetailLevel::Rough);
    assert!(e.has_baseline());
}

#[test]
fn degenerate_vertex_stays_put_without_poisoning_mesh() {
    let positions = vec![
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ];
    let indices = vec![0, 1, 2, 1, 2, 3, 0, 3, 1];
    let mesh = BaseMesh::from_parts(DetailLevel::Rough, positions, indices);
    let mut e =
        DeformationEngine::with_mesh(mesh, DisplacementParams::default(), NoiseField::default());
    let out = e.compute_frame(2.0, 1.0);
    assert_eq!(out[0].position, [0.0, 0.0, 0.0]);
    for v in out {
        assert!(v.position.iter().all(|c| c.is_finite()), "NaN leaked into position");
        assert!(v.normal.iter().all(|c| c.is_finite()), "NaN leaked into normal");
    }
}

#[test]
fn normals_are_unit_length_after_deformation() {
    let mut e = engine(DetailLevel::Rough);
    e.compute_frame(4.0, 1.0);
    for v in e.vertices() {
        let n = Vec3::from_array(v.normal).length();
        assert!((n - 1.0).abs() < 1e-3, "normal length {n}");
    }
}

#[test]
fn normals_point_outward_on_the_sphere() {
    let mut e = engine(DetailLevel::Rough);
    e.compute_frame(0.0, 0.0);
    for v in e.vertices() {
        let p = Vec3::from_array(v.position).normalize();
        let n = Vec3::from_array(v.normal);
        assert!(p.dot(n) > 0.5, "normal points inward");
    }
}

#[test]
fn frames_are_deterministic_for_same_inputs() {
    let mut a = engine(DetailLevel::Rough);
    let mut b = engine(DetailLevel::Rough);
    assert_eq!(a.compute_frame(3.3, 0.4), b.compute_frame(3.3, 0.4));
}

#[test]
fn factor_is_one_with_zero_amplitude_and_ripple() {
    let params = DisplacementParams {
        amplitude: 0.0,
        ripple_max: 0.0,
        ..DisplacementParams::default()
    };
    let fx = params.effective(1.0);
    let noise = NoiseField::default();
    let f = displacement_factor(&noise, Vec3::Y, 2.0, &fx);
    assert_eq!(f, 1.0);
}

#[test]
fn vertex_buffer_casts_to_bytes() {
    let mut e = engine(DetailLevel::Rough);
    e.compute_frame(0.0, 0.0);
    let bytes: &[u8] = bytemuck::cast_slice(e.vertices());
    assert_eq!(bytes.len(), 162 * 24);
}
