use super::*;
use crate::curve::sampler::normalize;

fn profile(angles: &[f64]) -> AngleProfile {
    normalize(angles.iter().map(|a| -a).collect(), 1.0)
}

fn values(plan: &RetimePlan) -> Vec<i32> {
    plan.instructions.iter().map(|i| i.value()).collect()
}

#[test]
fn flat_profile_at_baseline_is_identity() {
    let p = profile(&[2.0; 101]);
    let plan = plan(&p, 2.0, 142, RoundingMode::default()).unwrap();
    assert_eq!(plan.len(), 142);
    assert!(plan.is_identity());
}

#[test]
fn first_step_is_measured_against_baseline() {
    let p = profile(&[6.0, 2.0, 2.0, 7.0, 2.0]);
    let out = plan(&p, 2.0, 5, RoundingMode::HalfAwayFromZero).unwrap();
    assert_eq!(values(&out), vec![2, -2, 0, 3, -3]);
    assert_eq!(out.sample_indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn half_even_breaks_ties_toward_even() {
    let p = profile(&[6.0, 2.0, 2.0, 7.0, 2.0]);
    let out = plan(&p, 2.0, 5, RoundingMode::HalfEven).unwrap();
    assert_eq!(values(&out), vec![2, -2, 0, 2, -2]);
}

#[test]
fn sample_index_rescale_clamps_and_tracks_previous() {
    let p = profile(&[1.0, 3.0, 9.0]);
    let out = plan(&p, 1.0, 6, RoundingMode::default()).unwrap();
    // scale 0.5: 0, 0.5, 1, 1.5, 2, 2.5 -> round half away, last one clamped from 3 to 2
    assert_eq!(out.sample_indices, vec![0, 1, 1, 2, 2, 2]);
    assert_eq!(values(&out), vec![0, 2, 0, 6, 0, 0]);
}

#[test]
fn default_resolution_maps_onto_original_frame_count() {
    let p = profile(&[1.0; 101]);
    let out = plan(&p, 1.0, 142, RoundingMode::default()).unwrap();
    assert_eq!(out.sample_indices[0], 0);
    assert_eq!(out.sample_indices[141], 100);
    assert!(out.sample_indices.windows(2).all(|w| w[0] <= w[1]));
    assert!(out.sample_indices.iter().all(|i| *i < 101));
}

#[test]
fn invalid_inputs_are_rejected() {
    let p = profile(&[1.0; 4]);
    assert!(matches!(
        plan(&p, 1.0, 0, RoundingMode::default()).unwrap_err(),
        RetimeError::Validation(_)
    ));
    assert!(matches!(
        plan(&p, 0.0, 4, RoundingMode::default()).unwrap_err(),
        RetimeError::Curve(_)
    ));
    assert!(matches!(
        plan(&p, f64::NAN, 4, RoundingMode::default()).unwrap_err(),
        RetimeError::Curve(_)
    ));
    assert!(plan(&profile(&[]), 1.0, 4, RoundingMode::default()).is_err());
}

#[test]
fn instruction_kinds_follow_sign() {
    assert_eq!(Instruction(4).kind(), InstructionKind::Jump(4));
    assert_eq!(Instruction(-3).kind(), InstructionKind::Extend(3));
    assert_eq!(Instruction(0).kind(), InstructionKind::Advance);
    assert_eq!(Instruction(i32::MIN).kind(), InstructionKind::Extend(1 << 31));
}

#[test]
fn instructions_serialize_as_plain_integers() {
    let json = serde_json::to_string(&vec![Instruction(3), Instruction(-1)]).unwrap();
    assert_eq!(json, "[3,-1]");
}
