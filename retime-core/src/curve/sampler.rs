use crate::{curve::model::CurveModel, foundation::math::slope_to_degrees};

/// Number of uniform parametric samples taken along the curve (`t = 0.00 ..= 1.00`).
///
/// Independent of the frame count; the planner rescales between the two index spaces.
pub const SAMPLE_COUNT: usize = 101;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Normalized tangent angles in degrees, one per parametric sample. Every value is `>= 0`.
pub struct AngleProfile {
    angles: Vec<f64>,
}

impl AngleProfile {
    /// Angles in sample order.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// `true` when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Angle at sample `i`.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.angles.get(i).copied()
    }
}

/// Parametric position of sample `i`.
pub fn sample_t(i: usize) -> f64 {
    i as f64 / (SAMPLE_COUNT - 1) as f64
}

/// Sample the tangent angle of `model`'s active curve and normalize it.
pub fn sample_profile(model: &CurveModel) -> AngleProfile {
    let raw = sample_raw(&|t| model.evaluate_tangent(t));
    normalize(raw, model.baseline_angle())
}

/// Raw signed angles in degrees for every sample.
pub(crate) fn sample_raw(slope_at: &dyn Fn(f64) -> f64) -> Vec<f64> {
    (0..SAMPLE_COUNT)
        .map(|i| slope_to_degrees(slope_at(sample_t(i))))
        .collect()
}

/// Fold raw angles into the non-negative progress axis.
///
/// Screen y grows downward, so an ascending curve yields negative raw angles. A positive raw angle
/// means the curve dips back down; it is replaced by `baseline` instead of being mirrored.
pub fn normalize(raw: Vec<f64>, baseline: f64) -> AngleProfile {
    let mut anomalies = 0usize;
    let angles = raw
        .into_iter()
        .map(|a| {
            if a > 0.0 {
                anomalies += 1;
                baseline
            } else {
                a.abs()
            }
        })
        .collect();

    if anomalies > 0 {
        tracing::warn!(
            anomalies,
            baseline,
            "unexpected positive tangent angles replaced by the baseline angle"
        );
    }
    AngleProfile { angles }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/sampler.rs"]
mod tests;
