use crate::{
    curve::sampler::AngleProfile,
    foundation::core::{RoundingMode, clamp_index},
    foundation::error::{RetimeError, RetimeResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Per-destination-slot directive: `+n` jump ahead, `-n` extend over `n` slots, `0` advance.
pub struct Instruction(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Decoded form of an [`Instruction`].
pub enum InstructionKind {
    /// Move the source pointer `n` frames ahead.
    Jump(usize),
    /// Spread content over `n` consecutive slots.
    Extend(usize),
    /// Advance one slot.
    Advance,
}

impl Instruction {
    /// Raw signed value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Decode the sign convention.
    pub fn kind(self) -> InstructionKind {
        match self.0 {
            0 => InstructionKind::Advance,
            v if v > 0 => InstructionKind::Jump(v.unsigned_abs() as usize),
            v => InstructionKind::Extend(v.unsigned_abs() as usize),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Instructions for one deployment, one per destination frame.
pub struct RetimePlan {
    /// Signed instruction per destination index.
    pub instructions: Vec<Instruction>,
    /// Clamped profile sample consulted for each destination index.
    pub sample_indices: Vec<usize>,
    /// Baseline angle the deltas were divided by.
    pub baseline_angle: f64,
}

impl RetimePlan {
    /// Number of destination frames covered.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// `true` for an empty plan.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// `true` when every instruction is a plain advance.
    pub fn is_identity(&self) -> bool {
        self.instructions.iter().all(|i| i.0 == 0)
    }
}

/// Convert a normalized angle profile into `frame_count` instructions.
///
/// Destination index `i` reads profile sample `round(i * P / N)` (clamped). The first slot is
/// measured against `baseline`, later ones against the previous slot's sample, and every angle
/// delta is expressed in units of `baseline`.
pub fn plan(
    profile: &AngleProfile,
    baseline: f64,
    frame_count: usize,
    rounding: RoundingMode,
) -> RetimeResult<RetimePlan> {
    if frame_count == 0 {
        return Err(RetimeError::validation("frame count must be > 0"));
    }
    if profile.is_empty() {
        return Err(RetimeError::validation("angle profile must be non-empty"));
    }
    if !baseline.is_finite() || baseline == 0.0 {
        return Err(RetimeError::curve(format!(
            "baseline angle must be finite and non-zero, got {baseline}"
        )));
    }

    let angles = profile.angles();
    let sample_count = angles.len();
    let scale_ratio = sample_count as f64 / frame_count as f64;

    let mut instructions = Vec::with_capacity(frame_count);
    let mut sample_indices = Vec::with_capacity(frame_count);
    let mut prev_sample = 0usize;
    for i in 0..frame_count {
        let sample = clamp_index((i as f64 * scale_ratio).round() as usize, sample_count);
        let reference = if i == 0 { baseline } else { angles[prev_sample] };
        let angle_delta = angles[sample] - reference;

        instructions.push(Instruction(rounding.round(angle_delta / baseline)));
        sample_indices.push(sample);
        prev_sample = sample;
    }

    tracing::debug!(
        frame_count,
        sample_count,
        jumps = instructions.iter().filter(|i| i.0 > 0).count(),
        extends = instructions.iter().filter(|i| i.0 < 0).count(),
        "retime plan built"
    );

    Ok(RetimePlan {
        instructions,
        sample_indices,
        baseline_angle: baseline,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/retime/plan.rs"]
mod tests;
