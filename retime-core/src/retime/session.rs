use crate::{
    config::model::RetimeConfig,
    curve::model::{CurveModel, CurveSpec, DEFAULT_END, DEFAULT_START},
    curve::sampler::{self, AngleProfile},
    foundation::core::{Point, RoundingMode},
    foundation::error::{RetimeError, RetimeResult},
    retime::assign::{AssignReport, ExtendMode, FrameAssigner},
    retime::frame::{Frame, fingerprint_frames, identity_copies},
    retime::plan::{self, RetimePlan},
};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Construction options for [`RetimeSession`].
pub struct SessionOpts {
    /// Number of frames in both the source and destination sequences.
    pub frame_count: usize,
    /// Start of the straight calibration line.
    pub baseline_start: Point,
    /// End of the straight calibration line.
    pub baseline_end: Point,
    /// Fill behavior for extends.
    pub extend_mode: ExtendMode,
    /// Tie-breaking for instruction rounding.
    pub rounding: RoundingMode,
}

impl SessionOpts {
    /// Defaults for a sequence of `frame_count` frames.
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            baseline_start: DEFAULT_START,
            baseline_end: DEFAULT_END,
            extend_mode: ExtendMode::default(),
            rounding: RoundingMode::default(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Outcome of one deployment.
pub struct DeployReport {
    /// Curve that was deployed.
    pub curve: CurveSpec,
    /// Normalized angle profile of the curve.
    pub profile: AngleProfile,
    /// Instructions applied.
    pub plan: RetimePlan,
    /// Assignment walk bookkeeping.
    pub assign: AssignReport,
    /// [`fingerprint_frames`] of the published destination.
    pub fingerprint: u64,
}

/// Context object for a retiming session: calibrated curve model plus fixed settings.
#[derive(Clone, Debug)]
pub struct RetimeSession {
    model: CurveModel,
    frame_count: usize,
    rounding: RoundingMode,
    assigner: FrameAssigner,
}

impl RetimeSession {
    /// Calibrate a session. Fails if the baseline line cannot produce a usable angle.
    pub fn new(opts: SessionOpts) -> RetimeResult<Self> {
        if opts.frame_count == 0 {
            return Err(RetimeError::validation("frame count must be > 0"));
        }
        let model = CurveModel::new(opts.baseline_start, opts.baseline_end)?;
        Ok(Self {
            model,
            frame_count: opts.frame_count,
            rounding: opts.rounding,
            assigner: FrameAssigner::new(opts.extend_mode),
        })
    }

    /// Build a session from a validated configuration.
    pub fn from_config(cfg: &RetimeConfig) -> RetimeResult<Self> {
        cfg.validate()?;
        Self::new(SessionOpts {
            frame_count: cfg.frame_count,
            baseline_start: cfg.baseline.start,
            baseline_end: cfg.baseline.end,
            extend_mode: cfg.extend_mode,
            rounding: cfg.rounding,
        })
    }

    /// Frame count fixed for this session.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Calibrated baseline angle in degrees.
    pub fn baseline_angle(&self) -> f64 {
        self.model.baseline_angle()
    }

    /// Curve model (active curve and baseline).
    pub fn model(&self) -> &CurveModel {
        &self.model
    }

    /// Install `spec` as the active curve and compute its profile and plan without touching frames.
    #[tracing::instrument(skip(self))]
    pub fn plan(&mut self, spec: CurveSpec) -> RetimeResult<(AngleProfile, RetimePlan)> {
        self.model.set_curve(spec)?;
        let profile = sampler::sample_profile(&self.model);
        let plan = plan::plan(
            &profile,
            self.model.baseline_angle(),
            self.frame_count,
            self.rounding,
        )?;
        Ok((profile, plan))
    }

    /// Retime `dst` from `src` along `spec`.
    ///
    /// Every deployment starts from an identity copy of `src`, so redeploying the same curve gives
    /// the same result. The walk runs on a staging buffer that is copied into `dst` only on
    /// success; each destination keeps its own image buffer.
    #[tracing::instrument(skip(self, src, dst), fields(frames = src.len()))]
    pub fn deploy(
        &mut self,
        spec: CurveSpec,
        src: &[Frame],
        dst: &mut [Frame],
    ) -> RetimeResult<DeployReport> {
        self.check_frames(src, dst)?;
        let (profile, plan) = self.plan(spec)?;

        let mut staged = identity_copies(src);
        let assign = self.assigner.apply(&plan.instructions, src, &mut staged)?;
        let fingerprint = fingerprint_frames(&staged);
        for (slot, frame) in dst.iter_mut().zip(&staged) {
            slot.image.clone_from(&frame.image);
            slot.src_index = frame.src_index;
            slot.delta = frame.delta;
            slot.overwritten = frame.overwritten;
        }

        tracing::debug!(
            copies = assign.copies,
            terminated_early = assign.terminated_early,
            fingerprint,
            "curve deployed"
        );
        Ok(DeployReport {
            curve: spec,
            profile,
            plan,
            assign,
            fingerprint,
        })
    }

    fn check_frames(&self, src: &[Frame], dst: &[Frame]) -> RetimeResult<()> {
        if src.len() != self.frame_count || dst.len() != self.frame_count {
            return Err(RetimeError::validation(format!(
                "session expects {} frames, got {} source and {} destination",
                self.frame_count,
                src.len(),
                dst.len()
            )));
        }
        if let Some(f) = src.iter().enumerate().find(|(i, f)| f.index() != *i) {
            return Err(RetimeError::validation(format!(
                "source frame at position {} carries index {}",
                f.0,
                f.1.index()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/retime/session.rs"]
mod tests;
