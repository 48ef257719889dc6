use kurbo::{ParamCurve, ParamCurveDeriv};

use crate::{
    curve::sampler,
    foundation::core::{CubicBez, Point, Vec2},
    foundation::error::{RetimeError, RetimeResult},
};

// Below this hodograph length the tangent direction is taken from higher derivatives.
const DEGENERATE_DERIV_LEN: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Four control points of one cubic Bezier segment.
pub struct CurveSpec {
    /// Start point.
    pub p0: Point,
    /// First control point.
    pub c1: Point,
    /// Second control point.
    pub c2: Point,
    /// End point.
    pub p1: Point,
}

impl CurveSpec {
    /// Build a curve from its four points.
    pub fn new(p0: Point, c1: Point, c2: Point, p1: Point) -> Self {
        Self { p0, c1, c2, p1 }
    }

    /// Zero-curvature segment from `start` to `end` (`c1 == p0`, `c2 == p1`).
    pub fn straight(start: Point, end: Point) -> Self {
        Self::new(start, start, end, end)
    }

    /// Reject NaN or infinite coordinates.
    pub fn validate(&self) -> RetimeResult<()> {
        for (name, p) in [
            ("p0", self.p0),
            ("c1", self.c1),
            ("c2", self.c2),
            ("p1", self.p1),
        ] {
            if !p.is_finite() {
                return Err(RetimeError::validation(format!(
                    "curve point {name} must be finite, got ({}, {})",
                    p.x, p.y
                )));
            }
        }
        Ok(())
    }

    /// The curve as a kurbo segment.
    pub fn to_cubic(self) -> CubicBez {
        CubicBez::new(self.p0, self.c1, self.c2, self.p1)
    }
}

/// Default endpoints shared by the presets and the baseline line.
///
/// Screen coordinates: y grows downward, so the line ascends from left to right.
pub const DEFAULT_START: Point = Point::new(37.0, 110.0);
/// See [`DEFAULT_START`].
pub const DEFAULT_END: Point = Point::new(1884.0, 37.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Named curves over the default endpoints.
pub enum CurvePreset {
    /// Straight line; produces an identity retiming.
    Linear,
    /// Starts fast, settles into the original pace.
    #[default]
    EaseIn,
    /// S-shaped ease-in/ease-out.
    EaseInOut,
}

impl CurvePreset {
    /// Control points for this preset.
    pub fn spec(self) -> CurveSpec {
        match self {
            Self::Linear => CurveSpec::straight(DEFAULT_START, DEFAULT_END),
            Self::EaseIn => CurveSpec::new(
                DEFAULT_START,
                Point::new(127.0, 20.0),
                DEFAULT_END,
                DEFAULT_END,
            ),
            Self::EaseInOut => CurveSpec::new(
                DEFAULT_START,
                Point::new(117.0, 4.0),
                Point::new(1775.0, 162.0),
                DEFAULT_END,
            ),
        }
    }

    /// Parse a preset name (`linear`, `ease-in`, `ease_in_out`, ...).
    pub fn parse(name: &str) -> RetimeResult<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "linear" => Ok(Self::Linear),
            "ease_in" => Ok(Self::EaseIn),
            "ease_in_out" => Ok(Self::EaseInOut),
            other => Err(RetimeError::validation(format!(
                "unknown curve preset '{other}'"
            ))),
        }
    }
}

/// Active Bezier curve plus the baseline angle fixed at construction.
#[derive(Clone, Debug)]
pub struct CurveModel {
    spec: CurveSpec,
    path: CubicBez,
    baseline_angle: f64,
}

impl CurveModel {
    /// Calibrate against the straight line `start -> end`.
    ///
    /// The baseline angle is the unit that converts angle deltas into frame deltas; a zero or
    /// non-finite value is rejected here so it never reaches the planner.
    pub fn new(start: Point, end: Point) -> RetimeResult<Self> {
        let spec = CurveSpec::straight(start, end);
        spec.validate()?;
        let path = spec.to_cubic();

        let raw = sampler::sample_raw(&|t| tangent_slope(&path, t));
        let baseline_angle = raw.last().map(|a| a.abs()).unwrap_or(0.0);
        if !baseline_angle.is_finite() || baseline_angle == 0.0 {
            return Err(RetimeError::curve(format!(
                "baseline angle of line ({}, {}) -> ({}, {}) is {baseline_angle}; \
                 a horizontal or zero-length baseline cannot calibrate frame deltas",
                start.x, start.y, end.x, end.y
            )));
        }

        tracing::debug!(baseline_angle, "curve model calibrated");
        Ok(Self {
            spec,
            path,
            baseline_angle,
        })
    }

    /// Replace the active curve. The baseline angle is kept.
    pub fn set_curve(&mut self, spec: CurveSpec) -> RetimeResult<()> {
        spec.validate()?;
        self.spec = spec;
        self.path = spec.to_cubic();
        Ok(())
    }

    /// Currently active control points.
    pub fn spec(&self) -> CurveSpec {
        self.spec
    }

    /// Baseline angle in degrees (non-negative, non-zero).
    pub fn baseline_angle(&self) -> f64 {
        self.baseline_angle
    }

    /// Position on the curve at parametric `t` in `[0, 1]`.
    pub fn evaluate_point(&self, t: f64) -> Point {
        self.path.eval(t.clamp(0.0, 1.0))
    }

    /// Slope `dy/dx` at parametric `t` in `[0, 1]`; `0.0` for vertical or undefined tangents.
    pub fn evaluate_tangent(&self, t: f64) -> f64 {
        tangent_slope(&self.path, t)
    }
}

fn tangent_slope(path: &CubicBez, t: f64) -> f64 {
    let d = tangent_direction(path, t.clamp(0.0, 1.0));
    let slope = d.y / d.x;
    if slope.is_finite() { slope } else { 0.0 }
}

// A control point that coincides with its endpoint zeroes the first derivative there; the
// limiting direction comes from the second derivative, and from the chord when that vanishes too.
fn tangent_direction(path: &CubicBez, t: f64) -> Vec2 {
    let hodograph = path.deriv();
    let d1 = hodograph.eval(t).to_vec2();
    if d1.length() > DEGENERATE_DERIV_LEN {
        return d1;
    }
    let d2 = hodograph.deriv().eval(t).to_vec2();
    if d2.length() > DEGENERATE_DERIV_LEN {
        return d2;
    }
    path.p3 - path.p0
}

#[cfg(test)]
#[path = "../../tests/unit/curve/model.rs"]
mod tests;
