pub use kurbo::{CubicBez, Point, Vec2};

/// Tie-breaking policy used when a fractional frame delta is rounded to whole frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// `2.5 -> 3`, `-2.5 -> -3`.
    #[default]
    HalfAwayFromZero,
    /// `2.5 -> 2`, `3.5 -> 4`, `-2.5 -> -2`.
    HalfEven,
}

impl RoundingMode {
    /// Round `v` to the nearest integer under this policy, saturating at the `i32` range.
    ///
    /// Non-finite input rounds to `0`.
    pub fn round(self, v: f64) -> i32 {
        if !v.is_finite() {
            return 0;
        }
        let r = match self {
            Self::HalfAwayFromZero => v.round(),
            Self::HalfEven => v.round_ties_even(),
        };
        r as i32
    }
}

/// Clamp `idx` into `[0, len - 1]`. `len` must be non-zero.
pub(crate) fn clamp_index(idx: usize, len: usize) -> usize {
    debug_assert!(len > 0, "clamp_index on empty range");
    idx.min(len.saturating_sub(1))
}
