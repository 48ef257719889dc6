use std::{fs::File, io::BufReader, path::Path};

use crate::{
    curve::model::{CurvePreset, CurveSpec, DEFAULT_END, DEFAULT_START},
    foundation::core::{Point, RoundingMode},
    foundation::error::{RetimeError, RetimeResult},
    retime::assign::ExtendMode,
};

/// Playback cadence used when a config does not set one.
pub const DEFAULT_INTERVAL_MS: u64 = 35;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Curve to deploy: a preset name or explicit control points.
pub enum CurveSelection {
    /// Named preset.
    Preset(CurvePreset),
    /// Explicit `{p0, c1, c2, p1}`.
    Custom(CurveSpec),
}

impl Default for CurveSelection {
    fn default() -> Self {
        Self::Preset(CurvePreset::default())
    }
}

impl CurveSelection {
    /// Resolve to control points.
    pub fn spec(&self) -> CurveSpec {
        match self {
            Self::Preset(p) => p.spec(),
            Self::Custom(s) => *s,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Endpoints of the straight line that calibrates the baseline angle.
pub struct BaselineLine {
    /// Line start.
    pub start: Point,
    /// Line end.
    pub end: Point,
}

impl Default for BaselineLine {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Where numbered source images live.
pub struct FrameSource {
    /// Directory, relative to the config file.
    pub dir: String,
    /// File name pattern; `{index}` is replaced by the frame number.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    "{index}.png".to_string()
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// JSON-facing configuration of a retiming run.
pub struct RetimeConfig {
    /// Frames in the sequence.
    pub frame_count: usize,
    /// Curve to deploy.
    #[serde(default)]
    pub curve: CurveSelection,
    /// Calibration line.
    #[serde(default)]
    pub baseline: BaselineLine,
    /// Fill behavior for extends.
    #[serde(default)]
    pub extend_mode: ExtendMode,
    /// Instruction rounding.
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Source images, if the run loads any.
    #[serde(default)]
    pub frames: Option<FrameSource>,
    /// Playback cadence in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl RetimeConfig {
    /// Config with defaults for `frame_count` frames.
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            curve: CurveSelection::default(),
            baseline: BaselineLine::default(),
            extend_mode: ExtendMode::default(),
            rounding: RoundingMode::default(),
            frames: None,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }

    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RetimeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RetimeError::serde(format!("parse retime config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RetimeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RetimeError::validation(format!("open retime config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> RetimeResult<()> {
        if self.frame_count == 0 {
            return Err(RetimeError::validation("frame_count must be > 0"));
        }
        if self.interval_ms == 0 {
            return Err(RetimeError::validation("interval_ms must be > 0"));
        }
        self.curve.spec().validate()?;
        if let Some(src) = &self.frames {
            if src.dir.trim().is_empty() {
                return Err(RetimeError::validation("frames.dir must be non-empty"));
            }
            if !src.pattern.contains("{index}") {
                return Err(RetimeError::validation(
                    "frames.pattern must contain '{index}'",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
