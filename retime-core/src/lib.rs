//! Retime a fixed-length animation frame sequence so that constant-rate playback follows the
//! velocity profile of a cubic Bezier easing curve.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: `CurveModel -> AngleProfile` (tangent angle at 101 uniform parametric steps)
//! 2. **Plan**: `AngleProfile + baseline -> RetimePlan` (one jump/extend/advance per frame)
//! 3. **Assign**: `RetimePlan + source frames -> destination frames` (whole-frame copies with
//!    provenance)
//!
//! [`RetimeSession::deploy`] runs all three for one curve and publishes the result atomically.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same curve and source frames always produce the same destination.
//! - **No IO in the core**: images are loaded up front through an [`ImageStore`].
//! - **No blending**: destination slots only ever hold a copy of one whole source frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod curve;
mod foundation;
mod playback;
mod retime;

pub use assets::decode::{decode_frame, encode_png};
pub use assets::store::{
    DirImageStore, ImageStore, MemoryImageStore, frame_name, load_sequence, normalize_rel_path,
};
pub use config::model::{
    BaselineLine, CurveSelection, DEFAULT_INTERVAL_MS, FrameSource, RetimeConfig,
};
pub use curve::model::{CurveModel, CurvePreset, CurveSpec, DEFAULT_END, DEFAULT_START};
pub use curve::sampler::{AngleProfile, SAMPLE_COUNT, normalize, sample_profile, sample_t};
pub use foundation::core::{CubicBez, Point, RoundingMode, Vec2};
pub use foundation::error::{RetimeError, RetimeResult};
pub use playback::driver::{PlaybackDriver, PlaybackState};
pub use retime::assign::{AssignReport, ExtendMode, FrameAssigner, copy_source_into_destination};
pub use retime::frame::{
    Frame, fingerprint_frames, frames_from_images, identity_copies, provenance_line,
};
pub use retime::plan::{Instruction, InstructionKind, RetimePlan, plan};
pub use retime::session::{DeployReport, RetimeSession, SessionOpts};
