use std::time::Duration;

use crate::foundation::error::{RetimeError, RetimeResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Whether the driver advances on [`PlaybackDriver::tick`].
pub enum PlaybackState {
    /// Ticks are ignored.
    Paused,
    /// Each tick advances one frame.
    Playing,
}

/// Headless playback cursor over a fixed-length sequence.
///
/// The caller owns the clock: call [`tick`](Self::tick) once per [`interval`](Self::interval).
/// Playback stops by itself on the last frame.
#[derive(Clone, Debug)]
pub struct PlaybackDriver {
    frame_count: usize,
    position: usize,
    state: PlaybackState,
    interval: Duration,
}

impl PlaybackDriver {
    /// Paused driver at frame 0.
    pub fn new(frame_count: usize, interval: Duration) -> RetimeResult<Self> {
        if frame_count == 0 {
            return Err(RetimeError::validation("playback needs at least one frame"));
        }
        if interval.is_zero() {
            return Err(RetimeError::validation("playback interval must be > 0"));
        }
        Ok(Self {
            frame_count,
            position: 0,
            state: PlaybackState::Paused,
            interval,
        })
    }

    /// Current frame.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Playing or paused.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `true` on the last frame.
    pub fn at_end(&self) -> bool {
        self.position + 1 >= self.frame_count
    }

    /// Start advancing. No effect on the last frame.
    pub fn play(&mut self) {
        if !self.at_end() {
            self.state = PlaybackState::Playing;
        }
    }

    /// Stop advancing.
    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Jump to `position` (clamped to the last frame); reaching the end pauses.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.frame_count - 1);
        if self.at_end() {
            self.pause();
        }
    }

    /// Advance one frame while playing. Returns the new position when it moved.
    pub fn tick(&mut self) -> Option<usize> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        self.seek(self.position + 1);
        Some(self.position)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
