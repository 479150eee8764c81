//! JSON loop description.
//!
//! A loop description is what the loop decoder hands over: the track
//! parameters, the ordered slice markers, and the location of the rendered
//! audio stream.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LoopError;
use crate::track::{validate_markers, SliceMarker, TrackInfo};

/// A decoded loop, as read from a `.json` description file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoopDescription {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels (1 or 2).
    pub channels: u16,
    /// Tempo in thousandths of a BPM.
    pub tempo: u32,
    /// Total musical length in PPQ units.
    pub ppq_length: f64,
    /// Slice markers ordered by position.
    #[serde(default)]
    pub slices: Vec<SliceMarker>,
    /// Rendered audio (WAV); relative paths resolve against the description file.
    pub audio: PathBuf,
}

impl LoopDescription {
    /// Parses a loop description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoopError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a loop description from a file, resolving `audio` relative to it.
    pub fn from_file(path: &Path) -> Result<Self, LoopError> {
        let json = std::fs::read_to_string(path)?;
        let mut desc = Self::from_json(&json)?;
        if desc.audio.is_relative() {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            desc.audio = dir.join(&desc.audio);
        }
        Ok(desc)
    }

    /// Serializes the description to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, LoopError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the track parameters.
    pub fn track_info(&self) -> TrackInfo {
        TrackInfo {
            sample_rate: self.sample_rate,
            channels: self.channels,
            tempo: self.tempo,
            ppq_length: self.ppq_length,
            slice_count: self.slices.len(),
        }
    }

    /// Checks the track parameters and slice positions.
    pub fn validate(&self) -> Result<(), LoopError> {
        self.track_info().validate()?;
        validate_markers(&self.slices, self.ppq_length)
    }
}
