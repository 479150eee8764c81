//! Track parameters, slice markers and derived frame slices.

use serde::{Deserialize, Serialize};

use crate::error::LoopError;

/// Longest loop accepted, in seconds.
pub const MAX_LOOP_SECONDS: u32 = 600;

/// Parameters of a decoded loop as reported by the loop decoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Tempo in thousandths of a BPM (120 BPM = 120000).
    pub tempo: u32,
    /// Total musical length in PPQ units.
    pub ppq_length: f64,
    /// Number of slice markers in the loop.
    pub slice_count: usize,
}

impl TrackInfo {
    /// Returns the tempo in beats per minute.
    pub fn bpm(&self) -> f64 {
        self.tempo as f64 / 1000.0
    }

    /// Exact (unrounded) loop length in frames.
    pub fn exact_length_frames(&self) -> f64 {
        self.sample_rate as f64 * 1000.0 * self.ppq_length / (self.tempo as f64 * 256.0)
    }

    /// Authoritative loop length in frames.
    ///
    /// Every slice boundary and the rendered audio use this count, whatever
    /// the decoder's own buffer length is. `f64::round` rounds half away from
    /// zero, which is the required policy.
    pub fn length_frames(&self) -> u32 {
        self.exact_length_frames().round() as u32
    }

    /// Checks the track invariants.
    pub fn validate(&self) -> Result<(), LoopError> {
        if self.sample_rate == 0 {
            return Err(LoopError::InvalidTrack(
                "sample_rate must be positive".to_string(),
            ));
        }
        if !matches!(self.channels, 1 | 2) {
            return Err(LoopError::InvalidTrack(format!(
                "channels must be 1 or 2, got {}",
                self.channels
            )));
        }
        if self.tempo == 0 {
            return Err(LoopError::InvalidTrack("tempo must be positive".to_string()));
        }
        if !self.ppq_length.is_finite() || self.ppq_length <= 0.0 {
            return Err(LoopError::InvalidTrack(format!(
                "ppq_length must be a positive number, got {}",
                self.ppq_length
            )));
        }

        let frames = self.exact_length_frames().round();
        let max_frames = self.sample_rate as f64 * MAX_LOOP_SECONDS as f64;
        if frames < 1.0 || frames > max_frames.min(u32::MAX as f64) {
            return Err(LoopError::InvalidTrack(format!(
                "loop length of {} frames is out of range (at most {} seconds)",
                frames, MAX_LOOP_SECONDS
            )));
        }

        Ok(())
    }
}

/// A slice marker at a musical position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliceMarker {
    /// Position in PPQ units from the start of the loop.
    pub ppq_pos: f64,
}

impl SliceMarker {
    /// Creates a marker at the given PPQ position.
    pub fn new(ppq_pos: f64) -> Self {
        Self { ppq_pos }
    }
}

/// Checks that markers have finite, non-decreasing positions within
/// `0..=ppq_length`.
pub fn validate_markers(markers: &[SliceMarker], ppq_length: f64) -> Result<(), LoopError> {
    let mut previous = 0.0_f64;
    for (i, marker) in markers.iter().enumerate() {
        if !marker.ppq_pos.is_finite() || marker.ppq_pos < 0.0 {
            return Err(LoopError::InvalidSlices(format!(
                "slice {} has invalid position {}",
                i, marker.ppq_pos
            )));
        }
        if marker.ppq_pos > ppq_length {
            return Err(LoopError::InvalidSlices(format!(
                "slice {} at {} is past the loop end at {}",
                i, marker.ppq_pos, ppq_length
            )));
        }
        if marker.ppq_pos < previous {
            return Err(LoopError::InvalidSlices(format!(
                "slice {} at {} comes before slice {} at {}",
                i,
                marker.ppq_pos,
                i - 1,
                previous
            )));
        }
        previous = marker.ppq_pos;
    }
    Ok(())
}

/// A slice expressed in sample frames (both bounds inclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FrameSlice {
    /// First frame of the slice.
    pub start: u32,
    /// Last frame of the slice.
    pub end: u32,
}

impl FrameSlice {
    /// Creates a new frame slice.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of frames covered by the slice.
    pub fn frame_count(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }
}

/// Slice metadata encoding written next to the rendered audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataFormat {
    /// Fixed-layout binary sampler metadata (`.ot`).
    Octatrack,
    /// Tagged slice-position text document (`.slices`).
    Slices,
}

impl MetadataFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            MetadataFormat::Octatrack => "ot",
            MetadataFormat::Slices => "slices",
        }
    }

    /// Checks if this format is the binary sampler format.
    pub fn is_binary(&self) -> bool {
        matches!(self, MetadataFormat::Octatrack)
    }
}

impl std::fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(sample_rate: u32, tempo: u32, ppq_length: f64) -> TrackInfo {
        TrackInfo {
            sample_rate,
            channels: 2,
            tempo,
            ppq_length,
            slice_count: 0,
        }
    }

    #[test]
    fn test_bpm_from_milli_bpm() {
        assert_eq!(info(44100, 120000, 30720.0).bpm(), 120.0);
        assert_eq!(info(44100, 93500, 30720.0).bpm(), 93.5);
    }

    #[test]
    fn test_length_frames_one_second_at_120() {
        // 30720 PPQ = 2 quarter notes = 1 second at 120 BPM
        assert_eq!(info(44100, 120000, 30720.0).length_frames(), 44100);
    }

    #[test]
    fn test_length_frames_rounds_half_away_from_zero() {
        // 256 Hz at 1 BPM makes the frame count equal the PPQ length
        assert_eq!(info(256, 1000, 2.5).exact_length_frames(), 2.5);
        assert_eq!(info(256, 1000, 2.5).length_frames(), 3);
        assert_eq!(info(256, 1000, 3.5).length_frames(), 4);
    }

    #[test]
    fn test_validate_accepts_typical_track() {
        assert!(info(44100, 120000, 30720.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_tempo() {
        let err = info(44100, 0, 30720.0).validate().unwrap_err();
        assert!(matches!(err, LoopError::InvalidTrack(_)));
    }

    #[test]
    fn test_validate_rejects_bad_channels() {
        let mut track = info(44100, 120000, 30720.0);
        track.channels = 6;
        assert!(track.validate().is_err());
        track.channels = 0;
        assert!(track.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_length() {
        assert!(info(44100, 120000, 0.0).validate().is_err());
        assert!(info(44100, 120000, -1.0).validate().is_err());
        assert!(info(44100, 120000, f64::NAN).validate().is_err());
        assert!(info(0, 120000, 30720.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_loop_shorter_than_one_frame() {
        assert!(info(256, 1000, 0.25).validate().is_err());
    }

    #[test]
    fn test_validate_markers_ordering() {
        let ok = [
            SliceMarker::new(0.0),
            SliceMarker::new(0.0),
            SliceMarker::new(3840.0),
        ];
        assert!(validate_markers(&ok, 30720.0).is_ok());

        let reversed = [SliceMarker::new(3840.0), SliceMarker::new(0.0)];
        assert!(matches!(
            validate_markers(&reversed, 30720.0),
            Err(LoopError::InvalidSlices(_))
        ));

        let negative = [SliceMarker::new(-1.0)];
        assert!(validate_markers(&negative, 30720.0).is_err());
    }

    #[test]
    fn test_validate_markers_rejects_position_past_loop_end() {
        let at_end = [SliceMarker::new(0.0), SliceMarker::new(30720.0)];
        assert!(validate_markers(&at_end, 30720.0).is_ok());

        let past_end = [SliceMarker::new(0.0), SliceMarker::new(40000.0)];
        assert!(matches!(
            validate_markers(&past_end, 30720.0),
            Err(LoopError::InvalidSlices(_))
        ));
    }

    #[test]
    fn test_validate_rejects_overlong_loop() {
        // 600 seconds at 1000 Hz is exactly the limit; one more second is not
        let at_limit = info(1000, 120000, 30720.0 * 600.0);
        assert_eq!(at_limit.length_frames(), 600_000);
        assert!(at_limit.validate().is_ok());
        assert!(info(1000, 120000, 30720.0 * 601.0).validate().is_err());

        // Close to u32::MAX frames is rejected before anything allocates
        let huge = info(44100, 1000, 1.0e10);
        assert!(matches!(huge.validate(), Err(LoopError::InvalidTrack(_))));
    }

    #[test]
    fn test_frame_slice_count_is_inclusive() {
        assert_eq!(FrameSlice::new(0, 0).frame_count(), 1);
        assert_eq!(FrameSlice::new(10, 19).frame_count(), 10);
    }

    #[test]
    fn test_metadata_format_extensions() {
        assert_eq!(MetadataFormat::Octatrack.extension(), "ot");
        assert_eq!(MetadataFormat::Slices.extension(), "slices");
        assert!(MetadataFormat::Octatrack.is_binary());
        assert!(!MetadataFormat::Slices.is_binary());
        assert_eq!(MetadataFormat::Slices.to_string(), "slices");
    }
}
