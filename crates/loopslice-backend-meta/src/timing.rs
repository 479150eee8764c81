//! Musical-position to frame mapping and tempo code derivation.

/// Fixed offset applied to every mapped slice position.
///
/// The loop renderer delays its output by 64 frames; slice points are pulled
/// back by the same amount so they line up with the rendered transients.
pub const LATENCY_COMPENSATION_FRAMES: i64 = -64;

/// Tempo ticks per BPM unit in the binary sampler format.
pub const TEMPO_TICKS_PER_BPM: f64 = 24.0;

/// Trim length units per 4-beat bar in the binary sampler format.
pub const TRIM_UNITS_PER_BAR: f64 = 25.0;

/// Rounds to the nearest integer, ties away from zero.
///
/// This is what `f64::round` does; the helper exists so every rounding site
/// in the encoders goes through one audited function.
#[inline]
pub fn round_half_away(value: f64) -> f64 {
    value.round()
}

/// Maps a PPQ position to a signed frame offset, latency compensation included.
///
/// The result is not clamped and may be negative for positions near the start
/// of the loop.
pub fn map_position_raw(ppq_pos: f64, ppq_length: f64, total_frames: u32) -> i64 {
    let frame = round_half_away((ppq_pos / ppq_length) * total_frames as f64);
    frame as i64 + LATENCY_COMPENSATION_FRAMES
}

/// Maps a PPQ position to a frame offset, clamped at frame 0.
pub fn map_position(ppq_pos: f64, ppq_length: f64, total_frames: u32) -> u32 {
    clamp_frame(map_position_raw(ppq_pos, ppq_length, total_frames))
}

/// Clamps a signed frame offset into the `u32` frame range.
pub(crate) fn clamp_frame(frame: i64) -> u32 {
    frame.clamp(0, u32::MAX as i64) as u32
}

/// Tempo and length fields of the binary sampler format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoCodes {
    /// Tempo in 1/24 BPM ticks.
    pub tempo_code: u32,
    /// Number of 4-beat bars spanned by the loop.
    pub bars: u32,
    /// Trim length code (25 units per bar).
    pub trim_length_code: u32,
    /// Trim end, equal to the total frame count.
    pub trim_end: u32,
}

impl TempoCodes {
    /// Derives the tempo codes from a tempo and the loop length.
    ///
    /// # Arguments
    /// * `bpm` - Tempo in beats per minute
    /// * `total_frames` - Authoritative loop length in frames
    /// * `sample_rate` - Sample rate in Hz
    pub fn derive(bpm: f64, total_frames: u32, sample_rate: u32) -> Self {
        let tempo_code = round_half_away(bpm * TEMPO_TICKS_PER_BPM) as u32;
        let bars = round_half_away(
            (bpm * total_frames as f64) / (sample_rate as f64 * 60.0 * 4.0),
        );
        let trim_length_code = round_half_away(bars * TRIM_UNITS_PER_BAR) as u32;

        Self {
            tempo_code,
            bars: bars as u32,
            trim_length_code,
            trim_end: total_frames,
        }
    }
}
