//! Slice boundary computation in the frame domain.

use loopslice_spec::{FrameSlice, SliceMarker};

use crate::timing::{clamp_frame, map_position, map_position_raw};

/// Computes the frame range of every slice, in marker order.
///
/// A slice ends one frame before the next slice starts; the last slice runs to
/// the final frame of the loop. Ends are clamped so that a slice never ends
/// before it starts (coincident markers yield one-frame slices), and no bound
/// lies past the final frame.
///
/// # Arguments
/// * `markers` - Slice markers ordered by position
/// * `ppq_length` - Total musical length in PPQ units
/// * `length_frames` - Authoritative loop length in frames (at least 1)
pub fn frame_slices(markers: &[SliceMarker], ppq_length: f64, length_frames: u32) -> Vec<FrameSlice> {
    let last_frame = length_frames.saturating_sub(1);

    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let start = map_position(marker.ppq_pos, ppq_length, length_frames).min(last_frame);
            let end = match markers.get(i + 1) {
                Some(next) => {
                    clamp_frame(map_position_raw(next.ppq_pos, ppq_length, length_frames) - 1)
                        .min(last_frame)
                }
                None => last_frame,
            };
            FrameSlice::new(start, end.max(start))
        })
        .collect()
}

/// Computes the start frame of every slice, in marker order.
pub fn slice_starts(markers: &[SliceMarker], ppq_length: f64, length_frames: u32) -> Vec<u32> {
    markers
        .iter()
        .map(|m| map_position(m.ppq_pos, ppq_length, length_frames))
        .collect()
}
