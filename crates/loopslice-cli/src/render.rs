//! Loop rendering.
//!
//! The loop decoder is reached through the [`LoopSource`] trait. Rendering
//! always produces exactly [`TrackInfo::length_frames`] frames per channel,
//! pulled from the source in batches of at most [`RENDER_BATCH_FRAMES`].

use loopslice_spec::{SliceMarker, TrackInfo};

use crate::export::ExportError;

/// Maximum number of frames requested from a source per call.
pub const RENDER_BATCH_FRAMES: usize = 64;

/// A decoded loop that can report its parameters and render audio.
pub trait LoopSource {
    /// Track parameters.
    fn info(&self) -> TrackInfo;

    /// Slice marker at `index`, or `None` past the last slice.
    fn slice(&self, index: usize) -> Option<SliceMarker>;

    /// All slice markers, in order.
    fn slices(&self) -> Vec<SliceMarker> {
        (0..self.info().slice_count)
            .filter_map(|i| self.slice(i))
            .collect()
    }

    /// Rewind playback to the start of the loop.
    fn start_preview(&mut self) -> Result<(), ExportError> {
        Ok(())
    }

    /// Render the next frames into one buffer per channel.
    ///
    /// All buffers have the same length, which never exceeds
    /// [`RENDER_BATCH_FRAMES`].
    fn render_batch(&mut self, buffers: &mut [&mut [f32]]) -> Result<(), ExportError>;
}

/// Deinterleaved rendered audio.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAudio {
    /// One sample buffer per channel.
    pub channels: Vec<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl RenderedAudio {
    /// Creates silent audio of the given shape.
    pub fn silent(channels: usize, frames: usize, sample_rate: u32) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channels],
            sample_rate,
        }
    }

    /// Number of frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Number of channels.
    pub fn num_channels(&self) -> u16 {
        self.channels.len() as u16
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }
}

/// Render a loop to memory.
///
/// The track info is validated first, so an out-of-range length is an input
/// error rather than an oversized allocation.
pub fn render_loop(source: &mut dyn LoopSource) -> Result<RenderedAudio, ExportError> {
    let info = source.info();
    info.validate()?;
    let length = info.length_frames() as usize;
    let mut audio = RenderedAudio::silent(info.channels as usize, length, info.sample_rate);

    source.start_preview()?;

    let mut rendered = 0;
    while rendered < length {
        let todo = RENDER_BATCH_FRAMES.min(length - rendered);
        let mut batch: Vec<&mut [f32]> = audio
            .channels
            .iter_mut()
            .map(|channel| &mut channel[rendered..rendered + todo])
            .collect();
        source.render_batch(&mut batch)?;
        rendered += todo;
    }

    Ok(audio)
}
