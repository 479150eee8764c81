//! Loop input from a JSON loop description and its rendered WAV stream.

use std::path::Path;

use loopslice_spec::{LoopDescription, SliceMarker, TrackInfo};

use crate::export::ExportError;
use crate::render::LoopSource;

/// A loop read from a `.json` description plus the WAV file it references.
///
/// The WAV is decoded up front; rendering then serves it in batches. Frames
/// past the end of the WAV render as silence.
#[derive(Debug, Clone)]
pub struct JsonLoopSource {
    description: LoopDescription,
    audio: Vec<Vec<f32>>,
    position: usize,
}

impl JsonLoopSource {
    /// Opens and validates a loop description and loads its audio.
    ///
    /// # Errors
    /// Returns an error if the description cannot be read or is invalid, or
    /// if the referenced WAV cannot be decoded or has a different sample rate.
    pub fn open(path: &Path) -> Result<Self, ExportError> {
        let description = LoopDescription::from_file(path)?;
        description.validate()?;

        let (audio, sample_rate) = load_wav_channels(&description.audio)?;
        if sample_rate != description.sample_rate {
            return Err(ExportError::Render(format!(
                "'{}' is {} Hz but the loop is {} Hz",
                description.audio.display(),
                sample_rate,
                description.sample_rate
            )));
        }

        let audio = match_channel_count(audio, description.channels as usize);
        Ok(Self::from_parts(description, audio))
    }

    /// Builds a source from a description and already-decoded channel buffers.
    pub fn from_parts(description: LoopDescription, audio: Vec<Vec<f32>>) -> Self {
        Self {
            description,
            audio,
            position: 0,
        }
    }
}

impl LoopSource for JsonLoopSource {
    fn info(&self) -> TrackInfo {
        self.description.track_info()
    }

    fn slice(&self, index: usize) -> Option<SliceMarker> {
        self.description.slices.get(index).copied()
    }

    fn start_preview(&mut self) -> Result<(), ExportError> {
        self.position = 0;
        Ok(())
    }

    fn render_batch(&mut self, buffers: &mut [&mut [f32]]) -> Result<(), ExportError> {
        let frames = buffers.first().map_or(0, |b| b.len());
        for (c, buffer) in buffers.iter_mut().enumerate() {
            let source = self.audio.get(c).map(Vec::as_slice).unwrap_or(&[]);
            for (i, sample) in buffer.iter_mut().enumerate() {
                *sample = source.get(self.position + i).copied().unwrap_or(0.0);
            }
        }
        self.position += frames;
        Ok(())
    }
}

/// Decode a WAV file into deinterleaved `f32` channels in [-1, 1].
///
/// Returns the channels and the file's sample rate.
pub fn load_wav_channels(path: &Path) -> Result<(Vec<Vec<f32>>, u32), ExportError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            if !matches!(spec.bits_per_sample, 8 | 16 | 24 | 32) {
                return Err(ExportError::Render(format!(
                    "unsupported bit depth in '{}': {} bits (supported: 8, 16, 24, 32)",
                    path.display(),
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let frames = interleaved.len() / channels;
    let mut out = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (c, &sample) in frame.iter().enumerate() {
            out[c].push(sample);
        }
    }

    Ok((out, spec.sample_rate))
}

/// Adapt decoded channels to the loop's channel count.
///
/// Mono feeding stereo is duplicated; wider input feeding mono is averaged;
/// extra channels beyond stereo are dropped.
pub fn match_channel_count(mut audio: Vec<Vec<f32>>, channels: usize) -> Vec<Vec<f32>> {
    match (audio.len(), channels) {
        (have, want) if have == want => audio,
        (1, 2) => {
            let mono = audio.remove(0);
            vec![mono.clone(), mono]
        }
        (have, 1) if have > 1 => {
            let frames = audio[0].len();
            let mono = (0..frames)
                .map(|i| audio.iter().map(|ch| ch[i]).sum::<f32>() / have as f32)
                .collect();
            vec![mono]
        }
        (_, want) => {
            audio.truncate(want);
            audio
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopslice_spec::SliceMarker;

    fn description(channels: u16) -> LoopDescription {
        LoopDescription {
            sample_rate: 1000,
            channels,
            tempo: 120000,
            ppq_length: 30720.0,
            slices: vec![SliceMarker::new(0.0), SliceMarker::new(15360.0)],
            audio: "unused.wav".into(),
        }
    }

    #[test]
    fn test_render_batch_pads_with_silence() {
        let mut source = JsonLoopSource::from_parts(description(1), vec![vec![0.25; 3]]);
        let mut buf = [1.0f32; 5];
        source.render_batch(&mut [&mut buf[..]]).unwrap();
        assert_eq!(buf, [0.25, 0.25, 0.25, 0.0, 0.0]);
    }

    #[test]
    fn test_render_batch_advances_position() {
        let audio = vec![(0..10).map(|i| i as f32).collect::<Vec<_>>()];
        let mut source = JsonLoopSource::from_parts(description(1), audio);
        let mut first = [0.0f32; 4];
        let mut second = [0.0f32; 4];
        source.render_batch(&mut [&mut first[..]]).unwrap();
        source.render_batch(&mut [&mut second[..]]).unwrap();
        assert_eq!(second, [4.0, 5.0, 6.0, 7.0]);

        source.start_preview().unwrap();
        source.render_batch(&mut [&mut first[..]]).unwrap();
        assert_eq!(first, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_info_and_slices_from_description() {
        let source = JsonLoopSource::from_parts(description(2), vec![vec![], vec![]]);
        let info = source.info();
        assert_eq!(info.slice_count, 2);
        assert_eq!(info.length_frames(), 1000);
        assert_eq!(source.slice(1), Some(SliceMarker::new(15360.0)));
        assert_eq!(source.slice(2), None);
    }

    #[test]
    fn test_match_channel_count() {
        let stereo = match_channel_count(vec![vec![0.5, -0.5]], 2);
        assert_eq!(stereo, vec![vec![0.5, -0.5], vec![0.5, -0.5]]);

        let mono = match_channel_count(vec![vec![1.0, 0.0], vec![0.0, 0.0]], 1);
        assert_eq!(mono, vec![vec![0.5, 0.0]]);

        let trimmed = match_channel_count(vec![vec![1.0], vec![2.0], vec![3.0]], 2);
        assert_eq!(trimmed, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_load_wav_channels_deinterleaves() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("in.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for s in [16384i16, -16384, 0, 8192] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let (channels, rate) = load_wav_channels(&path).unwrap();
        assert_eq!(rate, 8000);
        assert_eq!(channels, vec![vec![0.5, 0.0], vec![-0.5, 0.25]]);
    }

    #[test]
    fn test_open_rejects_sample_rate_mismatch() {
        let tmp = tempfile::tempdir().unwrap();
        let wav = tmp.path().join("render.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        hound::WavWriter::create(&wav, spec).unwrap().finalize().unwrap();

        let mut desc = description(1);
        desc.audio = "render.wav".into();
        let json_path = tmp.path().join("loop.json");
        std::fs::write(&json_path, desc.to_json_pretty().unwrap()).unwrap();

        let err = JsonLoopSource::open(&json_path).unwrap_err();
        assert!(matches!(err, ExportError::Render(_)));
    }
}
