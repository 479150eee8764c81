//! 16-bit PCM WAV writer.

use std::io::Cursor;
use std::path::Path;

use crate::export::ExportError;
use crate::render::RenderedAudio;

/// Bit depth of written audio.
pub const WAV_BITS_PER_SAMPLE: u16 = 16;

/// Convert a float sample to 16-bit PCM, clamping to [-1, 1].
#[inline]
pub fn sample_to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Encode rendered audio as a 16-bit PCM WAV file in memory.
pub fn encode_wav(audio: &RenderedAudio) -> Result<Vec<u8>, ExportError> {
    let spec = hound::WavSpec {
        channels: audio.num_channels(),
        sample_rate: audio.sample_rate,
        bits_per_sample: WAV_BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for frame in 0..audio.frames() {
            for channel in &audio.channels {
                writer.write_sample(sample_to_pcm16(channel[frame]))?;
            }
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

/// Write rendered audio to a WAV file.
pub fn write_wav(path: &Path, audio: &RenderedAudio) -> Result<(), ExportError> {
    let bytes = encode_wav(audio)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
