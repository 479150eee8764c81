//! Main entry point for slice metadata generation.
//!
//! Takes a decoded loop's track info and slice markers, computes the frame
//! boundaries, and encodes them in the requested metadata format.

use loopslice_spec::{
    validate_markers, BackendError, FrameSlice, LoopError, MetadataFormat, SliceMarker, TrackInfo,
};
use thiserror::Error;

use crate::layout::{frame_slices, slice_starts};
use crate::ot::{OtFile, SliceTable};
use crate::slices_doc::SlicesDocument;
use crate::timing::TempoCodes;

/// Error type for metadata generation.
#[derive(Debug, Error)]
pub enum MetaError {
    /// Track info or slice markers failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] LoopError),

    /// IO error during encoding.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BackendError for MetaError {
    fn code(&self) -> &'static str {
        match self {
            MetaError::InvalidInput(_) => "META_001",
            MetaError::IoError(_) => "META_002",
        }
    }

    fn category(&self) -> &'static str {
        "metadata"
    }
}

/// Result of metadata generation.
#[derive(Debug, Clone)]
pub struct MetadataResult {
    /// Encoded file contents.
    pub data: Vec<u8>,
    /// BLAKE3 hash of the encoded contents.
    pub hash: String,
    /// File extension for the format.
    pub extension: &'static str,
    /// Authoritative loop length in frames.
    pub length_frames: u32,
    /// Tempo codes (only meaningful for the binary format).
    pub tempo: TempoCodes,
    /// Frame boundaries of every slice, including any the format dropped.
    pub frame_slices: Vec<FrameSlice>,
    /// Number of slices present in the output.
    pub slices_written: usize,
}

impl MetadataResult {
    /// Number of slices that did not fit the output format.
    pub fn slices_dropped(&self) -> usize {
        self.frame_slices.len() - self.slices_written
    }
}

/// Generate slice metadata for a decoded loop.
///
/// # Arguments
/// * `format` - Metadata encoding to produce
/// * `base_name` - Base name of the paired audio file
/// * `info` - Track parameters
/// * `markers` - Slice markers ordered by position
///
/// # Returns
/// The encoded metadata and the boundaries it was computed from.
pub fn generate_metadata(
    format: MetadataFormat,
    base_name: &str,
    info: &TrackInfo,
    markers: &[SliceMarker],
) -> Result<MetadataResult, MetaError> {
    info.validate()?;
    validate_markers(markers, info.ppq_length)?;

    let length_frames = info.length_frames();
    let tempo = TempoCodes::derive(info.bpm(), length_frames, info.sample_rate);
    let slices = frame_slices(markers, info.ppq_length, length_frames);

    let (data, hash, slices_written) = match format {
        MetadataFormat::Octatrack => {
            let ot = OtFile {
                slices: SliceTable::from_slices(&slices),
                ..OtFile::from_codes(&tempo)
            };
            (ot.to_bytes()?.to_vec(), ot.compute_hash()?, ot.slices.len())
        }
        MetadataFormat::Slices => {
            let starts = slice_starts(markers, info.ppq_length, length_frames);
            let doc = SlicesDocument::from_frames(base_name, &starts, info.sample_rate);
            (doc.to_bytes(), doc.compute_hash(), starts.len())
        }
    };

    Ok(MetadataResult {
        data,
        hash,
        extension: format.extension(),
        length_frames,
        tempo,
        frame_slices: slices,
        slices_written,
    })
}
