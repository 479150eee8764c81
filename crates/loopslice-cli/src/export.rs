//! Conversion pipeline: validate, render, and write both artifacts.

use std::path::{Path, PathBuf};

use loopslice_backend_meta::{generate_metadata, MetaError, MetadataResult};
use loopslice_spec::{validate_markers, BackendError, LoopError, MetadataFormat};
use thiserror::Error;

use crate::paths::OutputPaths;
use crate::render::{render_loop, LoopSource};
use crate::wav::write_wav;

/// Error type for loop export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Track info or slice markers are invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] LoopError),

    /// The loop source failed to render.
    #[error("Render error: {0}")]
    Render(String),

    /// WAV decoding or encoding error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Metadata encoding error.
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for ExportError {
    fn code(&self) -> &'static str {
        match self {
            ExportError::InvalidInput(_) => "EXPORT_001",
            ExportError::Render(_) => "EXPORT_002",
            ExportError::Wav(_) => "EXPORT_003",
            ExportError::Metadata(err) => err.code(),
            ExportError::Io(_) => "EXPORT_004",
        }
    }

    fn category(&self) -> &'static str {
        "export"
    }
}

/// Outcome of writing one artifact.
#[derive(Debug)]
pub enum ArtifactOutcome {
    /// The artifact was written to this path.
    Written(PathBuf),
    /// Writing failed; the other artifact is unaffected.
    Failed {
        /// Path that could not be written.
        path: PathBuf,
        /// What went wrong.
        error: ExportError,
    },
}

impl ArtifactOutcome {
    fn from_result(path: &Path, result: Result<(), ExportError>) -> Self {
        match result {
            Ok(()) => ArtifactOutcome::Written(path.to_path_buf()),
            Err(error) => ArtifactOutcome::Failed {
                path: path.to_path_buf(),
                error,
            },
        }
    }

    /// Whether the artifact was written.
    pub fn is_written(&self) -> bool {
        matches!(self, ArtifactOutcome::Written(_))
    }

    /// Path of the artifact, written or not.
    pub fn path(&self) -> &Path {
        match self {
            ArtifactOutcome::Written(path) => path,
            ArtifactOutcome::Failed { path, .. } => path,
        }
    }
}

/// Result of a loop export.
#[derive(Debug)]
pub struct ExportReport {
    /// Metadata format that was produced.
    pub format: MetadataFormat,
    /// Audio file outcome.
    pub audio: ArtifactOutcome,
    /// Metadata file outcome.
    pub metadata: ArtifactOutcome,
    /// Encoded metadata and the slice boundaries behind it.
    pub result: MetadataResult,
    /// Number of frames rendered per channel.
    pub frames_rendered: usize,
    /// Duration of the rendered audio in seconds.
    pub duration_seconds: f64,
}

impl ExportReport {
    /// Whether both artifacts were written.
    pub fn is_complete(&self) -> bool {
        self.audio.is_written() && self.metadata.is_written()
    }
}

/// Export a loop as a WAV file plus slice metadata.
///
/// Input validation and rendering happen before anything is written, so an
/// invalid loop leaves no output behind. After that, the audio and metadata
/// writes are attempted independently and reported per artifact.
///
/// # Arguments
/// * `source` - Decoded loop
/// * `paths` - Output locations
/// * `format` - Metadata format to write
pub fn export_loop(
    source: &mut dyn LoopSource,
    paths: &OutputPaths,
    format: MetadataFormat,
) -> Result<ExportReport, ExportError> {
    let info = source.info();
    info.validate()?;
    let markers = source.slices();
    validate_markers(&markers, info.ppq_length)?;

    let result = generate_metadata(format, &paths.base_name, &info, &markers)?;
    let audio = render_loop(source)?;

    let audio_outcome = ArtifactOutcome::from_result(&paths.wav, write_wav(&paths.wav, &audio));

    let metadata_write = paths
        .ensure_metadata_dir()
        .and_then(|()| std::fs::write(&paths.metadata, &result.data))
        .map_err(ExportError::from);
    let metadata_outcome = ArtifactOutcome::from_result(&paths.metadata, metadata_write);

    Ok(ExportReport {
        format,
        audio: audio_outcome,
        metadata: metadata_outcome,
        result,
        frames_rendered: audio.frames(),
        duration_seconds: audio.duration_seconds(),
    })
}
