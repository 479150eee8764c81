//! Output path derivation.

use std::path::{Path, PathBuf};

use loopslice_spec::MetadataFormat;

/// Name of the directory holding `.slices` documents, next to the input.
pub const SLICES_DIR: &str = ".slices";

/// Where the two artifacts of a conversion are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Input file name without directory or extension.
    pub base_name: String,
    /// Rendered audio file.
    pub wav: PathBuf,
    /// Slice metadata file.
    pub metadata: PathBuf,
}

impl OutputPaths {
    /// Derive output paths from the input path.
    ///
    /// Audio goes to `<dir>/<base>.wav`. Binary metadata goes next to it as
    /// `<dir>/<base>.ot`; text metadata goes to `<dir>/.slices/<base>.slices`.
    pub fn derive(input: &Path, format: MetadataFormat) -> Self {
        let dir = match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let base_name = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let wav = dir.join(format!("{}.wav", base_name));
        let metadata = match format {
            MetadataFormat::Octatrack => dir.join(format!("{}.{}", base_name, format.extension())),
            MetadataFormat::Slices => dir
                .join(SLICES_DIR)
                .join(format!("{}.{}", base_name, format.extension())),
        };

        Self {
            base_name,
            wav,
            metadata,
        }
    }

    /// Create the metadata file's directory if it does not exist yet.
    pub fn ensure_metadata_dir(&self) -> std::io::Result<()> {
        match self.metadata.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }
}
