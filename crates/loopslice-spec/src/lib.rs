//! loopslice Track Model
//!
//! This crate provides the data model shared by the loopslice backends and CLI:
//! the decoded track parameters handed over by the loop decoder, the ordered
//! slice markers, the frame-domain slices derived from them, and the JSON loop
//! description used to feed an externally rendered loop into the converter.
//!
//! # Example
//!
//! ```
//! use loopslice_spec::{LoopDescription, MetadataFormat};
//!
//! let json = r#"{
//!     "sample_rate": 44100,
//!     "channels": 2,
//!     "tempo": 120000,
//!     "ppq_length": 30720.0,
//!     "slices": [{ "ppq_pos": 0.0 }, { "ppq_pos": 15360.0 }],
//!     "audio": "render.wav"
//! }"#;
//!
//! let desc = LoopDescription::from_json(json).unwrap();
//! desc.validate().unwrap();
//!
//! let info = desc.track_info();
//! assert_eq!(info.length_frames(), 44100);
//! assert_eq!(MetadataFormat::Octatrack.extension(), "ot");
//! ```
//!
//! # Modules
//!
//! - [`error`]: Input errors and the `BackendError` reporting trait
//! - [`track`]: Track info, slice markers, frame slices, metadata formats
//! - [`description`]: JSON loop description

pub mod description;
pub mod error;
pub mod track;

pub use description::LoopDescription;
pub use error::{BackendError, LoopError};
pub use track::{
    validate_markers, FrameSlice, MetadataFormat, SliceMarker, TrackInfo, MAX_LOOP_SECONDS,
};
