//! loopslice Metadata Backend - Slice Metadata Encoding
//!
//! This crate turns a decoded loop's slice markers into sample-frame
//! boundaries and encodes them for samplers:
//!
//! - **Octatrack `.ot`**: fixed 832-byte big-endian attribute file with tempo,
//!   trim range, up to 64 slices and a 16-bit checksum
//! - **`.slices` document**: text list of slice start times in seconds
//!
//! # Determinism
//!
//! All functions are pure. Given the same track info and markers the output
//! is byte-identical, which the BLAKE3 hash in [`generate::MetadataResult`]
//! makes easy to check.
//!
//! # Example
//!
//! ```
//! use loopslice_backend_meta::generate::generate_metadata;
//! use loopslice_spec::{MetadataFormat, SliceMarker, TrackInfo};
//!
//! let info = TrackInfo {
//!     sample_rate: 44100,
//!     channels: 2,
//!     tempo: 120000,
//!     ppq_length: 30720.0,
//!     slice_count: 2,
//! };
//! let markers = [SliceMarker::new(0.0), SliceMarker::new(15360.0)];
//!
//! let result = generate_metadata(MetadataFormat::Octatrack, "drums", &info, &markers).unwrap();
//! assert_eq!(result.data.len(), 832);
//! assert_eq!(result.tempo.tempo_code, 2880);
//! ```
//!
//! # Module Structure
//!
//! - [`timing`]: Position-to-frame mapping and tempo codes
//! - [`layout`]: Slice boundary computation
//! - [`ot`]: Octatrack `.ot` writer
//! - [`slices_doc`]: `.slices` document writer
//! - [`generate`]: Main generation entry point

pub mod generate;
pub mod layout;
pub mod ot;
pub mod slices_doc;
pub mod timing;

pub use generate::{generate_metadata, MetaError, MetadataResult};
pub use layout::{frame_slices, slice_starts};
pub use timing::{map_position, TempoCodes, LATENCY_COMPENSATION_FRAMES};

/// BLAKE3 hash of encoded metadata, as a lowercase hex string.
pub fn content_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
