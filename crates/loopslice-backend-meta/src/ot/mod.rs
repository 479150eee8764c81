//! Octatrack `.ot` sample attribute writer.
//!
//! An `.ot` file sits next to a WAV file and tells the sampler the sample's
//! tempo, trim range and slice grid. The layout is fixed at 832 bytes:
//!
//! | Offset | Size   | Content                                         |
//! |--------|--------|-------------------------------------------------|
//! | 0      | 16     | `FORM....DPS1SMPA` header                       |
//! | 16     | 7      | version marker                                  |
//! | 23     | 4      | tempo code (BPM * 24)                           |
//! | 27     | 4 + 4  | trim length code, twice                         |
//! | 35     | 4 + 4  | reserved                                        |
//! | 43     | 2      | constant 48                                     |
//! | 45     | 1      | constant 0xFF                                   |
//! | 46     | 4      | reserved (trim start)                           |
//! | 50     | 4      | trim end                                        |
//! | 54     | 4      | reserved                                        |
//! | 58     | 64 * 12| slices: start, end, 0xFFFFFFFF                  |
//! | 826    | 4      | slice count                                     |
//! | 830    | 2      | checksum of bytes 16..=829                      |
//!
//! All multi-byte fields are big-endian. Only writing is supported.

mod header;
mod table;
mod writer;

pub use header::*;
pub use table::*;
pub use writer::*;
