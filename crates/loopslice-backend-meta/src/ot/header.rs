//! `.ot` header structure and layout constants.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

use crate::timing::TempoCodes;

/// Total size of an `.ot` file in bytes.
pub const OT_FILE_SIZE: usize = 832;

/// File header: IFF form with the sampler's sample-attribute type.
pub const OT_HEADER: &[u8; 16] = b"FORM\0\0\0\0DPS1SMPA";

/// Version marker following the header.
pub const OT_VERSION_MARKER: [u8; 7] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00];

/// Offset of the tempo code field.
pub const OT_TEMPO_OFFSET: usize = 23;

/// Offset of the first trim length field.
pub const OT_TRIM_LEN_OFFSET: usize = 27;

/// Offset of the trim end field.
pub const OT_TRIM_END_OFFSET: usize = 50;

/// Offset of the first slice record.
pub const OT_SLICES_OFFSET: usize = 58;

/// Offset of the slice count field.
pub const OT_SLICE_COUNT_OFFSET: usize = 826;

/// Offset of the checksum field.
pub const OT_CHECKSUM_OFFSET: usize = 830;

/// First byte covered by the checksum.
pub const OT_CHECKSUM_START: usize = 16;

/// Constant written at offset 43.
pub const OT_GAIN_FIELD: u16 = 48;

/// Constant written at offset 45.
pub const OT_TRIG_QUANTIZE: u8 = 0xFF;

/// Sample attribute header fields (bytes 0..58).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtHeader {
    /// Tempo in 1/24 BPM ticks.
    pub tempo_code: u32,
    /// Trim length code (written twice).
    pub trim_length_code: u32,
    /// Trim end in frames.
    pub trim_end: u32,
}

impl OtHeader {
    /// Create a header from derived tempo codes.
    pub fn from_codes(codes: &TempoCodes) -> Self {
        Self {
            tempo_code: codes.tempo_code,
            trim_length_code: codes.trim_length_code,
            trim_end: codes.trim_end,
        }
    }

    /// Write the header (58 bytes) to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(OT_HEADER)?;
        writer.write_all(&OT_VERSION_MARKER)?;

        writer.write_u32::<BigEndian>(self.tempo_code)?;

        // Trim length and loop length share the same code
        writer.write_u32::<BigEndian>(self.trim_length_code)?;
        writer.write_u32::<BigEndian>(self.trim_length_code)?;

        // Stretch and loop mode
        writer.write_u32::<BigEndian>(0)?;
        writer.write_u32::<BigEndian>(0)?;

        writer.write_u16::<BigEndian>(OT_GAIN_FIELD)?;
        writer.write_u8(OT_TRIG_QUANTIZE)?;

        // Trim start
        writer.write_u32::<BigEndian>(0)?;
        writer.write_u32::<BigEndian>(self.trim_end)?;
        // Loop point
        writer.write_u32::<BigEndian>(0)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_write_size() {
        let header = OtHeader {
            tempo_code: 2880,
            trim_length_code: 25,
            trim_end: 44100,
        };
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();

        assert_eq!(buf.len(), OT_SLICES_OFFSET);
        assert_eq!(&buf[0..16], OT_HEADER);
        assert_eq!(&buf[16..23], &OT_VERSION_MARKER);
    }

    #[test]
    fn test_header_field_offsets() {
        let header = OtHeader {
            tempo_code: 0x0102_0304,
            trim_length_code: 0x0A0B_0C0D,
            trim_end: 0x1122_3344,
        };
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();

        assert_eq!(&buf[23..27], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&buf[27..31], &[0x0A, 0x0B, 0x0C, 0x0D]);
        assert_eq!(&buf[31..35], &[0x0A, 0x0B, 0x0C, 0x0D]);
        assert_eq!(&buf[35..43], &[0; 8]);
        assert_eq!(&buf[43..45], &[0x00, 0x30]);
        assert_eq!(buf[45], 0xFF);
        assert_eq!(&buf[46..50], &[0; 4]);
        assert_eq!(&buf[50..54], &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(&buf[54..58], &[0; 4]);
    }

    #[test]
    fn test_header_magic_constant() {
        assert_eq!(
            OT_HEADER,
            &[0x46, 0x4F, 0x52, 0x4D, 0x00, 0x00, 0x00, 0x00, 0x44, 0x50, 0x53, 0x31, 0x53, 0x4D, 0x50, 0x41]
        );
    }
}
