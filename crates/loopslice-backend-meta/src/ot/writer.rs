//! `.ot` file writer - assembles header, slice table and checksum.

use byteorder::{BigEndian, ByteOrder};
use std::io::{self, Cursor};

use loopslice_spec::FrameSlice;

use super::header::{OtHeader, OT_CHECKSUM_OFFSET, OT_CHECKSUM_START, OT_FILE_SIZE};
use super::table::SliceTable;
use crate::timing::TempoCodes;

/// Sample attribute data for one `.ot` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtFile {
    /// Header fields.
    pub header: OtHeader,
    /// Slice table (at most 64 slices).
    pub slices: SliceTable,
}

impl OtFile {
    /// Create an `.ot` file for a loop with no slices yet.
    ///
    /// # Arguments
    /// * `bpm` - Tempo in beats per minute
    /// * `sample_rate` - Sample rate in Hz
    /// * `total_frames` - Authoritative loop length in frames
    pub fn new(bpm: f64, sample_rate: u32, total_frames: u32) -> Self {
        Self::from_codes(&TempoCodes::derive(bpm, total_frames, sample_rate))
    }

    /// Create an `.ot` file from precomputed tempo codes.
    pub fn from_codes(codes: &TempoCodes) -> Self {
        Self {
            header: OtHeader::from_codes(codes),
            slices: SliceTable::new(),
        }
    }

    /// Add a slice. Slices past the 64th are dropped; returns whether it was kept.
    pub fn add_slice(&mut self, start: u32, end: u32) -> bool {
        self.slices.push(FrameSlice::new(start, end))
    }

    /// Encode the complete 832-byte file.
    pub fn to_bytes(&self) -> io::Result<[u8; OT_FILE_SIZE]> {
        let mut buffer = [0u8; OT_FILE_SIZE];

        let mut cursor = Cursor::new(&mut buffer[..OT_CHECKSUM_OFFSET]);
        self.header.write(&mut cursor)?;
        self.slices.write(&mut cursor)?;
        debug_assert_eq!(cursor.position() as usize, OT_CHECKSUM_OFFSET);

        let checksum = ot_checksum(&buffer);
        BigEndian::write_u16(&mut buffer[OT_CHECKSUM_OFFSET..], checksum);

        Ok(buffer)
    }

    /// Compute the BLAKE3 hash of the file bytes.
    pub fn compute_hash(&self) -> io::Result<String> {
        Ok(crate::content_hash(&self.to_bytes()?))
    }
}

/// 16-bit wrapping sum of bytes 16..=829 of an `.ot` buffer.
///
/// Bytes outside the checksum range are ignored, so the function can be run on
/// a finished file to verify its stored checksum.
pub fn ot_checksum(buffer: &[u8]) -> u16 {
    let end = buffer.len().min(OT_CHECKSUM_OFFSET);
    buffer
        .get(OT_CHECKSUM_START..end)
        .unwrap_or(&[])
        .iter()
        .fold(0u16, |sum, &b| sum.wrapping_add(b as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ot::OT_SLICE_COUNT_OFFSET;

    #[test]
    fn test_file_size() {
        let ot = OtFile::new(120.0, 44100, 44100);
        assert_eq!(ot.to_bytes().unwrap().len(), 832);
    }

    #[test]
    fn test_checksum_matches_stored_value() {
        let mut ot = OtFile::new(120.0, 44100, 44100);
        ot.add_slice(0, 22049);
        ot.add_slice(22050, 44099);
        let bytes = ot.to_bytes().unwrap();

        let stored = u16::from_be_bytes([bytes[830], bytes[831]]);
        assert_eq!(stored, ot_checksum(&bytes));
    }

    #[test]
    fn test_checksum_of_empty_file() {
        // Sum of version marker (2), tempo 2880 (0x0B40 -> 11 + 64), trim len 25 twice,
        // 48, 0xFF, trim end 44100 (0xAC44 -> 172 + 68), count 0
        let ot = OtFile::new(120.0, 44100, 44100);
        let bytes = ot.to_bytes().unwrap();
        let expected: u16 = 2 + 11 + 64 + 25 + 25 + 48 + 255 + 172 + 68;
        assert_eq!(ot_checksum(&bytes), expected);
        assert_eq!(u16::from_be_bytes([bytes[830], bytes[831]]), expected);
    }

    #[test]
    fn test_checksum_wraps() {
        let mut buffer = vec![0xFFu8; OT_FILE_SIZE];
        // 814 bytes of 0xFF = 207570, mod 65536 = 10962
        assert_eq!(ot_checksum(&buffer), (814u32 * 255 % 65536) as u16);
        buffer[16] = 0;
        assert_eq!(ot_checksum(&buffer), (813u32 * 255 % 65536) as u16);
    }

    #[test]
    fn test_checksum_short_buffer() {
        assert_eq!(ot_checksum(&[]), 0);
        assert_eq!(ot_checksum(&[1; 10]), 0);
        assert_eq!(ot_checksum(&[1; 20]), 4);
    }

    #[test]
    fn test_add_slice_drops_past_capacity() {
        let mut ot = OtFile::new(120.0, 44100, 44100);
        for i in 0..64 {
            assert!(ot.add_slice(i, i));
        }
        assert!(!ot.add_slice(64, 64));
        let bytes = ot.to_bytes().unwrap();
        assert_eq!(
            u32::from_be_bytes(
                bytes[OT_SLICE_COUNT_OFFSET..OT_SLICE_COUNT_OFFSET + 4]
                    .try_into()
                    .unwrap()
            ),
            64
        );
    }

    #[test]
    fn test_compute_hash_is_stable() {
        let ot = OtFile::new(120.0, 44100, 44100);
        assert_eq!(ot.compute_hash().unwrap(), ot.compute_hash().unwrap());
        assert_eq!(
            ot.compute_hash().unwrap(),
            crate::content_hash(&ot.to_bytes().unwrap())
        );
    }
}
