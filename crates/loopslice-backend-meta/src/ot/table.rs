//! Fixed-capacity slice table.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

use loopslice_spec::FrameSlice;

/// Maximum number of slices an `.ot` file can hold.
pub const OT_MAX_SLICES: usize = 64;

/// Size of one slice record in bytes.
pub const OT_SLICE_RECORD_SIZE: usize = 12;

/// Filler written after the start/end pair of every used slice record.
pub const OT_SLICE_FILLER: u32 = 0xFFFF_FFFF;

/// Slice table holding at most [`OT_MAX_SLICES`] entries.
///
/// Slices beyond the capacity are dropped, never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceTable {
    slices: [FrameSlice; OT_MAX_SLICES],
    len: usize,
}

impl Default for SliceTable {
    fn default() -> Self {
        Self {
            slices: [FrameSlice::default(); OT_MAX_SLICES],
            len: 0,
        }
    }
}

impl SliceTable {
    /// Create an empty slice table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a slice list, keeping the first 64 entries.
    pub fn from_slices(slices: &[FrameSlice]) -> Self {
        let mut table = Self::new();
        for slice in slices.iter().take(OT_MAX_SLICES) {
            table.push(*slice);
        }
        table
    }

    /// Append a slice. Returns `false` (and drops the slice) when the table is full.
    pub fn push(&mut self, slice: FrameSlice) -> bool {
        if self.len == OT_MAX_SLICES {
            return false;
        }
        self.slices[self.len] = slice;
        self.len += 1;
        true
    }

    /// Number of slices stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no slices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the table has reached its capacity.
    pub fn is_full(&self) -> bool {
        self.len == OT_MAX_SLICES
    }

    /// The stored slices, in insertion order.
    pub fn as_slice(&self) -> &[FrameSlice] {
        &self.slices[..self.len]
    }

    /// Write all 64 records followed by the slice count.
    ///
    /// Unused records are written as zeros.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for slice in self.as_slice() {
            writer.write_u32::<BigEndian>(slice.start)?;
            writer.write_u32::<BigEndian>(slice.end)?;
            writer.write_u32::<BigEndian>(OT_SLICE_FILLER)?;
        }

        let unused = (OT_MAX_SLICES - self.len) * OT_SLICE_RECORD_SIZE;
        writer.write_all(&vec![0u8; unused])?;

        writer.write_u32::<BigEndian>(self.len as u32)?;

        Ok(())
    }
}
