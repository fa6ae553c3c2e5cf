//! Bounds-checked little-endian access to a byte buffer
//!
//! Every decoder in the crate goes through [`ByteCursor`] so that a short or
//! corrupt image surfaces as [`FormatError::OutOfBounds`] instead of a panic
//! or a silently truncated field. Reads take explicit absolute offsets.
//!
//! Multi-field headers are decoded by binrw once their slot has been bounds
//! checked here; small records such as DSP sections are read field by field
//! with the primitive readers. [`write_bytes`] is the matching checked write.

use crate::error::{FormatError, Result};

/// Read-only view over a byte buffer
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor over `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Borrow `len` bytes starting at `offset`
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| out_of_bounds(offset, len, self.data.len()))
    }

    /// Copy `N` bytes starting at `offset` into an array
    pub fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(offset, N)?);
        Ok(out)
    }

    /// Read a `u8` at `offset`
    pub fn u8_at(&self, offset: usize) -> Result<u8> {
        Ok(self.array::<1>(offset)?[0])
    }

    /// Read a little-endian `u16` at `offset`
    pub fn u16_at(&self, offset: usize) -> Result<u16> {
        self.array(offset).map(u16::from_le_bytes)
    }

    /// Read a little-endian `u32` at `offset`
    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        self.array(offset).map(u32::from_le_bytes)
    }
}

/// Overwrite `bytes.len()` bytes of `data` starting at `offset`
///
/// Nothing is written when the slot does not fit inside `data`.
pub fn write_bytes(data: &mut [u8], offset: usize, bytes: &[u8]) -> Result<()> {
    let available = data.len();
    let slot = offset
        .checked_add(bytes.len())
        .and_then(|end| data.get_mut(offset..end))
        .ok_or_else(|| out_of_bounds(offset, bytes.len(), available))?;
    slot.copy_from_slice(bytes);
    Ok(())
}

fn out_of_bounds(offset: usize, len: usize, available: usize) -> FormatError {
    FormatError::OutOfBounds {
        offset,
        len,
        available,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    const DATA: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn test_little_endian_reads() {
        let cursor = ByteCursor::new(&DATA);
        assert_eq!(cursor.u8_at(0).unwrap(), 0x01);
        assert_eq!(cursor.u16_at(0).unwrap(), 0x0201);
        assert_eq!(cursor.u32_at(4).unwrap(), 0x0807_0605);
        assert_eq!(cursor.u32_at(0).unwrap(), 0x0403_0201);
    }

    #[test]
    fn test_read_past_end_is_out_of_bounds() {
        let cursor = ByteCursor::new(&DATA);
        assert!(cursor.u32_at(5).is_err());

        match cursor.bytes(6, 4) {
            Err(FormatError::OutOfBounds {
                offset,
                len,
                available,
            }) => {
                assert_eq!(offset, 6);
                assert_eq!(len, 4);
                assert_eq!(available, 8);
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_offset_overflow_does_not_panic() {
        let cursor = ByteCursor::new(&DATA);
        assert!(cursor.bytes(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_write_bytes_leaves_neighbours() {
        let mut data = [0xAA; 8];
        write_bytes(&mut data, 2, &[1, 2, 3]).unwrap();
        assert_eq!(data, [0xAA, 0xAA, 1, 2, 3, 0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn test_write_bytes_past_end_writes_nothing() {
        let mut data = [0u8; 4];
        assert!(matches!(
            write_bytes(&mut data, 2, &[9, 9, 9]),
            Err(FormatError::OutOfBounds {
                offset: 2,
                len: 3,
                available: 4
            })
        ));
        assert!(write_bytes(&mut data, usize::MAX, &[9]).is_err());
        assert_eq!(data, [0u8; 4]);
    }
}
