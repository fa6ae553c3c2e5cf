//! Fixed-size record codec
//!
//! A [`FixedRecord`] is a flat little-endian layout of exactly
//! [`FixedRecord::SIZE`] bytes. Decoding at an offset is always bounds
//! checked through [`ByteCursor`] before the record body is handed to the
//! record's own decoder.

use crate::cursor::ByteCursor;
use crate::error::{FormatError, Result};

/// A record with a fixed on-disk width
pub trait FixedRecord: Sized {
    /// Encoded width in bytes
    const SIZE: usize;

    /// Decode from a slice of exactly [`Self::SIZE`] bytes
    fn read_record(bytes: &[u8]) -> Result<Self>;

    /// Append the encoded record to `out`
    fn write_record(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Decode the record that starts at `offset` within `data`
    fn decode_at(data: &[u8], offset: usize) -> Result<Self> {
        let bytes = ByteCursor::new(data).bytes(offset, Self::SIZE)?;
        Self::read_record(bytes)
    }

    /// Encode into a fresh buffer of exactly [`Self::SIZE`] bytes
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(Self::SIZE);
        self.write_record(&mut out)?;
        if out.len() != Self::SIZE {
            return Err(FormatError::LengthMismatch {
                expected: Self::SIZE,
                actual: out.len(),
            });
        }
        Ok(out)
    }
}
