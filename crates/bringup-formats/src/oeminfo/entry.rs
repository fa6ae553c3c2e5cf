//! OEM-info store entries
//!
//! Each entry starts with a 28-byte header:
//! - Magic tag `OEM_INFO` (8 bytes)
//! - Version, id, type, payload length, age (u32 little-endian each)
//!
//! The payload is not part of the header record. It lives [`PAYLOAD_OFFSET`]
//! bytes after the start of the header, the gap being reserved metadata room.

use crate::cursor::ByteCursor;
use crate::error::{FormatError, Result};
use crate::record::FixedRecord;
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use serde::Serialize;
use std::fmt;

/// Tag that marks the start of every entry
pub const MAGIC: [u8; 8] = *b"OEM_INFO";

/// Displacement of the payload from the start of the entry header
pub const PAYLOAD_OFFSET: usize = 0x200;

/// Encoded header width
pub const HEADER_SIZE: usize = 28;

/// Fixed entry header record
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct StoreEntryHeader {
    /// Copy of the magic tag
    pub magic: [u8; 8],
    /// Entry layout version
    pub version: u32,
    /// Entry identifier
    pub id: u32,
    /// Entry type
    pub entry_type: u32,
    /// Payload length in bytes
    pub length: u32,
    /// Write counter
    pub age: u32,
}

impl StoreEntryHeader {
    /// Create a header carrying the standard magic tag
    pub fn new(version: u32, id: u32, entry_type: u32, length: u32, age: u32) -> Self {
        Self {
            magic: MAGIC,
            version,
            id,
            entry_type,
            length,
            age,
        }
    }

    /// Build the 28-byte header
    pub fn build(&self) -> Result<Vec<u8>> {
        self.to_bytes()
    }
}

impl FixedRecord for StoreEntryHeader {
    const SIZE: usize = HEADER_SIZE;

    fn read_record(bytes: &[u8]) -> Result<Self> {
        ByteCursor::new(bytes).bytes(0, HEADER_SIZE)?;
        Ok(Self::read_options(
            &mut Cursor::new(bytes),
            binrw::Endian::Little,
            (),
        )?)
    }

    fn write_record(&self, out: &mut Vec<u8>) -> Result<()> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        self.write_options(&mut Cursor::new(&mut bytes), binrw::Endian::Little, ())?;
        out.extend_from_slice(&bytes);
        Ok(())
    }
}

/// One entry discovered in an OEM-info store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Decoded header
    pub header: StoreEntryHeader,
    payload: Vec<u8>,
    offset: usize,
}

impl StoreEntry {
    /// Create an entry, checking the payload against the declared length
    pub fn new(header: StoreEntryHeader, payload: Vec<u8>, offset: usize) -> Result<Self> {
        if payload.len() != header.length as usize {
            return Err(FormatError::LengthMismatch {
                expected: header.length as usize,
                actual: payload.len(),
            });
        }
        Ok(Self {
            header,
            payload,
            offset,
        })
    }

    /// Decode the entry whose header starts at `offset` within `data`
    ///
    /// A payload running past the end of `data` is [`FormatError::Truncated`].
    pub fn decode_at(data: &[u8], offset: usize) -> Result<Self> {
        let header = StoreEntryHeader::decode_at(data, offset)?;
        let start = offset.saturating_add(PAYLOAD_OFFSET);
        let length = header.length as usize;

        let payload = ByteCursor::new(data)
            .bytes(start, length)
            .map_err(|_| FormatError::Truncated {
                offset: start,
                length,
                available: data.len().saturating_sub(start),
            })?
            .to_vec();

        Self::new(header, payload, offset)
    }

    /// Absolute offset of the entry header within the store
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute offset of the payload within the store
    pub const fn payload_offset(&self) -> usize {
        self.offset + PAYLOAD_OFFSET
    }

    /// Payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Declared payload length
    pub fn len(&self) -> usize {
        self.header.length as usize
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.header.length == 0
    }

    /// Key identifying the entry, unique through its offset
    pub fn display_key(&self) -> DisplayKey {
        DisplayKey {
            version: self.header.version,
            id: self.header.id,
            entry_type: self.header.entry_type,
            age: self.header.age,
            offset: self.offset,
        }
    }

    /// File name the payload is extracted to
    pub fn artifact_name(&self) -> String {
        format!("{}.bin", self.display_key())
    }

    /// Serializable summary of the entry
    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            key: self.display_key().to_string(),
            version: self.header.version,
            id: self.header.id,
            entry_type: self.header.entry_type,
            length: self.header.length,
            age: self.header.age,
            offset: self.offset,
        }
    }

    pub(crate) fn replace_payload(&mut self, payload: &[u8]) {
        self.payload.clear();
        self.payload.extend_from_slice(payload);
    }
}

/// Identity of a store entry: version, id, type, age and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayKey {
    /// Entry version
    pub version: u32,
    /// Entry identifier
    pub id: u32,
    /// Entry type
    pub entry_type: u32,
    /// Entry age
    pub age: u32,
    /// Header offset within the store
    pub offset: usize,
}

impl fmt::Display for DisplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-0x{:x}",
            self.version, self.id, self.entry_type, self.age, self.offset
        )
    }
}

/// Entry metadata for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    /// Display key
    pub key: String,
    /// Entry version
    pub version: u32,
    /// Entry identifier
    pub id: u32,
    /// Entry type
    #[serde(rename = "type")]
    pub entry_type: u32,
    /// Payload length
    pub length: u32,
    /// Entry age
    pub age: u32,
    /// Header offset within the store
    pub offset: usize,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry_bytes(length: u32, payload: &[u8]) -> Vec<u8> {
        let mut data = StoreEntryHeader::new(1, 42, 3, length, 7).build().unwrap();
        data.resize(PAYLOAD_OFFSET, 0);
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_header_layout() {
        let data = StoreEntryHeader::new(1, 42, 3, 4, 7).build().unwrap();
        assert_eq!(data.len(), HEADER_SIZE);
        assert_eq!(&data[..8], b"OEM_INFO");
        assert_eq!(&data[8..12], &1u32.to_le_bytes());
        assert_eq!(&data[12..16], &42u32.to_le_bytes());
        assert_eq!(&data[16..20], &3u32.to_le_bytes());
        assert_eq!(&data[20..24], &4u32.to_le_bytes());
        assert_eq!(&data[24..28], &7u32.to_le_bytes());
    }

    #[test]
    fn test_decode_entry() {
        let data = entry_bytes(4, &[0xDE, 0xAD, 0xBE, 0xEF]);
        let entry = StoreEntry::decode_at(&data, 0).unwrap();
        assert_eq!(entry.header.id, 42);
        assert_eq!(entry.payload(), &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(entry.offset(), 0);
        assert_eq!(entry.payload_offset(), 0x200);
        assert_eq!(entry.len(), 4);
    }

    #[test]
    fn test_payload_overrun_is_truncated() {
        let data = entry_bytes(8, &[1, 2, 3]);
        match StoreEntry::decode_at(&data, 0) {
            Err(FormatError::Truncated {
                offset,
                length,
                available,
            }) => {
                assert_eq!(offset, 0x200);
                assert_eq!(length, 8);
                assert_eq!(available, 3);
            }
            other => panic!("expected Truncated, got {other:?}"),
        }
    }

    #[test]
    fn test_header_overrun_is_out_of_bounds() {
        let data = entry_bytes(0, &[]);
        assert!(matches!(
            StoreEntry::decode_at(&data[..20], 0),
            Err(FormatError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_new_checks_length() {
        let header = StoreEntryHeader::new(1, 1, 1, 4, 1);
        assert!(matches!(
            StoreEntry::new(header, vec![0; 3], 0),
            Err(FormatError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_display_key_and_artifact_name() {
        let data = entry_bytes(4, &[0; 4]);
        let mut shifted = vec![0u8; 0x1A0];
        shifted.extend_from_slice(&data);

        let entry = StoreEntry::decode_at(&shifted, 0x1A0).unwrap();
        assert_eq!(entry.display_key().to_string(), "1-42-3-7-0x1a0");
        assert_eq!(entry.artifact_name(), "1-42-3-7-0x1a0.bin");
    }

    #[test]
    fn test_summary_serializes_type_field() {
        let entry = StoreEntry::decode_at(&entry_bytes(4, &[0; 4]), 0).unwrap();
        let json = serde_json::to_value(entry.summary()).unwrap();
        assert_eq!(json["key"], "1-42-3-7-0x0");
        assert_eq!(json["type"], 3);
        assert_eq!(json["length"], 4);
    }
}
