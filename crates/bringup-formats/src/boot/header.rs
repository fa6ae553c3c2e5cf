//! Bootloader image header parsing and building

use crate::Container;
use crate::cursor::ByteCursor;
use crate::error::{FormatError, Result};
use crate::record::FixedRecord;
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Default offset of the header inside a bootloader image file
pub const DEFAULT_START_OFFSET: u64 = 0x800;

/// Encoded header width
pub const HEADER_SIZE: usize = 28;

/// Bootloader (fastboot) image header
///
/// The header is a flat 28-byte little-endian structure:
/// - First instruction word (4 bytes)
/// - Magic text, ASCII, NUL padded (16 bytes)
/// - Load address (4 bytes)
/// - End address (4 bytes)
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct BootHeader {
    /// First instruction executed by the boot ROM
    pub first_command: u32,
    /// Magic text
    pub magic: [u8; 16],
    /// Address the image is loaded to
    pub load_address: u32,
    /// Last address covered by the image
    pub end_address: u32,
}

impl BootHeader {
    /// Create a header, padding `magic` with NULs
    pub fn new(first_command: u32, magic: &str, load_address: u32, end_address: u32) -> Self {
        let mut raw = [0u8; 16];
        let len = magic.len().min(raw.len());
        raw[..len].copy_from_slice(&magic.as_bytes()[..len]);
        Self {
            first_command,
            magic: raw,
            load_address,
            end_address,
        }
    }

    /// Parse a header at offset 0 of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_at(data, 0)
    }

    /// Parse a header at `offset` within `data`
    pub fn parse_at(data: &[u8], offset: usize) -> Result<Self> {
        let header = Self::decode_at(data, offset)?;
        header.validate()?;
        Ok(header)
    }

    /// Read the header from an image file at [`DEFAULT_START_OFFSET`]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_at(path, DEFAULT_START_OFFSET)
    }

    /// Read the header from an image file at `offset`
    pub fn open_at(path: impl AsRef<Path>, offset: u64) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(offset))?;

        let mut data = Vec::with_capacity(HEADER_SIZE);
        file.take(HEADER_SIZE as u64).read_to_end(&mut data)?;
        debug!(
            "Read {} header bytes from {} at {:#x}",
            data.len(),
            path.display(),
            offset
        );
        Self::parse(&data)
    }

    /// Check that the magic field is ASCII
    pub fn validate(&self) -> Result<()> {
        self.magic_str().map(|_| ())
    }

    /// Magic text with trailing NUL padding removed
    pub fn magic_str(&self) -> Result<&str> {
        if let Some(pos) = self.magic.iter().position(|b| !b.is_ascii()) {
            return Err(FormatError::InvalidEncoding {
                field: "magic",
                reason: format!(
                    "byte {:#04x} at position {} is not ASCII",
                    self.magic[pos], pos
                ),
            });
        }
        let text = std::str::from_utf8(&self.magic).map_err(|e| FormatError::InvalidEncoding {
            field: "magic",
            reason: e.to_string(),
        })?;
        Ok(text.trim_end_matches('\0'))
    }

    /// Size of the loaded region, inclusive of the end address
    pub fn load_size(&self) -> Option<u32> {
        self.end_address
            .checked_sub(self.load_address)
            .and_then(|span| span.checked_add(1))
    }

    /// Build the 28-byte header
    pub fn build(&self) -> Result<Vec<u8>> {
        self.validate()?;
        self.to_bytes()
    }
}

impl FixedRecord for BootHeader {
    const SIZE: usize = HEADER_SIZE;

    fn read_record(bytes: &[u8]) -> Result<Self> {
        // binrw would report a short read as an IO error
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

impl Container for BootHeader {
    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    fn open(path: &Path) -> Result<Self> {
        Self::open(path)
    }

    fn build(&self) -> Result<Vec<u8>> {
        self.build()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fastboot_bytes() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(b"FASTBOOT\0\0\0\0\0\0\0\0");
        data.extend_from_slice(&0x8200_0000u32.to_le_bytes());
        data.extend_from_slice(&0x82FF_FFFFu32.to_le_bytes());
        data
    }

    #[test]
    fn test_parse_fastboot_header() {
        let header = BootHeader::parse(&fastboot_bytes()).unwrap();
        assert_eq!(header.first_command, 0x0000_0001);
        assert_eq!(&header.magic, b"FASTBOOT\0\0\0\0\0\0\0\0");
        assert_eq!(header.magic_str().unwrap(), "FASTBOOT");
        assert_eq!(header.load_address, 0x8200_0000);
        assert_eq!(header.end_address, 0x82FF_FFFF);
        assert_eq!(header.load_size(), Some(0x0100_0000));
    }

    #[test]
    fn test_parse_at_default_offset() {
        let mut data = vec![0xCC; DEFAULT_START_OFFSET as usize];
        data.extend_from_slice(&fastboot_bytes());
        let header = BootHeader::parse_at(&data, DEFAULT_START_OFFSET as usize).unwrap();
        assert_eq!(header, BootHeader::parse(&fastboot_bytes()).unwrap());
    }

    #[test]
    fn test_short_data_is_out_of_bounds() {
        let data = fastboot_bytes();
        assert!(matches!(
            BootHeader::parse(&data[..27]),
            Err(FormatError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_non_ascii_magic() {
        let mut data = fastboot_bytes();
        data[6] = 0xC3;
        match BootHeader::parse(&data) {
            Err(FormatError::InvalidEncoding { field, reason }) => {
                assert_eq!(field, "magic");
                assert!(reason.contains("0xc3"));
            }
            other => panic!("expected InvalidEncoding, got {other:?}"),
        }
    }

    #[test]
    fn test_build_round_trip() {
        let header = BootHeader::new(1, "FASTBOOT", 0x8200_0000, 0x82FF_FFFF);
        assert_eq!(header.build().unwrap(), fastboot_bytes());
    }

    #[test]
    fn test_inverted_range_has_no_size() {
        let header = BootHeader::new(0, "X", 0x10, 0x0F);
        assert_eq!(header.load_size(), None);
    }
}
