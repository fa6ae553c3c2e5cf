//! DSP image header and its section table
//!
//! Layout (little-endian):
//! - 24-byte build timestamp text
//! - u32 image size
//! - u32 declared section count
//! - up to [`MAX_SECTIONS`] × 16-byte section records

use crate::dsp::section::SectionEntry;
use crate::error::{FormatError, Result};
use crate::record::FixedRecord;
use crate::table::{decode_table, encode_table, effective_count};
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use tracing::debug;

/// Maximum number of section records read from a header
pub const MAX_SECTIONS: usize = 30;

/// Offset of the first section record
pub const SECTION_TABLE_OFFSET: usize = 32;

/// Fixed 32-byte prefix in front of the section table
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct HeaderPrefix {
    /// Build timestamp, NUL padded
    pub timestamp: [u8; 24],
    /// Image size in bytes
    pub image_size: u32,
    /// Declared number of sections
    pub section_count: u32,
}

/// Parsed DSP image header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Raw timestamp field
    pub timestamp: [u8; 24],
    /// Image size in bytes, never zero for a parsed header
    pub image_size: u32,
    /// Section count as declared on disk
    pub declared_section_count: u32,
    /// Section table, `min(declared_section_count, MAX_SECTIONS)` entries
    pub sections: Vec<SectionEntry>,
}

impl ImageHeader {
    /// Create a header whose declared count matches `sections`
    pub fn new(timestamp: &str, image_size: u32, sections: Vec<SectionEntry>) -> Self {
        let mut raw = [0u8; 24];
        let len = timestamp.len().min(raw.len());
        raw[..len].copy_from_slice(&timestamp.as_bytes()[..len]);
        Self {
            timestamp: raw,
            image_size,
            declared_section_count: sections.len() as u32,
            sections,
        }
    }

    /// Parse a header that starts at offset 0 of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        let prefix = HeaderPrefix::decode_at(data, 0)?;

        if prefix.image_size == 0 {
            return Err(FormatError::InvalidImage("image size is zero".to_string()));
        }

        let sections = decode_table::<SectionEntry>(
            data,
            SECTION_TABLE_OFFSET,
            prefix.section_count,
            MAX_SECTIONS,
        )?;

        let header = Self {
            timestamp: prefix.timestamp,
            image_size: prefix.image_size,
            declared_section_count: prefix.section_count,
            sections,
        };
        header.validate()?;

        debug!(
            "Parsed DSP header: size={:#x}, sections={}/{}",
            header.image_size,
            header.sections.len(),
            header.declared_section_count
        );
        Ok(header)
    }

    /// Build the header and section table
    ///
    /// The declared count is written as stored; at most [`MAX_SECTIONS`]
    /// records follow it.
    pub fn build(&self) -> Result<Vec<u8>> {
        self.validate()?;

        let mut out = Vec::with_capacity(
            SECTION_TABLE_OFFSET + self.sections.len().min(MAX_SECTIONS) * SectionEntry::SIZE,
        );
        HeaderPrefix {
            timestamp: self.timestamp,
            image_size: self.image_size,
            section_count: self.declared_section_count,
        }
        .write_record(&mut out)?;
        encode_table(&self.sections, MAX_SECTIONS, &mut out)?;
        Ok(out)
    }

    /// Validate header fields
    pub fn validate(&self) -> Result<()> {
        if self.image_size == 0 {
            return Err(FormatError::InvalidImage("image size is zero".to_string()));
        }

        let expected = effective_count(self.declared_section_count, MAX_SECTIONS);
        if self.sections.len() != expected {
            return Err(FormatError::LengthMismatch {
                expected,
                actual: self.sections.len(),
            });
        }

        self.timestamp_str().map(|_| ())
    }

    /// Timestamp text with trailing NUL padding removed
    pub fn timestamp_str(&self) -> Result<&str> {
        let text = std::str::from_utf8(&self.timestamp).map_err(|e| {
            FormatError::InvalidEncoding {
                field: "timestamp",
                reason: e.to_string(),
            }
        })?;
        Ok(text.trim_end_matches('\0'))
    }

    /// Number of sections actually held
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Encoded size of header plus section table
    pub fn encoded_len(&self) -> usize {
        SECTION_TABLE_OFFSET + self.sections.len().min(MAX_SECTIONS) * SectionEntry::SIZE
    }
}

impl FixedRecord for HeaderPrefix {
    const SIZE: usize = SECTION_TABLE_OFFSET;

    fn read_record(bytes: &[u8]) -> Result<Self> {
        Ok(Self::read_options(
            &mut Cursor::new(bytes),
            binrw::Endian::Little,
            (),
        )?)
    }

    fn write_record(&self, out: &mut Vec<u8>) -> Result<()> {
        let mut bytes = Vec::with_capacity(Self::SIZE);
        self.write_options(&mut Cursor::new(&mut bytes), binrw::Endian::Little, ())?;
        out.extend_from_slice(&bytes);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::dsp::section::{LoadKind, SectionType};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn header_bytes(image_size: u32, count: u32, records: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"2023-01-01 12:00:00\0\0\0\0\0");
        data.extend_from_slice(&image_size.to_le_bytes());
        data.extend_from_slice(&count.to_le_bytes());
        for i in 0..records {
            data.extend_from_slice(&(i as u16).to_le_bytes());
            data.push((i % 2) as u8);
            data.push((i % 4) as u8);
            data.extend_from_slice(&(i * 0x100).to_le_bytes());
            data.extend_from_slice(&(0x1000_0000 + i).to_le_bytes());
            data.extend_from_slice(&0x80u32.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_parse_header() {
        let header = ImageHeader::parse(&header_bytes(0x4000, 2, 2)).unwrap();
        assert_eq!(header.timestamp_str().unwrap(), "2023-01-01 12:00:00");
        assert_eq!(header.image_size, 0x4000);
        assert_eq!(header.declared_section_count, 2);
        assert_eq!(header.sections.len(), 2);
        assert_eq!(header.sections[1].kind, SectionType::Data);
        assert_eq!(header.sections[1].load, LoadKind::Dynamic);
        assert_eq!(header.sections[1].src_offset, 0x100);
    }

    #[test]
    fn test_zero_image_size_is_invalid() {
        let result = ImageHeader::parse(&header_bytes(0, 1, 1));
        assert!(matches!(result, Err(FormatError::InvalidImage(_))));
    }

    #[test]
    fn test_zero_image_size_wins_over_bad_codes() {
        let mut data = header_bytes(0, 1, 1);
        data[SECTION_TABLE_OFFSET + 2] = 0xEE;
        assert!(matches!(
            ImageHeader::parse(&data),
            Err(FormatError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_declared_count_is_capped() {
        let header = ImageHeader::parse(&header_bytes(0x10, 500, 30)).unwrap();
        assert_eq!(header.declared_section_count, 500);
        assert_eq!(header.sections.len(), MAX_SECTIONS);
    }

    #[test]
    fn test_missing_sections_are_out_of_bounds() {
        let result = ImageHeader::parse(&header_bytes(0x10, 3, 2));
        assert!(matches!(result, Err(FormatError::OutOfBounds { .. })));
    }

    #[test]
    fn test_invalid_timestamp_encoding() {
        let mut data = header_bytes(0x10, 0, 0);
        data[0] = 0xFF;
        assert!(matches!(
            ImageHeader::parse(&data),
            Err(FormatError::InvalidEncoding {
                field: "timestamp",
                ..
            })
        ));
    }

    #[test]
    fn test_build_matches_input() {
        let data = header_bytes(0x4000, 3, 3);
        let header = ImageHeader::parse(&data).unwrap();
        assert_eq!(header.build().unwrap(), data);
        assert_eq!(header.encoded_len(), data.len());
    }

    #[test]
    fn test_new_pads_timestamp() {
        let header = ImageHeader::new(
            "Jan  1 2024",
            0x200,
            vec![SectionEntry::new(
                0,
                SectionType::Code,
                LoadKind::Static,
                0x40,
                0,
                0x1C0,
            )],
        );
        let data = header.build().unwrap();
        assert_eq!(&data[..11], b"Jan  1 2024");
        assert!(data[11..24].iter().all(|&b| b == 0));
        assert_eq!(ImageHeader::parse(&data).unwrap(), header);
    }

    proptest! {
        #[test]
        fn sections_are_min_of_declared_and_cap(declared in 0u32..200) {
            let data = header_bytes(0x100, declared, 30);
            let header = ImageHeader::parse(&data).unwrap();
            prop_assert_eq!(header.sections.len(), (declared as usize).min(MAX_SECTIONS));
            for (i, section) in header.sections.iter().enumerate() {
                prop_assert_eq!(section.index as usize, i);
            }
        }

        #[test]
        fn parse_is_idempotent(declared in 0u32..40) {
            let data = header_bytes(0x100, declared, 30);
            prop_assert_eq!(
                ImageHeader::parse(&data).unwrap(),
                ImageHeader::parse(&data).unwrap()
            );
        }
    }
}
