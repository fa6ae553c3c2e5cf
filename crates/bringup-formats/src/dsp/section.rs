//! DSP image section records

use crate::code::{code_enum, resolve};
use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::record::FixedRecord;
use binrw::io::Cursor;
use binrw::BinWrite;

code_enum! {
    /// Kind of content a section holds
    pub enum SectionType in SectionType {
        /// Executable code
        Code = 0 => "DSP_IMAGE_SEC_TYPE_CODE",
        /// Initialised data
        Data = 1 => "DSP_IMAGE_SEC_TYPE_DATA",
        /// End-of-range marker; counts the real types, accepted if it shows up
        Butt = 2 => "DSP_IMAGE_SEC_TYPE_BUTT",
    }
}

code_enum! {
    /// How the coprocessor loader places a section
    pub enum LoadKind in LoadKind {
        /// Loaded once at boot
        Static = 0 => "DSP_IMAGE_SEC_LOAD_STATIC",
        /// Loaded on demand
        Dynamic = 1 => "DSP_IMAGE_SEC_LOAD_DYNAMIC",
        /// Reserved buffer, nothing copied
        Buffer = 2 => "DSP_IMAGE_SEC_LOAD_BUFFER",
        /// Modem entry point
        ModemEntry = 3 => "DSP_IMAGE_SEC_LOAD_MODEM_ENTRY",
        /// End-of-range marker; counts the real kinds, accepted if it shows up
        Butt = 4 => "DSP_IMAGE_SEC_LOAD_BUTT",
    }
}

/// On-disk section record with raw codes (16 bytes)
#[derive(Debug, Clone, PartialEq, Eq, BinWrite)]
#[bw(little)]
pub struct RawSection {
    /// Section index
    pub index: u16,
    /// Raw [`SectionType`] code
    pub type_code: u8,
    /// Raw [`LoadKind`] code
    pub load_code: u8,
    /// Offset of the section data in the image
    pub src_offset: u32,
    /// Destination offset in coprocessor memory
    pub dst_offset: u32,
    /// Section size in bytes
    pub size: u32,
}

/// A decoded section table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    /// Section index as stored in the record
    pub index: u16,
    /// Section type
    pub kind: SectionType,
    /// Load kind
    pub load: LoadKind,
    /// Offset of the section data in the image
    pub src_offset: u32,
    /// Destination offset in coprocessor memory
    pub dst_offset: u32,
    /// Section size in bytes
    pub size: u32,
}

impl SectionEntry {
    /// Create a section entry
    pub fn new(
        index: u16,
        kind: SectionType,
        load: LoadKind,
        src_offset: u32,
        dst_offset: u32,
        size: u32,
    ) -> Self {
        Self {
            index,
            kind,
            load,
            src_offset,
            dst_offset,
            size,
        }
    }
}

impl RawSection {
    /// Read the record fields from a 16-byte slot
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let cursor = ByteCursor::new(bytes);
        Ok(Self {
            index: cursor.u16_at(0)?,
            type_code: cursor.u8_at(2)?,
            load_code: cursor.u8_at(3)?,
            src_offset: cursor.u32_at(4)?,
            dst_offset: cursor.u32_at(8)?,
            size: cursor.u32_at(12)?,
        })
    }
}

impl TryFrom<RawSection> for SectionEntry {
    type Error = crate::error::FormatError;

    fn try_from(raw: RawSection) -> Result<Self> {
        Ok(Self {
            index: raw.index,
            kind: resolve(u32::from(raw.type_code))?,
            load: resolve(u32::from(raw.load_code))?,
            src_offset: raw.src_offset,
            dst_offset: raw.dst_offset,
            size: raw.size,
        })
    }
}

impl From<&SectionEntry> for RawSection {
    fn from(entry: &SectionEntry) -> Self {
        Self {
            index: entry.index,
            type_code: entry.kind.into(),
            load_code: entry.load.into(),
            src_offset: entry.src_offset,
            dst_offset: entry.dst_offset,
            size: entry.size,
        }
    }
}

impl FixedRecord for SectionEntry {
    const SIZE: usize = 16;

    fn read_record(bytes: &[u8]) -> Result<Self> {
        RawSection::read(bytes)?.try_into()
    }

    fn write_record(&self, out: &mut Vec<u8>) -> Result<()> {
        let mut bytes = Vec::with_capacity(Self::SIZE);
        RawSection::from(self).write_options(
            &mut Cursor::new(&mut bytes),
            binrw::Endian::Little,
            (),
        )?;
        out.extend_from_slice(&bytes);
        Ok(())
    }
}
