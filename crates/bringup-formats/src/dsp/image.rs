//! DSP image container

use crate::Container;
use crate::dsp::header::ImageHeader;
use crate::error::Result;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Offset of the DSP image inside its partition file
pub const START_OFFSET: u64 = 0x800;

/// Offset of the LPM3 magic word inside the partition file
pub const LPM3_MAGIC_OFFSET: u64 = 0x3F8;

/// A DSP (CM3) coprocessor image
///
/// Holds the image bytes from the header onwards together with the parsed
/// header. The header is validated on construction, so a `DspImage` always
/// has a non-zero image size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DspImage {
    /// Parsed header and section table
    pub header: ImageHeader,
    data: Vec<u8>,
}

impl DspImage {
    /// Parse an image whose header starts at offset 0 of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Parse an owned buffer whose header starts at offset 0
    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        let header = ImageHeader::parse(&data)?;
        Ok(Self { header, data })
    }

    /// Read a partition file, skipping to [`START_OFFSET`]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_at(path, START_OFFSET)
    }

    /// Read a partition file, skipping to `offset`
    pub fn open_at(path: impl AsRef<Path>, offset: u64) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        debug!(
            "Read {} bytes of DSP image from {} at {:#x}",
            data.len(),
            path.display(),
            offset
        );
        Self::from_vec(data)
    }

    /// Image bytes starting at the header
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Container for DspImage {
    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    fn open(path: &Path) -> Result<Self> {
        Self::open(path)
    }

    fn build(&self) -> Result<Vec<u8>> {
        let mut out = self.header.build()?;
        if let Some(rest) = self.data.get(out.len()..) {
            out.extend_from_slice(rest);
        }
        Ok(out)
    }
}
