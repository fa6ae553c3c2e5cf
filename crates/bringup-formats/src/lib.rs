//! Binary codecs for embedded bring-up images
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Firmware symbol names don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::use_self)] // Type clarity
//! This crate reads and writes the small fixed-layout containers found on
//! bring-up partitions, all built on one shared record framework.
//!
//! # Supported Formats
//!
//! - **DSP image**: CM3 coprocessor image header with a bounded section table
//! - **Boot header**: 28-byte fastboot bootloader header
//! - **OEM-info**: key/value settings blob with tag-discovered entries,
//!   supporting extraction and in-place repacking
//!
//! # Framework
//!
//! - [`cursor`]: bounds-checked little-endian reads
//! - [`code`]: closed enumerations resolved from raw codes
//! - [`record`]: fixed-size record codec
//! - [`table`]: bounded tables of records behind a header
//! - [`scan`]: magic-tag scanning, overlapping hits included
//!
//! All multi-byte integers are little-endian. Images are loaded fully into
//! memory before decoding starts.

#![warn(missing_docs)]

pub mod boot;
pub mod code;
pub mod cursor;
/// DSP (CM3) coprocessor image format
pub mod dsp;
pub mod error;
/// OEM-info settings store with extraction and repacking
pub mod oeminfo;
pub mod record;
pub mod scan;
pub mod table;

pub use error::{FormatError, Result};

use std::path::Path;

/// Common container trait implemented by every format
pub trait Container: Sized {
    /// Parse from an in-memory buffer whose container starts at offset 0
    fn parse(data: &[u8]) -> Result<Self>;

    /// Read and parse from a file, honouring the format's start offset
    fn open(path: &Path) -> Result<Self>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>>;

    /// Verify that parsing and rebuilding reproduces `data`
    fn verify_round_trip(data: &[u8]) -> Result<()> {
        let rebuilt = Self::parse(data)?.build()?;
        if data.len() != rebuilt.len() {
            return Err(FormatError::LengthMismatch {
                expected: data.len(),
                actual: rebuilt.len(),
            });
        }
        if let Some(pos) = data.iter().zip(&rebuilt).position(|(a, b)| a != b) {
            return Err(FormatError::InvalidImage(format!(
                "rebuilt bytes differ from input at offset {pos:#x}"
            )));
        }
        Ok(())
    }
}
