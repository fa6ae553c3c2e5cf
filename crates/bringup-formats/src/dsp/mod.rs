//! DSP (CM3) coprocessor image format
//!
//! The image sits at a fixed offset (0x800) inside its partition file and
//! starts with a header followed by a bounded section table.
//!
//! # Format Overview
//!
//! - 24-byte timestamp text, u32 image size, u32 section count
//! - Up to 30 section records of 16 bytes each
//! - All multi-byte integers: little-endian
//! - An image size of zero marks an empty or invalid image
//!
//! # Usage
//!
//! ```rust,no_run
//! use bringup_formats::dsp::DspImage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = DspImage::open("lpm3.img")?;
//! println!("timestamp: {}", image.header.timestamp_str()?);
//! for section in &image.header.sections {
//!     println!("{} {} {:#x}", section.index, section.kind, section.size);
//! }
//! # Ok(())
//! # }
//! ```

pub mod header;
pub mod image;
pub mod section;

pub use header::{HeaderPrefix, ImageHeader, MAX_SECTIONS, SECTION_TABLE_OFFSET};
pub use image::{DspImage, LPM3_MAGIC_OFFSET, START_OFFSET};
pub use section::{LoadKind, RawSection, SectionEntry, SectionType};
