//! Bootloader (fastboot) image header
//!
//! A plain 28-byte header with no table behind it, normally found at offset
//! 0x800 of the bootloader image.

pub mod header;

pub use header::{BootHeader, DEFAULT_START_OFFSET, HEADER_SIZE};
