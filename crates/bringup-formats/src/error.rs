//! Error types shared by every codec in the crate

use crate::code::CodeDomain;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when decoding, encoding or repacking an image
#[derive(Debug, Error)]
pub enum FormatError {
    /// A read ran past the end of the buffer
    #[error("read of {len} bytes at offset {offset:#x} exceeds buffer of {available} bytes")]
    OutOfBounds {
        /// Offset of the attempted read
        offset: usize,
        /// Width of the attempted read
        len: usize,
        /// Total buffer length
        available: usize,
    },

    /// An enumerated field holds a code outside its closed set
    #[error("unknown {domain} code {code}")]
    UnknownVariant {
        /// Enumeration the code was resolved against
        domain: CodeDomain,
        /// Raw code found in the data
        code: u32,
    },

    /// A text field is not valid in its declared encoding
    #[error("invalid encoding in {field}: {reason}")]
    InvalidEncoding {
        /// Name of the offending field
        field: &'static str,
        /// Decoder diagnostic
        reason: String,
    },

    /// Format-specific semantic validation failed
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A store entry payload overruns the buffer
    #[error(
        "entry payload at {offset:#x} declares {length} bytes but only {available} are available"
    )]
    Truncated {
        /// Absolute offset of the payload
        offset: usize,
        /// Declared payload length
        length: usize,
        /// Bytes left in the buffer from `offset`
        available: usize,
    },

    /// Declared entry length disagrees with the bytes held for it
    #[error("length mismatch: declared {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Declared length
        expected: usize,
        /// Bytes actually present
        actual: usize,
    },

    /// Replacement artifact size differs from the entry it replaces
    #[error("artifact {} is {actual} bytes, entry expects {expected}", artifact.display())]
    RepackSizeMismatch {
        /// Artifact that was rejected
        artifact: PathBuf,
        /// Declared entry length
        expected: usize,
        /// Artifact length on disk
        actual: usize,
    },

    /// Binary read/write error
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// IO error during loading, extraction or repacking
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for FormatError {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(io) => Self::Io(io),
            other => Self::BinRead(other.to_string()),
        }
    }
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormatError::OutOfBounds {
            offset: 0x20,
            len: 16,
            available: 40,
        };
        assert!(err.to_string().contains("0x20"));
        assert!(err.to_string().contains("40"));

        let err = FormatError::UnknownVariant {
            domain: CodeDomain::LoadKind,
            code: 9,
        };
        assert_eq!(err.to_string(), "unknown load kind code 9");

        let err = FormatError::RepackSizeMismatch {
            artifact: PathBuf::from("out/1-42-3-7-0x0.bin"),
            expected: 4,
            actual: 5,
        };
        assert!(err.to_string().contains("1-42-3-7-0x0.bin"));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_io_error_passthrough() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = FormatError::from(binrw::Error::Io(io));
        assert!(matches!(err, FormatError::Io(_)));
    }
}
