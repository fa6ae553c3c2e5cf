//! Error types for the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input image is missing or not a regular file
    #[error("Image not found: {}", .0.display())]
    MissingImage(PathBuf),

    /// Repack input is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Repack output would overwrite the input image
    #[error("Output {} would overwrite the input image", .0.display())]
    OutputIsInput(PathBuf),
}
