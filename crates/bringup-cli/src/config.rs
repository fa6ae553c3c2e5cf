//! Command-line configuration.
//!
//! Every option can be given on the command line or through a
//! `BRINGUP_*` environment variable; defaults match the usual partition
//! layout (headers at 0x800).
//!
//! # Example
//!
//! ```no_run
//! use bringup_cli::Config;
//!
//! let config = Config::from_args();
//! config.validate().expect("Invalid configuration");
//! ```

use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Default offset of DSP images and boot headers inside their files
pub const DEFAULT_START_OFFSET: u64 = 0x800;

/// Configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bringup",
    about = "Inspect DSP images and boot headers, extract and repack OEM-info stores",
    version
)]
pub struct Config {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, env = "BRINGUP_LOG", default_value = "info")]
    pub log_level: String,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show a DSP (CM3) image header and its section table
    Dsp {
        /// Path to the image
        image: PathBuf,

        /// Offset of the header inside the file (e.g. 0x800)
        #[arg(
            long,
            env = "BRINGUP_START_OFFSET",
            default_value = "0x800",
            value_parser = parse_offset
        )]
        start_offset: u64,
    },

    /// Show a bootloader (fastboot.img) header
    Boot {
        /// Bootloader image
        image: PathBuf,

        /// Offset of the header inside the file (e.g. 0x20)
        #[arg(
            long,
            env = "BRINGUP_START_OFFSET",
            default_value = "0x800",
            value_parser = parse_offset
        )]
        start_offset: u64,
    },

    /// Work with OEM-info stores
    Oeminfo {
        /// OEM-info operation
        #[command(subcommand)]
        action: OemInfoAction,
    },
}

/// OEM-info store operations.
#[derive(Debug, Clone, Subcommand)]
pub enum OemInfoAction {
    /// Extract every entry payload to a directory
    Extract {
        /// Path to the oeminfo image
        image: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Print entries while extracting
        #[arg(short, long)]
        print: bool,
    },

    /// Write extracted payloads back into the image
    Repack {
        /// Path to the oeminfo image
        image: PathBuf,

        /// Path to the extracted folder
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "oeminfo.pack")]
        output: PathBuf,
    },

    /// List entries without extracting them
    List {
        /// Path to the oeminfo image
        image: PathBuf,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Config {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Image the command reads.
    pub fn image(&self) -> &Path {
        match &self.command {
            Command::Dsp { image, .. } | Command::Boot { image, .. } => image,
            Command::Oeminfo { action } => match action {
                OemInfoAction::Extract { image, .. }
                | OemInfoAction::Repack { image, .. }
                | OemInfoAction::List { image, .. } => image,
            },
        }
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The input image doesn't exist or isn't a file
    /// - The repack input folder isn't a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        let image = self.image();
        if !image.is_file() {
            return Err(ConfigError::MissingImage(image.to_path_buf()));
        }

        if let Command::Oeminfo {
            action: OemInfoAction::Repack { input, output, .. },
        } = &self.command
        {
            if !input.is_dir() {
                return Err(ConfigError::NotADirectory(input.clone()));
            }
            if output.as_path() == image {
                return Err(ConfigError::OutputIsInput(output.clone()));
            }
        }

        Ok(())
    }
}

/// Parse an offset in decimal or with a `0x`, `0o` or `0b` prefix.
pub fn parse_offset(value: &str) -> Result<u64, String> {
    let trimmed = value.trim().replace('_', "");
    let lower = trimmed.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };

    u64::from_str_radix(digits, radix).map_err(|e| format!("invalid offset '{value}': {e}"))
}
