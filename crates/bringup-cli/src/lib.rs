//! Command-line front end for the bring-up image codecs.
//!
//! The binary is a thin wrapper: it parses a [`Config`], sets up logging and
//! calls [`run`]. Everything here only dispatches into `bringup-formats` and
//! prints what comes back.

pub mod config;
pub mod error;
pub mod render;

pub use config::{Command, Config, OemInfoAction};
pub use error::ConfigError;

use anyhow::{Context, Result};
use bringup_formats::boot::BootHeader;
use bringup_formats::dsp::DspImage;
use bringup_formats::oeminfo::Store;
use std::io::Write;
use tracing::info;

/// Run the configured command, writing human output to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    match &config.command {
        Command::Dsp {
            image,
            start_offset,
        } => {
            let dsp = DspImage::open_at(image, *start_offset)
                .with_context(|| format!("failed to parse DSP image {}", image.display()))?;
            out.write_all(render::dsp_header(&dsp.header)?.as_bytes())?;
        }
        Command::Boot {
            image,
            start_offset,
        } => {
            let header = BootHeader::open_at(image, *start_offset)
                .with_context(|| format!("failed to parse boot header in {}", image.display()))?;
            out.write_all(render::boot_header(&header)?.as_bytes())?;
        }
        Command::Oeminfo { action } => run_oeminfo(action, out)?,
    }
    Ok(())
}

fn run_oeminfo(action: &OemInfoAction, out: &mut impl Write) -> Result<()> {
    let image = match action {
        OemInfoAction::Extract { image, .. }
        | OemInfoAction::Repack { image, .. }
        | OemInfoAction::List { image, .. } => image,
    };
    let mut store = Store::open(image)
        .with_context(|| format!("failed to parse oeminfo image {}", image.display()))?;
    info!("Loaded {} entries from {}", store.len(), image.display());

    match action {
        OemInfoAction::Extract { output, print, .. } => {
            if *print {
                out.write_all(render::store_entries(&store).as_bytes())?;
            }
            let count = store
                .extract(output)
                .with_context(|| format!("failed to extract to {}", output.display()))?;
            writeln!(out, "Extracted {} entries to '{}'.", count, output.display())?;
        }
        OemInfoAction::Repack { input, output, .. } => {
            let count = store
                .repack(input, output)
                .with_context(|| format!("failed to repack from {}", input.display()))?;
            writeln!(out, "Repacked {} entries to '{}'.", count, output.display())?;
        }
        OemInfoAction::List { json, .. } => {
            if *json {
                writeln!(out, "{}", render::store_json(&store)?)?;
            } else {
                out.write_all(render::store_entries(&store).as_bytes())?;
            }
        }
    }
    Ok(())
}
