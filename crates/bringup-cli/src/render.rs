//! Human-readable rendering of parsed containers.

use bringup_formats::Result;
use bringup_formats::boot::BootHeader;
use bringup_formats::dsp::ImageHeader;
use bringup_formats::oeminfo::{Store, StoreEntry};
use std::fmt::Write;

/// Number of payload bytes shown in entry listings
const PREVIEW_LEN: usize = 16;

/// Render a DSP image header as a tree.
pub fn dsp_header(header: &ImageHeader) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "Header");
    let _ = writeln!(out, "|- Timestamp: {}", header.timestamp_str()?);
    let _ = writeln!(out, "|- Image size: {}", header.image_size);
    let _ = writeln!(out, "|- Sections: {}", header.declared_section_count);
    let _ = writeln!(out, "|");

    for section in &header.sections {
        let _ = writeln!(out, "|-- Section {}", section.index);
        let _ = writeln!(out, "   |- Type: {}", section.kind);
        let _ = writeln!(out, "   |- Load: {}", section.load);
        let _ = writeln!(out, "   |- Source offset: 0x{:x}", section.src_offset);
        let _ = writeln!(out, "   |- Destination offset: 0x{:x}", section.dst_offset);
        let _ = writeln!(out, "   |- Size: 0x{:x}", section.size);
    }
    Ok(out)
}

/// Render a bootloader header.
pub fn boot_header(header: &BootHeader) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "First command: 0x{:08x}", header.first_command);
    let _ = writeln!(out, "Magic: {}", header.magic_str()?);
    let _ = writeln!(out, "Load address: 0x{:08x}", header.load_address);
    let _ = writeln!(out, "End address: 0x{:08x}", header.end_address);
    Ok(out)
}

/// Render one line per store entry.
pub fn store_entries(store: &Store) -> String {
    store.entries().iter().fold(String::new(), |mut out, entry| {
        let _ = writeln!(out, "{}", entry_line(entry));
        out
    })
}

/// Render store entries as pretty-printed JSON.
pub fn store_json(store: &Store) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&store.summaries())
}

fn entry_line(entry: &StoreEntry) -> String {
    let payload = entry.payload();
    let preview = hex::encode(&payload[..payload.len().min(PREVIEW_LEN)]);
    let ellipsis = if payload.len() > PREVIEW_LEN { "..." } else { "" };
    format!(
        "{}: version={} id={} type={} age={} length={} offset=0x{:x} data={}{}",
        entry.display_key(),
        entry.header.version,
        entry.header.id,
        entry.header.entry_type,
        entry.header.age,
        entry.header.length,
        entry.offset(),
        preview,
        ellipsis
    )
}
