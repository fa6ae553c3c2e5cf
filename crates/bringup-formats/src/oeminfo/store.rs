//! OEM-info store: entry discovery, extraction and repacking

use crate::Container;
use crate::cursor::write_bytes;
use crate::error::{FormatError, Result};
use crate::oeminfo::entry::{EntrySummary, MAGIC, StoreEntry};
use crate::scan::find_all;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// A persistent-settings blob with its entries
///
/// The store owns the whole buffer. Entry offsets are captured once, when
/// the buffer is scanned; repacking only rewrites payload bytes in place
/// and never changes the buffer length, so those offsets stay valid for the
/// lifetime of the store and are never re-derived from the mutated buffer.
///
/// Entry headers are likewise captured at parse time. Payload views are
/// kept in step with the buffer: a repack refreshes every entry whose
/// payload region overlaps the rewritten bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    data: Vec<u8>,
    entries: Vec<StoreEntry>,
}

impl Store {
    /// Parse a store held in memory
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Parse an owned store buffer
    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        let entries = find_all(&data, &MAGIC)
            .map(|offset| StoreEntry::decode_at(&data, offset))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Found {} OEM-info entries in {} bytes",
            entries.len(),
            data.len()
        );
        Ok(Self { data, entries })
    }

    /// Read and parse a store file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_vec(data)
    }

    /// Entries in ascending offset order
    pub fn entries(&self) -> &[StoreEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current store bytes, including any repacked payloads
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the store and return its buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Summaries of every entry, in store order
    pub fn summaries(&self) -> Vec<EntrySummary> {
        self.entries.iter().map(StoreEntry::summary).collect()
    }

    /// Write every payload to `dir`, one artifact per entry
    ///
    /// The directory and its parents are created when missing. Artifacts are
    /// named after each entry's display key. Returns the number written.
    pub fn extract(&self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for entry in &self.entries {
            let path = dir.join(entry.artifact_name());
            write_atomic(&path, entry.payload())?;
            debug!("Extracted {} bytes to {}", entry.len(), path.display());
        }

        info!(
            "Extracted {} entries to '{}'",
            self.entries.len(),
            dir.display()
        );
        Ok(self.entries.len())
    }

    /// Replace the payload of entry `index` in place
    pub fn repack_entry(&mut self, index: usize, payload: &[u8]) -> Result<()> {
        let available = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(FormatError::OutOfBounds {
                offset: index,
                len: 1,
                available,
            })?;

        if payload.len() != entry.len() {
            return Err(FormatError::LengthMismatch {
                expected: entry.len(),
                actual: payload.len(),
            });
        }

        let start = entry.payload_offset();
        write_bytes(&mut self.data, start, payload)?;
        self.refresh_payloads(start, start + payload.len());
        Ok(())
    }

    /// Re-read the payload of every entry overlapping `start..end`
    fn refresh_payloads(&mut self, start: usize, end: usize) {
        for entry in &mut self.entries {
            let from = entry.payload_offset();
            let to = from + entry.len();
            if from < end
                && start < to
                && let Some(bytes) = self.data.get(from..to)
            {
                entry.replace_payload(bytes);
            }
        }
    }

    /// Load every artifact from `dir` and write it over its entry
    ///
    /// All artifacts are read and size-checked before the buffer is touched,
    /// so a missing or mis-sized artifact leaves the store unchanged.
    pub fn apply_artifacts(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();

        let mut payloads = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let path = dir.join(entry.artifact_name());
            let payload = fs::read(&path)?;
            if payload.len() != entry.len() {
                return Err(FormatError::RepackSizeMismatch {
                    artifact: path,
                    expected: entry.len(),
                    actual: payload.len(),
                });
            }
            payloads.push(payload);
        }

        for (index, payload) in payloads.iter().enumerate() {
            self.repack_entry(index, payload)?;
        }
        Ok(payloads.len())
    }

    /// Repack artifacts from `dir` and write the store to `output`
    ///
    /// `output` is only created once every artifact has been applied.
    pub fn repack(&mut self, dir: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
        let output = output.as_ref();
        let count = self.apply_artifacts(dir)?;
        self.write_to(output)?;

        info!("Repacked {} entries to '{}'", count, output.display());
        Ok(count)
    }

    /// Write the store buffer to `path`
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_atomic(path.as_ref(), &self.data)
    }
}

impl Container for Store {
    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    fn open(path: &Path) -> Result<Self> {
        Self::open(path)
    }

    fn build(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}

/// Write `bytes` to a sibling `.tmp` file, then rename it over `path`
///
/// A replaced file keeps its permissions; a new one gets the process
/// defaults, like any plain write.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp_name = path
        .file_name()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            )
        })?
        .to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let write_result = (|| -> std::io::Result<()> {
        fs::write(&temp_path, bytes)?;
        if let Ok(existing) = fs::metadata(path) {
            fs::set_permissions(&temp_path, existing.permissions())?;
        }
        fs::rename(&temp_path, path)
    })();

    // Clean up the temporary file on error
    if let Err(e) = write_result {
        if let Err(cleanup) = fs::remove_file(&temp_path)
            && cleanup.kind() != std::io::ErrorKind::NotFound
        {
            warn!(
                "Failed to remove temporary file {}: {}",
                temp_path.display(),
                cleanup
            );
        }
        return Err(e.into());
    }
    Ok(())
}
