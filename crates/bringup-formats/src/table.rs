//! Bounded tables of fixed-size records
//!
//! Container headers declare how many records follow them, but that count
//! comes straight from an untrusted image. [`decode_table`] reads at most
//! `max_records` entries no matter what the header claims.

use crate::error::Result;
use crate::record::FixedRecord;
use tracing::{debug, warn};

/// Number of records actually read for a declared count
pub fn effective_count(declared: u32, max_records: usize) -> usize {
    usize::try_from(declared).map_or(max_records, |n| n.min(max_records))
}

/// Decode `min(declared, max_records)` contiguous records starting at `start`
///
/// Records are read back to back, `R::SIZE` bytes apart. Any record that
/// would run past the end of `data` fails the whole table.
pub fn decode_table<R: FixedRecord>(
    data: &[u8],
    start: usize,
    declared: u32,
    max_records: usize,
) -> Result<Vec<R>> {
    let count = effective_count(declared, max_records);
    if count < declared as usize {
        warn!(
            "Declared record count {} exceeds table limit {}, reading {}",
            declared, max_records, count
        );
    }

    let mut records = Vec::with_capacity(count);
    let mut offset = start;
    for _ in 0..count {
        records.push(R::decode_at(data, offset)?);
        offset += R::SIZE;
    }

    debug!(
        "Decoded {} records of {} bytes at {:#x}",
        records.len(),
        R::SIZE,
        start
    );
    Ok(records)
}

/// Encode at most `max_records` records back to back
pub fn encode_table<R: FixedRecord>(
    records: &[R],
    max_records: usize,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let count = records.len().min(max_records);
    for record in &records[..count] {
        record.write_record(out)?;
    }
    Ok(count)
}
