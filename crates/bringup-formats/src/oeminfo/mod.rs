//! OEM-info persistent settings store
//!
//! The store is an unstructured blob holding variable-position entries.
//! Entries are found by scanning for the `OEM_INFO` tag; each hit is the
//! start of a 28-byte header whose payload sits 0x200 bytes further on.
//!
//! # Usage
//!
//! ```rust,no_run
//! use bringup_formats::oeminfo::Store;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = Store::open("oeminfo.img")?;
//! store.extract("output")?;
//!
//! // edit payloads in place, keeping their sizes, then
//! store.repack("output", "oeminfo.pack")?;
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod operation;
pub mod store;

pub use entry::{
    DisplayKey, EntrySummary, HEADER_SIZE, MAGIC, PAYLOAD_OFFSET, StoreEntry, StoreEntryHeader,
};
pub use operation::Operation;
pub use store::Store;
