//! OEM-info request operations

use crate::code::code_enum;

code_enum! {
    /// Operation requested from the OEM-info service
    pub enum Operation in StoreOperation {
        /// Lower bound, never a valid request
        Min = 0 => "OINV_OP_MIN",
        /// Write an entry
        Write = 1 => "OEMINFO_WRITE",
        /// Read an entry
        Read = 2 => "OEMINFO_READ",
        /// Query the age counter of an entry
        GetAge = 3 => "OEMINFO_GETAGE",
        /// Query entry metadata
        GetInfo = 4 => "OEMINFO_GETINFO",
        /// Erase an entry
        Erase = 5 => "OEMINFO_ERASE",
    }
}

impl Operation {
    /// Whether the operation modifies the store
    pub const fn is_mutating(self) -> bool {
        matches!(self, Self::Write | Self::Erase)
    }

    /// Whether this is a real request rather than the range marker
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Min)
    }
}
