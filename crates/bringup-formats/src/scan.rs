//! Magic-tag scanning for records with no fixed position
//!
//! [`find_all`] yields the start offset of every occurrence of a tag, in
//! ascending order. The search resumes one byte after each hit, so tags
//! that overlap themselves are all reported.

use std::iter::FusedIterator;

/// Iterator over the offsets of a magic tag within a buffer
#[derive(Debug, Clone)]
pub struct MagicScanner<'a> {
    haystack: &'a [u8],
    magic: &'a [u8],
    next: usize,
}

impl<'a> MagicScanner<'a> {
    /// Create a scanner over `haystack` looking for `magic`
    pub const fn new(haystack: &'a [u8], magic: &'a [u8]) -> Self {
        Self {
            haystack,
            magic,
            next: 0,
        }
    }
}

impl Iterator for MagicScanner<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.magic.is_empty() || self.next >= self.haystack.len() {
            self.next = self.haystack.len();
            return None;
        }

        let found = self.haystack[self.next..]
            .windows(self.magic.len())
            .position(|window| window == self.magic)
            .map(|pos| self.next + pos);

        match found {
            Some(offset) => {
                self.next = offset + 1;
                Some(offset)
            }
            None => {
                self.next = self.haystack.len();
                None
            }
        }
    }
}

impl FusedIterator for MagicScanner<'_> {}

/// Scan `haystack` for every occurrence of `magic`, overlaps included
pub fn find_all<'a>(haystack: &'a [u8], magic: &'a [u8]) -> MagicScanner<'a> {
    MagicScanner::new(haystack, magic)
}
