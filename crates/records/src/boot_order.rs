//! `BootOrder` record decoding.

use crate::DecodeError;

/// Decoded view of a `BootOrder` value: the ordered preference list of
/// 16-bit load-option indices.
///
/// Borrows the raw bytes; entries are assembled on demand.
#[derive(Debug, Clone, Copy)]
pub struct BootOrder<'a> {
    data: &'a [u8],
}

impl<'a> BootOrder<'a> {
    /// Decode a `BootOrder` value.
    ///
    /// The record is a bare sequence of little-endian `u16` entries, most
    /// preferred first. Order is preserved exactly.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if the byte length is odd: the
    /// trailing lone byte cannot form an entry.
    pub fn decode(data: &'a [u8]) -> Result<Self, DecodeError> {
        if data.len() % 2 != 0 {
            return Err(DecodeError::Truncated);
        }
        Ok(Self { data })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    /// Whether the order has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entry at position `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u16> {
        let off = index.checked_mul(2)?;
        let chunk = self.data.get(off..off + 2)?;
        Some(u16::from_le_bytes([chunk[0], chunk[1]]))
    }

    /// Iterate the entries in preference order.
    #[must_use]
    pub fn entries(&self) -> Entries<'a> {
        Entries { data: self.data }
    }
}

/// Iterator over [`BootOrder`] entries.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    data: &'a [u8],
}

impl Iterator for Entries<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        let (chunk, rest) = self.data.split_first_chunk()?;
        self.data = rest;
        Some(u16::from_le_bytes(*chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.data.len() / 2;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Entries<'_> {}
