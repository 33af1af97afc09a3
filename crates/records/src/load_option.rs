//! `Boot####` load-option record decoding.
//!
//! A load option is laid out as a 32-bit attribute word, a 16-bit
//! file-path-list byte length, a null-terminated UTF-16 description, the
//! device-path list, and trailing optional data. Only the header fields
//! and the description are interpreted; the two blobs are exposed as
//! opaque byte ranges.

use core::fmt::{self, Write as _};

use bitflags::bitflags;

use crate::DecodeError;

/// Byte offset of the UTF-16 description within a record.
const DESCRIPTION_OFFSET: usize = 6;

bitflags! {
    /// Attribute word of a load option.
    ///
    /// Unrecognized bits are retained; nothing here branches on them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LoadOptionAttributes: u32 {
        /// Option participates in boot ordering.
        const ACTIVE = 0x0000_0001;
        /// Option is hidden from firmware boot menus.
        const HIDDEN = 0x0000_0008;
    }
}

/// Read a little-endian `u16` from `data` at byte offset `off`.
///
/// Panics if `off + 2 > data.len()`; callers bounds-check first.
fn le_u16(data: &[u8], off: usize) -> u16 {
    u16::from_le_bytes(*data[off..].first_chunk().unwrap())
}

/// Read a little-endian `u32` from `data` at byte offset `off`.
fn le_u32(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(*data[off..].first_chunk().unwrap())
}

/// Decoded view of one `Boot####` load-option record.
#[derive(Debug, Clone, Copy)]
pub struct LoadOption<'a> {
    attributes: LoadOptionAttributes,
    file_path_list_len: u16,
    description: &'a [u8],
    device_path: &'a [u8],
    optional_data: &'a [u8],
}

impl<'a> LoadOption<'a> {
    /// Decode a load-option record.
    ///
    /// Every field is bounds-checked against the real buffer length before
    /// it is read. A missing description terminator is tolerated: the
    /// description then runs to the end of the buffer. The blob ranges are
    /// located from the declared file-path-list length but clamped to the
    /// bytes actually present; they are never interpreted.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if the fixed header fields do
    /// not fit.
    pub fn decode(data: &'a [u8]) -> Result<Self, DecodeError> {
        if data.len() < 4 {
            return Err(DecodeError::Truncated);
        }
        let attributes = LoadOptionAttributes::from_bits_retain(le_u32(data, 0));

        if data.len() < DESCRIPTION_OFFSET {
            return Err(DecodeError::Truncated);
        }
        let file_path_list_len = le_u16(data, 4);

        // Scan whole UTF-16 units for the terminator; a trailing lone byte
        // belongs to no unit and ends the scan.
        let mut end = DESCRIPTION_OFFSET;
        let mut terminated = None;
        while end + 2 <= data.len() {
            if le_u16(data, end) == 0 {
                terminated = Some(end + 2);
                break;
            }
            end += 2;
        }
        let description = &data[DESCRIPTION_OFFSET..end];

        let tail = &data[terminated.unwrap_or(end)..];
        let blob_len = usize::from(file_path_list_len).min(tail.len());
        let (device_path, optional_data) = tail.split_at(blob_len);

        Ok(Self {
            attributes,
            file_path_list_len,
            description,
            device_path,
            optional_data,
        })
    }

    /// Attribute flags.
    #[must_use]
    pub fn attributes(&self) -> LoadOptionAttributes {
        self.attributes
    }

    /// Whether the `ACTIVE` bit is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.attributes.contains(LoadOptionAttributes::ACTIVE)
    }

    /// Declared byte length of the device-path list.
    #[must_use]
    pub fn file_path_list_len(&self) -> u16 {
        self.file_path_list_len
    }

    /// The description string.
    #[must_use]
    pub fn description(&self) -> Description<'a> {
        Description {
            units: self.description,
        }
    }

    /// Device-path bytes, clamped to the buffer. Opaque.
    #[must_use]
    pub fn device_path(&self) -> &'a [u8] {
        self.device_path
    }

    /// Optional-data bytes following the device path. Opaque.
    #[must_use]
    pub fn optional_data(&self) -> &'a [u8] {
        self.optional_data
    }
}

/// Borrowed view of a load option's UTF-16 description.
///
/// Renders lossily through `Display`: unpaired surrogates become U+FFFD.
#[derive(Debug, Clone, Copy)]
pub struct Description<'a> {
    units: &'a [u8],
}

impl<'a> Description<'a> {
    /// Raw little-endian UTF-16 bytes, terminator excluded.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.units
    }

    /// Whether the description is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self
            .units
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        for c in char::decode_utf16(units) {
            f.write_char(c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}
