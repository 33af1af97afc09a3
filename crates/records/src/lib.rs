//! Decoders for the binary records stored in UEFI boot variables.
//!
//! Interprets the raw little-endian values of `BootOrder`, `BootNext`,
//! `BootCurrent`, and the `Boot####` load options using safe field
//! extraction (`from_le_bytes`). No unsafe code, no allocations; decoded
//! views borrow the input bytes.
//!
//! # Usage
//!
//! ```
//! use bootvars_records::BootOrder;
//!
//! fn preferred(order_bytes: &[u8]) -> Option<u16> {
//!     let order = BootOrder::decode(order_bytes).ok()?;
//!     order.get(0)
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod attributes;
pub mod boot_order;
pub mod guid;
pub mod load_option;

pub use attributes::VariableAttributes;
pub use boot_order::BootOrder;
pub use guid::EfiGuid;
pub use load_option::{Description, LoadOption, LoadOptionAttributes};

use core::fmt;

/// Errors that can occur when decoding a boot-configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The input data is too short for the record shape it claims.
    Truncated,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "record data truncated"),
        }
    }
}

impl core::error::Error for DecodeError {}

/// Decode a single 16-bit variable value (`BootNext`, `BootCurrent`).
///
/// The value is stored little-endian; bytes past the first two are
/// ignored, matching firmware that pads these variables.
///
/// # Errors
///
/// Returns [`DecodeError::Truncated`] if fewer than 2 bytes are given.
pub fn decode_u16(bytes: &[u8]) -> Result<u16, DecodeError> {
    match bytes.first_chunk() {
        Some(chunk) => Ok(u16::from_le_bytes(*chunk)),
        None => Err(DecodeError::Truncated),
    }
}
