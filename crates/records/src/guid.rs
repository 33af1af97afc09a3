//! Variable namespace identifiers.

use core::fmt;

/// A 128-bit EFI GUID, the namespace identifier scoping variable names.
///
/// Kept in the firmware's mixed-endian layout: three native-endian integer
/// fields followed by an eight-byte array.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EfiGuid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}

const _: () = assert!(core::mem::size_of::<EfiGuid>() == 16);

impl EfiGuid {
    /// The EFI global-variable namespace, home of `BootOrder`, `BootNext`,
    /// `BootCurrent`, and the `Boot####` load options.
    pub const GLOBAL_VARIABLE: Self = Self::new(
        0x8be4_df61,
        0x93ca,
        0x11d2,
        [0xaa, 0x0d, 0x00, 0xe0, 0x98, 0x03, 0x2b, 0x8c],
    );

    /// Construct a GUID from its four fields.
    #[must_use]
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }
}

impl fmt::Display for EfiGuid {
    /// Canonical lowercase `8-4-4-4-12` form, as embedded in efivarfs
    /// entry names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7],
        )
    }
}

impl fmt::Debug for EfiGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EfiGuid({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_canonical_lowercase() {
        assert_eq!(
            EfiGuid::GLOBAL_VARIABLE.to_string(),
            "8be4df61-93ca-11d2-aa0d-00e098032b8c"
        );
    }

    #[test]
    fn display_pads_small_fields() {
        let guid = EfiGuid::new(0x1, 0x2, 0x3, [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(guid.to_string(), "00000001-0002-0003-0001-020304050607");
    }

    #[test]
    fn debug_wraps_display() {
        let text = format!("{:?}", EfiGuid::GLOBAL_VARIABLE);
        assert_eq!(text, "EfiGuid(8be4df61-93ca-11d2-aa0d-00e098032b8c)");
    }
}
