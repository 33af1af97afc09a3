//! Variable attribute bits.

use bitflags::bitflags;

bitflags! {
    /// Attribute word attached to every variable write.
    ///
    /// Only the three flags boot configuration uses are named. Any other
    /// bits a platform hands back are retained and passed through
    /// unexamined; construct with [`VariableAttributes::from_bits_retain`]
    /// when ingesting platform data.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VariableAttributes: u32 {
        /// Value persists across reboots.
        const NON_VOLATILE = 0x0000_0001;
        /// Visible while boot services are up.
        const BOOTSERVICE_ACCESS = 0x0000_0002;
        /// Visible to the OS at runtime.
        const RUNTIME_ACCESS = 0x0000_0004;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_bits_match_the_firmware_values() {
        assert_eq!(VariableAttributes::NON_VOLATILE.bits(), 0x1);
        assert_eq!(VariableAttributes::BOOTSERVICE_ACCESS.bits(), 0x2);
        assert_eq!(VariableAttributes::RUNTIME_ACCESS.bits(), 0x4);
    }

    #[test]
    fn unknown_bits_are_retained() {
        let attrs = VariableAttributes::from_bits_retain(0x8000_0007);
        assert_eq!(attrs.bits(), 0x8000_0007);
        assert!(attrs.contains(VariableAttributes::RUNTIME_ACCESS));
    }
}
