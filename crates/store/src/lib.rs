//! Access to the platform's firmware variable store.
//!
//! [`VarStore`] is the capability set every consumer programs against:
//! a privilege gate, a firmware-type check, and raw variable reads and
//! writes keyed by [`VarDescriptor`]. [`Efivarfs`] implements it against
//! the Linux efivarfs mount; tests substitute an in-memory double.
//!
//! [`preflight`] sequences the session preconditions, [`set_boot_next`]
//! writes the one-shot boot override, and [`report`] assembles a summary
//! of the boot-configuration variables.

#![deny(unsafe_code)]

pub mod efivarfs;
pub mod report;
#[cfg(test)]
pub(crate) mod testing;

pub use efivarfs::Efivarfs;

// Implementors of [`VarStore`] need both types; re-export them so the
// trait is usable without a direct bootvars-records dependency.
pub use bootvars_records::{EfiGuid, VariableAttributes};

use std::error::Error;
use std::fmt;
use std::io;

/// Read-buffer capacity sized past every known boot-related variable.
///
/// Larger values are clamped by [`VarStore::read`]; this is a documented
/// assumption, not a guarantee.
pub const VAR_BUF_CAPACITY: usize = 4096;

/// Identifies one firmware variable: a name scoped by a vendor GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarDescriptor<'a> {
    name: &'a str,
    vendor: EfiGuid,
}

impl<'a> VarDescriptor<'a> {
    /// Describe `name` under an explicit vendor GUID.
    #[must_use]
    pub const fn new(name: &'a str, vendor: EfiGuid) -> Self {
        Self { name, vendor }
    }

    /// Describe `name` in the EFI global-variable namespace.
    #[must_use]
    pub const fn global(name: &'a str) -> Self {
        Self::new(name, EfiGuid::GLOBAL_VARIABLE)
    }

    /// Variable name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Vendor GUID scoping the name.
    #[must_use]
    pub const fn vendor(&self) -> EfiGuid {
        self.vendor
    }
}

/// Name of the load-option variable at `index`: `Boot` plus four
/// uppercase hex digits.
#[must_use]
pub fn boot_option_name(index: u16) -> String {
    format!("Boot{index:04X}")
}

/// Firmware variable access could not be acquired.
///
/// One coarse variant carrying a cause string; the underlying mechanism
/// is not distinguished further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeError(String);

impl PrivilegeError {
    /// Wrap a human-readable cause.
    #[must_use]
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}

impl fmt::Display for PrivilegeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot acquire firmware variable access: {}", self.0)
    }
}

impl Error for PrivilegeError {}

/// Failure reading a variable from the store.
#[derive(Debug)]
pub enum ReadError {
    /// The variable does not exist.
    NotFound,
    /// Any other platform failure.
    Platform(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "variable not found"),
            Self::Platform(_) => write!(f, "platform read failure"),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound => None,
            Self::Platform(err) => Some(err),
        }
    }
}

/// Failure writing a variable to the store.
#[derive(Debug)]
pub enum WriteError {
    /// Any non-success platform status.
    Platform(io::Error),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform(_) => write!(f, "platform write failure"),
        }
    }
}

impl Error for WriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Platform(err) => Some(err),
        }
    }
}

/// A session precondition failed; no variable operation was attempted.
#[derive(Debug)]
pub enum PreflightError {
    /// The privilege gate rejected the process.
    Privilege(PrivilegeError),
    /// The platform did not boot through UEFI firmware.
    NotUefi,
}

impl fmt::Display for PreflightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Privilege(_) => write!(f, "privilege check failed"),
            Self::NotUefi => write!(f, "EFI variables are not supported on this system"),
        }
    }
}

impl Error for PreflightError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Privilege(err) => Some(err),
            Self::NotUefi => None,
        }
    }
}

/// Platform capability set for firmware variable access.
///
/// The four methods are the only way anything in this workspace touches
/// firmware state, so substituting an in-memory implementation makes
/// every caller testable without real firmware.
pub trait VarStore {
    /// Acquire whatever access right variable writes require.
    ///
    /// # Errors
    ///
    /// Fails when the right cannot be obtained. Fatal for the session.
    fn acquire_privilege(&mut self) -> Result<(), PrivilegeError>;

    /// Whether the platform booted through UEFI firmware.
    ///
    /// False covers both legacy firmware and failed detection.
    fn is_uefi(&self) -> bool;

    /// Read the variable's value into `buf`, returning the byte count.
    ///
    /// A value larger than `buf` is silently clamped to `buf.len()`.
    ///
    /// # Errors
    ///
    /// [`ReadError::NotFound`] when the variable does not exist; any
    /// other platform failure is [`ReadError::Platform`].
    fn read(&mut self, desc: VarDescriptor<'_>, buf: &mut [u8]) -> Result<usize, ReadError>;

    /// Replace the variable's value.
    ///
    /// Creating a previously absent variable is a normal write.
    ///
    /// # Errors
    ///
    /// Any platform failure is [`WriteError::Platform`].
    fn write(
        &mut self,
        desc: VarDescriptor<'_>,
        data: &[u8],
        attrs: VariableAttributes,
    ) -> Result<(), WriteError>;
}

/// Run the session preconditions: the privilege gate, then the
/// firmware-type check.
///
/// The gate runs first, so an unprivileged caller is told about
/// privilege even on a legacy-firmware host, and a failing gate means
/// no store operation was attempted at all.
///
/// # Errors
///
/// Fails with the first unmet precondition.
pub fn preflight<S: VarStore + ?Sized>(store: &mut S) -> Result<(), PreflightError> {
    store.acquire_privilege().map_err(PreflightError::Privilege)?;
    if !store.is_uefi() {
        return Err(PreflightError::NotUefi);
    }
    Ok(())
}

/// Write `index` as the one-shot `BootNext` override.
///
/// The value is stored little-endian under the standard boot-variable
/// attributes (non-volatile, boot-service, runtime).
///
/// # Errors
///
/// Propagates the store's write failure.
pub fn set_boot_next<S: VarStore + ?Sized>(store: &mut S, index: u16) -> Result<(), WriteError> {
    let attrs = VariableAttributes::NON_VOLATILE
        | VariableAttributes::BOOTSERVICE_ACCESS
        | VariableAttributes::RUNTIME_ACCESS;
    log::debug!("setting BootNext to {index:04X}");
    store.write(VarDescriptor::global("BootNext"), &index.to_le_bytes(), attrs)
}
