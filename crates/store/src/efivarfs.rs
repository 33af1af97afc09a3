//! efivarfs-backed [`VarStore`].
//!
//! The Linux kernel exposes one file per firmware variable under
//! `<firmware root>/efivars`, named `<Name>-<vendor guid>` and holding a
//! little-endian `u32` attribute word followed by the value bytes. The
//! firmware root directory itself (`/sys/firmware/efi`) exists only on
//! systems booted through UEFI.

use std::fs::{self, File};
use std::io::{self, Read as _};
use std::path::PathBuf;

use bootvars_records::VariableAttributes;

use crate::{PrivilegeError, ReadError, VarDescriptor, VarStore, WriteError};

/// Byte length of the attribute word prefixing every efivarfs entry.
const ATTR_PREFIX_LEN: usize = 4;

/// Variable store rooted at a `/sys/firmware/efi`-shaped directory.
#[derive(Debug, Clone)]
pub struct Efivarfs {
    firmware_root: PathBuf,
}

impl Efivarfs {
    /// Store under the standard firmware root, `/sys/firmware/efi`.
    #[must_use]
    pub fn new() -> Self {
        Self::at("/sys/firmware/efi")
    }

    /// Store under an alternate firmware root.
    #[must_use]
    pub fn at(firmware_root: impl Into<PathBuf>) -> Self {
        Self {
            firmware_root: firmware_root.into(),
        }
    }

    /// Path of the efivarfs entry backing `desc`.
    fn entry_path(&self, desc: VarDescriptor<'_>) -> PathBuf {
        self.firmware_root
            .join("efivars")
            .join(format!("{}-{}", desc.name(), desc.vendor()))
    }
}

impl Default for Efivarfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Effective UID of the calling process.
#[expect(unsafe_code, reason = "geteuid takes no arguments and cannot fail")]
fn effective_uid() -> libc::uid_t {
    // SAFETY: geteuid has no preconditions.
    unsafe { libc::geteuid() }
}

impl VarStore for Efivarfs {
    /// The kernel grants efivarfs writes to root only, so the gate is an
    /// effective-UID check.
    fn acquire_privilege(&mut self) -> Result<(), PrivilegeError> {
        let uid = effective_uid();
        if uid == 0 {
            Ok(())
        } else {
            Err(PrivilegeError::new(format!(
                "process is not root (euid {uid})"
            )))
        }
    }

    fn is_uefi(&self) -> bool {
        self.firmware_root.is_dir()
    }

    fn read(&mut self, desc: VarDescriptor<'_>, buf: &mut [u8]) -> Result<usize, ReadError> {
        let path = self.entry_path(desc);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(ReadError::NotFound),
            Err(err) => return Err(ReadError::Platform(err)),
        };

        // An entry shorter than its attribute word is a kernel-side problem,
        // not an absent variable.
        let mut prefix = [0u8; ATTR_PREFIX_LEN];
        file.read_exact(&mut prefix).map_err(ReadError::Platform)?;

        let mut filled = 0;
        while filled < buf.len() {
            let n = file.read(&mut buf[filled..]).map_err(ReadError::Platform)?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        log::debug!("read {} ({filled} value bytes)", desc.name());
        Ok(filled)
    }

    fn write(
        &mut self,
        desc: VarDescriptor<'_>,
        data: &[u8],
        attrs: VariableAttributes,
    ) -> Result<(), WriteError> {
        // efivarfs rejects partial updates; the attribute word and the value
        // go down in one write.
        let mut payload = Vec::with_capacity(ATTR_PREFIX_LEN + data.len());
        payload.extend_from_slice(&attrs.bits().to_le_bytes());
        payload.extend_from_slice(data);
        log::debug!("write {} ({} value bytes)", desc.name(), data.len());
        fs::write(self.entry_path(desc), payload).map_err(WriteError::Platform)
    }
}
