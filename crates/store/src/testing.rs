//! In-memory [`VarStore`] double.

use std::collections::HashMap;
use std::io;

use bootvars_records::{EfiGuid, VariableAttributes};

use crate::{PrivilegeError, ReadError, VarDescriptor, VarStore, WriteError};

/// Scriptable in-memory variable store.
///
/// Starts privileged and UEFI; tests flip the flags or inject per-name
/// read failures, and inspect the call counters and the write log
/// afterwards.
pub(crate) struct MemStore {
    pub(crate) vars: HashMap<(String, EfiGuid), Vec<u8>>,
    pub(crate) fail_reads: HashMap<String, io::ErrorKind>,
    pub(crate) privileged: bool,
    pub(crate) uefi: bool,
    pub(crate) read_calls: usize,
    pub(crate) write_calls: usize,
    pub(crate) writes: Vec<(String, Vec<u8>, VariableAttributes)>,
}

impl MemStore {
    pub(crate) fn new() -> Self {
        Self {
            vars: HashMap::new(),
            fail_reads: HashMap::new(),
            privileged: true,
            uefi: true,
            read_calls: 0,
            write_calls: 0,
            writes: Vec::new(),
        }
    }

    /// Seed a variable in the EFI global namespace.
    pub(crate) fn insert_global(&mut self, name: &str, value: &[u8]) {
        self.vars
            .insert((name.to_owned(), EfiGuid::GLOBAL_VARIABLE), value.to_vec());
    }
}

impl VarStore for MemStore {
    fn acquire_privilege(&mut self) -> Result<(), PrivilegeError> {
        if self.privileged {
            Ok(())
        } else {
            Err(PrivilegeError::new("store double marked unprivileged"))
        }
    }

    fn is_uefi(&self) -> bool {
        self.uefi
    }

    fn read(&mut self, desc: VarDescriptor<'_>, buf: &mut [u8]) -> Result<usize, ReadError> {
        self.read_calls += 1;
        if let Some(kind) = self.fail_reads.get(desc.name()) {
            return Err(ReadError::Platform(io::Error::from(*kind)));
        }
        let value = self
            .vars
            .get(&(desc.name().to_owned(), desc.vendor()))
            .ok_or(ReadError::NotFound)?;
        let n = value.len().min(buf.len());
        buf[..n].copy_from_slice(&value[..n]);
        Ok(n)
    }

    fn write(
        &mut self,
        desc: VarDescriptor<'_>,
        data: &[u8],
        attrs: VariableAttributes,
    ) -> Result<(), WriteError> {
        self.write_calls += 1;
        self.vars
            .insert((desc.name().to_owned(), desc.vendor()), data.to_vec());
        self.writes
            .push((desc.name().to_owned(), data.to_vec(), attrs));
        Ok(())
    }
}
