//! Boot-configuration report assembly.
//!
//! [`collect`] walks the well-known boot variables plus the numbered
//! load options and produces a [`BootSummary`]; [`read_option`] reads
//! one numbered option for callers that expect it to exist.

use std::error::Error;
use std::fmt;

use bootvars_records::{BootOrder, DecodeError, LoadOption, LoadOptionAttributes, decode_u16};

use crate::{ReadError, VAR_BUF_CAPACITY, VarDescriptor, VarStore, boot_option_name};

/// Load-option indices scanned by default: `Boot0000` through `Boot0009`.
pub const DEFAULT_OPTION_SCAN: u16 = 10;

/// Failure assembling a [`BootSummary`].
///
/// Absence never lands here; only a present variable that cannot be
/// read or decoded aborts the walk.
#[derive(Debug)]
pub enum ReportError {
    /// A variable read failed with a platform error.
    Read {
        /// Variable the walk was reading.
        name: String,
        /// Store failure.
        source: ReadError,
    },
    /// A variable's bytes do not decode as its record type.
    Decode {
        /// Variable the walk was decoding.
        name: String,
        /// Codec rejection.
        source: DecodeError,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { name, .. } => write!(f, "could not read {name}"),
            Self::Decode { name, .. } => write!(f, "could not decode {name}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Failure reading one numbered load option via [`read_option`].
#[derive(Debug)]
pub enum OptionError {
    /// The option is not defined (absent variable or empty value).
    NotFound {
        /// Variable that was requested.
        name: String,
    },
    /// The variable read failed with a platform error.
    Read {
        /// Variable that was requested.
        name: String,
        /// Store failure.
        source: ReadError,
    },
    /// The record bytes do not decode as a load option.
    Decode {
        /// Variable that was requested.
        name: String,
        /// Codec rejection.
        source: DecodeError,
    },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "{name} is not defined"),
            Self::Read { name, .. } => write!(f, "could not read {name}"),
            Self::Decode { name, .. } => write!(f, "could not decode {name}"),
        }
    }
}

impl Error for OptionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// One populated load option, copied out of the read buffer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BootOptionEntry {
    /// Numeric option index (`Boot0003` has index 3).
    pub index: u16,
    /// Raw load-option attribute word.
    pub attributes: u32,
    /// Lossy rendering of the UTF-16 description.
    pub description: String,
    /// Device-path bytes present in the record.
    pub device_path_len: usize,
    /// Optional-data bytes present in the record.
    pub optional_data_len: usize,
}

impl BootOptionEntry {
    fn from_option(index: u16, option: &LoadOption<'_>) -> Self {
        Self {
            index,
            attributes: option.attributes().bits(),
            description: option.description().to_string(),
            device_path_len: option.device_path().len(),
            optional_data_len: option.optional_data().len(),
        }
    }

    /// Whether the option's `ACTIVE` attribute bit is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        LoadOptionAttributes::from_bits_retain(self.attributes)
            .contains(LoadOptionAttributes::ACTIVE)
    }
}

/// Snapshot of the boot-configuration variables present on a system.
///
/// Absent variables stay `None` (or unpopulated); `Display` renders one
/// line per present entry in walk order, so an absent variable produces
/// no line at all.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BootSummary {
    /// One-shot override consumed by firmware on the next boot.
    pub boot_next: Option<u16>,
    /// Option the running system was booted from.
    pub boot_current: Option<u16>,
    /// Ordered boot preference list.
    pub boot_order: Option<Vec<u16>>,
    /// Populated load options within the scan bound, ascending.
    pub options: Vec<BootOptionEntry>,
}

impl fmt::Display for BootSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(next) = self.boot_next {
            writeln!(f, "BootNext: {next:04X}")?;
        }
        if let Some(current) = self.boot_current {
            writeln!(f, "BootCurrent: {current:04X}")?;
        }
        if let Some(order) = &self.boot_order {
            write!(f, "BootOrder:")?;
            let mut sep = " ";
            for index in order {
                write!(f, "{sep}{index:04X}")?;
                sep = ", ";
            }
            writeln!(f)?;
        }
        for option in &self.options {
            writeln!(f, "{}: {}", boot_option_name(option.index), option.description)?;
        }
        Ok(())
    }
}

/// Read `desc`, folding the two "absent" shapes into `None`.
///
/// A zero-length value is treated like a missing variable; both shapes
/// are recoverable and leave no trace beyond debug logging.
fn read_present<S: VarStore + ?Sized>(
    store: &mut S,
    desc: VarDescriptor<'_>,
    buf: &mut [u8],
) -> Result<Option<usize>, ReportError> {
    match store.read(desc, buf) {
        Ok(0) => {
            log::debug!("{} exists but is empty, skipping", desc.name());
            Ok(None)
        }
        Ok(len) => Ok(Some(len)),
        Err(ReadError::NotFound) => {
            log::debug!("{} is not set", desc.name());
            Ok(None)
        }
        Err(source) => Err(ReportError::Read {
            name: desc.name().to_owned(),
            source,
        }),
    }
}

fn decode_scalar(name: &str, bytes: &[u8]) -> Result<u16, ReportError> {
    decode_u16(bytes).map_err(|source| ReportError::Decode {
        name: name.to_owned(),
        source,
    })
}

/// Walk `BootNext`, `BootCurrent`, `BootOrder`, and the load options at
/// indices `0..max_options`, assembling a [`BootSummary`].
///
/// Absent variables and zero-length values are skipped.
///
/// # Errors
///
/// A present variable that fails to read or decode aborts the walk with
/// the variable's name in the error.
pub fn collect<S: VarStore + ?Sized>(
    store: &mut S,
    max_options: u16,
) -> Result<BootSummary, ReportError> {
    let mut buf = [0u8; VAR_BUF_CAPACITY];
    let mut summary = BootSummary::default();

    let boot_next = VarDescriptor::global("BootNext");
    if let Some(len) = read_present(store, boot_next, &mut buf)? {
        summary.boot_next = Some(decode_scalar(boot_next.name(), &buf[..len])?);
    }

    let boot_current = VarDescriptor::global("BootCurrent");
    if let Some(len) = read_present(store, boot_current, &mut buf)? {
        summary.boot_current = Some(decode_scalar(boot_current.name(), &buf[..len])?);
    }

    let boot_order = VarDescriptor::global("BootOrder");
    if let Some(len) = read_present(store, boot_order, &mut buf)? {
        let order = BootOrder::decode(&buf[..len]).map_err(|source| ReportError::Decode {
            name: boot_order.name().to_owned(),
            source,
        })?;
        summary.boot_order = Some(order.entries().collect());
    }

    for index in 0..max_options {
        let name = boot_option_name(index);
        let Some(len) = read_present(store, VarDescriptor::global(&name), &mut buf)? else {
            continue;
        };
        let option = LoadOption::decode(&buf[..len])
            .map_err(|source| ReportError::Decode { name, source })?;
        summary
            .options
            .push(BootOptionEntry::from_option(index, &option));
    }

    Ok(summary)
}

/// Read and decode the load option at `index`.
///
/// Unlike the report walk, absence is an error here: callers of this
/// entry point expect the option to exist.
///
/// # Errors
///
/// [`OptionError::NotFound`] for an absent or empty variable; read and
/// decode failures carry the variable name.
pub fn read_option<S: VarStore + ?Sized>(
    store: &mut S,
    index: u16,
) -> Result<BootOptionEntry, OptionError> {
    let name = boot_option_name(index);
    let mut buf = [0u8; VAR_BUF_CAPACITY];
    let len = match store.read(VarDescriptor::global(&name), &mut buf) {
        Ok(0) | Err(ReadError::NotFound) => return Err(OptionError::NotFound { name }),
        Ok(len) => len,
        Err(source) => return Err(OptionError::Read { name, source }),
    };
    let option = LoadOption::decode(&buf[..len])
        .map_err(|source| OptionError::Decode { name, source })?;
    Ok(BootOptionEntry::from_option(index, &option))
}
