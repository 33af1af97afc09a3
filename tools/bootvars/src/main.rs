//! `bootvars`: inspect and set UEFI boot variables through efivarfs.
//!
//! With no arguments prints the boot-configuration summary (`BootNext`,
//! `BootCurrent`, `BootOrder`, populated load options); `-n` writes the
//! one-shot `BootNext` override; `-o` shows a single load option.

mod cli;
mod logger;

use std::process;

use anyhow::Context as _;
use clap::Parser as _;

use bootvars_store::report::{self, BootOptionEntry, OptionError};
use bootvars_store::{Efivarfs, PreflightError, VarStore, preflight, set_boot_next};

use crate::cli::Cli;

/// Command-line misuse.
const EXIT_INVALID: i32 = -1;
/// The privilege gate rejected the process.
const EXIT_PRIVILEGE: i32 = -2;
/// The host did not boot through UEFI.
const EXIT_NOT_UEFI: i32 = -3;
/// An explicitly requested variable does not exist.
const EXIT_NOT_FOUND: i32 = -4;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors get the invalid-input code; --help and
            // --version are ordinary exits.
            let code = if err.use_stderr() { EXIT_INVALID } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    logger::init(cli.verbose);

    if let Err(failure) = run(&cli) {
        failure.exit();
    }
}

/// Terminal failure paired with its process exit code.
struct Failure {
    code: i32,
    source: anyhow::Error,
}

impl Failure {
    fn with_code(code: i32, source: anyhow::Error) -> Self {
        Self { code, source }
    }

    fn exit(self) -> ! {
        eprintln!("bootvars: {:#}", self.source);
        process::exit(self.code)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(source: anyhow::Error) -> Self {
        Self { code: 1, source }
    }
}

/// Exit code for a failed session precondition.
fn preflight_code(err: &PreflightError) -> i32 {
    match err {
        PreflightError::Privilege(_) => EXIT_PRIVILEGE,
        PreflightError::NotUefi => EXIT_NOT_UEFI,
    }
}

/// Exit code for a failed single-option read.
fn option_code(err: &OptionError) -> i32 {
    match err {
        OptionError::NotFound { .. } => EXIT_NOT_FOUND,
        OptionError::Read { .. } | OptionError::Decode { .. } => 1,
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let mut store = Efivarfs::new();

    preflight(&mut store)
        .map_err(|err| Failure::with_code(preflight_code(&err), anyhow::Error::new(err)))?;

    if let Some(index) = cli.set_next {
        cmd_set_next(&mut store, index)
    } else if let Some(index) = cli.option {
        cmd_show_option(&mut store, index, cli.json)
    } else {
        cmd_report(&mut store, cli.options, cli.json)
    }
}

// ===== Commands =====

fn cmd_set_next(store: &mut impl VarStore, index: u16) -> Result<(), Failure> {
    set_boot_next(store, index)
        .with_context(|| format!("could not set BootNext to {index:04X}"))?;
    Ok(())
}

fn cmd_show_option(store: &mut impl VarStore, index: u16, json: bool) -> Result<(), Failure> {
    let entry = report::read_option(store, index)
        .map_err(|err| Failure::with_code(option_code(&err), anyhow::Error::new(err)))?;

    if json {
        let text = serde_json::to_string_pretty(&entry).context("rendering JSON")?;
        println!("{text}");
    } else {
        print_option_detail(&entry);
    }
    Ok(())
}

fn cmd_report(store: &mut impl VarStore, max_options: u16, json: bool) -> Result<(), Failure> {
    let summary = report::collect(store, max_options).context("boot report failed")?;

    if json {
        let text = serde_json::to_string_pretty(&summary).context("rendering JSON")?;
        println!("{text}");
    } else {
        print!("{summary}");
    }
    Ok(())
}

/// Render one option with its attribute state and blob sizes.
fn print_option_detail(entry: &BootOptionEntry) {
    let state = if entry.is_active() { "active" } else { "inactive" };
    println!("Boot{:04X}: {}", entry.index, entry.description);
    println!("  attributes: {:#010x} ({state})", entry.attributes);
    println!("  device path: {} bytes", entry.device_path_len);
    println!("  optional data: {} bytes", entry.optional_data_len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use bootvars_store::{PrivilegeError, ReadError, VarDescriptor, VariableAttributes, WriteError};

    /// Store that reports every variable as absent.
    struct EmptyStore;

    impl VarStore for EmptyStore {
        fn acquire_privilege(&mut self) -> Result<(), PrivilegeError> {
            Ok(())
        }

        fn is_uefi(&self) -> bool {
            true
        }

        fn read(&mut self, _desc: VarDescriptor<'_>, _buf: &mut [u8]) -> Result<usize, ReadError> {
            Err(ReadError::NotFound)
        }

        fn write(
            &mut self,
            _desc: VarDescriptor<'_>,
            _data: &[u8],
            _attrs: VariableAttributes,
        ) -> Result<(), WriteError> {
            Ok(())
        }
    }

    #[test]
    fn exit_codes_are_distinct_and_negative() {
        let codes = [EXIT_INVALID, EXIT_PRIVILEGE, EXIT_NOT_UEFI, EXIT_NOT_FOUND];
        for (i, code) in codes.iter().enumerate() {
            assert!(*code < 0);
            for other in &codes[i + 1..] {
                assert_ne!(code, other);
            }
        }
    }

    #[test]
    fn preflight_failures_map_to_their_codes() {
        let privilege = PreflightError::Privilege(PrivilegeError::new("not root"));
        assert_eq!(preflight_code(&privilege), EXIT_PRIVILEGE);
        assert_eq!(preflight_code(&PreflightError::NotUefi), EXIT_NOT_UEFI);
    }

    #[test]
    fn option_failures_map_to_their_codes() {
        let not_found = OptionError::NotFound {
            name: "Boot0007".to_owned(),
        };
        assert_eq!(option_code(&not_found), EXIT_NOT_FOUND);

        let read = OptionError::Read {
            name: "Boot0007".to_owned(),
            source: ReadError::Platform(io::Error::from(io::ErrorKind::PermissionDenied)),
        };
        assert_eq!(option_code(&read), 1);
    }

    #[test]
    fn absent_option_exits_not_found() {
        let failure = cmd_show_option(&mut EmptyStore, 7, false).unwrap_err();
        assert_eq!(failure.code, EXIT_NOT_FOUND);
    }

    #[test]
    fn uncategorized_failures_exit_with_code_one() {
        let failure = Failure::from(anyhow::anyhow!("decode went sideways"));
        assert_eq!(failure.code, 1);
    }
}
