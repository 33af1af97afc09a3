//! Command-line surface.

use clap::Parser;

use bootvars_store::report::DEFAULT_OPTION_SCAN;

/// Inspect and set UEFI boot variables.
#[derive(Debug, Parser)]
#[command(name = "bootvars", version, about)]
pub struct Cli {
    /// Set BootNext to this option index (hex, optional 0x prefix)
    #[arg(
        short = 'n',
        long = "set-next",
        value_name = "HEX",
        value_parser = parse_hex_index,
        conflicts_with_all = ["option", "json"]
    )]
    pub set_next: Option<u16>,

    /// Show one load option in detail instead of the summary
    #[arg(short = 'o', long, value_name = "HEX", value_parser = parse_hex_index)]
    pub option: Option<u16>,

    /// Highest load-option index (exclusive) scanned by the summary
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_OPTION_SCAN)]
    pub options: u16,

    /// Emit JSON instead of text lines
    #[arg(long)]
    pub json: bool,

    /// Debug diagnostics on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Parse a boot-option index: hex digits with an optional `0x` prefix.
fn parse_hex_index(raw: &str) -> Result<u16, String> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    u16::from_str_radix(digits, 16)
        .map_err(|_| format!("`{raw}` is not a boot-option index (hex 0000..FFFF)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn defaults_to_the_summary() {
        let cli = parse(&["bootvars"]).expect("no arguments is valid");
        assert_eq!(cli.set_next, None);
        assert_eq!(cli.option, None);
        assert_eq!(cli.options, DEFAULT_OPTION_SCAN);
        assert!(!cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn set_next_accepts_hex() {
        assert_eq!(parse(&["bootvars", "-n", "3"]).unwrap().set_next, Some(3));
        assert_eq!(
            parse(&["bootvars", "-n", "1a2b"]).unwrap().set_next,
            Some(0x1a2b)
        );
        assert_eq!(
            parse(&["bootvars", "--set-next", "0x001F"]).unwrap().set_next,
            Some(0x001f)
        );
    }

    #[test]
    fn hex_garbage_is_rejected() {
        assert!(parse(&["bootvars", "-n", "boot"]).is_err());
        assert!(parse(&["bootvars", "-n", ""]).is_err());
        assert!(parse(&["bootvars", "-n", "-3"]).is_err());
    }

    #[test]
    fn hex_overflow_is_rejected() {
        assert!(parse(&["bootvars", "-n", "10000"]).is_err());
        assert!(parse(&["bootvars", "-n", "0x1ffff"]).is_err());
    }

    #[test]
    fn set_next_conflicts_with_query_flags() {
        assert!(parse(&["bootvars", "-n", "1", "--json"]).is_err());
        assert!(parse(&["bootvars", "-n", "1", "-o", "2"]).is_err());
    }

    #[test]
    fn option_detail_combines_with_json() {
        let cli = parse(&["bootvars", "-o", "3", "--json"]).expect("combination is valid");
        assert_eq!(cli.option, Some(3));
        assert!(cli.json);
    }

    #[test]
    fn scan_bound_is_adjustable() {
        let cli = parse(&["bootvars", "--options", "16"]).expect("bound accepted");
        assert_eq!(cli.options, 16);
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory as _;
        Cli::command().debug_assert();
    }
}
