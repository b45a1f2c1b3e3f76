use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Command-line arguments accepted by the `blink` binary.
#[derive(Parser, Debug)]
#[command(
	name = "blink",
	version,
	about = "Desktop command launcher core: dispatch a query to plugin sources and print the ranked results"
)]
pub(crate) struct CliArgs {
	#[arg(
		value_name = "QUERY",
		help = "Query to dispatch to the registered sources (default: empty, clears the list)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "BLINK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Root directory served by the files source (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		long = "page-size",
		value_name = "ROWS",
		help = "Rows a page-jump navigation moves by (default: 6)"
	)]
	pub(crate) page_size: Option<usize>,
	#[arg(
		long = "max-visible",
		value_name = "ROWS",
		help = "Rows the shell shows at once; only affects the height hint (default: 6)"
	)]
	pub(crate) max_visible: Option<usize>,
	#[arg(
		short = 's',
		long = "source",
		value_name = "ID",
		action = ArgAction::Append,
		help = "Enable only the named sources (default: every built-in)"
	)]
	pub(crate) sources: Vec<String>,
	#[arg(
		short = 'o',
		long,
		value_enum,
		default_value = "plain",
		help = "Output format for the final result list"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		long = "settle-ms",
		value_name = "MS",
		help = "How long to wait for sources to finish streaming (default: 2000)"
	)]
	pub(crate) settle_ms: Option<u64>,
	#[arg(short, long, help = "Enable debug logging on stderr")]
	pub(crate) verbose: bool,
}

/// How the final result list is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	/// Human readable listing.
	Plain,
	/// Machine readable JSON snapshot.
	Json,
}

/// Parse command-line arguments.
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}
