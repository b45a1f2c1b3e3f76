mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	setup_tracing(cli.verbose);

	let resolved = settings::load(&cli)?;
	let workflow = SearchWorkflow::from_config(&resolved, cli.settle_ms)?;
	let outcome = workflow.run(cli.query.as_deref().unwrap_or(""));

	match cli.output {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("blink=debug")
		} else {
			EnvFilter::new("blink=warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
