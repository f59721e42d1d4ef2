//! Main entry point for the approval signer.
//!
//! Loads the signer configuration, builds the requested approval, signs it and
//! prints the result as JSON on stdout. Logs go to stderr so the output can be
//! piped straight into a relayer.

use clap::Parser;
use signer_config::Config;
use signer_core::ApprovalSignerBuilder;
use std::path::PathBuf;

mod commands;

use commands::Command;

/// Command-line arguments for the approval signer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml", env = "SIGNER_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	let config_path = args
		.config
		.to_str()
		.ok_or_else(|| format!("Config path is not valid UTF-8: {}", args.config.display()))?;
	let config = Config::from_file(config_path).await?;
	tracing::info!("Loaded configuration [{}]", config.signer.id);

	let signer = ApprovalSignerBuilder::new(config).build()?;
	let output = commands::execute(&signer, &args.command)?;

	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}
