mod compare;
mod decode;
mod encode;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use collator_core::Value;
use serde_json::Value as JsonValue;

use crate::cnf::{DEFAULT_LOG_LEVEL, PKG_NAME};

const INFO: &str = "
An order-preserving binary tuple codec for byte-ordered key-value stores.

Values are given as JSON. Explicit widths, dates, buffers, descending fields
and versionstamps are written as single-key objects, for example
{\"$int8\": -3}, {\"$date\": 0}, {\"$bytes\": \"dead\"}, {\"$desc\": \"abc\"}
or {\"$versionstamp\": {\"code\": 1}}.
";

#[derive(Parser, Debug)]
#[command(name = PKG_NAME, about = INFO, version, arg_required_else_help = true)]
struct Cli {
	#[arg(help = "The logging level for the command-line tool")]
	#[arg(env = "COLLATOR_LOG", long = "log", global = true)]
	#[arg(default_value = DEFAULT_LOG_LEVEL)]
	log: String,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "Encode a JSON value into its ordered bytes")]
	Encode(encode::EncodeCommandArguments),
	#[command(about = "Decode ordered bytes into JSON values, one field per line")]
	Decode(decode::DecodeCommandArguments),
	#[command(about = "Compare two JSON values by their encoded order")]
	Compare(compare::CompareCommandArguments),
}

pub fn init() -> ExitCode {
	// Parse the command-line arguments
	let args = Cli::parse();
	// Initialize logging before running any command
	if let Err(e) = crate::telemetry::builder().with_log_level(&args.log).init() {
		eprintln!("{e}");
		return ExitCode::FAILURE;
	}
	// Run the chosen command
	let output = match args.command {
		Commands::Encode(args) => encode::init(args),
		Commands::Decode(args) => decode::init(args),
		Commands::Compare(args) => compare::init(args),
	};
	// Report any failure
	if let Err(e) = output {
		error!("{e:#}");
		eprintln!("{e:#}");
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

/// Parse a command-line argument as a JSON value and convert it.
pub(crate) fn parse_value(input: &str) -> anyhow::Result<Value> {
	let json: JsonValue = serde_json::from_str(input)?;
	Ok(Value::try_from(json)?)
}
