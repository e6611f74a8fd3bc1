use anyhow::{Context, Result};
use clap::Args;
use collator_core::Collator;
use serde_json::Value as JsonValue;

#[derive(Args, Debug)]
pub struct DecodeCommandArguments {
	#[arg(help = "The encoded bytes, as hex")]
	bytes: String,
}

pub fn init(args: DecodeCommandArguments) -> Result<()> {
	for line in output(args)? {
		println!("{line}");
	}
	Ok(())
}

/// Decode every field in the input, rendering each one as JSON.
fn output(
	DecodeCommandArguments {
		bytes,
	}: DecodeCommandArguments,
) -> Result<Vec<String>> {
	let input = bytes.trim();
	let input = input.strip_prefix("0x").unwrap_or(input);
	let bytes = hex::decode(input).context("The input is not valid hex")?;
	let values = Collator::new().decode_all(&bytes)?;
	debug!("Decoded {} fields from {} bytes", values.len(), bytes.len());
	Ok(values.into_iter().map(|v| JsonValue::from(v).to_string()).collect())
}
