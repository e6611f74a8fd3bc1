use anyhow::Result;
use clap::Args;
use collator_core::{Collator, desc};

use crate::cli::parse_value;

#[derive(Args, Debug)]
pub struct EncodeCommandArguments {
	#[arg(help = "The value to encode, as JSON")]
	value: String,
	#[arg(help = "Encode the value in descending order")]
	#[arg(long)]
	desc: bool,
}

pub fn init(args: EncodeCommandArguments) -> Result<()> {
	println!("{}", output(args)?);
	Ok(())
}

/// Encode the value, rendering the bytes as hex along with any patch site.
fn output(
	EncodeCommandArguments {
		value,
		desc: descending,
	}: EncodeCommandArguments,
) -> Result<String> {
	let mut value = parse_value(&value)?;
	if descending {
		value = desc(value);
	}
	let stamped = Collator::new().encode(&value)?.into_stamped()?;
	debug!("Encoded {value} into {} bytes", stamped.bytes().len());
	let mut out = hex::encode(stamped.bytes());
	if let Some(patch) = stamped.patch() {
		out.push_str(&format!("\npending versionstamp at offset {}", patch.offset));
		if patch.descending {
			out.push_str(" (descending)");
		}
	}
	Ok(out)
}
