use std::cmp::Ordering;

use anyhow::Result;
use clap::Args;
use collator_core::Collator;

use crate::cli::parse_value;

#[derive(Args, Debug)]
pub struct CompareCommandArguments {
	#[arg(help = "The left-hand value, as JSON")]
	left: String,
	#[arg(help = "The right-hand value, as JSON")]
	right: String,
}

pub fn init(args: CompareCommandArguments) -> Result<()> {
	println!("{}", output(args)?);
	Ok(())
}

fn output(
	CompareCommandArguments {
		left,
		right,
	}: CompareCommandArguments,
) -> Result<&'static str> {
	let (left, right) = (parse_value(&left)?, parse_value(&right)?);
	Ok(match Collator::new().compare(&left, &right)? {
		Ordering::Less => "<",
		Ordering::Equal => "=",
		Ordering::Greater => ">",
	})
}
