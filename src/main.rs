//! The collator command-line interface.
//!
//! Encodes JSON values into their ordered byte form, decodes ordered bytes
//! back into JSON, and compares two values by their encoded order.

#[macro_use]
extern crate tracing;

mod cli;
mod cnf;
mod telemetry;

use std::process::ExitCode;

fn main() -> ExitCode {
	cli::init() // Initiate the command line
}
