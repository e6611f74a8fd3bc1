use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cnf::{DEFAULT_LOG_LEVEL, LOG_TARGETS};

#[derive(Default, Debug, Clone)]
pub struct Builder {
	log_level: Option<String>,
}

pub fn builder() -> Builder {
	Builder::default()
}

impl Builder {
	/// Set the log level on the builder
	pub fn with_log_level(mut self, log_level: &str) -> Self {
		self.log_level = Some(log_level.to_string());
		self
	}

	/// Build a tracing dispatcher with the fmt subscriber writing to stderr
	pub fn build(self) -> Result<Box<dyn Subscriber + Send + Sync + 'static>> {
		let filter = filter_from_value(self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL))?;
		let registry = tracing_subscriber::registry().with(
			tracing_subscriber::fmt::layer()
				.compact()
				.with_ansi(true)
				.with_target(true)
				.with_span_events(FmtSpan::NONE)
				.with_writer(std::io::stderr)
				.with_filter(filter),
		);
		Ok(Box::new(registry))
	}

	/// Install the subscriber as the global default
	pub fn init(self) -> Result<()> {
		self.build()?.try_init()?;
		Ok(())
	}
}

/// Turn a log level, or a set of filter directives, into an [`EnvFilter`].
///
/// The plain levels only raise the verbosity of this binary and its core
/// library, leaving everything else at `error`. The special level `none`
/// disables logging, and `full` shows every event from every crate.
pub fn filter_from_value(v: &str) -> Result<EnvFilter> {
	let directives = match v {
		"none" => "off".to_string(),
		"full" => "trace".to_string(),
		"error" | "warn" | "info" | "debug" | "trace" => {
			let targets = LOG_TARGETS.iter().map(|t| format!("{t}={v}"));
			std::iter::once("error".to_string()).chain(targets).collect::<Vec<_>>().join(",")
		}
		_ => v.to_string(),
	};
	Ok(EnvFilter::builder().parse(directives)?)
}
