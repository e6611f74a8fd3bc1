/// The publicly visible name of the binary
pub const PKG_NAME: &str = "collator";

/// The log level used when neither `--log` nor `COLLATOR_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// The crates whose events are shown at the chosen log level
pub const LOG_TARGETS: [&str; 2] = ["collator", "collator_core"];
