/// A macro that allows lazily parsing a value from the environment variable,
/// with a fallback default value if the variable is not set or parsing fails.
///
/// # Parameters
///
/// - `$key`: An expression representing the name of the environment variable.
/// - `$t`: The type of the value to be parsed.
/// - `$default`: The default value to fall back to if the environment variable is not set or
///   parsing fails.
///
/// # Return Value
///
/// A lazy static variable of type `std::sync::LazyLock`, which holds the parsed
/// value from the environment variable or the default value.
#[macro_export]
macro_rules! lazy_env_parse {
	// With no default specified
	($key:expr_2021, $t:ty) => {
		std::sync::LazyLock::new(|| {
			std::env::var($key).ok().and_then(|s| s.parse::<$t>().ok()).unwrap_or_default()
		})
	};
	// With a static expression for the default value
	($key:expr_2021, $t:ty, $default:expr_2021) => {
		std::sync::LazyLock::new(|| {
			std::env::var($key).ok().and_then(|s| s.parse::<$t>().ok()).unwrap_or($default)
		})
	};
}

/// Returns early from a function with the given error when
/// a transaction is used after it has been finished.
macro_rules! ensure_open {
	($tx:expr_2021) => {
		anyhow::ensure!(!$tx.closed(), $crate::err::Error::TxFinished)
	};
	($tx:expr_2021, write) => {
		anyhow::ensure!(!$tx.closed(), $crate::err::Error::TxFinished);
		anyhow::ensure!($tx.writeable(), $crate::err::Error::TxReadonly)
	};
}
