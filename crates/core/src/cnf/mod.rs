use std::sync::LazyLock;

/// The number of key-value pairs fetched per batch when a bucket pages
/// through a full scan (defaults to 500)
pub static NORMAL_FETCH_SIZE: LazyLock<u32> =
	lazy_env_parse!("COLLATOR_NORMAL_FETCH_SIZE", u32, 500);

/// The maximum size of an encoded key accepted by the in-memory datastore
/// (defaults to 10 KiB)
pub static MAX_KEY_SIZE: LazyLock<usize> =
	lazy_env_parse!("COLLATOR_MAX_KEY_SIZE", usize, 10 * 1024);

/// The maximum size of an encoded value accepted by the in-memory datastore
/// (defaults to 100 KiB)
pub static MAX_VALUE_SIZE: LazyLock<usize> =
	lazy_env_parse!("COLLATOR_MAX_VALUE_SIZE", usize, 100 * 1024);
