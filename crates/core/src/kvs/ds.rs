use std::fmt;

use anyhow::{Result, bail};

use super::tx::Transaction;
use crate::col::Collator;
use crate::err::Error;

/// The underlying datastore instance which stores the dataset.
pub struct Datastore {
	/// The inner datastore type
	inner: Inner,
	/// The collator which encodes keys and values
	collator: Collator,
}

#[allow(clippy::large_enum_variant)]
pub(super) enum Inner {
	#[cfg(feature = "kv-mem")]
	Mem(super::mem::Datastore),
}

impl fmt::Display for Datastore {
	#[allow(unreachable_patterns)]
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match &self.inner {
			#[cfg(feature = "kv-mem")]
			Inner::Mem(_) => write!(f, "memory"),
			_ => unreachable!(),
		}
	}
}

impl Datastore {
	/// Creates a new datastore instance
	///
	/// ```rust,no_run
	/// # use collator_core::kvs::Datastore;
	/// # #[tokio::main]
	/// # async fn main() -> anyhow::Result<()> {
	/// let ds = Datastore::new("memory").await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn new(path: &str) -> Result<Datastore> {
		let inner = match path {
			#[cfg(feature = "kv-mem")]
			"memory" => {
				info!(target: "collator::core::kvs::ds", "Starting kvs store in {}", path);
				Inner::Mem(super::mem::Datastore::new())
			}
			// The datastore path is not valid
			_ => {
				info!(target: "collator::core::kvs::ds", "Unable to load the specified datastore {}", path);
				bail!(Error::Ds("Unable to load the specified datastore".into()));
			}
		};
		info!(target: "collator::core::kvs::ds", "Started kvs store in {}", path);
		Ok(Datastore {
			inner,
			collator: Collator::new(),
		})
	}

	/// Specify the collator used to encode keys and values
	pub fn with_collator(mut self, collator: Collator) -> Self {
		self.collator = collator;
		self
	}

	/// Create a new transaction on this datastore
	#[allow(unreachable_code, unreachable_patterns)]
	pub async fn transaction(&self, write: bool) -> Result<Transaction> {
		let inner = match &self.inner {
			#[cfg(feature = "kv-mem")]
			Inner::Mem(v) => v.transaction(write).await?,
			_ => unreachable!(),
		};
		Ok(Transaction::new(inner, self.collator.clone()))
	}

	/// Shutdown the datastore
	#[allow(unreachable_patterns)]
	pub async fn shutdown(&self) -> Result<()> {
		match &self.inner {
			#[cfg(feature = "kv-mem")]
			Inner::Mem(v) => v.shutdown().await,
			_ => unreachable!(),
		}
	}
}
