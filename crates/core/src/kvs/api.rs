//! This module defines the API for a transaction in a key-value store.

use std::ops::Range;

use anyhow::Result;

use super::{Key, Sprintable, Val};
use crate::cnf::NORMAL_FETCH_SIZE;
use crate::col::Stamped;

/// This trait defines the API for a transaction in a key-value store.
///
/// All keys and values are represented as byte arrays, encoding is handled
/// by [`super::Transaction`].
#[async_trait::async_trait]
pub trait Transactable: Send + Sync {
	/// Get the name of the transaction type.
	fn kind(&self) -> &'static str;

	/// Check if transaction is finished.
	///
	/// If the transaction has been cancelled or committed,
	/// then this function will return [`true`], and any further
	/// calls to functions on this transaction will result
	/// in a [`crate::err::Error::TxFinished`] error.
	fn closed(&self) -> bool;

	/// Check if transaction is writeable.
	fn writeable(&self) -> bool;

	/// Cancel a transaction.
	///
	/// This reverses all changes made within the transaction.
	async fn cancel(&self) -> Result<()>;

	/// Commit a transaction.
	///
	/// This resolves every pending versionstamp and applies all
	/// changes made within the transaction.
	async fn commit(&self) -> Result<()>;

	/// Check if a key exists in the datastore.
	async fn exists(&self, key: Key) -> Result<bool>;

	/// Fetch a key from the datastore.
	async fn get(&self, key: Key) -> Result<Option<Val>>;

	/// Insert or update a key in the datastore.
	async fn set(&self, key: Key, val: Val) -> Result<()>;

	/// Insert a key if it doesn't exist in the datastore.
	async fn put(&self, key: Key, val: Val) -> Result<()>;

	/// Delete a key from the datastore.
	async fn del(&self, key: Key) -> Result<()>;

	/// Retrieve a specific range of keys from the datastore.
	async fn keys(&self, rng: Range<Key>, limit: u32) -> Result<Vec<Key>>;

	/// Retrieve a specific range of key-value pairs from the datastore.
	async fn scan(&self, rng: Range<Key>, limit: u32) -> Result<Vec<(Key, Val)>>;

	/// Insert a key whose key or value carries a pending versionstamp.
	///
	/// The patch site is filled with the transaction order when the
	/// transaction commits. Until then the entry is not visible to reads.
	async fn set_versionstamped(&self, key: Stamped, val: Stamped) -> Result<()>;

	/// Fetch many keys from the datastore.
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip_all, fields(count = keys.len()))]
	async fn getm(&self, keys: Vec<Key>) -> Result<Vec<Option<Val>>> {
		let mut out = Vec::with_capacity(keys.len());
		for key in keys {
			out.push(self.get(key).await?);
		}
		Ok(out)
	}

	/// Delete a range of keys from the datastore.
	///
	/// Keys are fetched and deleted in batches, so the range can be
	/// arbitrarily large.
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self), fields(rng = rng.sprint()))]
	async fn delr(&self, rng: Range<Key>) -> Result<()> {
		loop {
			let keys = self.keys(rng.clone(), *NORMAL_FETCH_SIZE).await?;
			if keys.is_empty() {
				return Ok(());
			}
			for key in keys {
				self.del(key).await?;
			}
		}
	}
}
