use std::fmt;
use std::ops::Range;

use anyhow::{Result, ensure};

use super::api::Transactable;
use super::bucket::Bucket;
use super::{Key, Val};
use crate::col::{Collator, Entry};
use crate::err::Error;
use crate::val::Value;

/// A transaction which encodes keys and values through the collator.
///
/// Keys and values are written through [`Transaction::set`] and friends as
/// [`Value`]s. A key or a value may contain a pending versionstamp, which
/// is assigned when the transaction commits.
pub struct Transaction {
	/// The underlying storage transaction
	tx: Box<dyn Transactable>,
	/// The collator which encodes keys and values
	collator: Collator,
}

impl fmt::Debug for Transaction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Transaction")
			.field("kind", &self.tx.kind())
			.field("closed", &self.tx.closed())
			.field("writeable", &self.tx.writeable())
			.finish()
	}
}

impl Transaction {
	pub(super) fn new(tx: Box<dyn Transactable>, collator: Collator) -> Self {
		Transaction {
			tx,
			collator,
		}
	}

	/// Get the underlying storage transaction
	pub fn inner(&self) -> &dyn Transactable {
		self.tx.as_ref()
	}

	pub fn collator(&self) -> &Collator {
		&self.collator
	}

	/// Check if the transaction is finished.
	pub fn closed(&self) -> bool {
		self.tx.closed()
	}

	/// Check if the transaction is writeable.
	pub fn writeable(&self) -> bool {
		self.tx.writeable()
	}

	/// Cancel the transaction, discarding every change.
	pub async fn cancel(&self) -> Result<()> {
		self.tx.cancel().await
	}

	/// Commit the transaction, assigning every pending versionstamp.
	pub async fn commit(&self) -> Result<()> {
		self.tx.commit().await
	}

	/// Open a named key namespace within this transaction.
	pub fn bucket(&self, name: &str) -> Result<Bucket<'_>> {
		Bucket::new(self, name)
	}

	/// Encode a key which must not contain a pending versionstamp.
	pub(super) fn key(&self, key: &Value) -> Result<Key> {
		Ok(self.collator.encode(key)?.into_bytes()?)
	}

	pub(super) fn value(&self, val: &[u8]) -> Result<Value> {
		Ok(self.collator.decode(val)?)
	}

	/// Write an entry, deferring it to commit if it carries a patch site.
	pub(super) async fn set_entry(&self, entry: Entry) -> Result<()> {
		if entry.is_pending() {
			self.tx.set_versionstamped(entry.key, entry.val).await
		} else {
			self.tx.set(entry.key.into_bytes()?, entry.val.into_bytes()?).await
		}
	}

	/// Check if a key exists.
	pub async fn exists(&self, key: &Value) -> Result<bool> {
		self.tx.exists(self.key(key)?).await
	}

	/// Fetch the value stored at a key.
	pub async fn get(&self, key: &Value) -> Result<Option<Value>> {
		match self.tx.get(self.key(key)?).await? {
			Some(v) => Ok(Some(self.value(&v)?)),
			None => Ok(None),
		}
	}

	/// Insert or update a key.
	pub async fn set(&self, key: &Value, val: &Value) -> Result<()> {
		let entry = self.collator.entry(key, val)?;
		self.set_entry(entry).await
	}

	/// Insert a key if it doesn't exist.
	///
	/// A key with a pending versionstamp is unique once assigned, so use
	/// [`Transaction::set`] for those.
	pub async fn put(&self, key: &Value, val: &Value) -> Result<()> {
		let entry = self.collator.entry(key, val)?;
		ensure!(!entry.is_pending(), Error::PendingVersionstamp);
		self.tx.put(entry.key.into_bytes()?, entry.val.into_bytes()?).await
	}

	/// Delete a key.
	pub async fn del(&self, key: &Value) -> Result<()> {
		self.tx.del(self.key(key)?).await
	}

	/// Retrieve the key-value pairs whose keys fall within a range.
	pub async fn scan(&self, rng: Range<Value>, limit: u32) -> Result<Vec<(Value, Value)>> {
		let rng = self.key(&rng.start)?..self.key(&rng.end)?;
		self.decode_pairs(self.tx.scan(rng, limit).await?, 0)
	}

	/// Decode scanned pairs, skipping a prefix of every key.
	pub(super) fn decode_pairs(&self, res: Vec<(Key, Val)>, skip: usize) -> Result<Vec<(Value, Value)>> {
		res.into_iter()
			.map(|(k, v)| -> Result<(Value, Value)> {
				let key = k.get(skip..).ok_or(Error::UnexpectedEnd)?;
				Ok((self.value(key)?, self.value(&v)?))
			})
			.collect()
	}
}
