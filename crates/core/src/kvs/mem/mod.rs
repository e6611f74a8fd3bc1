#![cfg(feature = "kv-mem")]

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, bail, ensure};
use tokio::sync::{Mutex, RwLock};

use crate::cnf::{MAX_KEY_SIZE, MAX_VALUE_SIZE};
use crate::col::Stamped;
use crate::err::Error;
use crate::kvs::api::Transactable;
use crate::kvs::{Key, Sprintable, Val};
use crate::vs::{Oracle, VersionStamp};

type Store = BTreeMap<Key, Val>;

pub struct Datastore {
	/// The committed key-value pairs
	store: Arc<RwLock<Store>>,
	/// The allocator for transaction ids
	oracle: Arc<Oracle>,
}

/// The changes buffered by a writeable transaction.
#[derive(Default)]
struct Writes {
	/// Plain writes, where `None` marks a deletion
	ops: BTreeMap<Key, Option<Val>>,
	/// Writes waiting for the transaction order
	stamped: Vec<(Stamped, Stamped)>,
}

pub struct Transaction {
	/// Is the transaction complete?
	done: AtomicBool,
	/// Is the transaction writeable?
	write: bool,
	/// The committed key-value pairs
	store: Arc<RwLock<Store>>,
	/// The allocator for transaction ids
	oracle: Arc<Oracle>,
	/// The buffered changes
	writes: Mutex<Writes>,
}

impl Drop for Transaction {
	fn drop(&mut self) {
		if !self.done.load(Ordering::Acquire) && self.write {
			warn!("A transaction was dropped without being committed or cancelled");
		}
	}
}

impl Datastore {
	/// Open a new database
	pub(crate) fn new() -> Datastore {
		Datastore {
			store: Arc::new(RwLock::new(BTreeMap::new())),
			oracle: Arc::new(Oracle::default()),
		}
	}
	/// Shutdown the database
	pub(crate) async fn shutdown(&self) -> Result<()> {
		// Nothing to do here
		Ok(())
	}
	/// Start a new transaction
	pub(crate) async fn transaction(&self, write: bool) -> Result<Box<dyn Transactable>> {
		Ok(Box::new(Transaction {
			done: AtomicBool::new(false),
			write,
			store: self.store.clone(),
			oracle: self.oracle.clone(),
			writes: Mutex::new(Writes::default()),
		}))
	}
}

impl Transaction {
	fn check_size(key: &[u8], val: &[u8]) -> Result<()> {
		ensure!(key.len() <= *MAX_KEY_SIZE, Error::TxKeyTooLarge);
		ensure!(
			val.len() <= *MAX_VALUE_SIZE,
			Error::Tx(format!("The value is too large: {} bytes", val.len()))
		);
		Ok(())
	}
}

/// Merge committed pairs with buffered writes, in key order.
fn merge<'a, A, B>(mut store: Peekable<A>, mut ops: Peekable<B>, limit: usize) -> Vec<(Key, Val)>
where
	A: Iterator<Item = (&'a Key, &'a Val)>,
	B: Iterator<Item = (&'a Key, &'a Option<Val>)>,
{
	let mut out = Vec::new();
	while out.len() < limit {
		let next = match (store.peek(), ops.peek()) {
			(None, None) => break,
			(Some((k, _)), Some((o, _))) if k < o => store.next().map(|(k, v)| (k, Some(v))),
			(Some((k, _)), Some((o, _))) if k == o => {
				store.next();
				ops.next().map(|(k, v)| (k, v.as_ref()))
			}
			(Some(_), None) => store.next().map(|(k, v)| (k, Some(v))),
			_ => ops.next().map(|(k, v)| (k, v.as_ref())),
		};
		match next {
			Some((k, Some(v))) => out.push((k.clone(), v.clone())),
			// Deleted in this transaction
			Some((_, None)) => continue,
			None => break,
		}
	}
	out
}

#[async_trait::async_trait]
impl Transactable for Transaction {
	fn kind(&self) -> &'static str {
		"memory"
	}

	/// Check if closed
	fn closed(&self) -> bool {
		self.done.load(Ordering::Relaxed)
	}

	/// Check if writeable
	fn writeable(&self) -> bool {
		self.write
	}

	/// Cancel a transaction
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self))]
	async fn cancel(&self) -> Result<()> {
		// Atomically mark transaction as done and check if it was already closed
		if self.done.swap(true, Ordering::AcqRel) {
			bail!(Error::TxFinished);
		}
		// Discard the buffered changes
		*self.writes.lock().await = Writes::default();
		// Continue
		Ok(())
	}

	/// Commit a transaction
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self))]
	async fn commit(&self) -> Result<()> {
		// Check to see if transaction is writable
		ensure!(self.writeable(), Error::TxReadonly);
		// Atomically mark transaction as done and check if it was already closed
		if self.done.swap(true, Ordering::AcqRel) {
			bail!(Error::TxFinished);
		}
		let writes = std::mem::take(&mut *self.writes.lock().await);
		// Lock the store for the whole commit
		let mut store = self.store.write().await;
		// Allocate the transaction id which seeds every versionstamp
		let id = self.oracle.next().ok_or(Error::TxVersionstampOverflow)?;
		// Resolve every patch site before anything is applied
		let mut stamped = Vec::with_capacity(writes.stamped.len());
		for (n, (mut key, mut val)) in writes.stamped.into_iter().enumerate() {
			let batch = u16::try_from(n).map_err(|_| Error::TxVersionstampOverflow)?;
			let order = VersionStamp::from_parts(id, batch);
			key.resolve(&order);
			val.resolve(&order);
			stamped.push((key.into_bytes()?, val.into_bytes()?));
		}
		trace!(target: "collator::core::kvs::mem", id, ops = writes.ops.len(), stamped = stamped.len(), "Committing transaction");
		for (key, val) in writes.ops {
			match val {
				Some(val) => store.insert(key, val),
				None => store.remove(&key),
			};
		}
		store.extend(stamped);
		// Continue
		Ok(())
	}

	/// Check if a key exists
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self), fields(key = key.sprint()))]
	async fn exists(&self, key: Key) -> Result<bool> {
		Ok(self.get(key).await?.is_some())
	}

	/// Fetch a key from the database
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self), fields(key = key.sprint()))]
	async fn get(&self, key: Key) -> Result<Option<Val>> {
		// Check to see if transaction is closed
		ensure_open!(self);
		// Read our own writes first
		if let Some(val) = self.writes.lock().await.ops.get(&key) {
			return Ok(val.clone());
		}
		Ok(self.store.read().await.get(&key).cloned())
	}

	/// Insert or update a key in the database
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self, val), fields(key = key.sprint()))]
	async fn set(&self, key: Key, val: Val) -> Result<()> {
		// Check to see if transaction is closed and writeable
		ensure_open!(self, write);
		Self::check_size(&key, &val)?;
		self.writes.lock().await.ops.insert(key, Some(val));
		Ok(())
	}

	/// Insert a key if it doesn't exist in the database
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self, val), fields(key = key.sprint()))]
	async fn put(&self, key: Key, val: Val) -> Result<()> {
		// Check to see if transaction is closed and writeable
		ensure_open!(self, write);
		Self::check_size(&key, &val)?;
		let store = self.store.read().await;
		let mut writes = self.writes.lock().await;
		let exists = match writes.ops.get(&key) {
			Some(v) => v.is_some(),
			None => store.contains_key(&key),
		};
		ensure!(!exists, Error::TxKeyAlreadyExists);
		writes.ops.insert(key, Some(val));
		Ok(())
	}

	/// Delete a key
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self), fields(key = key.sprint()))]
	async fn del(&self, key: Key) -> Result<()> {
		// Check to see if transaction is closed and writeable
		ensure_open!(self, write);
		self.writes.lock().await.ops.insert(key, None);
		Ok(())
	}

	/// Retrieve a range of keys from the databases
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self), fields(rng = rng.sprint()))]
	async fn keys(&self, rng: Range<Key>, limit: u32) -> Result<Vec<Key>> {
		let res = self.scan(rng, limit).await?;
		Ok(res.into_iter().map(|(k, _)| k).collect())
	}

	/// Retrieve a range of key-value pairs from the databases
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self), fields(rng = rng.sprint()))]
	async fn scan(&self, rng: Range<Key>, limit: u32) -> Result<Vec<(Key, Val)>> {
		// Check to see if transaction is closed
		ensure_open!(self);
		// An inverted range selects nothing
		if rng.start >= rng.end {
			return Ok(Vec::new());
		}
		let store = self.store.read().await;
		let writes = self.writes.lock().await;
		let res = merge(
			store.range(rng.clone()).peekable(),
			writes.ops.range(rng).peekable(),
			limit as usize,
		);
		Ok(res)
	}

	/// Insert a key whose key or value waits for the transaction order
	#[instrument(level = "trace", target = "collator::core::kvs::api", skip(self, val), fields(key = key.sprint()))]
	async fn set_versionstamped(&self, key: Stamped, val: Stamped) -> Result<()> {
		// Check to see if transaction is closed and writeable
		ensure_open!(self, write);
		ensure!(!(key.is_pending() && val.is_pending()), Error::DualPendingVersionstamp);
		Self::check_size(key.bytes(), val.bytes())?;
		if !key.is_pending() && !val.is_pending() {
			return self.set(key.into_bytes()?, val.into_bytes()?).await;
		}
		let mut writes = self.writes.lock().await;
		ensure!(writes.stamped.len() <= u16::MAX as usize, Error::TxVersionstampOverflow);
		writes.stamped.push((key, val));
		Ok(())
	}
}
