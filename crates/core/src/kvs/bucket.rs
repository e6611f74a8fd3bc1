use std::ops::Range;

use anyhow::Result;

use super::Key;
use super::tx::Transaction;
use crate::cnf::NORMAL_FETCH_SIZE;
use crate::col::Entry;
use crate::val::Value;

/// A named key namespace.
///
/// Every key in a bucket is stored as the encoded bucket name followed by
/// the encoded key. A key always starts with a field tag, so the bucket
/// occupies one range for ascending tags and one for descending tags. The
/// bytes between them belong to longer bucket names, such as `a\0` after `a`.
pub struct Bucket<'a> {
	tx: &'a Transaction,
	name: String,
	prefix: Key,
}

impl<'a> Bucket<'a> {
	pub(super) fn new(tx: &'a Transaction, name: &str) -> Result<Self> {
		let prefix = tx.key(&Value::from(name))?;
		Ok(Bucket {
			tx,
			name: name.to_owned(),
			prefix,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The encoded bucket name which starts every key.
	pub fn prefix(&self) -> &[u8] {
		&self.prefix
	}

	fn key(&self, key: &Value) -> Result<Key> {
		let mut k = self.prefix.clone();
		k.extend(self.tx.key(key)?);
		Ok(k)
	}

	/// The ranges which hold every key of the bucket, in key order.
	fn full(&self) -> [Range<Key>; 2] {
		let codes = self.tx.collator().table().field_codes();
		let bound = |tags: &mut dyn Iterator<Item = u8>| {
			let (lo, hi) = tags.fold((u8::MAX, u8::MIN), |(lo, hi), t| (lo.min(t), hi.max(t)));
			let mut beg = self.prefix.clone();
			beg.push(lo);
			// Field tags never reach 0xff in a valid table
			let mut end = self.prefix.clone();
			end.push(hi.saturating_add(1));
			beg..end
		};
		[
			bound(&mut codes.iter().map(|c| c.asc)),
			bound(&mut codes.iter().map(|c| c.desc)),
		]
	}

	pub async fn exists(&self, key: &Value) -> Result<bool> {
		self.tx.inner().exists(self.key(key)?).await
	}

	pub async fn get(&self, key: &Value) -> Result<Option<Value>> {
		match self.tx.inner().get(self.key(key)?).await? {
			Some(v) => Ok(Some(self.tx.value(&v)?)),
			None => Ok(None),
		}
	}

	/// Insert or update a key. Either the key or the value may contain a
	/// pending versionstamp.
	pub async fn set(&self, key: &Value, val: &Value) -> Result<()> {
		let col = self.tx.collator();
		let key = col.encode_all(&[Value::from(self.name.as_str()), key.clone()])?;
		let entry = Entry::new(key, col.encode(val)?)?;
		self.tx.set_entry(entry).await
	}

	/// Insert a key if it doesn't exist.
	pub async fn put(&self, key: &Value, val: &Value) -> Result<()> {
		let val = self.tx.collator().encode(val)?.into_bytes()?;
		self.tx.inner().put(self.key(key)?, val).await
	}

	pub async fn del(&self, key: &Value) -> Result<()> {
		self.tx.inner().del(self.key(key)?).await
	}

	/// Retrieve at most `limit` pairs whose keys fall within a range.
	pub async fn range(&self, rng: Range<Value>, limit: u32) -> Result<Vec<(Value, Value)>> {
		let rng = self.key(&rng.start)?..self.key(&rng.end)?;
		let res = self.tx.inner().scan(rng, limit).await?;
		self.tx.decode_pairs(res, self.prefix.len())
	}

	/// Retrieve every pair in the bucket, in key order.
	///
	/// The bucket is fetched in batches, so it may be larger than a single
	/// scan allows.
	pub async fn all(&self) -> Result<Vec<(Value, Value)>> {
		let batch = (*NORMAL_FETCH_SIZE).max(1);
		let mut out = Vec::new();
		for Range {
			start: mut beg,
			end,
		} in self.full()
		{
			loop {
				let res = self.tx.inner().scan(beg.clone()..end.clone(), batch).await?;
				let last = match res.last() {
					Some((k, _)) => k.clone(),
					None => break,
				};
				let done = res.len() < batch as usize;
				out.extend(self.tx.decode_pairs(res, self.prefix.len())?);
				if done {
					break;
				}
				// Continue from the key immediately after the last one
				beg = last;
				beg.push(0x00);
			}
		}
		Ok(out)
	}

	/// Delete every key in the bucket.
	pub async fn clear(&self) -> Result<()> {
		for rng in self.full() {
			self.tx.inner().delr(rng).await?;
		}
		Ok(())
	}
}
