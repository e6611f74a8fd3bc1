//! The module defining the key value store boundary.
//!
//! Storage engines deal only in raw byte keys and values. The typed
//! [`Transaction`] wrapper turns values into keys and values through the
//! collator, and hands any pending versionstamp patch site to the engine,
//! which resolves it when the transaction commits. This module enables the
//! following operations on the key value store:
//! - get
//! - set
//! - put
//! - delete
//! - scan
//!
//! These operations can be processed by the following storage engines:
//! - `mem`: an in-memory ordered store

mod api;
mod bucket;
mod ds;
mod mem;
mod tx;

#[cfg(test)]
mod tests;

use std::ops::Range;

pub use api::Transactable;
pub use bucket::Bucket;
pub use ds::Datastore;
pub use tx::Transaction;

use crate::col::Stamped;

/// The key part of a key-value pair. An alias for [`Vec<u8>`].
pub type Key = Vec<u8>;

/// The value part of a key-value pair. An alias for [`Vec<u8>`].
pub type Val = Vec<u8>;

/// Renders raw keys printably for tracing fields.
pub trait Sprintable {
	fn sprint(&self) -> String;
}

impl Sprintable for [u8] {
	fn sprint(&self) -> String {
		self.escape_ascii().to_string()
	}
}

impl Sprintable for Vec<u8> {
	fn sprint(&self) -> String {
		self.as_slice().sprint()
	}
}

impl Sprintable for Range<Key> {
	fn sprint(&self) -> String {
		format!("{}..{}", self.start.sprint(), self.end.sprint())
	}
}

impl Sprintable for Stamped {
	fn sprint(&self) -> String {
		match self.patch() {
			Some(p) => format!("{} (patch at {})", self.bytes().sprint(), p.offset),
			None => self.bytes().sprint(),
		}
	}
}
