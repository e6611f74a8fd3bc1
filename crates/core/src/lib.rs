//! # Collator Core
//!
//! This crate is the core library of the collator. It turns heterogeneous,
//! possibly nested values into byte strings whose unsigned lexicographic
//! order reproduces the logical order of the values, so that byte-ordered
//! key-value stores can be driven as ordered indexes with composite keys.
//!
//! The [`col`] module holds the codec itself. The [`kvs`] module holds the
//! storage boundary which consumes encoded keys and values, including the
//! deferred versionstamp patch which is resolved when a transaction commits.

#[macro_use]
extern crate tracing;

#[macro_use]
mod mac;

pub mod cnf;
pub mod col;
pub mod err;
pub mod kvs;
pub mod val;
pub mod vs;

pub use col::{
	Collator, Encoded, Entry, Stamped, asc, collator, decode, desc, encode, float32, float64, int8,
	int16, int32, int64, uint8, uint16, uint32, uint64, versionstamp,
};
pub use err::Error;
pub use val::Value;
pub use vs::VersionStamp;
