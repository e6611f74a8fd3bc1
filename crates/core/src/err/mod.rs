use thiserror::Error;

/// An error originating from the collator or its storage boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The collator encountered unreachable logic
	#[error("The collator encountered unreachable logic: {0}")]
	Unreachable(String),

	/// A field started with a tag which has no registered decoder
	#[error("Unknown tag 0x{tag:02x} at byte {position}")]
	UnknownTag {
		tag: u8,
		position: usize,
	},

	/// The input ended in the middle of a field
	#[error("Unexpected end of input while decoding a field")]
	UnexpectedEnd,

	/// Bytes were left over after the expected number of fields
	#[error("Unexpected trailing bytes at byte {0}")]
	TrailingBytes(usize),

	/// A buffer or string payload contained a malformed escape sequence
	#[error("Invalid escape sequence at byte {0}")]
	InvalidEscape(usize),

	/// A string field did not contain valid UTF-8
	#[error("A string field did not contain valid UTF-8")]
	InvalidUtf8,

	/// A date field or input was out of range or not a whole millisecond
	#[error("Invalid datetime: {0}")]
	InvalidDatetime(String),

	/// A value was given which cannot be encoded
	#[error("Unsupported input: {0}")]
	UnsupportedInput(String),

	/// Plain bytes were requested from an encoding with a pending versionstamp
	#[error("The encoding contains a pending versionstamp and can not be used as plain bytes")]
	PendingVersionstamp,

	/// A single encoding contained more than one pending versionstamp
	#[error("A single key or value may contain at most one pending versionstamp")]
	MultiplePendingVersionstamps,

	/// Both the key and the value of an entry contained a pending versionstamp
	#[error("Only one of the key or the value of an entry may contain a pending versionstamp")]
	DualPendingVersionstamp,

	/// There was a problem with the underlying datastore
	#[error("There was a problem with the underlying datastore: {0}")]
	Ds(String),

	/// There was a problem with a datastore transaction
	#[error("There was a problem with a datastore transaction: {0}")]
	Tx(String),

	/// The transaction was already cancelled or committed
	#[error("Couldn't update a finished transaction")]
	TxFinished,

	/// The current transaction was created as read-only
	#[error("Couldn't write to a read only transaction")]
	TxReadonly,

	/// The key being inserted in the transaction already exists
	#[error("The key being inserted already exists")]
	TxKeyAlreadyExists,

	/// The key exceeds a limit set by the KV store
	#[error("The key is too large")]
	TxKeyTooLarge,

	/// A transaction wrote more versionstamped entries than a batch order can address
	#[error("Too many versionstamped writes in a single transaction")]
	TxVersionstampOverflow,
}
