use crate::col::prim;
use crate::err::Error;
use crate::vs::{VERSIONSTAMP_LEN, VersionStamp};

/// A block of encoded bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EncodeBuffer {
	/// A finished block
	Bytes(Vec<u8>),
	/// A block holding a region which the storage transaction overwrites
	/// with the transaction order once it is known. The region is
	/// [`VERSIONSTAMP_LEN`] bytes long and starts at `offset`. When
	/// `descending` is set the order is written complemented.
	Versionstamp {
		bytes: Vec<u8>,
		offset: usize,
		descending: bool,
	},
}

impl EncodeBuffer {
	pub fn as_slice(&self) -> &[u8] {
		match self {
			EncodeBuffer::Bytes(v) => v,
			EncodeBuffer::Versionstamp {
				bytes,
				..
			} => bytes,
		}
	}

	pub fn len(&self) -> usize {
		self.as_slice().len()
	}

	pub fn is_empty(&self) -> bool {
		self.as_slice().is_empty()
	}

	pub fn is_pending(&self) -> bool {
		matches!(self, EncodeBuffer::Versionstamp { .. })
	}

	fn complement(&mut self) {
		match self {
			EncodeBuffer::Bytes(v) => prim::complement(v),
			EncodeBuffer::Versionstamp {
				bytes,
				descending,
				..
			} => {
				prim::complement(bytes);
				*descending = !*descending;
			}
		}
	}
}

/// The ordered list of blocks which make up an encoding.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Encoded {
	blocks: Vec<EncodeBuffer>,
}

impl Encoded {
	pub(crate) fn push(&mut self, bytes: Vec<u8>) {
		self.blocks.push(EncodeBuffer::Bytes(bytes));
	}

	pub(crate) fn push_pending(&mut self, bytes: Vec<u8>, offset: usize) {
		debug_assert!(offset + VERSIONSTAMP_LEN <= bytes.len());
		self.blocks.push(EncodeBuffer::Versionstamp {
			bytes,
			offset,
			descending: false,
		});
	}

	/// The index of the next block, used to mark the start of a field.
	pub(crate) fn mark(&self) -> usize {
		self.blocks.len()
	}

	/// Complement every block from the given mark onwards.
	pub(crate) fn complement_from(&mut self, mark: usize) {
		self.blocks[mark..].iter_mut().for_each(EncodeBuffer::complement);
	}

	pub fn blocks(&self) -> &[EncodeBuffer] {
		&self.blocks
	}

	/// The total number of encoded bytes.
	pub fn len(&self) -> usize {
		self.blocks.iter().map(EncodeBuffer::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.iter().all(EncodeBuffer::is_empty)
	}

	/// Check if any block is waiting for a transaction order.
	pub fn is_pending(&self) -> bool {
		self.blocks.iter().any(EncodeBuffer::is_pending)
	}

	/// Concatenate every block, leaving pending regions as placeholders.
	pub fn to_vec(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.len());
		for block in &self.blocks {
			out.extend_from_slice(block.as_slice());
		}
		out
	}

	/// Concatenate every block into plain bytes.
	///
	/// Fails if a block is still waiting for a transaction order.
	pub fn into_bytes(self) -> Result<Vec<u8>, Error> {
		if self.is_pending() {
			return Err(Error::PendingVersionstamp);
		}
		Ok(self.to_vec())
	}

	/// Concatenate every block, keeping track of the single patch site.
	pub fn into_stamped(self) -> Result<Stamped, Error> {
		let mut bytes = Vec::with_capacity(self.len());
		let mut patch = None;
		for block in self.blocks {
			match block {
				EncodeBuffer::Bytes(v) => bytes.extend(v),
				EncodeBuffer::Versionstamp {
					bytes: v,
					offset,
					descending,
				} => {
					if patch.is_some() {
						return Err(Error::MultiplePendingVersionstamps);
					}
					patch = Some(Patch {
						offset: bytes.len() + offset,
						descending,
					});
					bytes.extend(v);
				}
			}
		}
		Ok(Stamped {
			bytes,
			patch,
		})
	}
}

/// The location of a pending transaction order within a byte string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Patch {
	pub offset: usize,
	pub descending: bool,
}

/// A flattened encoding with at most one pending patch site.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stamped {
	bytes: Vec<u8>,
	patch: Option<Patch>,
}

impl From<Vec<u8>> for Stamped {
	fn from(bytes: Vec<u8>) -> Self {
		Stamped {
			bytes,
			patch: None,
		}
	}
}

impl Stamped {
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn patch(&self) -> Option<Patch> {
		self.patch
	}

	pub fn is_pending(&self) -> bool {
		self.patch.is_some()
	}

	/// Take the bytes, failing if the patch site is still unresolved.
	pub fn into_bytes(self) -> Result<Vec<u8>, Error> {
		match self.patch {
			Some(_) => Err(Error::PendingVersionstamp),
			None => Ok(self.bytes),
		}
	}

	/// Write the transaction order into the patch site.
	///
	/// The patch site is consumed, so the order is written at most once.
	/// Returns whether anything was written.
	pub fn resolve(&mut self, order: &VersionStamp) -> bool {
		let Some(patch) = self.patch.take() else {
			return false;
		};
		let region = &mut self.bytes[patch.offset..patch.offset + VERSIONSTAMP_LEN];
		region.copy_from_slice(order.as_bytes());
		if patch.descending {
			prim::complement(region);
		}
		true
	}
}
