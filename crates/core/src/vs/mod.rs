//! vs is a module to handle Versionstamps.
//!
//! A versionstamp is the 10-byte transaction order which a storage
//! transaction assigns at commit time. The first 8 bytes hold the
//! transaction id and the final 2 bytes hold the order of the write
//! within the transaction, both big-endian, so that byte order matches
//! commit order.

mod oracle;

use std::fmt;

pub use self::oracle::Oracle;

use crate::err::Error;

/// The number of bytes in a transaction order.
pub const VERSIONSTAMP_LEN: usize = 10;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VersionStamp([u8; VERSIONSTAMP_LEN]);

impl VersionStamp {
	pub const ZERO: VersionStamp = VersionStamp([0; VERSIONSTAMP_LEN]);

	pub const fn from_bytes(bytes: [u8; VERSIONSTAMP_LEN]) -> Self {
		VersionStamp(bytes)
	}

	/// Create a versionstamp for the first write of a transaction.
	pub fn from_u64(v: u64) -> Self {
		Self::from_parts(v, 0)
	}

	/// Create a versionstamp from a transaction id and the
	/// order of the write within that transaction.
	pub fn from_parts(tx: u64, batch: u16) -> Self {
		let mut buf = [0; VERSIONSTAMP_LEN];
		buf[..8].copy_from_slice(&tx.to_be_bytes());
		buf[8..].copy_from_slice(&batch.to_be_bytes());
		VersionStamp(buf)
	}

	pub fn try_from_slice(bytes: &[u8]) -> Result<Self, Error> {
		let bytes = <[u8; VERSIONSTAMP_LEN]>::try_from(bytes).map_err(|_| {
			Error::UnsupportedInput(format!(
				"a versionstamp must be {VERSIONSTAMP_LEN} bytes, found {}",
				bytes.len()
			))
		})?;
		Ok(VersionStamp(bytes))
	}

	/// The transaction id held in the first 8 bytes.
	pub fn as_u64(&self) -> u64 {
		let mut buf = [0; 8];
		buf.copy_from_slice(&self.0[..8]);
		u64::from_be_bytes(buf)
	}

	/// The order of the write within its transaction.
	pub fn batch(&self) -> u16 {
		u16::from_be_bytes([self.0[8], self.0[9]])
	}

	pub fn as_bytes(&self) -> &[u8; VERSIONSTAMP_LEN] {
		&self.0
	}

	/// The versionstamp of the next transaction, or `None` once exhausted.
	pub fn next(&self) -> Option<Self> {
		Some(Self::from_u64(self.as_u64().checked_add(1)?))
	}
}

impl fmt::Display for VersionStamp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", hex::encode(self.0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parts_are_big_endian() {
		let vs = VersionStamp::from_parts(0x0102030405060708, 0x090a);
		assert_eq!(vs.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
		assert_eq!(vs.as_u64(), 0x0102030405060708);
		assert_eq!(vs.batch(), 0x090a);
	}

	#[test]
	fn byte_order_matches_commit_order() {
		let a = VersionStamp::from_parts(1, 65535);
		let b = VersionStamp::from_parts(2, 0);
		assert!(a < b);
		assert!(a.as_bytes() < b.as_bytes());
		assert_eq!(a.next(), Some(b));
	}

	#[test]
	fn next_is_exhausted_at_the_end() {
		assert_eq!(VersionStamp::from_u64(u64::MAX).next(), None);
	}

	#[test]
	fn slice_must_be_ten_bytes() {
		assert!(VersionStamp::try_from_slice(&[0; 9]).is_err());
		assert_eq!(VersionStamp::try_from_slice(&[0; 10]), Ok(VersionStamp::ZERO));
	}

	#[test]
	fn display_is_hex() {
		assert_eq!(VersionStamp::from_u64(1).to_string(), "00000000000000010000");
	}
}
