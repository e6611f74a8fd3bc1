use std::fmt;

use crate::vs::VersionStamp;

/// A versionstamp value.
///
/// A stamp with an `order` is bounded: its transaction order is known,
/// usually because it was read back from storage. A stamp without one is
/// pending, and the storage transaction which writes it fills in the order
/// when it commits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Stamp {
	pub order: Option<VersionStamp>,
	pub code: u16,
}

impl Stamp {
	pub fn pending(code: u16) -> Self {
		Stamp {
			order: None,
			code,
		}
	}

	pub fn bounded(order: VersionStamp, code: u16) -> Self {
		Stamp {
			order: Some(order),
			code,
		}
	}

	pub fn is_pending(&self) -> bool {
		self.order.is_none()
	}
}

impl fmt::Display for Stamp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.order {
			Some(order) => write!(f, "vs'{order}:{}'", self.code),
			None => write!(f, "vs'pending:{}'", self.code),
		}
	}
}
