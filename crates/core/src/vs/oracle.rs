use std::sync::atomic::{AtomicU64, Ordering};

/// Allocates monotonically increasing transaction ids.
///
/// Every committed write transaction takes exactly one id, and the id seeds
/// the versionstamps of all the pending writes in that transaction. Ids are
/// never reused, even when the transaction later fails to apply.
#[derive(Debug)]
pub struct Oracle {
	last: AtomicU64,
}

impl Default for Oracle {
	fn default() -> Self {
		Self::new(0)
	}
}

impl Oracle {
	/// Create an oracle whose first allocated id follows `last`.
	pub fn new(last: u64) -> Self {
		Oracle {
			last: AtomicU64::new(last),
		}
	}

	/// Allocate the next transaction id, or `None` once exhausted.
	pub fn next(&self) -> Option<u64> {
		self.last
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_add(1))
			.ok()
			.map(|v| v + 1)
	}

	/// The most recently allocated transaction id.
	pub fn current(&self) -> u64 {
		self.last.load(Ordering::SeqCst)
	}
}
