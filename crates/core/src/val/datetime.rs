use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::err::Error;

/// A point in time with millisecond precision.
///
/// The range is whatever `chrono` can represent, which keeps every
/// millisecond offset exactly representable as an IEEE-754 double.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Datetime(i64);

impl Default for Datetime {
	fn default() -> Self {
		Datetime(0)
	}
}

impl Datetime {
	/// Create a datetime from a millisecond offset from the unix epoch.
	pub fn from_millis(ms: i64) -> Result<Self, Error> {
		match DateTime::from_timestamp_millis(ms) {
			Some(_) => Ok(Datetime(ms)),
			None => Err(Error::InvalidDatetime(format!("{ms}ms is out of range"))),
		}
	}

	/// The current time, truncated to the millisecond.
	pub fn now() -> Self {
		Utc::now().into()
	}

	/// The millisecond offset from the unix epoch.
	pub fn as_millis(&self) -> i64 {
		self.0
	}

	pub fn to_chrono(&self) -> DateTime<Utc> {
		// The offset was checked on construction
		DateTime::from_timestamp_millis(self.0).unwrap_or_default()
	}
}

impl From<DateTime<Utc>> for Datetime {
	fn from(v: DateTime<Utc>) -> Self {
		Datetime(v.timestamp_millis())
	}
}

impl From<Datetime> for DateTime<Utc> {
	fn from(v: Datetime) -> Self {
		v.to_chrono()
	}
}

impl fmt::Display for Datetime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true))
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;

	#[test]
	fn chrono_round_trip_truncates_to_millis() {
		let dt = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap()
			+ chrono::Duration::nanoseconds(1_500_000);
		let v = Datetime::from(dt);
		assert_eq!(v.as_millis() % 1000, 1);
		assert_eq!(v.to_string(), "2024-02-29T12:30:00.001Z");
	}

	#[test]
	fn out_of_range() {
		assert!(Datetime::from_millis(i64::MAX).is_err());
		assert!(Datetime::from_millis(-1).is_ok());
	}

	#[test]
	fn range_fits_in_a_double() {
		let max = Datetime::from(DateTime::<Utc>::MAX_UTC).as_millis();
		let min = Datetime::from(DateTime::<Utc>::MIN_UTC).as_millis();
		assert!(max < 1 << 53);
		assert!(min > -(1 << 53));
	}
}
