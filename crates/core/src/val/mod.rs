use std::fmt::{self, Write};

pub mod datetime;
pub mod json;
pub mod number;
pub mod stamp;

pub use self::datetime::Datetime;
pub use self::number::{Number, Width};
pub use self::stamp::Stamp;

use crate::vs::VersionStamp;

/// A value which can be encoded by the collator.
///
/// The variants form a closed set, so the encoder dispatches over them with
/// an exhaustive match. Arrays nest to any depth.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Number(Number),
	Datetime(Datetime),
	Bytes(Vec<u8>),
	Strand(String),
	Array(Vec<Value>),
	Stamp(Stamp),
	/// Encodes the inner value in descending order, relative to the
	/// order of the enclosing field. Decoding never produces this variant.
	Desc(Box<Value>),
	// Add new variants here
}

impl Value {
	/// Check if this value is wrapped for descending order.
	pub fn is_desc(&self) -> bool {
		matches!(self, Value::Desc(_))
	}

	/// Check if this value is, or contains, a versionstamp which has
	/// not been assigned a transaction order yet.
	pub fn is_pending(&self) -> bool {
		match self {
			Value::Stamp(v) => v.is_pending(),
			Value::Array(v) => v.iter().any(Value::is_pending),
			Value::Desc(v) => v.is_pending(),
			_ => false,
		}
	}

	/// Remove every orientation wrapper, at any depth.
	///
	/// This is the value which a decode of the encoded form returns.
	pub fn without_order(self) -> Value {
		match self {
			Value::Desc(v) => v.without_order(),
			Value::Array(v) => Value::Array(v.into_iter().map(Value::without_order).collect()),
			v => v,
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<Number> for Value {
	fn from(v: Number) -> Self {
		Value::Number(v)
	}
}

macro_rules! impl_from_number {
	($($t:ty),*) => {
		$(
			impl From<$t> for Value {
				fn from(v: $t) -> Self {
					Value::Number(Number::from(v))
				}
			}
		)*
	};
}

impl_from_number!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl From<Datetime> for Value {
	fn from(v: Datetime) -> Self {
		Value::Datetime(v)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(v)
	}
}

impl From<&[u8]> for Value {
	fn from(v: &[u8]) -> Self {
		Value::Bytes(v.to_vec())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Strand(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Strand(v.to_owned())
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::Array(v)
	}
}

impl From<Stamp> for Value {
	fn from(v: Stamp) -> Self {
		Value::Stamp(v)
	}
}

impl From<VersionStamp> for Value {
	fn from(v: VersionStamp) -> Self {
		Value::Stamp(Stamp::bounded(v, 0))
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Value::Null)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("NULL"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Number(v) => write!(f, "{v}"),
			Value::Datetime(v) => write!(f, "d'{v}'"),
			Value::Bytes(v) => write!(f, "b\"{}\"", hex::encode(v)),
			Value::Strand(v) => write!(f, "{v:?}"),
			Value::Array(v) => {
				f.write_char('[')?;
				for (i, x) in v.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{x}")?;
				}
				f.write_char(']')
			}
			Value::Stamp(v) => write!(f, "{v}"),
			Value::Desc(v) => write!(f, "DESC({v})"),
		}
	}
}
