use std::fmt;

use crate::val::{Value, Width};

/// The orientation of a field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
	#[default]
	Asc,
	Desc,
}

impl Direction {
	/// The byte which every raw byte of a field is XORed with
	/// to recover its ascending form.
	pub fn mask(&self) -> u8 {
		match self {
			Direction::Asc => 0x00,
			Direction::Desc => 0xff,
		}
	}

	pub fn flip(self) -> Self {
		match self {
			Direction::Asc => Direction::Desc,
			Direction::Desc => Direction::Asc,
		}
	}

	pub fn is_desc(&self) -> bool {
		matches!(self, Direction::Desc)
	}
}

/// The semantic type of a field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
	Null,
	Bool,
	Number(Width),
	Date,
	Bytes,
	Strand,
	Array,
	Version,
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Kind::Null => f.write_str("null"),
			Kind::Bool => f.write_str("bool"),
			Kind::Number(w) => write!(f, "number<{}>", w.as_str()),
			Kind::Date => f.write_str("date"),
			Kind::Bytes => f.write_str("bytes"),
			Kind::Strand => f.write_str("string"),
			Kind::Array => f.write_str("array"),
			Kind::Version => f.write_str("versionstamp"),
		}
	}
}

/// A value paired with its orientation and detected type.
///
/// One is created for every value handed to the encoder, and for every
/// element of every array, before it is encoded.
#[derive(Clone, Copy, Debug)]
pub struct MetaValue<'a> {
	pub value: &'a Value,
	pub dir: Direction,
	pub kind: Kind,
}

impl<'a> MetaValue<'a> {
	/// Wrap a value, unwrapping any orientation wrappers around it.
	///
	/// Orientation is relative, so each `Desc` wrapper flips the direction
	/// and a doubly wrapped value ends up ascending.
	pub fn new(mut value: &'a Value) -> Self {
		let mut dir = Direction::Asc;
		while let Value::Desc(inner) = value {
			dir = dir.flip();
			value = inner;
		}
		let kind = match value {
			Value::Null => Kind::Null,
			Value::Bool(_) => Kind::Bool,
			Value::Number(v) => Kind::Number(v.width()),
			Value::Datetime(_) => Kind::Date,
			Value::Bytes(_) => Kind::Bytes,
			Value::Strand(_) => Kind::Strand,
			Value::Array(_) => Kind::Array,
			Value::Stamp(_) => Kind::Version,
			Value::Desc(_) => unreachable!("orientation wrappers were removed above"),
		};
		MetaValue {
			value,
			dir,
			kind,
		}
	}
}
