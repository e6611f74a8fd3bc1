use std::cmp::Ordering;
use std::fmt;

/// The explicit width of a number.
///
/// The width is always chosen by the caller, never inferred from the
/// magnitude, so the same logical number always serialises identically.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Width {
	I8,
	U8,
	I16,
	U16,
	I32,
	U32,
	I64,
	U64,
	F32,
	F64,
}

impl Width {
	/// The number of payload bytes for this width.
	pub fn size(&self) -> usize {
		match self {
			Width::I8 | Width::U8 => 1,
			Width::I16 | Width::U16 => 2,
			Width::I32 | Width::U32 | Width::F32 => 4,
			Width::I64 | Width::U64 | Width::F64 => 8,
		}
	}

	pub fn is_signed(&self) -> bool {
		matches!(self, Width::I8 | Width::I16 | Width::I32 | Width::I64)
	}

	pub fn is_float(&self) -> bool {
		matches!(self, Width::F32 | Width::F64)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Width::I8 => "i8",
			Width::U8 => "u8",
			Width::I16 => "i16",
			Width::U16 => "u16",
			Width::I32 => "i32",
			Width::U32 => "u32",
			Width::I64 => "i64",
			Width::U64 => "u64",
			Width::F32 => "f32",
			Width::F64 => "f64",
		}
	}
}

/// A number tagged with its explicit width.
#[derive(Clone, Copy, Debug)]
pub enum Number {
	Int8(i8),
	UInt8(u8),
	Int16(i16),
	UInt16(u16),
	Int32(i32),
	UInt32(u32),
	Int64(i64),
	UInt64(u64),
	Float32(f32),
	Float64(f64),
}

impl Number {
	pub fn width(&self) -> Width {
		match self {
			Number::Int8(_) => Width::I8,
			Number::UInt8(_) => Width::U8,
			Number::Int16(_) => Width::I16,
			Number::UInt16(_) => Width::U16,
			Number::Int32(_) => Width::I32,
			Number::UInt32(_) => Width::U32,
			Number::Int64(_) => Width::I64,
			Number::UInt64(_) => Width::U64,
			Number::Float32(_) => Width::F32,
			Number::Float64(_) => Width::F64,
		}
	}

	/// Every NaN is folded into the positive quiet NaN, so that
	/// all NaNs encode identically and sort after positive infinity.
	pub fn canonical(self) -> Number {
		match self {
			Number::Float32(v) if v.is_nan() => Number::Float32(f32::NAN),
			Number::Float64(v) if v.is_nan() => Number::Float64(f64::NAN),
			v => v,
		}
	}
}

impl PartialEq for Number {
	fn eq(&self, other: &Self) -> bool {
		self.partial_cmp(other) == Some(Ordering::Equal)
	}
}

impl PartialOrd for Number {
	/// Numbers of the same width compare numerically, with floats using the
	/// IEEE-754 total order. Every NaN compares equal to every other NaN and
	/// greater than positive infinity, matching the encoded order. Numbers
	/// of different widths are not comparable.
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self.canonical(), other.canonical()) {
			(Number::Int8(a), Number::Int8(b)) => Some(a.cmp(&b)),
			(Number::UInt8(a), Number::UInt8(b)) => Some(a.cmp(&b)),
			(Number::Int16(a), Number::Int16(b)) => Some(a.cmp(&b)),
			(Number::UInt16(a), Number::UInt16(b)) => Some(a.cmp(&b)),
			(Number::Int32(a), Number::Int32(b)) => Some(a.cmp(&b)),
			(Number::UInt32(a), Number::UInt32(b)) => Some(a.cmp(&b)),
			(Number::Int64(a), Number::Int64(b)) => Some(a.cmp(&b)),
			(Number::UInt64(a), Number::UInt64(b)) => Some(a.cmp(&b)),
			(Number::Float32(a), Number::Float32(b)) => Some(a.total_cmp(&b)),
			(Number::Float64(a), Number::Float64(b)) => Some(a.total_cmp(&b)),
			_ => None,
		}
	}
}

macro_rules! impl_from {
	($($t:ty => $variant:ident),*) => {
		$(
			impl From<$t> for Number {
				fn from(v: $t) -> Self {
					Number::$variant(v)
				}
			}
		)*
	};
}

impl_from!(
	i8 => Int8,
	u8 => UInt8,
	i16 => Int16,
	u16 => UInt16,
	i32 => Int32,
	u32 => UInt32,
	i64 => Int64,
	u64 => UInt64,
	f32 => Float32,
	f64 => Float64
);

impl fmt::Display for Number {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let w = self.width().as_str();
		match self {
			Number::Int8(v) => write!(f, "{v}{w}"),
			Number::UInt8(v) => write!(f, "{v}{w}"),
			Number::Int16(v) => write!(f, "{v}{w}"),
			Number::UInt16(v) => write!(f, "{v}{w}"),
			Number::Int32(v) => write!(f, "{v}{w}"),
			Number::UInt32(v) => write!(f, "{v}{w}"),
			Number::Int64(v) => write!(f, "{v}{w}"),
			Number::UInt64(v) => write!(f, "{v}{w}"),
			Number::Float32(v) => write!(f, "{v}{w}"),
			Number::Float64(v) => write!(f, "{v}{w}"),
		}
	}
}
