//! The collator, an order-preserving binary tuple codec.
//!
//! Values are encoded into byte strings whose unsigned lexicographic order
//! reproduces the logical order of the values, ascending or descending per
//! field. Encodings are self-delimiting, so a composite key is simply the
//! concatenation of its fields.
//!
//! ```
//! use collator_core::{Collator, desc, int8};
//!
//! let col = Collator::new();
//! let a = col.encode(&vec![int8(1), desc("b")].into()).unwrap().into_bytes().unwrap();
//! let b = col.encode(&vec![int8(1), desc("a")].into()).unwrap().into_bytes().unwrap();
//! assert!(a < b);
//! ```

mod buffer;
pub mod codec;
mod complex;
mod meta;
mod prim;
mod reader;
pub mod table;

use std::cmp::Ordering;
use std::sync::LazyLock;

pub use self::buffer::{EncodeBuffer, Encoded, Patch, Stamped};
pub use self::meta::{Direction, Kind, MetaValue};
pub use self::table::{Code, CodeTable};

use self::complex::Complex;
use crate::err::Error;
use crate::val::{Number, Stamp, Value};
use crate::vs::VersionStamp;

/// The process-wide collator built from the standard code table.
static COLLATOR: LazyLock<Collator> = LazyLock::new(Collator::new);

/// A key and a value ready to be handed to storage.
///
/// At most one of the two carries a patch site.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
	pub key: Stamped,
	pub val: Stamped,
}

impl Entry {
	/// Flatten an encoded key and value into an entry.
	///
	/// Storage supports one patch site per entry, so an entry whose key and
	/// value both carry a pending versionstamp is rejected here, before any
	/// bytes are handed on.
	pub fn new(key: Encoded, val: Encoded) -> Result<Self, Error> {
		let key = key.into_stamped()?;
		let val = val.into_stamped()?;
		if key.is_pending() && val.is_pending() {
			return Err(Error::DualPendingVersionstamp);
		}
		Ok(Entry {
			key,
			val,
		})
	}

	pub fn is_pending(&self) -> bool {
		self.key.is_pending() || self.val.is_pending()
	}
}

#[derive(Clone, Debug)]
pub struct Collator {
	complex: Complex,
}

impl Default for Collator {
	fn default() -> Self {
		Self::new()
	}
}

impl Collator {
	/// Create a collator with the standard code table.
	pub fn new() -> Self {
		match Complex::new(CodeTable::STANDARD) {
			Ok(complex) => Collator {
				complex,
			},
			Err(e) => unreachable!("the standard code table is valid: {e}"),
		}
	}

	/// Create a collator with a custom code table.
	pub fn with_table(table: CodeTable) -> Result<Self, Error> {
		Ok(Collator {
			complex: Complex::new(table)?,
		})
	}

	pub fn table(&self) -> &CodeTable {
		self.complex.table()
	}

	/// Encode a single value into its block list.
	#[instrument(level = "trace", target = "collator::core::col", skip_all)]
	pub fn encode(&self, value: &Value) -> Result<Encoded, Error> {
		let mut out = Encoded::default();
		self.complex.encode(value, &mut out)?;
		Ok(out)
	}

	/// Encode several values as one tuple, without array delimiters.
	pub fn encode_all(&self, values: &[Value]) -> Result<Encoded, Error> {
		let mut out = Encoded::default();
		for v in values {
			self.complex.encode(v, &mut out)?;
		}
		Ok(out)
	}

	/// Decode a byte string holding exactly one field.
	#[instrument(level = "trace", target = "collator::core::col", skip_all, fields(len = bytes.len()))]
	pub fn decode(&self, bytes: &[u8]) -> Result<Value, Error> {
		let (mut values, end) = self.complex.decode_fields(bytes, Some(1))?;
		if end < bytes.len() {
			return Err(Error::TrailingBytes(end));
		}
		values.pop().ok_or(Error::UnexpectedEnd)
	}

	/// Decode every field of a concatenated tuple.
	pub fn decode_all(&self, bytes: &[u8]) -> Result<Vec<Value>, Error> {
		self.complex.decode(bytes)
	}

	/// Compare two values by their encodings.
	pub fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, Error> {
		let a = self.encode(a)?.to_vec();
		let b = self.encode(b)?.to_vec();
		Ok(a.cmp(&b))
	}

	/// Encode a key and a value for a single stored entry.
	pub fn entry(&self, key: &Value, val: &Value) -> Result<Entry, Error> {
		Entry::new(self.encode(key)?, self.encode(val)?)
	}
}

/// Encode a value with the default collator.
pub fn encode(value: &Value) -> Result<Encoded, Error> {
	COLLATOR.encode(value)
}

/// Decode a single field with the default collator.
pub fn decode(bytes: &[u8]) -> Result<Value, Error> {
	COLLATOR.decode(bytes)
}

/// The default collator.
pub fn collator() -> &'static Collator {
	&COLLATOR
}

/// Keep a value in the orientation of its enclosing field.
pub fn asc(v: impl Into<Value>) -> Value {
	v.into()
}

/// Reverse the orientation of a value relative to its enclosing field.
pub fn desc(v: impl Into<Value>) -> Value {
	Value::Desc(Box::new(v.into()))
}

macro_rules! width_cast {
	($($name:ident($t:ty) => $variant:ident),*) => {
		$(
			pub fn $name(v: $t) -> Value {
				Value::Number(Number::$variant(v))
			}
		)*
	};
}

width_cast!(
	int8(i8) => Int8,
	uint8(u8) => UInt8,
	int16(i16) => Int16,
	uint16(u16) => UInt16,
	int32(i32) => Int32,
	uint32(u32) => UInt32,
	int64(i64) => Int64,
	uint64(u64) => UInt64,
	float32(f32) => Float32,
	float64(f64) => Float64
);

/// Create a versionstamp value. Without an order it is pending.
pub fn versionstamp(code: u16, order: Option<VersionStamp>) -> Value {
	Value::Stamp(Stamp {
		order,
		code,
	})
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::val::Datetime;

	fn bytes(v: &Value) -> Vec<u8> {
		encode(v).unwrap().into_bytes().unwrap()
	}

	#[rstest]
	#[case::bool_false(Value::Bool(false), &[0x05], 1)]
	#[case::bool_true(Value::Bool(true), &[0x06], 1)]
	#[case::buffer(Value::from(vec![116u8, 101, 115, 116]), &[0x1a, 0x74, 0x65, 0x73, 0x74, 0x03], 3)]
	#[case::date(
		Value::Datetime(Datetime::from_millis(1).unwrap()),
		&[0x18, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0],
		2
	)]
	#[case::negative_date(
		Value::Datetime(Datetime::from_millis(-1).unwrap()),
		&[0x17, 0xc0, 0x0f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
		2
	)]
	#[case::string(Value::from("test"), &[0x1b, 0x74, 0x65, 0x73, 0x74, 0x02], 3)]
	fn vectors(#[case] v: Value, #[case] expected: &[u8], #[case] blocks: usize) {
		let enc = encode(&v).unwrap();
		assert_eq!(enc.blocks().len(), blocks);
		assert_eq!(enc.len(), expected.len());
		assert_eq!(enc.to_vec(), expected);
		assert_eq!(decode(expected).unwrap(), v);
		// Descending is the complement of the whole field
		let mut flipped = expected.to_vec();
		flipped.iter_mut().for_each(|b| *b = !*b);
		assert_eq!(bytes(&desc(v.clone())), flipped);
		assert_eq!(decode(&flipped).unwrap(), v);
	}

	#[test]
	fn escaped_string_decodes() {
		let v = decode(&[0x1b, 0x02, 0x7f, 0xc3, 0xbd, 0x02]).unwrap();
		assert_eq!(v, Value::from("\x02\u{fd}"));
		assert_eq!(bytes(&v), [0x1b, 0x02, 0x7f, 0xc3, 0xbd, 0x02]);
	}

	#[test]
	fn pending_versionstamp_is_one_block() {
		let enc = encode(&versionstamp(0x0203, None)).unwrap();
		let [EncodeBuffer::Versionstamp {
			bytes,
			offset,
			..
		}] = enc.blocks()
		else {
			panic!("expected a single pending block");
		};
		assert_eq!(bytes.len(), 13);
		assert_eq!(*offset, 1);
		assert_eq!(bytes[offset + 10..], [0x02, 0x03]);
		assert!(bytes[*offset..offset + 10].iter().all(|b| *b == 0));
		assert_eq!(enc.into_bytes(), Err(Error::PendingVersionstamp));
	}

	#[test]
	fn bounded_versionstamp_round_trips() {
		let order = VersionStamp::from_parts(1234, 5);
		let v = versionstamp(77, Some(order));
		let Value::Stamp(stamp) = decode(&bytes(&v)).unwrap() else {
			panic!("expected a versionstamp");
		};
		assert_eq!(stamp.order, Some(order));
		assert_eq!(stamp.code, 77);
	}

	#[test]
	fn width_casts_are_explicit() {
		assert_eq!(bytes(&int8(1)), [0x07, 0x81]);
		assert_eq!(bytes(&uint8(1)), [0x08, 0x01]);
		assert_eq!(bytes(&int16(1)).len(), 3);
		assert_eq!(bytes(&uint32(1)).len(), 5);
		assert_eq!(bytes(&int64(1)).len(), 9);
		assert_eq!(bytes(&float32(1.0)).len(), 5);
		assert_eq!(bytes(&float64(1.0)).len(), 9);
		assert_ne!(bytes(&int32(1)), bytes(&uint32(1)));
		assert_ne!(bytes(&uint16(1)), bytes(&uint64(1)));
	}

	#[test]
	fn entries_allow_one_patch_site() {
		let col = Collator::new();
		let entry = col.entry(&versionstamp(1, None), &Value::from("v")).unwrap();
		assert!(entry.key.is_pending());
		assert!(!entry.val.is_pending());
		let entry = col.entry(&Value::from("k"), &desc(versionstamp(1, None))).unwrap();
		assert!(entry.val.patch().unwrap().descending);
		assert_eq!(
			col.entry(&versionstamp(1, None), &versionstamp(2, None)),
			Err(Error::DualPendingVersionstamp)
		);
		let two = Value::Array(vec![versionstamp(1, None), versionstamp(2, None)]);
		assert_eq!(col.entry(&two, &Value::Null), Err(Error::MultiplePendingVersionstamps));
	}

	#[test]
	fn decode_expects_one_field() {
		assert_eq!(decode(&[]), Err(Error::UnexpectedEnd));
		assert_eq!(decode(&[0x05, 0x06]), Err(Error::TrailingBytes(1)));
		let all = collator().decode_all(&[0x05, 0x06]).unwrap();
		assert_eq!(all, vec![Value::Bool(false), Value::Bool(true)]);
	}

	#[test]
	fn trailing_bytes_report_the_decoder_offset() {
		let mut nan = bytes(&float64(f64::from_bits(f64::NAN.to_bits() | 1)));
		nan.push(0x05);
		assert_eq!(decode(&nan), Err(Error::TrailingBytes(9)));
		// The rest of the input is not decoded
		assert_eq!(decode(&[0x04, 0xee]), Err(Error::TrailingBytes(1)));
		let mut nested = bytes(&Value::Array(vec![Value::from("a\0")]));
		let len = nested.len();
		nested.push(0x04);
		assert_eq!(decode(&nested), Err(Error::TrailingBytes(len)));
	}

	#[test]
	fn every_nan_round_trips_as_itself() {
		let negative = f64::from_bits(f64::NAN.to_bits() | (1 << 63));
		let payload = f64::from_bits(f64::NAN.to_bits() | 0x1234);
		for v in [negative, payload] {
			let original = float64(v);
			assert_eq!(decode(&bytes(&original)).unwrap(), original);
			assert_eq!(
				Number::Float64(v).partial_cmp(&Number::Float64(f64::NEG_INFINITY)),
				Some(Ordering::Greater)
			);
			assert_eq!(
				collator().compare(&original, &float64(f64::NEG_INFINITY)),
				Ok(Ordering::Greater)
			);
		}
		let negative = float32(-f32::NAN);
		assert_eq!(decode(&bytes(&negative)).unwrap(), negative);
	}

	#[test]
	fn tuples_are_concatenated_fields() {
		let col = Collator::default();
		let values = vec![Value::from("a"), desc(int16(-4)), Value::Null];
		let enc = col.encode_all(&values).unwrap().into_bytes().unwrap();
		let decoded = col.decode_all(&enc).unwrap();
		assert_eq!(decoded, values.into_iter().map(Value::without_order).collect::<Vec<_>>());
	}

	#[test]
	fn compare_follows_orientation() {
		let col = Collator::new();
		assert_eq!(col.compare(&int32(-1), &int32(1)), Ok(Ordering::Less));
		assert_eq!(col.compare(&desc(int32(-1)), &desc(int32(1))), Ok(Ordering::Greater));
		assert_eq!(col.compare(&Value::from("b"), &Value::from("a")), Ok(Ordering::Greater));
		assert_eq!(col.compare(&Value::Null, &Value::Bool(false)), Ok(Ordering::Less));
		assert_eq!(col.compare(&asc("x"), &Value::from("x")), Ok(Ordering::Equal));
	}

	#[test]
	fn invalid_tables_are_rejected() {
		let mut table = CodeTable::STANDARD;
		table.strand = table.bytes;
		assert!(Collator::with_table(table).is_err());
		assert_eq!(Collator::new().table(), &CodeTable::STANDARD);
	}
}
