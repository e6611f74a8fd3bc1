//! The complex codec, which dispatches values to the per-type codecs.
//!
//! Encoding recurses through arrays, complementing every block of a field
//! which is descending relative to its parent. Decoding is cursor based: the
//! raw leading byte of each field is looked up in a handler table, which
//! yields both the type of the field and its absolute orientation, so nested
//! descending fields need no special treatment. Arrays are decoded with an
//! explicit stack, so nesting depth is bounded only by memory.

use super::codec::{boolean, bytes, date, float, integer, strand, version};
use super::meta::{Direction, MetaValue};
use super::reader::Reader;
use super::table::{Code, CodeTable};
use super::Encoded;
use crate::err::Error;
use crate::val::{Number, Value, Width};

/// What a leading tag byte starts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Handle {
	Null,
	Bool,
	Number(Width),
	Date,
	Bytes,
	Strand,
	ArrayStart,
	ArrayEnd,
	Version,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Handler {
	handle: Handle,
	dir: Direction,
}

#[derive(Clone, Debug)]
pub struct Complex {
	table: CodeTable,
	handlers: [Option<Handler>; 256],
}

impl Complex {
	/// Build the handler table for a code table.
	pub fn new(table: CodeTable) -> Result<Self, Error> {
		if !table.is_valid() {
			return Err(Error::UnsupportedInput("the code table has overlapping tags".into()));
		}
		let mut handlers = [None; 256];
		let mut register = |code: Code, handle: Handle| {
			handlers[code.asc as usize] = Some(Handler {
				handle,
				dir: Direction::Asc,
			});
			handlers[code.desc as usize] = Some(Handler {
				handle,
				dir: Direction::Desc,
			});
		};
		register(table.null, Handle::Null);
		register(table.bool_false, Handle::Bool);
		register(table.bool_true, Handle::Bool);
		for width in [
			Width::I8,
			Width::U8,
			Width::I16,
			Width::U16,
			Width::I32,
			Width::U32,
			Width::I64,
			Width::U64,
			Width::F32,
			Width::F64,
		] {
			register(table.number(width), Handle::Number(width));
		}
		register(table.date_neg, Handle::Date);
		register(table.date_pos, Handle::Date);
		register(table.bytes, Handle::Bytes);
		register(table.strand, Handle::Strand);
		register(table.array, Handle::ArrayStart);
		register(table.array_end, Handle::ArrayEnd);
		register(table.version, Handle::Version);
		Ok(Complex {
			table,
			handlers,
		})
	}

	pub fn table(&self) -> &CodeTable {
		&self.table
	}

	/// Append the encoding of a value to a block list.
	pub fn encode(&self, value: &Value, out: &mut Encoded) -> Result<(), Error> {
		self.encode_meta(MetaValue::new(value), out)
	}

	fn encode_meta(&self, meta: MetaValue<'_>, out: &mut Encoded) -> Result<(), Error> {
		let t = &self.table;
		let mark = out.mark();
		match meta.value {
			Value::Null => out.push(vec![t.null.asc]),
			Value::Bool(v) => boolean::encode(t, *v, out),
			Value::Number(v @ (Number::Float32(_) | Number::Float64(_))) => {
				float::encode(t, *v, out)?
			}
			Value::Number(v) => integer::encode(t, *v, out)?,
			Value::Datetime(v) => date::encode(t, v, out),
			Value::Bytes(v) => bytes::encode(t, v, out),
			Value::Strand(v) => strand::encode(t, v, out),
			Value::Array(v) => {
				out.push(vec![t.array.asc]);
				for v in v {
					self.encode_meta(MetaValue::new(v), out)?;
				}
				out.push(vec![t.array_end.asc]);
			}
			Value::Stamp(v) => version::encode(t, v, out),
			Value::Desc(_) => {
				return Err(Error::Unreachable("orientation wrappers reached the encoder".into()));
			}
		}
		if meta.dir.is_desc() {
			out.complement_from(mark);
		}
		Ok(())
	}

	/// Decode every top-level field in a byte string.
	pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Value>, Error> {
		self.decode_fields(bytes, None).map(|(out, _)| out)
	}

	/// Decode top-level fields until `limit` of them are complete, returning
	/// them with the offset of the first unread byte.
	pub fn decode_fields(
		&self,
		bytes: &[u8],
		limit: Option<usize>,
	) -> Result<(Vec<Value>, usize), Error> {
		let mut r = Reader::new(bytes);
		let mut out = Vec::new();
		// The open arrays, innermost last, with their orientation
		let mut stack: Vec<(Vec<Value>, Direction)> = Vec::new();
		while let Some(raw) = r.peek() {
			if stack.is_empty() && limit.is_some_and(|n| out.len() >= n) {
				break;
			}
			let position = r.position();
			let handler = self.handlers[raw as usize].ok_or(Error::UnknownTag {
				tag: raw,
				position,
			})?;
			r.skip(1);
			let mask = handler.dir.mask();
			let tag = raw ^ mask;
			let value = match handler.handle {
				Handle::Null => Value::Null,
				Handle::Bool => Value::Bool(boolean::decode(&self.table, tag)?),
				Handle::Number(w) if w.is_float() => Value::Number(float::decode(w, &mut r, mask)?),
				Handle::Number(w) => Value::Number(integer::decode(w, &mut r, mask)?),
				Handle::Date => Value::Datetime(date::decode(&self.table, tag, &mut r, mask)?),
				Handle::Bytes => Value::Bytes(bytes::decode(&mut r, mask)?),
				Handle::Strand => Value::Strand(strand::decode(&mut r, mask)?),
				Handle::Version => Value::Stamp(version::decode(&mut r, mask)?),
				Handle::ArrayStart => {
					stack.push((Vec::new(), handler.dir));
					continue;
				}
				Handle::ArrayEnd => match stack.pop() {
					Some((values, dir)) if dir == handler.dir => Value::Array(values),
					_ => {
						return Err(Error::UnknownTag {
							tag: raw,
							position,
						});
					}
				},
			};
			match stack.last_mut() {
				Some((values, _)) => values.push(value),
				None => out.push(value),
			}
		}
		if !stack.is_empty() {
			return Err(Error::UnexpectedEnd);
		}
		Ok((out, r.position()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::val::{Datetime, Stamp};
	use crate::vs::VersionStamp;

	fn complex() -> Complex {
		Complex::new(CodeTable::STANDARD).unwrap()
	}

	fn enc(v: &Value) -> Vec<u8> {
		let mut out = Encoded::default();
		complex().encode(v, &mut out).unwrap();
		out.to_vec()
	}

	fn desc(v: Value) -> Value {
		Value::Desc(Box::new(v))
	}

	#[test]
	fn arrays_wrap_their_elements() {
		let v = Value::Array(vec![Value::Null, Value::Bool(true)]);
		assert_eq!(enc(&v), [0x1c, 0x04, 0x06, 0x00]);
		assert_eq!(enc(&Value::Array(vec![])), [0x1c, 0x00]);
		let nested = Value::Array(vec![Value::Array(vec![Value::Array(vec![])])]);
		assert_eq!(enc(&nested), [0x1c, 0x1c, 0x1c, 0x00, 0x00, 0x00]);
		assert_eq!(complex().decode(&enc(&nested)).unwrap(), vec![nested]);
	}

	#[test]
	fn descending_complements_the_whole_field() {
		let v = Value::Array(vec![Value::from("a"), Value::from(1u8)]);
		let mut asc = enc(&v);
		asc.iter_mut().for_each(|b| *b = !*b);
		assert_eq!(enc(&desc(v.clone())), asc);
		assert_eq!(complex().decode(&asc).unwrap(), vec![v]);
	}

	#[test]
	fn orientation_is_relative() {
		let inner = Value::from("x");
		let v = desc(Value::Array(vec![desc(inner.clone())]));
		let bytes = enc(&v);
		// The element is descending inside a descending array
		assert_eq!(bytes, [0xe3, 0x1b, 0x78, 0x02, 0xff]);
		assert_eq!(complex().decode(&bytes).unwrap(), vec![Value::Array(vec![inner])]);
	}

	#[test]
	fn mixed_tuples_decode() {
		let values = vec![
			Value::from(-3i16),
			desc(Value::from(2.5f32)),
			Value::Datetime(Datetime::from_millis(-5).unwrap()),
			desc(Value::from(vec![0u8, 3, 255])),
			Value::Stamp(Stamp::bounded(VersionStamp::from_parts(9, 1), 4)),
			desc(Value::Array(vec![Value::from("\x00"), Value::Bool(false)])),
		];
		let mut out = Encoded::default();
		for v in &values {
			complex().encode(v, &mut out).unwrap();
		}
		let decoded = complex().decode(&out.to_vec()).unwrap();
		let expected: Vec<Value> = values.into_iter().map(Value::without_order).collect();
		assert_eq!(decoded, expected);
	}

	#[test]
	fn limited_decode_stops_at_the_field_boundary() {
		let c = complex();
		let mut bytes = enc(&Value::Array(vec![Value::from("a\0"), Value::Null]));
		bytes.push(0x06);
		let (values, end) = c.decode_fields(&bytes, Some(1)).unwrap();
		assert_eq!(values.len(), 1);
		assert_eq!(end, bytes.len() - 1);
		let (values, end) = c.decode_fields(&bytes, None).unwrap();
		assert_eq!(values.len(), 2);
		assert_eq!(end, bytes.len());
	}

	#[test]
	fn unknown_tags_are_rejected() {
		assert_eq!(complex().decode(&[0x04, 0x50]), Err(Error::UnknownTag {
			tag: 0x50,
			position: 1
		}));
		assert_eq!(complex().decode(&[0x00]), Err(Error::UnknownTag {
			tag: 0x00,
			position: 0
		}));
	}

	#[test]
	fn mismatched_array_ends_are_rejected() {
		assert!(matches!(complex().decode(&[0x1c, 0xff]), Err(Error::UnknownTag { .. })));
		assert_eq!(complex().decode(&[0x1c, 0x04]), Err(Error::UnexpectedEnd));
	}

	#[test]
	fn truncated_fields_are_rejected() {
		assert_eq!(complex().decode(&[0x0d, 0x80]), Err(Error::UnexpectedEnd));
		assert_eq!(complex().decode(&[0x1b, 0x61]), Err(Error::UnexpectedEnd));
	}
}
