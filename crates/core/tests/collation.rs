use std::cmp::Ordering;

use collator_core::val::{Datetime, Number, Stamp};
use collator_core::{Collator, Value, VersionStamp, desc, int16, int32, int64, versionstamp};
use proptest::prelude::*;

/// The range of millisecond offsets which a datetime can hold.
const MAX_MILLIS: i64 = 8_000_000_000_000_000;

fn bytes(v: &Value) -> Vec<u8> {
	Collator::new().encode(v).unwrap().into_bytes().unwrap()
}

fn complement(mut v: Vec<u8>) -> Vec<u8> {
	v.iter_mut().for_each(|b| *b = !*b);
	v
}

fn canonical_f64() -> impl Strategy<Value = f64> {
	any::<f64>().prop_map(|v| if v.is_nan() { f64::NAN } else { v })
}

fn number() -> impl Strategy<Value = Number> {
	prop_oneof![
		any::<i8>().prop_map(Number::Int8),
		any::<u8>().prop_map(Number::UInt8),
		any::<i16>().prop_map(Number::Int16),
		any::<u16>().prop_map(Number::UInt16),
		any::<i32>().prop_map(Number::Int32),
		any::<u32>().prop_map(Number::UInt32),
		any::<i64>().prop_map(Number::Int64),
		any::<u64>().prop_map(Number::UInt64),
		any::<f32>().prop_map(Number::Float32),
		any::<f64>().prop_map(Number::Float64),
	]
}

fn leaf() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		number().prop_map(Value::Number),
		(-MAX_MILLIS..MAX_MILLIS).prop_map(|ms| Value::Datetime(Datetime::from_millis(ms).unwrap())),
		prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
		any::<String>().prop_map(Value::Strand),
		(any::<[u8; 10]>(), any::<u16>())
			.prop_map(|(o, c)| Value::Stamp(Stamp::bounded(VersionStamp::from_bytes(o), c))),
	]
}

fn value() -> impl Strategy<Value = Value> {
	leaf().prop_recursive(4, 48, 6, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
			inner.prop_map(|v| Value::Desc(Box::new(v))),
		]
	})
}

proptest! {
	#[test]
	fn values_round_trip(v in value()) {
		let col = Collator::new();
		let enc = col.encode(&v).unwrap().into_bytes().unwrap();
		prop_assert_eq!(col.decode(&enc).unwrap(), v.clone().without_order());
		let enc = col.encode(&desc(v.clone())).unwrap().into_bytes().unwrap();
		prop_assert_eq!(col.decode(&enc).unwrap(), v.without_order());
	}

	#[test]
	fn tuples_round_trip(values in prop::collection::vec(value(), 0..5)) {
		let col = Collator::new();
		let enc = col.encode_all(&values).unwrap().into_bytes().unwrap();
		let expected: Vec<Value> = values.into_iter().map(Value::without_order).collect();
		prop_assert_eq!(col.decode_all(&enc).unwrap(), expected);
	}

	#[test]
	fn descending_is_the_complement(v in value()) {
		prop_assert_eq!(bytes(&desc(v.clone())), complement(bytes(&v)));
		// Orientation is relative
		prop_assert_eq!(bytes(&desc(desc(v.clone()))), bytes(&v));
	}

	#[test]
	fn integers_are_ordered(a in any::<i64>(), b in any::<i64>()) {
		prop_assert_eq!(bytes(&int64(a)).cmp(&bytes(&int64(b))), a.cmp(&b));
		prop_assert_eq!(bytes(&desc(int64(a))).cmp(&bytes(&desc(int64(b)))), b.cmp(&a));
		let (a, b) = (a as i16, b as i16);
		prop_assert_eq!(bytes(&int16(a)).cmp(&bytes(&int16(b))), a.cmp(&b));
	}

	#[test]
	fn number_order_matches_encoded_order(a in any::<f64>(), b in any::<f64>()) {
		let (x, y) = (Number::Float64(a), Number::Float64(b));
		let encoded = bytes(&Value::Number(x)).cmp(&bytes(&Value::Number(y)));
		prop_assert_eq!(x.partial_cmp(&y), Some(encoded));
	}

	#[test]
	fn floats_are_ordered(a in canonical_f64(), b in canonical_f64()) {
		let (x, y) = (Value::from(a), Value::from(b));
		prop_assert_eq!(bytes(&x).cmp(&bytes(&y)), a.total_cmp(&b));
		prop_assert_eq!(bytes(&desc(x)).cmp(&bytes(&desc(y))), b.total_cmp(&a));
		let (a, b) = (a as f32, b as f32);
		if !a.is_nan() && !b.is_nan() {
			prop_assert_eq!(bytes(&Value::from(a)).cmp(&bytes(&Value::from(b))), a.total_cmp(&b));
		}
	}

	#[test]
	fn dates_are_ordered(a in -MAX_MILLIS..MAX_MILLIS, b in -MAX_MILLIS..MAX_MILLIS) {
		let x = Value::Datetime(Datetime::from_millis(a).unwrap());
		let y = Value::Datetime(Datetime::from_millis(b).unwrap());
		prop_assert_eq!(bytes(&x).cmp(&bytes(&y)), a.cmp(&b));
		prop_assert_eq!(bytes(&desc(x)).cmp(&bytes(&desc(y))), b.cmp(&a));
	}

	#[test]
	fn strings_are_ordered(a in any::<String>(), b in any::<String>()) {
		prop_assert_eq!(bytes(&Value::from(a.as_str())).cmp(&bytes(&Value::from(b.as_str()))), a.cmp(&b));
	}

	#[test]
	fn descending_strings_are_ordered(a in "[^\\x00-\\x02]{0,12}", b in "[^\\x00-\\x02]{0,12}") {
		let x = desc(a.as_str());
		let y = desc(b.as_str());
		prop_assert_eq!(bytes(&x).cmp(&bytes(&y)), b.cmp(&a));
	}

	#[test]
	fn buffers_are_ordered(
		a in prop::collection::vec(any::<u8>(), 0..12),
		b in prop::collection::vec(any::<u8>(), 0..12),
	) {
		prop_assert_eq!(bytes(&Value::from(a.clone())).cmp(&bytes(&Value::from(b.clone()))), a.cmp(&b));
	}

	#[test]
	fn descending_buffers_are_ordered(
		a in prop::collection::vec(4u8.., 0..12),
		b in prop::collection::vec(4u8.., 0..12),
	) {
		prop_assert_eq!(bytes(&desc(a.clone())).cmp(&bytes(&desc(b.clone()))), b.cmp(&a));
	}

	#[test]
	fn arrays_are_ordered(
		a in prop::collection::vec(any::<i32>(), 0..6),
		b in prop::collection::vec(any::<i32>(), 0..6),
	) {
		let x = Value::Array(a.iter().copied().map(int32).collect());
		let y = Value::Array(b.iter().copied().map(int32).collect());
		prop_assert_eq!(bytes(&x).cmp(&bytes(&y)), a.cmp(&b));
	}

	#[test]
	fn composite_keys_are_ordered(
		a in ("[^\\x00-\\x02]{0,8}", any::<i16>()),
		b in ("[^\\x00-\\x02]{0,8}", any::<i16>()),
	) {
		let col = Collator::new();
		let enc = |(s, n): &(String, i16)| {
			col.encode_all(&[Value::from(s.as_str()), desc(int16(*n))]).unwrap().into_bytes().unwrap()
		};
		let expected = a.0.cmp(&b.0).then(b.1.cmp(&a.1));
		prop_assert_eq!(enc(&a).cmp(&enc(&b)), expected);
	}
}

#[test]
fn type_families_are_ordered() {
	let values = [
		Value::Null,
		Value::Bool(false),
		Value::Bool(true),
		int64(i64::MAX),
		Value::from(f64::NEG_INFINITY),
		Value::Datetime(Datetime::from_millis(-MAX_MILLIS).unwrap()),
		Value::Datetime(Datetime::from_millis(MAX_MILLIS).unwrap()),
		Value::from(vec![0xffu8; 4]),
		Value::from(""),
		Value::from("\u{10ffff}"),
		Value::Array(vec![]),
		Value::Array(vec![versionstamp(9, Some(VersionStamp::ZERO))]),
		versionstamp(0, Some(VersionStamp::ZERO)),
	];
	let col = Collator::new();
	for w in values.windows(2) {
		assert_eq!(col.compare(&w[0], &w[1]).unwrap(), Ordering::Less, "{} < {}", w[0], w[1]);
		assert_eq!(
			col.compare(&desc(w[0].clone()), &desc(w[1].clone())).unwrap(),
			Ordering::Greater
		);
	}
}
