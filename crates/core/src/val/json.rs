//! Conversion between values and JSON.
//!
//! Plain JSON maps onto the obvious variants. Every other variant is
//! written as a single-key object whose key starts with `$`, for example
//! `{ "$int8": -3 }`, `{ "$date": 1700000000000 }`, `{ "$bytes": "dead" }`,
//! `{ "$desc": "abc" }` or `{ "$versionstamp": { "code": 1, "order": "…" } }`.

use serde_json::{Map, Number as JsonNumber, Value as JsonValue, json};

use crate::err::Error;
use crate::val::{Datetime, Number, Stamp, Value};
use crate::vs::VersionStamp;

impl TryFrom<JsonValue> for Value {
	type Error = Error;

	fn try_from(v: JsonValue) -> Result<Self, Self::Error> {
		match v {
			JsonValue::Null => Ok(Value::Null),
			JsonValue::Bool(v) => Ok(Value::Bool(v)),
			JsonValue::Number(v) => {
				if let Some(v) = v.as_i64() {
					Ok(Value::from(v))
				} else if let Some(v) = v.as_u64() {
					Ok(Value::from(v))
				} else {
					v.as_f64().map(Value::from).ok_or_else(|| unsupported(&v))
				}
			}
			JsonValue::String(v) => Ok(Value::Strand(v)),
			JsonValue::Array(v) => {
				v.into_iter().map(Value::try_from).collect::<Result<Vec<_>, _>>().map(Value::Array)
			}
			JsonValue::Object(v) => from_object(v),
		}
	}
}

fn from_object(obj: Map<String, JsonValue>) -> Result<Value, Error> {
	if obj.len() != 1 {
		return Err(Error::UnsupportedInput(format!(
			"objects can not be encoded: {}",
			JsonValue::Object(obj)
		)));
	}
	let Some((key, val)) = obj.into_iter().next() else {
		return Err(Error::Unreachable("object length was checked".into()));
	};
	match key.as_str() {
		"$int8" => int(&val).map(Number::Int8).map(Value::Number),
		"$uint8" => uint(&val).map(Number::UInt8).map(Value::Number),
		"$int16" => int(&val).map(Number::Int16).map(Value::Number),
		"$uint16" => uint(&val).map(Number::UInt16).map(Value::Number),
		"$int32" => int(&val).map(Number::Int32).map(Value::Number),
		"$uint32" => uint(&val).map(Number::UInt32).map(Value::Number),
		"$int64" => int(&val).map(Number::Int64).map(Value::Number),
		"$uint64" => uint(&val).map(Number::UInt64).map(Value::Number),
		"$float32" => float(&val).map(|v| Value::Number(Number::Float32(v as f32))),
		"$float64" => float(&val).map(|v| Value::Number(Number::Float64(v))),
		"$date" => int::<i64>(&val).and_then(Datetime::from_millis).map(Value::Datetime),
		"$bytes" => match &val {
			JsonValue::String(v) => hex::decode(v).map(Value::Bytes).map_err(|e| {
				Error::UnsupportedInput(format!("invalid hex in $bytes: {e}"))
			}),
			v => Err(unsupported(v)),
		},
		"$desc" => Ok(Value::Desc(Box::new(Value::try_from(val)?))),
		"$versionstamp" => stamp(val).map(Value::Stamp),
		_ => Err(Error::UnsupportedInput(format!("unknown object tag {key}"))),
	}
}

fn unsupported(v: &impl std::fmt::Display) -> Error {
	Error::UnsupportedInput(v.to_string())
}

fn int<T: TryFrom<i64>>(v: &JsonValue) -> Result<T, Error> {
	v.as_i64().and_then(|v| T::try_from(v).ok()).ok_or_else(|| unsupported(v))
}

fn uint<T: TryFrom<u64>>(v: &JsonValue) -> Result<T, Error> {
	v.as_u64().and_then(|v| T::try_from(v).ok()).ok_or_else(|| unsupported(v))
}

fn float(v: &JsonValue) -> Result<f64, Error> {
	match v {
		JsonValue::Number(v) => v.as_f64().ok_or_else(|| unsupported(v)),
		JsonValue::String(s) => match s.as_str() {
			"NaN" => Ok(f64::NAN),
			"inf" => Ok(f64::INFINITY),
			"-inf" => Ok(f64::NEG_INFINITY),
			_ => Err(unsupported(v)),
		},
		v => Err(unsupported(v)),
	}
}

fn stamp(v: JsonValue) -> Result<Stamp, Error> {
	let code = v.get("code").map(uint::<u16>).transpose()?.unwrap_or_default();
	match v.get("order") {
		None | Some(JsonValue::Null) => Ok(Stamp::pending(code)),
		Some(JsonValue::String(s)) => {
			let bytes = hex::decode(s)
				.map_err(|e| Error::UnsupportedInput(format!("invalid hex in order: {e}")))?;
			Ok(Stamp::bounded(VersionStamp::try_from_slice(&bytes)?, code))
		}
		Some(v) => Err(unsupported(v)),
	}
}

fn float_json(v: f64) -> JsonValue {
	match JsonNumber::from_f64(v) {
		Some(n) => JsonValue::Number(n),
		None if v.is_nan() => JsonValue::from("NaN"),
		None if v > 0.0 => JsonValue::from("inf"),
		None => JsonValue::from("-inf"),
	}
}

impl From<Value> for JsonValue {
	fn from(v: Value) -> Self {
		match v {
			Value::Null => JsonValue::Null,
			Value::Bool(v) => v.into(),
			Value::Number(v) => match v {
				Number::Int8(v) => json!({ "$int8": v }),
				Number::UInt8(v) => json!({ "$uint8": v }),
				Number::Int16(v) => json!({ "$int16": v }),
				Number::UInt16(v) => json!({ "$uint16": v }),
				Number::Int32(v) => json!({ "$int32": v }),
				Number::UInt32(v) => json!({ "$uint32": v }),
				Number::Int64(v) => v.into(),
				Number::UInt64(v) if v > i64::MAX as u64 => v.into(),
				Number::UInt64(v) => json!({ "$uint64": v }),
				Number::Float32(v) => json!({ "$float32": float_json(v as f64) }),
				Number::Float64(v) if v.is_finite() && v.fract() != 0.0 => float_json(v),
				Number::Float64(v) => json!({ "$float64": float_json(v) }),
			},
			Value::Datetime(v) => json!({ "$date": v.as_millis() }),
			Value::Bytes(v) => json!({ "$bytes": hex::encode(v) }),
			Value::Strand(v) => v.into(),
			Value::Array(v) => JsonValue::Array(v.into_iter().map(Into::into).collect()),
			Value::Stamp(v) => json!({
				"$versionstamp": {
					"code": v.code,
					"order": v.order.map(|o| hex::encode(o.as_bytes())),
				}
			}),
			Value::Desc(v) => json!({ "$desc": JsonValue::from(*v) }),
		}
	}
}
