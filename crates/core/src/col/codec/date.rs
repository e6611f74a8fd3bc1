use crate::col::Encoded;
use crate::col::prim;
use crate::col::reader::Reader;
use crate::col::table::CodeTable;
use crate::err::Error;
use crate::val::Datetime;

/// Every bit except the sign.
const MAGNITUDE: u64 = u64::MAX >> 1;

/// Write a date as the millisecond offset from the epoch, held as an
/// IEEE-754 double. Negative offsets take their own tag, and have every
/// bit but the sign complemented so that earlier dates sort first.
pub fn encode(table: &CodeTable, v: &Datetime, out: &mut Encoded) {
	let ms = v.as_millis() as f64;
	let mut buf = Vec::with_capacity(8);
	if ms < 0.0 {
		out.push(vec![table.date_neg.asc]);
		prim::put_u64(&mut buf, ms.to_bits() ^ MAGNITUDE);
	} else {
		out.push(vec![table.date_pos.asc]);
		prim::put_u64(&mut buf, ms.to_bits());
	}
	out.push(buf);
}

pub fn decode(table: &CodeTable, tag: u8, r: &mut Reader, mask: u8) -> Result<Datetime, Error> {
	let bits = u64::from_be_bytes(r.read_array(mask)?);
	let negative = tag == table.date_neg.asc;
	let ms = match negative {
		true => f64::from_bits(bits ^ MAGNITUDE),
		false => f64::from_bits(bits),
	};
	// Zero is only ever written under the non-negative tag
	if ms.is_sign_negative() != negative
		|| (negative && ms == 0.0)
		|| !ms.is_finite()
		|| ms.fract() != 0.0
	{
		return Err(Error::InvalidDatetime(format!("{ms} is not a millisecond offset")));
	}
	// Representable dates lie well inside the exact integer range of a double
	if ms.abs() > i64::MAX as f64 / 2.0 {
		return Err(Error::InvalidDatetime(format!("{ms} is out of range")));
	}
	Datetime::from_millis(ms as i64)
}
