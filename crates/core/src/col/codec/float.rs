use crate::col::Encoded;
use crate::col::prim;
use crate::col::reader::Reader;
use crate::col::table::CodeTable;
use crate::err::Error;
use crate::val::{Number, Width};

/// Write a float as its tag followed by the sort-transformed IEEE-754
/// bit pattern. NaNs are canonicalised first, so they sort after
/// positive infinity. Negative and positive zero stay distinct.
pub fn encode(table: &CodeTable, v: Number, out: &mut Encoded) -> Result<(), Error> {
	let mut buf = Vec::with_capacity(8);
	match v.canonical() {
		Number::Float32(v) => prim::put_f32(&mut buf, v),
		Number::Float64(v) => prim::put_f64(&mut buf, v),
		v => return Err(Error::Unreachable(format!("{v} is not a float"))),
	}
	out.push(vec![table.number(v.width()).asc]);
	out.push(buf);
	Ok(())
}

pub fn decode(width: Width, r: &mut Reader, mask: u8) -> Result<Number, Error> {
	match width {
		Width::F32 => {
			let v = u32::from_be_bytes(r.read_array(mask)?);
			Ok(Number::Float32(prim::unsortable_f32(v)))
		}
		Width::F64 => {
			let v = u64::from_be_bytes(r.read_array(mask)?);
			Ok(Number::Float64(prim::unsortable_f64(v)))
		}
		w => Err(Error::Unreachable(format!("{} is not a float width", w.as_str()))),
	}
}
