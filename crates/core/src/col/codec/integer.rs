use crate::col::Encoded;
use crate::col::prim;
use crate::col::reader::Reader;
use crate::col::table::CodeTable;
use crate::err::Error;
use crate::val::{Number, Width};

/// Write an integer as its tag followed by the value big-endian at its
/// declared width. Signed widths have their sign bit flipped.
pub fn encode(table: &CodeTable, v: Number, out: &mut Encoded) -> Result<(), Error> {
	let width = v.width();
	let payload = match v {
		Number::Int8(v) => prim::sortable_int(v as i64, 1),
		Number::Int16(v) => prim::sortable_int(v as i64, 2),
		Number::Int32(v) => prim::sortable_int(v as i64, 4),
		Number::Int64(v) => prim::sortable_int(v, 8),
		Number::UInt8(v) => v as u64,
		Number::UInt16(v) => v as u64,
		Number::UInt32(v) => v as u64,
		Number::UInt64(v) => v,
		Number::Float32(_) | Number::Float64(_) => {
			return Err(Error::Unreachable(format!("{v} is not an integer")));
		}
	};
	out.push(vec![table.number(width).asc]);
	let mut buf = Vec::with_capacity(width.size());
	prim::put_uint(&mut buf, payload, width.size());
	out.push(buf);
	Ok(())
}

pub fn decode(width: Width, r: &mut Reader, mask: u8) -> Result<Number, Error> {
	let v = match width {
		Width::I8 | Width::U8 => prim::get_uint(&r.read_array::<1>(mask)?),
		Width::I16 | Width::U16 => prim::get_uint(&r.read_array::<2>(mask)?),
		Width::I32 | Width::U32 => prim::get_uint(&r.read_array::<4>(mask)?),
		Width::I64 | Width::U64 => prim::get_uint(&r.read_array::<8>(mask)?),
		Width::F32 | Width::F64 => {
			return Err(Error::Unreachable(format!("{} is not an integer width", width.as_str())));
		}
	};
	let n = match width {
		Width::I8 => Number::Int8(prim::unsortable_int(v, 1) as i8),
		Width::I16 => Number::Int16(prim::unsortable_int(v, 2) as i16),
		Width::I32 => Number::Int32(prim::unsortable_int(v, 4) as i32),
		Width::I64 => Number::Int64(prim::unsortable_int(v, 8)),
		Width::U8 => Number::UInt8(v as u8),
		Width::U16 => Number::UInt16(v as u16),
		Width::U32 => Number::UInt32(v as u32),
		_ => Number::UInt64(v),
	};
	Ok(n)
}
