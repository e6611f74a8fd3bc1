use crate::col::Encoded;
use crate::col::prim;
use crate::col::reader::Reader;
use crate::col::table::CodeTable;
use crate::err::Error;
use crate::val::Stamp;
use crate::vs::{VERSIONSTAMP_LEN, VersionStamp};

/// The offset of the transaction order within a versionstamp block.
pub const ORDER_OFFSET: usize = 1;

/// Write a versionstamp as one block holding the tag, the 10-byte
/// transaction order and the 2-byte user code.
///
/// A pending stamp is written with a zeroed order, and the block is
/// marked so the storage transaction can fill the order in at commit.
pub fn encode(table: &CodeTable, v: &Stamp, out: &mut Encoded) {
	let mut buf = Vec::with_capacity(1 + VERSIONSTAMP_LEN + 2);
	prim::put_u8(&mut buf, table.version.asc);
	buf.extend_from_slice(v.order.unwrap_or(VersionStamp::ZERO).as_bytes());
	prim::put_u16(&mut buf, v.code);
	match v.order {
		Some(_) => out.push(buf),
		None => out.push_pending(buf, ORDER_OFFSET),
	}
}

/// Decoded stamps are always bounded.
pub fn decode(r: &mut Reader, mask: u8) -> Result<Stamp, Error> {
	let order = VersionStamp::from_bytes(r.read_array(mask)?);
	let code = u16::from_be_bytes(r.read_array(mask)?);
	Ok(Stamp::bounded(order, code))
}
