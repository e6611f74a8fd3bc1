use super::escape;
use crate::col::Encoded;
use crate::col::reader::Reader;
use crate::col::table::{BYTES_TERMINATOR, CodeTable};
use crate::err::Error;

/// Write a buffer as its tag, the escaped payload and the terminator.
pub fn encode(table: &CodeTable, v: &[u8], out: &mut Encoded) {
	out.push(vec![table.bytes.asc]);
	out.push(escape::escape(v, BYTES_TERMINATOR));
	out.push(vec![BYTES_TERMINATOR]);
}

pub fn decode(r: &mut Reader, mask: u8) -> Result<Vec<u8>, Error> {
	escape::unescape(r, mask, BYTES_TERMINATOR)
}
