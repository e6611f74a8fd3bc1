use super::escape;
use crate::col::Encoded;
use crate::col::reader::Reader;
use crate::col::table::{CodeTable, STRAND_TERMINATOR};
use crate::err::Error;

/// Write a string as its tag, the escaped UTF-8 payload and the terminator.
pub fn encode(table: &CodeTable, v: &str, out: &mut Encoded) {
	out.push(vec![table.strand.asc]);
	out.push(escape::escape(v.as_bytes(), STRAND_TERMINATOR));
	out.push(vec![STRAND_TERMINATOR]);
}

pub fn decode(r: &mut Reader, mask: u8) -> Result<String, Error> {
	let bytes = escape::unescape(r, mask, STRAND_TERMINATOR)?;
	String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
}
