//! The escape scheme shared by buffers and strings.
//!
//! A payload is ended by a terminator byte. Every payload byte `b` which is
//! no greater than the terminator is written as the pair
//! `terminator, ESCAPE_CEILING - (terminator - b)`, and every other byte is
//! copied through. The second byte of a pair lies in the escape range, which
//! no tag uses, so a terminator followed by the next field is never mistaken
//! for a pair.

use crate::col::reader::Reader;
use crate::col::table::{ESCAPE_CEILING, ESCAPE_FLOOR};
use crate::err::Error;

pub fn escape(payload: &[u8], terminator: u8) -> Vec<u8> {
	let mut out = Vec::with_capacity(payload.len() + 1);
	for &b in payload {
		if b <= terminator {
			out.push(terminator);
			out.push(ESCAPE_CEILING - (terminator - b));
		} else {
			out.push(b);
		}
	}
	out
}

/// Read an escaped payload up to and including its terminator.
pub fn unescape(r: &mut Reader, mask: u8, terminator: u8) -> Result<Vec<u8>, Error> {
	let mut out = Vec::new();
	loop {
		let position = r.position();
		let b = r.read_u8(mask)?;
		if b > terminator {
			out.push(b);
			continue;
		}
		if b < terminator {
			return Err(Error::InvalidEscape(position));
		}
		match r.peek().map(|n| n ^ mask) {
			Some(n) if (ESCAPE_FLOOR..=ESCAPE_CEILING).contains(&n) => {
				let lowest = ESCAPE_CEILING - terminator;
				if n < lowest {
					return Err(Error::InvalidEscape(position + 1));
				}
				out.push(n - lowest);
				r.skip(1);
			}
			_ => return Ok(out),
		}
	}
}
