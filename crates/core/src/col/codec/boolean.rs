use crate::col::Encoded;
use crate::col::table::CodeTable;
use crate::err::Error;

pub fn encode(table: &CodeTable, v: bool, out: &mut Encoded) {
	let tag = match v {
		true => table.bool_true.asc,
		false => table.bool_false.asc,
	};
	out.push(vec![tag]);
}

/// Booleans have no payload, the ascending tag is the value.
pub fn decode(table: &CodeTable, tag: u8) -> Result<bool, Error> {
	match tag {
		t if t == table.bool_true.asc => Ok(true),
		t if t == table.bool_false.asc => Ok(false),
		t => Err(Error::Unreachable(format!("0x{t:02x} is not a boolean tag"))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn booleans_are_a_single_byte() {
		let t = CodeTable::STANDARD;
		let mut out = Encoded::default();
		encode(&t, false, &mut out);
		encode(&t, true, &mut out);
		assert_eq!(out.to_vec(), [0x05, 0x06]);
		assert_eq!(out.blocks().len(), 2);
		assert_eq!(decode(&t, 0x05), Ok(false));
		assert_eq!(decode(&t, 0x06), Ok(true));
		assert!(decode(&t, 0x07).is_err());
	}
}
