//! The tag bytes for every semantic type.
//!
//! The numeric order of the ascending tags is the order between type
//! families: null < false < true < numbers < dates < buffers < strings <
//! arrays < versionstamps. Every ascending tag other than the array end
//! lies in `0x04..=0x7b`, so every descending tag lies in `0x84..=0xfb` and
//! neither range touches the escape continuation bytes `0x7c..=0x83`.

use crate::val::Width;

/// The terminator which ends an escaped string payload.
pub const STRAND_TERMINATOR: u8 = 0x02;

/// The terminator which ends an escaped buffer payload.
pub const BYTES_TERMINATOR: u8 = 0x03;

/// The highest continuation byte of an escape pair. An escaped payload byte
/// `b` is written as `terminator, ESCAPE_CEILING - (terminator - b)`.
pub const ESCAPE_CEILING: u8 = 0x7f;

/// The lowest byte which a continuation of an escape pair can take.
pub const ESCAPE_FLOOR: u8 = ESCAPE_CEILING - BYTES_TERMINATOR;

/// An ascending tag together with its descending complement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Code {
	pub asc: u8,
	pub desc: u8,
}

impl Code {
	pub const fn new(asc: u8) -> Self {
		Code {
			asc,
			desc: !asc,
		}
	}
}

/// The registry of tags per semantic type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeTable {
	pub array_end: Code,
	pub null: Code,
	pub bool_false: Code,
	pub bool_true: Code,
	pub int8: Code,
	pub uint8: Code,
	pub int16: Code,
	pub uint16: Code,
	pub int32: Code,
	pub uint32: Code,
	pub int64: Code,
	pub uint64: Code,
	pub float32: Code,
	pub float64: Code,
	pub date_neg: Code,
	pub date_pos: Code,
	pub bytes: Code,
	pub strand: Code,
	pub array: Code,
	pub version: Code,
}

impl Default for CodeTable {
	fn default() -> Self {
		Self::STANDARD
	}
}

impl CodeTable {
	pub const STANDARD: CodeTable = CodeTable {
		array_end: Code::new(0x00),
		null: Code::new(0x04),
		bool_false: Code::new(0x05),
		bool_true: Code::new(0x06),
		int8: Code::new(0x07),
		uint8: Code::new(0x08),
		int16: Code::new(0x09),
		uint16: Code::new(0x0a),
		int32: Code::new(0x0b),
		uint32: Code::new(0x0c),
		int64: Code::new(0x0d),
		uint64: Code::new(0x0e),
		float32: Code::new(0x0f),
		float64: Code::new(0x10),
		date_neg: Code::new(0x17),
		date_pos: Code::new(0x18),
		bytes: Code::new(0x1a),
		strand: Code::new(0x1b),
		array: Code::new(0x1c),
		version: Code::new(0x1d),
	};

	/// The tag for a number of the given width.
	pub fn number(&self, width: Width) -> Code {
		match width {
			Width::I8 => self.int8,
			Width::U8 => self.uint8,
			Width::I16 => self.int16,
			Width::U16 => self.uint16,
			Width::I32 => self.int32,
			Width::U32 => self.uint32,
			Width::I64 => self.int64,
			Width::U64 => self.uint64,
			Width::F32 => self.float32,
			Width::F64 => self.float64,
		}
	}

	/// Every tag which starts a field, excluding the array end.
	pub fn field_codes(&self) -> [Code; 19] {
		[
			self.null,
			self.bool_false,
			self.bool_true,
			self.int8,
			self.uint8,
			self.int16,
			self.uint16,
			self.int32,
			self.uint32,
			self.int64,
			self.uint64,
			self.float32,
			self.float64,
			self.date_neg,
			self.date_pos,
			self.bytes,
			self.strand,
			self.array,
			self.version,
		]
	}

	/// Check that the table keeps field tags clear of the array end and of
	/// the escape continuation range, and that no tag is used twice.
	pub fn is_valid(&self) -> bool {
		let codes = self.field_codes();
		let in_range = codes.iter().all(|c| c.asc > self.array_end.asc && c.asc < ESCAPE_FLOOR);
		let unique = codes.iter().enumerate().all(|(i, a)| codes[i + 1..].iter().all(|b| a != b));
		in_range && unique && self.array_end.asc < BYTES_TERMINATOR.min(STRAND_TERMINATOR)
	}
}
