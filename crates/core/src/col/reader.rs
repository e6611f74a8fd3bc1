use crate::err::Error;

/// A cursor over encoded bytes.
///
/// Every read takes the mask of the field being decoded, and XORs each
/// raw byte with it, so descending fields are read back in their
/// ascending form.
#[derive(Debug)]
pub struct Reader<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Reader<'a> {
	pub fn new(bytes: &'a [u8]) -> Self {
		Reader {
			bytes,
			pos: 0,
		}
	}

	pub fn position(&self) -> usize {
		self.pos
	}

	pub fn is_empty(&self) -> bool {
		self.pos >= self.bytes.len()
	}

	/// Look at the next raw byte without consuming it.
	pub fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	pub fn skip(&mut self, n: usize) {
		self.pos = (self.pos + n).min(self.bytes.len());
	}

	pub fn read_u8(&mut self, mask: u8) -> Result<u8, Error> {
		let b = self.peek().ok_or(Error::UnexpectedEnd)?;
		self.pos += 1;
		Ok(b ^ mask)
	}

	pub fn read_array<const N: usize>(&mut self, mask: u8) -> Result<[u8; N], Error> {
		let end = self.pos + N;
		let src = self.bytes.get(self.pos..end).ok_or(Error::UnexpectedEnd)?;
		let mut out = [0; N];
		for (o, b) in out.iter_mut().zip(src) {
			*o = b ^ mask;
		}
		self.pos = end;
		Ok(out)
	}
}
