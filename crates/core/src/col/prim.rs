//! Fixed-width big-endian writers and the bit transforms which make
//! unsigned byte comparison match numeric comparison.

/// The sign bit of a 32-bit pattern.
const SIGN_32: u32 = 1 << 31;

/// The sign bit of a 64-bit pattern.
const SIGN_64: u64 = 1 << 63;

/// Append the low `width` bytes of `v` in big-endian order.
///
/// Panics if `width` is not one of 1, 2, 4 or 8.
pub fn put_uint(out: &mut Vec<u8>, v: u64, width: usize) {
	assert!(matches!(width, 1 | 2 | 4 | 8), "invalid integer width {width}");
	out.extend_from_slice(&v.to_be_bytes()[8 - width..]);
}

/// Read a big-endian unsigned integer of 1, 2, 4 or 8 bytes.
pub fn get_uint(bytes: &[u8]) -> u64 {
	debug_assert!(matches!(bytes.len(), 1 | 2 | 4 | 8));
	bytes.iter().fold(0, |acc, b| (acc << 8) | *b as u64)
}

pub fn put_u8(out: &mut Vec<u8>, v: u8) {
	out.push(v);
}

pub fn put_u16(out: &mut Vec<u8>, v: u16) {
	out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_u32(out: &mut Vec<u8>, v: u32) {
	out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_u64(out: &mut Vec<u8>, v: u64) {
	out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_f32(out: &mut Vec<u8>, v: f32) {
	put_u32(out, sortable_f32(v));
}

pub fn put_f64(out: &mut Vec<u8>, v: f64) {
	put_u64(out, sortable_f64(v));
}

/// Remap a two's-complement integer of the given byte width so that
/// unsigned comparison matches signed comparison.
pub fn sortable_int(v: i64, width: usize) -> u64 {
	let bits = width as u32 * 8;
	let mask = u64::MAX >> (64 - bits);
	((v as u64) & mask) ^ (1 << (bits - 1))
}

/// Reverse [`sortable_int`], sign-extending the result.
pub fn unsortable_int(v: u64, width: usize) -> i64 {
	let bits = width as u32 * 8;
	let v = v ^ (1 << (bits - 1));
	// Shift the sign bit into place and back to sign-extend
	((v << (64 - bits)) as i64) >> (64 - bits)
}

/// Negative floats have every bit complemented, other floats only
/// have the sign bit flipped.
pub fn sortable_f32(v: f32) -> u32 {
	let bits = v.to_bits();
	if bits & SIGN_32 != 0 {
		!bits
	} else {
		bits ^ SIGN_32
	}
}

pub fn unsortable_f32(v: u32) -> f32 {
	if v & SIGN_32 != 0 {
		f32::from_bits(v ^ SIGN_32)
	} else {
		f32::from_bits(!v)
	}
}

/// Negative floats have every bit complemented, other floats only
/// have the sign bit flipped.
pub fn sortable_f64(v: f64) -> u64 {
	let bits = v.to_bits();
	if bits & SIGN_64 != 0 {
		!bits
	} else {
		bits ^ SIGN_64
	}
}

pub fn unsortable_f64(v: u64) -> f64 {
	if v & SIGN_64 != 0 {
		f64::from_bits(v ^ SIGN_64)
	} else {
		f64::from_bits(!v)
	}
}

/// Complement every byte in place.
pub fn complement(bytes: &mut [u8]) {
	bytes.iter_mut().for_each(|b| *b = !*b);
}
