pub mod carray;
pub mod color;

/// Scales an 8 bit value to 5 bits
pub const fn scale8to5(b: u8) -> u8 {
	(b & 0xF8) >> 3
}

/// Scales an 8 bit value to 6 bits
pub const fn scale8to6(b: u8) -> u8 {
	(b & 0xFC) >> 2
}
