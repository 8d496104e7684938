use crate::{
	scale8to5,
	scale8to6
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
	pub red: u8,
	pub green: u8,
	pub blue: u8,
	pub alpha: u8,
}

impl Color {
	/// Builds a color from a palette quad stored as `[blue, green, red, alpha]`
	pub const fn from_bgra8888(quad: [u8; 4]) -> Color {
		Color {
			red: quad[2],
			green: quad[1],
			blue: quad[0],
			alpha: quad[3],
		}
	}

	/// Packs the color as `BBBBBGGGGGGRRRRR`, dropping alpha
	pub const fn to_bgr565(&self) -> u16 {
		(scale8to5(self.blue) as u16) << 11 | (scale8to6(self.green) as u16) << 5 |
			scale8to5(self.red) as u16
	}
}

/// Reads a BGRA palette, ignoring any trailing partial entry
pub fn read_bgra_palette(data: &[u8]) -> Vec<Color> {
	data.chunks_exact(4)
		.map(|q| Color::from_bgra8888([q[0], q[1], q[2], q[3]]))
		.collect()
}
