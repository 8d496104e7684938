//! C header emission for 16-color icon images.

use bitflags::bitflags;

use std::{
	fmt,
	io
};

use thiserror::Error;
use tracing::warn;

use icohdr_core::{
	carray::{
		write_u16_inline,
		write_u8_array
	},
	color::{
		Color,
		read_bgra_palette
	}
};

use crate::ico::{
	IconDirEntry,
	IcoImportError
};

/// Size of the BITMAPINFOHEADER preceding the palette, skipped as-is
pub const BMP_INFO_HEADER_SIZE: usize = 40;
pub const PALETTE_ENTRIES: usize = 16;
pub const PALETTE_SIZE: usize = PALETTE_ENTRIES * 4;
pub const PLANES: u16 = 1;
pub const BPP: u16 = 4;

pub const PIXELS_PER_LINE: usize = 16;
pub const MASK_PER_LINE: usize = 4;

bitflags! {
	pub struct HeaderFlags: u32 {
		const CONST_PALETTE = 1;
		const INCLUDE_GUARD = 2;
	}
}

#[derive(Debug, Error)]
pub enum IcoExportError {
	#[error(transparent)]
	Import(#[from] IcoImportError),
	#[error("I/O error")]
	IO {
		#[from]
		source: io::Error,
	},
	#[error("Formatting error")]
	Fmt(#[from] fmt::Error),
	#[error("Not a valid ICO file: image reserved field is {0}")]
	Reserved(u8),
	#[error("Unsupported color format: {palette_count} colors, {planes} planes, {bpp}bpp")]
	Unsupported {
		palette_count: u8,
		planes: u16,
		bpp: u16,
	},
	#[error("Image data out of bounds: {len} bytes at offset {offset}, file is {file_len} bytes")]
	Truncated {
		offset: usize,
		len: usize,
		file_len: usize,
	},
	#[error("Image data too small: {data_size} bytes, need at least {needed}")]
	Undersized {
		data_size: usize,
		needed: usize,
	},
	#[error("Cannot derive an output name from {0}")]
	Name(String),
}

/// A 16-color image sliced out of an ICO file
#[derive(Clone, Debug, PartialEq)]
pub struct IconImage<'a> {
	pub width: usize,
	pub height: usize,
	pub palette: Vec<Color>,
	pub pixels: &'a [u8],
	pub mask: &'a [u8],
}

impl<'a> IconImage<'a> {
	/// Validates `entry` and slices its palette, pixels and mask out of `data`
	pub fn from_entry(entry: &IconDirEntry, data: &'a [u8]) -> Result<IconImage<'a>, IcoExportError> {
		if entry.reserved != 0 {
			return Err(IcoExportError::Reserved(entry.reserved));
		}

		if entry.palette_count as usize != PALETTE_ENTRIES || entry.planes != PLANES || entry.bpp != BPP {
			return Err(IcoExportError::Unsupported {
				palette_count: entry.palette_count,
				planes: entry.planes,
				bpp: entry.bpp,
			});
		}

		let offset = entry.data_offset as usize;
		let data_size = entry.data_size as usize;
		let payload = offset.checked_add(data_size)
			.and_then(|end| data.get(offset..end))
			.ok_or(IcoExportError::Truncated {
				offset: offset,
				len: data_size,
				file_len: data.len(),
			})?;

		let pixel_len = entry.pixel_len();
		let needed = BMP_INFO_HEADER_SIZE + PALETTE_SIZE + pixel_len;
		if payload.len() < needed {
			return Err(IcoExportError::Undersized {
				data_size: data_size,
				needed: needed,
			});
		}

		let body = &payload[BMP_INFO_HEADER_SIZE..];
		let (palette, rest) = body.split_at(PALETTE_SIZE);
		let (pixels, mask) = rest.split_at(pixel_len);

		if mask.len() != entry.expected_mask_len() {
			warn!("{}x{} image has a {} byte mask, expected {}; emitting it as-is", entry.width(),
				entry.height(), mask.len(), entry.expected_mask_len());
		}

		Ok(IconImage {
			width: entry.width(),
			height: entry.height(),
			palette: read_bgra_palette(palette),
			pixels: pixels,
			mask: mask,
		})
	}

	/// Writes the image as a C header declaring `name`
	pub fn write<W>(&self, buf: &mut W, name: &str, flags: HeaderFlags) -> fmt::Result
	where
		W: fmt::Write,
	{
		let ident = c_identifier(name);
		let guard = format!("{}_H", ident.to_ascii_uppercase());

		if flags.contains(HeaderFlags::INCLUDE_GUARD) {
			write!(buf, "#ifndef {0}\n#define {0}\n\n", guard)?;
		}

		writeln!(buf, "// Image: {} x {}", self.width, self.height)?;

		let palette: Vec<u16> = self.palette.iter().map(Color::to_bgr565).collect();
		let palette_decl = if flags.contains(HeaderFlags::CONST_PALETTE) {
			format!("const uint16_t {}_palette", ident)
		} else {
			format!("uint16_t {}_palette", ident)
		};
		write_u16_inline(buf, &palette_decl, &palette)?;

		write_u8_array(buf, &format!("const uint8_t {}_image", ident), self.pixels, PIXELS_PER_LINE)?;
		write_u8_array(buf, &format!("const uint8_t {}_mask", ident), self.mask, MASK_PER_LINE)?;

		writeln!(buf, "const ico_def_t {0} = {{ {1}, {2}, {0}_palette, {0}_image, {0}_mask }};", ident,
			self.width, self.height)?;

		if flags.contains(HeaderFlags::INCLUDE_GUARD) {
			write!(buf, "\n#endif /* {} */\n", guard)?;
		}

		Ok(())
	}
}

/// Validates and renders a single directory entry
pub fn render(entry: &IconDirEntry, data: &[u8], name: &str, flags: HeaderFlags) -> Result<String, IcoExportError> {
	let image = IconImage::from_entry(entry, data)?;
	let mut out = String::new();
	image.write(&mut out, name, flags)?;
	Ok(out)
}

/// Turns an output name into a valid C identifier
pub fn c_identifier(name: &str) -> String {
	let mut ident: String = name.chars()
		.map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
		.collect();

	if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
		ident.insert(0, '_');
	}

	ident
}

/// Output names for `count` images: the bare stem for one, `stem0..` otherwise
pub fn output_names(stem: &str, count: usize) -> Vec<String> {
	if count == 1 {
		vec![stem.to_string()]
	} else {
		(0..count).map(|i| format!("{}{}", stem, i)).collect()
	}
}
