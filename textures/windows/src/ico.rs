use byteorder::{
	LE,
	ReadBytesExt
};

use std::io;
use thiserror::Error;
use tracing::debug;

pub const HEADER_SIZE: usize = 6;
pub const DIR_ENTRY_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum ImageType {
	Icon = 1,
	Cursor,
	Unknown = 65535,
}

impl From<u16> for ImageType {
	fn from(kind: u16) -> Self {
		match kind {
			1 => ImageType::Icon,
			2 => ImageType::Cursor,
			_ => ImageType::Unknown,
		}
	}
}

#[cfg(feature = "import")]
#[derive(Debug, Error)]
pub enum IcoImportError {
	#[error("I/O error")]
	IO {
		#[from]
		source: io::Error,
	},
	#[error("Not a valid ICO file: reserved field is {0}")]
	Reserved(u16),
	#[error("Not a valid ICO file: image type {raw} ({kind:?})")]
	Kind {
		kind: ImageType,
		raw: u16,
	},
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
	reserved: u16, // must be 0
	pub kind: ImageType,
	pub num_images: u16,
}

impl Header {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<Header, IcoImportError>
	where
		R: ReadBytesExt,
	{
		let reserved = buf.read_u16::<LE>()?;
		if reserved != 0 {
			return Err(IcoImportError::Reserved(reserved));
		}

		let raw = buf.read_u16::<LE>()?;
		let kind = ImageType::from(raw);
		if kind != ImageType::Icon {
			return Err(IcoImportError::Kind { kind: kind, raw: raw });
		}

		Ok(Header {
			reserved: reserved,
			kind: kind,
			num_images: buf.read_u16::<LE>()?,
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconDirEntry {
	pub width: u8, // 0 means 256
	pub height: u8, // 0 means 256
	pub palette_count: u8,
	pub reserved: u8, // must be 0
	pub planes: u16,
	pub bpp: u16,
	pub data_size: u32,
	pub data_offset: u32,
}

impl IconDirEntry {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<IconDirEntry, IcoImportError>
	where
		R: ReadBytesExt,
	{
		Ok(IconDirEntry {
			width: buf.read_u8()?,
			height: buf.read_u8()?,
			palette_count: buf.read_u8()?,
			reserved: buf.read_u8()?,
			planes: buf.read_u16::<LE>()?,
			bpp: buf.read_u16::<LE>()?,
			data_size: buf.read_u32::<LE>()?,
			data_offset: buf.read_u32::<LE>()?,
		})
	}

	pub fn width(&self) -> usize {
		if self.width == 0 { 256 } else { self.width as usize }
	}

	pub fn height(&self) -> usize {
		if self.height == 0 { 256 } else { self.height as usize }
	}

	/// Size in bytes of the nibble-packed pixel data
	pub fn pixel_len(&self) -> usize {
		self.width() * self.height() / 2
	}

	/// Size in bytes of a 1bpp mask with rows padded to 32 bits
	pub fn expected_mask_len(&self) -> usize {
		((self.width() + 31) / 32) * 4 * self.height()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct IcoFile {
	pub header: Header,
	pub entries: Vec<IconDirEntry>,
}

impl IcoFile {
	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R) -> Result<IcoFile, IcoImportError>
	where
		R: ReadBytesExt,
	{
		let header = Header::read(buf)?;
		let mut entries = Vec::with_capacity(header.num_images as usize);

		for i in 0..header.num_images {
			let entry = IconDirEntry::read(buf)?;
			debug!("entry {}: {}x{}, {} colors, {} planes, {}bpp, {} bytes at {}", i, entry.width(),
				entry.height(), entry.palette_count, entry.planes, entry.bpp, entry.data_size, entry.data_offset);
			entries.push(entry);
		}

		Ok(IcoFile {
			header: header,
			entries: entries,
		})
	}
}
