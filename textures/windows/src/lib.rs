pub mod ico;

#[cfg(feature = "export")]
pub mod header;

use std::{
	fs,
	path::{
		Path,
		PathBuf
	}
};

use tracing::debug;

use ico::*;

#[cfg(feature = "export")]
use header::*;

/// Extension of every generated header
pub const HEADER_EXT: &str = "h";

/// Reads an ICO file, returning its bytes along with the parsed directory
#[cfg(feature = "import")]
pub fn read_ico<P>(filepath: P) -> Result<(Vec<u8>, IcoFile), IcoImportError>
where
	P: AsRef<Path>,
{
	let data = fs::read(filepath)?;
	let ico = IcoFile::read(&mut data.as_slice())?;
	Ok((data, ico))
}

/// Renders every image of a parsed ICO file as `(name, header text)` pairs.
///
/// Nothing is returned unless every image converts.
#[cfg(feature = "export")]
pub fn render_ico(data: &[u8], ico: &IcoFile, stem: &str, flags: HeaderFlags)
	-> Result<Vec<(String, String)>, IcoExportError>
{
	let names = output_names(stem, ico.entries.len());

	ico.entries.iter().zip(names)
		.map(|(entry, name)| {
			debug!("rendering {} ({}x{})", name, entry.width(), entry.height());
			let text = render(entry, data, &name, flags)?;
			Ok((name, text))
		})
		.collect()
}

/// Converts the ICO file at `input` into headers inside `out_dir`, returning the written paths
#[cfg(feature = "export")]
pub fn convert_ico<P, Q>(input: P, out_dir: Q, flags: HeaderFlags) -> Result<Vec<PathBuf>, IcoExportError>
where
	P: AsRef<Path>,
	Q: AsRef<Path>,
{
	let input = input.as_ref();
	let stem = input.file_stem()
		.map(|s| s.to_string_lossy().into_owned())
		.ok_or_else(|| IcoExportError::Name(input.display().to_string()))?;

	let (data, ico) = read_ico(input)?;
	let headers = render_ico(&data, &ico, &stem, flags)?;

	let mut written = Vec::with_capacity(headers.len());
	for (name, text) in headers {
		let path = out_dir.as_ref().join(format!("{}.{}", name, HEADER_EXT));
		fs::write(&path, text)?;
		written.push(path);
	}

	Ok(written)
}

#[cfg(all(test, feature = "export"))]
mod tests {
	use super::*;

	/// Builds an ICO file holding one 4bpp image per `(width, height, bpp)`
	fn build_ico(images: &[(u8, u8, u16)]) -> Vec<u8> {
		let mut payloads = vec![];
		for &(w, h, _) in images {
			let (w, h) = (w as usize, h as usize);
			let size = BMP_INFO_HEADER_SIZE + PALETTE_SIZE + w * h / 2 + ((w + 31) / 32) * 4 * h;
			payloads.push((0..size).map(|i| (i % 251) as u8).collect::<Vec<u8>>());
		}

		let mut data = vec![0, 0, 1, 0];
		data.extend_from_slice(&(images.len() as u16).to_le_bytes());

		let mut offset = HEADER_SIZE + DIR_ENTRY_SIZE * images.len();
		for (&(w, h, bpp), payload) in images.iter().zip(payloads.iter()) {
			data.extend_from_slice(&[w, h, 16, 0]);
			data.extend_from_slice(&1u16.to_le_bytes());
			data.extend_from_slice(&bpp.to_le_bytes());
			data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
			data.extend_from_slice(&(offset as u32).to_le_bytes());
			offset += payload.len();
		}

		for payload in payloads {
			data.extend(payload);
		}

		data
	}

	fn render_all(data: &[u8], stem: &str) -> Result<Vec<(String, String)>, IcoExportError> {
		let ico = IcoFile::read(&mut &data[..])?;
		render_ico(data, &ico, stem, HeaderFlags::empty())
	}

	#[test]
	fn test_render_single() {
		let data = build_ico(&[(16, 16, 4)]);
		let headers = render_all(&data, "folder").unwrap();
		assert_eq!(headers.len(), 1);
		assert_eq!(headers[0].0, "folder");
		assert!(headers[0].1.contains("const ico_def_t folder = { 16, 16,"));
	}

	#[test]
	fn test_render_multiple() {
		let data = build_ico(&[(16, 16, 4), (32, 32, 4), (8, 8, 4)]);
		let headers = render_all(&data, "disk").unwrap();
		let names: Vec<&str> = headers.iter().map(|(n, _)| n.as_str()).collect();
		assert_eq!(names, vec!["disk0", "disk1", "disk2"]);
		assert!(headers[1].1.starts_with("// Image: 32 x 32\n"));
	}

	#[test]
	fn test_render_aborts_on_unsupported() {
		let data = build_ico(&[(16, 16, 4), (16, 16, 8)]);
		assert!(matches!(render_all(&data, "disk"),
			Err(IcoExportError::Unsupported { bpp: 8, .. })));
	}

	#[test]
	fn test_render_cursor() {
		let mut data = build_ico(&[(16, 16, 4)]);
		data[2] = 2;
		assert!(matches!(render_all(&data, "arrow"),
			Err(IcoExportError::Import(IcoImportError::Kind { raw: 2, .. }))));
	}
}
