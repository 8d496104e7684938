//! Writing and reading C array literals.

use std::fmt::{
	self,
	Write
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CArrayError {
	#[error("No array named {0}")]
	Missing(String),
	#[error("Array {0} has no closing brace")]
	Unterminated(String),
	#[error("Invalid literal in array {name}: {literal:?}")]
	Literal {
		name: String,
		literal: String,
	},
}

/// Writes a byte array, `per_line` hex literals per line.
///
/// `decl` is everything before the brackets, e.g. `const uint8_t foo`.
pub fn write_u8_array<W>(buf: &mut W, decl: &str, data: &[u8], per_line: usize) -> fmt::Result
where
	W: Write,
{
	writeln!(buf, "{}[] = {{", decl)?;

	let lines: Vec<String> = data.chunks(per_line.max(1))
		.map(|line| line.iter().map(|b| format!("0x{:02x}", b)).collect::<Vec<_>>().join(", "))
		.collect();

	if !lines.is_empty() {
		writeln!(buf, "{}", lines.join(",\n"))?;
	}

	write!(buf, "}};\n\n")
}

/// Writes a 16-bit array on a single line
pub fn write_u16_inline<W>(buf: &mut W, decl: &str, data: &[u16]) -> fmt::Result
where
	W: Write,
{
	let values: Vec<String> = data.iter().map(|v| format!("0x{:04X}", v)).collect();
	write!(buf, "{}[] = {{ {} }};\n\n", decl, values.join(", "))
}

fn is_ident_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

/// Reads back the values of the array named `name` from C source text
pub fn parse_literals(text: &str, name: &str) -> Result<Vec<u32>, CArrayError> {
	let pattern = format!("{}[]", name);

	let start = text.match_indices(&pattern)
		.map(|(i, _)| i)
		.find(|&i| !text[..i].ends_with(is_ident_char))
		.ok_or_else(|| CArrayError::Missing(name.to_string()))?;

	let body = &text[start + pattern.len()..];
	let open = body.find('{').ok_or_else(|| CArrayError::Unterminated(name.to_string()))?;
	let close = body[open..].find('}').ok_or_else(|| CArrayError::Unterminated(name.to_string()))?;

	body[open + 1..open + close].split(',')
		.map(str::trim)
		.filter(|lit| !lit.is_empty())
		.map(|lit| {
			let digits = lit.strip_prefix("0x").or_else(|| lit.strip_prefix("0X")).unwrap_or(lit);
			u32::from_str_radix(digits, 16).map_err(|_| CArrayError::Literal {
				name: name.to_string(),
				literal: lit.to_string(),
			})
		})
		.collect()
}
