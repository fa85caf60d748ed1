use std::{fmt, io};

use crate::nbt::value::{Tag, Value};
use crate::nbt::{NbtError, Result};

const INDENT: &str = "    ";

/// Render a tree as indented text, one tag per line.
///
/// ```text
/// TAG_Compound("Level") 2 entries
/// {
///     TAG_Byte("raining"): 0x01 (1)
///     TAG_Float("angle"): 90.000000
/// }
/// ```
pub fn dump_ascii(tree: &Tag) -> String {
	Ascii(tree).to_string()
}

/// Stream [`dump_ascii`] output to `out`.
pub fn write_ascii<W: io::Write>(tree: &Tag, out: &mut W) -> Result<()> {
	write!(out, "{}", Ascii(tree)).map_err(NbtError::from_io)
}

struct Ascii<'t>(&'t Tag);

impl fmt::Display for Ascii<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		render(self.0, 0, f)
	}
}

fn render<W: fmt::Write>(tag: &Tag, depth: usize, out: &mut W) -> fmt::Result {
	let pad = INDENT.repeat(depth);
	write!(out, "{pad}{}(\"{}\")", tag.kind(), tag.name_str())?;

	match &tag.value {
		Value::Byte(v) => writeln!(out, ": 0x{:02x} ({v})", *v as u8),
		Value::Short(v) => writeln!(out, ": {v}"),
		Value::Int(v) => writeln!(out, ": {v}"),
		Value::Long(v) => writeln!(out, ": {v}"),
		Value::Float(v) => writeln!(out, ": {v:.6}"),
		Value::Double(v) => writeln!(out, ": {v:.6}"),
		Value::ByteArray(bytes) => {
			out.write_str(": [")?;
			for (index, byte) in bytes.iter().enumerate() {
				if index > 0 {
					out.write_char(' ')?;
				}
				write!(out, "{byte}")?;
			}
			writeln!(out, "] {} bytes", bytes.len())
		}
		Value::String(text) => writeln!(out, ": {text}"),
		Value::List(list) => {
			writeln!(out, " {} entries of {}", list.items.len(), list.elem_kind)?;
			render_children(&list.items, &pad, depth, out)
		}
		Value::Compound(items) => {
			writeln!(out, " {} entries", items.len())?;
			render_children(items, &pad, depth, out)
		}
	}
}

fn render_children<W: fmt::Write>(items: &[Tag], pad: &str, depth: usize, out: &mut W) -> fmt::Result {
	writeln!(out, "{pad}{{")?;
	for item in items {
		render(item, depth + 1, out)?;
	}
	writeln!(out, "{pad}}}")
}
