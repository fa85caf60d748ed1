use std::io::Write;

use crate::nbt::buffer::Buffer;
use crate::nbt::value::{Tag, TagList, Value};
use crate::nbt::{NbtError, Result, TagKind};

/// Longest name or String payload the i16 prefix can carry.
pub const MAX_STRING_LEN: usize = i16::MAX as usize;
/// Longest byte array or list the i32 prefix can carry.
pub const MAX_SEQUENCE_LEN: usize = i32::MAX as usize;

/// Serialize a tree into an uncompressed byte vector.
pub fn dump_binary(tree: &Tag) -> Result<Vec<u8>> {
	let mut buf = Buffer::new();
	write_binary(tree, &mut buf)?;
	tracing::debug!(len = buf.len(), kind = %tree.kind(), "encoded nbt payload");
	Ok(buf.into_vec())
}

/// Serialize a tree into `out`.
///
/// On error, bytes already handed to `out` are not retracted and the sink should
/// be discarded.
pub fn write_binary<W: Write>(tree: &Tag, out: &mut W) -> Result<()> {
	let mut encoder = Encoder { out };
	encoder.write_named(tree)
}

struct Encoder<'w, W: Write> {
	out: &'w mut W,
}

impl<W: Write> Encoder<'_, W> {
	fn put(&mut self, bytes: &[u8]) -> Result<()> {
		self.out.write_all(bytes).map_err(NbtError::from_io)
	}

	/// Kind byte, name, payload. A missing root name is written as empty.
	fn write_named(&mut self, tag: &Tag) -> Result<()> {
		self.put(&[tag.kind().as_u8()])?;
		match &tag.name {
			Some(name) => self.write_string("name", name.as_bytes())?,
			None => self.write_string("name", b"")?,
		}
		self.write_payload(&tag.value)
	}

	fn write_payload(&mut self, value: &Value) -> Result<()> {
		match value {
			Value::Byte(v) => self.put(&v.to_be_bytes()),
			Value::Short(v) => self.put(&v.to_be_bytes()),
			Value::Int(v) => self.put(&v.to_be_bytes()),
			Value::Long(v) => self.put(&v.to_be_bytes()),
			Value::Float(v) => self.put(&v.to_be_bytes()),
			Value::Double(v) => self.put(&v.to_be_bytes()),
			Value::ByteArray(bytes) => self.write_byte_array(bytes),
			Value::String(text) => self.write_string("string", text.as_bytes()),
			Value::List(list) => self.write_list(list),
			Value::Compound(items) => self.write_compound(items),
		}
	}

	fn write_string(&mut self, what: &'static str, bytes: &[u8]) -> Result<()> {
		if bytes.len() > MAX_STRING_LEN {
			return Err(NbtError::StringTooLong {
				what,
				len: bytes.len(),
				max: MAX_STRING_LEN,
			});
		}

		self.put(&(bytes.len() as i16).to_be_bytes())?;
		self.put(bytes)
	}

	fn write_byte_array(&mut self, bytes: &[u8]) -> Result<()> {
		if bytes.len() > MAX_SEQUENCE_LEN {
			return Err(NbtError::SequenceTooLong {
				what: "byte array",
				len: bytes.len(),
				max: MAX_SEQUENCE_LEN,
			});
		}

		self.put(&(bytes.len() as i32).to_be_bytes())?;
		self.put(bytes)
	}

	/// Element kind, count, then bare payloads.
	fn write_list(&mut self, list: &TagList) -> Result<()> {
		let len = list.items.len();
		if len > MAX_SEQUENCE_LEN {
			return Err(NbtError::SequenceTooLong {
				what: "list",
				len,
				max: MAX_SEQUENCE_LEN,
			});
		}

		let elem_kind = list.homogeneous_kind().map_err(|index| NbtError::InconsistentList {
			expected: list.items[0].kind().as_str(),
			found: list.items[index].kind().as_str(),
			index,
		})?;

		self.put(&[elem_kind.as_u8()])?;
		self.put(&(len as i32).to_be_bytes())?;
		for item in &list.items {
			self.write_payload(&item.value)?;
		}
		Ok(())
	}

	/// Named members then End. Empty list members are dropped.
	fn write_compound(&mut self, items: &[Tag]) -> Result<()> {
		for item in items {
			if is_empty_list(item) {
				tracing::trace!(name = %item.name_str(), "dropping empty list member");
				continue;
			}
			self.write_named(item)?;
		}
		self.put(&[TagKind::End.as_u8()])
	}
}

fn is_empty_list(tag: &Tag) -> bool {
	matches!(&tag.value, Value::List(list) if list.items.is_empty())
}
