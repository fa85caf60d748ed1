use crate::nbt::buffer::try_copy;
use crate::nbt::bytes::Cursor;
use crate::nbt::value::{Tag, TagList, TagStr, Value};
use crate::nbt::{NbtError, Result, TagKind};

/// Most list elements reserved before any of them is decoded.
const MAX_LIST_PREALLOC: usize = 1024;

/// Runtime limits for decoding untrusted input.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum number of nested List/Compound levels.
	pub max_depth: u32,
	/// Accept bytes after the root tag instead of failing.
	pub allow_trailing: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 512,
			allow_trailing: true,
		}
	}
}

/// Decode one uncompressed root tag with default options.
pub fn parse(bytes: &[u8]) -> Result<Tag> {
	parse_with(bytes, &DecodeOptions::default())
}

/// Decode one uncompressed root tag.
///
/// Any failure discards everything decoded so far; no partial tree is returned.
pub fn parse_with(bytes: &[u8], opt: &DecodeOptions) -> Result<Tag> {
	tracing::debug!(len = bytes.len(), max_depth = opt.max_depth, "decoding nbt payload");

	let mut decoder = Decoder {
		cursor: Cursor::new(bytes),
		opt,
	};

	let raw = decoder.cursor.read_u8()?;
	let kind = match TagKind::from_u8(raw) {
		Some(TagKind::End) | None => return Err(NbtError::InvalidRootKind { kind: raw }),
		Some(kind) => kind,
	};
	let name = decoder.read_string()?;
	let value = decoder.read_payload(kind, 0)?;

	let leftover = decoder.cursor.remaining();
	if leftover > 0 {
		if !opt.allow_trailing {
			return Err(NbtError::TrailingData { leftover });
		}
		tracing::warn!(leftover, "ignoring trailing data after root tag");
	}

	tracing::debug!(kind = %kind, consumed = decoder.cursor.pos(), "decoded root tag");
	Ok(Tag { name: Some(name), value })
}

struct Decoder<'a, 'o> {
	cursor: Cursor<'a>,
	opt: &'o DecodeOptions,
}

impl Decoder<'_, '_> {
	fn read_payload(&mut self, kind: TagKind, depth: u32) -> Result<Value> {
		Ok(match kind {
			TagKind::Byte => Value::Byte(self.cursor.read_i8()?),
			TagKind::Short => Value::Short(self.cursor.read_i16_be()?),
			TagKind::Int => Value::Int(self.cursor.read_i32_be()?),
			TagKind::Long => Value::Long(self.cursor.read_i64_be()?),
			TagKind::Float => Value::Float(self.cursor.read_f32_be()?),
			TagKind::Double => Value::Double(self.cursor.read_f64_be()?),
			TagKind::ByteArray => Value::ByteArray(self.read_byte_array()?),
			TagKind::String => Value::String(self.read_string()?),
			TagKind::List => {
				self.enter(depth)?;
				Value::List(self.read_list(depth)?)
			}
			TagKind::Compound => {
				self.enter(depth)?;
				Value::Compound(self.read_compound(depth)?)
			}
			TagKind::End => {
				return Err(NbtError::InvalidKind {
					kind: TagKind::End.as_u8(),
					at: self.cursor.pos(),
				});
			}
		})
	}

	fn enter(&self, depth: u32) -> Result<()> {
		if depth >= self.opt.max_depth {
			return Err(NbtError::DepthExceeded { max_depth: self.opt.max_depth });
		}
		Ok(())
	}

	fn read_string(&mut self) -> Result<TagStr> {
		let at = self.cursor.pos();
		let len = self.cursor.read_i16_be()?;
		if len < 0 {
			return Err(NbtError::NegativeLength {
				what: "string",
				len: i32::from(len),
				at,
			});
		}

		let raw = self.cursor.read_exact(len as usize)?;
		Ok(TagStr::from(try_copy(raw)?))
	}

	fn read_byte_array(&mut self) -> Result<Vec<u8>> {
		let at = self.cursor.pos();
		let len = self.cursor.read_i32_be()?;
		if len < 0 {
			return Err(NbtError::NegativeLength { what: "byte array", len, at });
		}

		try_copy(self.cursor.read_exact(len as usize)?)
	}

	fn read_list(&mut self, depth: u32) -> Result<TagList> {
		let kind_at = self.cursor.pos();
		let raw = self.cursor.read_u8()?;
		let count_at = self.cursor.pos();
		let count = self.cursor.read_i32_be()?;
		if count < 0 {
			return Err(NbtError::NegativeLength {
				what: "list",
				len: count,
				at: count_at,
			});
		}

		let elem_kind = match TagKind::from_u8(raw) {
			Some(TagKind::End) if count == 0 => TagKind::End,
			Some(TagKind::End) | None => return Err(NbtError::InvalidKind { kind: raw, at: kind_at }),
			Some(kind) => kind,
		};

		let count = count as usize;
		let mut items = Vec::new();
		// Nested lists each see the same remaining input, so the up-front reservation is capped.
		items.try_reserve_exact(count.min(self.cursor.remaining()).min(MAX_LIST_PREALLOC))?;
		for _ in 0..count {
			let value = self.read_payload(elem_kind, depth + 1)?;
			items.try_reserve(1)?;
			items.push(Tag::unnamed(value));
		}

		Ok(TagList { elem_kind, items })
	}

	fn read_compound(&mut self, depth: u32) -> Result<Vec<Tag>> {
		let mut items = Vec::new();
		loop {
			let at = self.cursor.pos();
			let raw = self.cursor.read_u8()?;
			let kind = match TagKind::from_u8(raw) {
				Some(TagKind::End) => break,
				Some(kind) => kind,
				None => return Err(NbtError::InvalidKind { kind: raw, at }),
			};

			let name = self.read_string()?;
			let value = self.read_payload(kind, depth + 1)?;
			items.try_reserve(1)?;
			items.push(Tag { name: Some(name), value });
		}
		Ok(items)
	}
}
