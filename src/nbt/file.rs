use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::{MultiGzDecoder, ZlibDecoder};

use crate::nbt::compression::{compress_into, read_to_end_limited};
use crate::nbt::{Compression, DecodeOptions, Result, Tag, decompress, dump_binary, parse, parse_with};

/// A decoded NBT file plus the compression it was stored with.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
	/// Outer compression layer, reused by [`NbtFile::save`].
	pub compression: Compression,
	/// Decoded root tag.
	pub root: Tag,
}

impl NbtFile {
	/// Read a whole file, detect its compression, and decode the root tag.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, &DecodeOptions::default())
	}

	/// [`NbtFile::open`] with explicit decoder limits.
	pub fn open_with(path: impl AsRef<Path>, opt: &DecodeOptions) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		tracing::debug!(path = %path.display(), len = raw.len(), "opened nbt file");
		Self::from_bytes_with(&raw, opt)
	}

	/// Decode an in-memory file image.
	pub fn from_bytes(raw: &[u8]) -> Result<Self> {
		Self::from_bytes_with(raw, &DecodeOptions::default())
	}

	/// [`NbtFile::from_bytes`] with explicit decoder limits.
	pub fn from_bytes_with(raw: &[u8], opt: &DecodeOptions) -> Result<Self> {
		let (compression, bytes) = decompress(raw)?;
		let root = parse_with(&bytes, opt)?;
		Ok(Self { compression, root })
	}

	/// Encode and compress the root tag as a file image.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut out = Vec::new();
		write_to_stream(&self.root, &mut out, self.compression)?;
		Ok(out)
	}

	/// Write the file back using the remembered compression.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let bytes = self.to_bytes()?;
		fs::write(path, &bytes)?;
		tracing::debug!(path = %path.display(), len = bytes.len(), compression = self.compression.as_str(), "saved nbt file");
		Ok(())
	}
}

/// Decode a gzip-compressed tree from a stream, the layout of `.dat` files.
///
/// The whole decompressed payload is buffered before decoding starts.
pub fn parse_from_stream<R: Read>(reader: R) -> Result<Tag> {
	let bytes = read_to_end_limited(MultiGzDecoder::new(reader), "gzip")?;
	parse(&bytes)
}

/// Decode a tree whose compression is detected from its leading bytes.
pub fn parse_compressed(raw: &[u8]) -> Result<Tag> {
	NbtFile::from_bytes(raw).map(|file| file.root)
}

/// Decode a zlib-compressed region chunk payload.
pub fn parse_chunk(raw: &[u8]) -> Result<Tag> {
	let bytes = read_to_end_limited(ZlibDecoder::new(raw), "zlib")?;
	parse(&bytes)
}

/// Encode `tree` and write it to `out` through the requested compression.
///
/// On error `out` may have received a partial payload.
pub fn write_to_stream<W: Write>(tree: &Tag, out: &mut W, compression: Compression) -> Result<()> {
	let bytes = dump_binary(tree)?;
	compress_into(&bytes, compression, out)?;
	out.flush()?;
	Ok(())
}

#[cfg(test)]
mod tests;
