use std::io::{ErrorKind, Read, Write};

use flate2::Compression as Level;
use flate2::read::{MultiGzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};

use crate::nbt::buffer::{Buffer, try_copy};
use crate::nbt::{NbtError, Result, TagKind};

/// Upper bound on decompressed payload size.
pub const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// Decompressor output is drained in chunks of this size.
const CHUNK_SIZE: usize = 4096;
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
/// deflate with a 32 KiB window; the only zlib header seen in the wild.
const ZLIB_CMF: u8 = 0x78;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
const ZSTD_LEVEL: i32 = 3;

/// Outer compression layer wrapped around an NBT payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed payload.
	None,
	/// gzip member(s), the usual `.dat` layout.
	Gzip,
	/// zlib stream, the usual region-chunk layout.
	Zlib,
	/// zstd frame.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Gzip => "gzip",
			Self::Zlib => "zlib",
			Self::Zstd => "zstd",
		}
	}

	/// Parse a label produced by [`Compression::as_str`].
	pub fn from_label(label: &str) -> Option<Self> {
		match label {
			"none" => Some(Self::None),
			"gzip" => Some(Self::Gzip),
			"zlib" => Some(Self::Zlib),
			"zstd" => Some(Self::Zstd),
			_ => None,
		}
	}

	/// Classify `raw` by its leading bytes.
	pub fn detect(raw: &[u8]) -> Option<Self> {
		if raw.starts_with(&GZIP_MAGIC) {
			return Some(Self::Gzip);
		}
		if raw.starts_with(&ZSTD_MAGIC) {
			return Some(Self::Zstd);
		}
		if let [ZLIB_CMF, flg, ..] = raw {
			if (u16::from(ZLIB_CMF) << 8 | u16::from(*flg)) % 31 == 0 {
				return Some(Self::Zlib);
			}
		}
		match raw.first().copied().and_then(TagKind::from_u8) {
			Some(TagKind::End) | None => None,
			Some(_) => Some(Self::None),
		}
	}
}

/// Detect and strip the compression layer, returning `(mode, decoded_bytes)`.
pub fn decompress(raw: &[u8]) -> Result<(Compression, Vec<u8>)> {
	let compression = Compression::detect(raw).ok_or(NbtError::UnknownMagic { magic: first4(raw) })?;
	tracing::debug!(compression = compression.as_str(), len = raw.len(), "detected compression");

	let out = match compression {
		Compression::None => try_copy(raw)?,
		Compression::Gzip => read_to_end_limited(MultiGzDecoder::new(raw), "gzip")?,
		Compression::Zlib => read_to_end_limited(ZlibDecoder::new(raw), "zlib")?,
		Compression::Zstd => {
			let decoder = zstd::stream::read::Decoder::new(raw).map_err(|source| NbtError::CorruptStream { codec: "zstd", source })?;
			read_to_end_limited(decoder, "zstd")?
		}
	};
	Ok((compression, out))
}

/// Wrap `bytes` in the requested compression layer.
pub fn compress(bytes: &[u8], compression: Compression) -> Result<Vec<u8>> {
	let mut out = Buffer::new();
	compress_into(bytes, compression, &mut out)?;
	Ok(out.into_vec())
}

/// Stream `bytes` through the requested compressor into `out`.
pub(crate) fn compress_into<W: Write>(bytes: &[u8], compression: Compression, out: &mut W) -> Result<()> {
	match compression {
		Compression::None => out.write_all(bytes).map_err(NbtError::from_io),
		Compression::Gzip => {
			let mut encoder = GzEncoder::new(out, Level::default());
			encoder.write_all(bytes).map_err(NbtError::from_io)?;
			encoder.finish().map_err(NbtError::from_io)?;
			Ok(())
		}
		Compression::Zlib => {
			let mut encoder = ZlibEncoder::new(out, Level::default());
			encoder.write_all(bytes).map_err(NbtError::from_io)?;
			encoder.finish().map_err(NbtError::from_io)?;
			Ok(())
		}
		Compression::Zstd => zstd::stream::copy_encode(bytes, out, ZSTD_LEVEL).map_err(NbtError::from_io),
	}
}

/// Drain a decompressor into a [`Buffer`] one chunk at a time.
pub(crate) fn read_to_end_limited<R: Read>(mut reader: R, codec: &'static str) -> Result<Vec<u8>> {
	let mut out = Buffer::new();
	let mut chunk = [0_u8; CHUNK_SIZE];

	loop {
		let read = match reader.read(&mut chunk) {
			Ok(0) => break,
			Ok(read) => read,
			Err(err) if err.kind() == ErrorKind::Interrupted => continue,
			Err(source) => return Err(NbtError::CorruptStream { codec, source }),
		};

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(NbtError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.append(&chunk[..read])?;
	}

	tracing::debug!(codec, len = out.len(), "decompressed payload");
	Ok(out.into_vec())
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

#[cfg(test)]
mod tests;
