mod ascii;
mod buffer;
mod bytes;
mod compression;
mod decode;
mod encode;
mod error;
mod file;
mod kind;
mod tree;
mod value;

/// Human-readable indented dump.
pub use ascii::{dump_ascii, write_ascii};
/// Growable output/input byte buffer.
pub use buffer::Buffer;
/// Bounds-checked big-endian read cursor.
pub use bytes::Cursor;
/// Compression detection and the external (de)compression layer.
pub use compression::{Compression, MAX_DECOMPRESSED_BYTES, compress, decompress};
/// Binary decoding entry points and options.
pub use decode::{DecodeOptions, parse, parse_with};
/// Binary encoding entry points and limits.
pub use encode::{MAX_SEQUENCE_LEN, MAX_STRING_LEN, dump_binary, write_binary};
/// Error and result aliases.
pub use error::{ErrorClass, NbtError, Result};
/// File and stream helpers.
pub use file::{NbtFile, parse_chunk, parse_compressed, parse_from_stream, write_to_stream};
/// Tag kind discriminator.
pub use kind::TagKind;
/// Generic tree traversal and reshaping.
pub use tree::{Visit, filter, filter_inplace, find, find_by_name, find_mut, map, size, try_clone, visit};
/// Tree node types.
pub use value::{FLOAT_EPSILON, Tag, TagList, TagStr, Value};
