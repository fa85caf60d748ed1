use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, NbtError>;

/// Errors produced while reading, writing, and reshaping NBT trees.
#[derive(Debug, Error)]
pub enum NbtError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Root tag kind was End or outside the known range.
	#[error("invalid root tag kind {kind}")]
	InvalidRootKind {
		/// Raw kind byte.
		kind: u8,
	},
	/// A payload kind byte was End or outside the known range.
	#[error("invalid tag kind {kind} at offset {at}")]
	InvalidKind {
		/// Raw kind byte.
		kind: u8,
		/// Cursor offset of the kind byte.
		at: usize,
	},
	/// A length or count prefix was negative.
	#[error("negative {what} length {len} at offset {at}")]
	NegativeLength {
		/// Which prefix was being read.
		what: &'static str,
		/// Parsed signed length.
		len: i32,
		/// Cursor offset of the prefix.
		at: usize,
	},
	/// Nesting exceeded the configured decode depth.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Bytes remained after the root tag in strict mode.
	#[error("trailing data after root tag: {leftover} bytes")]
	TrailingData {
		/// Unconsumed bytes.
		leftover: usize,
	},
	/// Name or string payload does not fit the i16 length prefix.
	#[error("{what} too long: {len} bytes (max {max})")]
	StringTooLong {
		/// `name` or `string`.
		what: &'static str,
		/// Actual byte length.
		len: usize,
		/// Maximum encodable length.
		max: usize,
	},
	/// Byte array or list does not fit the i32 length prefix.
	#[error("{what} too long: {len} elements (max {max})")]
	SequenceTooLong {
		/// `byte array` or `list`.
		what: &'static str,
		/// Actual element count.
		len: usize,
		/// Maximum encodable count.
		max: usize,
	},
	/// List elements do not share one kind.
	#[error("inconsistent list: expected {expected} elements, found {found} at index {index}")]
	InconsistentList {
		/// Kind of the first element.
		expected: &'static str,
		/// Kind of the offending element.
		found: &'static str,
		/// Offending element index.
		index: usize,
	},
	/// An allocation could not be satisfied.
	#[error("out of memory")]
	OutOfMemory,
	/// Compressed input did not match any supported layout.
	#[error("unsupported compression (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompressor rejected the stream.
	#[error("{codec} stream is corrupt: {source}")]
	CorruptStream {
		/// Codec label.
		codec: &'static str,
		/// Decoder error.
		source: std::io::Error,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
}

/// Coarse error categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
	/// Input ended mid-read.
	Truncated,
	/// Invalid bytes on decode, or an unencodable tree on encode.
	Malformed,
	/// Allocation failure.
	OutOfMemory,
	/// External compression layer failure.
	Compression,
	/// Filesystem or stream failure.
	Io,
}

impl NbtError {
	/// Map this error onto its coarse category.
	pub fn class(&self) -> ErrorClass {
		match self {
			Self::Io(_) => ErrorClass::Io,
			Self::UnexpectedEof { .. } => ErrorClass::Truncated,
			Self::InvalidRootKind { .. }
			| Self::InvalidKind { .. }
			| Self::NegativeLength { .. }
			| Self::DepthExceeded { .. }
			| Self::TrailingData { .. }
			| Self::StringTooLong { .. }
			| Self::SequenceTooLong { .. }
			| Self::InconsistentList { .. } => ErrorClass::Malformed,
			Self::OutOfMemory => ErrorClass::OutOfMemory,
			Self::UnknownMagic { .. } | Self::CorruptStream { .. } | Self::DecompressedTooLarge { .. } => ErrorClass::Compression,
		}
	}

	/// Convert a sink error, keeping allocation failures distinguishable.
	pub(crate) fn from_io(err: std::io::Error) -> Self {
		if err.kind() == std::io::ErrorKind::OutOfMemory {
			return Self::OutOfMemory;
		}
		Self::Io(err)
	}
}

impl From<std::collections::TryReserveError> for NbtError {
	fn from(_: std::collections::TryReserveError) -> Self {
		Self::OutOfMemory
	}
}
