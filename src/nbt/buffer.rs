use std::io;

use crate::nbt::{NbtError, Result};

/// Capacity allocated on first use.
pub const INITIAL_CAPACITY: usize = 1024;

/// Append-only byte sink with geometric growth.
///
/// Storage is allocated lazily. When growth fails the buffer releases its storage
/// and reports [`NbtError::OutOfMemory`], so it is always empty or fully valid.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
	data: Vec<u8>,
}

impl Buffer {
	/// Create an empty buffer without allocating.
	pub fn new() -> Self {
		Self { data: Vec::new() }
	}

	/// Bytes appended so far.
	pub fn as_slice(&self) -> &[u8] {
		&self.data
	}

	/// Number of bytes appended so far.
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Whether no bytes have been appended.
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Allocated capacity.
	pub fn capacity(&self) -> usize {
		self.data.capacity()
	}

	/// Ensure room for at least `total` bytes, doubling from [`INITIAL_CAPACITY`].
	pub fn reserve(&mut self, total: usize) -> Result<()> {
		if self.data.capacity() >= total {
			return Ok(());
		}

		let mut cap = self.data.capacity().max(INITIAL_CAPACITY);
		while cap < total {
			cap = match cap.checked_mul(2) {
				Some(next) => next,
				None => total,
			};
		}

		if self.data.try_reserve_exact(cap - self.data.len()).is_err() {
			self.data = Vec::new();
			return Err(NbtError::OutOfMemory);
		}
		Ok(())
	}

	/// Copy `bytes` onto the end of the buffer.
	pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
		let total = self.data.len().checked_add(bytes.len()).ok_or(NbtError::OutOfMemory)?;
		self.reserve(total)?;
		self.data.extend_from_slice(bytes);
		Ok(())
	}

	/// Take ownership of the accumulated bytes.
	pub fn into_vec(self) -> Vec<u8> {
		self.data
	}
}

/// Copy `bytes` into a fresh vector, reporting allocation failure instead of aborting.
pub(crate) fn try_copy(bytes: &[u8]) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	out.try_reserve_exact(bytes.len())?;
	out.extend_from_slice(bytes);
	Ok(out)
}

impl io::Write for Buffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.append(buf).map_err(|_| io::Error::from(io::ErrorKind::OutOfMemory))?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}
