//! Seekable little-endian reader over an in-memory buffer.
//!
//! All legacy formats handled by this crate store multi-byte values in
//! little-endian order. [`ByteCursor`] reads them independently of the host
//! byte order and reports any access past the end of the buffer as
//! [`CodecError::TruncatedInput`], tagged with the file name given at
//! construction.

use crate::file::CodecError;

/// Sequential reader with absolute seek support.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
	data: &'a [u8],
	pos: usize,
	filename: &'a str,
}

impl<'a> ByteCursor<'a> {
	/// Creates a cursor positioned at the start of `data`.
	///
	/// `filename` is only used in error messages.
	pub fn new(data: &'a [u8], filename: &'a str) -> Self {
		Self {
			data,
			pos: 0,
			filename,
		}
	}

	/// Returns the file name used in diagnostics.
	#[inline]
	pub fn filename(&self) -> &'a str {
		self.filename
	}

	/// Returns the total length of the underlying buffer.
	#[inline]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Returns `true` if the underlying buffer is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Returns the current read position.
	#[inline]
	pub fn position(&self) -> usize {
		self.pos
	}

	/// Returns the number of bytes left after the current position.
	#[inline]
	pub fn remaining(&self) -> usize {
		self.data.len() - self.pos
	}

	fn truncated(&self, needed: usize) -> CodecError {
		CodecError::truncated(self.filename, self.pos, needed, self.remaining())
	}

	/// Moves the read position to `pos`.
	///
	/// Seeking exactly to the end is allowed; seeking past it fails.
	pub fn seek(&mut self, pos: usize) -> Result<(), CodecError> {
		if pos > self.data.len() {
			return Err(CodecError::truncated(
				self.filename,
				self.data.len(),
				pos - self.data.len(),
				0,
			));
		}
		self.pos = pos;
		Ok(())
	}

	/// Advances the read position by `count` bytes.
	pub fn skip(&mut self, count: usize) -> Result<(), CodecError> {
		if count > self.remaining() {
			return Err(self.truncated(count));
		}
		self.pos += count;
		Ok(())
	}

	/// Borrows the next `count` bytes and advances past them.
	pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], CodecError> {
		if count > self.remaining() {
			return Err(self.truncated(count));
		}
		let bytes = &self.data[self.pos..self.pos + count];
		self.pos += count;
		Ok(bytes)
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
		let bytes = self.read_bytes(N)?;
		let mut array = [0u8; N];
		array.copy_from_slice(bytes);
		Ok(array)
	}

	/// Reads one byte.
	pub fn read_u8(&mut self) -> Result<u8, CodecError> {
		let [value] = self.read_array::<1>()?;
		Ok(value)
	}

	/// Reads a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16, CodecError> {
		self.read_array().map(u16::from_le_bytes)
	}

	/// Reads a little-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16, CodecError> {
		self.read_array().map(i16::from_le_bytes)
	}

	/// Reads a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32, CodecError> {
		self.read_array().map(u32::from_le_bytes)
	}

	/// Reads a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32, CodecError> {
		self.read_array().map(i32::from_le_bytes)
	}
}
