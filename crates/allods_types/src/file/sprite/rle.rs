//! Run-length decoding of sprite frame pixel streams.
//!
//! ## Overview
//!
//! Every frame of a sprite container stores its pixels as a sequence of runs.
//! Each run starts with a control value holding a 2-bit opcode and a count:
//!
//! | Opcode   | Meaning                                          |
//! |----------|--------------------------------------------------|
//! | `0x4000` | Skip `count` whole rows (`count * width` pixels) |
//! | `0x8000` | Skip `count` pixels                              |
//! | `0xC000` | Skip `count` pixels                              |
//! | `0x0000` | Draw `count` pixels from the stream              |
//!
//! Skipped pixels keep their initial value `(index 0, alpha 0)`. The raster
//! position advances left to right and wraps to the next row at the frame
//! width.
//!
//! ## Encodings
//!
//! | Encoding                     | Container | Control                        | Draw payload            |
//! |------------------------------|-----------|--------------------------------|-------------------------|
//! | [`Encoding::Indexed`]        | `.256`    | byte `b`, `(b \| b<<8) & 0xC03F` | one index byte per pixel |
//! | [`Encoding::IndexedAlpha`]   | `.16a`    | `u16 & 0xC0FF`                 | one `u16` per pixel     |
//! | [`Encoding::Alpha`]          | `.16`     | as `.256`                      | one byte per two pixels |
//!
//! ### `.16a` pixel word
//!
//! Bits 9-12 hold a 4-bit alpha that is expanded to 8 bits by repeating the
//! nibble. The palette index takes its top bit from bit 8 and its low seven
//! bits from bits 1-7:
//!
//! ```text
//! alpha = ((hi >> 9) & 0x0F) + ((hi >> 5) & 0xF0)      where hi = word & 0xFF00
//! index = ((hi >> 1) + ((word & 0xFF) >> 1)) & 0xFF
//! ```
//!
//! ### `.16` alpha byte
//!
//! Each byte holds two 4-bit alphas, low nibble first. Both are expanded to
//! 8 bits by repeating the nibble. The high nibble of the last byte of a run
//! is padding when it is zero and produces no pixel. The palette index of
//! every drawn pixel is 255.
//!
//! The decoder runs while the frame's declared data size has bytes left,
//! charging each control value and draw payload against it. The last run may
//! read past the declared size; the container resumes after the declared size
//! regardless.

use std::fmt;

use crate::file::ByteCursor;
use crate::file::CodecError;

use super::frame::{Frame, IndexAlpha};

mod opcodes {
	/// Mask selecting the opcode bits of a control value
	pub const MASK: u16 = 0xC000;

	/// Skip whole rows
	pub const SKIP_ROWS: u16 = 0x4000;

	/// Draw pixels from the stream
	pub const DRAW: u16 = 0x0000;

	/// Count mask of the byte-sized control values
	pub const BYTE_COUNT_MASK: u16 = 0x3F;

	/// Count mask of the word-sized control values
	pub const WORD_COUNT_MASK: u16 = 0xFF;
}

/// Palette index assigned to every pixel of an alpha-only frame
pub const ALPHA_ONLY_INDEX: u8 = 255;

/// Pixel stream encoding of a sprite frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
	/// One palette index per pixel, fully opaque (`.256`)
	Indexed,
	/// Palette index with a 4-bit alpha packed in a word (`.16a`)
	IndexedAlpha,
	/// Two 4-bit alphas per byte, no color (`.16`)
	Alpha,
}

impl Encoding {
	/// Returns the size of a control value in bytes.
	pub fn control_size(self) -> usize {
		match self {
			Self::Indexed | Self::Alpha => 1,
			Self::IndexedAlpha => 2,
		}
	}

	/// Returns the bytes a draw run is charged per unit of its count.
	///
	/// An [`Encoding::Alpha`] byte carries up to two pixels but is charged once.
	pub fn pixel_size(self) -> usize {
		match self {
			Self::Indexed | Self::Alpha => 1,
			Self::IndexedAlpha => 2,
		}
	}
}

impl fmt::Display for Encoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Indexed => write!(f, "8-bit indexed"),
			Self::IndexedAlpha => write!(f, "indexed with 4-bit alpha"),
			Self::Alpha => write!(f, "4-bit alpha"),
		}
	}
}

/// A decoded control value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
	SkipRows(usize),
	SkipPixels(usize),
	Draw(usize),
}

/// Write position inside a frame.
///
/// Pixels written past the end of the frame are discarded.
struct Raster<'f> {
	pixels: &'f mut [IndexAlpha],
	width: usize,
	position: usize,
}

impl<'f> Raster<'f> {
	fn new(pixels: &'f mut [IndexAlpha], width: usize) -> Self {
		Self {
			pixels,
			width,
			position: 0,
		}
	}

	/// Moves the position `count` pixels forward, wrapping at the row end.
	#[inline]
	fn advance(&mut self, count: usize) {
		self.position = self.position.saturating_add(count);
	}

	#[inline]
	fn put(&mut self, pixel: IndexAlpha) {
		if let Some(dst) = self.pixels.get_mut(self.position) {
			*dst = pixel;
		}
		self.position = self.position.saturating_add(1);
	}

	fn skip_rows(&mut self, rows: usize) {
		self.advance(rows.saturating_mul(self.width));
	}
}

/// State of one frame decode
struct RleDecoder<'c, 'a, 'f> {
	encoding: Encoding,
	cursor: &'c mut ByteCursor<'a>,
	raster: Raster<'f>,
	/// Declared bytes not yet charged, negative once a run overshoots
	remaining: i64,
}

impl RleDecoder<'_, '_, '_> {
	fn read_run(&mut self) -> Result<Run, CodecError> {
		let control = match self.encoding {
			Encoding::Indexed | Encoding::Alpha => {
				let b = u16::from(self.cursor.read_u8()?);
				(b | (b << 8)) & (opcodes::MASK | opcodes::BYTE_COUNT_MASK)
			}
			Encoding::IndexedAlpha => {
				self.cursor.read_u16()? & (opcodes::MASK | opcodes::WORD_COUNT_MASK)
			}
		};
		self.remaining -= self.encoding.control_size() as i64;

		let count = usize::from(control & !opcodes::MASK);
		Ok(match control & opcodes::MASK {
			opcodes::DRAW => Run::Draw(count),
			opcodes::SKIP_ROWS => Run::SkipRows(count),
			_ => Run::SkipPixels(count),
		})
	}

	fn draw(&mut self, count: usize) -> Result<(), CodecError> {
		match self.encoding {
			Encoding::Indexed => {
				for &index in self.cursor.read_bytes(count)? {
					self.raster.put(IndexAlpha::opaque(index));
				}
			}
			Encoding::IndexedAlpha => {
				for _ in 0..count {
					let word = self.cursor.read_u16()?;
					self.raster.put(unpack_index_alpha(word));
				}
			}
			Encoding::Alpha => {
				let bytes = self.cursor.read_bytes(count)?;
				for (i, &byte) in bytes.iter().enumerate() {
					let low = byte & 0x0F;
					self.raster.put(IndexAlpha::new(ALPHA_ONLY_INDEX, low | (low << 4)));

					let high = byte & 0xF0;
					if i + 1 < count || high != 0 {
						self.raster.put(IndexAlpha::new(ALPHA_ONLY_INDEX, high | (high >> 4)));
					}
				}
			}
		}
		self.remaining -= (count * self.encoding.pixel_size()) as i64;
		Ok(())
	}

	fn run(mut self) -> Result<(), CodecError> {
		while self.remaining > 0 {
			match self.read_run()? {
				Run::SkipRows(rows) => self.raster.skip_rows(rows),
				Run::SkipPixels(count) => self.raster.advance(count),
				Run::Draw(count) => self.draw(count)?,
			}
		}
		Ok(())
	}
}

/// Unpacks a `.16a` pixel word.
#[inline]
pub fn unpack_index_alpha(word: u16) -> IndexAlpha {
	let hi = word & 0xFF00;
	let alpha = ((hi >> 9) & 0x0F) + ((hi >> 5) & 0xF0);
	let index = ((hi >> 1) + ((word & 0x00FF) >> 1)) & 0xFF;
	IndexAlpha::new(index as u8, alpha as u8)
}

/// Decodes a frame of `width` × `height` pixels whose runs are declared to
/// span `data_size` bytes starting at the cursor position.
///
/// Runs are read until `data_size` is used up. The last run may overshoot
/// it, so the cursor can end up past the declared size; callers position the
/// cursor for the next frame themselves.
///
/// # Errors
///
/// Returns [`CodecError::TruncatedInput`] if a run reads past the end of the
/// cursor's buffer.
pub fn decode_frame(
	encoding: Encoding,
	width: u32,
	height: u32,
	data_size: u32,
	cursor: &mut ByteCursor<'_>,
) -> Result<Frame, CodecError> {
	let mut frame = Frame::new_empty(width, height);

	RleDecoder {
		encoding,
		cursor,
		raster: Raster::new(frame.pixels_mut(), width as usize),
		remaining: i64::from(data_size),
	}
	.run()?;

	Ok(frame)
}
