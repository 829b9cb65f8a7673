//! Sprite frame structures and utilities.
//!
//! A decoded frame keeps the raw `(index, alpha)` pair of every pixel. The
//! palette is applied on demand so that several renderers can share one
//! decode: [`Frame::resolve`] produces true color, while
//! [`Frame::to_index_alpha_bytes`] keeps the indices for a palette lookup on
//! the GPU.

use std::fmt;

use crate::file::{Color, Palette, RgbaBuffer};

/// One decoded sprite pixel: a palette index plus its own alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IndexAlpha {
	/// Palette index
	pub index: u8,
	/// Alpha (0 = transparent, 255 = opaque)
	pub alpha: u8,
}

impl IndexAlpha {
	/// Untouched pixel of a freshly allocated frame
	pub const TRANSPARENT: Self = Self::new(0, 0);

	/// Creates a new pixel.
	pub const fn new(index: u8, alpha: u8) -> Self {
		Self {
			index,
			alpha,
		}
	}

	/// Creates a fully opaque pixel.
	pub const fn opaque(index: u8) -> Self {
		Self::new(index, 255)
	}

	/// Looks up the palette color and replaces its alpha with the pixel's.
	#[inline]
	pub fn resolve(&self, palette: &Palette) -> Color {
		Color {
			a: self.alpha,
			..palette.get(self.index)
		}
	}
}

impl fmt::Display for IndexAlpha {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}@{}", self.index, self.alpha)
	}
}

/// Decoded sprite frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	width: u32,
	height: u32,
	pixels: Vec<IndexAlpha>,
}

impl Frame {
	/// Creates a frame from decoded pixels.
	///
	/// Returns `None` if `pixels` does not hold exactly `width * height` entries.
	pub fn new(width: u32, height: u32, pixels: Vec<IndexAlpha>) -> Option<Self> {
		if pixels.len() != width as usize * height as usize {
			return None;
		}
		Some(Self {
			width,
			height,
			pixels,
		})
	}

	/// Creates a fully transparent frame.
	pub fn new_empty(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			pixels: vec![IndexAlpha::TRANSPARENT; width as usize * height as usize],
		}
	}

	/// Returns the frame width.
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the frame height.
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the total number of pixels in this frame.
	#[inline]
	pub fn pixel_count(&self) -> usize {
		self.pixels.len()
	}

	/// Returns the raw decoded pixels in row-major order.
	#[inline]
	pub fn pixels(&self) -> &[IndexAlpha] {
		&self.pixels
	}

	/// Returns a mutable reference to the decoded pixels.
	#[inline]
	pub(crate) fn pixels_mut(&mut self) -> &mut [IndexAlpha] {
		&mut self.pixels
	}

	/// Gets the pixel at the specified coordinates, or `None` when out of bounds.
	pub fn get(&self, x: u32, y: u32) -> Option<IndexAlpha> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.pixels.get(y as usize * self.width as usize + x as usize).copied()
	}

	/// Returns an iterator over the rows of the frame.
	pub fn rows(&self) -> FrameRowIterator<'_> {
		FrameRowIterator::new(&self.pixels, self.width as usize)
	}

	/// Applies a palette, producing true color with the per-pixel alpha.
	pub fn resolve(&self, palette: &Palette) -> RgbaBuffer {
		let mut buffer = RgbaBuffer::new(self.width, self.height);
		for (dst, pixel) in
			buffer.as_bytes_mut().chunks_exact_mut(RgbaBuffer::CHANNELS).zip(&self.pixels)
		{
			dst.copy_from_slice(&pixel.resolve(palette).to_array());
		}
		buffer
	}

	/// Packs the frame as `[index, alpha, index, alpha, ...]`.
	pub fn to_index_alpha_bytes(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(|p| [p.index, p.alpha]).collect()
	}

	/// Renders the alpha channel over white.
	///
	/// `.16` frames carry no color; this is their natural true color form.
	pub fn to_alpha_mask(&self) -> RgbaBuffer {
		let mut buffer = RgbaBuffer::new(self.width, self.height);
		for (dst, pixel) in
			buffer.as_bytes_mut().chunks_exact_mut(RgbaBuffer::CHANNELS).zip(&self.pixels)
		{
			dst.copy_from_slice(&[255, 255, 255, pixel.alpha]);
		}
		buffer
	}

	/// Returns the number of pixels with a nonzero alpha.
	pub fn opaque_pixel_count(&self) -> usize {
		self.pixels.iter().filter(|p| p.alpha != 0).count()
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{}", self.width, self.height)
	}
}

/// Iterator over rows of pixels in a frame.
#[derive(Debug, Clone)]
pub struct FrameRowIterator<'a> {
	pixels: &'a [IndexAlpha],
	width: usize,
	current_row: usize,
	total_rows: usize,
}

impl<'a> FrameRowIterator<'a> {
	/// Creates a row iterator over `pixels` split into rows of `width`.
	pub fn new(pixels: &'a [IndexAlpha], width: usize) -> Self {
		let total_rows = if width > 0 {
			pixels.len() / width
		} else {
			0
		};

		Self {
			pixels,
			width,
			current_row: 0,
			total_rows,
		}
	}
}

impl<'a> Iterator for FrameRowIterator<'a> {
	type Item = &'a [IndexAlpha];

	fn next(&mut self) -> Option<Self::Item> {
		if self.current_row >= self.total_rows {
			return None;
		}

		let start = self.current_row * self.width;
		self.current_row += 1;

		self.pixels.get(start..start + self.width)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.total_rows - self.current_row;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for FrameRowIterator<'_> {}
