//! Owned RGBA pixel buffer returned by the decoders.

use std::fmt;

use crate::file::{Color, Colorkey, colorkey};

/// Width × height array of RGBA pixels, row-major and top-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
	width: u32,
	height: u32,
	data: Vec<u8>,
}

impl RgbaBuffer {
	/// Bytes per pixel
	pub const CHANNELS: usize = 4;

	/// Creates a fully transparent buffer.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			data: vec![0; width as usize * height as usize * Self::CHANNELS],
		}
	}

	/// Wraps existing RGBA bytes.
	///
	/// Returns `None` if `data` is not exactly `width * height * 4` bytes long.
	pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
		if data.len() != width as usize * height as usize * Self::CHANNELS {
			return None;
		}
		Some(Self {
			width,
			height,
			data,
		})
	}

	/// Returns the width in pixels.
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the height in pixels.
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the number of pixels.
	#[inline]
	pub fn pixel_count(&self) -> usize {
		self.width as usize * self.height as usize
	}

	/// Returns the raw RGBA bytes.
	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	/// Returns the raw RGBA bytes mutably.
	#[inline]
	pub fn as_bytes_mut(&mut self) -> &mut [u8] {
		&mut self.data
	}

	/// Gets the pixel at `(x, y)`, or `None` when out of bounds.
	pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
		if x >= self.width || y >= self.height {
			return None;
		}
		let offset = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
		let p = &self.data[offset..offset + Self::CHANNELS];
		Some(Color::new(p[0], p[1], p[2], p[3]))
	}

	/// Sets the pixel at `(x, y)`.
	///
	/// Returns `false` when the coordinates are out of bounds.
	pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
		if x >= self.width || y >= self.height {
			return false;
		}
		let offset = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
		self.data[offset..offset + Self::CHANNELS].copy_from_slice(&color.to_array());
		true
	}

	/// Returns an iterator over all pixels in row-major order.
	pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
		self.data.chunks_exact(Self::CHANNELS).map(|p| Color::new(p[0], p[1], p[2], p[3]))
	}

	/// Makes every pixel matching `key` fully transparent.
	///
	/// Returns the number of pixels that were masked.
	pub fn apply_colorkey(&mut self, key: Colorkey) -> usize {
		colorkey::apply_colorkey(self, key)
	}

	/// Converts the buffer into an [`image::RgbaImage`].
	pub fn into_image(self) -> image::RgbaImage {
		let (width, height) = (self.width, self.height);
		image::RgbaImage::from_raw(width, height, self.data)
			.unwrap_or_else(|| image::RgbaImage::new(width, height))
	}
}

impl From<image::RgbaImage> for RgbaBuffer {
	fn from(image: image::RgbaImage) -> Self {
		let (width, height) = image.dimensions();
		Self {
			width,
			height,
			data: image.into_raw(),
		}
	}
}

impl fmt::Display for RgbaBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} RGBA", self.width, self.height)
	}
}
