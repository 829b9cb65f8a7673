//! Color and 256-entry palette support.
//!
//! Every palette in the supported formats uses the same layout: 256 entries of
//! 4 bytes each, stored as blue, green, red and one unused byte. The 8-bit BMP
//! path and all sprite containers read it through [`Palette::read`].

use std::fmt;
use std::path::Path;

use crate::file::{ByteCursor, CodecError};

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Returns the color components packed as `0xRRGGBB`, ignoring alpha.
	pub const fn to_rgb24(&self) -> u32 {
		((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
	}

	/// Returns the color as `[r, g, b, a]`.
	pub const fn to_array(&self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Fixed 256-entry color lookup table.
///
/// Alpha is always 255; transparency comes from the per-pixel alpha of sprite
/// frames or from a colorkey, never from the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: [Color; 256],
}

impl Palette {
	/// Number of entries
	pub const COLOR_COUNT: usize = 256;

	/// Size of one stored entry (B, G, R, unused)
	pub const ENTRY_SIZE: usize = 4;

	/// Size of a stored palette in bytes
	pub const SIZE: usize = Self::COLOR_COUNT * Self::ENTRY_SIZE;

	/// Offset of the palette inside an 8-bit BMP with a 40-byte info header
	pub const BMP_OFFSET: usize = 0x36;

	/// Reads a palette at the cursor's current position.
	///
	/// Consumes exactly [`Palette::SIZE`] bytes.
	pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, CodecError> {
		let bytes = cursor.read_bytes(Self::SIZE)?;

		let mut colors = [Color::rgb(0, 0, 0); 256];
		for (color, bgrx) in colors.iter_mut().zip(bytes.chunks_exact(Self::ENTRY_SIZE)) {
			*color = Color::rgb(bgrx[2], bgrx[1], bgrx[0]);
		}

		Ok(Self {
			colors,
		})
	}

	/// Loads a palette stored at `offset` inside `data`.
	///
	/// Any file can serve as a palette source; use [`Palette::BMP_OFFSET`] to
	/// take the palette of an 8-bit BMP.
	pub fn from_bytes_at(data: &[u8], offset: usize, filename: &str) -> Result<Self, CodecError> {
		let mut cursor = ByteCursor::new(data, filename);
		cursor.seek(offset)?;
		Self::read(&mut cursor)
	}

	/// Loads a palette stored at `offset` inside the file at `path`.
	pub fn open(path: impl AsRef<Path>, offset: usize) -> Result<Self, CodecError> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		Self::from_bytes_at(&data, offset, &path.display().to_string())
	}

	/// Gets a color by index.
	#[inline]
	pub fn get(&self, index: u8) -> Color {
		self.colors[index as usize]
	}

	/// Returns a reference to the color array.
	#[inline]
	pub fn colors(&self) -> &[Color; 256] {
		&self.colors
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}

	/// Exports the palette as a 256×1 RGBA strip.
	///
	/// Renderers that resolve palette indices on the GPU upload this strip next
	/// to the packed index/alpha data of a frame.
	pub fn to_rgba_bytes(&self) -> Vec<u8> {
		self.colors.iter().flat_map(Color::to_array).collect()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Palette: {} colors", Self::COLOR_COUNT)
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[index as usize]
	}
}
