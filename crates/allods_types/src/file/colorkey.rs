//! Colorkey transparency.
//!
//! Legacy images have no alpha channel; one designated RGB value marks the
//! transparent pixels instead.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::{Color, RgbaBuffer};

/// 24-bit RGB value treated as transparent, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Colorkey(u32);

impl Colorkey {
	/// Creates a colorkey from `0xRRGGBB`. Bits above 24 are ignored.
	pub const fn new(rgb: u32) -> Self {
		Self(rgb & 0x00FF_FFFF)
	}

	/// Creates a colorkey from separate components.
	pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(Color::rgb(r, g, b).to_rgb24())
	}

	/// Returns the key as `0xRRGGBB`.
	#[inline]
	pub const fn rgb(&self) -> u32 {
		self.0
	}

	/// Returns `true` if the RGB part of `color` equals the key.
	#[inline]
	pub const fn matches(&self, color: Color) -> bool {
		color.to_rgb24() == self.0
	}
}

impl From<u32> for Colorkey {
	fn from(rgb: u32) -> Self {
		Self::new(rgb)
	}
}

impl From<Colorkey> for u32 {
	fn from(key: Colorkey) -> Self {
		key.0
	}
}

impl fmt::Display for Colorkey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:06X}", self.0)
	}
}

/// Zeroes the alpha of every pixel whose R, G and B equal `key`.
///
/// Alpha takes no part in the comparison. Returns the number of pixels masked.
pub fn apply_colorkey(buffer: &mut RgbaBuffer, key: Colorkey) -> usize {
	let mut masked = 0;
	for pixel in buffer.as_bytes_mut().chunks_exact_mut(RgbaBuffer::CHANNELS) {
		if key.matches(Color::new(pixel[0], pixel[1], pixel[2], pixel[3])) {
			pixel[3] = 0;
			masked += 1;
		}
	}
	masked
}
