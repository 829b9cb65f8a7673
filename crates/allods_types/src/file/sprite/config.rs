//! Decode configuration for sprite containers.
//!
//! This module provides the sanity bounds applied to every frame header and
//! the switch controlling whether a container's embedded palette is read.

use serde::{Deserialize, Serialize};

/// Configuration for decoding sprite containers.
///
/// A frame whose header exceeds any bound is dropped with a warning instead of
/// failing the whole container. The bounds also cap the memory a single frame
/// may allocate.
///
/// # Presets
///
/// - `default()`: 512×512 frames, 1 000 000 bytes of pixel data, embedded palette read
/// - `without_palette()`: same bounds, containers are treated as palette-less
///
/// # Examples
///
/// ```
/// use allods_types::file::sprite::DecodeConfig;
///
/// let config = DecodeConfig::default();
/// assert!(config.accepts(512, 512, 1_000_000));
/// assert!(!config.accepts(600, 1, 0));
///
/// // Frames of a `.256` whose palette comes from elsewhere
/// let config = DecodeConfig::without_palette();
/// assert!(!config.embedded_palette);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
	/// Maximum frame width in pixels
	pub max_width: u32,
	/// Maximum frame height in pixels
	pub max_height: u32,
	/// Maximum declared size of a frame's pixel stream in bytes
	pub max_data_size: u32,
	/// Read the palette stored at the start of `.256` and `.16a` containers
	pub embedded_palette: bool,
}

impl Default for DecodeConfig {
	fn default() -> Self {
		Self {
			max_width: 512,
			max_height: 512,
			max_data_size: 1_000_000,
			embedded_palette: true,
		}
	}
}

impl DecodeConfig {
	/// Create a configuration with custom frame bounds.
	///
	/// # Arguments
	/// * `max_width` - Maximum frame width
	/// * `max_height` - Maximum frame height
	/// * `max_data_size` - Maximum pixel stream size
	pub fn new(max_width: u32, max_height: u32, max_data_size: u32) -> Self {
		Self {
			max_width,
			max_height,
			max_data_size,
			..Self::default()
		}
	}

	/// Create a configuration that never reads an embedded palette.
	///
	/// Containers decoded this way start directly with the first frame header.
	pub fn without_palette() -> Self {
		Self {
			embedded_palette: false,
			..Self::default()
		}
	}

	/// Returns `true` if a frame header lies within the bounds.
	#[inline]
	pub fn accepts(&self, width: u32, height: u32, data_size: u32) -> bool {
		width <= self.max_width && height <= self.max_height && data_size <= self.max_data_size
	}
}
