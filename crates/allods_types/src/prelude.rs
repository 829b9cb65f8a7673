//! Prelude module for `allods_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use allods_types::prelude::*;
//!
//! let config = DecodeConfig::without_palette();
//! let key = Colorkey::from_rgb(0xFF, 0x00, 0xFF);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// BMP types
	BmpBitDepth,
	BmpFile,
	BmpHeader,

	// Shared types
	ByteCursor,
	CodecError,
	Color,
	Colorkey,
	FileType,
	Palette,
	RgbaBuffer,
	apply_colorkey,

	// Loader
	ImageKind,
	load_image,

	// Sprite types
	DecodeConfig,
	DroppedFrame,
	IndexAlpha,
	SpriteFile,
	SpriteFormat,
	SpriteFrame,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
