//! This module is separated into its own crate to keep the public facade thin, and should not be used directly.

/// `use allods_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export allods_types for convenience
pub use allods_types;

// Re-export commonly used types at crate root
pub use allods_types::file::{
	BmpFile, CodecError, Colorkey, DecodeConfig, ImageKind, Palette, RgbaBuffer, SpriteFile,
	SpriteFormat, load_image,
};
