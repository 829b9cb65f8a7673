//! File type support for the `allods-rs` project.

mod error;

pub mod bmp;
pub mod colorkey;
pub mod cursor;
pub mod loader;
pub mod palette;
pub mod rgba;
pub mod sprite;

// Re-export unified error type
pub use error::{CodecError, FileType};

pub use bmp::{BitDepth as BmpBitDepth, File as BmpFile, Header as BmpHeader};
pub use colorkey::{Colorkey, apply_colorkey};
pub use cursor::ByteCursor;
pub use loader::{ImageKind, load_image};
pub use palette::{Color, Palette};
pub use rgba::RgbaBuffer;
pub use sprite::{
	DecodeConfig, DroppedFrame, File as SpriteFile, Format as SpriteFormat, Frame as SpriteFrame,
	IndexAlpha,
};
