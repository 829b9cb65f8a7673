//! This crate provides the decoders for the legacy image and sprite formats of
//! the `allods-rs` project.
//!
//! # File Formats
//!
//! - **BMP**: Restricted uncompressed bitmaps (8, 24 and 32 bits per pixel)
//! - **Palette**: 256-entry color tables, standalone or embedded in other files
//! - **Sprite containers**: Run-length encoded frames in `.256`, `.16a` and `.16` files
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use allods_types::prelude::*;
//!
//! # fn main() -> Result<(), CodecError> {
//! let data = std::fs::read("graphics/units/heroes/hero.256")?;
//! let sprite = SpriteFile::decode(&data, "hero.256")?;
//! for frame in &sprite {
//!     println!("{frame}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use allods_types::file::{Colorkey, bmp};
//!
//! # fn main() -> Result<(), allods_types::file::CodecError> {
//! let bmp = bmp::File::open("graphics/mainmenu/menu_.bmp")?;
//! let mut pixels = bmp.into_pixels();
//! pixels.apply_colorkey(Colorkey::new(0xFF00FF));
//! # Ok(())
//! # }
//! ```

pub mod file;

/// `use allods_types::prelude::*;` to import commonly used items.
pub mod prelude;
