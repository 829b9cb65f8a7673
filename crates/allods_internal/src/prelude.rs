//! Prelude module for `allods_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use allods_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let config = DecodeConfig::default();
//! let result = SpriteFile::decode(&[0, 0, 0, 0], "empty.16");
//! assert_eq!(result.map(|s| s.frame_count()).ok(), Some(0));
//! ```

// Re-export everything from allods_types::prelude
#[doc(inline)]
pub use allods_types::prelude::*;

// Re-export the entire allods_types module for advanced usage
#[doc(inline)]
pub use allods_types;
