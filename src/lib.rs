#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `allods-rs` decodes the image and sprite assets of a 1990s tile-based
//! strategy/RPG engine so they can be used on modern platforms.
//!
pub use allods_internal::*;
