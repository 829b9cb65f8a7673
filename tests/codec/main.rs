//! Decoding tests for `allods-rs` built on synthetic assets.

mod assets;
mod bmp;
mod sprite;
