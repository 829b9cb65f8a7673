//! Single-image loading for both legacy BMPs and standard formats.
//!
//! Interface graphics ship either as restricted BMPs handled by [`bmp`] or as
//! ordinary images (PNG, ...) that any decoder understands. Both paths end in
//! an [`RgbaBuffer`] with an optional colorkey applied.
//!
//! [`bmp`]: crate::file::bmp

use log::debug;

use crate::file::{BmpFile, CodecError, Colorkey, FileType, RgbaBuffer};

/// Decoder used by [`load_image`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageKind {
	/// Restricted BMP decoded by [`BmpFile`]
	#[default]
	Legacy,
	/// Any format supported by the `image` crate
	Standard,
}

impl ImageKind {
	/// Picks [`ImageKind::Legacy`] for `.bmp` files and
	/// [`ImageKind::Standard`] for everything else.
	pub fn from_filename(filename: &str) -> Self {
		match filename.rsplit_once('.') {
			Some((_, ext)) if ext.eq_ignore_ascii_case("bmp") => Self::Legacy,
			_ => Self::Standard,
		}
	}
}

/// Decodes a single image and applies `colorkey` if given.
///
/// `filename` is only used in diagnostics.
///
/// # Errors
///
/// Legacy images fail as described in [`BmpFile::decode`]. Standard images
/// the `image` crate cannot decode fail with [`CodecError::InvalidFormat`].
pub fn load_image(
	data: &[u8],
	filename: &str,
	kind: ImageKind,
	colorkey: Option<Colorkey>,
) -> Result<RgbaBuffer, CodecError> {
	let mut buffer = match kind {
		ImageKind::Legacy => BmpFile::decode(data, filename)?.into_pixels(),
		ImageKind::Standard => image::load_from_memory(data)
			.map_err(|e| CodecError::invalid_format(FileType::Image, filename, e.to_string()))?
			.into_rgba8()
			.into(),
	};

	if let Some(key) = colorkey {
		let masked = buffer.apply_colorkey(key);
		debug!("{filename}: colorkey {key} masked {masked} pixels");
	}

	Ok(buffer)
}
