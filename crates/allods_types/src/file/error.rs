//! Error types for decoding legacy image and sprite files.

use std::fmt;

use thiserror::Error;

/// File type tag carried by errors, used to build readable diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// Restricted BMP variant
	Bmp,
	/// Standalone 256-entry palette
	Palette,
	/// Multi-frame sprite container (`.256`, `.16a`, `.16`)
	Sprite,
	/// Standard image format decoded through the `image` crate
	Image,
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bmp => write!(f, "BMP"),
			Self::Palette => write!(f, "palette"),
			Self::Sprite => write!(f, "sprite"),
			Self::Image => write!(f, "image"),
		}
	}
}

/// Errors that can occur while decoding an asset.
///
/// Every variant names the offending file so the message can be shown to a
/// user as-is.
#[derive(Debug, Error)]
pub enum CodecError {
	/// A read or seek went past the end of the buffer
	#[error(
		"\"{filename}\": truncated input, needed {needed} bytes at offset {offset} but only {available} available"
	)]
	TruncatedInput {
		/// Name of the file being decoded
		filename: String,
		/// Absolute offset of the failed access
		offset: usize,
		/// Number of bytes requested
		needed: usize,
		/// Number of bytes left at `offset`
		available: usize,
	},

	/// Bad magic or otherwise unrecognizable content
	#[error("\"{filename}\" is not a valid {file_type} file: {reason}")]
	InvalidFormat {
		/// Kind of file that was expected
		file_type: FileType,
		/// Name of the file being decoded
		filename: String,
		/// What was wrong
		reason: String,
	},

	/// Recognized header version or bit depth that is not implemented
	#[error("\"{filename}\": unsupported {file_type} variant: {reason}")]
	UnsupportedVariant {
		/// Kind of file being decoded
		file_type: FileType,
		/// Name of the file being decoded
		filename: String,
		/// Which variant was found
		reason: String,
	},

	/// The filename extension does not map to a sprite container format
	#[error("Couldn't load \"{filename}\" (unknown extension)")]
	UnknownFormat {
		/// Name of the file being decoded
		filename: String,
	},

	/// A sprite frame header exceeds the sanity bounds.
	///
	/// This error is recoverable: the container decoder logs it and drops the
	/// frame instead of returning it.
	#[error(
		"Invalid sprite \"{filename}\": frame #{index} ({width}x{height}, {data_size} bytes) exceeds bounds"
	)]
	FrameBoundsExceeded {
		/// Name of the file being decoded
		filename: String,
		/// Index of the frame in declaration order
		index: usize,
		/// Declared frame width
		width: u32,
		/// Declared frame height
		height: u32,
		/// Declared size of the frame's pixel stream
		data_size: u32,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl CodecError {
	/// Creates a [`CodecError::InvalidFormat`] error.
	pub fn invalid_format(
		file_type: FileType,
		filename: impl Into<String>,
		reason: impl Into<String>,
	) -> Self {
		Self::InvalidFormat {
			file_type,
			filename: filename.into(),
			reason: reason.into(),
		}
	}

	/// Creates a [`CodecError::UnsupportedVariant`] error.
	pub fn unsupported(
		file_type: FileType,
		filename: impl Into<String>,
		reason: impl Into<String>,
	) -> Self {
		Self::UnsupportedVariant {
			file_type,
			filename: filename.into(),
			reason: reason.into(),
		}
	}

	/// Creates a [`CodecError::TruncatedInput`] error.
	pub fn truncated(
		filename: impl Into<String>,
		offset: usize,
		needed: usize,
		available: usize,
	) -> Self {
		Self::TruncatedInput {
			filename: filename.into(),
			offset,
			needed,
			available,
		}
	}

	/// Returns `true` if decoding may continue after this error.
	///
	/// Only [`CodecError::FrameBoundsExceeded`] is recoverable.
	pub fn is_recoverable(&self) -> bool {
		matches!(self, Self::FrameBoundsExceeded { .. })
	}
}
