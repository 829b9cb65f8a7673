//! Sprite container support (`.256`, `.16a`, `.16`).
//!
//! A sprite container holds a sequence of run-length encoded frames, optionally
//! preceded by a palette shared by all of them.
//!
//! # File Structure
//!
//! | Offset    | Size  | Field         | Description                                  |
//! |-----------|-------|---------------|----------------------------------------------|
//! | 0x00      | 1024  | `palette`     | `.256` and `.16a` only, BGRX entries         |
//! | ...       | 12    | frame header  | `width`, `height`, `data_size` (u32 each)    |
//! | ...       | N     | frame data    | `data_size` bytes of runs, see [`rle`]       |
//! | ...       |       | ...           | next frame header                            |
//! | EOF - 4   | 4     | `frame_count` | Top bit is a legacy flag and is ignored      |
//!
//! The frame count sits in the last four bytes of the file. Each frame's data
//! ends at exactly `data_size` bytes after its header, regardless of how many
//! bytes its runs consume.
//!
//! # Formats
//!
//! | Extension | Palette | Encoding                        |
//! |-----------|---------|---------------------------------|
//! | `.256`    | yes     | [`Encoding::Indexed`]           |
//! | `.16a`    | yes     | [`Encoding::IndexedAlpha`]      |
//! | `.16`     | no      | [`Encoding::Alpha`]             |
//!
//! # Bounds
//!
//! Frames wider or taller than 512 pixels, or declaring more than 1 000 000
//! bytes of data, are dropped with a warning. The next header is then read
//! right after the rejected one. See [`DecodeConfig`].
//!
//! # Usage Examples
//!
//! ```no_run
//! use allods_types::file::sprite::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sprite = File::open("graphics/units/monsters/ogre/sprites.256")?;
//!
//! println!("{sprite}");
//! for (index, frame) in sprite.iter().enumerate() {
//!     println!("Frame #{index}: {frame}");
//! }
//!
//! if let Some(rgba) = sprite.first_frame_truecolor() {
//!     println!("First frame: {rgba}");
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::file::{ByteCursor, CodecError, Palette, RgbaBuffer};

mod config;
pub mod frame;
pub mod rle;

pub use config::DecodeConfig;
pub use frame::{Frame, FrameRowIterator, IndexAlpha};
pub use rle::Encoding;

/// Sprite container constants.
pub mod constants {
	/// Size of a frame header (`width`, `height`, `data_size`)
	pub const FRAME_HEADER_SIZE: usize = 12;

	/// Size of the trailing frame count
	pub const TRAILER_SIZE: usize = 4;

	/// Legacy flag bit of the trailing frame count
	pub const TRAILER_FLAG: u32 = 0x8000_0000;
}

/// Sprite container format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
	/// `.256`: palette, 8-bit indices
	Indexed256,
	/// `.16a`: palette, indices with 4-bit alpha
	IndexedAlpha16,
	/// `.16`: 4-bit alpha only, no palette
	Alpha16,
}

impl Format {
	/// Maps a file extension (without the dot, any case) to a format.
	pub fn from_extension(extension: &str) -> Option<Self> {
		match extension.to_ascii_lowercase().as_str() {
			"256" => Some(Self::Indexed256),
			"16a" => Some(Self::IndexedAlpha16),
			"16" => Some(Self::Alpha16),
			_ => None,
		}
	}

	/// Selects the format from the text after the last `.` of `filename`.
	///
	/// # Errors
	///
	/// Returns [`CodecError::UnknownFormat`] for any other extension.
	pub fn from_filename(filename: &str) -> Result<Self, CodecError> {
		let extension = filename.rsplit('.').next().unwrap_or(filename);
		Self::from_extension(extension).ok_or_else(|| CodecError::UnknownFormat {
			filename: filename.to_string(),
		})
	}

	/// Returns the canonical file extension.
	pub fn extension(self) -> &'static str {
		match self {
			Self::Indexed256 => "256",
			Self::IndexedAlpha16 => "16a",
			Self::Alpha16 => "16",
		}
	}

	/// Returns the pixel stream encoding of the frames.
	pub fn encoding(self) -> Encoding {
		match self {
			Self::Indexed256 => Encoding::Indexed,
			Self::IndexedAlpha16 => Encoding::IndexedAlpha,
			Self::Alpha16 => Encoding::Alpha,
		}
	}

	/// Returns `true` if the container starts with a palette.
	pub fn has_palette(self) -> bool {
		match self {
			Self::Indexed256 | Self::IndexedAlpha16 => true,
			Self::Alpha16 => false,
		}
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, ".{}", self.extension())
	}
}

/// Record of a frame dropped for exceeding the [`DecodeConfig`] bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DroppedFrame {
	/// Index of the frame in declaration order
	pub index: usize,
	/// Offset of the frame header
	pub offset: usize,
	/// Declared width
	pub width: u32,
	/// Declared height
	pub height: u32,
	/// Declared data size
	pub data_size: u32,
}

impl DroppedFrame {
	/// Builds the diagnostic reported for this frame.
	pub fn to_error(&self, filename: &str) -> CodecError {
		CodecError::FrameBoundsExceeded {
			filename: filename.to_string(),
			index: self.index,
			width: self.width,
			height: self.height,
			data_size: self.data_size,
		}
	}
}

impl fmt::Display for DroppedFrame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"#{} at {:#X}: {}×{}, {} bytes",
			self.index, self.offset, self.width, self.height, self.data_size
		)
	}
}

/// Decoded sprite container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	format: Format,
	palette: Option<Arc<Palette>>,
	frames: Vec<Frame>,
	declared_frame_count: u32,
	dropped: Vec<DroppedFrame>,
}

impl File {
	/// Decodes a container, selecting the format from the extension of
	/// `filename`.
	pub fn decode(data: &[u8], filename: &str) -> Result<Self, CodecError> {
		Self::decode_with_config(data, filename, &DecodeConfig::default())
	}

	/// Decodes a container with custom bounds.
	pub fn decode_with_config(
		data: &[u8],
		filename: &str,
		config: &DecodeConfig,
	) -> Result<Self, CodecError> {
		let format = Format::from_filename(filename)?;
		Self::decode_as(data, filename, format, config)
	}

	/// Decodes a container of a known format. `filename` is only used in
	/// diagnostics.
	///
	/// # Errors
	///
	/// A read past the end of `data` fails the whole container. A run that
	/// reads past its frame's declared size does not. Frames exceeding the
	/// bounds are not errors; they are listed by [`File::dropped_frames`].
	pub fn decode_as(
		data: &[u8],
		filename: &str,
		format: Format,
		config: &DecodeConfig,
	) -> Result<Self, CodecError> {
		let mut cursor = ByteCursor::new(data, filename);

		let Some(trailer) = data.len().checked_sub(constants::TRAILER_SIZE) else {
			return Err(CodecError::truncated(filename, 0, constants::TRAILER_SIZE, data.len()));
		};
		cursor.seek(trailer)?;
		let declared_frame_count = cursor.read_u32()? & !constants::TRAILER_FLAG;
		cursor.seek(0)?;

		let palette = if format.has_palette() && config.embedded_palette {
			Some(Arc::new(Palette::read(&mut cursor)?))
		} else {
			None
		};

		let capacity =
			(declared_frame_count as usize).min(cursor.remaining() / constants::FRAME_HEADER_SIZE);
		let mut frames = Vec::with_capacity(capacity);
		let mut dropped = Vec::new();

		for index in 0..declared_frame_count as usize {
			let offset = cursor.position();
			let width = cursor.read_u32()?;
			let height = cursor.read_u32()?;
			let data_size = cursor.read_u32()?;

			if !config.accepts(width, height, data_size) {
				let frame = DroppedFrame {
					index,
					offset,
					width,
					height,
					data_size,
				};
				warn!("{}", frame.to_error(filename));
				dropped.push(frame);
				continue;
			}

			let start = cursor.position();
			let frame = rle::decode_frame(format.encoding(), width, height, data_size, &mut cursor)?;
			cursor.seek(start + data_size as usize)?;
			trace!("{filename}: frame #{index} {frame} at {offset:#X}, {data_size} bytes");
			frames.push(frame);
		}

		debug!(
			"{filename}: {format} container, {} of {declared_frame_count} frames decoded, palette: {}",
			frames.len(),
			palette.is_some()
		);

		Ok(Self {
			format,
			palette,
			frames,
			declared_frame_count,
			dropped,
		})
	}

	/// Opens and decodes a container from the specified path.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, CodecError> {
		Self::open_with_config(path, &DecodeConfig::default())
	}

	/// Opens and decodes a container from the specified path with custom bounds.
	pub fn open_with_config(path: impl AsRef<Path>, config: &DecodeConfig) -> Result<Self, CodecError> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		Self::decode_with_config(&data, &path.display().to_string(), config)
	}

	/// Replaces the palette used by [`File::truecolor`].
	///
	/// `.16` containers and containers decoded without their embedded palette
	/// can be resolved against an external one this way.
	pub fn with_palette(mut self, palette: Arc<Palette>) -> Self {
		self.palette = Some(palette);
		self
	}

	/// Returns the container format.
	pub fn format(&self) -> Format {
		self.format
	}

	/// Returns the palette shared by all frames.
	pub fn palette(&self) -> Option<&Arc<Palette>> {
		self.palette.as_ref()
	}

	/// Returns the decoded frames in declaration order.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Consumes the container and returns its frames.
	pub fn into_frames(self) -> Vec<Frame> {
		self.frames
	}

	/// Returns the number of decoded frames.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns the frame count stored in the trailer.
	pub fn declared_frame_count(&self) -> u32 {
		self.declared_frame_count
	}

	/// Returns the frames dropped for exceeding the bounds.
	pub fn dropped_frames(&self) -> &[DroppedFrame] {
		&self.dropped
	}

	/// Gets a frame by index.
	pub fn get_frame(&self, index: usize) -> Option<&Frame> {
		self.frames.get(index)
	}

	/// Returns an iterator over all frames.
	pub fn iter(&self) -> FrameIterator<'_> {
		FrameIterator {
			file: self,
			current_index: 0,
		}
	}

	/// Resolves a frame to true color with the container palette.
	///
	/// Returns `None` if the index is out of range or there is no palette.
	pub fn truecolor(&self, index: usize) -> Option<RgbaBuffer> {
		let palette = self.palette.as_deref()?;
		self.frames.get(index).map(|frame| frame.resolve(palette))
	}

	/// Resolves the first frame, for containers used as a single texture.
	pub fn first_frame_truecolor(&self) -> Option<RgbaBuffer> {
		self.truecolor(0)
	}
}

impl fmt::Display for File {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} sprite: {} frames ({} declared, {} dropped), {}",
			self.format,
			self.frames.len(),
			self.declared_frame_count,
			self.dropped.len(),
			if self.palette.is_some() {
				"with palette"
			} else {
				"no palette"
			}
		)
	}
}

/// Iterator over frames in a sprite container.
#[derive(Debug, Clone)]
pub struct FrameIterator<'a> {
	file: &'a File,
	current_index: usize,
}

impl<'a> Iterator for FrameIterator<'a> {
	type Item = &'a Frame;

	fn next(&mut self) -> Option<Self::Item> {
		let frame = self.file.get_frame(self.current_index)?;
		self.current_index += 1;
		Some(frame)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.file.frames.len() - self.current_index;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for FrameIterator<'_> {}

impl<'a> IntoIterator for &'a File {
	type Item = &'a Frame;
	type IntoIter = FrameIterator<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
