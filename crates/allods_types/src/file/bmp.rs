//! `.BMP` file format support.
//!
//! Only the subset of BMP written by the game's asset tools is supported:
//! uncompressed images with a 40-byte `BITMAPINFOHEADER` and a bit depth of
//! 8, 24 or 32.
//!
//! ## File Format
//!
//! | Offset | Size | Field          | Description                                |
//! |--------|------|----------------|--------------------------------------------|
//! | 0x00   | 2    | `signature`    | "BM" (0x42, 0x4D)                          |
//! | 0x0A   | 4    | `pixel_offset` | Offset of the pixel data                   |
//! | 0x0E   | 4    | `header_size`  | Must be 40 (12 = OS/2 core header)         |
//! | 0x12   | 4    | `width`        | Signed width in pixels                     |
//! | 0x16   | 4    | `height`       | Signed height in pixels                    |
//! | 0x1A   | 2    | `planes`       | Ignored                                    |
//! | 0x1C   | 2    | `bit_count`    | 8, 24 or 32                                |
//! | 0x1E   | 24   | ...            | Compression, sizes, resolution (ignored)   |
//! | 0x36   | 1024 | `palette`      | 8-bit images only, BGRX entries            |
//!
//! Rows are stored bottom-up with a stride of exactly `width * bytes_per_pixel`
//! (the writer never padded rows to 4 bytes). The decoder always returns a
//! top-down buffer with alpha set to 255.
//!
//! ## Example
//!
//! ```no_run
//! use allods_types::file::{Colorkey, bmp::File};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("graphics/mainmenu/menu_.bmp")?;
//! let bmp = File::decode_with_colorkey(&data, "menu_.bmp", Colorkey::new(0xFF00FF))?;
//! println!("{}", bmp.header());
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;
use std::path::Path;

use log::debug;

use crate::file::{ByteCursor, CodecError, Color, Colorkey, FileType, Palette, RgbaBuffer};

mod constants {
	/// Signature bytes for `.BMP` files
	pub const SIGNATURE: [u8; 2] = [0x42, 0x4D]; // "BM"

	/// Offset of the pixel data offset field in the file header
	pub const PIXEL_OFFSET_FIELD: usize = 0x0A;

	/// Header size of the OS/2 `BITMAPCOREHEADER`
	pub const CORE_HEADER_SIZE: u32 = 12;

	/// Header size of `BITMAPINFOHEADER`
	pub const INFO_HEADER_SIZE: u32 = 40;

	/// Compression, image size, resolution and color count fields
	pub const SKIPPED_FIELDS_SIZE: usize = 24;
}

/// Supported pixel layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
	/// One palette index per pixel
	Indexed8,
	/// B, G, R
	Bgr24,
	/// B, G, R, unused
	Bgrx32,
}

impl BitDepth {
	/// Maps a header bit count to a supported layout.
	pub fn from_bit_count(bit_count: i16) -> Option<Self> {
		match bit_count {
			8 => Some(Self::Indexed8),
			24 => Some(Self::Bgr24),
			32 => Some(Self::Bgrx32),
			_ => None,
		}
	}

	/// Returns the number of stored bytes per pixel.
	pub fn bytes_per_pixel(self) -> usize {
		match self {
			Self::Indexed8 => 1,
			Self::Bgr24 => 3,
			Self::Bgrx32 => 4,
		}
	}

	/// Returns the bit count as written in the header.
	pub fn bit_count(self) -> u16 {
		self.bytes_per_pixel() as u16 * 8
	}
}

/// Parsed `.BMP` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	pixel_offset: u32,
	width: u32,
	height: u32,
	bit_depth: BitDepth,
}

impl Header {
	/// Size of the file header plus the info header
	pub const SIZE: usize = 14 + constants::INFO_HEADER_SIZE as usize;

	/// Returns the offset of the pixel data.
	pub fn pixel_offset(&self) -> u32 {
		self.pixel_offset
	}

	/// Returns the width of the image in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the height of the image in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the pixel layout.
	pub fn bit_depth(&self) -> BitDepth {
		self.bit_depth
	}

	/// Returns the stored size of one pixel row in bytes.
	pub fn row_stride(&self) -> usize {
		(self.width as usize).saturating_mul(self.bit_depth.bytes_per_pixel())
	}

	/// Parses the header, leaving the cursor right after it.
	pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, CodecError> {
		let filename = cursor.filename();

		// Too short to hold a signature is still the wrong format
		let reason = match cursor.read_bytes(constants::SIGNATURE.len()) {
			Ok(signature) if signature == constants::SIGNATURE => None,
			Ok(signature) => Some(format!("bad signature {signature:02X?}")),
			Err(_) => Some(format!("missing signature, {} bytes", cursor.len())),
		};
		if let Some(reason) = reason {
			return Err(CodecError::invalid_format(FileType::Bmp, filename, reason));
		}

		cursor.seek(constants::PIXEL_OFFSET_FIELD)?;
		let pixel_offset = cursor.read_u32()?;

		let header_size = cursor.read_u32()?;
		if header_size == constants::CORE_HEADER_SIZE {
			return Err(CodecError::unsupported(
				FileType::Bmp,
				filename,
				"CORE BMP images not supported",
			));
		}
		if header_size != constants::INFO_HEADER_SIZE {
			return Err(CodecError::unsupported(
				FileType::Bmp,
				filename,
				format!("version {header_size} is not supported"),
			));
		}

		let width = cursor.read_i32()?;
		let height = cursor.read_i32()?;
		cursor.skip(2)?; // planes
		let bit_count = cursor.read_i16()?;
		cursor.skip(constants::SKIPPED_FIELDS_SIZE)?;

		let Some(bit_depth) = BitDepth::from_bit_count(bit_count) else {
			return Err(CodecError::unsupported(
				FileType::Bmp,
				filename,
				format!("bad bit count: {bit_count}"),
			));
		};

		let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
			return Err(CodecError::unsupported(
				FileType::Bmp,
				filename,
				format!("negative dimensions {width}x{height}"),
			));
		};

		Ok(Self {
			pixel_offset,
			width,
			height,
			bit_depth,
		})
	}
}

impl Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			".BMP Header:\n\
			- Pixel Data Offset: {} bytes\n\
			- Width: {} pixels\n\
			- Height: {} pixels\n\
			- Bit Depth: {}",
			self.pixel_offset,
			self.width,
			self.height,
			self.bit_depth.bit_count(),
		)
	}
}

/// Representation of a decoded `.BMP` file
#[derive(Debug, Clone)]
pub struct File {
	header: Header,
	palette: Option<Palette>,
	pixels: RgbaBuffer,
}

impl File {
	/// Returns the parsed header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the embedded palette of an 8-bit image.
	pub fn palette(&self) -> Option<&Palette> {
		self.palette.as_ref()
	}

	/// Returns the decoded top-down pixels.
	pub fn pixels(&self) -> &RgbaBuffer {
		&self.pixels
	}

	/// Consumes the file and returns its pixels.
	pub fn into_pixels(self) -> RgbaBuffer {
		self.pixels
	}

	/// Decodes a `.BMP` image. `filename` is only used in diagnostics.
	pub fn decode(data: &[u8], filename: &str) -> Result<Self, CodecError> {
		let mut cursor = ByteCursor::new(data, filename);
		let header = Header::read(&mut cursor)?;
		debug!(
			"{filename}: {}x{} BMP, {} bpp, pixels at {:#X}",
			header.width,
			header.height,
			header.bit_depth.bit_count(),
			header.pixel_offset
		);

		let palette = match header.bit_depth {
			BitDepth::Indexed8 => Some(Palette::read(&mut cursor)?),
			BitDepth::Bgr24 | BitDepth::Bgrx32 => None,
		};

		// Everything the row loop touches must exist before allocating
		let stride = header.row_stride();
		let pixel_offset = header.pixel_offset as usize;
		let pixel_area = stride.saturating_mul(header.height as usize);
		if pixel_offset.saturating_add(pixel_area) > data.len() {
			return Err(CodecError::truncated(
				filename,
				pixel_offset,
				pixel_area,
				data.len().saturating_sub(pixel_offset),
			));
		}

		let mut pixels = RgbaBuffer::new(header.width, header.height);
		match &palette {
			Some(palette) => {
				read_rows(&mut cursor, &header, &mut pixels, |src| palette.get(src[0]))?;
			}
			None => {
				read_rows(&mut cursor, &header, &mut pixels, |src| {
					Color::rgb(src[2], src[1], src[0])
				})?;
			}
		}

		Ok(Self {
			header,
			palette,
			pixels,
		})
	}

	/// Decodes a `.BMP` image and masks every pixel equal to `colorkey`.
	pub fn decode_with_colorkey(
		data: &[u8],
		filename: &str,
		colorkey: Colorkey,
	) -> Result<Self, CodecError> {
		let mut file = Self::decode(data, filename)?;
		let masked = file.pixels.apply_colorkey(colorkey);
		debug!("{filename}: colorkey {colorkey} masked {masked} pixels");
		Ok(file)
	}

	/// Opens and decodes a `.BMP` file from the specified path.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, CodecError> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		Self::decode(&data, &path.display().to_string())
	}
}

/// Converts the bottom-up rows of the pixel area into top-down `pixels`.
fn read_rows(
	cursor: &mut ByteCursor<'_>,
	header: &Header,
	pixels: &mut RgbaBuffer,
	convert: impl Fn(&[u8]) -> Color,
) -> Result<(), CodecError> {
	let stride = header.row_stride();
	let pixel_offset = header.pixel_offset as usize;

	// A zero-width image has no rows worth seeking to
	let rows = if stride == 0 {
		0
	} else {
		header.height as usize
	};

	let mut out = pixels.as_bytes_mut().chunks_exact_mut(RgbaBuffer::CHANNELS);
	for y in (0..rows).rev() {
		cursor.seek(pixel_offset + stride * y)?;
		let row = cursor.read_bytes(stride)?;

		for src in row.chunks_exact(header.bit_depth.bytes_per_pixel()) {
			if let Some(dst) = out.next() {
				dst.copy_from_slice(&convert(src).to_array());
			}
		}
	}
	Ok(())
}
