//! Builders for in-memory test assets.

/// Uncompressed BMP writer. `rows` are given top-down.
pub struct BmpBuilder {
	pub header_size: u32,
	pub bit_count: i16,
	pub width: i32,
	pub height: i32,
	pub palette: Option<Vec<u8>>,
	pub rows: Vec<Vec<u8>>,
}

impl BmpBuilder {
	pub fn new(bit_count: i16, width: i32, rows: Vec<Vec<u8>>) -> Self {
		Self {
			header_size: 40,
			bit_count,
			width,
			height: rows.len() as i32,
			palette: None,
			rows,
		}
	}

	pub fn with_palette(mut self, palette: Vec<u8>) -> Self {
		self.palette = Some(palette);
		self
	}

	pub fn build(&self) -> Vec<u8> {
		let palette_size = self.palette.as_ref().map_or(0, Vec::len);
		let pixel_offset = (14 + 40 + palette_size) as u32;

		let mut data = Vec::new();
		data.extend_from_slice(b"BM");
		data.extend_from_slice(&[0u8; 8]);
		data.extend_from_slice(&pixel_offset.to_le_bytes());
		data.extend_from_slice(&self.header_size.to_le_bytes());
		data.extend_from_slice(&self.width.to_le_bytes());
		data.extend_from_slice(&self.height.to_le_bytes());
		data.extend_from_slice(&1u16.to_le_bytes());
		data.extend_from_slice(&self.bit_count.to_le_bytes());
		data.extend_from_slice(&[0u8; 24]);
		if let Some(palette) = &self.palette {
			data.extend_from_slice(palette);
		}
		for row in self.rows.iter().rev() {
			data.extend_from_slice(row);
		}
		data
	}
}

/// Palette bytes where entry `i` is `(r, g, b) = (i, 255 - i, i / 2)`, stored BGRX.
pub fn ramp_palette() -> Vec<u8> {
	(0..=255u8).flat_map(|i| [i / 2, 255 - i, i, 0x5A]).collect()
}

/// Frame record: 12-byte header followed by `data`.
pub fn frame(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
	frame_with_size(width, height, data.len() as u32, data)
}

/// Frame record whose declared size may differ from the bytes written.
pub fn frame_with_size(width: u32, height: u32, data_size: u32, data: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(12 + data.len());
	out.extend_from_slice(&width.to_le_bytes());
	out.extend_from_slice(&height.to_le_bytes());
	out.extend_from_slice(&data_size.to_le_bytes());
	out.extend_from_slice(data);
	out
}

/// Sprite container with an optional palette and a raw trailer value.
pub fn container(palette: Option<&[u8]>, frames: &[Vec<u8>], trailer: u32) -> Vec<u8> {
	let mut out = Vec::new();
	if let Some(palette) = palette {
		out.extend_from_slice(palette);
	}
	for frame in frames {
		out.extend_from_slice(frame);
	}
	out.extend_from_slice(&trailer.to_le_bytes());
	out
}
