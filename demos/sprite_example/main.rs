//! Sprite Container Example
//!
//! This example demonstrates decoding the legacy image formats.
//!
//! Features demonstrated:
//! - Decoding a sprite container from memory
//! - Iterating over frames and rows
//! - Resolving frames with the container palette
//! - Handling dropped frames
//! - Decoding a BMP with a colorkey
//!
//! The assets are built in memory so the example runs without game files.

use log::{info, warn};

use allods_internal::prelude::*;

fn main() {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	info!("=== Sprite Container Example ===\n");

	// Example 1: Decode and inspect a container
	example_decode_sprite();

	// Example 2: Frames rejected by the bounds
	example_dropped_frames();

	// Example 3: BMP with a colorkey
	example_bmp_colorkey();

	info!("\n✓ Sprite examples complete!");
}

/// Gray ramp palette, stored BGRX
fn gray_palette() -> Vec<u8> {
	(0..=255u8).flat_map(|i| [i, i, i, 0]).collect()
}

/// A `.256` container holding one 6×4 diamond
fn diamond_256() -> Vec<u8> {
	// Skips count from the end of the previous run and wrap across rows
	let runs: &[u8] = &[
		0x82, 0x02, 200, 200, // row 0: x = 2..4
		0x83, 0x04, 150, 220, 220, 150, // row 1: x = 1..5
		0x82, 0x04, 150, 220, 220, 150, // row 2: x = 1..5
		0x83, 0x02, 200, 200, // row 3: x = 2..4
	];

	let mut data = gray_palette();
	data.extend_from_slice(&6u32.to_le_bytes());
	data.extend_from_slice(&4u32.to_le_bytes());
	data.extend_from_slice(&(runs.len() as u32).to_le_bytes());
	data.extend_from_slice(runs);
	data.extend_from_slice(&1u32.to_le_bytes());
	data
}

/// Example 1: Decode and inspect a container
fn example_decode_sprite() {
	info!("Example 1: Decoding a .256 container\n");

	let sprite = match SpriteFile::decode(&diamond_256(), "diamond.256") {
		Ok(sprite) => sprite,
		Err(e) => {
			warn!("✗ {e}");
			return;
		}
	};

	info!("✓ {sprite}");
	for frame in &sprite {
		info!("  Frame {frame}:");
		for row in frame.rows() {
			let line: String = row
				.iter()
				.map(|p| match (p.alpha, p.index) {
					(0, _) => '.',
					(_, 181..) => '#',
					_ => '+',
				})
				.collect();
			info!("    {line}");
		}
	}

	if let Some(rgba) = sprite.first_frame_truecolor() {
		info!("  Resolved: {rgba}, center pixel {:?}", rgba.pixel(2, 1));
	}
}

/// Example 2: Frames rejected by the bounds
fn example_dropped_frames() {
	info!("\nExample 2: Frames exceeding the bounds\n");

	let mut data = Vec::new();
	for (width, runs) in [(600u32, &[][..]), (1, &[0x01, 0x0F][..])] {
		data.extend_from_slice(&width.to_le_bytes());
		data.extend_from_slice(&1u32.to_le_bytes());
		data.extend_from_slice(&(runs.len() as u32).to_le_bytes());
		data.extend_from_slice(runs);
	}
	data.extend_from_slice(&2u32.to_le_bytes());

	match SpriteFile::decode(&data, "shadow.16") {
		Ok(sprite) => {
			info!("✓ {sprite}");
			for dropped in sprite.dropped_frames() {
				info!("  Dropped {dropped}");
			}
		}
		Err(e) => warn!("✗ {e}"),
	}
}

/// Example 3: BMP with a colorkey
fn example_bmp_colorkey() {
	info!("\nExample 3: BMP with a colorkey\n");

	let mut data = Vec::new();
	data.extend_from_slice(b"BM");
	data.extend_from_slice(&[0u8; 8]);
	data.extend_from_slice(&54u32.to_le_bytes());
	data.extend_from_slice(&40u32.to_le_bytes());
	data.extend_from_slice(&2i32.to_le_bytes());
	data.extend_from_slice(&1i32.to_le_bytes());
	data.extend_from_slice(&1u16.to_le_bytes());
	data.extend_from_slice(&24u16.to_le_bytes());
	data.extend_from_slice(&[0u8; 24]);
	data.extend_from_slice(&[0xFF, 0x00, 0xFF, 0x10, 0x20, 0x30]);

	let key = Colorkey::new(0xFF00FF);
	match load_image(&data, "cursor.bmp", ImageKind::Legacy, Some(key)) {
		Ok(buffer) => {
			info!("✓ {buffer}, colorkey {key}");
			for (i, pixel) in buffer.pixels().enumerate() {
				info!("  Pixel {i}: {pixel}");
			}
		}
		Err(e) => warn!("✗ {e}"),
	}
}
