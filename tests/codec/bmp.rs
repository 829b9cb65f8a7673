use allods_rs::prelude::*;

use crate::assets::{BmpBuilder, ramp_palette};

fn rgb_rows(width: usize, height: usize, bytes_per_pixel: usize) -> Vec<Vec<u8>> {
	(0..height)
		.map(|y| {
			(0..width * bytes_per_pixel).map(|i| (y * 31 + i * 7) as u8).collect::<Vec<u8>>()
		})
		.collect()
}

#[test]
fn test_truecolor_dimensions_and_alpha() {
	for (bit_count, bytes_per_pixel) in [(24, 3), (32, 4)] {
		let rows = rgb_rows(5, 3, bytes_per_pixel);
		let data = BmpBuilder::new(bit_count, 5, rows.clone()).build();

		let bmp = BmpFile::decode(&data, "truecolor.bmp").unwrap();
		let pixels = bmp.pixels();

		assert_eq!((pixels.width(), pixels.height()), (5, 3));
		assert_eq!(pixels.as_bytes().len(), 5 * 3 * 4);
		assert!(pixels.pixels().all(|p| p.a == 255));

		for (y, row) in rows.iter().enumerate() {
			for (x, src) in row.chunks_exact(bytes_per_pixel).enumerate() {
				assert_eq!(
					pixels.pixel(x as u32, y as u32),
					Some(Color::rgb(src[2], src[1], src[0])),
					"{bit_count} bpp at ({x}, {y})"
				);
			}
		}
	}
}

#[test]
fn test_indexed_matches_palette() {
	let rows = vec![vec![0, 1, 2, 3], vec![252, 253, 254, 255]];
	let data = BmpBuilder::new(8, 4, rows).with_palette(ramp_palette()).build();

	let bmp = BmpFile::decode(&data, "indexed.bmp").unwrap();
	assert_eq!(bmp.header().bit_depth(), BmpBitDepth::Indexed8);
	assert_eq!(bmp.pixels().pixel(2, 0), Some(Color::rgb(2, 253, 1)));
	assert_eq!(bmp.pixels().pixel(3, 1), Some(Color::rgb(255, 0, 127)));

	// The palette reader and the BMP decoder agree on the embedded palette
	let palette = Palette::from_bytes_at(&data, Palette::BMP_OFFSET, "indexed.bmp").unwrap();
	assert_eq!(bmp.palette(), Some(&palette));
}

#[test]
fn test_identical_palette_bytes_give_identical_palettes() {
	let bytes = ramp_palette();
	let mut copy = vec![0u8; 7];
	copy.extend_from_slice(&bytes);

	let first = Palette::from_bytes_at(&bytes, 0, "a.pal").unwrap();
	let second = Palette::from_bytes_at(&copy, 7, "b.pal").unwrap();
	assert_eq!(first, second);
}

#[test]
fn test_rejects_bad_signature() {
	let mut data = BmpBuilder::new(24, 1, vec![vec![0, 0, 0]]).build();
	data[1] = b'A';

	let err = BmpFile::decode(&data, "sig.bmp").unwrap_err();
	assert!(matches!(err, CodecError::InvalidFormat { .. }));
	assert!(err.to_string().contains("sig.bmp"));
}

#[test]
fn test_rejects_core_and_unknown_headers() {
	let mut builder = BmpBuilder::new(24, 1, vec![vec![0, 0, 0]]);

	builder.header_size = 12;
	let err = BmpFile::decode(&builder.build(), "core.bmp").unwrap_err();
	assert!(matches!(err, CodecError::UnsupportedVariant { .. }));
	assert!(err.to_string().contains("CORE BMP images not supported"));

	builder.header_size = 124;
	let err = BmpFile::decode(&builder.build(), "v5.bmp").unwrap_err();
	assert!(matches!(err, CodecError::UnsupportedVariant { .. }));
}

#[test]
fn test_rejects_top_down_images() {
	let mut builder = BmpBuilder::new(24, 1, vec![vec![0, 0, 0]]);
	builder.height = -1;

	let err = BmpFile::decode(&builder.build(), "topdown.bmp").unwrap_err();
	assert!(matches!(err, CodecError::UnsupportedVariant { .. }));
}

#[test]
fn test_oversized_header_does_not_allocate() {
	let mut builder = BmpBuilder::new(32, 1, vec![vec![0, 0, 0, 0]]);
	builder.width = i32::MAX;
	builder.height = i32::MAX;

	let err = BmpFile::decode(&builder.build(), "huge.bmp").unwrap_err();
	assert!(matches!(err, CodecError::TruncatedInput { .. }));
}

#[test]
fn test_colorkey_masks_exact_rgb_only() {
	let rows = vec![vec![255, 0, 255, 254, 0, 255], vec![255, 0, 255, 0, 0, 0]];
	let data = BmpBuilder::new(24, 2, rows).build();

	let bmp = BmpFile::decode_with_colorkey(&data, "key.bmp", Colorkey::from_rgb(255, 0, 255))
		.unwrap();
	let alphas: Vec<u8> = bmp.pixels().pixels().map(|p| p.a).collect();
	assert_eq!(alphas, vec![0, 255, 0, 255]);
}
