use std::sync::Arc;
use std::thread;

use allods_rs::prelude::*;

use crate::assets::{container, frame, frame_with_size, ramp_palette};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_public_types_are_thread_safe() {
	assert_send_sync::<SpriteFile>();
	assert_send_sync::<SpriteFrame>();
	assert_send_sync::<BmpFile>();
	assert_send_sync::<Arc<Palette>>();
	assert_send_sync::<CodecError>();
}

#[test]
fn test_indexed_draw_only_frame() {
	let source = [7u8, 0, 255, 128, 64, 3];
	let mut runs = vec![source.len() as u8];
	runs.extend_from_slice(&source);

	let palette = ramp_palette();
	let data = container(Some(&palette), &[frame(3, 2, &runs)], 1);
	let sprite = SpriteFile::decode(&data, "draw.256").unwrap();

	let frame = sprite.get_frame(0).unwrap();
	let decoded: Vec<_> = frame.pixels().iter().map(|p| (p.index, p.alpha)).collect();
	let expected: Vec<_> = source.iter().map(|&i| (i, 255)).collect();
	assert_eq!(decoded, expected);

	let rgba = sprite.first_frame_truecolor().unwrap();
	assert_eq!(rgba.pixel(1, 0), Some(Color::rgb(0, 255, 0)));
	assert_eq!(rgba.pixel(0, 1), Some(Color::rgb(128, 127, 64)));
}

#[test]
fn test_trailer_flag_bit_is_masked() {
	let frames: Vec<_> = (0..5u8).map(|i| frame(1, 1, &[0x01, i])).collect();
	let data = container(Some(&ramp_palette()), &frames, 0x8000_0005);

	let sprite = SpriteFile::decode(&data, "flagged.256").unwrap();
	assert_eq!(sprite.declared_frame_count(), 5);
	assert_eq!(sprite.frame_count(), 5);
	for (i, frame) in sprite.iter().enumerate() {
		assert_eq!(frame.get(0, 0), Some(IndexAlpha::opaque(i as u8)));
	}
}

#[test_log::test]
fn test_oversized_frame_is_dropped() {
	let mut frames: Vec<_> = (0..10u8).map(|i| frame(2, 1, &[0x02, i, i])).collect();
	// the rejected header's data is never read; the next header follows it directly
	frames[4] = frame_with_size(600, 1, 40, &[]);

	let data = container(Some(&ramp_palette()), &frames, 10);
	let sprite = SpriteFile::decode(&data, "units.256").unwrap();

	assert_eq!(sprite.declared_frame_count(), 10);
	assert_eq!(sprite.frame_count(), 9);

	let dropped = sprite.dropped_frames();
	assert_eq!(dropped.len(), 1);
	assert_eq!(dropped[0].index, 4);
	assert_eq!(dropped[0].width, 600);
	assert_eq!(dropped[0].offset, Palette::SIZE + 4 * (12 + 3));
	assert!(dropped[0].to_error("units.256").is_recoverable());

	let firsts: Vec<u8> = sprite.iter().map(|f| f.pixels()[0].index).collect();
	assert_eq!(firsts, vec![0, 1, 2, 3, 5, 6, 7, 8, 9]);
}

#[test_log::test]
fn test_custom_bounds_drop_more_frames() {
	let frames = vec![frame(2, 1, &[0x02, 1, 1]), frame(4, 1, &[]), frame(2, 2, &[])];
	let data = container(None, &frames, 3);

	let config = DecodeConfig {
		max_width: 2,
		..DecodeConfig::default()
	};
	// the dropped frame declares no data, so the next header follows it directly
	let sprite = SpriteFile::decode_with_config(&data, "small.16", &config).unwrap();
	assert_eq!(sprite.frame_count(), 2);
	assert_eq!(sprite.dropped_frames().len(), 1);
}

#[test]
fn test_alpha_nibbles() {
	let data = container(None, &[frame(2, 1, &[0x01, 0x05]), frame(2, 1, &[0x01, 0x15])], 2);
	let sprite = SpriteFile::decode(&data, "shadow.16").unwrap();
	assert_eq!(sprite.format(), SpriteFormat::Alpha16);

	let single = sprite.get_frame(0).unwrap();
	assert_eq!(single.pixels(), &[IndexAlpha::new(255, 0x55), IndexAlpha::TRANSPARENT]);

	let double = sprite.get_frame(1).unwrap();
	assert_eq!(double.pixels(), &[IndexAlpha::new(255, 0x55), IndexAlpha::new(255, 0x11)]);

	let mask = double.to_alpha_mask();
	assert_eq!(mask.pixel(1, 0), Some(Color::new(255, 255, 255, 0x11)));
}

#[test]
fn test_indexed_alpha_words() {
	let mut runs = Vec::new();
	runs.extend_from_slice(&0x4001u16.to_le_bytes()); // skip one row
	runs.extend_from_slice(&0x0002u16.to_le_bytes()); // draw two
	runs.extend_from_slice(&0x1F0Au16.to_le_bytes());
	runs.extend_from_slice(&0x0000u16.to_le_bytes());

	let data = container(Some(&ramp_palette()), &[frame(2, 2, &runs)], 1);
	let sprite = SpriteFile::decode(&data, "ghost.16A").unwrap();
	assert_eq!(sprite.format(), SpriteFormat::IndexedAlpha16);

	let frame = sprite.get_frame(0).unwrap();
	assert_eq!(frame.get(0, 0), Some(IndexAlpha::TRANSPARENT));
	assert_eq!(frame.get(0, 1), Some(IndexAlpha::new(0x85, 0xFF)));
	assert_eq!(frame.get(1, 1), Some(IndexAlpha::new(0, 0)));

	let rgba = sprite.truecolor(0).unwrap();
	assert_eq!(rgba.pixel(0, 1), Some(Color::new(0x85, 255 - 0x85, 0x85 / 2, 0xFF)));
}

#[test]
fn test_declared_size_wins_over_indexed_overrun() {
	// the run draws 3 pixels out of a 2-byte frame and reads into the next header
	let frames = vec![frame(3, 1, &[0x03, 10]), frame(1, 1, &[0x01, 20])];
	let data = container(Some(&ramp_palette()), &frames, 2);

	let sprite = SpriteFile::decode(&data, "overrun.256").unwrap();
	assert_eq!(sprite.frame_count(), 2);
	assert_eq!(sprite.get_frame(0).unwrap().get(0, 0), Some(IndexAlpha::opaque(10)));
	assert_eq!(sprite.get_frame(1).unwrap().get(0, 0), Some(IndexAlpha::opaque(20)));
}

#[test]
fn test_declared_size_wins_over_odd_indexed_alpha_size() {
	let mut first = Vec::new();
	first.extend_from_slice(&0x0001u16.to_le_bytes());
	first.extend_from_slice(&0x1F0Au16.to_le_bytes());
	first.push(0x00); // odd trailing byte starts a control word

	let mut second = Vec::new();
	second.extend_from_slice(&0x0001u16.to_le_bytes());
	second.extend_from_slice(&0x0004u16.to_le_bytes());

	let data = container(Some(&ramp_palette()), &[frame(2, 1, &first), frame(1, 1, &second)], 2);
	let sprite = SpriteFile::decode(&data, "odd.16a").unwrap();

	assert_eq!(sprite.frame_count(), 2);
	assert_eq!(sprite.get_frame(0).unwrap().get(0, 0), Some(IndexAlpha::new(0x85, 0xFF)));
	assert_eq!(sprite.get_frame(1).unwrap().get(0, 0), Some(IndexAlpha::new(2, 0)));
}

#[test]
fn test_declared_size_wins_over_alpha_overrun() {
	let frames = vec![frame(4, 1, &[0x03, 0x21]), frame(2, 1, &[0x01, 0x15])];
	let data = container(None, &frames, 2);

	let sprite = SpriteFile::decode(&data, "overrun.16").unwrap();
	assert_eq!(sprite.frame_count(), 2);
	assert_eq!(sprite.get_frame(0).unwrap().get(0, 0), Some(IndexAlpha::new(255, 0x11)));
	assert_eq!(
		sprite.get_frame(1).unwrap().pixels(),
		&[IndexAlpha::new(255, 0x55), IndexAlpha::new(255, 0x11)]
	);
}

#[test]
fn test_without_embedded_palette() {
	let frames = vec![frame(1, 1, &[0x01, 9])];
	let data = container(None, &frames, 1);

	let sprite = SpriteFile::decode_as(
		&data,
		"external.256",
		SpriteFormat::Indexed256,
		&DecodeConfig::without_palette(),
	)
	.unwrap();
	assert!(sprite.palette().is_none());
	assert!(sprite.truecolor(0).is_none());

	let palette =
		Arc::new(Palette::from_bytes_at(&ramp_palette(), 0, "external.pal").unwrap());
	let sprite = sprite.with_palette(palette);
	assert_eq!(sprite.truecolor(0).and_then(|rgba| rgba.pixel(0, 0)), Some(Color::rgb(9, 246, 4)));
}

#[test]
fn test_unknown_extension() {
	let data = container(None, &[], 0);
	let err = SpriteFile::decode(&data, "units.spr").unwrap_err();
	assert_eq!(err.to_string(), "Couldn't load \"units.spr\" (unknown extension)");
}

#[test]
fn test_truncated_container_is_terminal() {
	let frames = vec![frame(1, 1, &[0x01, 1]), frame_with_size(1, 1, 500, &[0x01, 2])];
	let data = container(Some(&ramp_palette()), &frames, 2);

	let err = SpriteFile::decode(&data, "cut.256").unwrap_err();
	assert!(matches!(err, CodecError::TruncatedInput { .. }));
	assert!(err.to_string().contains("cut.256"));
}

#[test]
fn test_parallel_decodes_are_independent() {
	let frames: Vec<_> = (0..32u8).map(|i| frame(4, 4, &[0x40 | (i % 4), 0x02, i, i])).collect();
	let data = container(Some(&ramp_palette()), &frames, 32);
	let expected = SpriteFile::decode(&data, "shared.256").unwrap();

	thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|_| scope.spawn(|| SpriteFile::decode(&data, "shared.256").unwrap()))
			.collect();

		for handle in handles {
			assert_eq!(handle.join().unwrap(), expected);
		}
	});
}
