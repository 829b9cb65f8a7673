//! Benchmark suite for sprite container and BMP decoding
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use allods_benches::{generate_bmp, generate_sprite};
use allods_types::file::{BmpFile, Colorkey, DecodeConfig, SpriteFile, SpriteFormat};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const FORMATS: [(SpriteFormat, &str); 3] = [
	(SpriteFormat::Indexed256, "units.256"),
	(SpriteFormat::IndexedAlpha16, "units.16a"),
	(SpriteFormat::Alpha16, "shadows.16"),
];

/// Benchmark whole-container decoding for every encoding
fn bench_sprite_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("sprite_decode");

	for (width, height) in [(64u32, 64u32), (256, 256)] {
		for (format, filename) in FORMATS {
			let frames = 16;
			let data = generate_sprite(format, frames, width, height);

			group.throughput(Throughput::Elements(u64::from(frames * width * height)));
			group.bench_with_input(
				BenchmarkId::new(format.extension(), format!("{width}x{height}")),
				&data,
				|b, data| {
					b.iter(|| black_box(SpriteFile::decode(black_box(data), filename)));
				},
			);
		}
	}

	group.finish();
}

/// Benchmark the palette lookup applied after decoding
fn bench_frame_resolve(c: &mut Criterion) {
	let mut group = c.benchmark_group("frame_resolve");

	let data = generate_sprite(SpriteFormat::Indexed256, 1, 256, 256);
	let Ok(sprite) =
		SpriteFile::decode_as(&data, "units.256", SpriteFormat::Indexed256, &DecodeConfig::default())
	else {
		eprintln!("Warning: Could not decode generated sprite");
		return;
	};
	let (Some(frame), Some(palette)) = (sprite.get_frame(0), sprite.palette()) else {
		return;
	};

	group.throughput(Throughput::Elements(frame.pixel_count() as u64));
	group.bench_function("resolve", |b| {
		b.iter(|| black_box(frame.resolve(black_box(palette))));
	});
	group.bench_function("index_alpha_bytes", |b| {
		b.iter(|| black_box(frame.to_index_alpha_bytes()));
	});

	group.finish();
}

/// Benchmark BMP decoding per bit depth, with and without colorkey
fn bench_bmp_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("bmp_decode");
	let (width, height) = (640u32, 480u32);
	group.throughput(Throughput::Elements(u64::from(width * height)));

	for bit_count in [8u16, 24, 32] {
		let data = generate_bmp(bit_count, width, height);
		group.bench_with_input(BenchmarkId::new("decode", bit_count), &data, |b, data| {
			b.iter(|| black_box(BmpFile::decode(black_box(data), "bench.bmp")));
		});
		group.bench_with_input(BenchmarkId::new("colorkey", bit_count), &data, |b, data| {
			b.iter(|| {
				black_box(BmpFile::decode_with_colorkey(
					black_box(data),
					"bench.bmp",
					Colorkey::new(0x00FF00),
				))
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_sprite_decode, bench_frame_resolve, bench_bmp_decode);
criterion_main!(benches);
