//! Sprite CLI Utility
//!
//! A command-line tool for inspecting and extracting the legacy image assets.
//!
//! # Features
//!
//! - **info**: Display information about a sprite container
//! - **unpack**: Extract all frames of a container to PNG images with JSON metadata
//! - **bmp**: Convert a legacy BMP to PNG, optionally applying a colorkey
//! - **palette**: Dump a 256-entry palette stored at any offset of a file
//! - **scan**: Decode every asset below a directory and report failures
//!
//! # Metadata Format
//!
//! Frame metadata is stored in a JSON file with the following structure:
//! ```json
//! {
//!   "source": "sprites.256",
//!   "format": ".256",
//!   "declared_frame_count": 24,
//!   "frames": [
//!     {
//!       "index": 0,
//!       "width": 64,
//!       "height": 80,
//!       "opaque_pixels": 2210,
//!       "filename": "frame_000.png"
//!     }
//!   ],
//!   "dropped": []
//! }
//! ```
//!
//! # Settings
//!
//! Decode bounds and the default colorkey are read from `allods.toml` in the
//! current directory (or the file given with `--config`), then overridden by
//! `ALLODS_*` environment variables:
//!
//! ```toml
//! colorkey = 0xFF00FF
//!
//! [decode]
//! max_width = 512
//! max_height = 512
//! ```
//!
//! `ALLODS_DECODE__MAX_WIDTH=1024` overrides `decode.max_width`.
//!
//! # Usage
//!
//! ```bash
//! # Show container information
//! cargo run --example sprite_utils -- info graphics/units/heroes/hero.256 --detailed
//!
//! # Unpack a container
//! cargo run --example sprite_utils -- unpack hero.256 -o frames/
//!
//! # Unpack a shadow container, resolving against an external palette
//! cargo run --example sprite_utils -- unpack hero.16 -p palette.bmp
//!
//! # Convert a BMP with magenta transparency
//! cargo run --example sprite_utils -- bmp menu_.bmp -k FF00FF
//!
//! # Dump the palette of an 8-bit BMP
//! cargo run --example sprite_utils -- palette palette.bmp
//!
//! # Check a whole asset tree
//! cargo run --example sprite_utils -- scan graphics/
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use allods_rs::prelude::*;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "sprite_utils")]
#[command(author = "allods-rs project")]
#[command(version = "1.0")]
#[command(about = "Legacy sprite and BMP utility - inspect, unpack and convert assets", long_about = None)]
struct Cli {
	/// Settings file (defaults to `allods.toml` if present)
	#[arg(short, long, global = true, env = "ALLODS_CONFIG", value_name = "FILE")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Display information about a sprite container
	Info {
		/// Input container path (`.256`, `.16a`, `.16`)
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Show detailed frame information
		#[arg(short, long)]
		detailed: bool,
	},

	/// Unpack a sprite container to individual PNG images
	Unpack {
		/// Input container path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output directory path (optional, defaults to `input_frames/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,

		/// File holding a palette to use instead of the embedded one
		#[arg(short, long, value_name = "PALETTE")]
		palette: Option<PathBuf>,

		/// Offset of the palette inside the palette file
		#[arg(long, default_value_t = Palette::BMP_OFFSET, value_parser = parse_offset)]
		palette_offset: usize,

		/// Export packed index/alpha bytes next to each PNG
		#[arg(long)]
		raw: bool,
	},

	/// Convert a legacy BMP to PNG
	Bmp {
		/// Input BMP path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output PNG path (optional, defaults to the input with a `.png` extension)
		#[arg(short, long, value_name = "OUTPUT")]
		output: Option<PathBuf>,

		/// Transparent color as `RRGGBB`, overriding the settings file
		#[arg(short = 'k', long, value_parser = parse_colorkey)]
		colorkey: Option<Colorkey>,
	},

	/// Dump a palette as hex
	Palette {
		/// File holding the palette
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Offset of the palette (decimal or `0x` hex)
		#[arg(long, default_value_t = Palette::BMP_OFFSET, value_parser = parse_offset)]
		offset: usize,
	},

	/// Decode every asset below a directory
	Scan {
		/// Root directory
		#[arg(value_name = "DIR")]
		dir: PathBuf,
	},
}

/// Settings merged from the settings file and the environment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Settings {
	/// Sprite decode bounds
	decode: DecodeConfig,
	/// Default colorkey for BMP conversion
	colorkey: Option<Colorkey>,
}

/// Frame metadata for JSON serialization
#[derive(Debug, Clone, Serialize)]
struct FrameMetadata {
	/// Frame index
	index: usize,
	/// Frame width in pixels
	width: u32,
	/// Frame height in pixels
	height: u32,
	/// Number of pixels with nonzero alpha
	opaque_pixels: usize,
	/// PNG filename
	filename: String,
}

/// Dropped frame metadata for JSON serialization
#[derive(Debug, Clone, Serialize)]
struct DroppedMetadata {
	/// Frame index in declaration order
	index: usize,
	/// Offset of the frame header
	offset: usize,
	/// Declared width
	width: u32,
	/// Declared height
	height: u32,
	/// Declared data size
	data_size: u32,
}

impl From<&DroppedFrame> for DroppedMetadata {
	fn from(frame: &DroppedFrame) -> Self {
		Self {
			index: frame.index,
			offset: frame.offset,
			width: frame.width,
			height: frame.height,
			data_size: frame.data_size,
		}
	}
}

/// Complete container metadata structure
#[derive(Debug, Clone, Serialize)]
struct SpriteMetadata {
	/// Source file name
	source: String,
	/// Container format
	format: String,
	/// Frame count stored in the container
	declared_frame_count: u32,
	/// Decoded frames
	frames: Vec<FrameMetadata>,
	/// Frames rejected by the decode bounds
	dropped: Vec<DroppedMetadata>,
}

/// Parses a decimal or `0x`-prefixed hex offset
fn parse_offset(value: &str) -> Result<usize, String> {
	match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		Some(hex) => usize::from_str_radix(hex, 16),
		None => value.parse(),
	}
	.map_err(|e| format!("invalid offset `{value}`: {e}"))
}

/// Parses `RRGGBB`, with an optional `#` prefix
fn parse_colorkey(value: &str) -> Result<Colorkey, String> {
	let mut rgb = [0u8; 3];
	hex::decode_to_slice(value.trim_start_matches('#'), &mut rgb)
		.map_err(|e| format!("invalid colorkey `{value}`: {e}"))?;
	Ok(Colorkey::from_rgb(rgb[0], rgb[1], rgb[2]))
}

/// Loads the settings file and environment overrides
fn load_settings(path: Option<&Path>) -> Result<Settings> {
	let file = match path {
		Some(path) => config::File::from(path).required(true),
		None => config::File::with_name("allods").required(false),
	};

	let settings: Settings = config::Config::builder()
		.add_source(file)
		.add_source(
			config::Environment::with_prefix("ALLODS").separator("__").try_parsing(true),
		)
		.build()
		.context("Failed to read settings")?
		.try_deserialize()
		.context("Invalid settings")?;

	debug!("Settings: {settings:?}");
	Ok(settings)
}

fn display_name(path: &Path) -> String {
	path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Reads a container, keeping the file name for format dispatch
fn open_sprite(path: &Path, config: &DecodeConfig) -> Result<SpriteFile> {
	let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let sprite = SpriteFile::decode_with_config(&data, &display_name(path), config)?;
	Ok(sprite)
}

/// Handle info command
fn handle_info(input: &Path, detailed: bool, settings: &Settings) -> Result<()> {
	let sprite = open_sprite(input, &settings.decode)?;

	println!("📄 {}", input.display());
	println!("   {sprite}");
	if let Some(palette) = sprite.palette() {
		println!("   {palette}");
	}

	if detailed {
		for (index, frame) in sprite.iter().enumerate() {
			println!(
				"   Frame #{index:03}: {frame}, {} opaque pixels",
				frame.opaque_pixel_count()
			);
		}
	}

	for dropped in sprite.dropped_frames() {
		println!("   ⚠ Dropped frame {dropped}");
	}

	Ok(())
}

/// Handle unpack command
fn handle_unpack(
	input: &Path,
	output: Option<PathBuf>,
	palette: Option<(PathBuf, usize)>,
	raw: bool,
	settings: &Settings,
) -> Result<()> {
	let output_dir = output.unwrap_or_else(|| {
		let stem = input.file_stem().map_or_else(
			|| "sprite".to_string(),
			|s| s.to_string_lossy().into_owned(),
		);
		input.with_file_name(format!("{stem}_frames"))
	});

	let mut sprite = open_sprite(input, &settings.decode)?;
	if let Some((path, offset)) = palette {
		let palette = Palette::open(&path, offset)
			.with_context(|| format!("Failed to load palette from {}", path.display()))?;
		sprite = sprite.with_palette(Arc::new(palette));
	}

	fs::create_dir_all(&output_dir)
		.with_context(|| format!("Failed to create {}", output_dir.display()))?;
	info!("Unpacking {} to {}", input.display(), output_dir.display());

	let mut metadata = SpriteMetadata {
		source: display_name(input),
		format: sprite.format().to_string(),
		declared_frame_count: sprite.declared_frame_count(),
		frames: Vec::with_capacity(sprite.frame_count()),
		dropped: sprite.dropped_frames().iter().map(DroppedMetadata::from).collect(),
	};

	let palette = sprite.palette().cloned();
	for (index, frame) in sprite.into_frames().into_iter().enumerate() {
		let rgba = match &palette {
			Some(palette) => frame.resolve(palette),
			None => frame.to_alpha_mask(),
		};

		let filename = format!("frame_{index:03}.png");
		rgba.into_image()
			.save(output_dir.join(&filename))
			.with_context(|| format!("Failed to write {filename}"))?;

		if raw {
			fs::write(output_dir.join(format!("frame_{index:03}.ia")), frame.to_index_alpha_bytes())?;
		}

		metadata.frames.push(FrameMetadata {
			index,
			width: frame.width(),
			height: frame.height(),
			opaque_pixels: frame.opaque_pixel_count(),
			filename,
		});
	}

	let json = serde_json::to_string_pretty(&metadata)?;
	fs::write(output_dir.join("metadata.json"), json)?;

	println!("✓ Extracted {} frames to {}", metadata.frames.len(), output_dir.display());
	if !metadata.dropped.is_empty() {
		println!("⚠ {} frames dropped, see metadata.json", metadata.dropped.len());
	}

	Ok(())
}

/// Handle bmp command
fn handle_bmp(
	input: &Path,
	output: Option<PathBuf>,
	colorkey: Option<Colorkey>,
	settings: &Settings,
) -> Result<()> {
	let output = output.unwrap_or_else(|| input.with_extension("png"));
	let colorkey = colorkey.or(settings.colorkey);

	let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
	let name = display_name(input);
	let buffer = load_image(&data, &name, ImageKind::from_filename(&name), colorkey)?;

	println!("✓ {name}: {buffer}");
	if let Some(key) = colorkey {
		println!("  Colorkey: {key}");
	}

	buffer
		.into_image()
		.save(&output)
		.with_context(|| format!("Failed to write {}", output.display()))?;
	println!("✓ Written to {}", output.display());

	Ok(())
}

/// Handle palette command
fn handle_palette(input: &Path, offset: usize) -> Result<()> {
	let palette = Palette::open(input, offset)?;

	println!("{palette} at {offset:#X} in {}", input.display());
	let colors: Vec<&Color> = palette.iter().collect();
	for (row, chunk) in colors.chunks(8).enumerate() {
		let line: Vec<String> =
			chunk.iter().map(|c| hex::encode_upper([c.r, c.g, c.b])).collect();
		println!("  {:3}: {}", row * 8, line.join(" "));
	}

	Ok(())
}

/// Handle scan command
fn handle_scan(dir: &Path, settings: &Settings) -> Result<()> {
	if !dir.is_dir() {
		bail!("{} is not a directory", dir.display());
	}

	let (mut decoded, mut failed, mut dropped) = (0usize, 0usize, 0usize);

	for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
		if !entry.file_type().is_file() {
			continue;
		}

		let path = entry.path();
		let name = display_name(path);
		let is_bmp = ImageKind::from_filename(&name) == ImageKind::Legacy;
		if !is_bmp && SpriteFormat::from_filename(&name).is_err() {
			continue;
		}

		let data = match fs::read(path) {
			Ok(data) => data,
			Err(e) => {
				warn!("{}: {e}", path.display());
				failed += 1;
				continue;
			}
		};

		let result = if is_bmp {
			BmpFile::decode(&data, &name).map(|bmp| bmp.pixels().to_string())
		} else {
			SpriteFile::decode_with_config(&data, &name, &settings.decode).map(|sprite| {
				dropped += sprite.dropped_frames().len();
				sprite.to_string()
			})
		};

		match result {
			Ok(summary) => {
				info!("{}: {summary}", path.display());
				decoded += 1;
			}
			Err(e) => {
				warn!("{e}");
				failed += 1;
			}
		}
	}

	println!("✓ Decoded: {decoded}");
	println!("✗ Failed: {failed}");
	println!("⚠ Dropped frames: {dropped}");

	Ok(())
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let settings = load_settings(cli.config.as_deref())?;

	match cli.command {
		Commands::Info {
			input,
			detailed,
		} => handle_info(&input, detailed, &settings),
		Commands::Unpack {
			input,
			output,
			palette,
			palette_offset,
			raw,
		} => handle_unpack(&input, output, palette.map(|p| (p, palette_offset)), raw, &settings),
		Commands::Bmp {
			input,
			output,
			colorkey,
		} => handle_bmp(&input, output, colorkey, &settings),
		Commands::Palette {
			input,
			offset,
		} => handle_palette(&input, offset),
		Commands::Scan {
			dir,
		} => handle_scan(&dir, &settings),
	}
}
