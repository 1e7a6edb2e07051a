//! Header level data types for MSU-1 data files.
//!
//! This module contains the validated option values that end up in the
//! 32-byte file header, the header itself, and the packed length header
//! that prefixes every frame record.

use std::fmt::Display;

use crate::file::{FileType, Msu1Error};

use super::constants::{
	CHAPTER_COUNT_OFFSET, COLOR_DEPTH_OFFSET, FPS_OFFSET, HEADER_SIZE, MAGIC, MAX_FPS,
	TITLE_OFFSET, TITLE_SIZE,
};

/// Color depth of the tile data
///
/// The discriminant is the code stored in the header. It doubles as the
/// shift that converts a tile blob length into a tile count, since one
/// 8x8 tile occupies `8 * bpp` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorDepth {
	/// 2 bits per pixel, 16 bytes per tile
	Bpp2 = 4,
	/// 4 bits per pixel, 32 bytes per tile
	Bpp4 = 5,
	/// 8 bits per pixel, 64 bytes per tile
	Bpp8 = 6,
}

impl ColorDepth {
	/// Converts a bits-per-pixel value to `ColorDepth`
	pub fn from_bpp(bpp: u8) -> Result<Self, Msu1Error> {
		match bpp {
			2 => Ok(Self::Bpp2),
			4 => Ok(Self::Bpp4),
			8 => Ok(Self::Bpp8),
			_ => Err(Msu1Error::UnsupportedColorDepth(bpp)),
		}
	}

	/// Converts a header code to `ColorDepth`
	pub fn from_code(code: u8) -> Result<Self, Msu1Error> {
		match code {
			4 => Ok(Self::Bpp2),
			5 => Ok(Self::Bpp4),
			6 => Ok(Self::Bpp8),
			_ => Err(Msu1Error::UnsupportedColorDepth(code)),
		}
	}

	/// Header code of this color depth
	pub fn code(self) -> u8 {
		self as u8
	}

	/// Shift converting a tile blob length to tile units
	pub fn shift(self) -> u32 {
		u32::from(self.code())
	}

	/// Bits per pixel
	pub fn bpp(self) -> u8 {
		match self {
			Self::Bpp2 => 2,
			Self::Bpp4 => 4,
			Self::Bpp8 => 8,
		}
	}
}

impl Default for ColorDepth {
	fn default() -> Self {
		Self::Bpp4
	}
}

impl Display for ColorDepth {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}bpp", self.bpp())
	}
}

/// Upper-cased, space-padded title field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Title([u8; TITLE_SIZE]);

impl Title {
	/// Creates a title, upper-casing the input
	///
	/// Titles longer than the 21-byte header field are rejected rather than
	/// truncated.
	pub fn new(title: &str) -> Result<Self, Msu1Error> {
		if !title.is_ascii() {
			return Err(Msu1Error::TitleNotAscii(title.to_string()));
		}
		if title.len() > TITLE_SIZE {
			return Err(Msu1Error::TitleTooLong {
				title: title.to_string(),
				length: title.len(),
				max: TITLE_SIZE,
			});
		}

		let mut raw = [b' '; TITLE_SIZE];
		for (dst, src) in raw.iter_mut().zip(title.bytes()) {
			*dst = src.to_ascii_uppercase();
		}
		Ok(Self(raw))
	}

	/// Wraps a raw header field
	pub fn from_raw(raw: [u8; TITLE_SIZE]) -> Self {
		Self(raw)
	}

	/// Raw, space-padded bytes
	pub fn as_bytes(&self) -> &[u8; TITLE_SIZE] {
		&self.0
	}

	/// Title without trailing padding
	pub fn as_str(&self) -> String {
		String::from_utf8_lossy(&self.0).trim_end().to_string()
	}
}

impl Default for Title {
	fn default() -> Self {
		Self([b' '; TITLE_SIZE])
	}
}

impl Display for Title {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Playback rate in frames per second, 1 - 60
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fps(u8);

impl Fps {
	/// Creates a validated frame rate
	pub fn new(fps: u8) -> Result<Self, Msu1Error> {
		if fps == 0 || fps > MAX_FPS {
			return Err(Msu1Error::InvalidFps(fps));
		}
		Ok(Self(fps))
	}

	/// Raw value
	pub fn get(self) -> u8 {
		self.0
	}
}

impl Default for Fps {
	fn default() -> Self {
		Self(24)
	}
}

/// Validated per-container settings
///
/// Built once before packing starts and only ever read afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContainerOptions {
	/// Header title
	pub title: Title,
	/// Tile color depth
	pub color_depth: ColorDepth,
	/// Playback rate
	pub fps: Fps,
}

impl ContainerOptions {
	/// Validates raw option values
	pub fn new(title: &str, bpp: u8, fps: u8) -> Result<Self, Msu1Error> {
		Ok(Self {
			title: Title::new(title)?,
			color_depth: ColorDepth::from_bpp(bpp)?,
			fps: Fps::new(fps)?,
		})
	}
}

/// MSU-1 data file header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	/// Title field
	pub title: Title,
	/// Tile color depth
	pub color_depth: ColorDepth,
	/// Playback rate
	pub fps: u8,
	/// Low byte of the chapter count
	pub chapter_count: u8,
}

impl Header {
	/// Creates a header for the given options and chapter count
	pub fn new(options: &ContainerOptions, chapter_count: usize) -> Self {
		Self {
			title: options.title,
			color_depth: options.color_depth,
			fps: options.fps.get(),
			chapter_count: (chapter_count & 0xFF) as u8,
		}
	}

	/// Loads header from a byte slice
	pub fn from_bytes(data: &[u8]) -> Result<Self, Msu1Error> {
		if data.len() < HEADER_SIZE {
			return Err(Msu1Error::insufficient_data(FileType::Msu, HEADER_SIZE, data.len()));
		}

		if data[0..MAGIC.len()] != MAGIC {
			return Err(Msu1Error::invalid_magic(FileType::Msu, &MAGIC, &data[0..MAGIC.len()]));
		}

		let mut title = [0u8; TITLE_SIZE];
		title.copy_from_slice(&data[TITLE_OFFSET..TITLE_OFFSET + TITLE_SIZE]);

		Ok(Self {
			title: Title::from_raw(title),
			color_depth: ColorDepth::from_code(data[COLOR_DEPTH_OFFSET])?,
			fps: data[FPS_OFFSET],
			chapter_count: data[CHAPTER_COUNT_OFFSET],
		})
	}

	/// Serializes header to bytes, zero padded to the full header size
	pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
		let mut buffer = [0u8; HEADER_SIZE];
		buffer[0..MAGIC.len()].copy_from_slice(&MAGIC);
		buffer[TITLE_OFFSET..TITLE_OFFSET + TITLE_SIZE].copy_from_slice(self.title.as_bytes());
		buffer[COLOR_DEPTH_OFFSET] = self.color_depth.code();
		buffer[FPS_OFFSET] = self.fps;
		buffer[CHAPTER_COUNT_OFFSET] = self.chapter_count;
		buffer
	}
}

impl Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Header:\n\
			- Title: {}\n\
			- Color Depth: {} (code {})\n\
			- FPS: {}\n\
			- Chapters: {}",
			self.title,
			self.color_depth,
			self.color_depth.code(),
			self.fps,
			self.chapter_count
		)
	}
}

/// Packed length header of a frame record
///
/// ```text
/// bits  0-10  tilemap length / 2
/// bits 11-21  tiles length >> color depth shift
/// bits 22-29  palette length / 2
/// bits 30-31  zero
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LengthHeader(u32);

const TILEMAP_MASK: u32 = 0x7FF;
const TILES_MASK: u32 = 0x7FF;
const PALETTE_MASK: u32 = 0xFF;
const TILES_SHIFT: u32 = 11;
const PALETTE_SHIFT: u32 = 22;

impl LengthHeader {
	/// Packs the three blob lengths, masking each field to its width
	pub fn encode(
		tilemap_len: usize,
		tiles_len: usize,
		palette_len: usize,
		color_depth: ColorDepth,
	) -> Self {
		let tilemap = ((tilemap_len / 2) as u32) & TILEMAP_MASK;
		let tiles = ((tiles_len >> color_depth.shift()) as u32) & TILES_MASK;
		let palette = ((palette_len / 2) as u32) & PALETTE_MASK;
		Self(tilemap | (tiles << TILES_SHIFT) | (palette << PALETTE_SHIFT))
	}

	/// Whether [`LengthHeader::encode`] preserves all three lengths exactly
	pub fn is_exact(
		tilemap_len: usize,
		tiles_len: usize,
		palette_len: usize,
		color_depth: ColorDepth,
	) -> bool {
		let header = Self::encode(tilemap_len, tiles_len, palette_len, color_depth);
		header.tilemap_len() == tilemap_len
			&& header.tiles_len(color_depth) == tiles_len
			&& header.palette_len() == palette_len
	}

	/// Wraps a raw header value
	pub fn from_raw(raw: u32) -> Self {
		Self(raw)
	}

	/// Raw 32-bit value
	pub fn raw(self) -> u32 {
		self.0
	}

	/// Tilemap length in bytes
	pub fn tilemap_len(self) -> usize {
		((self.0 & TILEMAP_MASK) as usize) * 2
	}

	/// Tile data length in bytes
	pub fn tiles_len(self, color_depth: ColorDepth) -> usize {
		(((self.0 >> TILES_SHIFT) & TILES_MASK) as usize) << color_depth.shift()
	}

	/// Palette length in bytes
	pub fn palette_len(self) -> usize {
		(((self.0 >> PALETTE_SHIFT) & PALETTE_MASK) as usize) * 2
	}

	/// Sum of the three decoded lengths
	pub fn payload_len(self, color_depth: ColorDepth) -> usize {
		self.tilemap_len() + self.tiles_len(color_depth) + self.palette_len()
	}
}
