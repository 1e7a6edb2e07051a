//! Benchmark helper utilities for msu1-rs
//!
//! This module generates synthetic chapter sets shaped like real productions:
//! 4bpp frames with a 2 KiB tilemap, a 32-color palette and a tile blob that
//! varies in size from frame to frame.

use msu1_types::file::Msu1Error;
use msu1_types::file::msu::{Chapter, ChapterSet, Frame};

/// Tilemap size of a full 32x32 screen
pub const TILEMAP_LEN: usize = 0x800;

/// Palette size of 32 BGR555 colors
pub const PALETTE_LEN: usize = 0x40;

/// Generates one frame whose tile blob holds `tile_count` 4bpp tiles
pub fn generate_frame(index: usize, tile_count: usize) -> Frame {
	let seed = (index & 0xFF) as u8;
	let tiles = (0..tile_count * 32).map(|i| (i as u8).wrapping_add(seed)).collect();
	Frame::new(
		format!("video_{index:06}.gfx_video"),
		tiles,
		vec![seed; TILEMAP_LEN],
		vec![seed.wrapping_mul(3); PALETTE_LEN],
	)
}

/// Generates `chapters` chapters of `frames_per_chapter` frames each
///
/// Tile counts cycle between 256 and 767 tiles so frame records differ in
/// size.
pub fn generate_chapter_set(
	chapters: u8,
	frames_per_chapter: usize,
) -> Result<ChapterSet, Msu1Error> {
	let chapters = (0..chapters)
		.map(|id| {
			let frames = (0..frames_per_chapter)
				.map(|index| generate_frame(index, 256 + (index * 37 + usize::from(id)) % 512))
				.collect();
			Chapter::new(id, format!("chapter_{id:03}"), frames, b"MSU1\0\0\0\0".to_vec())
		})
		.collect::<Result<Vec<_>, _>>()?;

	ChapterSet::new(chapters)
}
