//! In-memory chapter and frame model.
//!
//! A packing run loads every asset blob before any offset is computed. The
//! types here own those blobs; the layout planner and the writer only borrow
//! them.

use log::warn;

use crate::file::Msu1Error;

use super::constants::{FRAME_HEADER_SIZE, HOLD_FRAMES, MAX_CHAPTERS, MAX_FRAMES};
use super::types::{ColorDepth, LengthHeader};

/// One animation still, stored as three opaque blobs
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Frame {
	name: String,
	tiles: Vec<u8>,
	tilemap: Vec<u8>,
	palette: Vec<u8>,
}

impl Frame {
	/// Creates a frame from its asset blobs
	pub fn new(
		name: impl Into<String>,
		tiles: Vec<u8>,
		tilemap: Vec<u8>,
		palette: Vec<u8>,
	) -> Self {
		Self {
			name: name.into(),
			tiles,
			tilemap,
			palette,
		}
	}

	/// Base name the frame was loaded from
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Raw tile data
	pub fn tiles(&self) -> &[u8] {
		&self.tiles
	}

	/// Raw tilemap data
	pub fn tilemap(&self) -> &[u8] {
		&self.tilemap
	}

	/// Raw palette data
	pub fn palette(&self) -> &[u8] {
		&self.palette
	}

	/// Combined length of the three blobs
	pub fn total_length(&self) -> usize {
		self.tiles.len() + self.tilemap.len() + self.palette.len()
	}

	/// Size of the frame record in the container, header included
	pub fn record_size(&self) -> usize {
		FRAME_HEADER_SIZE + self.total_length()
	}

	/// Packed length header for this frame
	pub fn length_header(&self, color_depth: ColorDepth) -> LengthHeader {
		LengthHeader::encode(self.tilemap.len(), self.tiles.len(), self.palette.len(), color_depth)
	}

	/// Whether the packed length header describes this frame exactly
	pub fn fits_length_header(&self, color_depth: ColorDepth) -> bool {
		LengthHeader::is_exact(self.tilemap.len(), self.tiles.len(), self.palette.len(), color_depth)
	}
}

/// One animation sequence with its frames and optional audio
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chapter {
	id: u8,
	name: String,
	frames: Vec<Frame>,
	source_frame_count: usize,
	audio: Vec<u8>,
}

impl Chapter {
	/// Creates a chapter, holding the last frame for two extra frames
	///
	/// An empty frame list stays empty. `audio` may be empty when the chapter
	/// has no sound.
	pub fn new(
		id: u8,
		name: impl Into<String>,
		mut frames: Vec<Frame>,
		audio: Vec<u8>,
	) -> Result<Self, Msu1Error> {
		let name = name.into();
		let source_frame_count = frames.len();

		if let Some(last) = frames.last().cloned() {
			frames.extend(std::iter::repeat_n(last, HOLD_FRAMES));
		} else {
			warn!("Chapter {} ({}) contains no frames.", id, name);
		}

		if frames.len() > MAX_FRAMES {
			return Err(Msu1Error::TooManyFrames {
				chapter: name,
				count: frames.len(),
				max: MAX_FRAMES,
			});
		}

		Ok(Self {
			id,
			name,
			frames,
			source_frame_count,
			audio,
		})
	}

	/// Scene identifier
	pub fn id(&self) -> u8 {
		self.id
	}

	/// Folder name, for diagnostics
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Frames in playback order, held frames included
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Number of frames in playback order
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Number of frames before the last frame was held
	pub fn source_frame_count(&self) -> usize {
		self.source_frame_count
	}

	/// Raw audio blob, empty if the chapter has none
	pub fn audio(&self) -> &[u8] {
		&self.audio
	}

	/// Record sizes of all frames, in playback order
	pub fn record_sizes(&self) -> Vec<usize> {
		self.frames.iter().map(Frame::record_size).collect()
	}
}

/// All chapters of one container, ordered by id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChapterSet {
	chapters: Vec<Chapter>,
}

impl ChapterSet {
	/// Sorts chapters by id and checks the container limits
	pub fn new(mut chapters: Vec<Chapter>) -> Result<Self, Msu1Error> {
		if chapters.is_empty() {
			return Err(Msu1Error::NoChapters);
		}

		if chapters.len() > MAX_CHAPTERS {
			return Err(Msu1Error::TooManyChapters {
				count: chapters.len(),
				max: MAX_CHAPTERS,
			});
		}

		chapters.sort_by_key(Chapter::id);

		if let Some(pair) = chapters.windows(2).find(|pair| pair[0].id == pair[1].id) {
			return Err(Msu1Error::DuplicateChapterId {
				id: pair[0].id,
				first: pair[0].name.clone(),
				second: pair[1].name.clone(),
			});
		}

		Ok(Self {
			chapters,
		})
	}

	/// Chapters in id order
	pub fn chapters(&self) -> &[Chapter] {
		&self.chapters
	}

	/// Number of chapters
	pub fn len(&self) -> usize {
		self.chapters.len()
	}

	/// Always false, a chapter set holds at least one chapter
	pub fn is_empty(&self) -> bool {
		self.chapters.is_empty()
	}

	/// Total number of frames over all chapters
	pub fn frame_count(&self) -> usize {
		self.chapters.iter().map(Chapter::frame_count).sum()
	}

	/// Iterates chapters in id order
	pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
		self.chapters.iter()
	}
}

impl<'a> IntoIterator for &'a ChapterSet {
	type Item = &'a Chapter;
	type IntoIter = std::slice::Iter<'a, Chapter>;

	fn into_iter(self) -> Self::IntoIter {
		self.chapters.iter()
	}
}
