//! Chapter descriptors and model construction.
//!
//! A [`ChapterSource`] lists the files found in one chapter folder without
//! reading any of them. [`ChapterSource::load`] turns it into a [`Chapter`]
//! by fetching blobs through an [`AssetReader`], which keeps the
//! construction step independent of the real filesystem.

use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::file::Msu1Error;

use super::constants::{
	AUDIO_MARKER, CHAPTER_MARKER, FRAME_TILES_MARKER, PALETTE_EXTENSION, TILEMAP_EXTENSION,
	TILES_EXTENSION,
};
use super::model::{Chapter, ChapterSet, Frame};

/// Source of raw asset bytes
pub trait AssetReader {
	/// Reads the whole file at `path`
	fn read_asset(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<T: AssetReader + ?Sized> AssetReader for &T {
	fn read_asset(&self, path: &Path) -> io::Result<Vec<u8>> {
		(**self).read_asset(path)
	}
}

/// Files found in one chapter folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChapterSource {
	/// Folder name
	pub name: String,
	/// Folder path
	pub dir: PathBuf,
	/// Chapter id marker file names
	pub markers: Vec<String>,
	/// Frame base names (tile file name without its extension), sorted
	pub frames: Vec<String>,
	/// Audio blob file names
	pub audio: Vec<String>,
}

/// Classification of a file inside a chapter folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterFile {
	/// Chapter id marker
	Marker,
	/// Tile file of a frame
	FrameTiles,
	/// Audio blob
	Audio,
	/// Anything else, tilemaps and palettes included
	Other,
}

impl ChapterFile {
	/// Classifies a file by name
	pub fn classify(file_name: &str) -> Self {
		if file_name.starts_with(CHAPTER_MARKER) {
			Self::Marker
		} else if file_name.contains(FRAME_TILES_MARKER) {
			Self::FrameTiles
		} else if file_name.contains(AUDIO_MARKER) {
			Self::Audio
		} else {
			Self::Other
		}
	}
}

/// Extracts the chapter id from a marker file name such as `chapter.id.003`
pub fn parse_chapter_id(marker: &str) -> Result<u8, Msu1Error> {
	marker
		.strip_prefix(CHAPTER_MARKER)
		.and_then(|rest| rest.strip_prefix('.'))
		.and_then(|suffix| suffix.parse::<u8>().ok())
		.ok_or_else(|| Msu1Error::InvalidChapterId {
			marker: marker.to_string(),
		})
}

/// Strips the final extension off a tile file name
pub fn frame_base_name(tiles_file: &str) -> &str {
	match tiles_file.rfind('.') {
		Some(pos) if pos > 0 => &tiles_file[..pos],
		_ => tiles_file,
	}
}

impl ChapterSource {
	/// Creates an empty descriptor for a chapter folder
	pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
		Self {
			name: name.into(),
			dir: dir.into(),
			..Self::default()
		}
	}

	/// Records a file of the chapter folder by name
	pub fn add_file(&mut self, file_name: &str) {
		match ChapterFile::classify(file_name) {
			ChapterFile::Marker => self.markers.push(file_name.to_string()),
			ChapterFile::FrameTiles => {
				let base = frame_base_name(file_name).to_string();
				let pos = self.frames.binary_search(&base).unwrap_or_else(|pos| pos);
				self.frames.insert(pos, base);
			}
			ChapterFile::Audio => self.audio.push(file_name.to_string()),
			ChapterFile::Other => {}
		}
	}

	/// Resolves the chapter id from the single marker file
	pub fn chapter_id(&self) -> Result<u8, Msu1Error> {
		match self.markers.as_slice() {
			[marker] => parse_chapter_id(marker),
			markers => Err(Msu1Error::ChapterMarkerCount {
				chapter: self.name.clone(),
				found: markers.len(),
			}),
		}
	}

	fn read_frame_asset<R: AssetReader>(
		&self,
		reader: &R,
		frame: &str,
		extension: &'static str,
	) -> Result<Vec<u8>, Msu1Error> {
		let path = self.dir.join(format!("{frame}.{extension}"));
		reader.read_asset(&path).map_err(|e| match e.kind() {
			io::ErrorKind::NotFound => Msu1Error::MissingFrameAsset {
				chapter: self.name.clone(),
				frame: frame.to_string(),
				asset: extension,
			},
			_ => Msu1Error::Io(e),
		})
	}

	/// Reads every frame and the audio blob into a [`Chapter`]
	pub fn load<R: AssetReader>(&self, reader: &R) -> Result<Chapter, Msu1Error> {
		let id = self.chapter_id()?;

		let frames = self
			.frames
			.iter()
			.map(|base| {
				Ok(Frame::new(
					base.as_str(),
					self.read_frame_asset(reader, base, TILES_EXTENSION)?,
					self.read_frame_asset(reader, base, TILEMAP_EXTENSION)?,
					self.read_frame_asset(reader, base, PALETTE_EXTENSION)?,
				))
			})
			.collect::<Result<Vec<_>, Msu1Error>>()?;

		let audio = match self.audio.as_slice() {
			[] => {
				warn!(
					"Chapter folder {} does not contain a msu1 pcm audio file. Proceeding without audio.",
					self.name
				);
				Vec::new()
			}
			[file] => reader.read_asset(&self.dir.join(file))?,
			files => {
				return Err(Msu1Error::AudioFileCount {
					chapter: self.name.clone(),
					found: files.len(),
				});
			}
		};

		Chapter::new(id, self.name.as_str(), frames, audio)
	}
}

impl ChapterSet {
	/// Loads every described chapter and orders them by id
	pub fn from_sources<R: AssetReader>(
		sources: &[ChapterSource],
		reader: &R,
	) -> Result<Self, Msu1Error> {
		let chapters =
			sources.iter().map(|source| source.load(reader)).collect::<Result<Vec<_>, _>>()?;
		Self::new(chapters)
	}
}
