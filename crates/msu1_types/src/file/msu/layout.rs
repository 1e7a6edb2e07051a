//! Container layout planning.
//!
//! Every absolute offset of a data file follows from the chapter count, each
//! chapter's frame count and each frame's record size. [`Layout::plan`]
//! resolves them all in one left-to-right fold before a single byte is
//! written, so the writer can fill the pointer tables first and seek to
//! each region afterwards.
//!
//! ```text
//! 0x00                    header (32 bytes)
//! 0x20                    scene pointer table (4 bytes per chapter)
//! scene_region_offset     per chapter: id, 24-bit frame count, frame pointers
//! frame_data_offset       per frame: index, length header, tilemap, tiles, palette
//! ```
//!
//! Offsets are computed in `u64`. Whether they fit the 32-bit pointers of the
//! format is checked separately by [`Layout::check_addressable`].

use crate::file::Msu1Error;

use super::constants::{HEADER_SIZE, POINTER_SIZE, SCENE_HEADER_SIZE};
use super::model::ChapterSet;

/// Resolved position of one chapter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneLayout {
	/// Absolute offset of the scene descriptor
	pub offset: u64,
	/// Size of the scene descriptor, frame pointer table included
	pub descriptor_size: u64,
	/// Absolute offset of every frame record of this chapter
	pub frame_pointers: Vec<u64>,
}

impl SceneLayout {
	/// Number of frames addressed by this scene
	pub fn frame_count(&self) -> usize {
		self.frame_pointers.len()
	}
}

/// Resolved layout of a complete data file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
	scene_pointer_table_offset: u64,
	scene_pointer_table_size: u64,
	scene_region_offset: u64,
	scene_region_size: u64,
	frame_data_offset: u64,
	frame_data_size: u64,
	scenes: Vec<SceneLayout>,
}

/// Size of a scene descriptor holding `frame_count` frame pointers
pub fn scene_descriptor_size(frame_count: usize) -> u64 {
	(SCENE_HEADER_SIZE + frame_count * POINTER_SIZE) as u64
}

impl Layout {
	/// Plans a layout from per-chapter frame record sizes
	///
	/// `chapters` yields, in container order, the record size of every frame
	/// of a chapter (frame header included).
	///
	/// # Examples
	///
	/// ```
	/// use msu1_types::file::msu::Layout;
	///
	/// let layout = Layout::plan([vec![16usize, 26]]);
	/// assert_eq!(layout.scene_region_offset(), 0x24);
	/// assert_eq!(layout.frame_data_offset(), 0x24 + 4 + 2 * 4);
	/// assert_eq!(layout.scenes()[0].frame_pointers, vec![0x30, 0x40]);
	/// assert_eq!(layout.total_size(), 0x30 + 16 + 26);
	/// ```
	pub fn plan<I, S>(chapters: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<[usize]>,
	{
		let record_sizes: Vec<S> = chapters.into_iter().collect();

		let scene_pointer_table_offset = HEADER_SIZE as u64;
		let scene_pointer_table_size = (record_sizes.len() * POINTER_SIZE) as u64;
		let scene_region_offset = scene_pointer_table_offset + scene_pointer_table_size;
		let scene_region_size: u64 =
			record_sizes.iter().map(|sizes| scene_descriptor_size(sizes.as_ref().len())).sum();
		let frame_data_offset = scene_region_offset + scene_region_size;

		let mut scenes = Vec::with_capacity(record_sizes.len());
		let mut scene_pointer = scene_region_offset;
		// frame pointers keep running across chapter boundaries
		let mut frame_pointer = frame_data_offset;
		for sizes in &record_sizes {
			let sizes = sizes.as_ref();
			let descriptor_size = scene_descriptor_size(sizes.len());

			let mut frame_pointers = Vec::with_capacity(sizes.len());
			for &size in sizes {
				frame_pointers.push(frame_pointer);
				frame_pointer += size as u64;
			}

			scenes.push(SceneLayout {
				offset: scene_pointer,
				descriptor_size,
				frame_pointers,
			});
			scene_pointer += descriptor_size;
		}

		Self {
			scene_pointer_table_offset,
			scene_pointer_table_size,
			scene_region_offset,
			scene_region_size,
			frame_data_offset,
			frame_data_size: frame_pointer - frame_data_offset,
			scenes,
		}
	}

	/// Plans the layout of a chapter set
	pub fn for_chapters(chapters: &ChapterSet) -> Self {
		Self::plan(chapters.iter().map(super::model::Chapter::record_sizes))
	}

	/// Offset of the header
	pub const fn header_offset(&self) -> u64 {
		0
	}

	/// Size of the header
	pub const fn header_size(&self) -> u64 {
		HEADER_SIZE as u64
	}

	/// Offset of the scene pointer table
	pub fn scene_pointer_table_offset(&self) -> u64 {
		self.scene_pointer_table_offset
	}

	/// Size of the scene pointer table
	pub fn scene_pointer_table_size(&self) -> u64 {
		self.scene_pointer_table_size
	}

	/// Offset of the first scene descriptor
	pub fn scene_region_offset(&self) -> u64 {
		self.scene_region_offset
	}

	/// Combined size of all scene descriptors
	pub fn scene_region_size(&self) -> u64 {
		self.scene_region_size
	}

	/// Offset of the first frame record
	pub fn frame_data_offset(&self) -> u64 {
		self.frame_data_offset
	}

	/// Combined size of all frame records
	pub fn frame_data_size(&self) -> u64 {
		self.frame_data_size
	}

	/// Per-chapter layout, in container order
	pub fn scenes(&self) -> &[SceneLayout] {
		&self.scenes
	}

	/// Values of the scene pointer table
	pub fn scene_pointers(&self) -> impl Iterator<Item = u64> + '_ {
		self.scenes.iter().map(|scene| scene.offset)
	}

	/// Size of the complete file
	pub fn total_size(&self) -> u64 {
		self.frame_data_offset + self.frame_data_size
	}

	/// Fails if any byte of the file lies beyond 32-bit addressing
	pub fn check_addressable(&self) -> Result<(), Msu1Error> {
		let size = self.total_size();
		if size > u64::from(u32::MAX) {
			return Err(Msu1Error::ContainerTooLarge {
				size,
			});
		}
		Ok(())
	}
}
