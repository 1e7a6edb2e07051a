//! Serialization of MSU-1 data files.
//!
//! [`ContainerWriter`] writes a planned [`Layout`] region by region, seeking
//! to each precomputed offset. Chapter audio does not live in the container;
//! it is handed to an [`AudioSink`] while the chapter's scene descriptor is
//! written.

use std::io::{Cursor, Seek, SeekFrom, Write};

use log::{debug, warn};

use crate::file::Msu1Error;

use super::layout::Layout;
use super::model::{Chapter, ChapterSet};
use super::types::{ContainerOptions, Header};

/// Receiver of per-chapter audio blobs
pub trait AudioSink {
	/// Stores the audio of `chapter`, which may be empty
	fn write_audio(&mut self, chapter: &Chapter) -> Result<(), Msu1Error>;
}

/// Keeps audio blobs in memory as `(chapter id, blob)` pairs
impl AudioSink for Vec<(u8, Vec<u8>)> {
	fn write_audio(&mut self, chapter: &Chapter) -> Result<(), Msu1Error> {
		self.push((chapter.id(), chapter.audio().to_vec()));
		Ok(())
	}
}

/// Discards chapter audio
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardAudio;

impl AudioSink for DiscardAudio {
	fn write_audio(&mut self, _chapter: &Chapter) -> Result<(), Msu1Error> {
		Ok(())
	}
}

/// Counters describing a written container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WriteSummary {
	/// Number of chapters written
	pub chapters: usize,
	/// Number of frame records written, held frames included
	pub frames: usize,
	/// Size of the container in bytes
	pub bytes: u64,
}

/// Writes chapter sets as MSU-1 data files
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerWriter {
	options: ContainerOptions,
}

impl ContainerWriter {
	/// Creates a writer for the given container options
	pub fn new(options: ContainerOptions) -> Self {
		Self {
			options,
		}
	}

	/// Options used for the header and the length headers
	pub fn options(&self) -> &ContainerOptions {
		&self.options
	}

	/// Writes `chapters` at the offsets resolved in `layout`
	///
	/// `layout` must have been planned from the same chapter set. Nothing is
	/// written if the container would not be addressable with 32-bit
	/// pointers.
	pub fn write<W, A>(
		&self,
		chapters: &ChapterSet,
		layout: &Layout,
		writer: &mut W,
		audio: &mut A,
	) -> Result<WriteSummary, Msu1Error>
	where
		W: Write + Seek,
		A: AudioSink + ?Sized,
	{
		debug_assert_eq!(layout.scenes().len(), chapters.len());
		layout.check_addressable()?;

		// Header
		writer.seek(SeekFrom::Start(layout.header_offset()))?;
		writer.write_all(&Header::new(&self.options, chapters.len()).to_bytes())?;

		// Scene pointer table
		writer.seek(SeekFrom::Start(layout.scene_pointer_table_offset()))?;
		for pointer in layout.scene_pointers() {
			writer.write_all(&(pointer as u32).to_le_bytes())?;
		}

		// Scene descriptors, each with its frame pointer table
		writer.seek(SeekFrom::Start(layout.scene_region_offset()))?;
		for (chapter, scene) in chapters.iter().zip(layout.scenes()) {
			debug_assert_eq!(chapter.frame_count(), scene.frame_count());
			debug!(
				"Now writing scene {:02} ({}) at offset 0x{:08x}.",
				chapter.id(),
				chapter.name(),
				scene.offset
			);

			writer.write_all(&[chapter.id()])?;
			writer.write_all(&(scene.frame_count() as u32).to_le_bytes()[..3])?;
			for &pointer in &scene.frame_pointers {
				writer.write_all(&(pointer as u32).to_le_bytes())?;
			}

			debug!("Now writing audio of scene {:02} ({}).", chapter.id(), chapter.name());
			audio.write_audio(chapter)?;
		}

		// Frame records
		let color_depth = self.options.color_depth;
		writer.seek(SeekFrom::Start(layout.frame_data_offset()))?;
		for (chapter, scene) in chapters.iter().zip(layout.scenes()) {
			for (index, (frame, &pointer)) in
				chapter.frames().iter().zip(&scene.frame_pointers).enumerate()
			{
				debug!(
					"Now writing frame {} of scene {:02} ({}) at offset 0x{:08x}.",
					frame.name(),
					chapter.id(),
					chapter.name(),
					pointer
				);

				if !frame.fits_length_header(color_depth) {
					warn!(
						"Frame {} of scene {:02} ({}) has asset lengths the length header cannot \
						 represent exactly (tilemap {}, tiles {}, palette {} bytes at {}).",
						frame.name(),
						chapter.id(),
						chapter.name(),
						frame.tilemap().len(),
						frame.tiles().len(),
						frame.palette().len(),
						color_depth
					);
				}

				writer.write_all(&(index as u16).to_le_bytes())?;
				writer.write_all(&frame.length_header(color_depth).raw().to_le_bytes())?;
				writer.write_all(frame.tilemap())?;
				writer.write_all(frame.tiles())?;
				writer.write_all(frame.palette())?;
			}
		}

		writer.flush()?;

		Ok(WriteSummary {
			chapters: chapters.len(),
			frames: chapters.frame_count(),
			bytes: layout.total_size(),
		})
	}

	/// Plans and serializes `chapters` into a byte buffer
	///
	/// # Examples
	///
	/// ```
	/// use msu1_types::file::msu::{Chapter, ChapterSet, ContainerOptions, ContainerWriter, Frame};
	///
	/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
	/// let frame = Frame::new("f", vec![0; 32], vec![0; 2], vec![0; 2]);
	/// let chapter = Chapter::new(0, "intro", vec![frame], Vec::new())?;
	/// let chapters = ChapterSet::new(vec![chapter])?;
	///
	/// let writer = ContainerWriter::new(ContainerOptions::new("demo", 4, 24)?);
	/// let mut audio: Vec<(u8, Vec<u8>)> = Vec::new();
	/// let bytes = writer.to_bytes(&chapters, &mut audio)?;
	/// assert_eq!(&bytes[0..6], b"S-MSU1");
	/// assert_eq!(audio, vec![(0u8, Vec::new())]);
	/// # Ok(())
	/// # }
	/// ```
	pub fn to_bytes<A: AudioSink + ?Sized>(
		&self,
		chapters: &ChapterSet,
		audio: &mut A,
	) -> Result<Vec<u8>, Msu1Error> {
		self.write_to_vec(chapters, &Layout::for_chapters(chapters), audio)
	}

	/// Serializes `chapters` at the offsets of an already planned `layout`
	///
	/// The buffer is only reserved once the layout is known to be addressable.
	pub fn write_to_vec<A: AudioSink + ?Sized>(
		&self,
		chapters: &ChapterSet,
		layout: &Layout,
		audio: &mut A,
	) -> Result<Vec<u8>, Msu1Error> {
		layout.check_addressable()?;
		let mut cursor = Cursor::new(Vec::with_capacity(layout.total_size() as usize));
		self.write(chapters, layout, &mut cursor, audio)?;
		Ok(cursor.into_inner())
	}
}
