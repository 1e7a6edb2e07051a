//! Reading MSU-1 data files.
//!
//! [`File`] walks the pointer tables of an existing container. It is the
//! inverse of the writer and is used to inspect and verify packed output.

use std::io::{Read, Seek, SeekFrom};

use crate::file::{FileType, Msu1Error};

use super::constants::{FRAME_HEADER_SIZE, HEADER_SIZE, POINTER_SIZE, SCENE_HEADER_SIZE};
use super::iterator::{FrameIter, SceneIter};
use super::types::{Header, LengthHeader};

/// Scene descriptor as stored in the scene region
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneInfo {
	/// Position in the scene pointer table
	pub index: usize,
	/// Absolute offset of the descriptor
	pub offset: u32,
	/// Chapter id
	pub id: u8,
	/// Absolute offsets of the frame records
	pub frame_pointers: Vec<u32>,
}

impl SceneInfo {
	/// Number of frames in the scene
	pub fn frame_count(&self) -> usize {
		self.frame_pointers.len()
	}

	/// Size of the descriptor in bytes
	pub fn descriptor_size(&self) -> u64 {
		(SCENE_HEADER_SIZE + self.frame_pointers.len() * POINTER_SIZE) as u64
	}
}

/// Frame record as stored in the frame region
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameRecord {
	/// Frame index within its chapter
	pub index: u16,
	/// Absolute offset of the record
	pub offset: u32,
	/// Packed blob lengths
	pub length_header: LengthHeader,
	/// Raw tilemap data
	pub tilemap: Vec<u8>,
	/// Raw tile data
	pub tiles: Vec<u8>,
	/// Raw palette data
	pub palette: Vec<u8>,
}

impl FrameRecord {
	/// Size of the record in bytes, header included
	pub fn record_size(&self) -> u64 {
		(FRAME_HEADER_SIZE + self.tilemap.len() + self.tiles.len() + self.palette.len()) as u64
	}
}

/// File structure for MSU-1 data files
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File<R> {
	/// Underlying reader for file operations
	pub(super) reader: R,

	/// Parsed file header
	pub(super) header: Header,

	/// Scene pointer table
	pub(super) scene_pointers: Vec<u32>,
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, Msu1Error> {
	let mut buffer = [0u8; 4];
	reader.read_exact(&mut buffer)?;
	Ok(u32::from_le_bytes(buffer))
}

impl<R: Read + Seek> File<R> {
	/// Reads the header and scene pointer table from the given reader
	pub fn from_reader(mut reader: R) -> Result<Self, Msu1Error> {
		reader.seek(SeekFrom::Start(0))?;
		let mut buffer = [0u8; HEADER_SIZE];
		reader.read_exact(&mut buffer)?;
		let header = Header::from_bytes(&buffer)?;

		let scene_pointers = (0..header.chapter_count)
			.map(|_| read_u32(&mut reader))
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			reader,
			header,
			scene_pointers,
		})
	}

	/// Parsed header
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Number of scenes listed in the scene pointer table
	pub fn scene_count(&self) -> usize {
		self.scene_pointers.len()
	}

	/// Scene pointer table
	pub fn scene_pointers(&self) -> &[u32] {
		&self.scene_pointers
	}

	/// Size of the underlying stream in bytes
	pub fn stream_len(&mut self) -> Result<u64, Msu1Error> {
		Ok(self.reader.seek(SeekFrom::End(0))?)
	}

	/// Reads the scene descriptor at position `index` of the scene pointer table
	pub fn scene(&mut self, index: usize) -> Result<SceneInfo, Msu1Error> {
		let offset = *self.scene_pointers.get(index).ok_or_else(|| {
			Msu1Error::entry_not_found(
				FileType::Msu,
				format!("Scene {} out of range (scenes: {})", index, self.scene_pointers.len()),
			)
		})?;

		self.reader.seek(SeekFrom::Start(u64::from(offset)))?;
		let mut buffer = [0u8; SCENE_HEADER_SIZE];
		self.reader.read_exact(&mut buffer)?;
		let frame_count = u32::from_le_bytes([buffer[1], buffer[2], buffer[3], 0]);

		let frame_pointers = (0..frame_count)
			.map(|_| read_u32(&mut self.reader))
			.collect::<Result<Vec<_>, _>>()?;

		Ok(SceneInfo {
			index,
			offset,
			id: buffer[0],
			frame_pointers,
		})
	}

	/// Reads the frame record starting at `offset`
	pub fn frame_at(&mut self, offset: u32) -> Result<FrameRecord, Msu1Error> {
		self.reader.seek(SeekFrom::Start(u64::from(offset)))?;
		let mut buffer = [0u8; FRAME_HEADER_SIZE];
		self.reader.read_exact(&mut buffer)?;

		let index = u16::from_le_bytes([buffer[0], buffer[1]]);
		let length_header =
			LengthHeader::from_raw(u32::from_le_bytes([buffer[2], buffer[3], buffer[4], buffer[5]]));

		let color_depth = self.header.color_depth;
		let mut tilemap = vec![0u8; length_header.tilemap_len()];
		self.reader.read_exact(&mut tilemap)?;
		let mut tiles = vec![0u8; length_header.tiles_len(color_depth)];
		self.reader.read_exact(&mut tiles)?;
		let mut palette = vec![0u8; length_header.palette_len()];
		self.reader.read_exact(&mut palette)?;

		Ok(FrameRecord {
			index,
			offset,
			length_header,
			tilemap,
			tiles,
			palette,
		})
	}

	/// Reads frame `frame` of scene `scene`
	pub fn frame(&mut self, scene: usize, frame: usize) -> Result<FrameRecord, Msu1Error> {
		let info = self.scene(scene)?;
		let offset = *info.frame_pointers.get(frame).ok_or_else(|| {
			Msu1Error::entry_not_found(
				FileType::Msu,
				format!(
					"Frame {} of scene {} out of range (frames: {})",
					frame,
					scene,
					info.frame_count()
				),
			)
		})?;
		self.frame_at(offset)
	}

	/// Returns an iterator over all scene descriptors
	pub fn iter_scenes(&mut self) -> SceneIter<'_, R> {
		SceneIter {
			file: self,
			current: 0,
		}
	}

	/// Returns an iterator over the frame records of `scene`
	pub fn iter_frames<'a>(&'a mut self, scene: &'a SceneInfo) -> FrameIter<'a, R> {
		FrameIter {
			file: self,
			pointers: &scene.frame_pointers,
			current: 0,
		}
	}

	/// Checks that the pointer tables describe a gapless, non-overlapping file
	///
	/// Scene descriptors must follow each other directly after the scene
	/// pointer table, frame records must follow each other directly after
	/// the last descriptor, and the last record must end exactly at the end
	/// of the stream. Returns the number of frame records checked.
	pub fn verify(&mut self) -> Result<usize, Msu1Error> {
		let mut expected = (HEADER_SIZE + self.scene_pointers.len() * POINTER_SIZE) as u64;
		let mut scenes = Vec::with_capacity(self.scene_pointers.len());
		for index in 0..self.scene_pointers.len() {
			let scene = self.scene(index)?;
			if u64::from(scene.offset) != expected {
				return Err(Msu1Error::corrupt(
					FileType::Msu,
					format!("scene {} starts at 0x{:08x}, expected 0x{:08x}", index, scene.offset, expected),
				));
			}
			expected += scene.descriptor_size();
			scenes.push(scene);
		}

		let mut frames = 0;
		for scene in &scenes {
			for (position, &pointer) in scene.frame_pointers.iter().enumerate() {
				if u64::from(pointer) != expected {
					return Err(Msu1Error::corrupt(
						FileType::Msu,
						format!(
							"frame {} of scene {} starts at 0x{:08x}, expected 0x{:08x}",
							position, scene.index, pointer, expected
						),
					));
				}
				let record = self.frame_at(pointer)?;
				if usize::from(record.index) != position {
					return Err(Msu1Error::corrupt(
						FileType::Msu,
						format!(
							"frame {} of scene {} carries index {}",
							position, scene.index, record.index
						),
					));
				}
				expected += record.record_size();
				frames += 1;
			}
		}

		let len = self.stream_len()?;
		if len != expected {
			return Err(Msu1Error::corrupt(
				FileType::Msu,
				format!("last record ends at 0x{expected:08x}, file is 0x{len:08x} bytes long"),
			));
		}

		Ok(frames)
	}
}

impl File<std::io::BufReader<std::fs::File>> {
	/// Opens an MSU-1 data file from the given path
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, Msu1Error> {
		let file = std::fs::File::open(path)?;
		let reader = std::io::BufReader::new(file);
		Self::from_reader(reader)
	}
}
