//! Iterator implementations for MSU-1 data files.

use std::io::{Read, Seek};

use crate::file::Msu1Error;

use super::file::{File, FrameRecord, SceneInfo};

/// Iterator over scene descriptors, in scene pointer table order
pub struct SceneIter<'a, R> {
	pub(super) file: &'a mut File<R>,
	pub(super) current: usize,
}

impl<'a, R: Read + Seek> Iterator for SceneIter<'a, R> {
	type Item = Result<SceneInfo, Msu1Error>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.current >= self.file.scene_count() {
			return None;
		}
		let index = self.current;
		self.current += 1;
		Some(self.file.scene(index))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.file.scene_count().saturating_sub(self.current);
		(remaining, Some(remaining))
	}
}

/// Iterator over the frame records of one scene
///
/// Records are read on demand. A record that fails to parse yields an error
/// and the iterator moves on to the next pointer.
pub struct FrameIter<'a, R> {
	pub(super) file: &'a mut File<R>,
	pub(super) pointers: &'a [u32],
	pub(super) current: usize,
}

impl<'a, R: Read + Seek> Iterator for FrameIter<'a, R> {
	type Item = Result<FrameRecord, Msu1Error>;

	fn next(&mut self) -> Option<Self::Item> {
		let offset = *self.pointers.get(self.current)?;
		self.current += 1;
		Some(self.file.frame_at(offset))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.pointers.len().saturating_sub(self.current);
		(remaining, Some(remaining))
	}
}
