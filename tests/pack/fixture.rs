//! On-disk chapter trees for pack tests

use std::fs;
use std::path::PathBuf;

use msu1_rs::prelude::{ContainerOptions, PackConfig};
use tempfile::TempDir;

/// Temporary input base plus output location
pub struct Fixture {
	dir: TempDir,
}

impl Fixture {
	pub fn new() -> Self {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir(dir.path().join("chapters")).unwrap();
		Self {
			dir,
		}
	}

	pub fn input(&self) -> PathBuf {
		self.dir.path().join("chapters")
	}

	pub fn output(&self) -> PathBuf {
		self.dir.path().join("movie.msu")
	}

	pub fn config(&self) -> PackConfig {
		PackConfig::new(self.input(), self.output(), ContainerOptions::new("Dragon's Lair", 4, 24).unwrap())
	}

	/// Creates a chapter folder with a `chapter.id.NNN` marker
	pub fn chapter(&self, folder: &str, id: u16) -> PathBuf {
		let path = self.folder(folder);
		fs::write(path.join(format!("chapter.id.{id:03}")), b"").unwrap();
		path
	}

	/// Creates a chapter folder without marker
	pub fn folder(&self, folder: &str) -> PathBuf {
		let path = self.input().join(folder);
		fs::create_dir_all(&path).unwrap();
		path
	}

	/// Writes the three assets of a frame, each blob filled with `fill`
	pub fn frame(&self, folder: &str, name: &str, lengths: (usize, usize, usize), fill: u8) {
		let (tiles, tilemap, palette) = lengths;
		let path = self.input().join(folder);
		let base = format!("{name}.gfx_video");
		fs::write(path.join(format!("{base}.tiles")), vec![fill; tiles]).unwrap();
		fs::write(path.join(format!("{base}.tilemap")), vec![fill.wrapping_add(1); tilemap]).unwrap();
		fs::write(path.join(format!("{base}.palette")), vec![fill.wrapping_add(2); palette]).unwrap();
	}

	pub fn audio(&self, folder: &str, data: &[u8]) {
		fs::write(self.input().join(folder).join("audio.sfx_video.pcm"), data).unwrap();
	}
}
