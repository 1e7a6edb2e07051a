//! Filesystem access for the `msu1-rs` project.
//!
//! Packing reads an input base folder holding one sub-folder per chapter and
//! writes one audio file next to the packed container for every chapter.
//!
//! - [`scan_chapters`] lists chapter folders and the files inside them
//! - [`FsAssetReader`] reads frame and audio blobs from disk
//! - [`MemoryAssets`] serves the same blobs from memory
//! - [`AudioFileWriter`] stores chapter audio as `<output stem>-<id>.pcm`

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use msu1_types::file::Msu1Error;
use msu1_types::file::msu::{AssetReader, AudioSink, Chapter, ChapterSource};
use walkdir::WalkDir;

/// Lists the chapter folders directly below `base`, sorted by folder name
///
/// Every sub-folder is a chapter. Files directly inside `base` are ignored,
/// and nothing below a chapter folder's own files is visited. Symbolic links
/// to folders and files count as what they point to.
pub fn scan_chapters(base: impl AsRef<Path>) -> Result<Vec<ChapterSource>, Msu1Error> {
	let base = base.as_ref();
	if !base.is_dir() {
		return Err(Msu1Error::MissingInputBase(base.to_path_buf()));
	}

	let mut sources = Vec::new();
	let walker = WalkDir::new(base).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();
	for entry in walker {
		let entry = entry.map_err(io::Error::from)?;
		if !entry.file_type().is_dir() {
			continue;
		}

		let name = entry.file_name().to_string_lossy().into_owned();
		let source = scan_chapter(name, entry.path())?;
		debug!(
			"Found chapter folder {} ({} frames, {} audio files)",
			source.name,
			source.frames.len(),
			source.audio.len()
		);
		sources.push(source);
	}

	info!("Found {} chapter folders in {}", sources.len(), base.display());
	Ok(sources)
}

/// Lists the files of a single chapter folder
pub fn scan_chapter(name: impl Into<String>, dir: &Path) -> Result<ChapterSource, Msu1Error> {
	let mut source = ChapterSource::new(name, dir);
	let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();
	for entry in walker {
		let entry = entry.map_err(io::Error::from)?;
		if entry.file_type().is_file() {
			source.add_file(&entry.file_name().to_string_lossy());
		}
	}
	Ok(source)
}

/// Reads assets straight from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetReader;

impl AssetReader for FsAssetReader {
	fn read_asset(&self, path: &Path) -> io::Result<Vec<u8>> {
		fs::read(path)
	}
}

/// Serves assets from memory, keyed by full path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryAssets {
	files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryAssets {
	/// Creates an empty asset store
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces the asset at `path`
	pub fn insert(&mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
		self.files.insert(path.into(), data.into());
	}

	/// Number of stored assets
	pub fn len(&self) -> usize {
		self.files.len()
	}

	/// Whether no asset is stored
	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}
}

impl AssetReader for MemoryAssets {
	fn read_asset(&self, path: &Path) -> io::Result<Vec<u8>> {
		self.files.get(path).cloned().ok_or_else(|| {
			io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
		})
	}
}

/// Path of the audio file of chapter `id` for the container at `output`
///
/// The final extension of `output` is replaced: `out/movie.msu` and chapter
/// 3 give `out/movie-3.pcm`.
pub fn audio_file_path(output: &Path, id: u8) -> PathBuf {
	let mut name: OsString = output.with_extension("").into_os_string();
	name.push(format!("-{id}.pcm"));
	PathBuf::from(name)
}

/// Writes every chapter's audio blob to its own file next to the container
///
/// Chapters without audio still get a file, left empty.
#[derive(Debug, Clone, Default)]
pub struct AudioFileWriter {
	output: PathBuf,
	written: Vec<PathBuf>,
}

impl AudioFileWriter {
	/// Creates a writer for the container at `output`
	pub fn new(output: impl Into<PathBuf>) -> Self {
		Self {
			output: output.into(),
			written: Vec::new(),
		}
	}

	/// Paths written so far, in write order
	pub fn written(&self) -> &[PathBuf] {
		&self.written
	}
}

impl AudioSink for AudioFileWriter {
	fn write_audio(&mut self, chapter: &Chapter) -> Result<(), Msu1Error> {
		let path = audio_file_path(&self.output, chapter.id());
		fs::write(&path, chapter.audio())?;
		debug!("Wrote {} bytes of chapter audio to {}", chapter.audio().len(), path.display());
		self.written.push(path);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use msu1_types::file::msu::ChapterSet;

	fn touch(path: &Path, data: &[u8]) {
		fs::write(path, data).unwrap();
	}

	#[test]
	fn test_audio_file_path() {
		assert_eq!(audio_file_path(Path::new("out/movie.msu"), 3), PathBuf::from("out/movie-3.pcm"));
		assert_eq!(audio_file_path(Path::new("movie"), 12), PathBuf::from("movie-12.pcm"));
		assert_eq!(
			audio_file_path(Path::new("build/dl.v2.msu"), 0),
			PathBuf::from("build/dl.v2-0.pcm")
		);
	}

	#[test_log::test]
	fn test_scan_sorts_chapters_and_frames() {
		let base = tempfile::tempdir().unwrap();
		for chapter in ["b_second", "a_first"] {
			fs::create_dir(base.path().join(chapter)).unwrap();
		}
		touch(&base.path().join("notes.txt"), b"ignored");

		let first = base.path().join("a_first");
		touch(&first.join("chapter.id.007"), b"");
		touch(&first.join("f_000002.gfx_video.tiles"), &[0; 32]);
		touch(&first.join("f_000001.gfx_video.tiles"), &[0; 32]);
		touch(&first.join("f_000001.gfx_video.tilemap"), &[0; 2]);
		touch(&first.join("audio.sfx_video.pcm"), b"MSU1");
		fs::create_dir(first.join("nested")).unwrap();
		touch(&first.join("nested").join("chapter.id.009"), b"");

		let second = base.path().join("b_second");
		touch(&second.join("chapter.id.001"), b"");

		let sources = scan_chapters(base.path()).unwrap();
		assert_eq!(sources.len(), 2);
		assert_eq!(sources[0].name, "a_first");
		assert_eq!(sources[0].markers, ["chapter.id.007"]);
		assert_eq!(sources[0].frames, ["f_000001.gfx_video", "f_000002.gfx_video"]);
		assert_eq!(sources[0].audio, ["audio.sfx_video.pcm"]);
		assert_eq!(sources[1].name, "b_second");
		assert!(sources[1].frames.is_empty());
	}

	#[cfg(unix)]
	#[test]
	fn test_scan_follows_symlinks() {
		use std::os::unix::fs::symlink;

		let assets = tempfile::tempdir().unwrap();
		let shared = assets.path().join("shared_chapter");
		fs::create_dir(&shared).unwrap();
		touch(&shared.join("chapter.id.002"), b"");
		touch(&shared.join("f.gfx_video.tiles"), &[0; 32]);
		touch(&assets.path().join("marker"), b"");
		touch(&assets.path().join("tiles"), &[0; 32]);
		touch(&assets.path().join("audio"), b"MSU1");

		let base = tempfile::tempdir().unwrap();
		symlink(&shared, base.path().join("linked_chapter")).unwrap();
		let plain = base.path().join("plain");
		fs::create_dir(&plain).unwrap();
		symlink(assets.path().join("marker"), plain.join("chapter.id.004")).unwrap();
		symlink(assets.path().join("tiles"), plain.join("f.gfx_video.tiles")).unwrap();
		symlink(assets.path().join("audio"), plain.join("audio.sfx_video.pcm")).unwrap();

		let sources = scan_chapters(base.path()).unwrap();
		let names: Vec<_> = sources.iter().map(|source| source.name.as_str()).collect();
		assert_eq!(names, ["linked_chapter", "plain"]);

		assert_eq!(sources[0].chapter_id().unwrap(), 2);
		assert_eq!(sources[0].frames, ["f.gfx_video"]);
		assert_eq!(sources[1].chapter_id().unwrap(), 4);
		assert_eq!(sources[1].frames, ["f.gfx_video"]);
		assert_eq!(sources[1].audio, ["audio.sfx_video.pcm"]);
	}

	#[test]
	fn test_scan_missing_base() {
		let base = tempfile::tempdir().unwrap();
		let missing = base.path().join("nope");
		assert!(matches!(scan_chapters(&missing), Err(Msu1Error::MissingInputBase(path)) if path == missing));
	}

	#[test]
	fn test_memory_assets_feed_chapter_loading() {
		let mut assets = MemoryAssets::new();
		assets.insert("in/intro/f.gfx_video.tiles", vec![0xAB; 64]);
		assets.insert("in/intro/f.gfx_video.tilemap", vec![0; 8]);
		assets.insert("in/intro/f.gfx_video.palette", vec![0; 32]);
		assert_eq!(assets.len(), 3);

		let mut source = ChapterSource::new("intro", "in/intro");
		for file in ["chapter.id.002", "f.gfx_video.tiles", "f.gfx_video.tilemap"] {
			source.add_file(file);
		}

		let chapters = ChapterSet::from_sources(&[source], &assets).unwrap();
		let chapter = &chapters.chapters()[0];
		assert_eq!(chapter.id(), 2);
		assert_eq!(chapter.frame_count(), 3);
		assert_eq!(chapter.frames()[2].tiles(), &[0xAB; 64]);
		assert!(chapter.audio().is_empty());
	}

	#[test]
	fn test_fs_reader_and_audio_writer() {
		let dir = tempfile::tempdir().unwrap();
		let asset = dir.path().join("blob.bin");
		touch(&asset, &[1, 2, 3]);
		assert_eq!(FsAssetReader.read_asset(&asset).unwrap(), [1, 2, 3]);
		assert_eq!(
			FsAssetReader.read_asset(&dir.path().join("missing")).unwrap_err().kind(),
			io::ErrorKind::NotFound
		);

		let output = dir.path().join("movie.msu");
		let mut writer = AudioFileWriter::new(&output);
		let with_audio = Chapter::new(2, "intro", Vec::new(), b"MSU1\0\0\0\0".to_vec()).unwrap();
		let silent = Chapter::new(5, "outro", Vec::new(), Vec::new()).unwrap();
		writer.write_audio(&with_audio).unwrap();
		writer.write_audio(&silent).unwrap();

		assert_eq!(writer.written(), [dir.path().join("movie-2.pcm"), dir.path().join("movie-5.pcm")]);
		assert_eq!(fs::read(dir.path().join("movie-2.pcm")).unwrap(), b"MSU1\0\0\0\0");
		assert_eq!(fs::metadata(dir.path().join("movie-5.pcm")).unwrap().len(), 0);
	}
}
