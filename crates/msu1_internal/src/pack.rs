//! End-to-end packing of a chapter tree into an MSU-1 data file.
//!
//! Packing runs in a fixed order: scan the input base, load every chapter,
//! plan the layout, then write the container and the per-chapter audio
//! files. Any error stops the run; files already written are left behind.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use log::info;
use msu1_types::file::Msu1Error;
use msu1_types::file::msu::{ChapterSet, ContainerOptions, ContainerWriter, Layout};
use msu1_vfs::{AudioFileWriter, FsAssetReader, scan_chapters};

/// Inputs of a pack run
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PackConfig {
	/// Folder holding one sub-folder per chapter
	pub input_base: PathBuf,
	/// Path of the MSU-1 data file to write
	pub output: PathBuf,
	/// Header settings
	pub options: ContainerOptions,
}

impl PackConfig {
	/// Creates a pack configuration
	pub fn new(
		input_base: impl Into<PathBuf>,
		output: impl Into<PathBuf>,
		options: ContainerOptions,
	) -> Self {
		Self {
			input_base: input_base.into(),
			output: output.into(),
			options,
		}
	}
}

/// Outcome of a successful pack run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackSummary {
	/// Number of chapters packed
	pub chapters: usize,
	/// Number of frame records written, held frames included
	pub frames: usize,
	/// Size of the data file in bytes
	pub bytes: u64,
	/// Number of audio files written
	pub audio_files: usize,
}

/// Packs the chapter tree described by `config`
pub fn pack(config: &PackConfig) -> Result<PackSummary, Msu1Error> {
	let sources = scan_chapters(&config.input_base)?;
	let chapters = ChapterSet::from_sources(&sources, &FsAssetReader)?;

	let layout = Layout::for_chapters(&chapters);
	layout.check_addressable()?;

	let mut output = BufWriter::new(File::create(&config.output)?);
	let mut audio = AudioFileWriter::new(&config.output);
	let written = ContainerWriter::new(config.options).write(
		&chapters,
		&layout,
		&mut output,
		&mut audio,
	)?;

	info!(
		"Successfully wrote msu1 data file {}, processed {} chapters containing {} frames.",
		config.output.display(),
		written.chapters,
		written.frames
	);

	Ok(PackSummary {
		chapters: written.chapters,
		frames: written.frames,
		bytes: written.bytes,
		audio_files: audio.written().len(),
	})
}
