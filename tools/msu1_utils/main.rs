//! MSU-1 CLI Utility
//!
//! A command-line tool for inspecting and checking packed MSU-1 data files.
//!
//! # Features
//!
//! - **inspect**: Print the header, scenes and frame pointers of a data file
//! - **verify**: Walk every pointer table and check that the file is gapless
//! - **pcm-to-wav**: Unwrap an MSU-1 PCM audio file back into a WAV file
//!
//! # Usage
//!
//! ```bash
//! msu1_utils inspect out/movie.msu
//! msu1_utils inspect out/movie.msu -json > movie.json
//! msu1_utils verify out/movie.msu
//! msu1_utils pcm-to-wav out/movie-0.pcm intro.wav
//! ```

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{error, info};
use msu1_rs::cli;
use msu1_rs::prelude::{MsuFile, PcmFile};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "msu1_utils")]
#[command(author = "msu1-rs project")]
#[command(version = "1.0")]
#[command(about = "MSU-1 data file utility - inspect, verify and convert packed output", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Show verbose output
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the header and pointer tables of an MSU-1 data file
	Inspect {
		/// Input MSU-1 data file path
		#[arg(value_name = "INPUT_MSU")]
		input: PathBuf,

		/// Print JSON instead of text
		#[arg(long)]
		json: bool,
	},

	/// Check that every pointer table describes a gapless file
	Verify {
		/// Input MSU-1 data file path
		#[arg(value_name = "INPUT_MSU")]
		input: PathBuf,
	},

	/// Convert an MSU-1 PCM file to WAV
	PcmToWav {
		/// Input MSU-1 PCM file path
		#[arg(value_name = "INPUT_PCM")]
		input: PathBuf,

		/// Output WAV file path
		#[arg(value_name = "OUTPUT_WAV")]
		output: PathBuf,
	},
}

/// Scene metadata for JSON serialization
#[derive(Debug, Clone, Serialize)]
struct SceneMetadata {
	/// Position in the scene pointer table
	index: usize,
	/// Chapter id
	id: u8,
	/// Absolute offset of the scene descriptor
	offset: u32,
	/// Absolute offsets of the frame records
	frame_pointers: Vec<u32>,
}

/// Complete data file metadata structure
#[derive(Debug, Clone, Serialize)]
struct MsuMetadata {
	/// Upper-cased title, padding removed
	title: String,
	/// Tile color depth in bits per pixel
	bpp: u8,
	/// Color depth code stored in the header
	color_depth_code: u8,
	/// Playback rate
	fps: u8,
	/// Chapter count stored in the header
	chapter_count: u8,
	/// File size in bytes
	size: u64,
	/// Scene descriptors
	scenes: Vec<SceneMetadata>,
}

/// Reads header and scene descriptors of an MSU-1 data file
fn load_metadata(path: &Path) -> anyhow::Result<MsuMetadata> {
	let mut msu = MsuFile::open(path)?;
	let header = *msu.header();

	let scenes = msu
		.iter_scenes()
		.map(|scene| {
			scene.map(|scene| SceneMetadata {
				index: scene.index,
				id: scene.id,
				offset: scene.offset,
				frame_pointers: scene.frame_pointers,
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(MsuMetadata {
		title: header.title.as_str(),
		bpp: header.color_depth.bpp(),
		color_depth_code: header.color_depth.code(),
		fps: header.fps,
		chapter_count: header.chapter_count,
		size: msu.stream_len()?,
		scenes,
	})
}

/// Handle inspect command
fn handle_inspect(input: &Path, json: bool) -> anyhow::Result<()> {
	let metadata =
		load_metadata(input).with_context(|| format!("Failed to read {}", input.display()))?;

	if json {
		println!("{}", serde_json::to_string_pretty(&metadata)?);
		return Ok(());
	}

	println!("MSU-1 data file: {}", input.display());
	println!("   Title:       {}", metadata.title);
	println!("   Color depth: {}bpp (code {})", metadata.bpp, metadata.color_depth_code);
	println!("   FPS:         {}", metadata.fps);
	println!("   Chapters:    {}", metadata.chapter_count);
	println!("   Size:        {} bytes", metadata.size);

	for scene in &metadata.scenes {
		println!(
			"\n   Scene {:3} (id {:3}) at 0x{:08x}: {} frames",
			scene.index,
			scene.id,
			scene.offset,
			scene.frame_pointers.len()
		);
		for (frame, pointer) in scene.frame_pointers.iter().enumerate() {
			println!("      Frame {frame:5} at 0x{pointer:08x}");
		}
	}

	Ok(())
}

/// Handle verify command
fn handle_verify(input: &Path) -> anyhow::Result<()> {
	let mut msu = MsuFile::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
	let frames = msu.verify().with_context(|| format!("{} failed verification", input.display()))?;

	info!(
		"{} is consistent: {} scenes, {} frame records.",
		input.display(),
		msu.scene_count(),
		frames
	);
	Ok(())
}

/// Handle pcm-to-wav command
fn handle_pcm_to_wav(input: &Path, output: &Path) -> anyhow::Result<()> {
	let pcm = PcmFile::open(input).with_context(|| format!("Failed to read {}", input.display()))?;

	let mut file = BufWriter::new(fs::File::create(output)?);
	pcm.write_wav(&mut file)?;

	info!(
		"Wrote {} sample frames ({} ms, loop start {}) to {}.",
		pcm.sample_frames(),
		pcm.duration_ms(),
		pcm.loop_start,
		output.display()
	);
	Ok(())
}

fn main() -> ExitCode {
	let cli = match cli::parse_legacy_from::<Cli, _, _>(std::env::args_os()) {
		Ok(cli) => cli,
		Err(err) if !err.use_stderr() => err.exit(),
		Err(err) => {
			cli::init_logger(false);
			error!("{err}");
			return ExitCode::FAILURE;
		}
	};
	cli::init_logger(cli.verbose);

	let result = match &cli.command {
		Commands::Inspect {
			input,
			json,
		} => handle_inspect(input, *json),
		Commands::Verify {
			input,
		} => handle_verify(input),
		Commands::PcmToWav {
			input,
			output,
		} => handle_pcm_to_wav(input, output),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{err:#}");
			ExitCode::FAILURE
		}
	}
}
