//! MSU-1 data file packer
//!
//! Packs a folder of chapter folders into one MSU-1 data file plus one
//! `.pcm` audio file per chapter.
//!
//! # Chapter Folder Layout
//!
//! ```text
//! chapters/
//!   intro/
//!     chapter.id.000
//!     video_000001.gfx_video.tiles
//!     video_000001.gfx_video.tilemap
//!     video_000001.gfx_video.palette
//!     audio.sfx_video.pcm
//!   death_scene/
//!     chapter.id.001
//!     ...
//! ```
//!
//! # Usage
//!
//! ```bash
//! msu1_pack -infilebase chapters/ -outfile out/movie.msu -title "dragon's lair"
//!
//! # 8bpp tiles at 30 frames per second
//! msu1_pack --infilebase chapters/ --outfile out/movie.msu --bpp 8 --fps 30
//!
//! # Settings from a file, command line values win
//! msu1_pack --config pack.toml --fps 30
//! ```
//!
//! `pack.toml` accepts the same keys as the command line:
//!
//! ```toml
//! infilebase = "chapters"
//! outfile = "out/movie.msu"
//! title = "dragon's lair"
//! bpp = 4
//! fps = 24
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::error;
use msu1_rs::cli;
use msu1_rs::prelude::{ContainerOptions, Msu1Error, PackConfig, pack};
use serde::Deserialize;

/// Default color depth in bits per pixel
const DEFAULT_BPP: u8 = 4;

/// Default playback rate
const DEFAULT_FPS: u8 = 24;

#[derive(Parser, Debug)]
#[command(name = "msu1_pack")]
#[command(author = "msu1-rs project")]
#[command(version = "1.0")]
#[command(about = "Pack chapter folders of tiles, tilemaps, palettes and audio into an MSU-1 data file", long_about = None)]
struct Cli {
	/// Color depth of the tile data in bits per pixel [default: 4]
	#[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
	bpp: Option<u8>,

	/// Folder holding one sub-folder per chapter
	#[arg(long, value_name = "DIR")]
	infilebase: Option<PathBuf>,

	/// MSU-1 data file to write
	#[arg(long, value_name = "FILE")]
	outfile: Option<PathBuf>,

	/// Title stored in the header, at most 21 characters
	#[arg(long)]
	title: Option<String>,

	/// Playback rate in frames per second [default: 24]
	#[arg(long, value_parser = clap::value_parser!(u8).range(1..=60))]
	fps: Option<u8>,

	/// TOML file with default settings
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Show verbose output
	#[arg(short, long)]
	verbose: bool,
}

/// Settings read from the config file and environment
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
	bpp: Option<u8>,
	infilebase: Option<PathBuf>,
	outfile: Option<PathBuf>,
	title: Option<String>,
	fps: Option<u8>,
}

fn required(value: Option<PathBuf>, option: &'static str) -> Result<PathBuf, Msu1Error> {
	value.ok_or_else(|| Msu1Error::InvalidOption {
		option,
		value: String::new(),
		message: "option is required".to_string(),
	})
}

/// Merges command line values over file settings into a pack configuration
fn resolve(cli: Cli) -> anyhow::Result<PackConfig> {
	let settings: Settings = cli::load_settings(cli.config.as_deref())
		.context("Failed to load settings")?;

	let options = ContainerOptions::new(
		cli.title.or(settings.title).as_deref().unwrap_or_default(),
		cli.bpp.or(settings.bpp).unwrap_or(DEFAULT_BPP),
		cli.fps.or(settings.fps).unwrap_or(DEFAULT_FPS),
	)?;

	Ok(PackConfig::new(
		required(cli.infilebase.or(settings.infilebase), "infilebase")?,
		required(cli.outfile.or(settings.outfile), "outfile")?,
		options,
	))
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let config = resolve(cli)?;
	pack(&config).with_context(|| format!("Failed to write {}", config.output.display()))?;
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
	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{err:#}");
			ExitCode::FAILURE
		}
	}
}
