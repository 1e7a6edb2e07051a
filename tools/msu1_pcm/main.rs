//! MSU-1 PCM audio writer
//!
//! Validates a WAV file (2 channels, 16-bit samples, 44100 Hz, uncompressed)
//! and wraps its samples in an MSU-1 PCM header carrying the loop point.
//!
//! # Usage
//!
//! ```bash
//! msu1_pcm -infile audio.sfx_video.wav -outfile audio.sfx_video.pcm
//!
//! # Loop back to sample frame 44100 once playback reaches the end
//! msu1_pcm --infile theme.wav --outfile theme.pcm --loopstart 44100
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info};
use msu1_rs::cli;
use msu1_rs::prelude::{Msu1Error, PcmFile};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "msu1_pcm")]
#[command(author = "msu1-rs project")]
#[command(version = "1.0")]
#[command(about = "Validate a WAV file and wrap it in an MSU-1 PCM header", long_about = None)]
struct Cli {
	/// Sample frame playback loops back to [default: 0]
	#[arg(long, value_name = "SAMPLE")]
	loopstart: Option<u32>,

	/// WAV file to convert
	#[arg(long, value_name = "FILE")]
	infile: Option<PathBuf>,

	/// MSU-1 PCM file to write
	#[arg(long, value_name = "FILE")]
	outfile: Option<PathBuf>,

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
	loopstart: Option<u32>,
	infile: Option<PathBuf>,
	outfile: Option<PathBuf>,
}

fn required(value: Option<PathBuf>, option: &'static str) -> Result<PathBuf, Msu1Error> {
	value.ok_or_else(|| Msu1Error::InvalidOption {
		option,
		value: String::new(),
		message: "option is required".to_string(),
	})
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let settings: Settings =
		cli::load_settings(cli.config.as_deref()).context("Failed to load settings")?;

	let loop_start = cli.loopstart.or(settings.loopstart).unwrap_or_default();
	let input = required(cli.infile.or(settings.infile), "infile")?;
	let output = required(cli.outfile.or(settings.outfile), "outfile")?;

	let pcm = PcmFile::open_wav(&input, loop_start)
		.with_context(|| format!("Unable to convert input file \"{}\"", input.display()))?;
	debug!(
		"Read {} sample frames ({} ms) from {}",
		pcm.sample_frames(),
		pcm.duration_ms(),
		input.display()
	);

	pcm.save_to_file(&output)
		.with_context(|| format!("Unable to access output file {}", output.display()))?;

	info!("Successfully wrote msu1 pcm audio file {}.", output.display());
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
