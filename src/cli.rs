//! Shared plumbing of the command line tools.
//!
//! The tools accept the long-standing `-flag value` spelling next to clap's
//! `--flag value`, read optional settings from a TOML file and `MSU1_*`
//! environment variables, and log through `env_logger`.

use std::ffi::OsString;
use std::path::Path;

use clap::{CommandFactory, Parser};
use serde::de::DeserializeOwned;

/// Prefix of environment variables read by [`load_settings`]
pub const ENV_PREFIX: &str = "MSU1";

/// Rewrites `-name` to `--name` for every long option in `long_names`
///
/// The first argument is the program name and is kept as is. Anything that
/// is not exactly a known option name, values included, is left untouched.
pub fn normalize_legacy_args<I, T>(args: I, long_names: &[&str]) -> Vec<OsString>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString>,
{
	args.into_iter()
		.enumerate()
		.map(|(position, arg)| {
			let arg: OsString = arg.into();
			if position == 0 {
				return arg;
			}
			match arg.to_str().and_then(|s| s.strip_prefix('-')) {
				Some(name) if !name.starts_with('-') && long_names.contains(&name) => {
					OsString::from(format!("--{name}"))
				}
				_ => arg,
			}
		})
		.collect()
}

/// Parses `args` into `P`, accepting both `-flag` and `--flag`
pub fn parse_legacy_from<P, I, T>(args: I) -> Result<P, clap::Error>
where
	P: Parser,
	I: IntoIterator<Item = T>,
	T: Into<OsString>,
{
	let command = P::command();
	let mut long_names = Vec::new();
	collect_long_names(&command, &mut long_names);
	long_names.extend(["help", "version"]);

	P::try_parse_from(normalize_legacy_args(args, &long_names))
}

/// Gathers the long option names of `command` and all of its subcommands
fn collect_long_names<'a>(command: &'a clap::Command, names: &mut Vec<&'a str>) {
	names.extend(command.get_arguments().filter_map(|arg| arg.get_long()));
	for subcommand in command.get_subcommands() {
		collect_long_names(subcommand, names);
	}
}

/// Initializes `env_logger`, at debug level when `verbose` is set
///
/// `RUST_LOG` still takes precedence.
pub fn init_logger(verbose: bool) {
	let level = if verbose {
		"debug"
	} else {
		"info"
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Loads tool settings from an optional TOML file and `MSU1_*` variables
///
/// Environment variables take precedence over the file.
pub fn load_settings<T: DeserializeOwned>(file: Option<&Path>) -> Result<T, config::ConfigError> {
	let mut builder = config::Config::builder();
	if let Some(path) = file {
		builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
	}
	builder
		.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
		.build()?
		.try_deserialize()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::Deserialize;

	#[derive(Parser, Debug)]
	struct Args {
		#[arg(long)]
		bpp: Option<u8>,
		#[arg(long)]
		title: Option<String>,
		#[arg(short, long)]
		verbose: bool,
	}

	#[derive(Parser, Debug)]
	struct Tool {
		#[command(subcommand)]
		command: Action,
		#[arg(short, long, global = true)]
		verbose: bool,
	}

	#[derive(clap::Subcommand, Debug, PartialEq)]
	enum Action {
		Inspect {
			input: String,
			#[arg(long)]
			json: bool,
		},
		Verify {
			input: String,
		},
	}

	#[derive(Debug, Default, Deserialize)]
	#[serde(default)]
	struct Settings {
		bpp: Option<u8>,
		title: Option<String>,
	}

	#[test]
	fn test_normalize_legacy_args() {
		let args = normalize_legacy_args(["tool", "-bpp", "4", "-title", "-bpp", "--fps", "-v"], &[
			"bpp", "title",
		]);
		assert_eq!(args, ["tool", "--bpp", "4", "--title", "--bpp", "--fps", "-v"]);
	}

	#[test]
	fn test_parse_both_spellings() {
		let legacy: Args = parse_legacy_from(["tool", "-bpp", "8", "-title", "intro"]).unwrap();
		assert_eq!(legacy.bpp, Some(8));
		assert_eq!(legacy.title.as_deref(), Some("intro"));

		let modern: Args = parse_legacy_from(["tool", "--bpp", "2", "-v"]).unwrap();
		assert_eq!(modern.bpp, Some(2));
		assert!(modern.verbose);

		let help = parse_legacy_from::<Args, _, _>(["tool", "-help"]).unwrap_err();
		assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
	}

	#[test]
	fn test_parse_subcommand_flags() {
		let tool: Tool = parse_legacy_from(["tool", "inspect", "movie.msu", "-json", "-verbose"]).unwrap();
		assert_eq!(tool.command, Action::Inspect {
			input: "movie.msu".to_string(),
			json: true,
		});
		assert!(tool.verbose);

		let unknown = parse_legacy_from::<Tool, _, _>(["tool", "verify", "movie.msu", "-json"]).unwrap_err();
		assert_eq!(unknown.kind(), clap::error::ErrorKind::UnknownArgument);
		assert!(unknown.use_stderr());

		let missing = parse_legacy_from::<Tool, _, _>(["tool"]).unwrap_err();
		assert!(missing.use_stderr());

		let help = parse_legacy_from::<Tool, _, _>(["tool", "inspect", "-help"]).unwrap_err();
		assert!(!help.use_stderr());
	}

	#[test]
	fn test_load_settings_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("pack.toml");
		std::fs::write(&path, "bpp = 8\ntitle = \"space ace\"\n").unwrap();

		let settings: Settings = load_settings(Some(&path)).unwrap();
		assert_eq!(settings.bpp, Some(8));
		assert_eq!(settings.title.as_deref(), Some("space ace"));
	}
}
