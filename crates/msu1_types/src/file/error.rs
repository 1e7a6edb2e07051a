//! Error types for packing and parsing MSU-1 data files.

use std::path::PathBuf;

use thiserror::Error;

/// File types that can produce format errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// MSU-1 data container (`.msu`)
	Msu,
	/// MSU-1 PCM audio (`.pcm`)
	Pcm,
}

impl std::fmt::Display for FileType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Msu => write!(f, "MSU"),
			Self::Pcm => write!(f, "PCM"),
		}
	}
}

/// Broad category of an [`Msu1Error`]
///
/// Every category is fatal for a packing run. Recoverable conditions are
/// reported through `log::warn!` and never surface as an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Missing or invalid option, out-of-range numeric argument
	Configuration,
	/// Chapter tree or container content violates the format
	AssetIntegrity,
	/// File open, read or write failure
	Io,
}

/// Unified error type for all MSU-1 file operations
#[derive(Debug, Error)]
pub enum Msu1Error {
	/// Generic invalid option value
	#[error("Invalid argument {value} for option -{option}: {message}")]
	InvalidOption {
		/// Option name, without leading dash
		option: &'static str,
		/// Rejected value
		value: String,
		/// Why the value was rejected
		message: String,
	},

	/// Title does not fit into the fixed-width header field
	#[error("Title \"{title}\" is {length} bytes long, the header holds at most {max} bytes")]
	TitleTooLong {
		/// Requested title
		title: String,
		/// Byte length of the title
		length: usize,
		/// Width of the header field
		max: usize,
	},

	/// Title contains characters outside of ASCII
	#[error("Title \"{0}\" contains non-ASCII characters")]
	TitleNotAscii(String),

	/// Bit depth without a color depth code
	#[error("Invalid color depth {0}, only 2, 4 and 8 bpp are supported")]
	UnsupportedColorDepth(u8),

	/// Frame rate outside of 1..=60
	#[error("Invalid frame rate {0}, allowed range is 1 - 60")]
	InvalidFps(u8),

	/// Chapter base folder does not exist
	#[error("Chapter base-folder \"{0}\" is nonexistent")]
	MissingInputBase(PathBuf),

	/// Chapter folder does not hold exactly one id marker
	#[error("Chapter folder {chapter} must contain exactly one id file, but actually contains {found}")]
	ChapterMarkerCount {
		/// Chapter folder name
		chapter: String,
		/// Number of marker files found
		found: usize,
	},

	/// Marker suffix is not a chapter id in range 0..=255
	#[error("Invalid chapter id in id-file {marker}")]
	InvalidChapterId {
		/// Marker file name
		marker: String,
	},

	/// Two chapter folders claim the same id
	#[error("Chapter id {id} is claimed by both {first} and {second}")]
	DuplicateChapterId {
		/// Conflicting id
		id: u8,
		/// Name of the first chapter with this id
		first: String,
		/// Name of the second chapter with this id
		second: String,
	},

	/// Chapter folder holds more than one audio blob
	#[error("Chapter folder {chapter} contains {found} msu1 pcm audio files, at most one is allowed")]
	AudioFileCount {
		/// Chapter folder name
		chapter: String,
		/// Number of audio files found
		found: usize,
	},

	/// Frame is missing one of its sibling asset files
	#[error("Frame {frame} of chapter {chapter} has no {asset} file")]
	MissingFrameAsset {
		/// Chapter folder name
		chapter: String,
		/// Frame base name
		frame: String,
		/// Missing asset extension
		asset: &'static str,
	},

	/// No chapters were found
	#[error("No chapter folders are present")]
	NoChapters,

	/// Chapter count exceeds the one-byte header field
	#[error("Too many chapters, maximum of {max} are allowed, {count} are present")]
	TooManyChapters {
		/// Number of chapters found
		count: usize,
		/// Format maximum
		max: usize,
	},

	/// Frame count exceeds the 16-bit frame index
	#[error("Chapter {chapter} has {count} frames, maximum of {max} are allowed")]
	TooManyFrames {
		/// Chapter folder name
		chapter: String,
		/// Number of frames after last-frame extension
		count: usize,
		/// Format maximum
		max: usize,
	},

	/// Container would not be addressable with 32-bit offsets
	#[error("Container size of {size} bytes exceeds the 32-bit offset range")]
	ContainerTooLarge {
		/// Planned container size in bytes
		size: u64,
	},

	/// Not enough data to parse
	#[error("{file_type}: insufficient data, expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Kind of file being parsed
		file_type: FileType,
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Invalid magic literal
	#[error("{file_type}: invalid magic, expected {expected:02X?}, got {actual:02X?}")]
	InvalidMagic {
		/// Kind of file being parsed
		file_type: FileType,
		/// Expected magic bytes
		expected: Vec<u8>,
		/// Actual magic bytes
		actual: Vec<u8>,
	},

	/// Pointer tables and records of a container disagree
	#[error("{file_type}: corrupt container, {message}")]
	CorruptContainer {
		/// Kind of file being checked
		file_type: FileType,
		/// Detail message
		message: String,
	},

	/// Requested scene or frame does not exist
	#[error("{file_type}: {message}")]
	EntryNotFound {
		/// Kind of file being accessed
		file_type: FileType,
		/// Detail message
		message: String,
	},

	/// WAV input does not match the MSU-1 audio format
	#[error("Input file {field} must be {expected}, but is {actual}")]
	InvalidWav {
		/// Checked property
		field: &'static str,
		/// Required value
		expected: String,
		/// Actual value
		actual: String,
	},

	/// WAV decoding or encoding error
	#[error(transparent)]
	Wav(#[from] hound::Error),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl Msu1Error {
	/// Creates an insufficient data error
	pub fn insufficient_data(file_type: FileType, expected: usize, actual: usize) -> Self {
		Self::InsufficientData {
			file_type,
			expected,
			actual,
		}
	}

	/// Creates an invalid magic error
	pub fn invalid_magic(file_type: FileType, expected: &[u8], actual: &[u8]) -> Self {
		Self::InvalidMagic {
			file_type,
			expected: expected.to_vec(),
			actual: actual.to_vec(),
		}
	}

	/// Creates an entry not found error
	pub fn entry_not_found(file_type: FileType, message: impl Into<String>) -> Self {
		Self::EntryNotFound {
			file_type,
			message: message.into(),
		}
	}

	/// Creates a corrupt container error
	pub fn corrupt(file_type: FileType, message: impl Into<String>) -> Self {
		Self::CorruptContainer {
			file_type,
			message: message.into(),
		}
	}

	/// Returns the category of this error
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidOption {
				..
			}
			| Self::TitleTooLong {
				..
			}
			| Self::TitleNotAscii(_)
			| Self::UnsupportedColorDepth(_)
			| Self::InvalidFps(_)
			| Self::MissingInputBase(_) => ErrorKind::Configuration,
			Self::Io(_) | Self::Wav(hound::Error::IoError(_)) => ErrorKind::Io,
			_ => ErrorKind::AssetIntegrity,
		}
	}
}
