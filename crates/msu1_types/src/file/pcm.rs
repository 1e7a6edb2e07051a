//! MSU-1 PCM audio file support.
//!
//! MSU-1 audio tracks are raw 16-bit stereo samples at 44100 Hz behind an
//! 8-byte header:
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  ------------------------------------------
//! 0x00    4     magic "MSU1"
//! 0x04    4     loop start, in sample frames
//! 0x08    ...   interleaved little-endian i16 samples (L, R)
//! ```
//!
//! Chapter audio blobs are expected to be in this format already; the
//! packer copies them verbatim. [`File::from_wav`] produces them from WAV
//! input.

use std::fs::File as FsFile;
use std::io::{Read, Seek, Write};
use std::path::Path;

use super::{FileType, Msu1Error};

/// Magic literal of MSU-1 PCM files
pub const MAGIC: [u8; 4] = *b"MSU1";

/// Size of the PCM header in bytes
pub const HEADER_SIZE: usize = 8;

/// Required number of channels
pub const CHANNELS: u16 = 2;

/// Required sample rate in Hz
pub const SAMPLE_RATE: u32 = 44100;

/// Required sample width in bits
pub const BITS_PER_SAMPLE: u16 = 16;

/// MSU-1 PCM audio track
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct File {
	/// Sample frame the playback loops back to
	pub loop_start: u32,
	/// Interleaved stereo samples
	pub samples: Vec<i16>,
}

/// Checks that a WAV stream matches the MSU-1 audio format
pub fn validate_wav_spec(spec: &hound::WavSpec) -> Result<(), Msu1Error> {
	if spec.channels != CHANNELS {
		return Err(Msu1Error::InvalidWav {
			field: "channel count",
			expected: CHANNELS.to_string(),
			actual: spec.channels.to_string(),
		});
	}
	if spec.bits_per_sample != BITS_PER_SAMPLE {
		return Err(Msu1Error::InvalidWav {
			field: "sample size",
			expected: format!("{BITS_PER_SAMPLE} Bit"),
			actual: format!("{} Bit", spec.bits_per_sample),
		});
	}
	if spec.sample_rate != SAMPLE_RATE {
		return Err(Msu1Error::InvalidWav {
			field: "sample rate",
			expected: format!("{SAMPLE_RATE} Hz"),
			actual: format!("{} Hz", spec.sample_rate),
		});
	}
	if spec.sample_format != hound::SampleFormat::Int {
		return Err(Msu1Error::InvalidWav {
			field: "compression",
			expected: "uncompressed integer PCM".to_string(),
			actual: "floating point".to_string(),
		});
	}
	Ok(())
}

impl File {
	/// Creates a track from interleaved stereo samples
	pub fn new(loop_start: u32, samples: Vec<i16>) -> Self {
		Self {
			loop_start,
			samples,
		}
	}

	/// Reads and validates a WAV stream
	pub fn from_wav<R: Read>(reader: R, loop_start: u32) -> Result<Self, Msu1Error> {
		let mut wav = hound::WavReader::new(reader)?;
		validate_wav_spec(&wav.spec())?;
		let samples = wav.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
		Ok(Self::new(loop_start, samples))
	}

	/// Reads and validates a WAV file
	pub fn open_wav(path: impl AsRef<Path>, loop_start: u32) -> Result<Self, Msu1Error> {
		let file = std::io::BufReader::new(FsFile::open(path)?);
		Self::from_wav(file, loop_start)
	}

	/// Loads a track from MSU-1 PCM bytes
	pub fn from_bytes(data: &[u8]) -> Result<Self, Msu1Error> {
		if data.len() < HEADER_SIZE {
			return Err(Msu1Error::insufficient_data(FileType::Pcm, HEADER_SIZE, data.len()));
		}
		if data[0..4] != MAGIC {
			return Err(Msu1Error::invalid_magic(FileType::Pcm, &MAGIC, &data[0..4]));
		}

		let payload = &data[HEADER_SIZE..];
		if payload.len() % 2 != 0 {
			return Err(Msu1Error::insufficient_data(
				FileType::Pcm,
				data.len() + 1,
				data.len(),
			));
		}

		let loop_start = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
		let samples = payload
			.chunks_exact(2)
			.map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
			.collect();

		Ok(Self {
			loop_start,
			samples,
		})
	}

	/// Loads a track from any reader
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, Msu1Error> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Opens an MSU-1 PCM file
	pub fn open(path: impl AsRef<Path>) -> Result<Self, Msu1Error> {
		let mut file = FsFile::open(path)?;
		Self::from_reader(&mut file)
	}

	/// Number of stereo sample frames
	pub fn sample_frames(&self) -> usize {
		self.samples.len() / usize::from(CHANNELS)
	}

	/// Duration of the track in milliseconds
	pub fn duration_ms(&self) -> u64 {
		self.sample_frames() as u64 * 1000 / u64::from(SAMPLE_RATE)
	}

	/// Serializes the track to MSU-1 PCM bytes
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buffer = Vec::with_capacity(HEADER_SIZE + self.samples.len() * 2);
		buffer.extend_from_slice(&MAGIC);
		buffer.extend_from_slice(&self.loop_start.to_le_bytes());
		for sample in &self.samples {
			buffer.extend_from_slice(&sample.to_le_bytes());
		}
		buffer
	}

	/// Writes the track to the given writer
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), Msu1Error> {
		writer.write_all(&self.to_bytes())?;
		Ok(())
	}

	/// Saves the track to the given path
	pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Msu1Error> {
		let mut file = FsFile::create(path)?;
		self.write_to(&mut file)
	}

	/// Writes the samples as a WAV stream, dropping the loop point
	pub fn write_wav<W: Write + Seek>(&self, writer: &mut W) -> Result<(), Msu1Error> {
		let spec = hound::WavSpec {
			channels: CHANNELS,
			sample_rate: SAMPLE_RATE,
			bits_per_sample: BITS_PER_SAMPLE,
			sample_format: hound::SampleFormat::Int,
		};

		let mut wav_writer = hound::WavWriter::new(writer, spec)?;
		for &sample in &self.samples {
			wav_writer.write_sample(sample)?;
		}
		wav_writer.finalize()?;

		Ok(())
	}
}
