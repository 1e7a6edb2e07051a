//! This crate provides core data types and file format support for the `msu1-rs` project.
//!
//! # File Formats
//!
//! - **MSU**: MSU-1 data files holding the tile animations of every chapter
//!   behind a two-level pointer table
//! - **PCM**: MSU-1 audio tracks, 16-bit stereo samples at 44100 Hz behind an
//!   8-byte header
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use msu1_types::prelude::*;
//!
//! # fn main() -> Result<(), Msu1Error> {
//! let mut msu = MsuFile::open("movie.msu")?;
//! println!("{}", msu.header());
//! println!("{} frame records", msu.verify()?);
//!
//! let track = PcmFile::open("movie-0.pcm")?;
//! println!("{} ms", track.duration_ms());
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use msu1_types::file::msu::{ColorDepth, Title};
//!
//! let title = Title::new("Space Ace").unwrap();
//! assert_eq!(title.as_str(), "SPACE ACE");
//! assert_eq!(ColorDepth::from_bpp(4).unwrap().code(), 5);
//! ```

pub mod file;

/// `use msu1_types::prelude::*;` to import commonly used items.
pub mod prelude;
