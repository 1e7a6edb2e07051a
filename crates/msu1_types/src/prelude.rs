//! Prelude module for `msu1_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use msu1_types::prelude::*;
//!
//! let options = ContainerOptions::new("intro", 4, 24).unwrap();
//! let writer = ContainerWriter::new(options);
//! ```

#[doc(inline)]
pub use crate::file::{
	// Errors
	ErrorKind,
	FileType,
	Msu1Error,

	// Container types
	Chapter,
	ChapterSet,
	ColorDepth,
	ContainerOptions,
	ContainerWriter,
	Frame,
	Layout,
	MsuFile,
	MsuHeader,
	Title,

	// Audio
	AudioSink,
	PcmFile,
};

#[doc(inline)]
pub use crate::file::msu::{AssetReader, ChapterSource, DiscardAudio, WriteSummary};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
