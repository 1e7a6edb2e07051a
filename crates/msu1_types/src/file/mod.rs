//! File type support for the `msu1-rs` project.

mod error;

pub mod msu;
pub mod pcm;

// Re-export unified error type
pub use error::{ErrorKind, FileType, Msu1Error};

// Re-export main file types
pub use msu::{
	AudioSink, Chapter, ChapterSet, ColorDepth, ContainerOptions, ContainerWriter, File as MsuFile,
	Frame, FrameRecord, Header as MsuHeader, Layout, SceneInfo, Title,
};
pub use pcm::File as PcmFile;
