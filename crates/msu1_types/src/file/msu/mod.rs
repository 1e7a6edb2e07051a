//! MSU-1 data file support.
//!
//! An MSU-1 data file bundles the tile animations of every chapter of a
//! production into one container that the playback engine streams from
//! the MSU-1 data port. Chapter audio is kept in separate `.pcm` files.
//!
//! # File Structure
//!
//! All integers are little-endian, all pointers are absolute file offsets.
//!
//! ```text
//! Offset  Size        Field
//! ------  ----------  ------------------------------------------------
//! 0x00    6           magic "S-MSU1"
//! 0x06    21          title, upper-cased and space padded
//! 0x1B    1           color depth code (4 = 2bpp, 5 = 4bpp, 6 = 8bpp)
//! 0x1C    1           frames per second
//! 0x1D    1           chapter count
//! 0x1E    2           zero
//! 0x20    4 * chapters   scene pointer table
//! ...     per chapter    1-byte id, 3-byte frame count, 4 * frames frame pointers
//! ...     per frame      2-byte index, 4-byte length header, tilemap, tiles, palette
//! ```
//!
//! Every chapter holds its last frame for two additional frames, so a
//! chapter with `n > 0` source frames stores `n + 2` frame records.
//!
//! # Examples
//!
//! ## Packing chapters
//!
//! ```
//! use msu1_types::file::msu::{
//! 	Chapter, ChapterSet, ContainerOptions, ContainerWriter, Frame, Layout,
//! };
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frames = vec![Frame::new("video_000001", vec![0; 64], vec![0; 4], vec![0; 32])];
//! let chapters = ChapterSet::new(vec![Chapter::new(0, "intro", frames, Vec::new())?])?;
//!
//! let layout = Layout::for_chapters(&chapters);
//! let writer = ContainerWriter::new(ContainerOptions::new("intro", 4, 24)?);
//! let mut output = Cursor::new(Vec::new());
//! let mut audio: Vec<(u8, Vec<u8>)> = Vec::new();
//! let summary = writer.write(&chapters, &layout, &mut output, &mut audio)?;
//!
//! assert_eq!(summary.frames, 3);
//! assert_eq!(output.get_ref().len() as u64, layout.total_size());
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading a packed file
//!
//! ```no_run
//! use msu1_types::file::msu::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut msu = File::open("movie.msu")?;
//! println!("{}", msu.header());
//!
//! for scene in msu.iter_scenes() {
//!     let scene = scene?;
//!     println!("Scene {}: {} frames at 0x{:08X}", scene.id, scene.frame_count(), scene.offset);
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod constants;
mod file;
mod iterator;
mod layout;
mod model;
mod source;
mod types;

pub use self::builder::{AudioSink, ContainerWriter, DiscardAudio, WriteSummary};
pub use self::constants::*;
pub use self::file::{File, FrameRecord, SceneInfo};
pub use self::iterator::{FrameIter, SceneIter};
pub use self::layout::{Layout, SceneLayout, scene_descriptor_size};
pub use self::model::{Chapter, ChapterSet, Frame};
pub use self::source::{AssetReader, ChapterFile, ChapterSource, frame_base_name, parse_chapter_id};
pub use self::types::{ColorDepth, ContainerOptions, Fps, Header, LengthHeader, Title};
