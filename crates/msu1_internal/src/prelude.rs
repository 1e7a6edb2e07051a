//! Prelude module for `msu1_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use msu1_internal::prelude::*;
//!
//! let options = ContainerOptions::new("intro", 8, 30).unwrap();
//! let config = PackConfig::new("chapters", "movie.msu", options);
//! assert_eq!(config.options.color_depth, ColorDepth::Bpp8);
//! ```

// Re-export everything from msu1_types::prelude
#[doc(inline)]
pub use msu1_types::prelude::*;

#[doc(inline)]
pub use msu1_vfs::{AudioFileWriter, FsAssetReader, MemoryAssets, audio_file_path, scan_chapters};

#[doc(inline)]
pub use crate::pack::{PackConfig, PackSummary, pack};

// Re-export the entire msu1_types module for advanced usage
#[doc(inline)]
pub use msu1_types;
