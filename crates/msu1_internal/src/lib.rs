//! Packing pipeline for the `msu1-rs` project.
//!
//! This crate ties the container model of `msu1_types` to the filesystem
//! access of `msu1_vfs`, and is what the command line tools link against.
//!
//! ```no_run
//! use msu1_internal::prelude::*;
//!
//! # fn main() -> Result<(), Msu1Error> {
//! let options = ContainerOptions::new("dragon's lair", 4, 24)?;
//! let summary = pack(&PackConfig::new("chapters", "out/movie.msu", options))?;
//! println!("{} chapters, {} frames", summary.chapters, summary.frames);
//! # Ok(())
//! # }
//! ```

pub mod pack;

/// `use msu1_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export member crates for convenience
pub use msu1_types;
pub use msu1_vfs;

// Re-export commonly used types at crate root
pub use msu1_types::file::{ErrorKind, Msu1Error, MsuFile, PcmFile};
pub use pack::{PackConfig, PackSummary, pack};
