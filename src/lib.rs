#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `msu1-rs` packs per-chapter tile animations and PCM audio into MSU-1 data
//! files for SNES playback engines.
//!
//! The command line tools `msu1_pack`, `msu1_pcm` and `msu1_utils` are thin
//! wrappers around this library.
//!
pub use msu1_internal::*;

pub mod cli;
