// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)] // Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![deny(missing_docs)] // Documentation is a must for release

//! # SampleBuffer
//!
//! Fixed-shape, multi-channel audio sample buffers: the unit of data passed
//! between audio-processing stages.
//!
//! A [`SampleBuffer`] holds `num_channels × blocksize` floating-point samples
//! (`f32` by default, or `f64`). Its shape is fixed at construction; the
//! buffer is cleared, filled and copied into in place, and released when it is
//! dropped.
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! sample_buffer = "0.1"
//! ```
//!
//! ## Features
//!
//! - `serialization` (default): `serde` support for [`AudioSettings`]
//!
//! ## Quick Start
//!
//! ```rust
//! use sample_buffer::{SampleBuffer, release};
//!
//! let mut source = SampleBuffer::<f32>::new(2, 4);
//! source.clear();
//! source[0][0] = 0.5;
//! source[1][0] = -0.5;
//!
//! // Up-mix stereo into four channels: L R L R
//! let mut quad = SampleBuffer::<f32>::new(4, 4);
//! assert!(quad.copy_and_map_channels(&source));
//! assert_eq!(quad[2][0], 0.5);
//! assert_eq!(quad[3][0], -0.5);
//!
//! // Blocksizes must match exactly
//! let mut short = SampleBuffer::<f32>::new(2, 1);
//! assert!(!short.copy_and_map_channels(&source));
//!
//! release(Some(quad));
//! release::<f32>(None); // no-op
//! ```
//!
//! ## Error Handling
//!
//! The boolean copy API mirrors the classic contract. The `try_` variants
//! report why a copy was refused:
//!
//! ```rust
//! use sample_buffer::{SampleBuffer, SampleBufferError};
//!
//! let source = SampleBuffer::<f64>::new(1, 512);
//! let mut dest = SampleBuffer::<f64>::new(1, 256);
//!
//! match dest.try_copy_and_map_channels(&source) {
//!     Ok(()) => {}
//!     Err(SampleBufferError::BlocksizeMismatch {
//!         destination_blocksize,
//!         source_blocksize,
//!     }) => {
//!         eprintln!("skipping frame: {destination_blocksize} != {source_blocksize}");
//!     }
//!     Err(other) => eprintln!("copy failed: {other}"),
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use sample_buffer::{AudioSettings, SampleBuffer};
//!
//! let settings = AudioSettings::default().with_num_channels(6);
//! let buffer = SampleBuffer::<f32>::from_settings(&settings).unwrap();
//! assert_eq!(buffer.shape(), (6, 512));
//! ```
//!
//! ## Logging
//!
//! Buffer construction and rejected copies emit `tracing` events at `debug`
//! level; successful copies and releases at `trace`. Install a subscriber in
//! the host application to see them.
//!
//! ## License
//!
//! MIT License

mod buffer;
pub mod conversions;
mod error;
pub mod pcm;
pub mod settings;
/// Core traits for sample element types.
pub mod traits;

pub use crate::buffer::{SampleBuffer, release};
pub use crate::error::{SampleBufferError, SampleBufferResult};
pub use crate::pcm::PcmByteOrder;
pub use crate::settings::{
    AudioSettings, DEFAULT_BLOCKSIZE, DEFAULT_NUM_CHANNELS, DEFAULT_SAMPLE_RATE,
};
pub use crate::traits::Sample;
