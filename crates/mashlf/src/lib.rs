//! Streaming line re-wrapper.
//!
//! `mashlf` reads a byte stream and re-cuts it into lines whose lengths, in
//! code points, are drawn uniformly from a configured range. Multi-byte UTF-8
//! sequences are never split by an inserted line feed, and malformed input is
//! passed through as deterministic broken units rather than rejected.
//!
//! ```rust
//! use mashlf::{MashOptions, mash_bytes};
//!
//! let options = MashOptions {
//!     min_length: 3,
//!     max_length: 3,
//!     seed: 1,
//!     ..Default::default()
//! };
//! let out = mash_bytes(options, b"abcdef").unwrap();
//! assert_eq!(out, b"abc\ndef\n");
//! ```

mod chunk_utils;
mod controller;
mod error;
mod masher;
mod options;
mod rng;
mod sequencer;

pub mod cli;
pub mod prand;


pub use chunk_utils::produce_chunks;
pub use controller::LineController;
pub use error::{ConfigError, MashError};
pub use masher::{LineMasher, mash, mash_bytes};
pub use options::{CutRange, Distribution, MashOptions};
pub use rng::{SeededRng, UniformSource};
pub use sequencer::{ByteClass, Flush, SeqInput, SeqLen, Utf8Sequencer};
