//! Binary encoding support for SCTE-35 messages.
//!
//! Every decoded structure has an [`Encodable`] impl that writes the exact wire
//! layout it was read from. [`Cue::encode`](crate::Cue::encode) drives them.

/// Error types for encoding operations.
pub mod error;

/// Bit-level writer for encoding binary data.
pub mod writer;

/// Trait definitions for encodable types.
pub mod traits;

// Implementation modules
mod commands;
mod cue;
mod descriptors;
mod info_section;
mod time;

#[cfg(test)]
mod round_trip_tests;

pub use error::{EncodingError, EncodingResult};
pub use traits::Encodable;
pub use writer::BitWriter;
