//! Platform-specific export extractors.
//!
//! Extractors sit at the crate's input boundary: they read a platform's
//! export on disk and produce plain, time-ordered conversation batches
//! (`Vec<Vec<String>>`) for the dataset builder. Encoding repair and
//! export-format quirks are handled here so the core never sees them.

#[cfg(feature = "messenger")]
pub mod messenger;

#[cfg(feature = "messenger")]
pub use messenger::{MessengerExtractor, fix_mojibake_encoding};
