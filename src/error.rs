//! Unified error types for convopack.
//!
//! This module provides a single [`ConvopackError`] enum that covers all
//! error cases in the library, following the single-error-enum pattern used
//! by crates like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - Filtered-out messages are never errors: a node that fails the
//!   eligibility policy simply produces no example
//! - Invalid node references are contract violations and fail fast with
//!   [`ConvopackError::NodeOutOfRange`]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for convopack operations.
///
/// # Example
///
/// ```rust
/// use convopack::error::Result;
///
/// fn my_function() -> Result<Vec<Vec<String>>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConvopackError>;

/// The error type for all convopack operations.
///
/// Each variant contains context about what went wrong and, where
/// applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvopackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export directory or a conversation file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing/serialization error.
    ///
    /// Occurs when parsing a conversation export or writing JSON output.
    #[cfg(any(feature = "messenger", feature = "json-output"))]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input doesn't match the expected export structure.
    ///
    /// For Messenger exports this occurs when the inbox directory is
    /// missing or a conversation file has an unexpected shape.
    #[error("Invalid {format} export{}: {message}", path.as_ref().map(|p| format!(" (path: {})", p.display())).unwrap_or_default())]
    InvalidFormat {
        /// The format that was expected (e.g., "Messenger")
        format: &'static str,
        /// Description of what's wrong
        message: String,
        /// The offending path, if available
        path: Option<PathBuf>,
    },

    /// A node id did not reference an existing node.
    ///
    /// The tree API is only ever called with ids obtained from the same
    /// tree during normal chain insertion, so this indicates a programming
    /// error rather than bad input data.
    #[error("Node id {id} out of range (tree has {len} nodes)")]
    NodeOutOfRange {
        /// The invalid id that was supplied
        id: usize,
        /// Number of nodes in the tree at the time of the lookup
        len: usize,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ConvopackError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ConvopackError::InvalidFormat {
            format,
            message: message.into(),
            path: None,
        }
    }

    /// Creates an invalid format error with the offending path attached.
    pub fn invalid_format_at(
        format: &'static str,
        message: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        ConvopackError::InvalidFormat {
            format,
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Creates a node-out-of-range error.
    pub fn node_out_of_range(id: usize, len: usize) -> Self {
        ConvopackError::NodeOutOfRange { id, len }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ConvopackError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ConvopackError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a node-out-of-range error.
    pub fn is_node_out_of_range(&self) -> bool {
        matches!(self, ConvopackError::NodeOutOfRange { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
