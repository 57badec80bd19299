//! Core processing logic for convopack.
//!
//! This module contains:
//! - [`filter`] - Message eligibility policy
//! - [`extract`] - Tree traversal and example emission
//! - [`dataset`] - Batch assembly and the [`Dataset`] output type
//! - [`output`] - Format writers (JSON, JSONL, CSV)
//!
//! # Quick Start
//!
//! ```rust
//! use convopack::config::DatasetConfig;
//! use convopack::core::{make_training_examples, Dataset};
//!
//! let conversations = vec![vec!["hi".to_string(), "hello".to_string()]];
//! let dataset: Dataset = make_training_examples(&conversations, &DatasetConfig::new());
//! assert_eq!(dataset.len(), 1);
//! ```

pub mod dataset;
pub mod extract;
pub mod filter;
#[cfg(any(feature = "json-output", feature = "csv-output"))]
pub mod output;

// Re-export main types for convenience
pub use dataset::{Contexts, Dataset, make_training_examples, make_training_examples_with_progress};
pub use extract::extract_examples;
pub use filter::{HYPERLINK_MARKERS, MessageFilter, has_hyperlink};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::write_csv;
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json, write_jsonl};
