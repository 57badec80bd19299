//! # Convopack
//!
//! A Rust library for converting exported social-media conversation logs
//! into (context, response) training pairs for sequence-to-sequence model
//! training.
//!
//! ## Overview
//!
//! Convopack reconstructs parent/child reply relationships among messages
//! in an arena-backed conversation tree, then linearizes every valid reply
//! path into a bounded context window plus a response, applying filtering
//! and formatting policies along the way:
//!
//! - **Eligibility filtering** — maximum message length, hyperlink screening
//! - **Context bounding** — keep only the N nearest ancestor turns
//! - **Formatting** — `<sos>`/`<eos>` boundary markers, context flattening
//!
//! A Facebook Messenger extractor feeds the pipeline from a data-download
//! directory, and writers emit the finished dataset as JSON, JSONL, or CSV.
//!
//! ## Quick Start
//!
//! ```rust
//! use convopack::config::DatasetConfig;
//! use convopack::core::make_training_examples;
//!
//! let conversations = vec![vec![
//!     "hi".to_string(),
//!     "hello".to_string(),
//!     "how are you".to_string(),
//! ]];
//!
//! let config = DatasetConfig::new()
//!     .with_max_context_length(4)
//!     .with_seq_tags(false);
//!
//! let dataset = make_training_examples(&conversations, &config);
//! assert_eq!(dataset.responses, vec!["hello", "how are you"]);
//! ```
//!
//! ## From a Messenger Export
//!
//! ```rust,no_run
//! use convopack::config::{DatasetConfig, MessengerConfig};
//! use convopack::core::{make_training_examples, write_jsonl};
//! use convopack::extractors::MessengerExtractor;
//!
//! fn main() -> convopack::Result<()> {
//!     let extractor = MessengerExtractor::with_config(
//!         "facebook-export",
//!         MessengerConfig::new().with_max_participants(2),
//!     );
//!     let conversations = extractor.extract()?;
//!
//!     let dataset = make_training_examples(&conversations, &DatasetConfig::new());
//!     write_jsonl(&dataset, "pairs.jsonl")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`tree`] — Arena-backed conversation forest
//!   - [`ConversationTree`](tree::ConversationTree), [`Node`](tree::Node), [`NodeRef`](tree::NodeRef)
//! - [`core`] — Extraction pipeline
//!   - [`core::filter`] — [`MessageFilter`](core::MessageFilter) eligibility policy
//!   - [`core::extract`] — tree traversal, [`extract_examples`](core::extract_examples)
//!   - [`core::dataset`] — [`make_training_examples`](core::make_training_examples), [`Dataset`](core::Dataset)
//!   - [`core::output`] — `write_json`, `write_jsonl`, `write_csv`
//! - [`extractors`] — Platform extractors ([`MessengerExtractor`](extractors::MessengerExtractor))
//! - [`config`] — [`DatasetConfig`](config::DatasetConfig), [`MessengerConfig`](config::MessengerConfig)
//! - [`progress`] — Injectable progress callbacks
//! - [`cli`] — CLI types
//! - [`error`] — Unified error types ([`ConvopackError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extractors;
pub mod progress;
pub mod tree;

// Re-export the main types at the crate root for convenience
pub use error::{ConvopackError, Result};
pub use tree::ConversationTree;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use convopack::prelude::*;
/// ```
pub mod prelude {
    // Core tree type
    pub use crate::tree::{ConversationTree, Node, NodeRef};

    // Error types
    pub use crate::error::{ConvopackError, Result};

    // Configuration
    pub use crate::config::{DatasetConfig, MessengerConfig};

    // Dataset building
    pub use crate::core::{
        Contexts, Dataset, MessageFilter, make_training_examples,
        make_training_examples_with_progress,
    };

    // Output writers
    #[cfg(feature = "csv-output")]
    pub use crate::core::write_csv;
    #[cfg(feature = "json-output")]
    pub use crate::core::{to_json, write_json, write_jsonl};

    // Extractors
    #[cfg(feature = "messenger")]
    pub use crate::extractors::MessengerExtractor;

    // Progress reporting
    pub use crate::progress::{Phase, Progress, ProgressCallback, no_progress, stderr_progress};
}
