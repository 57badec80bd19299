//! Configuration types for dataset building and extraction.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`DatasetConfig`] - Filtering and formatting policy for pair extraction
//! - [`MessengerConfig`] - Facebook Messenger export settings
//!
//! # Example
//!
//! ```rust
//! use convopack::config::DatasetConfig;
//!
//! let config = DatasetConfig::new()
//!     .with_max_context_length(4)
//!     .with_filter_hyperlinks(true)
//!     .with_seq_tags(false);
//! ```

use serde::{Deserialize, Serialize};

/// Default start-of-sequence token.
pub const DEFAULT_START_TOKEN: &str = "<sos>";

/// Default end-of-sequence token.
pub const DEFAULT_END_TOKEN: &str = "<eos>";

/// Filtering and formatting policy for (context, response) extraction.
///
/// # Fields
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `max_message_length` | `None` | Exclude messages with this many characters or more |
/// | `max_context_length` | `None` | Maximum number of ancestor turns per context |
/// | `filter_hyperlinks` | `false` | Exclude messages containing `www`/`http` |
/// | `combine_contexts` | `true` | Join each context into a single string |
/// | `add_seq_tags` | `true` | Wrap messages in boundary markers |
/// | `start_token` | `<sos>` | Start-of-sequence marker |
/// | `end_token` | `<eos>` | End-of-sequence marker |
///
/// Unset optional limits mean unbounded: no length filtering, and ancestor
/// walks continue until the conversation root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Exclude messages whose character count is not strictly below this.
    pub max_message_length: Option<usize>,

    /// Maximum number of message turns to include in a context.
    pub max_context_length: Option<usize>,

    /// Exclude messages containing a hyperlink marker (`www`, `http`).
    pub filter_hyperlinks: bool,

    /// Join each context's messages into a single space-separated string.
    pub combine_contexts: bool,

    /// Wrap every emitted message in start/end sequence markers.
    pub add_seq_tags: bool,

    /// Start-of-sequence marker prepended when `add_seq_tags` is set.
    pub start_token: String,

    /// End-of-sequence marker appended when `add_seq_tags` is set.
    pub end_token: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            max_message_length: None,
            max_context_length: None,
            filter_hyperlinks: false,
            combine_contexts: true,
            add_seq_tags: true,
            start_token: DEFAULT_START_TOKEN.to_string(),
            end_token: DEFAULT_END_TOKEN.to_string(),
        }
    }
}

impl DatasetConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum message length in characters (exclusive bound).
    #[must_use]
    pub fn with_max_message_length(mut self, max: usize) -> Self {
        self.max_message_length = Some(max);
        self
    }

    /// Sets the maximum number of context turns.
    #[must_use]
    pub fn with_max_context_length(mut self, max: usize) -> Self {
        self.max_context_length = Some(max);
        self
    }

    /// Enables or disables hyperlink filtering.
    #[must_use]
    pub fn with_filter_hyperlinks(mut self, enabled: bool) -> Self {
        self.filter_hyperlinks = enabled;
        self
    }

    /// Enables or disables joining contexts into single strings.
    #[must_use]
    pub fn with_combine_contexts(mut self, enabled: bool) -> Self {
        self.combine_contexts = enabled;
        self
    }

    /// Enables or disables boundary-marker wrapping.
    #[must_use]
    pub fn with_seq_tags(mut self, enabled: bool) -> Self {
        self.add_seq_tags = enabled;
        self
    }

    /// Overrides the start/end sequence markers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use convopack::config::DatasetConfig;
    ///
    /// let config = DatasetConfig::new().with_tokens("<s>", "</s>");
    /// assert_eq!(config.start_token, "<s>");
    /// ```
    #[must_use]
    pub fn with_tokens(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_token = start.into();
        self.end_token = end.into();
        self
    }

    /// Wraps `text` in the configured boundary markers, if enabled.
    ///
    /// Applied exactly once per emitted message, never doubled by repeated
    /// processing: decoration happens only at the point a message is copied
    /// out of the tree into an example.
    pub fn decorate(&self, text: &str) -> String {
        if self.add_seq_tags {
            format!("{} {} {}", self.start_token, text, self.end_token)
        } else {
            text.to_string()
        }
    }
}

/// Configuration for the Facebook Messenger extractor.
///
/// Messenger data downloads place one folder per conversation under
/// `inbox/`, each containing a `message_1.json` with `participants` and
/// `messages` arrays.
///
/// # Example
///
/// ```rust
/// use convopack::config::MessengerConfig;
///
/// let config = MessengerConfig::new()
///     .with_max_participants(2)
///     .with_min_messages(5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessengerConfig {
    /// Skip conversations with more than this many participants.
    pub max_participants: Option<usize>,

    /// Keep only conversations with strictly more than this many messages
    /// (default: 1).
    pub min_messages: usize,

    /// Repair Meta's latin-1 mojibake encoding (default: true).
    pub fix_encoding: bool,

    /// Skip unreadable or unparsable conversation files instead of
    /// returning an error (default: true).
    pub skip_invalid: bool,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            max_participants: None,
            min_messages: 1,
            fix_encoding: true,
            skip_invalid: true,
        }
    }
}

impl MessengerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum participant count.
    #[must_use]
    pub fn with_max_participants(mut self, max: usize) -> Self {
        self.max_participants = Some(max);
        self
    }

    /// Sets the minimum message count (exclusive bound).
    #[must_use]
    pub fn with_min_messages(mut self, min: usize) -> Self {
        self.min_messages = min;
        self
    }

    /// Enables or disables mojibake repair.
    #[must_use]
    pub fn with_fix_encoding(mut self, enabled: bool) -> Self {
        self.fix_encoding = enabled;
        self
    }

    /// Sets whether to skip invalid conversation files.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}
