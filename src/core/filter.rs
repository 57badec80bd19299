//! Message eligibility policy.
//!
//! This module decides which messages may appear in training examples,
//! either as a response or as a context member. The policy is applied
//! identically regardless of role; only the additional "has a parent" rule
//! (enforced by the extraction engine) is specific to responses.
//!
//! # Criteria
//!
//! | Criterion | Active when | Rule |
//! |-----------|-------------|------|
//! | Presence | always | Placeholder (`None`) messages never qualify |
//! | Length | `max_message_length` set | Character count strictly below the limit |
//! | Hyperlinks | `filter_hyperlinks` set | No `www`/`http` substring |
//!
//! Criteria are combined with AND logic. A message that fails is simply
//! excluded; exclusion is never an error.

use crate::config::DatasetConfig;

/// Substrings that mark a message as containing a hyperlink.
pub const HYPERLINK_MARKERS: [&str; 2] = ["www", "http"];

/// Eligibility filter built from a [`DatasetConfig`].
///
/// # Example
///
/// ```rust
/// use convopack::core::filter::MessageFilter;
/// use convopack::config::DatasetConfig;
///
/// let config = DatasetConfig::new()
///     .with_max_message_length(20)
///     .with_filter_hyperlinks(true);
/// let filter = MessageFilter::from_config(&config);
///
/// assert!(filter.is_eligible(Some("short and clean")));
/// assert!(!filter.is_eligible(Some("see http://example.com")));
/// assert!(!filter.is_eligible(None));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageFilter {
    /// Exclude messages whose character count is not strictly below this.
    pub max_message_length: Option<usize>,

    /// Exclude messages containing a hyperlink marker.
    pub filter_hyperlinks: bool,
}

impl MessageFilter {
    /// Creates a filter that accepts every present message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the filtering knobs from a dataset configuration.
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self {
            max_message_length: config.max_message_length,
            filter_hyperlinks: config.filter_hyperlinks,
        }
    }

    /// Returns `true` if the message content qualifies for inclusion.
    ///
    /// An unset length limit means unbounded; with hyperlink filtering
    /// disabled, link-bearing messages pass through.
    pub fn is_eligible(&self, message: Option<&str>) -> bool {
        let Some(text) = message else {
            return false;
        };
        if let Some(max) = self.max_message_length {
            if text.chars().count() >= max {
                return false;
            }
        }
        if self.filter_hyperlinks && has_hyperlink(text) {
            return false;
        }
        true
    }
}

/// Returns `true` if `text` contains one of the [`HYPERLINK_MARKERS`].
pub fn has_hyperlink(text: &str) -> bool {
    HYPERLINK_MARKERS.iter().any(|marker| text.contains(marker))
}
