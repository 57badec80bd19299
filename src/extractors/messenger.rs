//! Facebook Messenger export extractor.
//!
//! A Messenger data download places one folder per conversation under
//! `inbox/`, each containing a `message_1.json` with `participants` and
//! `messages` arrays. This module walks that layout and produces the plain
//! conversation batches the dataset builder consumes: one ordered list of
//! message texts per conversation, oldest first.
//!
//! Meta exports text with broken encoding (UTF-8 bytes stored as latin-1
//! codepoints); [`fix_mojibake_encoding`] reverses that.
//!
//! # Example
//!
//! ```rust,no_run
//! use convopack::config::MessengerConfig;
//! use convopack::extractors::MessengerExtractor;
//!
//! let extractor = MessengerExtractor::with_config(
//!     "facebook-export",
//!     MessengerConfig::new().with_max_participants(2),
//! );
//! let conversations = extractor.extract()?;
//! # Ok::<(), convopack::ConvopackError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::config::MessengerConfig;
use crate::error::{ConvopackError, Result};

/// Raw Messenger conversation file structure for deserialization.
#[derive(Debug, Deserialize)]
pub struct MessengerExport {
    #[serde(default)]
    pub participants: Vec<MessengerParticipant>,
    #[serde(default)]
    pub messages: Vec<MessengerRawMessage>,
}

/// A conversation participant.
#[derive(Debug, Deserialize)]
pub struct MessengerParticipant {
    pub name: String,
}

/// A raw message object.
///
/// Messages without a `content` field (stickers, unsent messages, calls)
/// are skipped during extraction.
#[derive(Debug, Deserialize)]
pub struct MessengerRawMessage {
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub timestamp_ms: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Fix Meta's broken encoding (Mojibake).
///
/// Meta exports UTF-8 text encoded as if it were ISO-8859-1: each UTF-8
/// byte is stored as a separate Unicode codepoint. This reconstructs the
/// original string by taking each char as its byte value; strings that are
/// not valid mojibake pass through unchanged.
pub fn fix_mojibake_encoding(s: &str) -> String {
    let bytes: Vec<u8> = s.chars().map(|c| c as u8).collect();
    String::from_utf8(bytes).unwrap_or_else(|_| s.to_string())
}

/// Parses a millisecond timestamp to a `DateTime`.
pub fn parse_ms_timestamp(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_ms).single()
}

/// Extractor for a Facebook Messenger data download.
///
/// Points at either the download root (the `inbox/` folder is resolved
/// underneath it) or directly at an inbox directory.
#[derive(Debug, Clone)]
pub struct MessengerExtractor {
    root: PathBuf,
    config: MessengerConfig,
}

impl MessengerExtractor {
    /// Creates an extractor with the default configuration.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, MessengerConfig::default())
    }

    /// Creates an extractor with an explicit configuration.
    pub fn with_config(path: impl Into<PathBuf>, config: MessengerConfig) -> Self {
        Self {
            root: path.into(),
            config,
        }
    }

    /// Extracts every qualifying conversation as an ordered message list.
    ///
    /// Conversations are skipped (never errors) when they exceed
    /// `max_participants` or do not have strictly more than `min_messages`
    /// messages. Unreadable or unparsable conversation files are skipped
    /// under `skip_invalid`, otherwise the error propagates.
    ///
    /// # Errors
    ///
    /// Returns [`ConvopackError::InvalidFormat`] if no inbox directory is
    /// found, and I/O or JSON errors when `skip_invalid` is disabled.
    pub fn extract(&self) -> Result<Vec<Vec<String>>> {
        let inbox = self.resolve_inbox()?;

        let mut folders: Vec<PathBuf> = fs::read_dir(&inbox)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        // Directory order is filesystem-dependent; sort for determinism
        folders.sort();

        let mut conversations = Vec::new();
        for folder in folders {
            let file = folder.join("message_1.json");
            match self.extract_conversation(&file) {
                Ok(Some(messages)) => conversations.push(messages),
                Ok(None) => {}
                Err(_) if self.config.skip_invalid => {}
                Err(e) => return Err(e),
            }
        }
        Ok(conversations)
    }

    /// Reads and filters a single conversation file.
    ///
    /// Returns `Ok(None)` for conversations excluded by the participant or
    /// message-count filters.
    fn extract_conversation(&self, path: &Path) -> Result<Option<Vec<String>>> {
        let raw = fs::read_to_string(path)?;
        let export: MessengerExport = serde_json::from_str(&raw)?;

        if let Some(max) = self.config.max_participants {
            if export.participants.len() > max {
                return Ok(None);
            }
        }

        let mut timed: Vec<(Option<DateTime<Utc>>, String)> = export
            .messages
            .iter()
            .filter_map(|msg| {
                let content = msg.content.as_ref()?;
                let content = if self.config.fix_encoding {
                    fix_mojibake_encoding(content)
                } else {
                    content.clone()
                };
                let timestamp = msg.timestamp_ms.and_then(parse_ms_timestamp);
                Some((timestamp, content))
            })
            .collect();

        // Exports list newest messages first; put them into time order
        timed.sort_by_key(|(timestamp, _)| *timestamp);
        let messages: Vec<String> = timed.into_iter().map(|(_, content)| content).collect();

        if messages.len() > self.config.min_messages {
            Ok(Some(messages))
        } else {
            Ok(None)
        }
    }

    fn resolve_inbox(&self) -> Result<PathBuf> {
        let inbox = if self
            .root
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.contains("inbox"))
        {
            self.root.clone()
        } else {
            self.root.join("inbox")
        };

        if inbox.is_dir() {
            Ok(inbox)
        } else {
            Err(ConvopackError::invalid_format_at(
                "Messenger",
                "no inbox directory found",
                inbox,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_conversation(export_root: &Path, folder: &str, json: &str) {
        let dir = export_root.join("inbox").join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("message_1.json"), json).unwrap();
    }

    fn two_person_chat() -> &'static str {
        r#"{
            "participants": [{"name": "Alice"}, {"name": "Bob"}],
            "messages": [
                {"sender_name": "Bob", "timestamp_ms": 3000, "content": "how are you"},
                {"sender_name": "Alice", "timestamp_ms": 2000, "content": "hello"},
                {"sender_name": "Bob", "timestamp_ms": 1000, "content": "hi"}
            ]
        }"#
    }

    #[test]
    fn test_extract_orders_messages_by_timestamp() {
        let tmp = TempDir::new().unwrap();
        write_conversation(tmp.path(), "alice_abc", two_person_chat());

        let extractor = MessengerExtractor::new(tmp.path());
        let conversations = extractor.extract().unwrap();

        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0], vec!["hi", "hello", "how are you"]);
    }

    #[test]
    fn test_extract_accepts_inbox_path_directly() {
        let tmp = TempDir::new().unwrap();
        write_conversation(tmp.path(), "alice_abc", two_person_chat());

        let extractor = MessengerExtractor::new(tmp.path().join("inbox"));
        assert_eq!(extractor.extract().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_inbox_is_invalid_format() {
        let tmp = TempDir::new().unwrap();
        let err = MessengerExtractor::new(tmp.path()).extract().unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_contentless_messages_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write_conversation(
            tmp.path(),
            "bob_xyz",
            r#"{
                "participants": [{"name": "Alice"}, {"name": "Bob"}],
                "messages": [
                    {"sender_name": "Bob", "timestamp_ms": 3000, "content": "bye"},
                    {"sender_name": "Alice", "timestamp_ms": 2000},
                    {"sender_name": "Bob", "timestamp_ms": 1000, "content": "hi"}
                ]
            }"#,
        );

        let conversations = MessengerExtractor::new(tmp.path()).extract().unwrap();
        assert_eq!(conversations[0], vec!["hi", "bye"]);
    }

    #[test]
    fn test_max_participants_skips_group_chats() {
        let tmp = TempDir::new().unwrap();
        write_conversation(tmp.path(), "duo_abc", two_person_chat());
        write_conversation(
            tmp.path(),
            "group_def",
            r#"{
                "participants": [{"name": "A"}, {"name": "B"}, {"name": "C"}],
                "messages": [
                    {"sender_name": "A", "timestamp_ms": 2000, "content": "two"},
                    {"sender_name": "B", "timestamp_ms": 1000, "content": "one"}
                ]
            }"#,
        );

        let config = MessengerConfig::new().with_max_participants(2);
        let extractor = MessengerExtractor::with_config(tmp.path(), config);
        let conversations = extractor.extract().unwrap();

        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0][0], "hi");
    }

    #[test]
    fn test_min_messages_bound_is_strict() {
        let tmp = TempDir::new().unwrap();
        write_conversation(
            tmp.path(),
            "short_abc",
            r#"{
                "participants": [{"name": "A"}, {"name": "B"}],
                "messages": [
                    {"sender_name": "A", "timestamp_ms": 1000, "content": "only"},
                    {"sender_name": "B", "timestamp_ms": 2000, "content": "two"}
                ]
            }"#,
        );

        // Two messages is not strictly more than two
        let config = MessengerConfig::new().with_min_messages(2);
        let extractor = MessengerExtractor::with_config(tmp.path(), config);
        assert!(extractor.extract().unwrap().is_empty());
    }

    #[test]
    fn test_skip_invalid_ignores_broken_files() {
        let tmp = TempDir::new().unwrap();
        write_conversation(tmp.path(), "good_abc", two_person_chat());
        write_conversation(tmp.path(), "broken_def", "not json at all");

        let conversations = MessengerExtractor::new(tmp.path()).extract().unwrap();
        assert_eq!(conversations.len(), 1);
    }

    #[test]
    fn test_skip_invalid_disabled_propagates_error() {
        let tmp = TempDir::new().unwrap();
        write_conversation(tmp.path(), "broken_def", "not json at all");

        let config = MessengerConfig::new().with_skip_invalid(false);
        let extractor = MessengerExtractor::with_config(tmp.path(), config);
        assert!(extractor.extract().is_err());
    }

    #[test]
    fn test_fix_mojibake_ascii_passthrough() {
        assert_eq!(fix_mojibake_encoding("Hello"), "Hello");
        assert_eq!(fix_mojibake_encoding("Test 123"), "Test 123");
    }

    #[test]
    fn test_fix_mojibake_repairs_latin1() {
        // UTF-8 bytes of "é" (0xC3 0xA9) read back as latin-1 give "Ã©"
        assert_eq!(fix_mojibake_encoding("Ã©"), "é");
    }

    #[test]
    fn test_fix_encoding_disabled_keeps_raw_text() {
        let tmp = TempDir::new().unwrap();
        write_conversation(
            tmp.path(),
            "raw_abc",
            r#"{
                "participants": [{"name": "A"}, {"name": "B"}],
                "messages": [
                    {"sender_name": "A", "timestamp_ms": 2000, "content": "two"},
                    {"sender_name": "B", "timestamp_ms": 1000, "content": "Ã©"}
                ]
            }"#,
        );

        let config = MessengerConfig::new().with_fix_encoding(false);
        let extractor = MessengerExtractor::with_config(tmp.path(), config);
        assert_eq!(extractor.extract().unwrap()[0][0], "Ã©");
    }

    #[test]
    fn test_parse_ms_timestamp() {
        assert!(parse_ms_timestamp(1_705_315_800_000).is_some());
    }
}
