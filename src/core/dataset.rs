//! Batch dataset assembly.
//!
//! This module owns the public entry point of the crate:
//! [`make_training_examples`] takes a batch of conversations (each an
//! ordered sequence of message texts), builds one [`ConversationTree`] by
//! inserting every conversation as a chain, runs the traversal engine once
//! over the completed tree, and returns the aligned context/response
//! sequences as a [`Dataset`].
//!
//! # Example
//!
//! ```rust
//! use convopack::config::DatasetConfig;
//! use convopack::core::dataset::{make_training_examples, Contexts};
//!
//! let conversations = vec![vec![
//!     "hi".to_string(),
//!     "hello".to_string(),
//!     "how are you".to_string(),
//! ]];
//!
//! let config = DatasetConfig::new().with_seq_tags(false);
//! let dataset = make_training_examples(&conversations, &config);
//!
//! assert_eq!(dataset.responses, vec!["hello", "how are you"]);
//! match dataset.contexts {
//!     Contexts::Joined(contexts) => assert_eq!(contexts, vec!["hi", "hi hello"]),
//!     Contexts::Turns(_) => unreachable!("combine_contexts defaults to true"),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::DatasetConfig;
use crate::core::extract::extract_examples;
use crate::progress::{Phase, Progress, ProgressCallback};
use crate::tree::ConversationTree;

/// The context side of a dataset, in one of two shapes.
///
/// With `combine_contexts` enabled each context is flattened into a single
/// space-joined string; otherwise it stays an ordered list of turns,
/// oldest first. Serializes untagged, so JSON output is a plain array of
/// strings or of string arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contexts {
    /// One ordered list of turns per example.
    Turns(Vec<Vec<String>>),
    /// One space-joined string per example.
    Joined(Vec<String>),
}

impl Contexts {
    /// Returns the number of contexts.
    pub fn len(&self) -> usize {
        match self {
            Contexts::Turns(turns) => turns.len(),
            Contexts::Joined(joined) => joined.len(),
        }
    }

    /// Returns `true` if there are no contexts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the context at `index` as a single space-joined string.
    ///
    /// For [`Contexts::Joined`] this is a clone; for [`Contexts::Turns`]
    /// the turns are joined on demand.
    pub fn joined(&self, index: usize) -> Option<String> {
        match self {
            Contexts::Turns(turns) => turns.get(index).map(|c| c.join(" ")),
            Contexts::Joined(joined) => joined.get(index).cloned(),
        }
    }
}

/// Two index-aligned sequences: `contexts[i]` is the bounded ancestor
/// chain for `responses[i]`.
///
/// Examples have no identity beyond their position; the dataset owns
/// independent copies of all message text and holds no reference to the
/// tree it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Per-example contexts, flattened or not per the build configuration.
    pub contexts: Contexts,
    /// Per-example responses.
    pub responses: Vec<String>,
}

impl Dataset {
    /// Returns the number of examples.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Returns `true` if the dataset holds no examples.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Converts a batch of conversations into (context, response) examples.
///
/// Each conversation is inserted into a fresh tree as a root-to-leaf
/// chain (empty conversations are skipped silently), then every valid
/// reply path is linearized into one example. See [`DatasetConfig`] for
/// the filtering and formatting knobs.
pub fn make_training_examples(conversations: &[Vec<String>], config: &DatasetConfig) -> Dataset {
    build(conversations, config, None)
}

/// Like [`make_training_examples`], reporting progress through `callback`.
///
/// The callback is side-effect-only: it receives one update per
/// conversation inserted and one per node visited during extraction, and
/// has no influence on the ordering or content of the result.
pub fn make_training_examples_with_progress(
    conversations: &[Vec<String>],
    config: &DatasetConfig,
    callback: &ProgressCallback,
) -> Dataset {
    build(conversations, config, Some(callback))
}

fn build(
    conversations: &[Vec<String>],
    config: &DatasetConfig,
    progress: Option<&ProgressCallback>,
) -> Dataset {
    let mut tree = ConversationTree::with_capacity(conversations.iter().map(Vec::len).sum());
    for (inserted, conversation) in conversations.iter().enumerate() {
        tree.add_chain(conversation.iter().cloned());
        if let Some(callback) = progress {
            callback(Progress::new(
                Phase::BuildingTree,
                inserted + 1,
                Some(conversations.len()),
            ));
        }
    }

    let (contexts, responses) = extract_examples(&tree, config, progress);

    let contexts = if config.combine_contexts {
        Contexts::Joined(contexts.iter().map(|c| c.join(" ")).collect())
    } else {
        Contexts::Turns(contexts)
    };

    Dataset {
        contexts,
        responses,
    }
}
