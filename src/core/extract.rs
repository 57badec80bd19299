//! Traversal engine: turns a completed tree into (context, response) pairs.
//!
//! For every node in the tree, the engine decides whether the node forms a
//! valid response, and if so walks its ancestor chain backward to assemble
//! a bounded context. Nodes that fail the eligibility policy produce
//! nothing; they are not retried or reported.
//!
//! # Response eligibility
//!
//! A node is eligible as a response iff its parent exists (root nodes have
//! no prior turn to respond to) and its own message passes the
//! [`MessageFilter`]. The ancestor walk then runs from the parent toward
//! the root, collecting each message that passes the same filter, and
//! stops at the first non-qualifying ancestor, at the root's missing
//! parent, or at the configured context limit.

use crate::config::DatasetConfig;
use crate::core::filter::MessageFilter;
use crate::progress::{Phase, Progress, ProgressCallback};
use crate::tree::{ConversationTree, NodeRef};

/// Walks every node of `tree` and emits index-aligned context/response
/// sequences.
///
/// Contexts are returned unflattened (one `Vec<String>` per example,
/// oldest turn first); joining is the caller's concern. Boundary markers
/// are applied here, exactly once per emitted message.
///
/// # Example
///
/// ```rust
/// use convopack::config::DatasetConfig;
/// use convopack::core::extract::extract_examples;
/// use convopack::tree::ConversationTree;
///
/// let mut tree = ConversationTree::new();
/// tree.add_chain(["hi", "hello", "how are you"]);
///
/// let config = DatasetConfig::new().with_seq_tags(false);
/// let (contexts, responses) = extract_examples(&tree, &config, None);
///
/// assert_eq!(responses, vec!["hello", "how are you"]);
/// assert_eq!(contexts[1], vec!["hi", "hello"]);
/// ```
pub fn extract_examples(
    tree: &ConversationTree,
    config: &DatasetConfig,
    progress: Option<&ProgressCallback>,
) -> (Vec<Vec<String>>, Vec<String>) {
    let filter = MessageFilter::from_config(config);
    let total = tree.len();

    let mut contexts = Vec::new();
    let mut responses = Vec::new();

    for (visited, node) in tree.iter().enumerate() {
        if let Some((context, response)) = extract_one(node, &filter, config) {
            contexts.push(context);
            responses.push(response);
        }
        if let Some(callback) = progress {
            callback(Progress::new(Phase::Extracting, visited + 1, Some(total)));
        }
    }

    (contexts, responses)
}

/// Builds the example for a single node, or `None` if the node is not a
/// valid response.
fn extract_one(
    node: NodeRef<'_>,
    filter: &MessageFilter,
    config: &DatasetConfig,
) -> Option<(Vec<String>, String)> {
    node.parent()?;
    let text = node.message()?;
    if !filter.is_eligible(Some(text)) {
        return None;
    }
    let response = config.decorate(text);

    let mut context = Vec::new();
    let mut current = node.parent();
    let mut steps = 0usize;

    while let Some(ancestor) = current {
        if config.max_context_length.is_some_and(|max| steps >= max) {
            break;
        }
        match ancestor.message() {
            Some(msg) if filter.is_eligible(Some(msg)) => context.push(config.decorate(msg)),
            _ => break,
        }
        steps += 1;
        current = ancestor.parent();
    }

    // Collected nearest-first; examples want oldest-first
    context.reverse();
    Some((context, response))
}
