//! Arena-backed conversation tree.
//!
//! This module provides [`ConversationTree`], a forest of message nodes
//! that reconstructs parent/child reply relationships from linear
//! conversation transcripts. Each independent conversation is inserted as a
//! root-to-leaf chain hung off a fresh root, so unrelated conversations
//! coexist in one forest without cross-contamination. Genuine branching
//! reply trees can be expressed through [`add_node`](ConversationTree::add_node)
//! by reusing parent ids.
//!
//! # Ownership Model
//!
//! The tree is a dense arena: nodes live in a `Vec` indexed by their id and
//! hold only id back-references to their parent and children, never direct
//! references. This eliminates reference cycles entirely. Borrowed
//! navigation is provided through [`NodeRef`], a view that pairs a node
//! with its owning tree.
//!
//! # Example
//!
//! ```rust
//! use convopack::tree::ConversationTree;
//!
//! let mut tree = ConversationTree::new();
//! tree.add_chain(["hi", "hello", "how are you"]);
//!
//! assert_eq!(tree.len(), 3);
//!
//! let leaf = tree.get(2)?;
//! assert_eq!(leaf.message(), Some("how are you"));
//! assert_eq!(leaf.parent().and_then(|p| p.parent()).map(|r| r.id()), Some(0));
//! # Ok::<(), convopack::ConvopackError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConvopackError, Result};

/// A single message record in the tree.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `usize` | Dense index, assigned in insertion order starting at 0 |
/// | `message` | `Option<String>` | Text payload; `None` for a placeholder node |
/// | `parent_id` | `Option<usize>` | Id of the parent node; `None` only for roots |
/// | `children_ids` | `Vec<usize>` | Ids of replies, in insertion order |
///
/// A node's `parent_id`, once set, never changes; `children_ids` only
/// grows. Nodes are immutable from the outside: only the tree registers
/// new children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    parent_id: Option<usize>,
    #[serde(default)]
    children_ids: Vec<usize>,
}

impl Node {
    /// Returns this node's id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the message text, or `None` for a placeholder node.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the parent id, or `None` if this node is a conversation root.
    pub fn parent_id(&self) -> Option<usize> {
        self.parent_id
    }

    /// Returns the ids of this node's children, in insertion order.
    pub fn children_ids(&self) -> &[usize] {
        &self.children_ids
    }

    /// Returns `true` if this node is a conversation root.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A borrowed view of a node together with its owning tree.
///
/// `NodeRef` is what tree traversal hands out: it dereferences the id
/// back-references stored in the node against the arena, so callers can
/// navigate to parents and children without the tree giving up ownership.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ConversationTree,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    /// Returns this node's id.
    pub fn id(&self) -> usize {
        self.node.id
    }

    /// Returns the message text, or `None` for a placeholder node.
    pub fn message(&self) -> Option<&'a str> {
        self.node.message.as_deref()
    }

    /// Returns the parent id, or `None` if this node is a conversation root.
    pub fn parent_id(&self) -> Option<usize> {
        self.node.parent_id
    }

    /// Returns the parent node, or `None` if this node is a root.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        // parent_id is assigned by the tree, so the index is always valid
        self.node.parent_id.map(|id| NodeRef {
            tree: self.tree,
            node: &self.tree.nodes[id],
        })
    }

    /// Returns this node's children, in insertion order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        self.node
            .children_ids
            .iter()
            .map(|&id| NodeRef {
                tree: self.tree,
                node: &self.tree.nodes[id],
            })
            .collect()
    }

    /// Returns `true` if this node is a conversation root.
    pub fn is_root(&self) -> bool {
        self.node.is_root()
    }
}

/// An append-only forest of message nodes.
///
/// Created empty per dataset build, populated by repeated chain
/// insertions, then traversed read-only during extraction. Ids are dense
/// and double as indices into the backing store, so lookup is O(1).
///
/// # Example
///
/// ```rust
/// use convopack::tree::ConversationTree;
///
/// let mut tree = ConversationTree::new();
///
/// // A branching reply tree: two replies to the same root
/// let root = tree.add_node(Some("original post".into()), None)?;
/// tree.add_node(Some("first reply".into()), Some(root))?;
/// tree.add_node(Some("second reply".into()), Some(root))?;
///
/// assert_eq!(tree.get(root)?.children().len(), 2);
/// # Ok::<(), convopack::ConvopackError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTree {
    nodes: Vec<Node>,
}

impl ConversationTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with capacity for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Appends a new node and returns its assigned id.
    ///
    /// If `parent_id` is given, the new node's id is registered in that
    /// parent's children list.
    ///
    /// # Errors
    ///
    /// Returns [`ConvopackError::NodeOutOfRange`] if `parent_id` does not
    /// reference an existing node. Callers must supply ids obtained from
    /// this same tree.
    pub fn add_node(&mut self, message: Option<String>, parent_id: Option<usize>) -> Result<usize> {
        if let Some(pid) = parent_id {
            if pid >= self.nodes.len() {
                return Err(ConvopackError::node_out_of_range(pid, self.nodes.len()));
            }
        }
        Ok(self.push_node(message, parent_id))
    }

    /// Inserts a conversation as a single root-to-leaf chain.
    ///
    /// The first message becomes a new root; each subsequent message
    /// becomes a child of the previously inserted node. An empty sequence
    /// is a no-op, not an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use convopack::tree::ConversationTree;
    ///
    /// let mut tree = ConversationTree::new();
    /// tree.add_chain(["hi", "hello"]);
    /// tree.add_chain(Vec::<String>::new()); // no-op
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn add_chain<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parent: Option<usize> = None;
        for message in messages {
            // parent is always an id we just created, so no validation needed
            parent = Some(self.push_node(Some(message.into()), parent));
        }
    }

    /// Indexed lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConvopackError::NodeOutOfRange`] if `id` is not a valid
    /// index.
    pub fn get(&self, id: usize) -> Result<NodeRef<'_>> {
        self.nodes
            .get(id)
            .map(|node| NodeRef { tree: self, node })
            .ok_or_else(|| ConvopackError::node_out_of_range(id, self.nodes.len()))
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all nodes in insertion order.
    ///
    /// The iterator is finite and restartable: the tree is not mutated
    /// during extraction, so re-traversing yields the same nodes.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.nodes.iter().map(move |node| NodeRef { tree: self, node })
    }

    fn push_node(&mut self, message: Option<String>, parent_id: Option<usize>) -> usize {
        let id = self.nodes.len();
        if let Some(pid) = parent_id {
            self.nodes[pid].children_ids.push(id);
        }
        self.nodes.push(Node {
            id,
            message,
            parent_id,
            children_ids: Vec::new(),
        });
        id
    }
}

impl<'a> IntoIterator for &'a ConversationTree {
    type Item = NodeRef<'a>;
    type IntoIter = std::vec::IntoIter<NodeRef<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter().collect::<Vec<_>>().into_iter()
    }
}
