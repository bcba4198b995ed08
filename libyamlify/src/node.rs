//! Parsed document tree.

use std::fmt;

/// One untyped value of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Leaf text, not yet converted.
    Scalar(String),
    /// Ordered items.
    Sequence(Vec<Node>),
    /// Ordered `key: value` entries with unique keys.
    Mapping(Vec<(String, Node)>),
}

/// The kind of a [`Node`], used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Scalar => write!(f, "scalar"),
            NodeKind::Sequence => write!(f, "sequence"),
            NodeKind::Mapping => write!(f, "mapping"),
        }
    }
}

impl Node {
    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Returns the text if this is a `Scalar`.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a `Sequence`.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Mapping`.
    pub fn as_mapping(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a mapping entry by key. Returns `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` for the empty scalar left by `key:` with no sub-tree.
    pub fn is_empty_scalar(&self) -> bool {
        matches!(self, Node::Scalar(s) if s.is_empty())
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<Vec<(String, Node)>> for Node {
    fn from(entries: Vec<(String, Node)>) -> Self {
        Node::Mapping(entries)
    }
}
