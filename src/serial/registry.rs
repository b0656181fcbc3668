//! Node tag registry
//!
//! Every node variant is identified on the wire by a four-character code.

use crate::interpreter::types::Node;

/// Header tag marking an absent node
pub const NULL_TAG: u32 = 0;

pub const fn fourcc(code: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Sequence,
    Query,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Text, NodeKind::Sequence, NodeKind::Query];

    pub const fn tag(self) -> u32 {
        match self {
            NodeKind::Text => fourcc(b"text"),
            NodeKind::Sequence => fourcc(b"sequ"),
            NodeKind::Query => fourcc(b"quer"),
        }
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn of(node: &Node) -> Self {
        match node {
            Node::Text(_) => NodeKind::Text,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Query(_) => NodeKind::Query,
        }
    }
}
