//! Abstract Syntax Tree node types

use serde::{Deserialize, Serialize};

use crate::vocabulary::Query;

/// Source position of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// AST node
///
/// The tree is immutable once built and may be shared by many runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Node {
    Text(TextNode),
    Sequence(SequenceNode),
    Query(QueryNode),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode {
            location: LineCol::default(),
            text: text.into(),
        })
    }

    pub fn sequence(children: Vec<Node>) -> Self {
        Node::Sequence(SequenceNode {
            location: LineCol::default(),
            children,
        })
    }

    pub fn query(query: Query) -> Self {
        Node::Query(QueryNode {
            location: LineCol::default(),
            query,
        })
    }

    pub fn location(&self) -> LineCol {
        match self {
            Node::Text(n) => n.location,
            Node::Sequence(n) => n.location,
            Node::Query(n) => n.location,
        }
    }

    /// Same node, placed at `location`
    pub fn at(mut self, location: LineCol) -> Self {
        match &mut self {
            Node::Text(n) => n.location = location,
            Node::Sequence(n) => n.location = location,
            Node::Query(n) => n.location = location,
        }
        self
    }
}

/// Trees nest through sequence children and query complements. Dropping
/// them with the derived glue would recurse once per level, so subtrees are
/// detached onto a worklist and freed one node at a time.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

fn detach_children(node: &mut Node, pending: &mut Vec<Node>) {
    match node {
        Node::Text(_) => {}
        Node::Sequence(n) => pending.append(&mut n.children),
        Node::Query(n) => pending.extend(n.query.take_complement()),
    }
}

/// Prints literal text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(default)]
    pub location: LineCol,
    pub text: String,
}

/// Runs its children in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceNode {
    #[serde(default)]
    pub location: LineCol,
    pub children: Vec<Node>,
}

/// Looks up a term in the vocabulary and interleaves its complement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryNode {
    #[serde(default)]
    pub location: LineCol,
    pub query: Query,
}
