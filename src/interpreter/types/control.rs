//! Execution frames and node flow

use super::ast::{Node, QueryNode, SequenceNode, TextNode};
use super::phase::QueryPhase;

/* ===================== Flow ===================== */

/// What a node asks of the scheduler when it stops running
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow<'a> {
    /// Run this child to completion, then resume the current frame
    Yield(&'a Node),
    /// The node has finished
    Done,
}

/* ===================== Frames ===================== */

/// Execution frame - one per active node
///
/// Frames borrow their node from the shared tree and carry only the resume
/// state of that node, so the frame stack replaces the native call stack.
#[derive(Debug, Clone)]
pub enum Frame<'a> {
    Text { node: &'a TextNode },
    Sequence { node: &'a SequenceNode, idx: usize },
    Query { node: &'a QueryNode, phase: QueryPhase },
}

impl<'a> Frame<'a> {
    /// Initial frame for a node
    pub fn new(node: &'a Node) -> Self {
        match node {
            Node::Text(node) => Frame::Text { node },
            Node::Sequence(node) => Frame::Sequence { node, idx: 0 },
            Node::Query(node) => Frame::Query {
                node,
                phase: QueryPhase::Resolve,
            },
        }
    }
}
