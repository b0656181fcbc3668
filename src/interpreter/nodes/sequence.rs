use crate::interpreter::run::RunContext;
use crate::interpreter::types::{Flow, SequenceNode};

/// Yield each child in order
pub fn execute_sequence<'a>(node: &'a SequenceNode, idx: &mut usize, _ctx: &mut RunContext) -> Flow<'a> {
    match node.children.get(*idx) {
        Some(child) => {
            *idx += 1;
            Flow::Yield(child)
        }
        None => Flow::Done,
    }
}
