//! Driving encoder
//!
//! Node serializers never write their children directly. They yield a child
//! request; the encoder writes the child's header and pushes a frame for it,
//! so nested nodes are written without native recursion.

use std::io::Write;

use super::codec::BinWriter;
use super::error::SerialResult;
use super::nodes::{serialize_query, serialize_sequence, serialize_text};
use super::registry::{NodeKind, NULL_TAG};
use crate::interpreter::types::Node;

/// What a node serializer asks of the encoder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodeFlow<'a> {
    /// Write this child (or the absent marker) and resume the current node after it
    Child(Option<&'a Node>),
    /// The node is fully written
    Done,
}

struct EncodeFrame<'a> {
    node: &'a Node,
    step: usize,
}

impl<'a> EncodeFrame<'a> {
    fn resume<W: Write>(&mut self, output: &mut BinWriter<W>) -> SerialResult<EncodeFlow<'a>> {
        let step = self.step;
        self.step += 1;
        match self.node {
            Node::Text(n) => serialize_text(n, step, output),
            Node::Sequence(n) => serialize_sequence(n, step, output),
            Node::Query(n) => serialize_query(n, step, output),
        }
    }
}

/// Write a node header: tag, then location for present nodes
fn write_header<W: Write>(node: Option<&Node>, output: &mut BinWriter<W>) -> SerialResult<()> {
    let Some(node) = node else {
        return output.write_u32(NULL_TAG);
    };
    let location = node.location();
    output.write_u32(NodeKind::of(node).tag())?;
    output.write_u32(location.line)?;
    output.write_u32(location.col)
}

/// Encode `root` and every node below it
pub fn encode_node<W: Write>(root: Option<&Node>, output: &mut BinWriter<W>) -> SerialResult<()> {
    write_header(root, output)?;
    let Some(root) = root else {
        return Ok(());
    };

    let mut stack = vec![EncodeFrame { node: root, step: 0 }];
    while let Some(frame) = stack.last_mut() {
        match frame.resume(output)? {
            EncodeFlow::Child(child) => {
                write_header(child, output)?;
                if let Some(child) = child {
                    stack.push(EncodeFrame { node: child, step: 0 });
                }
            }
            EncodeFlow::Done => {
                stack.pop();
            }
        }
    }
    Ok(())
}
