//! Driving decoder with forward references
//!
//! A node reader that reaches a nested node does not decode it. It yields
//! [`DecodeFlow::Request`] and suspends. The decoder reads the next header,
//! dispatches on its tag, runs that node's reader to completion (servicing its
//! own requests the same way), and resumes the requester with a filled
//! [`ForwardRef`].

use std::io::Read;

use super::codec::BinReader;
use super::error::{SerialError, SerialResult};
use super::nodes::{QueryReader, SequenceReader, TextReader};
use super::registry::{NodeKind, NULL_TAG};
use crate::interpreter::types::{LineCol, Node};

/// A pending child-node slot, filled by the decoder
#[derive(Debug, Default)]
pub struct ForwardRef {
    result: Option<Node>,
}

impl ForwardRef {
    fn resolved(result: Option<Node>) -> Self {
        Self { result }
    }

    /// The decoded node, or `None` if the stream held the absent marker
    pub fn into_result(self) -> Option<Node> {
        self.result
    }
}

/// What a node reader asks of the decoder
#[derive(Debug)]
pub enum DecodeFlow {
    /// Decode the next node and resume this reader with it
    Request,
    /// The node is fully read
    Complete(Node),
}

#[derive(Debug)]
enum NodeReader {
    Text(TextReader),
    Sequence(SequenceReader),
    Query(QueryReader),
}

impl NodeReader {
    fn new(kind: NodeKind, location: LineCol) -> Self {
        match kind {
            NodeKind::Text => NodeReader::Text(TextReader::new(location)),
            NodeKind::Sequence => NodeReader::Sequence(SequenceReader::new(location)),
            NodeKind::Query => NodeReader::Query(QueryReader::new(location)),
        }
    }

    fn resume<R: Read>(
        &mut self,
        input: &mut BinReader<R>,
        reply: Option<ForwardRef>,
    ) -> SerialResult<DecodeFlow> {
        match self {
            NodeReader::Text(r) => r.resume(input, reply),
            NodeReader::Sequence(r) => r.resume(input, reply),
            NodeReader::Query(r) => r.resume(input, reply),
        }
    }
}

/// Read a node header; `None` for the absent marker
fn open_node<R: Read>(input: &mut BinReader<R>) -> SerialResult<Option<NodeReader>> {
    let tag = input.read_u32()?;
    if tag == NULL_TAG {
        return Ok(None);
    }
    let kind = NodeKind::from_tag(tag).ok_or(SerialError::UnknownNodeTag(tag))?;
    let line = input.read_u32()?;
    let col = input.read_u32()?;
    Ok(Some(NodeReader::new(kind, LineCol::new(line, col))))
}

/// Decode one node (and everything below it); `None` for the absent marker
pub fn decode_node<R: Read>(input: &mut BinReader<R>) -> SerialResult<Option<Node>> {
    let Some(root) = open_node(input)? else {
        return Ok(None);
    };

    let mut stack = vec![root];
    let mut reply: Option<ForwardRef> = None;
    loop {
        let Some(reader) = stack.last_mut() else {
            return Err(SerialError::Protocol("decoder stack emptied before completion"));
        };
        match reader.resume(input, reply.take())? {
            DecodeFlow::Request => match open_node(input)? {
                Some(child) => stack.push(child),
                None => reply = Some(ForwardRef::resolved(None)),
            },
            DecodeFlow::Complete(node) => {
                stack.pop();
                if stack.is_empty() {
                    return Ok(Some(node));
                }
                reply = Some(ForwardRef::resolved(Some(node)));
            }
        }
    }
}
