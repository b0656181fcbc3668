use std::io::{Read, Write};

use crate::interpreter::types::{LineCol, Node, SequenceNode};
use crate::serial::codec::{BinReader, BinWriter};
use crate::serial::decode::{DecodeFlow, ForwardRef};
use crate::serial::encode::EncodeFlow;
use crate::serial::error::{SerialError, SerialResult};

/// Step 0 writes the child count; each later step yields one child
pub fn serialize<'a, W: Write>(
    node: &'a SequenceNode,
    step: usize,
    output: &mut BinWriter<W>,
) -> SerialResult<EncodeFlow<'a>> {
    if step == 0 {
        output.write_len(node.children.len())?;
    }
    Ok(match node.children.get(step) {
        Some(child) => EncodeFlow::Child(Some(child)),
        None => EncodeFlow::Done,
    })
}

#[derive(Debug)]
pub struct SequenceReader {
    location: LineCol,
    expected: Option<usize>,
    children: Vec<Node>,
}

impl SequenceReader {
    pub fn new(location: LineCol) -> Self {
        Self {
            location,
            expected: None,
            children: Vec::new(),
        }
    }

    pub fn resume<R: Read>(
        &mut self,
        input: &mut BinReader<R>,
        reply: Option<ForwardRef>,
    ) -> SerialResult<DecodeFlow> {
        let expected = match self.expected {
            Some(n) => n,
            None => {
                let n = input.read_len()?;
                self.expected = Some(n);
                self.children.reserve(n.min(1024));
                n
            }
        };

        if let Some(reply) = reply {
            let child = reply
                .into_result()
                .ok_or(SerialError::Protocol("sequence child is absent"))?;
            self.children.push(child);
        }

        if self.children.len() < expected {
            return Ok(DecodeFlow::Request);
        }
        Ok(DecodeFlow::Complete(Node::Sequence(SequenceNode {
            location: self.location,
            children: std::mem::take(&mut self.children),
        })))
    }
}
