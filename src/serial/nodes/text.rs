use std::io::{Read, Write};

use crate::interpreter::types::{LineCol, Node, TextNode};
use crate::serial::codec::{BinReader, BinWriter};
use crate::serial::decode::{DecodeFlow, ForwardRef};
use crate::serial::encode::EncodeFlow;
use crate::serial::error::SerialResult;

pub fn serialize<'a, W: Write>(
    node: &'a TextNode,
    _step: usize,
    output: &mut BinWriter<W>,
) -> SerialResult<EncodeFlow<'a>> {
    output.write_str(&node.text)?;
    Ok(EncodeFlow::Done)
}

#[derive(Debug)]
pub struct TextReader {
    location: LineCol,
}

impl TextReader {
    pub fn new(location: LineCol) -> Self {
        Self { location }
    }

    pub fn resume<R: Read>(
        &mut self,
        input: &mut BinReader<R>,
        _reply: Option<ForwardRef>,
    ) -> SerialResult<DecodeFlow> {
        let text = input.read_str()?;
        Ok(DecodeFlow::Complete(Node::Text(TextNode {
            location: self.location,
            text,
        })))
    }
}
