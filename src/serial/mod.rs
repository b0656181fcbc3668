//! Binary persistence of program trees
//!
//! - `codec`: primitive readers and writers
//! - `registry`: node tags
//! - `encode`/`decode`: driving encoder and decoder
//! - `nodes`: per-node field order
//! - `program`: the compiled program container

use crate::interpreter::types::Node;

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod nodes;
pub mod program;
pub mod registry;


pub use codec::{BinReader, BinWriter};
pub use decode::{decode_node, DecodeFlow, ForwardRef};
pub use encode::{encode_node, EncodeFlow};
pub use error::{SerialError, SerialResult};
pub use program::{Program, FORMAT_VERSION, MAGIC};
pub use registry::{fourcc, NodeKind, NULL_TAG};

/// Encode a node tree into a fresh buffer
pub fn node_to_bytes(node: &Node) -> SerialResult<Vec<u8>> {
    let mut output = BinWriter::new(Vec::new());
    encode_node(Some(node), &mut output)?;
    Ok(output.into_inner())
}

/// Decode a node tree from a buffer
pub fn node_from_bytes(bytes: &[u8]) -> SerialResult<Option<Node>> {
    decode_node(&mut BinReader::new(bytes))
}
