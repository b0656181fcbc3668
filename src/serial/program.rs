//! Compiled program container
//!
//! Layout:
//!
//! ```text
//! magic      8 bytes   "PHRSPGM\0"
//! version    u16
//! name       string (may be absent)
//! length     u32       body length in bytes
//! digest     32 bytes  SHA-256 of the body
//! body       encoded root node
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::codec::{BinReader, BinWriter};
use super::decode::decode_node;
use super::encode::encode_node;
use super::error::{SerialError, SerialResult};
use crate::interpreter::types::Node;

pub const MAGIC: [u8; 8] = *b"PHRSPGM\0";
pub const FORMAT_VERSION: u16 = 1;
const DIGEST_LEN: usize = 32;

fn body_length_field(len: usize) -> SerialResult<u32> {
    u32::try_from(len).map_err(|_| SerialError::BodyTooLarge(len))
}

/// A program tree ready to run, save, or load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub name: Option<String>,
    pub root: Node,
}

impl Program {
    pub fn new(root: Node) -> Self {
        Self { name: None, root }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn save<W: Write>(&self, writer: W) -> SerialResult<()> {
        let mut body = BinWriter::new(Vec::new());
        encode_node(Some(&self.root), &mut body)?;
        let body = body.into_inner();
        let digest = Sha256::digest(&body);
        let body_len = body_length_field(body.len())?;

        let mut output = BinWriter::new(writer);
        output.write_bytes(&MAGIC)?;
        output.write_u16(FORMAT_VERSION)?;
        output.write_opt_str(self.name.as_deref())?;
        output.write_u32(body_len)?;
        output.write_bytes(&digest)?;
        output.write_bytes(&body)?;
        debug!(bytes = body.len(), name = ?self.name, "saved program");
        Ok(())
    }

    pub fn load<R: Read>(reader: R) -> SerialResult<Self> {
        let mut input = BinReader::new(reader);
        if input.read_bytes(MAGIC.len())? != MAGIC {
            return Err(SerialError::BadMagic);
        }
        let version = input.read_u16()?;
        if version != FORMAT_VERSION {
            return Err(SerialError::UnsupportedVersion(version));
        }
        let name = input.read_opt_str()?;
        let body_len = input.read_u32()? as usize;
        let digest = input.read_bytes(DIGEST_LEN)?;
        let body = input.read_bytes(body_len)?;
        if Sha256::digest(&body).as_slice() != digest.as_slice() {
            return Err(SerialError::ChecksumMismatch);
        }

        let root = decode_node(&mut BinReader::new(body.as_slice()))?
            .ok_or(SerialError::Protocol("program has no root node"))?;
        Ok(Self { name, root })
    }

    pub fn to_bytes(&self) -> SerialResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.save(&mut bytes)?;
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> SerialResult<Self> {
        Self::load(bytes)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> SerialResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_file(path: impl AsRef<Path>) -> SerialResult<Self> {
        Self::load(BufReader::new(File::open(path)?))
    }

    /// Whether `bytes` begin with the compiled program magic
    pub fn is_compiled(bytes: &[u8]) -> bool {
        bytes.starts_with(&MAGIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huge_declared_body_on_short_file_is_eof() {
        let mut w = BinWriter::new(Vec::new());
        w.write_bytes(&MAGIC).unwrap();
        w.write_u16(FORMAT_VERSION).unwrap();
        w.write_opt_str(None).unwrap();
        w.write_u32(u32::MAX).unwrap();
        w.write_bytes(&[0u8; DIGEST_LEN]).unwrap();
        w.write_bytes(b"tiny").unwrap();
        let bytes = w.into_inner();

        match Program::from_bytes(&bytes) {
            Err(SerialError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("expected an EOF error, got {other:?}"),
        }
    }

    #[test]
    fn test_body_length_field_fits() {
        assert_eq!(body_length_field(12).unwrap(), 12);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_body_length_field_reports_real_size() {
        let too_large = u32::MAX as usize + 1;
        assert!(matches!(
            body_length_field(too_large),
            Err(SerialError::BodyTooLarge(n)) if n == too_large
        ));
    }
}
