//! Primitive readers and writers
//!
//! All integers are little-endian. Strings are an `i32` byte length followed by
//! UTF-8 bytes; a length of `-1` marks an absent string.

use std::io::{self, Read, Write};

use super::error::{SerialError, SerialResult};

const ABSENT_STRING: i32 = -1;

/// Upfront buffer reservation for length-prefixed reads
const READ_RESERVE: usize = 64 * 1024;

/* ===================== Writer ===================== */

pub struct BinWriter<W> {
    inner: W,
}

impl<W: Write> BinWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_bool(&mut self, v: bool) -> SerialResult<()> {
        self.inner.write_all(&[v as u8])?;
        Ok(())
    }

    pub fn write_u16(&mut self, v: u16) -> SerialResult<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_i32(&mut self, v: i32) -> SerialResult<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_u32(&mut self, v: u32) -> SerialResult<()> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> SerialResult<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    /// Write a count as `i32`
    pub fn write_len(&mut self, len: usize) -> SerialResult<()> {
        let len = i32::try_from(len).map_err(|_| SerialError::InvalidLength(i32::MAX))?;
        self.write_i32(len)
    }

    pub fn write_str(&mut self, s: &str) -> SerialResult<()> {
        self.write_len(s.len())?;
        self.write_bytes(s.as_bytes())
    }

    pub fn write_opt_str(&mut self, s: Option<&str>) -> SerialResult<()> {
        match s {
            Some(s) => self.write_str(s),
            None => self.write_i32(ABSENT_STRING),
        }
    }
}

/* ===================== Reader ===================== */

pub struct BinReader<R> {
    inner: R,
}

impl<R: Read> BinReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_array<const N: usize>(&mut self) -> SerialResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_bool(&mut self) -> SerialResult<bool> {
        match self.read_array::<1>()?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SerialError::InvalidBool(other)),
        }
    }

    pub fn read_u16(&mut self) -> SerialResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> SerialResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> SerialResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read exactly `len` bytes
    ///
    /// Lengths come from untrusted headers, so the buffer grows with the bytes
    /// actually present instead of being sized from `len` upfront.
    pub fn read_bytes(&mut self, len: usize) -> SerialResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(READ_RESERVE));
        self.inner.by_ref().take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(SerialError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {len} bytes, found {}", buf.len()),
            )));
        }
        Ok(buf)
    }

    /// Read an `i32` count, rejecting negative values
    pub fn read_len(&mut self) -> SerialResult<usize> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| SerialError::InvalidLength(len))
    }

    pub fn read_opt_str(&mut self) -> SerialResult<Option<String>> {
        let len = self.read_i32()?;
        if len == ABSENT_STRING {
            return Ok(None);
        }
        let len = usize::try_from(len).map_err(|_| SerialError::InvalidLength(len))?;
        let bytes = self.read_bytes(len)?;
        Ok(Some(String::from_utf8(bytes)?))
    }

    pub fn read_str(&mut self) -> SerialResult<String> {
        self.read_opt_str()?.ok_or(SerialError::MissingString)
    }
}
