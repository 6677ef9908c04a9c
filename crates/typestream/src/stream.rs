// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Byte stream ownership and primitive I/O.
//!
//! A [`SerialStream`] wraps one byte-oriented medium (heap buffer, file, or
//! an externally supplied stream) behind a single sequential cursor. The
//! lifecycle is explicit: open, read/write, flush, close. Close happens
//! exactly once, either through [`SerialStream::close`] or on drop.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

/// Combined read/write bound for externally supplied media.
pub trait ByteStream: Read + Write {}

impl<T: Read + Write> ByteStream for T {}

/// Open mode for file-backed streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Create the file, truncating existing content.
    Create,
    /// Create the file; fail if it already exists.
    CreateNew,
    /// Open for appending, creating if missing.
    Append,
    /// Open an existing file read-only.
    Open,
}

enum Medium {
    Memory(std::io::Cursor<Vec<u8>>),
    File(File),
    Extern(Box<dyn ByteStream>),
    Closed,
}

impl Read for Medium {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Medium::Memory(c) => c.read(buf),
            Medium::File(f) => f.read(buf),
            Medium::Extern(s) => s.read(buf),
            Medium::Closed => Err(std::io::Error::from(std::io::ErrorKind::NotConnected)),
        }
    }
}

impl Write for Medium {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Medium::Memory(c) => c.write(buf),
            Medium::File(f) => f.write(buf),
            Medium::Extern(s) => s.write(buf),
            Medium::Closed => Err(std::io::Error::from(std::io::ErrorKind::NotConnected)),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Medium::Memory(c) => c.flush(),
            Medium::File(f) => f.flush(),
            Medium::Extern(s) => s.flush(),
            Medium::Closed => Ok(()),
        }
    }
}

impl std::fmt::Debug for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Medium::Memory(c) => write!(f, "Memory({} bytes)", c.get_ref().len()),
            Medium::File(_) => write!(f, "File"),
            Medium::Extern(_) => write!(f, "Extern"),
            Medium::Closed => write!(f, "Closed"),
        }
    }
}

/// Exclusively owned byte sink/source with one sequential cursor.
#[derive(Debug)]
pub struct SerialStream {
    medium: Medium,
}

impl SerialStream {
    /// Transient in-memory buffer, positioned for writing.
    pub fn in_memory() -> Self {
        SerialStream {
            medium: Medium::Memory(std::io::Cursor::new(Vec::new())),
        }
    }

    /// Reopen previously written bytes for reading.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        SerialStream {
            medium: Medium::Memory(std::io::Cursor::new(bytes)),
        }
    }

    /// Open a named file under the given mode.
    pub fn open_file<P: AsRef<Path>>(path: P, mode: FileMode) -> Result<Self> {
        let mut options = OpenOptions::new();
        match mode {
            FileMode::Create => options.write(true).create(true).truncate(true),
            FileMode::CreateNew => options.write(true).create_new(true),
            FileMode::Append => options.append(true).create(true),
            FileMode::Open => options.read(true),
        };
        let file = options.open(path.as_ref()).map_err(Error::Io)?;
        log::debug!("opened file stream {:?} mode {:?}", path.as_ref(), mode);
        Ok(SerialStream {
            medium: Medium::File(file),
        })
    }

    /// Wrap an externally supplied stream. The stream is owned from here on
    /// and released when this instance closes.
    pub fn from_stream<S: ByteStream + 'static>(stream: S) -> Self {
        SerialStream {
            medium: Medium::Extern(Box::new(stream)),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if matches!(self.medium, Medium::Closed) {
            return Err(Error::ArgumentValue("stream is closed".into()));
        }
        Ok(())
    }

    /// Read exactly `buf.len()` bytes. Fails [`Error::EndOfInput`] if fewer
    /// bytes remain; partial data is never returned.
    pub fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        self.ensure_open()?;
        self.medium.read_exact(buf).map_err(Error::from)
    }

    /// Read exactly `n` bytes into a fresh buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.read_exact_into(&mut buf)?;
        Ok(buf)
    }

    /// Read one byte. Fails [`Error::EndOfInput`] at end of medium.
    pub fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact_into(&mut buf)?;
        Ok(buf[0])
    }

    /// Write all of `buf` at the cursor.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.ensure_open()?;
        self.medium.write_all(buf).map_err(Error::from)
    }

    /// Write one byte at the cursor.
    pub fn write_byte(&mut self, b: u8) -> Result<()> {
        self.write_bytes(&[b])
    }

    /// Flush buffered writes to the underlying medium.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.medium.flush().map_err(Error::from)
    }

    /// Flush and release the underlying medium. Further operations fail.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.medium, Medium::Closed) {
            Medium::Memory(_) | Medium::Closed => Ok(()),
            Medium::File(mut f) => f.flush().map_err(Error::from),
            Medium::Extern(mut s) => s.flush().map_err(Error::from),
        }
    }

    /// Recover the written archive from a memory-backed stream.
    ///
    /// Fails [`Error::ArgumentValue`] for file-backed or external media.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut this = self;
        match std::mem::replace(&mut this.medium, Medium::Closed) {
            Medium::Memory(c) => Ok(c.into_inner()),
            _ => Err(Error::ArgumentValue("stream is not memory-backed".into())),
        }
    }
}

impl Drop for SerialStream {
    fn drop(&mut self) {
        if !matches!(self.medium, Medium::Closed) {
            if let Err(e) = self.close() {
                log::warn!("stream close on drop failed: {}", e);
            }
        }
    }
}
