// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The serializer: one instance, one stream, one active operation.
//!
//! [`Serializer`] owns a [`SerialStream`] and layers the codec surfaces on
//! top of it: fixed-width scalars, length-prefixed strings, compacted type
//! identifiers and the tag-framed polymorphic object protocol.
//!
//! Instances are exclusively owned and single-threaded: the cursor is
//! sequential and stateful, so there is only ever one active read or write
//! per instance. Distinct instances over distinct streams are fully
//! independent.

mod object;
mod scalar;
mod string;
mod type_id;

pub use object::{TAG_EXACT_TYPE, TAG_NULL, TAG_SUBTYPE};

use crate::error::Result;
use crate::stream::{ByteStream, FileMode, SerialStream};
use std::path::Path;

/// Binary serializer/deserializer over an exclusively owned byte stream.
pub struct Serializer {
    stream: SerialStream,
}

impl Serializer {
    /// Serializer over a transient in-memory buffer.
    pub fn in_memory() -> Self {
        Serializer {
            stream: SerialStream::in_memory(),
        }
    }

    /// Serializer reading previously written bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Serializer {
            stream: SerialStream::from_bytes(bytes),
        }
    }

    /// Serializer over a named file.
    pub fn open_file<P: AsRef<Path>>(path: P, mode: FileMode) -> Result<Self> {
        Ok(Serializer {
            stream: SerialStream::open_file(path, mode)?,
        })
    }

    /// Serializer over an externally supplied stream, owned from here on.
    pub fn from_stream<S: ByteStream + 'static>(stream: S) -> Self {
        Serializer {
            stream: SerialStream::from_stream(stream),
        }
    }

    /// Read exactly `n` bytes from the stream.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.stream.read_bytes(n)
    }

    /// Write raw bytes to the stream.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.stream.write_bytes(buf)
    }

    /// Flush buffered writes to the underlying medium.
    pub fn flush(&mut self) -> Result<()> {
        self.stream.flush()
    }

    /// Flush and release the underlying medium.
    pub fn close(&mut self) -> Result<()> {
        self.stream.close()
    }

    /// Recover the written archive from a memory-backed serializer.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.stream.into_bytes()
    }

    pub(crate) fn stream_mut(&mut self) -> &mut SerialStream {
        &mut self.stream
    }
}
