// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # typestream - tagged binary serialization
//!
//! A generic binary serialization engine: write primitive and composite
//! values to a byte stream and reconstruct them later, including values whose
//! runtime type is a subtype of the statically declared type and values that
//! recursively contain other serializable values.
//!
//! ## Quick Start
//!
//! ```rust
//! use typestream::{Result, Serializer};
//!
//! fn main() -> Result<()> {
//!     let mut writer = Serializer::in_memory();
//!     writer.write_i32(42)?;
//!     writer.write_string(Some("hello"))?;
//!
//!     let mut reader = Serializer::from_bytes(writer.into_bytes()?);
//!     assert_eq!(reader.read_i32()?, 42);
//!     assert_eq!(reader.read_string()?.as_deref(), Some("hello"));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                     Consumer types                           |
//! |   Serializable::encode  +  registered decode functions       |
//! +--------------------------------------------------------------+
//! |                  Object graph protocol                       |
//! |   tag framing | type identifiers | value-only fast path      |
//! +--------------------------------------------------------------+
//! |                      Codec layer                             |
//! |   scalars (LE fixed-width) | strings (length-prefixed)       |
//! +--------------------------------------------------------------+
//! |                     Stream layer                             |
//! |   memory buffer | file | externally supplied stream          |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Wire format
//!
//! - Scalars: raw fixed-width bytes, little-endian.
//! - Strings (default): `i32` byte length (`-1` = null) + UTF-8 bytes.
//! - Type identifiers: narrow-string-encoded compacted name.
//! - Polymorphic values: one tag byte (`0` null, `1` exact type, `2`
//!   subtype), a type identifier only for tag `2`, then the payload.
//!
//! Changing tag values, length semantics or byte order breaks compatibility
//! with previously written archives.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Serializer`] | One instance per stream; all read/write operations |
//! | [`Serializable`] | Encode capability implemented by consumer types |
//! | [`TypeTable`] | Init-once capability table with decode functions |
//! | [`TypeRegistry`] | Canonical-name/short-code alias table |
//! | [`SerialStream`] | Owned byte sink/source with one sequential cursor |
//!
//! ## Concurrency
//!
//! A serializer instance is single-threaded: the cursor is sequential and
//! stateful, and nothing is locked internally. Distinct instances over
//! distinct streams run concurrently without shared mutable state; the
//! capability and alias tables are initialized once and read-only afterwards.

pub mod error;
pub mod registry;
pub mod serializer;
pub mod stream;
pub mod types;

pub use error::{Error, Result};
pub use registry::TypeRegistry;
pub use serializer::{Serializer, TAG_EXACT_TYPE, TAG_NULL, TAG_SUBTYPE};
pub use stream::{ByteStream, FileMode, SerialStream};
pub use types::{
    downcast, BoxedValue, DecodeFn, Serializable, TypeDescriptor, TypeKind, TypeTable,
};
