// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability table: runtime type descriptors and the encode/decode contract.
//!
//! There is no reflection. Every type that participates in the polymorphic
//! protocol has a [`TypeDescriptor`] in the process-wide [`TypeTable`]: its
//! canonical name, its kind (value or reference), an optional declared base
//! for assignability checks, and a decode function. Encoding goes through the
//! [`Serializable`] trait on the value itself.
//!
//! The table is built once before the first serializer touches it and is
//! read-only afterwards. Built-ins (scalars and `String`) are pre-registered;
//! consumers add their own descriptors through [`TypeTable::install`] at
//! startup.

use crate::error::{Error, Result};
use crate::serializer::Serializer;
use std::any::Any;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A decoded value travelling through the polymorphic protocol.
pub type BoxedValue = Box<dyn Serializable>;

/// Decode capability: reads exactly the bytes the type's encode wrote, in the
/// same order, and produces a fresh instance.
pub type DecodeFn = fn(&mut Serializer) -> Result<BoxedValue>;

/// Encode capability plus runtime identity.
///
/// The contract: `encode` writes exactly and only the bytes the registered
/// decode function consumes, in the same order. Violating this corrupts every
/// subsequent read on the stream.
pub trait Serializable: Any {
    /// Canonical name of this type when used as a static (declared) type.
    fn static_name() -> &'static str
    where
        Self: Sized;

    /// Canonical name of the runtime type of this value.
    fn type_name(&self) -> &'static str;

    /// Write this value's payload. Nested fields recurse through the
    /// serializer's object/value operations.
    fn encode(&self, writer: &mut Serializer) -> Result<()>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl std::fmt::Debug for dyn Serializable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serializable")
            .field("type_name", &self.type_name())
            .finish()
    }
}

/// Value types take the untagged fast path; reference types are tag-framed
/// and may be null or polymorphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Value,
    Reference,
}

/// Runtime descriptor for one registered type.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    /// Canonical name, unique across the table.
    pub name: &'static str,
    pub kind: TypeKind,
    /// Declared base type for assignability; `None` for roots.
    pub parent: Option<&'static str>,
    /// Decode capability; `None` for abstract bases that are only ever used
    /// as declared types.
    pub decode: Option<DecodeFn>,
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("decode", &self.decode.is_some())
            .finish()
    }
}

impl TypeDescriptor {
    pub const fn new(
        name: &'static str,
        kind: TypeKind,
        parent: Option<&'static str>,
        decode: Option<DecodeFn>,
    ) -> Self {
        Self {
            name,
            kind,
            parent,
            decode,
        }
    }

    /// Value-kind descriptor (untagged fast path capable).
    pub const fn value(name: &'static str, decode: DecodeFn) -> Self {
        Self::new(name, TypeKind::Value, None, Some(decode))
    }

    /// Reference-kind descriptor with an optional declared base.
    pub const fn reference(
        name: &'static str,
        parent: Option<&'static str>,
        decode: DecodeFn,
    ) -> Self {
        Self::new(name, TypeKind::Reference, parent, Some(decode))
    }

    /// Abstract base: usable as a declared type, never instantiated.
    pub const fn abstract_base(name: &'static str) -> Self {
        Self::new(name, TypeKind::Reference, None, None)
    }
}

static GLOBAL_TABLE: OnceLock<TypeTable> = OnceLock::new();

/// Process-wide, init-once capability table.
#[derive(Debug, Default)]
pub struct TypeTable {
    by_name: HashMap<&'static str, TypeDescriptor>,
}

impl TypeTable {
    /// Process-wide table. If [`TypeTable::install`] was never called, only
    /// the built-ins are registered.
    pub fn global() -> &'static TypeTable {
        GLOBAL_TABLE.get_or_init(TypeTable::builtin)
    }

    /// Install the process-wide table: built-ins plus the given consumer
    /// descriptors. Must run before the first serializer uses the table.
    ///
    /// # Panics
    ///
    /// Panics if the table was already initialized (second install, or a
    /// serializer already forced the built-in table), or on a duplicate
    /// descriptor name. Both are startup programming errors.
    pub fn install(user_types: Vec<TypeDescriptor>) {
        let mut table = TypeTable::builtin();
        for desc in user_types {
            table.register(desc);
        }
        let count = table.by_name.len();
        if GLOBAL_TABLE.set(table).is_err() {
            panic!("type table already initialized");
        }
        log::debug!("type table installed with {} descriptors", count);
    }

    fn builtin() -> TypeTable {
        let mut table = TypeTable::default();
        for desc in builtin_descriptors() {
            table.register(desc);
        }
        table
    }

    fn register(&mut self, desc: TypeDescriptor) {
        let name = desc.name;
        let prev = self.by_name.insert(name, desc);
        assert!(prev.is_none(), "type already registered: {name}");
    }

    /// Descriptor for a canonical name, if registered.
    pub fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        self.by_name.get(name)
    }

    /// Whether `derived` is `base` or a (transitive) subtype of it, per the
    /// declared parent chain.
    pub fn is_assignable(&self, base: &str, derived: &str) -> bool {
        if base == derived {
            return true;
        }
        let mut current = derived;
        while let Some(desc) = self.by_name.get(current) {
            match desc.parent {
                Some(parent) if parent == base => return true,
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }
}

/// Move a decoded value out of its box, failing [`Error::ArgumentType`] if
/// the runtime type is not `T`.
pub fn downcast<T: Serializable>(value: BoxedValue) -> Result<T> {
    match value.into_any().downcast::<T>() {
        Ok(boxed) => Ok(*boxed),
        Err(_) => Err(Error::ArgumentType(format!(
            "decoded value is not a {}",
            T::static_name()
        ))),
    }
}

// ============================================================================
// Built-in capability implementations
// ============================================================================

macro_rules! builtin_scalar {
    ($t:ty, $name:expr, $write:ident, $read:ident, $decode:ident) => {
        impl Serializable for $t {
            fn static_name() -> &'static str {
                $name
            }

            fn type_name(&self) -> &'static str {
                $name
            }

            fn encode(&self, writer: &mut Serializer) -> Result<()> {
                writer.$write(*self)
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn Any> {
                self
            }
        }

        fn $decode(reader: &mut Serializer) -> Result<BoxedValue> {
            Ok(Box::new(reader.$read()?))
        }
    };
}

builtin_scalar!(bool, "bool", write_bool, read_bool, decode_bool);
builtin_scalar!(u8, "u8", write_u8, read_u8, decode_u8);
builtin_scalar!(i8, "i8", write_i8, read_i8, decode_i8);
builtin_scalar!(char, "char", write_char, read_char, decode_char);
builtin_scalar!(f64, "f64", write_f64, read_f64, decode_f64);
builtin_scalar!(f32, "f32", write_f32, read_f32, decode_f32);
builtin_scalar!(i32, "i32", write_i32, read_i32, decode_i32);
builtin_scalar!(u32, "u32", write_u32, read_u32, decode_u32);
builtin_scalar!(i64, "i64", write_i64, read_i64, decode_i64);
builtin_scalar!(u64, "u64", write_u64, read_u64, decode_u64);
builtin_scalar!(i16, "i16", write_i16, read_i16, decode_i16);
builtin_scalar!(u16, "u16", write_u16, read_u16, decode_u16);

impl Serializable for String {
    fn static_name() -> &'static str {
        "String"
    }

    fn type_name(&self) -> &'static str {
        "String"
    }

    fn encode(&self, writer: &mut Serializer) -> Result<()> {
        writer.write_string(Some(self.as_str()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

fn decode_string(reader: &mut Serializer) -> Result<BoxedValue> {
    // The writer routes null through the Null tag, so a -1 length under a
    // concrete tag is malformed.
    let value = reader
        .read_string()?
        .ok_or_else(|| Error::InvalidData("null string payload under concrete tag".into()))?;
    Ok(Box::new(value))
}

fn builtin_descriptors() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::value("bool", decode_bool),
        TypeDescriptor::value("u8", decode_u8),
        TypeDescriptor::value("i8", decode_i8),
        TypeDescriptor::value("char", decode_char),
        TypeDescriptor::value("f64", decode_f64),
        TypeDescriptor::value("f32", decode_f32),
        TypeDescriptor::value("i32", decode_i32),
        TypeDescriptor::value("u32", decode_u32),
        TypeDescriptor::value("i64", decode_i64),
        TypeDescriptor::value("u64", decode_u64),
        TypeDescriptor::value("i16", decode_i16),
        TypeDescriptor::value("u16", decode_u16),
        TypeDescriptor::reference("String", None, decode_string),
    ]
}
