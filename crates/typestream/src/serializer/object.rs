// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag-framed polymorphic object protocol.
//!
//! Every reference-typed value is preceded by one tag byte:
//!
//! | tag | meaning | followed by |
//! |-----|---------------------------------|-----------------------------|
//! | 0   | null                            | nothing |
//! | 1   | runtime type == declared type   | payload |
//! | 2   | runtime type is a strict subtype| type identifier, payload |
//!
//! The payload is produced by the value's encode capability and consumed by
//! the decode function registered for the concrete type. Value-kind types can
//! skip the framing entirely through the value-only fast path; the unified
//! `*_value_or_object` operations pick the path from the declared type's kind
//! in the capability table, so a writer and its reader always agree.

use super::Serializer;
use crate::error::{Error, Result};
use crate::types::{BoxedValue, Serializable, TypeKind, TypeTable};

/// Framing tag: null value, no payload.
pub const TAG_NULL: u8 = 0;
/// Framing tag: runtime type equals the declared type.
pub const TAG_EXACT_TYPE: u8 = 1;
/// Framing tag: strict subtype; a type identifier follows.
pub const TAG_SUBTYPE: u8 = 2;

impl Serializer {
    /// Write a possibly-null value through a declared (static) type.
    ///
    /// The runtime type must be assignable to `static_type` and registered in
    /// the capability table, else [`Error::ArgumentType`].
    pub fn write_object(
        &mut self,
        static_type: &str,
        obj: Option<&dyn Serializable>,
    ) -> Result<()> {
        if static_type.is_empty() {
            return Err(Error::ArgumentNull("static_type"));
        }
        let Some(obj) = obj else {
            return self.write_u8(TAG_NULL);
        };

        let table = TypeTable::global();
        let runtime = obj.type_name();
        if !table.is_assignable(static_type, runtime) {
            return Err(Error::ArgumentType(format!(
                "{} is not assignable to {}",
                runtime, static_type
            )));
        }
        if table.lookup(runtime).is_none() {
            return Err(Error::ArgumentType(format!(
                "{} is not registered in the capability table",
                runtime
            )));
        }

        if runtime == static_type {
            self.write_u8(TAG_EXACT_TYPE)?;
        } else {
            self.write_u8(TAG_SUBTYPE)?;
            self.write_type(runtime)?;
        }
        obj.encode(self)
    }

    /// Typed convenience over [`Serializer::write_object`] using `T` as the
    /// declared type.
    pub fn write_object_of<T: Serializable>(&mut self, obj: Option<&T>) -> Result<()> {
        self.write_object(T::static_name(), obj.map(|o| o as &dyn Serializable))
    }

    /// Read a possibly-null value through a declared (static) type.
    ///
    /// Returns the concrete decoded value, which for tag 2 is a strict
    /// subtype of `static_type`.
    pub fn read_object(&mut self, static_type: &str) -> Result<Option<BoxedValue>> {
        if static_type.is_empty() {
            return Err(Error::ArgumentNull("static_type"));
        }
        let table = TypeTable::global();
        let concrete = match self.read_u8()? {
            TAG_NULL => return Ok(None),
            TAG_EXACT_TYPE => table
                .lookup(static_type)
                .ok_or_else(|| Error::TypeResolution(static_type.to_owned()))?,
            TAG_SUBTYPE => {
                let desc = self.read_type()?;
                if !table.is_assignable(static_type, desc.name) {
                    return Err(Error::ArgumentValue(format!(
                        "decoded type {} is not assignable to {}",
                        desc.name, static_type
                    )));
                }
                desc
            }
            tag => {
                return Err(Error::InvalidData(format!(
                    "unrecognized framing tag {}",
                    tag
                )))
            }
        };

        let decode = concrete.decode.ok_or_else(|| {
            Error::ArgumentValue(format!("{} has no decode capability", concrete.name))
        })?;
        decode(self).map(Some)
    }

    /// Typed convenience over [`Serializer::read_object`] using `T` as the
    /// declared type.
    pub fn read_object_of<T: Serializable>(&mut self) -> Result<Option<BoxedValue>> {
        self.read_object(T::static_name())
    }

    /// Value-only fast path: write without tag or type framing.
    ///
    /// Valid only for value-kind types, whose runtime type always equals the
    /// declared type and which are never null.
    pub fn write_value(&mut self, val: &dyn Serializable) -> Result<()> {
        let runtime = val.type_name();
        match TypeTable::global().lookup(runtime) {
            None => Err(Error::ArgumentType(format!(
                "{} is not registered in the capability table",
                runtime
            ))),
            Some(desc) if desc.kind != TypeKind::Value => Err(Error::ArgumentValue(format!(
                "{} is not a value-kind type",
                runtime
            ))),
            Some(_) => val.encode(self),
        }
    }

    /// Value-only fast path: read without tag or type framing.
    pub fn read_value(&mut self, static_type: &str) -> Result<BoxedValue> {
        if static_type.is_empty() {
            return Err(Error::ArgumentNull("static_type"));
        }
        let desc = TypeTable::global()
            .lookup(static_type)
            .ok_or_else(|| Error::TypeResolution(static_type.to_owned()))?;
        if desc.kind != TypeKind::Value {
            return Err(Error::ArgumentValue(format!(
                "{} is not a value-kind type",
                static_type
            )));
        }
        let decode = desc.decode.ok_or_else(|| {
            Error::ArgumentValue(format!("{} has no decode capability", static_type))
        })?;
        decode(self)
    }

    /// Unified write: picks the fast path for value-kind declared types and
    /// the tagged path for reference-kind declared types.
    pub fn write_value_or_object(
        &mut self,
        static_type: &str,
        obj: Option<&dyn Serializable>,
    ) -> Result<()> {
        if static_type.is_empty() {
            return Err(Error::ArgumentNull("static_type"));
        }
        let desc = TypeTable::global()
            .lookup(static_type)
            .ok_or_else(|| Error::TypeResolution(static_type.to_owned()))?;
        match desc.kind {
            TypeKind::Value => {
                let val = obj.ok_or(Error::ArgumentNull("obj"))?;
                if val.type_name() != static_type {
                    return Err(Error::ArgumentType(format!(
                        "{} is not a {}",
                        val.type_name(),
                        static_type
                    )));
                }
                self.write_value(val)
            }
            TypeKind::Reference => self.write_object(static_type, obj),
        }
    }

    /// Unified read, symmetric to [`Serializer::write_value_or_object`].
    pub fn read_value_or_object(&mut self, static_type: &str) -> Result<Option<BoxedValue>> {
        if static_type.is_empty() {
            return Err(Error::ArgumentNull("static_type"));
        }
        let desc = TypeTable::global()
            .lookup(static_type)
            .ok_or_else(|| Error::TypeResolution(static_type.to_owned()))?;
        match desc.kind {
            TypeKind::Value => self.read_value(static_type).map(Some),
            TypeKind::Reference => self.read_object(static_type),
        }
    }
}
