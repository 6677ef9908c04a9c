// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type identifier codec.
//!
//! A type identifier is the type's canonical name, compacted through the
//! [`TypeRegistry`](crate::TypeRegistry) alias table and carried as a narrow
//! string. Reading resolves the expanded name against the capability table to
//! a live descriptor.

use super::Serializer;
use crate::error::{Error, Result};
use crate::registry::TypeRegistry;
use crate::types::{TypeDescriptor, TypeTable};

impl Serializer {
    /// Write the identifier for a canonical type name, compacted through the
    /// registry.
    pub fn write_type(&mut self, canonical: &str) -> Result<()> {
        if canonical.is_empty() {
            return Err(Error::ArgumentNull("type name"));
        }
        let short = TypeRegistry::global().short_name(canonical);
        log::trace!("write type identifier {} as {}", canonical, short);
        self.write_string8(Some(short))
    }

    /// Read a type identifier and resolve it to a live descriptor.
    ///
    /// Fails [`Error::InvalidData`] if the identifier was the null sentinel
    /// and [`Error::TypeResolution`] if the expanded name is not registered.
    pub fn read_type(&mut self) -> Result<&'static TypeDescriptor> {
        let name = self
            .read_string8()?
            .ok_or_else(|| Error::InvalidData("null type identifier".into()))?;
        let canonical = TypeRegistry::global().full_name(&name);
        log::trace!("read type identifier {} -> {}", name, canonical);
        TypeTable::global()
            .lookup(canonical)
            .ok_or_else(|| Error::TypeResolution(canonical.to_owned()))
    }
}
