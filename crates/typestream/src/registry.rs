// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional alias table between canonical type names and short codes.
//!
//! Built-in types carry a compact alias so type identifiers on the wire stay
//! small; user types travel under their canonical name unchanged. The table
//! is populated once at startup and read-only afterwards, so concurrent reads
//! need no synchronization.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical-name <-> short-code alias table.
///
/// Both directions are bijective: registering a key already present in either
/// direction is a programming error and panics. This can only fire during
/// startup registration, never at runtime.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    full_to_short: HashMap<&'static str, &'static str>,
    short_to_full: HashMap<&'static str, &'static str>,
}

/// Built-in alias pairs (canonical name, short code).
///
/// The code set may overlap the canonical set (code `i8` aliases `i64` while
/// `i8` is itself a canonical name). This stays unambiguous because every
/// registered canonical name is compacted at write time, so a registered
/// code never appears raw on the wire.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("bool", "b"),
    ("u8", "ui1"),
    ("i8", "i1"),
    ("char", "c"),
    ("f64", "f8"),
    ("f32", "f4"),
    ("i32", "i4"),
    ("u32", "ui4"),
    ("i64", "i8"),
    ("u64", "ui8"),
    ("i16", "i2"),
    ("u16", "ui2"),
    ("String", "s"),
];

static GLOBAL_REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

impl TypeRegistry {
    /// Empty table. Startup use only; prefer [`TypeRegistry::global`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide table holding the built-in aliases.
    pub fn global() -> &'static TypeRegistry {
        GLOBAL_REGISTRY.get_or_init(|| {
            let mut registry = TypeRegistry::new();
            for (canonical, short) in BUILTIN_ALIASES {
                registry.register(canonical, short);
            }
            registry
        })
    }

    /// Register an alias pair in both directions.
    ///
    /// # Panics
    ///
    /// Panics if either the canonical name or the short code is already
    /// registered (startup programming error).
    pub fn register(&mut self, canonical: &'static str, short: &'static str) {
        let prev = self.full_to_short.insert(canonical, short);
        assert!(
            prev.is_none(),
            "canonical name already registered: {canonical}"
        );
        let prev = self.short_to_full.insert(short, canonical);
        assert!(prev.is_none(), "short code already registered: {short}");
    }

    /// Expand a short code to its canonical name.
    ///
    /// Unrecognized input is returned unchanged: a name that was never
    /// registered is treated as already canonical.
    pub fn full_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.short_to_full.get(code).copied().unwrap_or(code)
    }

    /// Compact a canonical name to its short code, if one is registered.
    pub fn short_name<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.full_to_short.get(canonical).copied().unwrap_or(canonical)
    }
}
