// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for the serialization engine.
//!
//! Every failure propagates synchronously to the immediate caller; nothing is
//! retried internally. After any decode failure the stream position is
//! undefined and the whole read must be treated as failed.

/// Serialization error.
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Argument errors (caller bugs, detected before touching the stream)
    // ========================================================================
    /// Required argument was missing (e.g. a null value where the value-only
    /// path requires a concrete instance).
    ArgumentNull(&'static str),
    /// Structurally invalid value: failed assignability on decode, a
    /// reference-kind type on the value-only path, or an unexpected null
    /// marker.
    ArgumentValue(String),
    /// Runtime type incompatible with the declared static type, or a type
    /// outside the supported categories.
    ArgumentType(String),

    // ========================================================================
    // Stream errors
    // ========================================================================
    /// Medium exhausted before the requested byte count was available.
    EndOfInput,
    /// Underlying medium failure.
    Io(std::io::Error),

    // ========================================================================
    // Decode errors
    // ========================================================================
    /// Unrecognized tag byte, a surrogate code unit, or a null recorded where
    /// a concrete value was required.
    InvalidData(String),
    /// Decoded type name cannot be located in the capability table.
    TypeResolution(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ArgumentNull(what) => write!(f, "required argument missing: {}", what),
            Error::ArgumentValue(msg) => write!(f, "invalid value: {}", msg),
            Error::ArgumentType(msg) => write!(f, "incompatible type: {}", msg),
            Error::EndOfInput => write!(f, "unexpected end of input"),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidData(msg) => write!(f, "invalid data: {}", msg),
            Error::TypeResolution(name) => write!(f, "cannot resolve type: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        // A short read surfaces as EndOfInput so callers can distinguish a
        // truncated archive from a failing medium.
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::EndOfInput
        } else {
            Error::Io(e)
        }
    }
}

/// Convenient alias for results using the public [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
