// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by every codec in the crate.
//!
//! A failed decode never yields a partially populated value: errors from
//! nested structures and array elements propagate unchanged to the caller of
//! the outermost decode.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type UaResult<T> = std::result::Result<T, UaError>;

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum UaError {
    /// Malformed or truncated input, unknown enumeration value, limit exceeded.
    #[error("decoding failed: {reason}")]
    Decoding { reason: String },

    /// Value cannot be represented on the wire (count out of range, limit exceeded).
    #[error("encoding failed: {reason}")]
    Encoding { reason: String },

    /// No codec registered for the requested identifier.
    #[error("unknown type: no codec registered for {id}")]
    UnknownType { id: String },

    /// A codec is already registered under this identifier.
    #[error("duplicate codec registration for {id}")]
    DuplicateCodec { id: String },
}

impl UaError {
    pub fn decoding(reason: impl Into<String>) -> Self {
        UaError::Decoding {
            reason: reason.into(),
        }
    }

    pub fn encoding(reason: impl Into<String>) -> Self {
        UaError::Encoding {
            reason: reason.into(),
        }
    }

    pub fn unknown_type(id: impl ToString) -> Self {
        UaError::UnknownType { id: id.to_string() }
    }

    pub fn duplicate_codec(id: impl ToString) -> Self {
        UaError::DuplicateCodec { id: id.to_string() }
    }

    /// True for errors caused by the input bytes rather than by local state.
    pub fn is_decoding(&self) -> bool {
        matches!(self, UaError::Decoding { .. })
    }
}
