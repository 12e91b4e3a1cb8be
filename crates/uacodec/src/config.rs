// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration - single source of truth for wire constants and limits.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: protocol constants (core namespace URI, sentinels)
//! - **Level 2 (Dynamic)**: [`EncodingLimits`], chosen per encoder/decoder
//!
//! # Example
//!
//! ```
//! use uacodec::config::EncodingLimits;
//!
//! let limits = EncodingLimits::default()
//!     .with_max_array_length(1024)
//!     .with_max_string_length(4096);
//! assert_eq!(limits.max_array_length, 1024);
//! ```

// =======================================================================
// Protocol constants
// =======================================================================

/// URI of the core namespace; always namespace index 0.
pub const OPC_UA_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/";

/// Count written for an absent (null) array or string.
pub const NULL_LENGTH: i32 = -1;

// =======================================================================
// Default limits
// =======================================================================

/// Default maximum string / byte string length in bytes.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 65_535;

/// Default maximum number of array elements.
pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 65_535;

/// Default maximum encoded message size (2 MiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 2 * 1024 * 1024;

/// Default maximum nesting depth of structures.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 64;

/// Environment variables consulted by [`EncodingLimits::from_env`].
pub const ENV_MAX_STRING_LENGTH: &str = "UACODEC_MAX_STRING_LENGTH";
pub const ENV_MAX_ARRAY_LENGTH: &str = "UACODEC_MAX_ARRAY_LENGTH";
pub const ENV_MAX_MESSAGE_SIZE: &str = "UACODEC_MAX_MESSAGE_SIZE";
pub const ENV_MAX_RECURSION_DEPTH: &str = "UACODEC_MAX_RECURSION_DEPTH";

/// Bounds applied by encoders and decoders to untrusted sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncodingLimits {
    pub max_string_length: usize,
    pub max_array_length: usize,
    pub max_message_size: usize,
    pub max_recursion_depth: usize,
}

impl Default for EncodingLimits {
    fn default() -> Self {
        Self {
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

impl EncodingLimits {
    #[must_use]
    pub fn with_max_string_length(mut self, len: usize) -> Self {
        self.max_string_length = len;
        self
    }

    #[must_use]
    pub fn with_max_array_length(mut self, len: usize) -> Self {
        self.max_array_length = len;
        self
    }

    #[must_use]
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    #[must_use]
    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Defaults overridden by `UACODEC_*` environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: usize| -> usize {
            match lookup(key) {
                None => default,
                Some(raw) => match raw.trim().parse::<usize>() {
                    Ok(value) => value,
                    Err(_) => {
                        log::warn!("[config] ignoring {}={:?}: not a size", key, raw);
                        default
                    }
                },
            }
        };

        let defaults = Self::default();
        Self {
            max_string_length: read(ENV_MAX_STRING_LENGTH, defaults.max_string_length),
            max_array_length: read(ENV_MAX_ARRAY_LENGTH, defaults.max_array_length),
            max_message_size: read(ENV_MAX_MESSAGE_SIZE, defaults.max_message_size),
            max_recursion_depth: read(ENV_MAX_RECURSION_DEPTH, defaults.max_recursion_depth),
        }
    }
}
