// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! LocalizedText - optional locale tag plus optional text.
//!
//! Binary layout: one mask byte (`0x01` locale present, `0x02` text present)
//! followed by the present strings in that order.

use std::fmt;

use crate::config::EncodingLimits;
use crate::core::ser::primitives::{read_string, string_len, write_string};
use crate::core::ser::{BinaryDecode, BinaryEncode, ByteCursor, ByteSink};
use crate::error::{UaError, UaResult};

const MASK_LOCALE: u8 = 0x01;
const MASK_TEXT: u8 = 0x02;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalizedText {
    pub locale: Option<String>,
    pub text: Option<String>,
}

impl LocalizedText {
    /// Both parts absent; encodes as a single zero byte.
    pub const NULL: LocalizedText = LocalizedText {
        locale: None,
        text: None,
    };

    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            text: Some(text.into()),
        }
    }

    /// Text without a locale.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            locale: None,
            text: Some(text.into()),
        }
    }

    pub fn english(text: impl Into<String>) -> Self {
        Self::new("en", text)
    }

    pub fn is_null(&self) -> bool {
        self.locale.is_none() && self.text.is_none()
    }

    fn mask(&self) -> u8 {
        let mut mask = 0;
        if self.locale.is_some() {
            mask |= MASK_LOCALE;
        }
        if self.text.is_some() {
            mask |= MASK_TEXT;
        }
        mask
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.locale, &self.text) {
            (Some(locale), Some(text)) => write!(f, "[{locale}] {text}"),
            (None, Some(text)) => f.write_str(text),
            (Some(locale), None) => write!(f, "[{locale}]"),
            (None, None) => Ok(()),
        }
    }
}

impl BinaryEncode for LocalizedText {
    fn encode_binary(&self, sink: &mut ByteSink, limits: &EncodingLimits) -> UaResult<()> {
        sink.write_u8(self.mask())?;
        if let Some(locale) = self.locale.as_deref() {
            write_string(sink, Some(locale), limits)?;
        }
        if let Some(text) = self.text.as_deref() {
            write_string(sink, Some(text), limits)?;
        }
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        1 + self.locale.as_deref().map_or(0, |s| string_len(Some(s)))
            + self.text.as_deref().map_or(0, |s| string_len(Some(s)))
    }
}

impl BinaryDecode for LocalizedText {
    fn decode_binary(src: &mut ByteCursor<'_>, limits: &EncodingLimits) -> UaResult<Self> {
        let mask = src.read_u8()?;
        if mask & !(MASK_LOCALE | MASK_TEXT) != 0 {
            return Err(UaError::decoding(format!(
                "invalid LocalizedText mask 0x{mask:02X}"
            )));
        }

        // A present-but-null string is kept as present and empty.
        let locale = if mask & MASK_LOCALE != 0 {
            Some(read_string(src, limits)?.unwrap_or_default())
        } else {
            None
        };
        let text = if mask & MASK_TEXT != 0 {
            Some(read_string(src, limits)?.unwrap_or_default())
        } else {
            None
        };
        Ok(Self { locale, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: &LocalizedText) -> Vec<u8> {
        let limits = EncodingLimits::default();
        let mut sink = ByteSink::new(usize::MAX);
        value.encode_binary(&mut sink, &limits).expect("encode");
        let bytes = sink.into_bytes();
        assert_eq!(bytes.len(), value.encoded_len());
        let decoded =
            LocalizedText::decode_binary(&mut ByteCursor::new(&bytes), &limits).expect("decode");
        assert_eq!(&decoded, value);
        bytes
    }

    #[test]
    fn test_null_is_one_byte() {
        assert_eq!(roundtrip(&LocalizedText::NULL), vec![0x00]);
    }

    #[test]
    fn test_variants_roundtrip() {
        roundtrip(&LocalizedText::english("Root"));
        roundtrip(&LocalizedText::text(""));
        roundtrip(&LocalizedText {
            locale: Some("de-DE".into()),
            text: None,
        });
        let bytes = roundtrip(&LocalizedText::text("Hi"));
        assert_eq!(bytes, b"\x02\x02\x00\x00\x00Hi".to_vec());
    }

    #[test]
    fn test_reserved_mask_bits_rejected() {
        let err = LocalizedText::decode_binary(
            &mut ByteCursor::new(&[0x04]),
            &EncodingLimits::default(),
        )
        .unwrap_err();
        assert!(err.is_decoding());
    }

    #[test]
    fn test_display() {
        assert_eq!(LocalizedText::english("Root").to_string(), "[en] Root");
        assert_eq!(LocalizedText::NULL.to_string(), "");
    }
}
