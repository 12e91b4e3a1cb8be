// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QualifiedName - namespace index plus short name (UInt16 + String).
//!
//! A null name on the wire decodes to the empty string.

use std::fmt;

use crate::config::EncodingLimits;
use crate::core::ser::primitives::{read_string, string_len, write_string};
use crate::core::ser::{BinaryDecode, BinaryEncode, ByteCursor, ByteSink};
use crate::error::UaResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualifiedName {
    pub namespace_index: u16,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && self.name.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index == 0 {
            f.write_str(&self.name)
        } else {
            write!(f, "{}:{}", self.namespace_index, self.name)
        }
    }
}

impl BinaryEncode for QualifiedName {
    fn encode_binary(&self, sink: &mut ByteSink, limits: &EncodingLimits) -> UaResult<()> {
        sink.write_u16(self.namespace_index)?;
        write_string(sink, Some(self.name.as_str()), limits)
    }

    fn encoded_len(&self) -> usize {
        2 + string_len(Some(self.name.as_str()))
    }
}

impl BinaryDecode for QualifiedName {
    fn decode_binary(src: &mut ByteCursor<'_>, limits: &EncodingLimits) -> UaResult<Self> {
        let namespace_index = src.read_u16()?;
        let name = read_string(src, limits)?.unwrap_or_default();
        Ok(Self {
            namespace_index,
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_browse_name_layout() {
        let name = QualifiedName::new(0, "Root");
        let mut sink = ByteSink::new(usize::MAX);
        name.encode_binary(&mut sink, &EncodingLimits::default())
            .expect("encode");
        assert_eq!(sink.as_bytes(), b"\x00\x00\x04\x00\x00\x00Root");
        assert_eq!(name.encoded_len(), 10);
    }

    #[test]
    fn test_null_name_decodes_empty() {
        let bytes = [0x02, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
        let name =
            QualifiedName::decode_binary(&mut ByteCursor::new(&bytes), &EncodingLimits::default())
                .expect("decode");
        assert_eq!(name, QualifiedName::new(2, ""));
    }

    #[test]
    fn test_display() {
        assert_eq!(QualifiedName::new(0, "Objects").to_string(), "Objects");
        assert_eq!(QualifiedName::new(3, "Pump").to_string(), "3:Pump");
        assert!(QualifiedName::default().is_null());
    }
}
