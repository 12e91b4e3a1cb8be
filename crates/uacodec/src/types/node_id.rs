// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! NodeId - namespace index plus numeric, string, guid or opaque identifier.
//!
//! # Binary layout
//!
//! ```text
//! encoding byte | body
//! 0x00 two-byte   | UInt8 id                (namespace 0, id <= 255)
//! 0x01 four-byte  | UInt8 ns, UInt16 id     (ns <= 255, id <= 65535)
//! 0x02 numeric    | UInt16 ns, UInt32 id
//! 0x03 string     | UInt16 ns, String
//! 0x04 guid       | UInt16 ns, Guid
//! 0x05 opaque     | UInt16 ns, ByteString
//! ```
//!
//! The two upper bits of the encoding byte are reserved for
//! [`ExpandedNodeId`](super::ExpandedNodeId) flags.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::Guid;
use crate::config::EncodingLimits;
use crate::core::ser::primitives::{
    byte_string_len, read_byte_string, read_string, string_len, write_byte_string, write_string,
};
use crate::core::ser::{BinaryDecode, BinaryEncode, ByteCursor, ByteSink};
use crate::error::{UaError, UaResult};

const ENCODING_TWO_BYTE: u8 = 0x00;
const ENCODING_FOUR_BYTE: u8 = 0x01;
const ENCODING_NUMERIC: u8 = 0x02;
const ENCODING_STRING: u8 = 0x03;
const ENCODING_GUID: u8 = 0x04;
const ENCODING_OPAQUE: u8 = 0x05;

/// Mask selecting the NodeId encoding from a (possibly flagged) encoding byte.
pub(crate) const ENCODING_MASK: u8 = 0x3F;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid(Guid),
    Opaque(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::NULL
    }
}

impl NodeId {
    /// `ns=0;i=0`
    pub const NULL: NodeId = NodeId::numeric(0, 0);

    pub const fn numeric(namespace: u16, id: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(id),
        }
    }

    pub fn string(namespace: u16, id: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(id.into()),
        }
    }

    pub const fn guid(namespace: u16, id: Guid) -> Self {
        Self {
            namespace,
            identifier: Identifier::Guid(id),
        }
    }

    pub fn opaque(namespace: u16, id: impl Into<Vec<u8>>) -> Self {
        Self {
            namespace,
            identifier: Identifier::Opaque(id.into()),
        }
    }

    pub fn is_null(&self) -> bool {
        self.namespace == 0
            && match &self.identifier {
                Identifier::Numeric(id) => *id == 0,
                Identifier::String(s) => s.is_empty(),
                Identifier::Guid(g) => *g == Guid::NULL,
                Identifier::Opaque(b) => b.is_empty(),
            }
    }

    /// Encode with extra flag bits ORed into the encoding byte.
    pub(crate) fn encode_with_flags(
        &self,
        flags: u8,
        sink: &mut ByteSink,
        limits: &EncodingLimits,
    ) -> UaResult<()> {
        match &self.identifier {
            Identifier::Numeric(id) => {
                if self.namespace == 0 && *id <= 0xFF {
                    sink.write_u8(ENCODING_TWO_BYTE | flags)?;
                    sink.write_u8(*id as u8)
                } else if self.namespace <= 0xFF && *id <= 0xFFFF {
                    sink.write_u8(ENCODING_FOUR_BYTE | flags)?;
                    sink.write_u8(self.namespace as u8)?;
                    sink.write_u16(*id as u16)
                } else {
                    sink.write_u8(ENCODING_NUMERIC | flags)?;
                    sink.write_u16(self.namespace)?;
                    sink.write_u32(*id)
                }
            }
            Identifier::String(s) => {
                sink.write_u8(ENCODING_STRING | flags)?;
                sink.write_u16(self.namespace)?;
                write_string(sink, Some(s.as_str()), limits)
            }
            Identifier::Guid(g) => {
                sink.write_u8(ENCODING_GUID | flags)?;
                sink.write_u16(self.namespace)?;
                g.encode_binary(sink, limits)
            }
            Identifier::Opaque(b) => {
                sink.write_u8(ENCODING_OPAQUE | flags)?;
                sink.write_u16(self.namespace)?;
                write_byte_string(sink, Some(b.as_slice()), limits)
            }
        }
    }

    /// Decode the body that follows an already-read encoding byte.
    pub(crate) fn decode_body(
        encoding: u8,
        src: &mut ByteCursor<'_>,
        limits: &EncodingLimits,
    ) -> UaResult<Self> {
        match encoding & ENCODING_MASK {
            ENCODING_TWO_BYTE => Ok(NodeId::numeric(0, u32::from(src.read_u8()?))),
            ENCODING_FOUR_BYTE => {
                let namespace = u16::from(src.read_u8()?);
                Ok(NodeId::numeric(namespace, u32::from(src.read_u16()?)))
            }
            ENCODING_NUMERIC => {
                let namespace = src.read_u16()?;
                Ok(NodeId::numeric(namespace, src.read_u32()?))
            }
            ENCODING_STRING => {
                let namespace = src.read_u16()?;
                let id = read_string(src, limits)?.unwrap_or_default();
                Ok(NodeId::string(namespace, id))
            }
            ENCODING_GUID => {
                let namespace = src.read_u16()?;
                Ok(NodeId::guid(namespace, Guid::decode_binary(src, limits)?))
            }
            ENCODING_OPAQUE => {
                let namespace = src.read_u16()?;
                let id = read_byte_string(src, limits)?.unwrap_or_default();
                Ok(NodeId::opaque(namespace, id))
            }
            other => Err(UaError::decoding(format!(
                "invalid NodeId encoding 0x{other:02X} at offset {}",
                src.offset().saturating_sub(1)
            ))),
        }
    }
}

impl BinaryEncode for NodeId {
    fn encode_binary(&self, sink: &mut ByteSink, limits: &EncodingLimits) -> UaResult<()> {
        self.encode_with_flags(0, sink, limits)
    }

    fn encoded_len(&self) -> usize {
        match &self.identifier {
            Identifier::Numeric(id) => {
                if self.namespace == 0 && *id <= 0xFF {
                    2
                } else if self.namespace <= 0xFF && *id <= 0xFFFF {
                    4
                } else {
                    7
                }
            }
            Identifier::String(s) => 3 + string_len(Some(s.as_str())),
            Identifier::Guid(g) => 3 + g.encoded_len(),
            Identifier::Opaque(b) => 3 + byte_string_len(Some(b.as_slice())),
        }
    }
}

impl BinaryDecode for NodeId {
    fn decode_binary(src: &mut ByteCursor<'_>, limits: &EncodingLimits) -> UaResult<Self> {
        let encoding = src.read_u8()?;
        if encoding & !ENCODING_MASK != 0 {
            return Err(UaError::decoding(format!(
                "NodeId encoding 0x{encoding:02X} carries ExpandedNodeId flags"
            )));
        }
        NodeId::decode_body(encoding, src, limits)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(id) => write!(f, "i={id}"),
            Identifier::String(s) => write!(f, "s={s}"),
            Identifier::Guid(g) => write!(f, "g={g}"),
            Identifier::Opaque(b) => write!(f, "b={}", BASE64.encode(b)),
        }
    }
}

impl FromStr for Identifier {
    type Err = UaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UaError::decoding(format!("invalid identifier {s:?}"));
        let (kind, value) = s.split_once('=').ok_or_else(invalid)?;
        match kind {
            "i" => value.parse().map(Identifier::Numeric).map_err(|_| invalid()),
            "s" => Ok(Identifier::String(value.to_owned())),
            "g" => value.parse().map(Identifier::Guid),
            "b" => BASE64
                .decode(value)
                .map(Identifier::Opaque)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        write!(f, "{}", self.identifier)
    }
}

impl FromStr for NodeId {
    type Err = UaError;

    /// Parses `[ns=<n>;]<identifier>`. The identifier text is taken verbatim,
    /// surrounding whitespace included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("ns=") {
            Some(rest) => {
                let (ns, id) = rest
                    .split_once(';')
                    .ok_or_else(|| UaError::decoding(format!("invalid NodeId {s:?}")))?;
                let namespace = ns
                    .parse()
                    .map_err(|_| UaError::decoding(format!("invalid namespace in {s:?}")))?;
                Ok(NodeId {
                    namespace,
                    identifier: id.parse()?,
                })
            }
            None => Ok(NodeId {
                namespace: 0,
                identifier: s.parse()?,
            }),
        }
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId::numeric(0, id)
    }
}
