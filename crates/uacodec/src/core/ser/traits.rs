// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serialization traits.
//!
//! Two layers:
//!
//! - [`BinaryEncode`] / [`BinaryDecode`]: fixed binary layout of one built-in
//!   type (NodeId, LocalizedText, ...). No field names.
//! - [`UaEncoder`] / [`UaDecoder`]: the named field interface every structure
//!   codec talks to. The binary back-end ignores names; self-describing
//!   back-ends (JSON) use them as keys.
//!
//! Both stream traits are object safe so a codec stored in the registry can
//! drive any back-end through `&mut dyn UaEncoder`.

use super::cursor::{ByteCursor, ByteSink};
use crate::config::EncodingLimits;
use crate::error::UaResult;
use crate::structured::ExtensionObject;
use crate::types::{ExpandedNodeId, Guid, LocalizedText, NodeId, QualifiedName};

/// Binary encoding of a built-in type.
pub trait BinaryEncode {
    /// Append the encoded value to `sink`.
    fn encode_binary(&self, sink: &mut ByteSink, limits: &EncodingLimits) -> UaResult<()>;

    /// Exact number of bytes [`encode_binary`](Self::encode_binary) writes.
    fn encoded_len(&self) -> usize;
}

/// Binary decoding of a built-in type.
pub trait BinaryDecode: Sized {
    fn decode_binary(src: &mut ByteCursor<'_>, limits: &EncodingLimits) -> UaResult<Self>;
}

/// Named, typed write operations.
///
/// Structure codecs call these in declared field order. Arrays are framed by
/// [`begin_array`](Self::begin_array) / [`end_array`](Self::end_array), which
/// must be paired even for absent arrays.
pub trait UaEncoder {
    fn limits(&self) -> &EncodingLimits;

    fn write_boolean(&mut self, field: &str, value: bool) -> UaResult<()>;
    fn write_byte(&mut self, field: &str, value: u8) -> UaResult<()>;
    fn write_int16(&mut self, field: &str, value: i16) -> UaResult<()>;
    fn write_uint16(&mut self, field: &str, value: u16) -> UaResult<()>;
    fn write_int32(&mut self, field: &str, value: i32) -> UaResult<()>;
    fn write_uint32(&mut self, field: &str, value: u32) -> UaResult<()>;
    fn write_int64(&mut self, field: &str, value: i64) -> UaResult<()>;
    fn write_uint64(&mut self, field: &str, value: u64) -> UaResult<()>;
    fn write_float(&mut self, field: &str, value: f32) -> UaResult<()>;
    fn write_double(&mut self, field: &str, value: f64) -> UaResult<()>;
    fn write_string(&mut self, field: &str, value: Option<&str>) -> UaResult<()>;
    fn write_byte_string(&mut self, field: &str, value: Option<&[u8]>) -> UaResult<()>;
    fn write_guid(&mut self, field: &str, value: &Guid) -> UaResult<()>;
    fn write_node_id(&mut self, field: &str, value: &NodeId) -> UaResult<()>;
    fn write_expanded_node_id(&mut self, field: &str, value: &ExpandedNodeId) -> UaResult<()>;
    fn write_qualified_name(&mut self, field: &str, value: &QualifiedName) -> UaResult<()>;
    fn write_localized_text(&mut self, field: &str, value: &LocalizedText) -> UaResult<()>;
    fn write_extension_object(&mut self, field: &str, value: &ExtensionObject) -> UaResult<()>;

    /// Enumerations travel as Int32.
    fn write_enumeration(&mut self, field: &str, value: i32) -> UaResult<()> {
        self.write_int32(field, value)
    }

    /// Open a nested structure value.
    fn begin_structure(&mut self, field: &str) -> UaResult<()>;
    fn end_structure(&mut self) -> UaResult<()>;

    /// Open an array; `None` encodes the absent (null) array.
    fn begin_array(&mut self, field: &str, len: Option<usize>) -> UaResult<()>;
    fn end_array(&mut self) -> UaResult<()>;
}

/// Named, typed read operations; the dual of [`UaEncoder`].
pub trait UaDecoder {
    fn limits(&self) -> &EncodingLimits;

    /// Upper bound on elements still decodable, used to cap preallocation.
    fn remaining_hint(&self) -> usize;

    fn read_boolean(&mut self, field: &str) -> UaResult<bool>;
    fn read_byte(&mut self, field: &str) -> UaResult<u8>;
    fn read_int16(&mut self, field: &str) -> UaResult<i16>;
    fn read_uint16(&mut self, field: &str) -> UaResult<u16>;
    fn read_int32(&mut self, field: &str) -> UaResult<i32>;
    fn read_uint32(&mut self, field: &str) -> UaResult<u32>;
    fn read_int64(&mut self, field: &str) -> UaResult<i64>;
    fn read_uint64(&mut self, field: &str) -> UaResult<u64>;
    fn read_float(&mut self, field: &str) -> UaResult<f32>;
    fn read_double(&mut self, field: &str) -> UaResult<f64>;
    fn read_string(&mut self, field: &str) -> UaResult<Option<String>>;
    fn read_byte_string(&mut self, field: &str) -> UaResult<Option<Vec<u8>>>;
    fn read_guid(&mut self, field: &str) -> UaResult<Guid>;
    fn read_node_id(&mut self, field: &str) -> UaResult<NodeId>;
    fn read_expanded_node_id(&mut self, field: &str) -> UaResult<ExpandedNodeId>;
    fn read_qualified_name(&mut self, field: &str) -> UaResult<QualifiedName>;
    fn read_localized_text(&mut self, field: &str) -> UaResult<LocalizedText>;
    fn read_extension_object(&mut self, field: &str) -> UaResult<ExtensionObject>;

    fn read_enumeration(&mut self, field: &str) -> UaResult<i32> {
        self.read_int32(field)
    }

    fn begin_structure(&mut self, field: &str) -> UaResult<()>;
    fn end_structure(&mut self) -> UaResult<()>;

    /// Open an array and return its length; `None` for the absent array.
    fn begin_array(&mut self, field: &str) -> UaResult<Option<usize>>;
    fn end_array(&mut self) -> UaResult<()>;
}
