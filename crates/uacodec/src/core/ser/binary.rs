// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary back-end of the named field interface.
//!
//! Field names are ignored: the layout is the plain concatenation of field
//! encodings in declared order, little-endian, without padding or structure
//! length prefixes. Arrays carry an Int32 count (`-1` = absent).

use super::cursor::{ByteCursor, ByteSink};
use super::primitives::{length_prefix, read_byte_string, read_length, read_string};
use super::primitives::{write_byte_string, write_string};
use super::traits::{BinaryDecode, BinaryEncode, UaDecoder, UaEncoder};
use crate::config::{EncodingLimits, NULL_LENGTH};
use crate::error::{UaError, UaResult};
use crate::structured::{DynStructure, ExtensionObject, UaStructure};
use crate::types::{ExpandedNodeId, Guid, LocalizedText, NodeId, QualifiedName};

/// Encode `value` with the binary encoding.
pub fn to_binary<T>(value: &T, limits: &EncodingLimits) -> UaResult<Vec<u8>>
where
    T: DynStructure + ?Sized,
{
    let mut encoder = BinaryEncoder::new(*limits);
    value.encode_dyn(&mut encoder)?;
    Ok(encoder.into_bytes())
}

/// Decode a `T` from the start of `bytes`.
///
/// Bytes after the structure are left unread; use [`BinaryDecoder`] directly
/// to learn how many were consumed.
pub fn from_binary<T: UaStructure>(bytes: &[u8], limits: &EncodingLimits) -> UaResult<T> {
    check_message_size(bytes.len(), limits)?;
    let mut decoder = BinaryDecoder::new(bytes, *limits);
    let value = T::decode(&mut decoder)?;
    if !decoder.is_eof() {
        log::debug!(
            "[binary] {} trailing bytes after {}",
            decoder.remaining(),
            T::NAME
        );
    }
    Ok(value)
}

pub(crate) fn check_message_size(len: usize, limits: &EncodingLimits) -> UaResult<()> {
    if len > limits.max_message_size {
        return Err(UaError::decoding(format!(
            "message size {len} exceeds limit {}",
            limits.max_message_size
        )));
    }
    Ok(())
}

/// Writes fields into a size-bounded byte buffer.
pub struct BinaryEncoder {
    sink: ByteSink,
    limits: EncodingLimits,
    depth: usize,
}

impl BinaryEncoder {
    pub fn new(limits: EncodingLimits) -> Self {
        Self {
            sink: ByteSink::new(limits.max_message_size),
            limits,
            depth: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.sink.offset()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.sink.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.sink.into_bytes()
    }

    fn put<V: BinaryEncode>(&mut self, value: &V) -> UaResult<()> {
        value.encode_binary(&mut self.sink, &self.limits)
    }
}

impl UaEncoder for BinaryEncoder {
    fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    fn write_boolean(&mut self, _field: &str, value: bool) -> UaResult<()> {
        self.sink.write_u8(u8::from(value))
    }

    fn write_byte(&mut self, _field: &str, value: u8) -> UaResult<()> {
        self.sink.write_u8(value)
    }

    fn write_int16(&mut self, _field: &str, value: i16) -> UaResult<()> {
        self.sink.write_i16(value)
    }

    fn write_uint16(&mut self, _field: &str, value: u16) -> UaResult<()> {
        self.sink.write_u16(value)
    }

    fn write_int32(&mut self, _field: &str, value: i32) -> UaResult<()> {
        self.sink.write_i32(value)
    }

    fn write_uint32(&mut self, _field: &str, value: u32) -> UaResult<()> {
        self.sink.write_u32(value)
    }

    fn write_int64(&mut self, _field: &str, value: i64) -> UaResult<()> {
        self.sink.write_i64(value)
    }

    fn write_uint64(&mut self, _field: &str, value: u64) -> UaResult<()> {
        self.sink.write_u64(value)
    }

    fn write_float(&mut self, _field: &str, value: f32) -> UaResult<()> {
        self.sink.write_f32(value)
    }

    fn write_double(&mut self, _field: &str, value: f64) -> UaResult<()> {
        self.sink.write_f64(value)
    }

    fn write_string(&mut self, _field: &str, value: Option<&str>) -> UaResult<()> {
        write_string(&mut self.sink, value, &self.limits)
    }

    fn write_byte_string(&mut self, _field: &str, value: Option<&[u8]>) -> UaResult<()> {
        write_byte_string(&mut self.sink, value, &self.limits)
    }

    fn write_guid(&mut self, _field: &str, value: &Guid) -> UaResult<()> {
        self.put(value)
    }

    fn write_node_id(&mut self, _field: &str, value: &NodeId) -> UaResult<()> {
        self.put(value)
    }

    fn write_expanded_node_id(&mut self, _field: &str, value: &ExpandedNodeId) -> UaResult<()> {
        self.put(value)
    }

    fn write_qualified_name(&mut self, _field: &str, value: &QualifiedName) -> UaResult<()> {
        self.put(value)
    }

    fn write_localized_text(&mut self, _field: &str, value: &LocalizedText) -> UaResult<()> {
        self.put(value)
    }

    fn write_extension_object(&mut self, _field: &str, value: &ExtensionObject) -> UaResult<()> {
        self.put(value)
    }

    fn begin_structure(&mut self, field: &str) -> UaResult<()> {
        if self.depth >= self.limits.max_recursion_depth {
            return Err(UaError::encoding(format!(
                "nesting depth exceeds limit {} at {field}",
                self.limits.max_recursion_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn end_structure(&mut self) -> UaResult<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn begin_array(&mut self, field: &str, len: Option<usize>) -> UaResult<()> {
        match len {
            None => self.sink.write_i32(NULL_LENGTH),
            Some(len) => {
                let count =
                    length_prefix(len, self.limits.max_array_length, &format!("array {field}"))?;
                self.sink.write_i32(count)
            }
        }
    }

    fn end_array(&mut self) -> UaResult<()> {
        Ok(())
    }
}

/// Reads fields from a borrowed byte buffer.
pub struct BinaryDecoder<'a> {
    cursor: ByteCursor<'a>,
    limits: EncodingLimits,
    depth: usize,
}

impl<'a> BinaryDecoder<'a> {
    pub fn new(bytes: &'a [u8], limits: EncodingLimits) -> Self {
        Self {
            cursor: ByteCursor::new(bytes),
            limits,
            depth: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.offset()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    fn take<V: BinaryDecode>(&mut self) -> UaResult<V> {
        V::decode_binary(&mut self.cursor, &self.limits)
    }
}

impl UaDecoder for BinaryDecoder<'_> {
    fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    fn remaining_hint(&self) -> usize {
        // Every element occupies at least one byte.
        self.cursor.remaining()
    }

    fn read_boolean(&mut self, _field: &str) -> UaResult<bool> {
        Ok(self.cursor.read_u8()? != 0)
    }

    fn read_byte(&mut self, _field: &str) -> UaResult<u8> {
        self.cursor.read_u8()
    }

    fn read_int16(&mut self, _field: &str) -> UaResult<i16> {
        self.cursor.read_i16()
    }

    fn read_uint16(&mut self, _field: &str) -> UaResult<u16> {
        self.cursor.read_u16()
    }

    fn read_int32(&mut self, _field: &str) -> UaResult<i32> {
        self.cursor.read_i32()
    }

    fn read_uint32(&mut self, _field: &str) -> UaResult<u32> {
        self.cursor.read_u32()
    }

    fn read_int64(&mut self, _field: &str) -> UaResult<i64> {
        self.cursor.read_i64()
    }

    fn read_uint64(&mut self, _field: &str) -> UaResult<u64> {
        self.cursor.read_u64()
    }

    fn read_float(&mut self, _field: &str) -> UaResult<f32> {
        self.cursor.read_f32()
    }

    fn read_double(&mut self, _field: &str) -> UaResult<f64> {
        self.cursor.read_f64()
    }

    fn read_string(&mut self, _field: &str) -> UaResult<Option<String>> {
        read_string(&mut self.cursor, &self.limits)
    }

    fn read_byte_string(&mut self, _field: &str) -> UaResult<Option<Vec<u8>>> {
        read_byte_string(&mut self.cursor, &self.limits)
    }

    fn read_guid(&mut self, _field: &str) -> UaResult<Guid> {
        self.take()
    }

    fn read_node_id(&mut self, _field: &str) -> UaResult<NodeId> {
        self.take()
    }

    fn read_expanded_node_id(&mut self, _field: &str) -> UaResult<ExpandedNodeId> {
        self.take()
    }

    fn read_qualified_name(&mut self, _field: &str) -> UaResult<QualifiedName> {
        self.take()
    }

    fn read_localized_text(&mut self, _field: &str) -> UaResult<LocalizedText> {
        self.take()
    }

    fn read_extension_object(&mut self, _field: &str) -> UaResult<ExtensionObject> {
        self.take()
    }

    fn begin_structure(&mut self, field: &str) -> UaResult<()> {
        if self.depth >= self.limits.max_recursion_depth {
            return Err(UaError::decoding(format!(
                "nesting depth exceeds limit {} at {field} (offset {})",
                self.limits.max_recursion_depth,
                self.cursor.offset()
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn end_structure(&mut self) -> UaResult<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn begin_array(&mut self, field: &str) -> UaResult<Option<usize>> {
        read_length(
            &mut self.cursor,
            self.limits.max_array_length,
            &format!("array {field}"),
        )
    }

    fn end_array(&mut self) -> UaResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_fields_are_packed() {
        let mut encoder = BinaryEncoder::new(EncodingLimits::default());
        encoder.write_boolean("a", true).expect("bool");
        encoder.write_int16("b", -2).expect("i16");
        encoder.write_uint32("c", 7).expect("u32");
        encoder.write_string("d", None).expect("string");
        let bytes = encoder.into_bytes();
        assert_eq!(bytes, vec![1, 0xFE, 0xFF, 7, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);

        let mut decoder = BinaryDecoder::new(&bytes, EncodingLimits::default());
        assert!(decoder.read_boolean("a").expect("bool"));
        assert_eq!(decoder.read_int16("b").expect("i16"), -2);
        assert_eq!(decoder.read_uint32("c").expect("u32"), 7);
        assert_eq!(decoder.read_string("d").expect("string"), None);
        assert!(decoder.is_eof());
    }

    #[test]
    fn test_any_nonzero_byte_is_true() {
        let mut decoder = BinaryDecoder::new(&[0x02], EncodingLimits::default());
        assert!(decoder.read_boolean("flag").expect("bool"));
    }

    #[test]
    fn test_nesting_depth_bounded() {
        let limits = EncodingLimits::default().with_max_recursion_depth(2);

        let mut encoder = BinaryEncoder::new(limits);
        encoder.begin_structure("a").expect("depth 1");
        encoder.begin_structure("b").expect("depth 2");
        assert!(matches!(
            encoder.begin_structure("c"),
            Err(UaError::Encoding { .. })
        ));

        let mut decoder = BinaryDecoder::new(&[], limits);
        decoder.begin_structure("a").expect("depth 1");
        decoder.end_structure().expect("close");
        decoder.begin_structure("a").expect("depth 1 again");
        decoder.begin_structure("b").expect("depth 2");
        assert!(decoder.begin_structure("c").unwrap_err().is_decoding());
    }

    #[test]
    fn test_message_size_bounded() {
        let limits = EncodingLimits::default().with_max_message_size(3);
        let mut encoder = BinaryEncoder::new(limits);
        assert!(matches!(
            encoder.write_uint32("x", 1),
            Err(UaError::Encoding { .. })
        ));
        assert!(check_message_size(4, &limits).unwrap_err().is_decoding());
        assert!(check_message_size(3, &limits).is_ok());
    }
}
