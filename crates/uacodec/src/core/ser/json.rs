// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON back-end of the named field interface.
//!
//! A structure is a JSON object keyed by field name. Arrays are JSON arrays;
//! the absent array is `null`. Built-in types map as follows:
//!
//! | Type | JSON |
//! |------|------|
//! | Int64 / UInt64 | decimal string |
//! | Float / Double | number, or `"NaN"`, `"Infinity"`, `"-Infinity"` |
//! | String | string, `null` when absent |
//! | ByteString | base64 string, `null` when absent |
//! | Guid, NodeId | string form (`ns=1;i=5`) |
//! | ExpandedNodeId | `{"Id": "ns=1;i=5", "Uri": .., "ServerIndex": ..}`, absent parts omitted |
//! | QualifiedName | `{"Name": .., "Uri": ns}`, `Uri` omitted for namespace 0 |
//! | LocalizedText | `{"Locale": .., "Text": ..}`, absent parts omitted |
//! | ExtensionObject | `{"TypeId": .., "Encoding": 0/1/2, "Body": ..}` |

use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{Map, Number, Value};

use super::traits::{UaDecoder, UaEncoder};
use crate::config::EncodingLimits;
use crate::error::{UaError, UaResult};
use crate::structured::{DynStructure, ExtensionObject, ExtensionObjectBody, UaStructure};
use crate::types::{ExpandedNodeId, Guid, LocalizedText, NodeId, QualifiedName};

const KEY_NAME: &str = "Name";
const KEY_URI: &str = "Uri";
const KEY_LOCALE: &str = "Locale";
const KEY_TEXT: &str = "Text";
const KEY_TYPE_ID: &str = "TypeId";
const KEY_ENCODING: &str = "Encoding";
const KEY_BODY: &str = "Body";
const KEY_ID: &str = "Id";
const KEY_SERVER_INDEX: &str = "ServerIndex";

/// Encode `value` as a JSON object.
pub fn to_json<T>(value: &T, limits: &EncodingLimits) -> UaResult<Value>
where
    T: DynStructure + ?Sized,
{
    let mut encoder = JsonEncoder::new(*limits);
    value.encode_dyn(&mut encoder)?;
    encoder.finish()
}

/// Encode `value` as compact JSON text bounded by the message size limit.
pub fn to_json_string<T>(value: &T, limits: &EncodingLimits) -> UaResult<String>
where
    T: DynStructure + ?Sized,
{
    let text = serde_json::to_string(&to_json(value, limits)?)
        .map_err(|e| UaError::encoding(format!("JSON serialization failed: {e}")))?;
    if text.len() > limits.max_message_size {
        return Err(UaError::encoding(format!(
            "message size {} exceeds limit {}",
            text.len(),
            limits.max_message_size
        )));
    }
    Ok(text)
}

pub fn from_json<T: UaStructure>(value: &Value, limits: &EncodingLimits) -> UaResult<T> {
    let mut decoder = JsonDecoder::new(value, *limits)?;
    T::decode(&mut decoder)
}

pub fn from_json_str<T: UaStructure>(text: &str, limits: &EncodingLimits) -> UaResult<T> {
    super::binary::check_message_size(text.len(), limits)?;
    let value: Value = serde_json::from_str(text)
        .map_err(|e| UaError::decoding(format!("invalid JSON: {e}")))?;
    from_json(&value, limits)
}

fn float_value(value: f64) -> Value {
    match Number::from_f64(value) {
        Some(number) => Value::Number(number),
        None if value.is_nan() => Value::String("NaN".into()),
        None if value > 0.0 => Value::String("Infinity".into()),
        None => Value::String("-Infinity".into()),
    }
}

fn string_value(value: Option<&str>, limits: &EncodingLimits) -> UaResult<Value> {
    match value {
        None => Ok(Value::Null),
        Some(s) if s.len() > limits.max_string_length => Err(UaError::encoding(format!(
            "string length {} exceeds limit {}",
            s.len(),
            limits.max_string_length
        ))),
        Some(s) => Ok(Value::String(s.to_owned())),
    }
}

enum EncodeFrame {
    Object {
        field: String,
        map: Map<String, Value>,
    },
    Array {
        field: String,
        items: Option<Vec<Value>>,
    },
}

/// Builds a `serde_json::Value` tree.
pub struct JsonEncoder {
    stack: Vec<EncodeFrame>,
    limits: EncodingLimits,
    depth: usize,
}

impl JsonEncoder {
    pub fn new(limits: EncodingLimits) -> Self {
        Self {
            stack: vec![EncodeFrame::Object {
                field: String::new(),
                map: Map::new(),
            }],
            limits,
            depth: 0,
        }
    }

    /// Close the root object; fails if structures or arrays are still open.
    pub fn finish(mut self) -> UaResult<Value> {
        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(EncodeFrame::Object { map, .. }), true) => Ok(Value::Object(map)),
            _ => Err(UaError::encoding("unbalanced structure or array framing")),
        }
    }

    fn put(&mut self, field: &str, value: Value) -> UaResult<()> {
        match self.stack.last_mut() {
            Some(EncodeFrame::Object { map, .. }) => {
                map.insert(field.to_owned(), value);
                Ok(())
            }
            Some(EncodeFrame::Array {
                items: Some(items), ..
            }) => {
                items.push(value);
                Ok(())
            }
            Some(EncodeFrame::Array { field: array, .. }) => Err(UaError::encoding(format!(
                "element {field} written into absent array {array}"
            ))),
            None => Err(UaError::encoding(format!(
                "{field} written outside of any structure"
            ))),
        }
    }
}

impl UaEncoder for JsonEncoder {
    fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    fn write_boolean(&mut self, field: &str, value: bool) -> UaResult<()> {
        self.put(field, Value::Bool(value))
    }

    fn write_byte(&mut self, field: &str, value: u8) -> UaResult<()> {
        self.put(field, Value::from(value))
    }

    fn write_int16(&mut self, field: &str, value: i16) -> UaResult<()> {
        self.put(field, Value::from(value))
    }

    fn write_uint16(&mut self, field: &str, value: u16) -> UaResult<()> {
        self.put(field, Value::from(value))
    }

    fn write_int32(&mut self, field: &str, value: i32) -> UaResult<()> {
        self.put(field, Value::from(value))
    }

    fn write_uint32(&mut self, field: &str, value: u32) -> UaResult<()> {
        self.put(field, Value::from(value))
    }

    fn write_int64(&mut self, field: &str, value: i64) -> UaResult<()> {
        self.put(field, Value::String(value.to_string()))
    }

    fn write_uint64(&mut self, field: &str, value: u64) -> UaResult<()> {
        self.put(field, Value::String(value.to_string()))
    }

    fn write_float(&mut self, field: &str, value: f32) -> UaResult<()> {
        self.put(field, float_value(f64::from(value)))
    }

    fn write_double(&mut self, field: &str, value: f64) -> UaResult<()> {
        self.put(field, float_value(value))
    }

    fn write_string(&mut self, field: &str, value: Option<&str>) -> UaResult<()> {
        let value = string_value(value, &self.limits)?;
        self.put(field, value)
    }

    fn write_byte_string(&mut self, field: &str, value: Option<&[u8]>) -> UaResult<()> {
        let value = match value {
            None => Value::Null,
            Some(bytes) if bytes.len() > self.limits.max_string_length => {
                return Err(UaError::encoding(format!(
                    "byte string length {} exceeds limit {}",
                    bytes.len(),
                    self.limits.max_string_length
                )))
            }
            Some(bytes) => Value::String(BASE64.encode(bytes)),
        };
        self.put(field, value)
    }

    fn write_guid(&mut self, field: &str, value: &Guid) -> UaResult<()> {
        self.put(field, Value::String(value.to_string()))
    }

    fn write_node_id(&mut self, field: &str, value: &NodeId) -> UaResult<()> {
        self.put(field, Value::String(value.to_string()))
    }

    fn write_expanded_node_id(&mut self, field: &str, value: &ExpandedNodeId) -> UaResult<()> {
        let mut map = Map::new();
        map.insert(KEY_ID.into(), Value::String(value.node_id.to_string()));
        if let Some(uri) = value.namespace_uri.as_deref() {
            map.insert(KEY_URI.into(), string_value(Some(uri), &self.limits)?);
        }
        if value.server_index != 0 {
            map.insert(KEY_SERVER_INDEX.into(), Value::from(value.server_index));
        }
        self.put(field, Value::Object(map))
    }

    fn write_qualified_name(&mut self, field: &str, value: &QualifiedName) -> UaResult<()> {
        let mut map = Map::new();
        map.insert(KEY_NAME.into(), string_value(Some(value.name.as_str()), &self.limits)?);
        if value.namespace_index != 0 {
            map.insert(KEY_URI.into(), Value::from(value.namespace_index));
        }
        self.put(field, Value::Object(map))
    }

    fn write_localized_text(&mut self, field: &str, value: &LocalizedText) -> UaResult<()> {
        let mut map = Map::new();
        if let Some(locale) = &value.locale {
            map.insert(KEY_LOCALE.into(), string_value(Some(locale.as_str()), &self.limits)?);
        }
        if let Some(text) = &value.text {
            map.insert(KEY_TEXT.into(), string_value(Some(text.as_str()), &self.limits)?);
        }
        self.put(field, Value::Object(map))
    }

    fn write_extension_object(&mut self, field: &str, value: &ExtensionObject) -> UaResult<()> {
        let mut map = Map::new();
        map.insert(KEY_TYPE_ID.into(), Value::String(value.type_id.to_string()));
        map.insert(KEY_ENCODING.into(), Value::from(value.body.tag()));
        match &value.body {
            ExtensionObjectBody::None => {}
            ExtensionObjectBody::Binary(bytes) => {
                let body = bytes
                    .as_deref()
                    .map_or(Value::Null, |bytes| Value::String(BASE64.encode(bytes)));
                map.insert(KEY_BODY.into(), body);
            }
            ExtensionObjectBody::Xml(text) => {
                map.insert(KEY_BODY.into(), string_value(text.as_deref(), &self.limits)?);
            }
        }
        self.put(field, Value::Object(map))
    }

    fn begin_structure(&mut self, field: &str) -> UaResult<()> {
        if self.depth >= self.limits.max_recursion_depth {
            return Err(UaError::encoding(format!(
                "nesting depth exceeds limit {} at {field}",
                self.limits.max_recursion_depth
            )));
        }
        self.depth += 1;
        self.stack.push(EncodeFrame::Object {
            field: field.to_owned(),
            map: Map::new(),
        });
        Ok(())
    }

    fn end_structure(&mut self) -> UaResult<()> {
        // The root frame is closed by `finish`, never here.
        if self.stack.len() < 2 {
            return Err(UaError::encoding("end_structure without begin_structure"));
        }
        match self.stack.pop() {
            Some(EncodeFrame::Object { field, map }) => {
                self.depth = self.depth.saturating_sub(1);
                self.put(&field, Value::Object(map))
            }
            _ => Err(UaError::encoding("end_structure closes an array")),
        }
    }

    fn begin_array(&mut self, field: &str, len: Option<usize>) -> UaResult<()> {
        if let Some(len) = len {
            if len > self.limits.max_array_length {
                return Err(UaError::encoding(format!(
                    "array {field} length {len} exceeds limit {}",
                    self.limits.max_array_length
                )));
            }
        }
        self.stack.push(EncodeFrame::Array {
            field: field.to_owned(),
            items: len.map(Vec::with_capacity),
        });
        Ok(())
    }

    fn end_array(&mut self) -> UaResult<()> {
        match self.stack.pop() {
            Some(EncodeFrame::Array { field, items }) => {
                self.put(&field, items.map_or(Value::Null, Value::Array))
            }
            _ => Err(UaError::encoding("end_array without begin_array")),
        }
    }
}

enum DecodeFrame<'v> {
    Object(&'v Map<String, Value>),
    Array { items: &'v [Value], next: usize },
}

/// Reads fields from a borrowed `serde_json::Value` tree.
pub struct JsonDecoder<'v> {
    stack: Vec<DecodeFrame<'v>>,
    limits: EncodingLimits,
    depth: usize,
}

impl<'v> JsonDecoder<'v> {
    /// `root` must be a JSON object.
    pub fn new(root: &'v Value, limits: EncodingLimits) -> UaResult<Self> {
        let map = root
            .as_object()
            .ok_or_else(|| UaError::decoding("JSON root is not an object"))?;
        Ok(Self {
            stack: vec![DecodeFrame::Object(map)],
            limits,
            depth: 0,
        })
    }

    fn take(&mut self, field: &str) -> UaResult<&'v Value> {
        match self.stack.last_mut() {
            Some(DecodeFrame::Object(map)) => {
                let map: &'v Map<String, Value> = *map;
                map.get(field)
                    .ok_or_else(|| UaError::decoding(format!("missing field {field}")))
            }
            Some(DecodeFrame::Array { items, next }) => {
                let items: &'v [Value] = *items;
                let value = items.get(*next).ok_or_else(|| {
                    UaError::decoding(format!("array exhausted reading {field}"))
                })?;
                *next += 1;
                Ok(value)
            }
            None => Err(UaError::decoding(format!(
                "{field} read outside of any structure"
            ))),
        }
    }

    fn take_str(&mut self, field: &str) -> UaResult<&'v str> {
        self.take(field)?
            .as_str()
            .ok_or_else(|| mismatch(field, "a string"))
    }

    fn take_i64(&mut self, field: &str) -> UaResult<i64> {
        self.take(field)?
            .as_i64()
            .ok_or_else(|| mismatch(field, "an integer"))
    }

    fn take_int<I: TryFrom<i64>>(&mut self, field: &str) -> UaResult<I> {
        let raw = self.take_i64(field)?;
        I::try_from(raw)
            .map_err(|_| UaError::decoding(format!("{field} value {raw} out of range")))
    }

    fn take_float(&mut self, field: &str) -> UaResult<f64> {
        match self.take(field)? {
            Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| mismatch(field, "a number")),
            Value::String(s) => match s.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                _ => Err(mismatch(field, "a number")),
            },
            _ => Err(mismatch(field, "a number")),
        }
    }

    fn checked_string(&self, field: &str, value: &str) -> UaResult<String> {
        if value.len() > self.limits.max_string_length {
            return Err(UaError::decoding(format!(
                "{field} length {} exceeds limit {}",
                value.len(),
                self.limits.max_string_length
            )));
        }
        Ok(value.to_owned())
    }

    fn optional_string(
        &self,
        object: &Map<String, Value>,
        field: &str,
        key: &str,
    ) -> UaResult<Option<String>> {
        match object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => self.checked_string(field, s).map(Some),
            Some(_) => Err(mismatch(field, "a string member")),
        }
    }

    fn decode_bytes(&self, field: &str, text: &str) -> UaResult<Vec<u8>> {
        let bytes = BASE64
            .decode(text)
            .map_err(|e| UaError::decoding(format!("{field} is not valid base64: {e}")))?;
        if bytes.len() > self.limits.max_string_length {
            return Err(UaError::decoding(format!(
                "{field} length {} exceeds limit {}",
                bytes.len(),
                self.limits.max_string_length
            )));
        }
        Ok(bytes)
    }

    fn take_object(&mut self, field: &str) -> UaResult<&'v Map<String, Value>> {
        self.take(field)?
            .as_object()
            .ok_or_else(|| mismatch(field, "an object"))
    }
}

fn mismatch(field: &str, expected: &str) -> UaError {
    UaError::decoding(format!("{field} is not {expected}"))
}

impl UaDecoder for JsonDecoder<'_> {
    fn limits(&self) -> &EncodingLimits {
        &self.limits
    }

    fn remaining_hint(&self) -> usize {
        match self.stack.last() {
            Some(DecodeFrame::Array { items, next }) => items.len().saturating_sub(*next),
            Some(DecodeFrame::Object(map)) => map.len(),
            None => 0,
        }
    }

    fn read_boolean(&mut self, field: &str) -> UaResult<bool> {
        self.take(field)?
            .as_bool()
            .ok_or_else(|| mismatch(field, "a boolean"))
    }

    fn read_byte(&mut self, field: &str) -> UaResult<u8> {
        self.take_int(field)
    }

    fn read_int16(&mut self, field: &str) -> UaResult<i16> {
        self.take_int(field)
    }

    fn read_uint16(&mut self, field: &str) -> UaResult<u16> {
        self.take_int(field)
    }

    fn read_int32(&mut self, field: &str) -> UaResult<i32> {
        self.take_int(field)
    }

    fn read_uint32(&mut self, field: &str) -> UaResult<u32> {
        self.take_int(field)
    }

    fn read_int64(&mut self, field: &str) -> UaResult<i64> {
        match self.take(field)? {
            Value::String(s) => s
                .parse()
                .map_err(|_| UaError::decoding(format!("{field} value {s:?} is not an Int64"))),
            Value::Number(n) => n.as_i64().ok_or_else(|| mismatch(field, "an Int64")),
            _ => Err(mismatch(field, "an Int64")),
        }
    }

    fn read_uint64(&mut self, field: &str) -> UaResult<u64> {
        match self.take(field)? {
            Value::String(s) => s
                .parse()
                .map_err(|_| UaError::decoding(format!("{field} value {s:?} is not a UInt64"))),
            Value::Number(n) => n.as_u64().ok_or_else(|| mismatch(field, "a UInt64")),
            _ => Err(mismatch(field, "a UInt64")),
        }
    }

    fn read_float(&mut self, field: &str) -> UaResult<f32> {
        let wide = self.take_float(field)?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(UaError::decoding(format!(
                "{field} value {wide} is out of Float range"
            )));
        }
        Ok(narrow)
    }

    fn read_double(&mut self, field: &str) -> UaResult<f64> {
        self.take_float(field)
    }

    fn read_string(&mut self, field: &str) -> UaResult<Option<String>> {
        match self.take(field)? {
            Value::Null => Ok(None),
            Value::String(s) => self.checked_string(field, s).map(Some),
            _ => Err(mismatch(field, "a string")),
        }
    }

    fn read_byte_string(&mut self, field: &str) -> UaResult<Option<Vec<u8>>> {
        match self.take(field)? {
            Value::Null => Ok(None),
            Value::String(s) => self.decode_bytes(field, s).map(Some),
            _ => Err(mismatch(field, "a base64 string")),
        }
    }

    fn read_guid(&mut self, field: &str) -> UaResult<Guid> {
        self.take_str(field)?.parse()
    }

    fn read_node_id(&mut self, field: &str) -> UaResult<NodeId> {
        self.take_str(field)?.parse()
    }

    fn read_expanded_node_id(&mut self, field: &str) -> UaResult<ExpandedNodeId> {
        let object = self.take_object(field)?;
        let node_id = object
            .get(KEY_ID)
            .and_then(Value::as_str)
            .ok_or_else(|| mismatch(field, "an expanded node id with an Id"))?
            .parse()?;
        let server_index = match object.get(KEY_SERVER_INDEX) {
            None => 0,
            Some(index) => index
                .as_u64()
                .and_then(|index| u32::try_from(index).ok())
                .ok_or_else(|| mismatch(field, "an expanded node id with a UInt32 ServerIndex"))?,
        };
        Ok(ExpandedNodeId {
            node_id,
            namespace_uri: self.optional_string(object, field, KEY_URI)?.map(Cow::Owned),
            server_index,
        })
    }

    fn read_qualified_name(&mut self, field: &str) -> UaResult<QualifiedName> {
        let object = self.take_object(field)?;
        let name = self.optional_string(object, field, KEY_NAME)?.unwrap_or_default();
        let namespace_index = match object.get(KEY_URI) {
            None => 0,
            Some(uri) => uri
                .as_u64()
                .and_then(|ns| u16::try_from(ns).ok())
                .ok_or_else(|| mismatch(field, "a qualified name with a UInt16 Uri"))?,
        };
        Ok(QualifiedName {
            namespace_index,
            name,
        })
    }

    fn read_localized_text(&mut self, field: &str) -> UaResult<LocalizedText> {
        let object = self.take_object(field)?;
        Ok(LocalizedText {
            locale: self.optional_string(object, field, KEY_LOCALE)?,
            text: self.optional_string(object, field, KEY_TEXT)?,
        })
    }

    fn read_extension_object(&mut self, field: &str) -> UaResult<ExtensionObject> {
        let object = self.take_object(field)?;
        let type_id = object
            .get(KEY_TYPE_ID)
            .and_then(Value::as_str)
            .ok_or_else(|| mismatch(field, "an extension object with a TypeId"))?
            .parse()?;
        let body = match (object.get(KEY_ENCODING).and_then(Value::as_u64), object.get(KEY_BODY)) {
            (None | Some(0), _) => ExtensionObjectBody::None,
            (Some(1), Some(Value::Null)) => ExtensionObjectBody::Binary(None),
            (Some(1), Some(Value::String(text))) => {
                ExtensionObjectBody::Binary(Some(self.decode_bytes(field, text)?))
            }
            (Some(2), Some(Value::Null)) => ExtensionObjectBody::Xml(None),
            (Some(2), Some(Value::String(text))) => {
                ExtensionObjectBody::Xml(Some(self.checked_string(field, text)?))
            }
            (Some(tag), _) => {
                return Err(UaError::decoding(format!(
                    "{field} has encoding {tag} without a matching Body"
                )))
            }
        };
        Ok(ExtensionObject { type_id, body })
    }

    fn begin_structure(&mut self, field: &str) -> UaResult<()> {
        if self.depth >= self.limits.max_recursion_depth {
            return Err(UaError::decoding(format!(
                "nesting depth exceeds limit {} at {field}",
                self.limits.max_recursion_depth
            )));
        }
        let object = self.take_object(field)?;
        self.depth += 1;
        self.stack.push(DecodeFrame::Object(object));
        Ok(())
    }

    fn end_structure(&mut self) -> UaResult<()> {
        if self.stack.len() < 2 {
            return Err(UaError::decoding("end_structure without begin_structure"));
        }
        match self.stack.pop() {
            Some(DecodeFrame::Object(_)) => {
                self.depth = self.depth.saturating_sub(1);
                Ok(())
            }
            _ => Err(UaError::decoding("end_structure closes an array")),
        }
    }

    fn begin_array(&mut self, field: &str) -> UaResult<Option<usize>> {
        match self.take(field)? {
            Value::Null => {
                self.stack.push(DecodeFrame::Array {
                    items: &[],
                    next: 0,
                });
                Ok(None)
            }
            Value::Array(items) => {
                if items.len() > self.limits.max_array_length {
                    return Err(UaError::decoding(format!(
                        "array {field} length {} exceeds limit {}",
                        items.len(),
                        self.limits.max_array_length
                    )));
                }
                self.stack.push(DecodeFrame::Array { items, next: 0 });
                Ok(Some(items.len()))
            }
            _ => Err(mismatch(field, "an array")),
        }
    }

    fn end_array(&mut self) -> UaResult<()> {
        match self.stack.pop() {
            Some(DecodeFrame::Array { .. }) => Ok(()),
            _ => Err(UaError::decoding("end_array without begin_array")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structured::{Argument, Node, ReferenceNode};
    use crate::types::NodeClass;
    use serde_json::json;

    fn root() -> Node {
        Node {
            node_id: NodeId::numeric(0, 85),
            node_class: NodeClass::Object,
            browse_name: QualifiedName::new(0, "Root"),
            references: Some(Vec::new()),
            ..Node::default()
        }
    }

    #[test]
    fn test_node_shape() {
        let value = to_json(&root(), &EncodingLimits::default()).expect("encode");
        assert_eq!(
            value,
            json!({
                "NodeId": "i=85",
                "NodeClass": 1,
                "BrowseName": {"Name": "Root"},
                "DisplayName": {},
                "Description": {},
                "WriteMask": 0,
                "UserWriteMask": 0,
                "References": []
            })
        );
    }

    #[test]
    fn test_nested_roundtrip() {
        let node = Node {
            browse_name: QualifiedName::new(2, "Pump"),
            display_name: LocalizedText::english("Pump"),
            references: Some(vec![ReferenceNode {
                reference_type_id: NodeId::numeric(0, 46),
                is_inverse: false,
                target_id: ExpandedNodeId::core(68),
            }]),
            ..root()
        };
        let limits = EncodingLimits::default();
        let value = to_json(&node, &limits).expect("encode");
        assert_eq!(value["BrowseName"], json!({"Name": "Pump", "Uri": 2}));
        assert_eq!(
            value["References"][0]["TargetId"],
            json!({"Id": "i=68", "Uri": "http://opcfoundation.org/UA/"})
        );
        assert_eq!(from_json::<Node>(&value, &limits).expect("decode"), node);
    }

    #[test]
    fn test_absent_array_is_null() {
        let limits = EncodingLimits::default();
        let argument = Argument::default();
        let value = to_json(&argument, &limits).expect("encode");
        assert_eq!(value["ArrayDimensions"], Value::Null);
        assert_eq!(value["Name"], Value::Null);
        assert_eq!(from_json::<Argument>(&value, &limits).expect("decode"), argument);
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let limits = EncodingLimits::default();
        let mut value = to_json(&root(), &limits).expect("encode");
        value["WriteMask"] = json!("zero");
        assert!(from_json::<Node>(&value, &limits).unwrap_err().is_decoding());

        if let Some(map) = value.as_object_mut() {
            map.remove("WriteMask");
        }
        assert!(from_json::<Node>(&value, &limits).unwrap_err().is_decoding());
    }

    #[test]
    fn test_wide_integers_and_floats() {
        let mut encoder = JsonEncoder::new(EncodingLimits::default());
        encoder.write_int64("A", i64::MIN).expect("i64");
        encoder.write_uint64("B", u64::MAX).expect("u64");
        encoder.write_double("C", f64::NEG_INFINITY).expect("f64");
        encoder.write_byte_string("D", Some(&[0xFF, 0x00][..])).expect("bytes");
        let value = encoder.finish().expect("finish");
        assert_eq!(value["A"], json!("-9223372036854775808"));
        assert_eq!(value["B"], json!("18446744073709551615"));
        assert_eq!(value["C"], json!("-Infinity"));
        assert_eq!(value["D"], json!("/wA="));

        let mut decoder = JsonDecoder::new(&value, EncodingLimits::default()).expect("object");
        assert_eq!(decoder.read_int64("A").expect("i64"), i64::MIN);
        assert_eq!(decoder.read_uint64("B").expect("u64"), u64::MAX);
        assert_eq!(decoder.read_double("C").expect("f64"), f64::NEG_INFINITY);
        assert_eq!(
            decoder.read_byte_string("D").expect("bytes"),
            Some(vec![0xFF, 0x00])
        );
    }

    #[test]
    fn test_array_limit_and_range() {
        let limits = EncodingLimits::default().with_max_array_length(1);
        let value = json!({"ArrayDimensions": [1, 2]});
        let mut decoder = JsonDecoder::new(&value, limits).expect("object");
        assert!(decoder.begin_array("ArrayDimensions").unwrap_err().is_decoding());

        let value = json!({"X": 70000});
        let mut decoder = JsonDecoder::new(&value, EncodingLimits::default()).expect("object");
        assert!(decoder.read_uint16("X").unwrap_err().is_decoding());
    }

    #[test]
    fn test_text_roundtrip_through_str() {
        let limits = EncodingLimits::default();
        let text = to_json_string(&root(), &limits).expect("encode");
        assert_eq!(from_json_str::<Node>(&text, &limits).expect("decode"), root());
        assert!(from_json_str::<Node>("[1, 2]", &limits).unwrap_err().is_decoding());
        assert!(from_json_str::<Node>("{", &limits).unwrap_err().is_decoding());
    }

    #[test]
    fn test_extension_object_member() {
        let object = ExtensionObject {
            type_id: NodeId::numeric(0, 287),
            body: ExtensionObjectBody::Binary(Some(vec![1, 2, 3])),
        };
        let mut encoder = JsonEncoder::new(EncodingLimits::default());
        encoder.write_extension_object("Value", &object).expect("encode");
        let value = encoder.finish().expect("finish");
        assert_eq!(
            value["Value"],
            json!({"TypeId": "i=287", "Encoding": 1, "Body": "AQID"})
        );

        let mut decoder = JsonDecoder::new(&value, EncodingLimits::default()).expect("object");
        assert_eq!(decoder.read_extension_object("Value").expect("decode"), object);
    }

    #[test]
    fn test_null_extension_object_body() {
        let limits = EncodingLimits::default();
        let object = ExtensionObject {
            type_id: NodeId::numeric(0, 287),
            body: ExtensionObjectBody::Binary(None),
        };
        let mut encoder = JsonEncoder::new(limits);
        encoder.write_extension_object("Value", &object).expect("encode");
        let value = encoder.finish().expect("finish");
        assert_eq!(
            value["Value"],
            json!({"TypeId": "i=287", "Encoding": 1, "Body": null})
        );

        let mut decoder = JsonDecoder::new(&value, limits).expect("object");
        assert_eq!(decoder.read_extension_object("Value").expect("decode"), object);

        let missing = json!({"Value": {"TypeId": "i=287", "Encoding": 2}});
        let mut decoder = JsonDecoder::new(&missing, limits).expect("object");
        assert!(decoder.read_extension_object("Value").unwrap_err().is_decoding());
    }

    #[test]
    fn test_expanded_node_id_keeps_every_part() {
        let limits = EncodingLimits::default();
        let ids = [
            ExpandedNodeId {
                node_id: NodeId::numeric(5, 7),
                namespace_uri: Some(Cow::Borrowed("urn:x")),
                server_index: 0,
            },
            ExpandedNodeId::with_namespace_uri(NodeId::numeric(0, 7), "urn:a;b"),
            ExpandedNodeId {
                node_id: NodeId::string(2, " Pump;7 "),
                namespace_uri: None,
                server_index: 3,
            },
            ExpandedNodeId::from(NodeId::numeric(0, 85)),
        ];

        let mut encoder = JsonEncoder::new(limits);
        encoder.begin_array("Ids", Some(ids.len())).expect("begin");
        for id in &ids {
            encoder.write_expanded_node_id("Id", id).expect("encode");
        }
        encoder.end_array().expect("end");
        let value = encoder.finish().expect("finish");
        assert_eq!(value["Ids"][0], json!({"Id": "ns=5;i=7", "Uri": "urn:x"}));
        assert_eq!(value["Ids"][2], json!({"Id": "ns=2;s= Pump;7 ", "ServerIndex": 3}));
        assert_eq!(value["Ids"][3], json!({"Id": "i=85"}));

        let mut decoder = JsonDecoder::new(&value, limits).expect("object");
        assert_eq!(decoder.begin_array("Ids").expect("begin"), Some(ids.len()));
        for id in &ids {
            assert_eq!(&decoder.read_expanded_node_id("Id").expect("decode"), id);
        }
        decoder.end_array().expect("end");
    }

    #[test]
    fn test_float_out_of_range() {
        let value = json!({"A": 1.0e39, "B": 3.5, "C": "Infinity"});
        let mut decoder = JsonDecoder::new(&value, EncodingLimits::default()).expect("object");
        assert!(decoder.read_float("A").unwrap_err().is_decoding());
        assert_eq!(decoder.read_float("B").expect("in range"), 3.5);
        assert_eq!(decoder.read_float("C").expect("infinity"), f32::INFINITY);
    }
}
