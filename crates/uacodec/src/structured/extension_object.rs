// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ExtensionObject - a structure of any registered type, tagged with its
//! encoding id.
//!
//! # Binary layout
//!
//! ```text
//! NodeId type_id | Byte encoding | body
//!                  0x00 none    | (nothing)
//!                  0x01 binary  | ByteString
//!                  0x02 xml     | String
//! ```
//!
//! A null ByteString or String body (length -1) is kept as `None` so it
//! encodes back to -1.
//!
//! The body is kept undecoded until [`ExtensionObject::decode`] resolves the
//! type id through a [`CodecRegistry`].

use super::identity::DataEncoding;
use super::registry::CodecRegistry;
use super::{DynStructure, UaStructure};
use crate::config::EncodingLimits;
use crate::core::ser::primitives::{
    byte_string_len, read_byte_string, read_string, string_len, write_byte_string, write_string,
};
use crate::core::ser::{
    from_binary, to_binary, BinaryDecode, BinaryDecoder, BinaryEncode, ByteCursor, ByteSink,
};
use crate::error::{UaError, UaResult};
use crate::types::{NamespaceTable, NodeId};

const BODY_NONE: u8 = 0x00;
const BODY_BINARY: u8 = 0x01;
const BODY_XML: u8 = 0x02;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ExtensionObjectBody {
    #[default]
    None,
    Binary(Option<Vec<u8>>),
    Xml(Option<String>),
}

impl ExtensionObjectBody {
    pub(crate) fn tag(&self) -> u8 {
        match self {
            ExtensionObjectBody::None => BODY_NONE,
            ExtensionObjectBody::Binary(_) => BODY_BINARY,
            ExtensionObjectBody::Xml(_) => BODY_XML,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ExtensionObject {
    /// Encoding id of the body (not the logical type id).
    pub type_id: NodeId,
    pub body: ExtensionObjectBody,
}

impl ExtensionObject {
    pub const NULL: ExtensionObject = ExtensionObject {
        type_id: NodeId::NULL,
        body: ExtensionObjectBody::None,
    };

    pub fn is_null(&self) -> bool {
        self.type_id.is_null() && self.body == ExtensionObjectBody::None
    }

    /// Wrap `value` as a binary body tagged with its binary encoding id.
    pub fn from_structure<T>(
        value: &T,
        registry: &CodecRegistry,
        limits: &EncodingLimits,
    ) -> UaResult<Self>
    where
        T: DynStructure + ?Sized,
    {
        let type_id = registry.encoding_node_id(value.type_identity(), DataEncoding::Binary)?;
        Ok(Self {
            type_id,
            body: ExtensionObjectBody::Binary(Some(to_binary(value, limits)?)),
        })
    }

    /// Decode the body with the codec registered for `type_id`.
    pub fn decode(
        &self,
        registry: &CodecRegistry,
        limits: &EncodingLimits,
    ) -> UaResult<Box<dyn DynStructure>> {
        let (encoding, codec) = registry.resolve_with_encoding(&self.type_id)?;
        let bytes = self.binary_body(encoding)?;

        let mut decoder = BinaryDecoder::new(bytes, *limits);
        codec.decode(&mut decoder).map_err(|e| {
            log::debug!(
                "[extension_object] {} body ({} bytes) rejected: {}",
                codec.type_name(),
                bytes.len(),
                e
            );
            e
        })
    }

    /// Decode the body as a `T`; `type_id` must be `T`'s binary encoding id.
    pub fn decode_as<T: UaStructure>(
        &self,
        namespaces: &NamespaceTable,
        limits: &EncodingLimits,
    ) -> UaResult<T> {
        let encoding = T::identity()
            .encoding_ids()
            .find(|(_, id)| id.to_node_id(namespaces).as_ref() == Some(&self.type_id))
            .map(|(encoding, _)| encoding)
            .ok_or_else(|| {
                UaError::decoding(format!(
                    "type id {} is not a {} encoding",
                    self.type_id,
                    T::NAME
                ))
            })?;
        from_binary(self.binary_body(encoding)?, limits)
    }

    fn binary_body(&self, encoding: DataEncoding) -> UaResult<&[u8]> {
        match (&self.body, encoding) {
            (ExtensionObjectBody::Binary(Some(bytes)), DataEncoding::Binary) => {
                Ok(bytes.as_slice())
            }
            (ExtensionObjectBody::None | ExtensionObjectBody::Binary(None), _) => Err(
                UaError::decoding(format!("extension object {} has no body", self.type_id)),
            ),
            (ExtensionObjectBody::Xml(_), _) => Err(UaError::decoding(format!(
                "extension object {}: XML bodies are not supported",
                self.type_id
            ))),
            (ExtensionObjectBody::Binary(Some(_)), other) => Err(UaError::decoding(format!(
                "extension object {} names the {other} encoding but carries a binary body",
                self.type_id
            ))),
        }
    }
}

impl BinaryEncode for ExtensionObject {
    fn encode_binary(&self, sink: &mut ByteSink, limits: &EncodingLimits) -> UaResult<()> {
        self.type_id.encode_binary(sink, limits)?;
        sink.write_u8(self.body.tag())?;
        match &self.body {
            ExtensionObjectBody::None => Ok(()),
            ExtensionObjectBody::Binary(bytes) => write_byte_string(sink, bytes.as_deref(), limits),
            ExtensionObjectBody::Xml(text) => write_string(sink, text.as_deref(), limits),
        }
    }

    fn encoded_len(&self) -> usize {
        self.type_id.encoded_len()
            + 1
            + match &self.body {
                ExtensionObjectBody::None => 0,
                ExtensionObjectBody::Binary(bytes) => byte_string_len(bytes.as_deref()),
                ExtensionObjectBody::Xml(text) => string_len(text.as_deref()),
            }
    }
}

impl BinaryDecode for ExtensionObject {
    fn decode_binary(src: &mut ByteCursor<'_>, limits: &EncodingLimits) -> UaResult<Self> {
        let type_id = NodeId::decode_binary(src, limits)?;
        let body = match src.read_u8()? {
            BODY_NONE => ExtensionObjectBody::None,
            BODY_BINARY => ExtensionObjectBody::Binary(read_byte_string(src, limits)?),
            BODY_XML => ExtensionObjectBody::Xml(read_string(src, limits)?),
            other => {
                return Err(UaError::decoding(format!(
                    "invalid extension object encoding 0x{other:02X} at offset {}",
                    src.offset().saturating_sub(1)
                )))
            }
        };
        Ok(Self { type_id, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structured::{Node, ReferenceNode};
    use crate::types::ExpandedNodeId;

    fn sample_reference() -> ReferenceNode {
        ReferenceNode {
            reference_type_id: NodeId::numeric(0, 47),
            is_inverse: true,
            target_id: ExpandedNodeId::from(NodeId::string(2, "Pump")),
        }
    }

    #[test]
    fn test_null_layout() {
        let mut sink = ByteSink::new(usize::MAX);
        ExtensionObject::NULL
            .encode_binary(&mut sink, &EncodingLimits::default())
            .expect("encode");
        assert_eq!(sink.into_bytes(), vec![0x00, 0x00, 0x00]);
        assert!(ExtensionObject::NULL.is_null());
    }

    #[test]
    fn test_polymorphic_decode() {
        let registry = CodecRegistry::with_builtin_types();
        let limits = EncodingLimits::default();
        let reference = sample_reference();

        let object = ExtensionObject::from_structure(&reference, &registry, &limits).expect("wrap");
        assert_eq!(object.type_id, NodeId::numeric(0, 287));

        let decoded = object.decode(&registry, &limits).expect("decode");
        assert_eq!(decoded.type_name(), "ReferenceNode");
        assert_eq!(decoded.downcast_ref::<ReferenceNode>(), Some(&reference));
    }

    #[test]
    fn test_decode_as_checks_type() {
        let registry = CodecRegistry::with_builtin_types();
        let limits = EncodingLimits::default();
        let object =
            ExtensionObject::from_structure(&sample_reference(), &registry, &limits).expect("wrap");

        let reference = object
            .decode_as::<ReferenceNode>(registry.namespaces(), &limits)
            .expect("same type");
        assert_eq!(reference, sample_reference());

        let err = object
            .decode_as::<Node>(registry.namespaces(), &limits)
            .unwrap_err();
        assert!(err.is_decoding());
    }

    #[test]
    fn test_unsupported_bodies() {
        let registry = CodecRegistry::with_builtin_types();
        let limits = EncodingLimits::default();

        let xml = ExtensionObject {
            type_id: NodeId::numeric(0, 259),
            body: ExtensionObjectBody::Xml(Some("<Node/>".into())),
        };
        assert!(xml.decode(&registry, &limits).unwrap_err().is_decoding());

        let empty = ExtensionObject {
            type_id: NodeId::numeric(0, 260),
            body: ExtensionObjectBody::None,
        };
        assert!(empty.decode(&registry, &limits).unwrap_err().is_decoding());

        let json_id = ExtensionObject {
            type_id: NodeId::numeric(0, 15068),
            body: ExtensionObjectBody::Binary(Some(vec![0])),
        };
        assert!(json_id.decode(&registry, &limits).unwrap_err().is_decoding());
    }

    #[test]
    fn test_unknown_type_id() {
        let object = ExtensionObject {
            type_id: NodeId::numeric(3, 4242),
            body: ExtensionObjectBody::Binary(Some(vec![1, 2, 3])),
        };
        let err = object
            .decode(&CodecRegistry::with_builtin_types(), &EncodingLimits::default())
            .err();
        assert!(matches!(err, Some(UaError::UnknownType { .. })));
    }

    #[test]
    fn test_binary_roundtrip_and_bad_tag() {
        let limits = EncodingLimits::default();
        let object = ExtensionObject {
            type_id: NodeId::numeric(0, 287),
            body: ExtensionObjectBody::Binary(Some(vec![9, 8, 7])),
        };
        let mut sink = ByteSink::new(usize::MAX);
        object.encode_binary(&mut sink, &limits).expect("encode");
        let mut bytes = sink.into_bytes();
        assert_eq!(bytes.len(), object.encoded_len());
        assert_eq!(
            ExtensionObject::decode_binary(&mut ByteCursor::new(&bytes), &limits).expect("decode"),
            object
        );

        // Encoding byte sits right after the 4-byte NodeId.
        bytes[4] = 0x07;
        let err =
            ExtensionObject::decode_binary(&mut ByteCursor::new(&bytes), &limits).unwrap_err();
        assert!(err.is_decoding());
    }

    #[test]
    fn test_null_bodies_survive_reencoding() {
        let limits = EncodingLimits::default();
        let registry = CodecRegistry::with_builtin_types();

        // i=287, then each body tag followed by a -1 length.
        for (tag, expected) in [
            (BODY_BINARY, ExtensionObjectBody::Binary(None)),
            (BODY_XML, ExtensionObjectBody::Xml(None)),
        ] {
            let bytes = [0x01, 0x00, 0x1F, 0x01, tag, 0xFF, 0xFF, 0xFF, 0xFF];
            let object = ExtensionObject::decode_binary(&mut ByteCursor::new(&bytes), &limits)
                .expect("decode");
            assert_eq!(object.body, expected);

            let mut sink = ByteSink::new(usize::MAX);
            object.encode_binary(&mut sink, &limits).expect("encode");
            assert_eq!(sink.as_bytes(), &bytes[..]);
            assert_eq!(object.encoded_len(), bytes.len());
            assert!(object.decode(&registry, &limits).unwrap_err().is_decoding());
        }

        let empty = ExtensionObject {
            type_id: NodeId::numeric(0, 287),
            body: ExtensionObjectBody::Binary(Some(Vec::new())),
        };
        let mut sink = ByteSink::new(usize::MAX);
        empty.encode_binary(&mut sink, &limits).expect("encode");
        assert_eq!(&sink.as_bytes()[5..], &[0u8; 4]);
    }
}
