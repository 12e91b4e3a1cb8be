// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node - attribute summary of one address-space node with its references.

use super::array::{decode_struct_array, encode_struct_array};
use super::identity::TypeIdentity;
use super::reference_node::ReferenceNode;
use super::UaStructure;
use crate::core::ser::{UaDecoder, UaEncoder};
use crate::error::UaResult;
use crate::types::{
    read_enumeration, write_enumeration, LocalizedText, NodeClass, NodeId, QualifiedName,
};

static NODE_IDENTITY: TypeIdentity = TypeIdentity::core(258, 260, 259, 15068);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    pub node_id: NodeId,
    pub node_class: NodeClass,
    pub browse_name: QualifiedName,
    pub display_name: LocalizedText,
    pub description: LocalizedText,
    pub write_mask: u32,
    pub user_write_mask: u32,
    /// `None` is the absent array, distinct from `Some(vec![])`.
    pub references: Option<Vec<ReferenceNode>>,
}

impl UaStructure for Node {
    const NAME: &'static str = "Node";

    fn identity() -> &'static TypeIdentity {
        &NODE_IDENTITY
    }

    fn encode(&self, encoder: &mut dyn UaEncoder) -> UaResult<()> {
        encoder.write_node_id("NodeId", &self.node_id)?;
        write_enumeration(encoder, "NodeClass", self.node_class)?;
        encoder.write_qualified_name("BrowseName", &self.browse_name)?;
        encoder.write_localized_text("DisplayName", &self.display_name)?;
        encoder.write_localized_text("Description", &self.description)?;
        encoder.write_uint32("WriteMask", self.write_mask)?;
        encoder.write_uint32("UserWriteMask", self.user_write_mask)?;
        encode_struct_array(encoder, "References", self.references.as_deref())
    }

    fn decode(decoder: &mut dyn UaDecoder) -> UaResult<Self> {
        Ok(Self {
            node_id: decoder.read_node_id("NodeId")?,
            node_class: read_enumeration(decoder, "NodeClass")?,
            browse_name: decoder.read_qualified_name("BrowseName")?,
            display_name: decoder.read_localized_text("DisplayName")?,
            description: decoder.read_localized_text("Description")?,
            write_mask: decoder.read_uint32("WriteMask")?,
            user_write_mask: decoder.read_uint32("UserWriteMask")?,
            references: decode_struct_array(decoder, "References")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodingLimits;
    use crate::core::ser::{from_binary, to_binary};
    use crate::types::ExpandedNodeId;

    fn root() -> Node {
        Node {
            node_id: NodeId::numeric(0, 85),
            node_class: NodeClass::Object,
            browse_name: QualifiedName::new(0, "Root"),
            display_name: LocalizedText::NULL,
            description: LocalizedText::NULL,
            write_mask: 0,
            user_write_mask: 0,
            references: Some(Vec::new()),
        }
    }

    #[test]
    fn test_root_node_layout() {
        let bytes = to_binary(&root(), &EncodingLimits::default()).expect("encode");
        let parts: [&[u8]; 9] = [
            &[0x00, 0x55],                     // NodeId two-byte i=85
            &[0x01, 0x00, 0x00, 0x00],         // NodeClass Object
            &[0x00, 0x00, 0x04, 0x00, 0x00, 0x00], // ns 0, len 4
            b"Root",
            &[0x00],                           // DisplayName
            &[0x00],                           // Description
            &[0x00; 4],                        // WriteMask
            &[0x00; 4],                        // UserWriteMask
            &[0x00; 4],                        // References count
        ];
        let expected = parts.concat();
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 30);
    }

    #[test]
    fn test_absent_references_roundtrip() {
        let node = Node {
            references: None,
            ..root()
        };
        let limits = EncodingLimits::default();
        let bytes = to_binary(&node, &limits).expect("encode");
        assert_eq!(&bytes[26..], &[0xFF; 4]);
        assert_eq!(from_binary::<Node>(&bytes, &limits).expect("decode"), node);
    }

    #[test]
    fn test_references_roundtrip() {
        let node = Node {
            node_class: NodeClass::View,
            description: LocalizedText::english("Top of the tree"),
            write_mask: 0x0010_0001,
            references: Some(vec![
                ReferenceNode {
                    reference_type_id: NodeId::numeric(0, 35),
                    is_inverse: false,
                    target_id: ExpandedNodeId::from(NodeId::numeric(0, 86)),
                },
                ReferenceNode {
                    reference_type_id: NodeId::numeric(0, 40),
                    is_inverse: true,
                    target_id: ExpandedNodeId::core(61),
                },
            ]),
            ..root()
        };
        let limits = EncodingLimits::default();
        let bytes = to_binary(&node, &limits).expect("encode");
        assert_eq!(from_binary::<Node>(&bytes, &limits).expect("decode"), node);
    }

    #[test]
    fn test_unknown_node_class_rejected() {
        let mut bytes = to_binary(&root(), &EncodingLimits::default()).expect("encode");
        bytes[2] = 3;
        let err = from_binary::<Node>(&bytes, &EncodingLimits::default()).unwrap_err();
        assert!(err.is_decoding());
    }
}
