// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ReferenceNode - one typed, directed reference from a node.

use super::identity::TypeIdentity;
use super::UaStructure;
use crate::core::ser::{UaDecoder, UaEncoder};
use crate::error::UaResult;
use crate::types::{ExpandedNodeId, NodeId};

static REFERENCE_NODE_IDENTITY: TypeIdentity = TypeIdentity::core(285, 287, 286, 15080);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ReferenceNode {
    pub reference_type_id: NodeId,
    /// True when the reference points from the target to the owning node.
    pub is_inverse: bool,
    pub target_id: ExpandedNodeId,
}

impl UaStructure for ReferenceNode {
    const NAME: &'static str = "ReferenceNode";

    fn identity() -> &'static TypeIdentity {
        &REFERENCE_NODE_IDENTITY
    }

    fn encode(&self, encoder: &mut dyn UaEncoder) -> UaResult<()> {
        encoder.write_node_id("ReferenceTypeId", &self.reference_type_id)?;
        encoder.write_boolean("IsInverse", self.is_inverse)?;
        encoder.write_expanded_node_id("TargetId", &self.target_id)
    }

    fn decode(decoder: &mut dyn UaDecoder) -> UaResult<Self> {
        Ok(Self {
            reference_type_id: decoder.read_node_id("ReferenceTypeId")?,
            is_inverse: decoder.read_boolean("IsInverse")?,
            target_id: decoder.read_expanded_node_id("TargetId")?,
        })
    }
}
