// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type identity triad: one logical id plus one id per wire encoding.
//!
//! The logical id names the abstract schema and is what applications compare.
//! The encoding ids name one concrete serialization each and are the keys the
//! [`CodecRegistry`](super::CodecRegistry) indexes on.

use std::fmt;

use crate::types::ExpandedNodeId;

/// Wire encodings a structured type can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataEncoding {
    Binary,
    Xml,
    Json,
}

impl DataEncoding {
    pub const ALL: [DataEncoding; 3] =
        [DataEncoding::Binary, DataEncoding::Xml, DataEncoding::Json];

    /// Browse name of the encoding object in the address space.
    pub const fn browse_name(self) -> &'static str {
        match self {
            DataEncoding::Binary => "Default Binary",
            DataEncoding::Xml => "Default XML",
            DataEncoding::Json => "Default JSON",
        }
    }
}

impl fmt::Display for DataEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.browse_name())
    }
}

/// Constant identifiers of one structured type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    pub type_id: ExpandedNodeId,
    pub binary_encoding_id: ExpandedNodeId,
    pub xml_encoding_id: ExpandedNodeId,
    pub json_encoding_id: ExpandedNodeId,
}

impl TypeIdentity {
    /// Identity of a type defined in the core namespace.
    pub const fn core(type_id: u32, binary: u32, xml: u32, json: u32) -> Self {
        Self {
            type_id: ExpandedNodeId::core(type_id),
            binary_encoding_id: ExpandedNodeId::core(binary),
            xml_encoding_id: ExpandedNodeId::core(xml),
            json_encoding_id: ExpandedNodeId::core(json),
        }
    }

    pub fn encoding_id(&self, encoding: DataEncoding) -> &ExpandedNodeId {
        match encoding {
            DataEncoding::Binary => &self.binary_encoding_id,
            DataEncoding::Xml => &self.xml_encoding_id,
            DataEncoding::Json => &self.json_encoding_id,
        }
    }

    pub fn encoding_ids(&self) -> impl Iterator<Item = (DataEncoding, &ExpandedNodeId)> {
        DataEncoding::ALL
            .into_iter()
            .map(move |encoding| (encoding, self.encoding_id(encoding)))
    }

    /// Which encoding `id` names, if it belongs to this type.
    pub fn encoding_of(&self, id: &ExpandedNodeId) -> Option<DataEncoding> {
        self.encoding_ids()
            .find(|(_, candidate)| *candidate == id)
            .map(|(encoding, _)| encoding)
    }
}
