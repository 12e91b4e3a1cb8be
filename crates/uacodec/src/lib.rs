// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # uacodec - structured-type codec for the OPC UA address-space model
//!
//! Serializes structured records (`Node`, `ReferenceNode`, `Argument`, and
//! any user type implementing [`UaStructure`]) to the compact binary wire
//! format and to JSON, and decodes "any structure" containers whose concrete
//! type is only known from an identifier on the wire.
//!
//! ## Quick Start
//!
//! ```rust
//! use uacodec::{CodecRegistry, EncodingLimits, ExtensionObject, Node, NodeClass, NodeId};
//! use uacodec::{LocalizedText, QualifiedName};
//!
//! let node = Node {
//!     node_id: NodeId::numeric(0, 85),
//!     node_class: NodeClass::Object,
//!     browse_name: QualifiedName::new(0, "Root"),
//!     display_name: LocalizedText::NULL,
//!     description: LocalizedText::NULL,
//!     write_mask: 0,
//!     user_write_mask: 0,
//!     references: Some(Vec::new()),
//! };
//!
//! let limits = EncodingLimits::default();
//! let registry = CodecRegistry::global();
//! let object = ExtensionObject::from_structure(&node, registry, &limits)?;
//!
//! // Later, with nothing but the bytes and the registry:
//! let decoded = object.decode(registry, &limits)?;
//! assert_eq!(decoded.type_name(), "Node");
//! assert_eq!(decoded.downcast_ref::<Node>(), Some(&node));
//! # Ok::<(), uacodec::UaError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  CodecRegistry (encoding id -> codec)  |  ExtensionObject container |
//! +---------------------------------------------------------------------+
//! |  UaStructure codecs: Node, ReferenceNode, Argument, user types      |
//! |  struct-array combinator (Int32 count, -1 = absent)                 |
//! +---------------------------------------------------------------------+
//! |  UaEncoder / UaDecoder: BinaryEncoder/Decoder, JsonEncoder/Decoder  |
//! +---------------------------------------------------------------------+
//! |  Built-in types: NodeId, ExpandedNodeId, QualifiedName, ...         |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Features
//!
//! - `json` (default) - JSON encoding back-end (`serde_json`)
//! - `serde` - `Serialize`/`Deserialize` for [`EncodingLimits`]

/// Wire constants and encoding limits.
pub mod config;
/// Byte cursor, field interface and encoding back-ends.
pub mod core;
/// Error type shared by every codec.
pub mod error;
/// Structure contract, array combinator, registry and built-in structures.
pub mod structured;
/// Built-in wire types (NodeId, LocalizedText, ...).
pub mod types;

pub use config::EncodingLimits;
pub use crate::core::ser::{from_binary, to_binary, UaDecoder, UaEncoder};
#[cfg(feature = "json")]
pub use crate::core::ser::{from_json, from_json_str, to_json, to_json_string};
pub use error::{UaError, UaResult};
pub use structured::{
    Argument, CodecRegistry, CodecRegistryBuilder, DataEncoding, DataTypeCodec, DynStructure,
    ExtensionObject, ExtensionObjectBody, Node, ReferenceNode, StructureCodec, TypeIdentity,
    UaStructure,
};
pub use types::{
    ExpandedNodeId, Guid, Identifier, LocalizedText, NamespaceTable, NodeClass, NodeId,
    QualifiedName,
};
