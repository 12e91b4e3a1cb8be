// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in wire types consumed by structure codecs.
//!
//! Each type implements [`BinaryEncode`](crate::core::ser::BinaryEncode) /
//! [`BinaryDecode`](crate::core::ser::BinaryDecode) for its fixed binary
//! layout; the encoder back-ends delegate to these.

mod expanded_node_id;
mod guid;
mod localized_text;
mod namespace_table;
mod node_class;
mod node_id;
mod qualified_name;

pub use expanded_node_id::ExpandedNodeId;
pub use guid::Guid;
pub use localized_text::LocalizedText;
pub use namespace_table::NamespaceTable;
pub use node_class::{read_enumeration, write_enumeration, NodeClass, UaEnumeration};
pub use node_id::{Identifier, NodeId};
pub use qualified_name::QualifiedName;
