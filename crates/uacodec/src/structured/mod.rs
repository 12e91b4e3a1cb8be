// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structured types and the contract they share.
//!
//! # Module Organization
//!
//! - [`identity`] - Type identity triad (`TypeIdentity`, `DataEncoding`)
//! - [`array`] - Struct-array combinator (count prefix, absent sentinel)
//! - [`registry`] - Encoding id -> codec lookup for polymorphic decode
//! - [`extension_object`] - "Any structure" container resolved via the registry
//! - [`node`], [`reference_node`], [`argument`] - built-in structures
//!
//! # Contract
//!
//! A structure's `decode` reads fields in exactly the order its `encode`
//! writes them, which is the declared field order. Nested structures go
//! through [`encode_nested`] / [`decode_nested`] so every back-end sees the
//! same framing and nesting depth stays bounded.

pub mod array;
pub mod extension_object;
pub mod identity;
pub mod registry;

mod argument;
mod node;
mod reference_node;

use std::any::Any;
use std::fmt;

use crate::core::ser::{UaDecoder, UaEncoder};
use crate::error::UaResult;

pub use argument::Argument;
pub use array::{
    decode_array, decode_struct_array, decode_struct_array_with, encode_array,
    encode_struct_array, encode_struct_array_with,
};
pub use extension_object::{ExtensionObject, ExtensionObjectBody};
pub use identity::{DataEncoding, TypeIdentity};
pub use node::Node;
pub use reference_node::ReferenceNode;
pub use registry::{CodecRegistry, CodecRegistryBuilder, DataTypeCodec, StructureCodec};

/// Statically typed structure codec.
///
/// # Example
///
/// ```
/// use uacodec::{from_binary, to_binary, EncodingLimits, NodeClass, Node, NodeId};
/// use uacodec::{LocalizedText, QualifiedName};
///
/// let node = Node {
///     node_id: NodeId::numeric(0, 85),
///     node_class: NodeClass::Object,
///     browse_name: QualifiedName::new(0, "Objects"),
///     display_name: LocalizedText::english("Objects"),
///     description: LocalizedText::NULL,
///     write_mask: 0,
///     user_write_mask: 0,
///     references: Some(Vec::new()),
/// };
/// let limits = EncodingLimits::default();
/// let bytes = to_binary(&node, &limits)?;
/// assert_eq!(from_binary::<Node>(&bytes, &limits)?, node);
/// # Ok::<(), uacodec::UaError>(())
/// ```
pub trait UaStructure: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    fn identity() -> &'static TypeIdentity;

    /// Write every field in declared order.
    fn encode(&self, encoder: &mut dyn UaEncoder) -> UaResult<()>;

    /// Read every field in declared order.
    fn decode(decoder: &mut dyn UaDecoder) -> UaResult<Self>;
}

/// Object-safe view of any [`UaStructure`], used where the concrete type is
/// only known at runtime.
pub trait DynStructure: Any + fmt::Debug + Send + Sync + 'static {
    fn type_identity(&self) -> &'static TypeIdentity;

    fn type_name(&self) -> &'static str;

    fn encode_dyn(&self, encoder: &mut dyn UaEncoder) -> UaResult<()>;

    fn as_any(&self) -> &dyn Any;

    fn clone_box(&self) -> Box<dyn DynStructure>;

    fn eq_dyn(&self, other: &dyn DynStructure) -> bool;
}

impl<T: UaStructure> DynStructure for T {
    fn type_identity(&self) -> &'static TypeIdentity {
        <T as UaStructure>::identity()
    }

    fn type_name(&self) -> &'static str {
        T::NAME
    }

    fn encode_dyn(&self, encoder: &mut dyn UaEncoder) -> UaResult<()> {
        self.encode(encoder)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn DynStructure> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn DynStructure) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
}

impl dyn DynStructure {
    pub fn downcast_ref<T: UaStructure>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: UaStructure>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl Clone for Box<dyn DynStructure> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for Box<dyn DynStructure> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other.as_ref())
    }
}

/// Write a nested structure field.
pub fn encode_nested<T: UaStructure>(
    encoder: &mut dyn UaEncoder,
    field: &str,
    value: &T,
) -> UaResult<()> {
    encoder.begin_structure(field)?;
    value.encode(encoder)?;
    encoder.end_structure()
}

/// Read a nested structure field.
pub fn decode_nested<T: UaStructure>(decoder: &mut dyn UaDecoder, field: &str) -> UaResult<T> {
    decoder.begin_structure(field)?;
    let value = T::decode(decoder)?;
    decoder.end_structure()?;
    Ok(value)
}

/// Register every built-in structure on `builder`.
pub fn register_builtin_types(builder: &mut CodecRegistryBuilder) -> UaResult<()> {
    builder.register::<ReferenceNode>()?;
    builder.register::<Node>()?;
    builder.register::<Argument>()?;
    Ok(())
}
