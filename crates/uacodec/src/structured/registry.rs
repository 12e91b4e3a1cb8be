// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec registry: encoding id -> structure codec.
//!
//! # Architecture
//!
//! ```text
//! CodecRegistryBuilder (mutable, single owner)
//! +-- register::<T>() / register_codec(codec)
//! +-- build() -> CodecRegistry
//!
//! CodecRegistry (immutable, shared read-only)
//! +-- namespaces:  NamespaceTable
//! +-- by_encoding: HashMap<NodeId, (DataEncoding, Arc<dyn DataTypeCodec>)>
//! +-- by_type:     HashMap<NodeId, Arc<dyn DataTypeCodec>>
//!
//! GLOBAL_REGISTRY: OnceLock<CodecRegistry>
//! +-- install_global() once at startup, or
//! +-- global() lazily fills it with the built-in types
//! ```
//!
//! Identity constants use namespace URIs; the registry translates them to
//! wire `NodeId`s through its namespace table when a codec is registered,
//! so lookups with ids read off the wire are a single hash lookup.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use super::identity::{DataEncoding, TypeIdentity};
use super::{register_builtin_types, DynStructure, UaStructure};
use crate::core::ser::{UaDecoder, UaEncoder};
use crate::error::{UaError, UaResult};
use crate::types::{ExpandedNodeId, NamespaceTable, NodeId};

static GLOBAL_REGISTRY: OnceLock<CodecRegistry> = OnceLock::new();

/// Type-erased structure codec stored in the registry.
pub trait DataTypeCodec: Send + Sync {
    fn identity(&self) -> &'static TypeIdentity;

    fn type_name(&self) -> &'static str;

    /// Read the fields of one value.
    fn decode(&self, decoder: &mut dyn UaDecoder) -> UaResult<Box<dyn DynStructure>>;

    /// Write the fields of `value`; fails if `value` is not this codec's type.
    fn encode(&self, encoder: &mut dyn UaEncoder, value: &dyn DynStructure) -> UaResult<()>;
}

/// [`DataTypeCodec`] for a statically known [`UaStructure`].
pub struct StructureCodec<T>(PhantomData<fn() -> T>);

impl<T> StructureCodec<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for StructureCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: UaStructure> fmt::Debug for StructureCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StructureCodec<{}>", T::NAME)
    }
}

impl<T: UaStructure> DataTypeCodec for StructureCodec<T> {
    fn identity(&self) -> &'static TypeIdentity {
        T::identity()
    }

    fn type_name(&self) -> &'static str {
        T::NAME
    }

    fn decode(&self, decoder: &mut dyn UaDecoder) -> UaResult<Box<dyn DynStructure>> {
        Ok(Box::new(T::decode(decoder)?))
    }

    fn encode(&self, encoder: &mut dyn UaEncoder, value: &dyn DynStructure) -> UaResult<()> {
        let value = value.downcast_ref::<T>().ok_or_else(|| {
            UaError::encoding(format!(
                "{} codec cannot encode a {}",
                T::NAME,
                value.type_name()
            ))
        })?;
        value.encode(encoder)
    }
}

/// Collects codecs; [`build`](Self::build) freezes them into a [`CodecRegistry`].
pub struct CodecRegistryBuilder {
    namespaces: NamespaceTable,
    by_encoding: HashMap<NodeId, (DataEncoding, Arc<dyn DataTypeCodec>)>,
    by_type: HashMap<NodeId, Arc<dyn DataTypeCodec>>,
}

impl Default for CodecRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistryBuilder {
    pub fn new() -> Self {
        Self::with_namespaces(NamespaceTable::new())
    }

    /// Start from an existing namespace table (e.g. a server's).
    pub fn with_namespaces(namespaces: NamespaceTable) -> Self {
        Self {
            namespaces,
            by_encoding: HashMap::new(),
            by_type: HashMap::new(),
        }
    }

    pub fn register<T: UaStructure>(&mut self) -> UaResult<&mut Self> {
        self.register_codec(Arc::new(StructureCodec::<T>::new()))
    }

    /// Register `codec` under its logical id and its three encoding ids.
    ///
    /// If any of those ids is already taken, fails with `DuplicateCodec` and
    /// leaves the builder unchanged.
    pub fn register_codec(&mut self, codec: Arc<dyn DataTypeCodec>) -> UaResult<&mut Self> {
        let identity = codec.identity();

        // Resolve against a scratch table so a rejected codec adds no URIs.
        let mut namespaces = self.namespaces.clone();
        let type_id = local_id(&mut namespaces, &identity.type_id)?;
        let mut encodings = Vec::with_capacity(DataEncoding::ALL.len());
        for (encoding, id) in identity.encoding_ids() {
            encodings.push((encoding, local_id(&mut namespaces, id)?));
        }

        let mut seen: Vec<&NodeId> = Vec::with_capacity(4);
        for id in std::iter::once(&type_id).chain(encodings.iter().map(|(_, id)| id)) {
            if seen.contains(&id)
                || self.by_type.contains_key(id)
                || self.by_encoding.contains_key(id)
            {
                log::debug!(
                    "[registry] rejecting {}: {} already registered",
                    codec.type_name(),
                    id
                );
                return Err(UaError::duplicate_codec(id));
            }
            seen.push(id);
        }

        log::debug!(
            "[registry] registered {} (type {}, binary {})",
            codec.type_name(),
            type_id,
            encodings[0].1
        );
        self.namespaces = namespaces;
        for (encoding, id) in encodings {
            self.by_encoding.insert(id, (encoding, Arc::clone(&codec)));
        }
        self.by_type.insert(type_id, codec);
        Ok(self)
    }

    pub fn build(self) -> CodecRegistry {
        log::info!(
            "[registry] built with {} types ({} encoding ids, {} namespaces)",
            self.by_type.len(),
            self.by_encoding.len(),
            self.namespaces.len()
        );
        CodecRegistry {
            namespaces: self.namespaces,
            by_encoding: self.by_encoding,
            by_type: self.by_type,
        }
    }
}

fn local_id(namespaces: &mut NamespaceTable, id: &ExpandedNodeId) -> UaResult<NodeId> {
    if !id.is_local() {
        return Err(UaError::encoding(format!(
            "cannot register remote type id {id}"
        )));
    }
    let namespace = match &id.namespace_uri {
        Some(uri) => namespaces.add(uri)?,
        None => id.node_id.namespace,
    };
    Ok(NodeId {
        namespace,
        identifier: id.node_id.identifier.clone(),
    })
}

/// Immutable lookup from wire identifiers to codecs.
pub struct CodecRegistry {
    namespaces: NamespaceTable,
    by_encoding: HashMap<NodeId, (DataEncoding, Arc<dyn DataTypeCodec>)>,
    by_type: HashMap<NodeId, Arc<dyn DataTypeCodec>>,
}

impl CodecRegistry {
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::new()
    }

    /// Registry holding every built-in structure.
    ///
    /// Registration cannot fail: the built-in identities are distinct ids in
    /// the core namespace and the builder starts empty.
    pub fn with_builtin_types() -> Self {
        let mut builder = CodecRegistryBuilder::new();
        let registered = register_builtin_types(&mut builder);
        debug_assert!(registered.is_ok(), "built-in identities collide: {registered:?}");
        builder.build()
    }

    /// Process-wide registry, filled with the built-in types on first use
    /// unless [`install_global`](Self::install_global) ran first.
    pub fn global() -> &'static CodecRegistry {
        GLOBAL_REGISTRY.get_or_init(Self::with_builtin_types)
    }

    /// Publish `registry` as the process-wide instance.
    ///
    /// Returns it back if a global registry already exists.
    pub fn install_global(registry: CodecRegistry) -> Result<(), CodecRegistry> {
        GLOBAL_REGISTRY.set(registry)
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// Codec registered under the encoding id `id`.
    pub fn resolve(&self, id: &NodeId) -> UaResult<&dyn DataTypeCodec> {
        self.resolve_with_encoding(id).map(|(_, codec)| codec)
    }

    /// Codec and the encoding `id` stands for.
    pub fn resolve_with_encoding(
        &self,
        id: &NodeId,
    ) -> UaResult<(DataEncoding, &dyn DataTypeCodec)> {
        match self.by_encoding.get(id) {
            Some((encoding, codec)) => Ok((*encoding, codec.as_ref())),
            None => {
                log::debug!("[registry] no codec for encoding id {}", id);
                Err(UaError::unknown_type(id))
            }
        }
    }

    /// Lookup by URI-qualified encoding id.
    pub fn resolve_expanded(&self, id: &ExpandedNodeId) -> UaResult<&dyn DataTypeCodec> {
        let local = id
            .to_node_id(&self.namespaces)
            .ok_or_else(|| UaError::unknown_type(id))?;
        self.resolve(&local)
    }

    /// Codec registered under the logical type id `id`.
    pub fn resolve_type(&self, id: &NodeId) -> UaResult<&dyn DataTypeCodec> {
        self.by_type
            .get(id)
            .map(|codec| codec.as_ref())
            .ok_or_else(|| UaError::unknown_type(id))
    }

    /// Wire id of `identity`'s `encoding` in this registry's namespace table.
    pub fn encoding_node_id(
        &self,
        identity: &TypeIdentity,
        encoding: DataEncoding,
    ) -> UaResult<NodeId> {
        let id = identity.encoding_id(encoding);
        id.to_node_id(&self.namespaces)
            .ok_or_else(|| UaError::unknown_type(id))
    }

    /// Registered codecs, one per type.
    pub fn codecs(&self) -> impl Iterator<Item = &dyn DataTypeCodec> {
        self.by_type.values().map(|codec| codec.as_ref())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.codecs().map(|c| c.type_name()).collect();
        names.sort_unstable();
        f.debug_struct("CodecRegistry")
            .field("types", &names)
            .field("namespaces", &self.namespaces.len())
            .finish()
    }
}
