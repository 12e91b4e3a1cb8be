// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ExpandedNodeId - a NodeId that may name its namespace by URI and live on
//! another server.
//!
//! Type identity constants are expressed in the URI form
//! (`nsu=http://opcfoundation.org/UA/;i=258`) so they stay valid across
//! namespace-index remappings; a [`NamespaceTable`](super::NamespaceTable)
//! turns them into wire [`NodeId`]s.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use super::{NamespaceTable, NodeId};
use crate::config::{EncodingLimits, OPC_UA_NAMESPACE_URI};
use crate::core::ser::primitives::{read_string, string_len, write_string};
use crate::core::ser::{BinaryDecode, BinaryEncode, ByteCursor, ByteSink};
use crate::error::{UaError, UaResult};

const FLAG_NAMESPACE_URI: u8 = 0x80;
const FLAG_SERVER_INDEX: u8 = 0x40;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    /// When set, takes precedence over `node_id.namespace`.
    pub namespace_uri: Option<Cow<'static, str>>,
    pub server_index: u32,
}

impl ExpandedNodeId {
    /// Numeric identifier in the core namespace, URI form.
    pub const fn core(id: u32) -> Self {
        Self {
            node_id: NodeId::numeric(0, id),
            namespace_uri: Some(Cow::Borrowed(OPC_UA_NAMESPACE_URI)),
            server_index: 0,
        }
    }

    pub fn with_namespace_uri(node_id: NodeId, uri: impl Into<Cow<'static, str>>) -> Self {
        Self {
            node_id: NodeId {
                namespace: 0,
                identifier: node_id.identifier,
            },
            namespace_uri: Some(uri.into()),
            server_index: 0,
        }
    }

    pub fn is_local(&self) -> bool {
        self.server_index == 0
    }

    /// Resolve to a local NodeId; `None` for remote ids or unknown URIs.
    pub fn to_node_id(&self, namespaces: &NamespaceTable) -> Option<NodeId> {
        if !self.is_local() {
            return None;
        }
        match &self.namespace_uri {
            None => Some(self.node_id.clone()),
            Some(uri) => namespaces.index_of(uri).map(|namespace| NodeId {
                namespace,
                identifier: self.node_id.identifier.clone(),
            }),
        }
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.namespace_uri.is_some() {
            flags |= FLAG_NAMESPACE_URI;
        }
        if self.server_index != 0 {
            flags |= FLAG_SERVER_INDEX;
        }
        flags
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: None,
            server_index: 0,
        }
    }
}

impl BinaryEncode for ExpandedNodeId {
    fn encode_binary(&self, sink: &mut ByteSink, limits: &EncodingLimits) -> UaResult<()> {
        self.node_id.encode_with_flags(self.flags(), sink, limits)?;
        if let Some(uri) = self.namespace_uri.as_deref() {
            write_string(sink, Some(uri), limits)?;
        }
        if self.server_index != 0 {
            sink.write_u32(self.server_index)?;
        }
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        self.node_id.encoded_len()
            + self.namespace_uri.as_deref().map_or(0, |uri| string_len(Some(uri)))
            + if self.server_index != 0 { 4 } else { 0 }
    }
}

impl BinaryDecode for ExpandedNodeId {
    fn decode_binary(src: &mut ByteCursor<'_>, limits: &EncodingLimits) -> UaResult<Self> {
        let encoding = src.read_u8()?;
        let node_id = NodeId::decode_body(encoding, src, limits)?;

        let namespace_uri = if encoding & FLAG_NAMESPACE_URI != 0 {
            Some(Cow::Owned(read_string(src, limits)?.unwrap_or_default()))
        } else {
            None
        };
        let server_index = if encoding & FLAG_SERVER_INDEX != 0 {
            src.read_u32()?
        } else {
            0
        };

        Ok(Self {
            node_id,
            namespace_uri,
            server_index,
        })
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        match &self.namespace_uri {
            Some(uri) => write!(f, "nsu={};{}", uri, self.node_id.identifier),
            None => write!(f, "{}", self.node_id),
        }
    }
}

impl FromStr for ExpandedNodeId {
    type Err = UaError;

    /// Parses `[svr=<n>;][nsu=<uri>;|ns=<n>;]<identifier>`.
    ///
    /// The URI ends at the first `;` followed by an identifier prefix, so
    /// URIs may contain `;` themselves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s;
        let mut server_index = 0;

        if let Some(after) = rest.strip_prefix("svr=") {
            let (svr, tail) = after
                .split_once(';')
                .ok_or_else(|| UaError::decoding(format!("invalid ExpandedNodeId {s:?}")))?;
            server_index = svr
                .parse()
                .map_err(|_| UaError::decoding(format!("invalid server index in {s:?}")))?;
            rest = tail;
        }

        if let Some(after) = rest.strip_prefix("nsu=") {
            let (uri, id) = split_namespace_uri(after)
                .ok_or_else(|| UaError::decoding(format!("invalid ExpandedNodeId {s:?}")))?;
            return Ok(Self {
                node_id: NodeId {
                    namespace: 0,
                    identifier: id.parse()?,
                },
                namespace_uri: Some(Cow::Owned(uri.to_owned())),
                server_index,
            });
        }

        Ok(Self {
            node_id: rest.parse()?,
            namespace_uri: None,
            server_index,
        })
    }
}

/// Split `<uri>;<identifier>` at the first `;` that starts an identifier.
fn split_namespace_uri(text: &str) -> Option<(&str, &str)> {
    text.match_indices(';').find_map(|(pos, _)| {
        let id = &text[pos + 1..];
        ["i=", "s=", "g=", "b="]
            .iter()
            .any(|prefix| id.starts_with(prefix))
            .then(|| (&text[..pos], id))
    })
}
