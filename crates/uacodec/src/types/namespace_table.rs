// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ordered namespace URI table; index 0 is always the core namespace.

use crate::config::OPC_UA_NAMESPACE_URI;
use crate::error::{UaError, UaResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    uris: Vec<String>,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self {
            uris: vec![OPC_UA_NAMESPACE_URI.to_owned()],
        }
    }

    /// Append `uri` if missing and return its index.
    pub fn add(&mut self, uri: &str) -> UaResult<u16> {
        if let Some(index) = self.index_of(uri) {
            return Ok(index);
        }
        let index = u16::try_from(self.uris.len())
            .map_err(|_| UaError::encoding("namespace table is full"))?;
        self.uris.push(uri.to_owned());
        Ok(index)
    }

    pub fn index_of(&self, uri: &str) -> Option<u16> {
        self.uris
            .iter()
            .position(|u| u == uri)
            .and_then(|i| u16::try_from(i).ok())
    }

    pub fn uri(&self, index: u16) -> Option<&str> {
        self.uris.get(usize::from(index)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().map(String::as_str)
    }
}
