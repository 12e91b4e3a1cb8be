// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! NodeClass enumeration and the shared enumeration contract.

use std::fmt;

use crate::core::ser::{UaDecoder, UaEncoder};
use crate::error::{UaError, UaResult};

/// Enumerated type transported as Int32.
pub trait UaEnumeration: Sized + Copy {
    const NAME: &'static str;

    fn value(self) -> i32;

    fn from_value(value: i32) -> Option<Self>;
}

pub fn write_enumeration<E: UaEnumeration>(
    encoder: &mut dyn UaEncoder,
    field: &str,
    value: E,
) -> UaResult<()> {
    encoder.write_enumeration(field, value.value())
}

/// Read an enumeration; wire values without a variant are a decoding error.
pub fn read_enumeration<E: UaEnumeration>(decoder: &mut dyn UaDecoder, field: &str) -> UaResult<E> {
    let raw = decoder.read_enumeration(field)?;
    E::from_value(raw)
        .ok_or_else(|| UaError::decoding(format!("invalid {} value {raw} for {field}", E::NAME)))
}

/// Class of a node in the address space (bit values, one per class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum NodeClass {
    #[default]
    Unspecified = 0,
    Object = 1,
    Variable = 2,
    Method = 4,
    ObjectType = 8,
    VariableType = 16,
    ReferenceType = 32,
    DataType = 64,
    View = 128,
}

impl NodeClass {
    pub const ALL: [NodeClass; 9] = [
        NodeClass::Unspecified,
        NodeClass::Object,
        NodeClass::Variable,
        NodeClass::Method,
        NodeClass::ObjectType,
        NodeClass::VariableType,
        NodeClass::ReferenceType,
        NodeClass::DataType,
        NodeClass::View,
    ];
}

impl UaEnumeration for NodeClass {
    const NAME: &'static str = "NodeClass";

    fn value(self) -> i32 {
        self as i32
    }

    fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(NodeClass::Unspecified),
            1 => Some(NodeClass::Object),
            2 => Some(NodeClass::Variable),
            4 => Some(NodeClass::Method),
            8 => Some(NodeClass::ObjectType),
            16 => Some(NodeClass::VariableType),
            32 => Some(NodeClass::ReferenceType),
            64 => Some(NodeClass::DataType),
            128 => Some(NodeClass::View),
            _ => None,
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_roundtrip() {
        for class in NodeClass::ALL {
            assert_eq!(NodeClass::from_value(class.value()), Some(class));
        }
        assert_eq!(NodeClass::View.value(), 128);
    }

    #[test]
    fn test_unknown_values() {
        for raw in [3, 5, 129, 256, -1, i32::MAX, i32::MIN] {
            assert_eq!(NodeClass::from_value(raw), None, "{raw}");
        }
    }
}
