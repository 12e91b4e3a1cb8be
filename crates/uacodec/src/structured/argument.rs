// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Argument - declaration of one method input or output.

use super::array::{decode_array, encode_array};
use super::identity::TypeIdentity;
use super::UaStructure;
use crate::core::ser::{UaDecoder, UaEncoder};
use crate::error::UaResult;
use crate::types::{LocalizedText, NodeId};

static ARGUMENT_IDENTITY: TypeIdentity = TypeIdentity::core(296, 298, 297, 15081);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Argument {
    pub name: Option<String>,
    pub data_type: NodeId,
    /// See the `VALUE_RANK_*` constants; positive values are a dimension count.
    pub value_rank: i32,
    pub array_dimensions: Option<Vec<u32>>,
    pub description: LocalizedText,
}

impl Argument {
    pub const VALUE_RANK_SCALAR_OR_ONE_DIMENSION: i32 = -3;
    pub const VALUE_RANK_ANY: i32 = -2;
    pub const VALUE_RANK_SCALAR: i32 = -1;
    pub const VALUE_RANK_ONE_OR_MORE_DIMENSIONS: i32 = 0;
}

impl UaStructure for Argument {
    const NAME: &'static str = "Argument";

    fn identity() -> &'static TypeIdentity {
        &ARGUMENT_IDENTITY
    }

    fn encode(&self, encoder: &mut dyn UaEncoder) -> UaResult<()> {
        encoder.write_string("Name", self.name.as_deref())?;
        encoder.write_node_id("DataType", &self.data_type)?;
        encoder.write_int32("ValueRank", self.value_rank)?;
        encode_array(
            encoder,
            "ArrayDimensions",
            self.array_dimensions.as_deref(),
            |encoder, dim| encoder.write_uint32("ArrayDimensions", *dim),
        )?;
        encoder.write_localized_text("Description", &self.description)
    }

    fn decode(decoder: &mut dyn UaDecoder) -> UaResult<Self> {
        Ok(Self {
            name: decoder.read_string("Name")?,
            data_type: decoder.read_node_id("DataType")?,
            value_rank: decoder.read_int32("ValueRank")?,
            array_dimensions: decode_array(decoder, "ArrayDimensions", |decoder| {
                decoder.read_uint32("ArrayDimensions")
            })?,
            description: decoder.read_localized_text("Description")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodingLimits;
    use crate::core::ser::{from_binary, to_binary};

    #[test]
    fn test_matrix_argument_roundtrip() {
        let argument = Argument {
            name: Some("Setpoints".into()),
            data_type: NodeId::numeric(0, 11),
            value_rank: 2,
            array_dimensions: Some(vec![3, 4]),
            description: LocalizedText::english("Target matrix"),
        };
        let limits = EncodingLimits::default();
        let bytes = to_binary(&argument, &limits).expect("encode");
        assert_eq!(from_binary::<Argument>(&bytes, &limits).expect("decode"), argument);
    }

    #[test]
    fn test_null_name_and_dimensions() {
        let argument = Argument {
            value_rank: Argument::VALUE_RANK_SCALAR,
            ..Argument::default()
        };
        let limits = EncodingLimits::default();
        let bytes = to_binary(&argument, &limits).expect("encode");
        // name -1, NodeId i=0, rank -1, dims -1, empty text
        assert_eq!(
            bytes,
            vec![
                0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00
            ]
        );
        let decoded = from_binary::<Argument>(&bytes, &limits).expect("decode");
        assert_eq!(decoded.name, None);
        assert_eq!(decoded.array_dimensions, None);
    }
}
