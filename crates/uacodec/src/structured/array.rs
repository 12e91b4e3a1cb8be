// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Homogeneous array combinator.
//!
//! An array is framed by the back-end (`begin_array` / `end_array`); on the
//! binary wire that is a signed 32-bit count where any negative value marks
//! the absent array. Elements follow in order, each through the element
//! codec handed to the combinator.
//!
//! Absent and empty stay distinct: `None` encodes `-1`, `Some(&[])` encodes
//! `0`.
//!
//! # Examples
//!
//! ```
//! use uacodec::core::ser::{BinaryDecoder, BinaryEncoder, UaDecoder, UaEncoder};
//! use uacodec::structured::{decode_array, encode_array};
//! use uacodec::EncodingLimits;
//!
//! let limits = EncodingLimits::default();
//! let mut encoder = BinaryEncoder::new(limits);
//! encode_array(&mut encoder, "Dims", Some(&[2u32, 3][..]), |e, v| e.write_uint32("", *v))?;
//! let bytes = encoder.into_bytes();
//! assert_eq!(bytes, [2, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0]);
//!
//! let mut decoder = BinaryDecoder::new(&bytes, limits);
//! let dims = decode_array(&mut decoder, "Dims", |d| d.read_uint32(""))?;
//! assert_eq!(dims, Some(vec![2, 3]));
//! # Ok::<(), uacodec::UaError>(())
//! ```

use super::registry::DataTypeCodec;
use super::{decode_nested, encode_nested, DynStructure, UaStructure};
use crate::core::ser::{UaDecoder, UaEncoder};
use crate::error::UaResult;

/// Encode an optional slice through `encode_element`.
pub fn encode_array<T, F>(
    encoder: &mut dyn UaEncoder,
    field: &str,
    values: Option<&[T]>,
    mut encode_element: F,
) -> UaResult<()>
where
    F: FnMut(&mut dyn UaEncoder, &T) -> UaResult<()>,
{
    encoder.begin_array(field, values.map(<[T]>::len))?;
    for value in values.unwrap_or_default() {
        encode_element(encoder, value)?;
    }
    encoder.end_array()
}

/// Decode an optional array through `decode_element`.
///
/// The first element failure aborts the whole array. Preallocation is
/// capped by what the decoder can still deliver, never by the wire count
/// alone.
pub fn decode_array<T, F>(
    decoder: &mut dyn UaDecoder,
    field: &str,
    mut decode_element: F,
) -> UaResult<Option<Vec<T>>>
where
    F: FnMut(&mut dyn UaDecoder) -> UaResult<T>,
{
    let Some(len) = decoder.begin_array(field)? else {
        decoder.end_array()?;
        return Ok(None);
    };

    let mut values = Vec::with_capacity(len.min(decoder.remaining_hint()));
    for _ in 0..len {
        values.push(decode_element(decoder)?);
    }
    decoder.end_array()?;
    Ok(Some(values))
}

/// Array of a statically known structure type.
pub fn encode_struct_array<T: UaStructure>(
    encoder: &mut dyn UaEncoder,
    field: &str,
    values: Option<&[T]>,
) -> UaResult<()> {
    encode_array(encoder, field, values, |encoder, value| {
        encode_nested(encoder, T::NAME, value)
    })
}

pub fn decode_struct_array<T: UaStructure>(
    decoder: &mut dyn UaDecoder,
    field: &str,
) -> UaResult<Option<Vec<T>>> {
    decode_array(decoder, field, |decoder| decode_nested::<T>(decoder, T::NAME))
}

/// Array whose element codec was resolved at runtime (e.g. from the registry).
pub fn encode_struct_array_with(
    encoder: &mut dyn UaEncoder,
    field: &str,
    values: Option<&[Box<dyn DynStructure>]>,
    codec: &dyn DataTypeCodec,
) -> UaResult<()> {
    encode_array(encoder, field, values, |encoder, value| {
        encoder.begin_structure(codec.type_name())?;
        codec.encode(encoder, value.as_ref())?;
        encoder.end_structure()
    })
}

pub fn decode_struct_array_with(
    decoder: &mut dyn UaDecoder,
    field: &str,
    codec: &dyn DataTypeCodec,
) -> UaResult<Option<Vec<Box<dyn DynStructure>>>> {
    decode_array(decoder, field, |decoder| {
        decoder.begin_structure(codec.type_name())?;
        let value = codec.decode(decoder)?;
        decoder.end_structure()?;
        Ok(value)
    })
}
