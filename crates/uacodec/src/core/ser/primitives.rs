// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary helpers for length-prefixed values (String, ByteString, counts).
//!
//! Every length-prefixed value starts with an Int32; `-1` marks a null value.

use super::cursor::{ByteCursor, ByteSink};
use crate::config::{EncodingLimits, NULL_LENGTH};
use crate::error::{UaError, UaResult};

/// Convert an in-memory length to the Int32 wire prefix, enforcing `max`.
pub(crate) fn length_prefix(len: usize, max: usize, what: &str) -> UaResult<i32> {
    if len > max {
        return Err(UaError::encoding(format!(
            "{what} length {len} exceeds limit {max}"
        )));
    }
    i32::try_from(len)
        .map_err(|_| UaError::encoding(format!("{what} length {len} exceeds Int32")))
}

/// Read an Int32 length prefix. `None` means null (any negative value).
pub(crate) fn read_length(
    src: &mut ByteCursor<'_>,
    max: usize,
    what: &str,
) -> UaResult<Option<usize>> {
    let raw = src.read_i32()?;
    if raw < 0 {
        return Ok(None);
    }
    let len = usize::try_from(raw)
        .map_err(|_| UaError::decoding(format!("{what} length {raw} exceeds platform capacity")))?;
    if len > max {
        return Err(UaError::decoding(format!(
            "{what} length {len} exceeds limit {max}"
        )));
    }
    Ok(Some(len))
}

pub(crate) fn write_byte_string(
    sink: &mut ByteSink,
    value: Option<&[u8]>,
    limits: &EncodingLimits,
) -> UaResult<()> {
    match value {
        None => sink.write_i32(NULL_LENGTH),
        Some(bytes) => {
            let len = length_prefix(bytes.len(), limits.max_string_length, "byte string")?;
            sink.write_i32(len)?;
            sink.write_bytes(bytes)
        }
    }
}

pub(crate) fn read_byte_string(
    src: &mut ByteCursor<'_>,
    limits: &EncodingLimits,
) -> UaResult<Option<Vec<u8>>> {
    match read_length(src, limits.max_string_length, "byte string")? {
        None => Ok(None),
        Some(len) => Ok(Some(src.read_bytes(len)?.to_vec())),
    }
}

pub(crate) fn write_string(
    sink: &mut ByteSink,
    value: Option<&str>,
    limits: &EncodingLimits,
) -> UaResult<()> {
    write_byte_string(sink, value.map(str::as_bytes), limits)
}

pub(crate) fn read_string(
    src: &mut ByteCursor<'_>,
    limits: &EncodingLimits,
) -> UaResult<Option<String>> {
    let offset = src.offset();
    match read_length(src, limits.max_string_length, "string")? {
        None => Ok(None),
        Some(len) => {
            let bytes = src.read_bytes(len)?;
            let text = std::str::from_utf8(bytes).map_err(|e| {
                UaError::decoding(format!("invalid UTF-8 in string at offset {offset}: {e}"))
            })?;
            Ok(Some(text.to_owned()))
        }
    }
}

/// Encoded size of a String / ByteString (4-byte prefix plus payload).
pub(crate) fn byte_string_len(value: Option<&[u8]>) -> usize {
    4 + value.map_or(0, <[u8]>::len)
}

pub(crate) fn string_len(value: Option<&str>) -> usize {
    byte_string_len(value.map(str::as_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_str(value: Option<&str>) -> Vec<u8> {
        let mut sink = ByteSink::new(usize::MAX);
        write_string(&mut sink, value, &EncodingLimits::default()).expect("encode");
        sink.into_bytes()
    }

    #[test]
    fn test_null_and_empty_strings_differ() {
        assert_eq!(encode_str(None), vec![0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(encode_str(Some("")), vec![0, 0, 0, 0]);

        let limits = EncodingLimits::default();
        let null = encode_str(None);
        assert_eq!(
            read_string(&mut ByteCursor::new(&null), &limits).expect("decode"),
            None
        );
        let empty = encode_str(Some(""));
        assert_eq!(
            read_string(&mut ByteCursor::new(&empty), &limits).expect("decode"),
            Some(String::new())
        );
    }

    #[test]
    fn test_string_layout() {
        assert_eq!(encode_str(Some("Root")), b"\x04\x00\x00\x00Root".to_vec());
        assert_eq!(string_len(Some("Root")), 8);
        assert_eq!(string_len(None), 4);
    }

    #[test]
    fn test_string_over_limit_rejected_both_ways() {
        let limits = EncodingLimits::default().with_max_string_length(3);
        let mut sink = ByteSink::new(usize::MAX);
        assert!(matches!(
            write_string(&mut sink, Some("abcd"), &limits),
            Err(UaError::Encoding { .. })
        ));

        let bytes = encode_str(Some("abcd"));
        assert!(matches!(
            read_string(&mut ByteCursor::new(&bytes), &limits),
            Err(UaError::Decoding { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let bytes = [2, 0, 0, 0, 0xC3, 0x28];
        let err = read_string(&mut ByteCursor::new(&bytes), &EncodingLimits::default())
            .unwrap_err();
        assert!(err.is_decoding());
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let bytes = [10, 0, 0, 0, b'a', b'b'];
        let err = read_byte_string(&mut ByteCursor::new(&bytes), &EncodingLimits::default())
            .unwrap_err();
        assert!(err.is_decoding());
    }
}
