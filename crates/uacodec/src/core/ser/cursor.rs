// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounds-checked little-endian read cursor and growable write sink.
//!
//! The binary encoding has no alignment or padding: values are packed
//! back-to-back in little-endian byte order.

use crate::error::{UaError, UaResult};

/// Generate read methods for primitive types.
///
/// Each generated method checks bounds (failing with a decoding error that
/// reports the offset), reads N bytes, and advances the offset.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> UaResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Generate write methods for primitive types.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) -> UaResult<()> {
            self.write_bytes(&value.to_le_bytes())
        }
    };
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_i16, i16, 2);
    impl_read_le!(read_u16, u16, 2);
    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_i64, i64, 8);
    impl_read_le!(read_u64, u64, 8);
    impl_read_le!(read_f32, f32, 4);
    impl_read_le!(read_f64, f64, 8);

    pub fn read_bytes(&mut self, len: usize) -> UaResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.buffer.len())
            .ok_or_else(|| {
                UaError::decoding(format!(
                    "unexpected end of buffer at offset {} (need {} bytes, {} remaining)",
                    self.offset,
                    len,
                    self.remaining()
                ))
            })?;
        let slice = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

/// Growable write sink bounded by a maximum message size.
pub struct ByteSink {
    buffer: Vec<u8>,
    max_len: usize,
}

impl ByteSink {
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: Vec::new(),
            max_len,
        }
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_i16, i16);
    impl_write_le!(write_u16, u16);
    impl_write_le!(write_i32, i32);
    impl_write_le!(write_u32, u32);
    impl_write_le!(write_i64, i64);
    impl_write_le!(write_u64, u64);
    impl_write_le!(write_f32, f32);
    impl_write_le!(write_f64, f64);

    pub fn write_bytes(&mut self, data: &[u8]) -> UaResult<()> {
        if self.buffer.len() + data.len() > self.max_len {
            return Err(UaError::encoding(format!(
                "message size {} exceeds limit {}",
                self.buffer.len() + data.len(),
                self.max_len
            )));
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_U16: u16 = 0xCDEF;
    const TEST_U32: u32 = 0x1234_5678;
    const TEST_U64: u64 = 0x1122_3344_5566_7788;

    #[test]
    fn test_cursor_read_overflow_reports_offset() {
        let buffer = [0u8; 1];
        let mut cursor = ByteCursor::new(&buffer);
        assert_eq!(cursor.read_u8().expect("read u8"), 0);

        let err = cursor.read_u32().unwrap_err();
        match err {
            UaError::Decoding { reason } => {
                assert!(reason.contains("offset 1"), "{reason}");
                assert!(reason.contains("need 4 bytes"), "{reason}");
            }
            other => panic!("unexpected error {:?}", other),
        }
        // Failed reads do not advance.
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_sink_respects_max_len() {
        let mut sink = ByteSink::new(6);
        sink.write_u32(1).expect("fits");
        let err = sink.write_u32(2).unwrap_err();
        assert!(matches!(err, UaError::Encoding { .. }));
        assert_eq!(sink.offset(), 4);
    }

    #[test]
    fn test_roundtrip_across_numeric_types() {
        let mut sink = ByteSink::new(usize::MAX);
        sink.write_u8(0xAB).expect("u8");
        sink.write_u16(TEST_U16).expect("u16");
        sink.write_u32(TEST_U32).expect("u32");
        sink.write_u64(TEST_U64).expect("u64");
        sink.write_i16(-7).expect("i16");
        sink.write_i32(-42).expect("i32");
        sink.write_i64(i64::MIN).expect("i64");
        sink.write_f32(1.5).expect("f32");
        sink.write_f64(6.25).expect("f64");
        sink.write_bytes(&[1, 2, 3]).expect("bytes");
        let bytes = sink.into_bytes();
        assert_eq!(bytes.len(), 1 + 2 + 4 + 8 + 2 + 4 + 8 + 4 + 8 + 3);

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_u8().expect("u8"), 0xAB);
        assert_eq!(cursor.read_u16().expect("u16"), TEST_U16);
        assert_eq!(cursor.read_u32().expect("u32"), TEST_U32);
        assert_eq!(cursor.read_u64().expect("u64"), TEST_U64);
        assert_eq!(cursor.read_i16().expect("i16"), -7);
        assert_eq!(cursor.read_i32().expect("i32"), -42);
        assert_eq!(cursor.read_i64().expect("i64"), i64::MIN);
        assert!((cursor.read_f32().expect("f32") - 1.5).abs() < f32::EPSILON);
        assert!((cursor.read_f64().expect("f64") - 6.25).abs() < f64::EPSILON);
        assert_eq!(cursor.read_bytes(3).expect("bytes"), &[1, 2, 3]);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_little_endian_layout() {
        let mut sink = ByteSink::new(16);
        sink.write_i32(-1).expect("i32");
        sink.write_u16(0x0102).expect("u16");
        assert_eq!(sink.as_bytes(), &[0xFF, 0xFF, 0xFF, 0xFF, 0x02, 0x01]);
    }

    #[test]
    fn test_read_bytes_huge_len_does_not_overflow() {
        let buffer = [0u8; 4];
        let mut cursor = ByteCursor::new(&buffer);
        cursor.read_u8().expect("u8");
        assert!(cursor.read_bytes(usize::MAX).is_err());
        assert_eq!(cursor.remaining(), 3);
    }
}
