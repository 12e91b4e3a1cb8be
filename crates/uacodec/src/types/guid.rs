// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! 16-byte Guid (UInt32, UInt16, UInt16, 8 bytes on the wire).

use std::fmt;
use std::str::FromStr;

use crate::config::EncodingLimits;
use crate::core::ser::{BinaryDecode, BinaryEncode, ByteCursor, ByteSink};
use crate::error::{UaError, UaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    pub const NULL: Guid = Guid {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl FromStr for Guid {
    type Err = UaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UaError::decoding(format!("invalid guid {s:?}"));

        let parts: Vec<&str> = s.split('-').collect();
        let lens: Vec<usize> = parts.iter().map(|p| p.len()).collect();
        if lens != [8, 4, 4, 4, 12] {
            return Err(invalid());
        }
        // from_str_radix alone would let a sign through.
        if !parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_hexdigit())) {
            return Err(invalid());
        }

        let data1 = u32::from_str_radix(parts[0], 16).map_err(|_| invalid())?;
        let data2 = u16::from_str_radix(parts[1], 16).map_err(|_| invalid())?;
        let data3 = u16::from_str_radix(parts[2], 16).map_err(|_| invalid())?;

        let tail = hex::decode(format!("{}{}", parts[3], parts[4])).map_err(|_| invalid())?;
        let data4: [u8; 8] = tail.try_into().map_err(|_| invalid())?;

        Ok(Guid::new(data1, data2, data3, data4))
    }
}

impl BinaryEncode for Guid {
    fn encode_binary(&self, sink: &mut ByteSink, _limits: &EncodingLimits) -> UaResult<()> {
        sink.write_u32(self.data1)?;
        sink.write_u16(self.data2)?;
        sink.write_u16(self.data3)?;
        sink.write_bytes(&self.data4)
    }

    fn encoded_len(&self) -> usize {
        16
    }
}

impl BinaryDecode for Guid {
    fn decode_binary(src: &mut ByteCursor<'_>, _limits: &EncodingLimits) -> UaResult<Self> {
        let data1 = src.read_u32()?;
        let data2 = src.read_u16()?;
        let data3 = src.read_u16()?;
        let mut data4 = [0u8; 8];
        data4.copy_from_slice(src.read_bytes(8)?);
        Ok(Guid::new(data1, data2, data3, data4))
    }
}
