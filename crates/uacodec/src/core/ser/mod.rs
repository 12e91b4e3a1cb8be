// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire serialization: byte cursor, field interface, and the binary and JSON
//! back-ends.

pub mod binary;
pub mod cursor;
#[cfg(feature = "json")]
pub mod json;
pub(crate) mod primitives;
pub mod traits;

pub use binary::{from_binary, to_binary, BinaryDecoder, BinaryEncoder};
pub use cursor::{ByteCursor, ByteSink};
#[cfg(feature = "json")]
pub use json::{from_json, from_json_str, to_json, to_json_string, JsonDecoder, JsonEncoder};
pub use traits::{BinaryDecode, BinaryEncode, UaDecoder, UaEncoder};
