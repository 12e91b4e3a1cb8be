// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use uacodec::core::ser::BinaryDecoder;
use uacodec::{CodecRegistry, EncodingLimits, UaDecoder};

fuzz_target!(|data: &[u8]| {
    // Small limits keep hostile counts cheap.
    let limits = EncodingLimits::default()
        .with_max_array_length(1024)
        .with_max_string_length(4096);

    let mut decoder = BinaryDecoder::new(data, limits);
    if let Ok(object) = decoder.read_extension_object("Body") {
        let _ = object.decode(CodecRegistry::global(), &limits);
    }
});
