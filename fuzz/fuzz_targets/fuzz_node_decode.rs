// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use uacodec::{from_binary, to_binary, Argument, EncodingLimits, Node};

fuzz_target!(|data: &[u8]| {
    let limits = EncodingLimits::default();

    // Anything that decodes must re-encode to a value that decodes equal.
    if let Ok(node) = from_binary::<Node>(data, &limits) {
        let bytes = to_binary(&node, &limits).expect("decoded node re-encodes");
        let again = from_binary::<Node>(&bytes, &limits).expect("re-encoded node decodes");
        assert_eq!(again, node);
    }

    let _ = from_binary::<Argument>(data, &limits);
});
