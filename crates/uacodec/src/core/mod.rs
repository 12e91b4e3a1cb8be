// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Core Codec Components
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `ser` | Byte cursor, field interface, binary and JSON back-ends |
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------------------+
//! |              Structure codecs (structured)          |
//! |     Node / ReferenceNode / Argument / registry      |
//! +-----------------------------------------------------+
//! |             UaEncoder / UaDecoder (ser)             |
//! |  +----------------------+ +----------------------+  |
//! |  | BinaryEncoder/Decoder| |  JsonEncoder/Decoder |  |
//! |  +----------------------+ +----------------------+  |
//! +-----------------------------------------------------+
//! |       Built-in types (types) + ByteCursor/Sink      |
//! +-----------------------------------------------------+
//! ```

pub mod ser;
