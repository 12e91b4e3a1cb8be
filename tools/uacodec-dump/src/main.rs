// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! uacodec-dump - inspect OPC UA structured values
//!
//! Decodes binary-encoded structures (raw or hex text) and prints them as
//! Rust debug output or JSON, or re-encodes JSON into binary hex.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use uacodec::core::ser::BinaryDecoder;
use uacodec::{
    Argument, CodecRegistry, DynStructure, EncodingLimits, Node, ReferenceNode, UaDecoder,
    UaStructure,
};

#[derive(Parser)]
#[command(name = "uacodec-dump")]
#[command(about = "Decode and encode OPC UA structured values")]
#[command(version)]
struct Cli {
    /// YAML file overriding the encoding limits (defaults: UACODEC_* env)
    #[arg(long, value_name = "FILE", global = true)]
    limits: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a binary structure and print it
    Decode {
        /// Input file, `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        /// Input is hex text rather than raw bytes
        #[arg(long)]
        hex: bool,

        /// Structure expected at the start of the input
        #[arg(long = "as", value_enum, default_value = "extension-object")]
        kind: Kind,

        /// Output format
        #[arg(short, long, value_enum, default_value = "debug")]
        format: OutputFormat,
    },

    /// Encode a JSON structure and print its binary form as hex
    Encode {
        /// Input JSON file, `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        /// Structure held by the JSON document
        #[arg(long = "as", value_enum)]
        kind: Kind,
    },

    /// List the registered structure types and their encoding ids
    Types,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Node,
    ReferenceNode,
    Argument,
    /// Type id + body, dispatched through the registry
    ExtensionObject,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Debug,
    Json,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let limits = load_limits(cli.limits.as_deref())?;

    match cli.command {
        Commands::Decode {
            input,
            hex,
            kind,
            format,
        } => cmd_decode(&input, hex, kind, format, &limits),
        Commands::Encode { input, kind } => cmd_encode(&input, kind, &limits),
        Commands::Types => cmd_types(),
    }
}

fn load_limits(path: Option<&Path>) -> anyhow::Result<EncodingLimits> {
    let Some(path) = path else {
        return Ok(EncodingLimits::from_env());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read limits file {}", path.display()))?;
    let limits: EncodingLimits = serde_yaml::from_str(&text)
        .with_context(|| format!("Invalid limits file {}", path.display()))?;
    log::debug!("[dump] limits from {}: {:?}", path.display(), limits);
    Ok(limits)
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn parse_hex(raw: &[u8]) -> anyhow::Result<Vec<u8>> {
    let text = std::str::from_utf8(raw).context("Hex input is not UTF-8")?;
    let digits: String = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|tok| tok.trim_start_matches("0x"))
        .collect();
    hex::decode(&digits).context("Invalid hex input")
}

fn cmd_decode(
    input: &Path,
    is_hex: bool,
    kind: Kind,
    format: OutputFormat,
    limits: &EncodingLimits,
) -> anyhow::Result<()> {
    let raw = read_input(input)?;
    let bytes = if is_hex { parse_hex(&raw)? } else { raw };
    let mut decoder = BinaryDecoder::new(&bytes, *limits);

    let value: Box<dyn DynStructure> = match kind {
        Kind::Node => Box::new(Node::decode(&mut decoder)?),
        Kind::ReferenceNode => Box::new(ReferenceNode::decode(&mut decoder)?),
        Kind::Argument => Box::new(Argument::decode(&mut decoder)?),
        Kind::ExtensionObject => {
            let object = decoder.read_extension_object("Body")?;
            eprintln!("type id: {}", object.type_id);
            object
                .decode(CodecRegistry::global(), limits)
                .with_context(|| format!("Cannot decode body of {}", object.type_id))?
        }
    };

    if !decoder.is_eof() {
        eprintln!(
            "warning: {} trailing bytes after {} (consumed {})",
            decoder.remaining(),
            value.type_name(),
            decoder.position()
        );
    }

    match format {
        OutputFormat::Debug => println!("{value:#?}"),
        OutputFormat::Json => {
            let json = uacodec::to_json(value.as_ref(), limits)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

fn cmd_encode(input: &Path, kind: Kind, limits: &EncodingLimits) -> anyhow::Result<()> {
    let raw = read_input(input)?;
    let text = std::str::from_utf8(&raw).context("JSON input is not UTF-8")?;

    let bytes = match kind {
        Kind::Node => encode_json::<Node>(text, limits)?,
        Kind::ReferenceNode => encode_json::<ReferenceNode>(text, limits)?,
        Kind::Argument => encode_json::<Argument>(text, limits)?,
        Kind::ExtensionObject => {
            bail!("Encode needs a concrete type: node, reference-node or argument")
        }
    };
    println!("{}", hex::encode(bytes));
    Ok(())
}

fn encode_json<T: UaStructure>(text: &str, limits: &EncodingLimits) -> anyhow::Result<Vec<u8>> {
    let value: T = uacodec::from_json_str(text, limits)
        .with_context(|| format!("Input is not a valid {}", T::NAME))?;
    Ok(uacodec::to_binary(&value, limits)?)
}

fn cmd_types() -> anyhow::Result<()> {
    let registry = CodecRegistry::global();
    let mut codecs: Vec<_> = registry.codecs().collect();
    codecs.sort_by_key(|codec| codec.type_name());

    for codec in codecs {
        let identity = codec.identity();
        println!(
            "{:<16} type={} binary={} xml={} json={}",
            codec.type_name(),
            identity.type_id,
            identity.binary_encoding_id,
            identity.xml_encoding_id,
            identity.json_encoding_id
        );
    }
    Ok(())
}
