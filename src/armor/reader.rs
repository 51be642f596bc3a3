use std::hash::Hasher;
use std::str;

use base64::engine::{general_purpose::STANDARD, Engine as _};
use log::debug;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{map, map_res, opt, value},
    sequence::{delimited, pair, preceded},
    IResult, Parser,
};

use crate::armor::{BlockType, Headers};
use crate::errors::{Error, Result};

/// A single dearmored block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorBlock {
    pub typ: BlockType,
    pub headers: Headers,
    pub data: Vec<u8>,
}

/// Parses the type inside of an ascii armor header.
fn armor_header_type(i: &str) -> IResult<&str, BlockType> {
    alt((
        value(BlockType::PublicKey, tag("PGP PUBLIC KEY BLOCK")),
        value(BlockType::PrivateKey, tag("PGP PRIVATE KEY BLOCK")),
        map(
            preceded(
                tag("PGP MESSAGE, PART "),
                pair(
                    map_res(digit1, str::parse::<usize>),
                    opt(preceded(tag("/"), map_res(digit1, str::parse::<usize>))),
                ),
            ),
            |(x, y)| BlockType::MultiPartMessage(x, y.unwrap_or(0)),
        ),
        value(BlockType::Message, tag("PGP MESSAGE")),
        value(BlockType::Signature, tag("PGP SIGNATURE")),
        value(BlockType::File, tag("PGP ARMORED FILE")),
        value(BlockType::CleartextMessage, tag("PGP SIGNED MESSAGE")),
    ))
    .parse(i)
}

/// Parses a single armor header line.
fn armor_header_line(i: &str) -> IResult<&str, BlockType> {
    delimited(tag("-----BEGIN "), armor_header_type, tag("-----")).parse(i)
}

/// Parses a single armor footer line.
fn armor_footer_line(i: &str) -> IResult<&str, BlockType> {
    delimited(tag("-----END "), armor_header_type, tag("-----")).parse(i)
}

/// Runs `parser` over a whole line, failing on leftovers.
fn full_line(
    line: &str,
    parser: fn(&str) -> IResult<&str, BlockType>,
) -> Result<BlockType> {
    match parser(line) {
        Ok(("", typ)) => Ok(typ),
        _ => Err(Error::InvalidArmorWrappers),
    }
}

/// Parses a single `Key: Value` armor header.
fn key_value_pair(line: &str) -> Option<(&str, &str)> {
    if let Some((key, value)) = line.split_once(": ") {
        if !key.is_empty() {
            return Some((key, value));
        }
    }
    // empty value
    line.strip_suffix(':')
        .filter(|key| !key.is_empty() && !key.contains(' '))
        .map(|key| (key, ""))
}

/// Read the checksum from an base64 encoded buffer.
fn read_checksum(input: &str) -> Result<u32> {
    let checksum = STANDARD.decode(input)?;
    if checksum.len() != 3 {
        return Err(Error::InvalidChecksum);
    }

    Ok(u32::from(checksum[0]) << 16 | u32::from(checksum[1]) << 8 | u32::from(checksum[2]))
}

fn crc24(data: &[u8]) -> u32 {
    let mut hasher = crc24::Crc24Hasher::new();
    hasher.write(data);
    hasher.finish() as u32
}

/// Parses every armored block found in `input`, in order.
///
/// Text before, between and after blocks is ignored. A block must close with
/// a footer of the same type, and a present CRC24 checksum must match.
pub fn parse_blocks(input: &str) -> Result<Vec<ArmorBlock>> {
    let mut blocks = Vec::new();
    let mut lines = input.lines().map(str::trim_end);

    while let Some(line) = lines.next() {
        if !line.starts_with("-----BEGIN ") {
            continue;
        }

        let typ = full_line(line, armor_header_line)?;
        if typ == BlockType::CleartextMessage {
            unsupported_err!("cleartext signed messages carry no armored payload");
        }

        // Armor Headers, terminated by a blank line
        let mut headers = Headers::new();
        let mut body = String::new();
        loop {
            let line = lines.next().ok_or(Error::InvalidArmorWrappers)?;
            if line.trim().is_empty() {
                break;
            }
            match key_value_pair(line) {
                Some((key, value)) => headers
                    .entry(key.to_string())
                    .or_default()
                    .push(value.to_string()),
                None => {
                    // no blank line, this is already the body
                    body.push_str(line.trim());
                    break;
                }
            }
        }

        // Body, optional checksum, footer
        let mut checksum = None;
        loop {
            let line = lines.next().ok_or(Error::InvalidArmorWrappers)?.trim();
            if line.starts_with("-----") {
                let footer = full_line(line, armor_footer_line)?;
                if footer != typ {
                    bail!(
                        "armor ascii footer does not match header: {:?} != {:?}",
                        typ,
                        footer
                    );
                }
                break;
            }
            if let Some(crc) = line.strip_prefix('=') {
                checksum = Some(read_checksum(crc)?);
                continue;
            }
            body.push_str(line);
        }

        let data = STANDARD.decode(body.as_bytes())?;
        if let Some(expected) = checksum {
            if crc24(&data) != expected {
                return Err(Error::InvalidChecksum);
            }
        }

        debug!("dearmored {} block: {} bytes", typ, data.len());
        blocks.push(ArmorBlock {
            typ,
            headers,
            data,
        });
    }

    Ok(blocks)
}

/// Extracts the payload of every armored block in `input` and concatenates
/// them, keeping block order.
///
/// Fails with [`Error::InvalidArmorWrappers`] when `input` holds no block at all.
pub fn dearmor_all(input: &str) -> Result<Vec<u8>> {
    let blocks = parse_blocks(input)?;
    if blocks.is_empty() {
        return Err(Error::InvalidArmorWrappers);
    }

    let len = blocks.iter().map(|b| b.data.len()).sum();
    let mut out = Vec::with_capacity(len);
    for block in blocks {
        out.extend_from_slice(&block.data);
    }

    Ok(out)
}
