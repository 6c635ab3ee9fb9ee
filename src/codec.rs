// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text ⇄ integer chunk codec.
//!
//! Text is encoded as UTF-16 with a little-endian byte-order mark (`FF FE`),
//! and the byte stream is cut into chunks of `bit_width / 8` bytes. Each chunk
//! is read as a little-endian integer, so zero padding at the end of the final
//! chunk does not change its value.
//!
//! Decoding reverses the packing, honours either byte-order mark, and strips
//! trailing NUL characters. Text that itself ends in NULs does not survive a
//! round trip.

use num_bigint_dig::BigUint;

use crate::error::{Error, Result};

/// Smallest chunk width: one UTF-16 code unit.
pub const MIN_BIT_WIDTH: usize = 16;

const BOM_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_BE: [u8; 2] = [0xFE, 0xFF];

/// Encodes `text` into integers of at most `bit_width` bits.
///
/// # Errors
///
/// Returns [`Error::InvalidDomain`] if `bit_width < MIN_BIT_WIDTH`.
///
/// # Example
///
/// ```
/// # use elgamal_bpsw::codec::{decode, encode};
/// let chunks = encode("hi", 32).unwrap();
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(decode(&chunks, 32).unwrap(), "hi");
/// ```
pub fn encode(text: &str, bit_width: usize) -> Result<Vec<BigUint>> {
    let chunk_len = chunk_len(bit_width)?;

    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&BOM_LE);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    Ok(bytes.chunks(chunk_len).map(BigUint::from_bytes_le).collect())
}

/// Decodes chunks produced by [`encode`] with the same `bit_width`.
///
/// # Errors
///
/// Returns [`Error::InvalidDomain`] if `bit_width < MIN_BIT_WIDTH`, and
/// [`Error::DecodingFailure`] if a chunk does not fit the width, a stray odd
/// byte is non-zero, or the code units are not valid UTF-16.
pub fn decode(chunks: &[BigUint], bit_width: usize) -> Result<String> {
    let chunk_len = chunk_len(bit_width)?;

    let mut bytes = Vec::with_capacity(chunks.len() * chunk_len);
    for (index, chunk) in chunks.iter().enumerate() {
        let mut le = chunk.to_bytes_le();
        if le.len() > chunk_len {
            return Err(Error::DecodingFailure(format!(
                "chunk {} exceeds {} bits",
                index,
                chunk_len * 8
            )));
        }
        le.resize(chunk_len, 0);
        bytes.extend_from_slice(&le);
    }

    if bytes.len() % 2 == 1 {
        match bytes.pop() {
            Some(0) | None => {}
            Some(_) => {
                return Err(Error::DecodingFailure(
                    "odd-length byte stream with non-zero tail".into(),
                ))
            }
        }
    }

    let (body, big_endian) = match bytes.get(..2) {
        Some(head) if head == BOM_LE => (&bytes[2..], false),
        Some(head) if head == BOM_BE => (&bytes[2..], true),
        _ => (&bytes[..], false),
    };

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            if big_endian {
                u16::from_be_bytes(pair)
            } else {
                u16::from_le_bytes(pair)
            }
        })
        .collect();

    let text = String::from_utf16(&units)
        .map_err(|err| Error::DecodingFailure(err.to_string()))?;

    Ok(text.trim_end_matches('\0').to_owned())
}

#[inline]
fn chunk_len(bit_width: usize) -> Result<usize> {
    if bit_width < MIN_BIT_WIDTH {
        return Err(Error::InvalidDomain(format!(
            "codec bit width must be at least {}, got {}",
            MIN_BIT_WIDTH, bit_width
        )));
    }

    Ok(bit_width / 8)
}
