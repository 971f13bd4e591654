// src/packer.rs
//! Packs a block's token codes into a byte stream.
//! Bits are written MSB-first; the last byte is zero-filled and the number of
//! filler bits is kept next to the bytes so a decoder can drop them.

use bitstream_io::{BigEndian, BitWrite, BitWriter};

use crate::codes::CodeTable;
use crate::error::{Error, Result};

/// Byte-aligned encoded block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPayload {
    pub bytes: Vec<u8>,
    /// Trailing filler bits in the final byte, always 0..=7.
    pub padding: u8,
    /// Code bits before padding.
    pub bit_len: u64,
}

impl PackedPayload {
    /// Filler bits needed to round `bit_len` up to a whole byte.
    pub fn padding_for(bit_len: u64) -> u8 {
        ((8 - bit_len % 8) % 8) as u8
    }

    /// All bits, padding included, as `0`/`1` text.
    pub fn to_bit_string(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 8);
        for byte in &self.bytes {
            for shift in (0..8).rev() {
                out.push(if (byte >> shift) & 1 == 1 { '1' } else { '0' });
            }
        }
        out
    }
}

/// Concatenate each token's code in order, pad to a byte boundary, pack.
pub fn pack<'a, I>(tokens: I, codes: &CodeTable) -> Result<PackedPayload>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut bytes = Vec::new();
    let mut bit_len: u64 = 0;
    {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);

        for token in tokens {
            let code = codes.get(token).ok_or_else(|| Error::UnknownToken {
                token: token.to_owned(),
            })?;
            for &bit in code.bits() {
                writer.write_bit(bit)?;
            }
            bit_len += code.len() as u64;
        }

        writer.byte_align()?;
    }

    let padding = PackedPayload::padding_for(bit_len);
    if (bit_len + padding as u64) != bytes.len() as u64 * 8 {
        return Err(Error::invariant(format!(
            "{} code bits + {} padding does not fill {} bytes",
            bit_len,
            padding,
            bytes.len()
        )));
    }

    Ok(PackedPayload {
        bytes,
        padding,
        bit_len,
    })
}
