// src/bitreader.rs
//! Test-only decoder: reads a packed payload back into tokens.
//! Padding is taken from the payload, so filler bits are never decoded.

use std::collections::HashMap;
use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::codes::CodeTable;
use crate::packer::PackedPayload;

pub fn read_tokens(payload: &PackedPayload, codes: &CodeTable) -> std::io::Result<Vec<String>> {
    let lookup: HashMap<String, &str> = codes.iter().map(|(t, c)| (c.to_string(), t)).collect();
    let total_bits = payload.bytes.len() as u64 * 8 - payload.padding as u64;

    let mut reader = BitReader::endian(Cursor::new(&payload.bytes), BigEndian);
    let mut tokens = Vec::new();
    let mut current = String::new();

    for _ in 0..total_bits {
        let bit = reader.read_bit()?;
        current.push(if bit { '1' } else { '0' });
        if let Some(token) = lookup.get(&current) {
            tokens.push((*token).to_owned());
            current.clear();
        }
    }

    if !current.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("dangling bits {} at end of payload", current),
        ));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_block;

    #[test]
    fn roundtrip_two_tokens() {
        let record = encode_block(1, "aa bb aa").unwrap().unwrap();
        let tokens = read_tokens(&record.payload, &record.codes).unwrap();
        assert_eq!(tokens, vec!["aa", "bb", "aa"]);
    }

    #[test]
    fn roundtrip_single_token() {
        let record = encode_block(1, "hi hi hi").unwrap().unwrap();
        let tokens = read_tokens(&record.payload, &record.codes).unwrap();
        assert_eq!(tokens, vec!["hi", "hi", "hi"]);
    }

    #[test]
    fn roundtrip_prose() {
        let text = "it was the best of times it was the worst of times it was the age of wisdom";
        let record = encode_block(1, text).unwrap().unwrap();
        let tokens = read_tokens(&record.payload, &record.codes).unwrap();
        assert_eq!(tokens.join(" "), text);
    }

    #[test]
    fn padding_is_not_decoded() {
        // with padding ignored, the 5 zero filler bits would decode as 5 more "bb"
        let mut record = encode_block(1, "aa bb aa").unwrap().unwrap();
        record.payload.padding = 0;
        let tokens = read_tokens(&record.payload, &record.codes).unwrap();
        assert_eq!(tokens.len(), 8);
    }
}
