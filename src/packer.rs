//! Packing of symbol codes into a byte stream and back.

use crate::bit_vec::{bytes_for_bits, BitVec};
use crate::code_table::{CodeTable, DecodeTrie};
use crate::error::{HuffmanError, Result};

/// Concatenated codes, MSB-first, zero padded to a byte boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedPayload {
    pub bytes: Vec<u8>,
    /// meaningful leading bits of `bytes`
    pub bit_count: usize,
}

impl From<BitVec> for PackedPayload {
    fn from(bits: BitVec) -> Self {
        let bit_count = bits.bit_count();
        PackedPayload {
            bytes: bits.into_bytes(),
            bit_count,
        }
    }
}

/// Replaces every byte of `data` with its code.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<PackedPayload> {
    let mut bit_vec = BitVec::new();
    for (position, &byte) in data.iter().enumerate() {
        let code = table.get(byte);
        if code.is_empty() {
            return Err(HuffmanError::UnknownSymbol {
                symbol: byte,
                position,
            });
        }
        bit_vec.push_bits(code);
    }
    Ok(bit_vec.into())
}

/// Inverse of [`pack`]. Bits past `bit_count` are ignored.
pub fn unpack(table: &CodeTable, bit_count: usize, bytes: &[u8]) -> Result<Vec<u8>> {
    let trie = DecodeTrie::new(table)?;
    unpack_with(&trie, bit_count, bytes)
}

/// [`unpack`] against a prebuilt trie.
pub fn unpack_with(trie: &DecodeTrie, bit_count: usize, bytes: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::new();
    let corrupt = |decoded: usize| HuffmanError::TruncatedOrCorruptStream { bit_count, decoded };

    if bytes.len() < bytes_for_bits(bit_count) {
        return Err(corrupt(0));
    }

    let mut node = DecodeTrie::ROOT;
    for bit_index in 0..bit_count {
        let bit = bytes[bit_index / 8] & (1 << (7 - bit_index % 8)) != 0;
        node = trie.child(node, bit).ok_or_else(|| corrupt(result.len()))?;

        if let Some(symbol) = trie.symbol(node) {
            result.push(symbol);
            node = DecodeTrie::ROOT;
        }
    }

    // leftover bits that never completed a code
    if node != DecodeTrie::ROOT {
        return Err(corrupt(result.len()));
    }
    Ok(result)
}
