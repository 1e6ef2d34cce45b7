//! # byte_huffman
//!
//! Byte-oriented Huffman compression: count byte frequencies, build a
//! prefix-free code from them, pack the input into a bit stream and
//! reverse the whole thing exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use byte_huffman::{build_code_table, count_frequencies, decode, encode};
//!
//! let data = b"abracadabra";
//! let table = build_code_table(&count_frequencies(data))?;
//! let payload = encode(data, &table)?;
//! let restored = decode(&table, payload.bit_count, &payload.bytes)?;
//! assert_eq!(restored, data);
//! # Ok::<(), byte_huffman::HuffmanError>(())
//! ```
//!
//! Whole streams, including the on-disk artifact format, go through
//! [`HuffmanCodec::compress`] and [`HuffmanCodec::decompress`].

pub mod artifact;
pub mod code_table;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod packer;
pub mod report;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

pub use artifact::EncodedArtifact;
pub use bit_vec::BitVec;
pub use code_table::CodeTable;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{CodecSummary, HuffmanCodec};
pub use hufftree::HuffmanTree;
pub use packer::PackedPayload;

/// Counts how often each byte value occurs in `bytes`.
pub fn count_frequencies(bytes: &[u8]) -> FrequencyTable {
    FrequencyTable::from_bytes(bytes)
}

/// Builds the Huffman tree for `frequencies` and derives every symbol's code.
///
/// Fails with [`HuffmanError::InsufficientAlphabet`] unless at least two
/// byte values have a non-zero count.
pub fn build_code_table(frequencies: &FrequencyTable) -> Result<CodeTable> {
    let tree = HuffmanTree::from_frequencies(frequencies)?;
    Ok(CodeTable::from_tree(&tree))
}

/// Packs `bytes` using `table`. The payload carries its exact bit count.
pub fn encode(bytes: &[u8], table: &CodeTable) -> Result<PackedPayload> {
    packer::pack(bytes, table)
}

/// Recovers the original bytes from the first `bit_count` bits of `payload`.
pub fn decode(table: &CodeTable, bit_count: usize, payload: &[u8]) -> Result<Vec<u8>> {
    packer::unpack(table, bit_count, payload)
}
