//! Error types for the Huffman codec.

use thiserror::Error;

/// Everything that can go wrong while building codes, packing, unpacking
/// or (de)serializing an artifact.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Fewer than two distinct byte values were counted; no tree can be split.
    #[error("need at least 2 distinct byte values to build a code, found {distinct}")]
    InsufficientAlphabet { distinct: usize },

    /// A byte in the input has no code in the table.
    #[error("byte {symbol:#04x} at position {position} has no code in the table")]
    UnknownSymbol { symbol: u8, position: usize },

    /// The bit stream ended, or stopped matching any code, before a code boundary.
    #[error("bit stream of {bit_count} bits is truncated or corrupt after {decoded} decoded bytes")]
    TruncatedOrCorruptStream { bit_count: usize, decoded: usize },

    /// A section of a serialized artifact does not have the declared size.
    #[error("{section} section size mismatch: expected {expected} bytes, got {actual}")]
    FormatMismatch {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A deserialized code table cannot describe a Huffman tree.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
