//! On-disk form of an encoded input.
//!
//! ```text
//! code table   256 x ( u16 bit length L | ceil(L/8) code bytes, MSB-first )
//! bit count    u64
//! payload      ceil(bit count / 8) bytes, running to the end of the stream
//! ```
//!
//! Integers are little-endian.

use std::io::{Read, Write};

use crate::bit_vec::{bytes_for_bits, BitVec};
use crate::code_table::{CodeTable, MAX_CODE_LEN};
use crate::error::{HuffmanError, Result};
use crate::frequency::ALPHABET_SIZE;
use crate::packer::PackedPayload;

/// Everything needed to reproduce the original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    pub table: CodeTable,
    pub payload: PackedPayload,
}

impl EncodedArtifact {
    pub fn new(table: CodeTable, payload: PackedPayload) -> Self {
        EncodedArtifact { table, payload }
    }

    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.payload.bytes.len() != bytes_for_bits(self.payload.bit_count) {
            return Err(HuffmanError::FormatMismatch {
                section: "payload",
                expected: bytes_for_bits(self.payload.bit_count),
                actual: self.payload.bytes.len(),
            });
        }

        // write each code as its length, then its packed bits
        for code in self.table.codes() {
            let len = code.bit_count() as u16;
            writer.write_all(&len.to_le_bytes())?;
            writer.write_all(code.as_bytes())?;
        }

        let bit_count = self.payload.bit_count as u64;
        writer.write_all(&bit_count.to_le_bytes())?;
        writer.write_all(&self.payload.bytes)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.serialize(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads an artifact, consuming `reader` to its end.
    pub fn deserialize<R: Read>(reader: &mut R) -> Result<EncodedArtifact> {
        let mut codes = Vec::with_capacity(ALPHABET_SIZE);
        for _ in 0..ALPHABET_SIZE {
            let len_bytes = read_section(reader, 2, "code length")?;
            let len = u16::from_le_bytes([len_bytes[0], len_bytes[1]]) as usize;
            if len > MAX_CODE_LEN {
                return Err(HuffmanError::InvalidCodeTable(format!(
                    "declared code length {} exceeds {}",
                    len, MAX_CODE_LEN
                )));
            }

            let code_bytes = read_section(reader, bytes_for_bits(len), "code table")?;
            let code = BitVec::from_parts(len, code_bytes).ok_or(HuffmanError::FormatMismatch {
                section: "code table",
                expected: bytes_for_bits(len),
                actual: 0,
            })?;
            codes.push(code);
        }
        let table = CodeTable::from_codes(codes)?;

        let count_bytes = read_section(reader, 8, "bit count")?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&count_bytes);
        let bit_count = u64::from_le_bytes(raw);

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        // a bit count this platform cannot address can never match the payload
        let bit_count = usize::try_from(bit_count).map_err(|_| HuffmanError::FormatMismatch {
            section: "payload",
            expected: usize::MAX,
            actual: bytes.len(),
        })?;
        let expected = bytes_for_bits(bit_count);
        if bytes.len() != expected {
            return Err(HuffmanError::FormatMismatch {
                section: "payload",
                expected,
                actual: bytes.len(),
            });
        }

        // padding bits are not part of the payload
        let payload = BitVec::from_parts(bit_count, bytes)
            .map(PackedPayload::from)
            .ok_or(HuffmanError::FormatMismatch {
                section: "payload",
                expected,
                actual: 0,
            })?;

        Ok(EncodedArtifact { table, payload })
    }

    pub fn from_bytes(mut data: &[u8]) -> Result<EncodedArtifact> {
        Self::deserialize(&mut data)
    }
}

/// Reads exactly `len` bytes, reporting a short read as a size mismatch.
fn read_section<R: Read>(reader: &mut R, len: usize, section: &'static str) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(HuffmanError::FormatMismatch {
            section,
            expected: len,
            actual: buf.len(),
        });
    }
    Ok(buf)
}
