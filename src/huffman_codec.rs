use std::io::{Read, Write};

use log::debug;

use crate::artifact::EncodedArtifact;
use crate::code_table::{CodeTable, DecodeTrie};
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;
use crate::packer::{self, PackedPayload};

/// A code table together with its decoding trie.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    table: CodeTable,
    trie: DecodeTrie,
}

/// What a [`HuffmanCodec::compress`] or [`HuffmanCodec::decompress`] run did.
#[derive(Debug, Clone)]
pub struct CodecSummary {
    pub input_len: usize,
    pub output_len: usize,
    pub bit_count: usize,
    pub table: CodeTable,
    /// only known when compressing
    pub frequencies: Option<FrequencyTable>,
}

impl CodecSummary {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        self.output_len as f64 / self.input_len as f64
    }
}

impl HuffmanCodec {
    pub fn from_table(table: CodeTable) -> Result<Self> {
        let trie = DecodeTrie::new(&table)?;
        Ok(HuffmanCodec { table, trie })
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::from_frequencies(frequencies)?;
        debug!(
            "built tree over {} symbols, depth {}",
            frequencies.distinct(),
            tree.depth()
        );
        Self::from_table(CodeTable::from_tree(&tree))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn encode(&self, data: &[u8]) -> Result<EncodedArtifact> {
        let payload = packer::pack(data, &self.table)?;
        debug!("encoded {} bytes into {} bits", data.len(), payload.bit_count);
        Ok(EncodedArtifact::new(self.table.clone(), payload))
    }

    pub fn decode(&self, payload: &PackedPayload) -> Result<Vec<u8>> {
        let result = packer::unpack_with(&self.trie, payload.bit_count, &payload.bytes)?;
        debug!("decoded {} bits into {} bytes", payload.bit_count, result.len());
        Ok(result)
    }

    /// Decodes an artifact using the table it carries.
    pub fn decode_artifact(artifact: &EncodedArtifact) -> Result<Vec<u8>> {
        Self::from_table(artifact.table.clone())?.decode(&artifact.payload)
    }

    /// Reads all of `input`, builds a code for it and writes the artifact to `output`.
    pub fn compress<R: Read, W: Write>(mut input: R, mut output: W) -> Result<CodecSummary> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let frequencies = FrequencyTable::from_bytes(&data);
        let codec = Self::from_frequencies(&frequencies)?;
        let artifact = codec.encode(&data)?;

        let bytes = artifact.to_bytes()?;
        output.write_all(&bytes)?;
        output.flush()?;

        Ok(CodecSummary {
            input_len: data.len(),
            output_len: bytes.len(),
            bit_count: artifact.payload.bit_count,
            table: artifact.table,
            frequencies: Some(frequencies),
        })
    }

    /// Reads an artifact from `input` and writes the original bytes to `output`.
    pub fn decompress<R: Read, W: Write>(mut input: R, mut output: W) -> Result<CodecSummary> {
        let mut encoded = Vec::new();
        input.read_to_end(&mut encoded)?;

        let artifact = EncodedArtifact::from_bytes(&encoded)?;
        let decoded = Self::decode_artifact(&artifact)?;

        output.write_all(&decoded)?;
        output.flush()?;

        Ok(CodecSummary {
            input_len: encoded.len(),
            output_len: decoded.len(),
            bit_count: artifact.payload.bit_count,
            table: artifact.table,
            frequencies: None,
        })
    }
}
