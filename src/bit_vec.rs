use std::fmt;

/// Growable bit sequence packed most-significant-bit first.
///
/// Bits past `bit_count` in the last byte are always zero, so two vectors
/// holding the same bits compare equal.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

/// Bytes needed to hold `bit_count` bits.
pub fn bytes_for_bits(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    /// Rebuilds a vector from packed bytes. Returns `None` unless `bits`
    /// is exactly `ceil(bit_count / 8)` bytes long. Padding is cleared.
    pub fn from_parts(bit_count: usize, mut bits: Vec<u8>) -> Option<Self> {
        if bits.len() != bytes_for_bits(bit_count) {
            return None;
        }
        let tail = bit_count % 8;
        if tail != 0 {
            if let Some(last) = bits.last_mut() {
                *last &= 0xFFu8 << (8 - tail);
            }
        }
        Some(BitVec { bits, bit_count })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }
        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }

    /// Appends every bit of `other`.
    pub fn push_bits(&mut self, other: &BitVec) {
        if self.bit_count % 8 == 0 {
            // byte aligned, copy whole bytes
            self.bits.extend_from_slice(&other.bits);
            self.bit_count += other.bit_count;
            return;
        }
        for bit in other.iter() {
            self.push_bit(bit);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| self.bits[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    /// True when `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitVec) -> bool {
        self.bit_count <= other.bit_count && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bit_vec = BitVec::new();
        for bit in iter {
            bit_vec.push_bit(bit);
        }
        bit_vec
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
