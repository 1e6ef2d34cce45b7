use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};
use crate::hufftree::HuffmanTree;

/// Longest code a 256-leaf tree can produce.
pub const MAX_CODE_LEN: usize = ALPHABET_SIZE - 1;

/// Per-symbol bit codes. Absent symbols have an empty code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<BitVec>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        CodeTable {
            codes: tree.generate_codes(),
        }
    }

    /// Wraps codes read from elsewhere, checking they could have come from a tree.
    pub fn from_codes(codes: Vec<BitVec>) -> Result<Self> {
        if codes.len() != ALPHABET_SIZE {
            return Err(HuffmanError::InvalidCodeTable(format!(
                "expected {} entries, got {}",
                ALPHABET_SIZE,
                codes.len()
            )));
        }
        if let Some((symbol, code)) = codes
            .iter()
            .enumerate()
            .find(|(_, code)| code.bit_count() > MAX_CODE_LEN)
        {
            return Err(HuffmanError::InvalidCodeTable(format!(
                "code for byte {} is {} bits long",
                symbol,
                code.bit_count()
            )));
        }
        let table = CodeTable { codes };
        if !table.is_prefix_free() {
            return Err(HuffmanError::InvalidCodeTable(
                "codes are not prefix-free".to_string(),
            ));
        }
        Ok(table)
    }

    pub fn get(&self, symbol: u8) -> &BitVec {
        &self.codes[symbol as usize]
    }

    /// All 256 codes in symbol order.
    pub fn codes(&self) -> &[BitVec] {
        &self.codes
    }

    pub fn iter_present(&self) -> impl Iterator<Item = (u8, &BitVec)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, code)| !code.is_empty())
            .map(|(symbol, code)| (symbol as u8, code))
    }

    pub fn is_prefix_free(&self) -> bool {
        let mut present: Vec<&BitVec> = self.iter_present().map(|(_, code)| code).collect();
        // lexicographic order puts any prefix directly before some code it prefixes
        present.sort_by(|a, b| a.iter().cmp(b.iter()));
        present.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.iter().map(BitVec::bit_count).max().unwrap_or(0)
    }

    /// Bits an encode of the counted input will produce.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter_present()
            .map(|(symbol, count)| count * self.get(symbol).bit_count() as u64)
            .sum()
    }
}

const NO_CHILD: u32 = u32::MAX;

#[derive(Debug, Clone)]
struct TrieNode {
    children: [u32; 2],
    symbol: Option<u8>,
}

impl TrieNode {
    fn empty() -> Self {
        TrieNode {
            children: [NO_CHILD; 2],
            symbol: None,
        }
    }
}

/// Binary trie over the codes of a [`CodeTable`], for walking a bit stream
/// one bit at a time.
#[derive(Debug, Clone)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

impl DecodeTrie {
    pub const ROOT: usize = 0;

    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut nodes = vec![TrieNode::empty()];

        for (symbol, code) in table.iter_present() {
            let mut current = Self::ROOT;
            for bit in code.iter() {
                if nodes[current].symbol.is_some() {
                    return Err(Self::conflict(symbol));
                }
                let slot = bit as usize;
                if nodes[current].children[slot] == NO_CHILD {
                    nodes.push(TrieNode::empty());
                    nodes[current].children[slot] = (nodes.len() - 1) as u32;
                }
                current = nodes[current].children[slot] as usize;
            }
            let node = &mut nodes[current];
            if node.symbol.is_some() || node.children != [NO_CHILD; 2] {
                return Err(Self::conflict(symbol));
            }
            node.symbol = Some(symbol);
        }

        Ok(DecodeTrie { nodes })
    }

    fn conflict(symbol: u8) -> HuffmanError {
        HuffmanError::InvalidCodeTable(format!("code for byte {} overlaps another code", symbol))
    }

    /// Follows one bit from `node`; `None` if no code continues that way.
    pub fn child(&self, node: usize, bit: bool) -> Option<usize> {
        match self.nodes[node].children[bit as usize] {
            NO_CHILD => None,
            next => Some(next as usize),
        }
    }

    /// Symbol whose code ends at `node`, if any.
    pub fn symbol(&self, node: usize) -> Option<u8> {
        self.nodes[node].symbol
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bits(s: &str) -> BitVec {
        s.chars().map(|c| c == '1').collect()
    }

    fn table_of(entries: &[(u8, &str)]) -> Result<CodeTable> {
        let mut codes = vec![BitVec::new(); ALPHABET_SIZE];
        for &(symbol, code) in entries {
            codes[symbol as usize] = bits(code);
        }
        CodeTable::from_codes(codes)
    }

    #[test]
    fn derived_from_tree() {
        let tree = HuffmanTree::from_bytes(b"AABBBC").unwrap();
        let table = CodeTable::from_tree(&tree);
        assert_eq!(table.get(b'B').to_string(), "1");
        assert_eq!(table.iter_present().count(), 3);
        assert_eq!(table.max_code_len(), 2);
        assert!(table.is_prefix_free());

        let freqs = FrequencyTable::from_bytes(b"AABBBC");
        // A: 2*2, B: 3*1, C: 1*2
        assert_eq!(table.encoded_bit_len(&freqs), 9);
    }

    #[test]
    fn from_codes_rejects_prefix_overlap() {
        assert!(table_of(&[(1, "0"), (2, "10"), (3, "11")]).is_ok());
        assert!(matches!(
            table_of(&[(1, "1"), (2, "10"), (3, "0")]),
            Err(HuffmanError::InvalidCodeTable(_))
        ));
        assert!(matches!(
            table_of(&[(1, "01"), (2, "01")]),
            Err(HuffmanError::InvalidCodeTable(_))
        ));
    }

    #[test]
    fn from_codes_rejects_wrong_size_and_overlong_codes() {
        assert!(CodeTable::from_codes(vec![BitVec::new(); 3]).is_err());

        let mut codes = vec![BitVec::new(); ALPHABET_SIZE];
        codes[0] = (0..=MAX_CODE_LEN).map(|_| true).collect();
        assert!(matches!(
            CodeTable::from_codes(codes),
            Err(HuffmanError::InvalidCodeTable(_))
        ));
    }

    #[test]
    fn trie_walks_to_symbols() {
        let table = table_of(&[(b'x', "0"), (b'y', "10"), (b'z', "11")]).unwrap();
        let trie = DecodeTrie::new(&table).unwrap();

        let one = trie.child(DecodeTrie::ROOT, true).unwrap();
        assert_eq!(trie.symbol(one), None);
        let z = trie.child(one, true).unwrap();
        assert_eq!(trie.symbol(z), Some(b'z'));
        let x = trie.child(DecodeTrie::ROOT, false).unwrap();
        assert_eq!(trie.symbol(x), Some(b'x'));
        assert_eq!(trie.child(x, false), None);
    }

    #[test]
    fn trie_rejects_overlap() {
        // bypass from_codes validation to hit the trie's own check
        let mut codes = vec![BitVec::new(); ALPHABET_SIZE];
        codes[1] = bits("0");
        codes[2] = bits("01");
        let table = CodeTable { codes };
        assert!(DecodeTrie::new(&table).is_err());
    }
}
