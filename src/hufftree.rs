use std::cmp::Ordering;
use std::fmt::Write;

use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};
use crate::min_heap::MinHeap;

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Builds the code tree by repeatedly merging the two lightest entries.
    ///
    /// The first entry taken becomes the left child. Entries of equal weight
    /// are taken in order of the smallest symbol they contain, so a given
    /// table always yields the same tree.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let distinct = frequencies.distinct();
        if distinct < 2 {
            return Err(HuffmanError::InsufficientAlphabet { distinct });
        }

        let leaves: Vec<HeapEntry> = frequencies
            .iter_present()
            .map(|(symbol, count)| HeapEntry(HuffNode::new(symbol, count)))
            .collect();
        let mut heap = MinHeap::build(leaves);

        while heap.heap_size() > 1 {
            let (Some(HeapEntry(x)), Some(HeapEntry(y))) = (heap.extract_min(), heap.extract_min())
            else {
                break;
            };
            heap.insert(HeapEntry(HuffNode::merge(x, y)));
        }

        let HeapEntry(root) = heap
            .extract_min()
            .ok_or(HuffmanError::InsufficientAlphabet { distinct })?;
        Ok(HuffmanTree { root })
    }

    /// Code for every symbol, indexed by symbol; empty for symbols not in the tree.
    pub fn generate_codes(&self) -> Vec<BitVec> {
        let mut codes = vec![BitVec::new(); ALPHABET_SIZE];
        self.root.generate_codes(&mut codes, BitVec::new());
        codes
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Indented dump of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::from("Huffman Tree Structure:\n");
        self.root.render(&mut out, 0, "root");
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        /// smallest symbol anywhere below this node
        lowest: u8,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(b: u8, f: u64) -> Self {
        HuffNode::Leaf { weight: f, byte: b }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn lowest_symbol(&self) -> u8 {
        match self {
            HuffNode::Leaf { byte, .. } => *byte,
            HuffNode::Internal { lowest, .. } => *lowest,
        }
    }

    /// `a` becomes the left child, `b` the right.
    pub fn merge(a: Self, b: Self) -> Self {
        HuffNode::Internal {
            weight: a.weight() + b.weight(),
            lowest: a.lowest_symbol().min(b.lowest_symbol()),
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    fn generate_codes(&self, codes: &mut [BitVec], prefix: BitVec) {
        match self {
            HuffNode::Leaf { byte, .. } => {
                codes[*byte as usize] = prefix;
            }
            HuffNode::Internal { left, right, .. } => {
                // left = 0, right = 1
                let mut left_prefix = prefix.clone();
                left_prefix.push_bit(false);
                left.generate_codes(codes, left_prefix);

                let mut right_prefix = prefix;
                right_prefix.push_bit(true);
                right.generate_codes(codes, right_prefix);
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn render(&self, out: &mut String, depth: usize, label: &str) {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { byte, weight } => {
                let shown = if byte.is_ascii_graphic() {
                    format!("'{}'", *byte as char)
                } else {
                    format!("{:#04x}", byte)
                };
                let _ = writeln!(
                    out,
                    "{}{}-> Leaf: {} ({}) [weight: {}]",
                    indent, label, shown, byte, weight
                );
            }
            HuffNode::Internal {
                weight,
                left,
                right,
                ..
            } => {
                let _ = writeln!(out, "{}{}-> Internal [weight: {}]", indent, label, weight);
                left.render(out, depth + 1, "L");
                right.render(out, depth + 1, "R");
            }
        }
    }
}

/// Heap slot for a subtree, ordered by weight, then by the smallest symbol
/// contained. Distinct entries never share a symbol, so the order is total.
struct HeapEntry(HuffNode);

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .weight()
            .cmp(&other.0.weight())
            .then_with(|| self.0.lowest_symbol().cmp(&other.0.lowest_symbol()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merges_lightest_pair_first() {
        let tree = HuffmanTree::from_bytes(b"AABBBC").unwrap();
        assert_eq!(tree.weight(), 6);
        assert_eq!(tree.depth(), 2);

        // C(1) and A(2) merge first; their subtree (3, 'A') beats B(3, 'B')
        // on the tie so it is taken first and lands on the left.
        let HuffNode::Internal { left, right, .. } = &tree.root else {
            panic!("root must be internal");
        };
        assert!(matches!(**right, HuffNode::Leaf { byte: b'B', weight: 3 }));
        let HuffNode::Internal { left: l, right: r, .. } = &**left else {
            panic!("left child must be internal");
        };
        assert!(matches!(**l, HuffNode::Leaf { byte: b'C', weight: 1 }));
        assert!(matches!(**r, HuffNode::Leaf { byte: b'A', weight: 2 }));
    }

    #[test]
    fn codes_follow_tree_paths() {
        let tree = HuffmanTree::from_bytes(b"AABBBC").unwrap();
        let codes = tree.generate_codes();
        assert_eq!(codes[b'C' as usize].to_string(), "00");
        assert_eq!(codes[b'A' as usize].to_string(), "01");
        assert_eq!(codes[b'B' as usize].to_string(), "1");
        assert!(codes[b'D' as usize].is_empty());
    }

    #[test]
    fn equal_weights_break_ties_by_symbol() {
        let tree = HuffmanTree::from_bytes(&[3, 1, 2, 0]).unwrap();
        let codes = tree.generate_codes();
        // (0,1) then (2,3), then the two pairs with 0's pair on the left
        assert_eq!(codes[0].to_string(), "00");
        assert_eq!(codes[1].to_string(), "01");
        assert_eq!(codes[2].to_string(), "10");
        assert_eq!(codes[3].to_string(), "11");
    }

    #[test]
    fn rejects_degenerate_alphabets() {
        assert!(matches!(
            HuffmanTree::from_bytes(b""),
            Err(HuffmanError::InsufficientAlphabet { distinct: 0 })
        ));
        assert!(matches!(
            HuffmanTree::from_bytes(b"zzzz"),
            Err(HuffmanError::InsufficientAlphabet { distinct: 1 })
        ));
    }

    #[test]
    fn render_lists_every_node() {
        let tree = HuffmanTree::from_bytes(b"AABBBC").unwrap();
        let dump = tree.render();
        assert!(dump.contains("root-> Internal [weight: 6]"));
        assert!(dump.contains("    L-> Leaf: 'C' (67) [weight: 1]"));
        assert!(dump.contains("  R-> Leaf: 'B' (66) [weight: 3]"));
        assert_eq!(dump.lines().count(), 6);
    }

    #[test]
    fn node_equality_is_structural() {
        let leaf = |b, w| HuffNode::new(b, w);
        // same weight and lowest symbol, different shape
        let a = HuffNode::merge(leaf(0, 2), HuffNode::merge(leaf(1, 1), leaf(2, 1)));
        let b = HuffNode::merge(HuffNode::merge(leaf(0, 1), leaf(2, 1)), leaf(1, 2));
        assert_eq!(a.weight(), b.weight());
        assert_eq!(a.lowest_symbol(), b.lowest_symbol());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());

        // the heap still sees them as tied
        assert_eq!(HeapEntry(a).cmp(&HeapEntry(b)), Ordering::Equal);
    }
}
