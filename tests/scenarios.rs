use std::io::Cursor;

use byte_huffman::{
    build_code_table, count_frequencies, decode, encode, EncodedArtifact, FrequencyTable,
    HuffmanCodec, HuffmanError,
};

#[test]
fn most_frequent_symbol_gets_shortest_code() {
    let freqs = count_frequencies(b"AABBBC");
    let table = build_code_table(&freqs).unwrap();

    let (a, b, c) = (table.get(b'A'), table.get(b'B'), table.get(b'C'));
    assert_eq!(b.bit_count(), 1);
    assert!(c.bit_count() >= a.bit_count());
    assert!(a.bit_count() >= b.bit_count());
}

#[test]
fn empty_input_has_insufficient_alphabet() {
    let freqs = count_frequencies(&[]);
    assert_eq!(freqs, FrequencyTable::new());
    assert!(matches!(
        build_code_table(&freqs),
        Err(HuffmanError::InsufficientAlphabet { distinct: 0 })
    ));
}

#[test]
fn payload_shorter_than_bit_count_is_format_mismatch() {
    let data = b"abcdefgabcdefg";
    let table = build_code_table(&count_frequencies(data)).unwrap();
    let payload = encode(data, &table).unwrap();
    assert_eq!(payload.bytes.len(), 5);

    let mut bytes = EncodedArtifact::new(table, payload).to_bytes().unwrap();
    // keep bit count claiming 5 bytes but drop two of them
    bytes.truncate(bytes.len() - 2);
    assert!(matches!(
        EncodedArtifact::from_bytes(&bytes),
        Err(HuffmanError::FormatMismatch {
            section: "payload",
            expected: 5,
            actual: 3
        })
    ));
}

#[test]
fn encoding_with_foreign_table_fails() {
    let table = build_code_table(&count_frequencies(b"xyxyxy")).unwrap();
    assert!(matches!(
        encode(b"xyz", &table),
        Err(HuffmanError::UnknownSymbol {
            symbol: b'z',
            position: 2
        })
    ));
}

#[test]
fn truncated_bit_count_is_corrupt() {
    let data = b"hello huffman";
    let table = build_code_table(&count_frequencies(data)).unwrap();
    let payload = encode(data, &table).unwrap();

    // cut inside the last code; the longest code is at least 2 bits here
    let cut = payload.bit_count - 1;
    assert!(matches!(
        decode(&table, cut, &payload.bytes),
        Err(HuffmanError::TruncatedOrCorruptStream { .. })
    ));
}

#[test]
fn all_byte_values_roundtrip() {
    let data: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).chain([7, 7, 7]).collect();
    let mut compressed = Vec::new();
    HuffmanCodec::compress(Cursor::new(&data), &mut compressed).unwrap();

    let mut decoded = Vec::new();
    HuffmanCodec::decompress(Cursor::new(&compressed), &mut decoded).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn fibonacci_weights_reach_maximum_depth() {
    // Fibonacci counts give the deepest possible tree for their alphabet
    let mut data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..20u8 {
        data.extend(std::iter::repeat(symbol).take(a));
        (a, b) = (b, a + b);
    }
    let table = build_code_table(&count_frequencies(&data)).unwrap();
    assert_eq!(table.max_code_len(), 19);

    let payload = encode(&data, &table).unwrap();
    assert_eq!(decode(&table, payload.bit_count, &payload.bytes).unwrap(), data);
}
