use byte_huffman::{report, HuffmanCodec};
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir();
    let sample_path = dir.join("byte_huffman_sample.txt");
    let packed_path = dir.join("byte_huffman_sample.huff");
    let restored_path = dir.join("byte_huffman_restored.txt");

    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    std::fs::write(&sample_path, sample_text)?;
    println!("Created sample file: {} bytes", sample_text.len());

    let summary = HuffmanCodec::compress(File::open(&sample_path)?, File::create(&packed_path)?)?;
    println!(
        "Compressed to: {} bytes ({:.1}% of original)",
        summary.output_len,
        summary.ratio() * 100.0
    );
    print!(
        "{}",
        report::symbol_table(summary.frequencies.as_ref(), Some(&summary.table))
    );

    HuffmanCodec::decompress(File::open(&packed_path)?, File::create(&restored_path)?)?;

    let restored_text = std::fs::read_to_string(&restored_path)?;
    if sample_text != restored_text {
        return Err("Decompression verification failed".into());
    }
    println!("Decompression successful, data matches exactly.");

    std::fs::remove_file(&sample_path)?;
    std::fs::remove_file(&packed_path)?;
    std::fs::remove_file(&restored_path)?;
    Ok(())
}
