use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use byte_huffman::{report, CodeTable, FrequencyTable, HuffmanCodec, HuffmanTree};
use clap::{Parser, Subcommand};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Compress and decompress files with a byte-level Huffman code")]
struct Args {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a file into a Huffman artifact
    Encode {
        /// File to compress
        input: PathBuf,
        /// Where to write the artifact
        output: PathBuf,
        /// Print the symbol table with counts and encodings
        #[arg(long)]
        table: bool,
    },
    /// Decode a Huffman artifact back into the original file
    Decode {
        /// Artifact to decompress
        input: PathBuf,
        /// Where to write the decoded bytes
        output: PathBuf,
        /// Print the symbol table with encodings
        #[arg(long)]
        table: bool,
    },
    /// Show byte counts and codes for a file without writing anything
    Inspect {
        input: PathBuf,
        /// Also print the Huffman tree
        #[arg(long)]
        tree: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.command {
        Command::Encode {
            input,
            output,
            table,
        } => encode(&input, &output, table),
        Command::Decode {
            input,
            output,
            table,
        } => decode(&input, &output, table),
        Command::Inspect { input, tree } => inspect(&input, tree),
    }
}

/// Loads a file that is worth encoding: non-empty with at least two distinct bytes.
fn load_encodable(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("failed to load {}", path.display()))?;
    info!("opened {}: {} bytes", path.display(), data.len());

    if data.is_empty() {
        warn!("{} is empty", path.display());
        bail!("the file you specified is empty: {}", path.display());
    }
    let distinct = FrequencyTable::from_bytes(&data).distinct();
    if distinct < 2 {
        warn!("{} has only {} distinct byte value", path.display(), distinct);
        bail!(
            "Huffman encoding needs more than 1 unique byte in {}",
            path.display()
        );
    }
    Ok(data)
}

fn write_output(output: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    fs::write(output, bytes)
        .with_context(|| format!("can't write to file \"{}\"", output.display()))
}

fn encode(input: &Path, output: &Path, show_table: bool) -> anyhow::Result<()> {
    let data = load_encodable(input)?;

    let mut encoded = Vec::new();
    let summary = HuffmanCodec::compress(data.as_slice(), &mut encoded)
        .with_context(|| format!("failed to encode {}", input.display()))?;
    write_output(output, &encoded)?;

    if show_table {
        print!(
            "{}",
            report::symbol_table(summary.frequencies.as_ref(), Some(&summary.table))
        );
    }
    info!(
        "encoded file size: {} bytes ({} payload bits, {:.1}% of original)",
        summary.output_len,
        summary.bit_count,
        summary.ratio() * 100.0
    );
    Ok(())
}

fn decode(input: &Path, output: &Path, show_table: bool) -> anyhow::Result<()> {
    let file = File::open(input).with_context(|| format!("failed to load {}", input.display()))?;

    // decode fully before touching the output path
    let mut decoded = Vec::new();
    let summary = HuffmanCodec::decompress(BufReader::new(file), &mut decoded)
        .with_context(|| format!("failed to decode {}", input.display()))?;
    write_output(output, &decoded)?;

    if show_table {
        print!("{}", report::symbol_table(None, Some(&summary.table)));
    }
    info!(
        "decoded {} bytes from {} into {}",
        summary.output_len,
        input.display(),
        output.display()
    );
    Ok(())
}

fn inspect(input: &Path, show_tree: bool) -> anyhow::Result<()> {
    let data = load_encodable(input)?;

    let frequencies = FrequencyTable::from_bytes(&data);
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);

    print!("{}", report::symbol_table(Some(&frequencies), Some(&codes)));
    if show_tree {
        print!("{}", tree.render());
    }
    info!(
        "{} distinct bytes, longest code {} bits, {} payload bits",
        frequencies.distinct(),
        codes.max_code_len(),
        codes.encoded_bit_len(&frequencies)
    );
    Ok(())
}
