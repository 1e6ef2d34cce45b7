//! Plain-text symbol table: one row per byte value that occurs.

use std::fmt::Write;

use crate::code_table::CodeTable;
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};

/// Renders `Number | Character | Count | Encoding` rows.
///
/// The count column is left out without `frequencies` and the encoding
/// column without `codes`. A row is shown when its symbol has a non-zero
/// count or a non-empty code.
pub fn symbol_table(frequencies: Option<&FrequencyTable>, codes: Option<&CodeTable>) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:>6}  {:<9}", "Number", "Character");
    if frequencies.is_some() {
        let _ = write!(out, "  {:>10}", "Count");
    }
    if codes.is_some() {
        out.push_str("  Encoding");
    }
    out.push('\n');

    for symbol in 0..ALPHABET_SIZE {
        let symbol = symbol as u8;
        let count = frequencies.map_or(0, |f| f.get(symbol));
        let code = codes.map(|c| c.get(symbol));
        if count == 0 && code.map_or(true, |c| c.is_empty()) {
            continue;
        }

        let _ = write!(out, "{:>6}  {:<9}", symbol, display_char(symbol));
        if frequencies.is_some() {
            let _ = write!(out, "  {:>10}", count);
        }
        if let Some(code) = code {
            let _ = write!(out, "  {}", code);
        }
        out.push('\n');
    }
    out
}

fn display_char(symbol: u8) -> String {
    std::ascii::escape_default(symbol).to_string()
}
