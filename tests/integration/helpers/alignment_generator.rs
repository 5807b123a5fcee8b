//! Deterministic synthetic alignments with known differences.

use std::collections::BTreeSet;
use std::fmt::Write;

/// A generated reference and query alignment plus the per-query output it should produce.
pub struct SyntheticAlignment {
    /// Reference FASTA text.
    pub reference: String,
    /// Query FASTA text.
    pub queries: String,
    /// Expected per-query lines (without the header), in input order.
    pub expected_lines: Vec<String>,
}

impl SyntheticAlignment {
    /// Expected per-query output, header included.
    pub fn expected_output(&self) -> String {
        let mut out = String::from("query,SNPs\n");
        for line in &self.expected_lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

fn substitute(base: u8) -> u8 {
    match base {
        b'A' => b'C',
        b'C' => b'G',
        b'G' => b'T',
        _ => b'A',
    }
}

fn push_wrapped(out: &mut String, seq: &[u8], line_width: usize) {
    for chunk in seq.chunks(line_width.max(1)) {
        out.push_str(std::str::from_utf8(chunk).unwrap());
        out.push('\n');
    }
}

/// Generate `n_queries` queries of length `len`, query `i` carrying `i % 5` substitutions.
///
/// Sequences are wrapped at `line_width` columns.
pub fn synthetic_alignment(len: usize, n_queries: usize, line_width: usize) -> SyntheticAlignment {
    let reference_seq: Vec<u8> = b"ACGT".iter().copied().cycle().take(len).collect();

    let mut reference = String::from(">reference synthetic\n");
    push_wrapped(&mut reference, &reference_seq, line_width);

    let mut queries = String::new();
    let mut expected_lines = Vec::with_capacity(n_queries);

    for i in 0..n_queries {
        let positions: BTreeSet<usize> = (0..i % 5).map(|k| (i * 13 + k * 31) % len).collect();

        let mut seq = reference_seq.clone();
        let mut line = format!("sample_{i},");
        for (n, &pos) in positions.iter().enumerate() {
            seq[pos] = substitute(reference_seq[pos]);
            if n > 0 {
                line.push('|');
            }
            write!(line, "{}{}{}", reference_seq[pos] as char, pos + 1, seq[pos] as char).unwrap();
        }

        writeln!(queries, ">sample_{i} generated").unwrap();
        push_wrapped(&mut queries, &seq, line_width);
        expected_lines.push(line);
    }

    SyntheticAlignment { reference, queries, expected_lines }
}
