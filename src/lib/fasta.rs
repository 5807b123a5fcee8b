//! Streaming FASTA reader that encodes sequences as it reads them.
//!
//! [`AlignmentReader`] makes a single pass over a FASTA stream and yields one
//! [`EncodedRecord`] per sequence, in input order. Sequence lines are concatenated
//! without any line-length assumption and every byte is passed through the
//! [`SymbolCodec`], so downstream stages only ever see codes.
//!
//! # Example
//!
//! ```
//! use snps_lib::fasta::AlignmentReader;
//! use snps_lib::iupac::{GapPolicy, SymbolCodec};
//!
//! let input = b">seq1 first\nACGT\nAC\n>seq2\nNNNNNN\n";
//! let codec = SymbolCodec::new(GapPolicy::Soft);
//! let records: Vec<_> = AlignmentReader::new(&input[..], codec, "example")
//!     .collect::<anyhow::Result<_>>()?;
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].id, "seq1");
//! assert_eq!(records[0].description, "seq1 first");
//! assert_eq!(records[0].seq.len(), 6);
//! assert_eq!(records[1].ordinal, 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::io::BufRead;

use anyhow::{Context, Result};
use bstr::ByteSlice;
use log::debug;

use crate::errors::SnpsError;
use crate::iupac::SymbolCodec;

/// One FASTA record with its sequence already encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRecord {
    /// First whitespace-delimited token of the header.
    pub id: String,
    /// The full header line after `>`.
    pub description: String,
    /// 0-based position of the record in its input stream.
    pub ordinal: u64,
    /// Encoded sequence.
    pub seq: Vec<u8>,
}

impl EncodedRecord {
    /// Number of alignment columns in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Returns true if the record has no sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Header of the record currently being accumulated.
#[derive(Debug)]
struct Header {
    id: String,
    description: String,
}

impl Header {
    fn parse(text: &[u8]) -> Self {
        let id = text.fields().next().unwrap_or_default().to_str_lossy().into_owned();
        Self { id, description: text.trim().to_str_lossy().into_owned() }
    }
}

/// Single-pass, order-preserving FASTA reader producing [`EncodedRecord`]s.
///
/// Blank lines are ignored and trailing whitespace (including `\r`) is stripped from
/// every line. The first non-blank line must be a header. Any byte in a sequence line
/// that is not an IUPAC symbol is reported as a format error.
pub struct AlignmentReader<R> {
    reader: R,
    codec: SymbolCodec,
    source_name: String,
    line: Vec<u8>,
    header: Option<Header>,
    seq: Vec<u8>,
    next_ordinal: u64,
    done: bool,
}

impl<R: BufRead> AlignmentReader<R> {
    /// Create a reader over `reader`. `source_name` is used in error messages.
    pub fn new(reader: R, codec: SymbolCodec, source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        debug!("Reading FASTA from {source_name} with {} gaps", codec.policy());
        Self {
            reader,
            codec,
            source_name,
            line: Vec::new(),
            header: None,
            seq: Vec::new(),
            next_ordinal: 0,
            done: false,
        }
    }

    /// The name this reader reports in error messages.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Read the next record, or `None` at end of stream.
    pub fn read_record(&mut self) -> Result<Option<EncodedRecord>> {
        loop {
            self.line.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.line)
                .with_context(|| format!("Failed to read from {}", self.source_name))?;

            if n == 0 {
                return Ok(self.header.take().map(|header| self.emit(header)));
            }

            let line = self.line.trim_end();
            if line.is_empty() {
                continue;
            }

            if line[0] == b'>' {
                let next = Header::parse(&line[1..]);
                if let Some(header) = self.header.replace(next) {
                    return Ok(Some(self.emit(header)));
                }
                continue;
            }

            let Some(header) = &self.header else {
                return Err(SnpsError::Format {
                    source_name: self.source_name.clone(),
                    reason: "first line does not start with '>'".to_string(),
                }
                .into());
            };

            if let Err(byte) = self.codec.encode_into(line, &mut self.seq) {
                return Err(SnpsError::Format {
                    source_name: self.source_name.clone(),
                    reason: format!(
                        "sequence '{}' contains invalid character '{}'",
                        header.id,
                        byte.escape_ascii()
                    ),
                }
                .into());
            }
        }
    }

    fn emit(&mut self, header: Header) -> EncodedRecord {
        let record = EncodedRecord {
            id: header.id,
            description: header.description,
            ordinal: self.next_ordinal,
            seq: std::mem::take(&mut self.seq),
        };
        self.next_ordinal += 1;
        record
    }
}

impl<R: BufRead> Iterator for AlignmentReader<R> {
    type Item = Result<EncodedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Read a reference stream that must contain exactly one record.
///
/// # Errors
///
/// Returns [`SnpsError::EmptyReference`] or [`SnpsError::MultipleReferences`] when the
/// stream does not hold exactly one sequence, or any error from [`AlignmentReader`].
pub fn read_reference<R: BufRead>(
    reader: R,
    codec: SymbolCodec,
    source_name: &str,
) -> Result<EncodedRecord> {
    let mut reader = AlignmentReader::new(reader, codec, source_name);

    let Some(reference) = reader.read_record()? else {
        return Err(SnpsError::EmptyReference { source_name: source_name.to_string() }.into());
    };

    let mut count = 1;
    while reader.read_record()?.is_some() {
        count += 1;
    }
    if count > 1 {
        return Err(SnpsError::MultipleReferences { source_name: source_name.to_string(), count }
            .into());
    }

    debug!("Loaded reference '{}' ({} columns)", reference.id, reference.len());
    Ok(reference)
}
