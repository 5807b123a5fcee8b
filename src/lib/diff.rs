//! Comparison of encoded query sequences against an encoded reference.
//!
//! A position is reported as a [`SnpCall`] when the reference and query codes share
//! no base bit (see [`crate::iupac::is_difference`]). Exact matches, matches through an
//! ambiguity code and soft gaps all fall out of that one test.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::{Result, SnpsError};
use crate::fasta::EncodedRecord;
use crate::iupac::{SymbolCodec, is_difference};

/// A single difference between a query and the reference, rendered as `G6C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnpCall {
    /// Reference symbol (upper-case IUPAC letter, `-` or `?`).
    pub reference: u8,
    /// 1-based alignment column.
    pub position: usize,
    /// Query symbol.
    pub query: u8,
}

impl SnpCall {
    /// Sort key used for reporting: position first, then the query allele.
    #[must_use]
    pub fn sort_key(&self) -> (usize, u8) {
        (self.position, self.query)
    }
}

impl fmt::Display for SnpCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.reference as char, self.position, self.query as char)
    }
}

impl FromStr for SnpCall {
    type Err = SnpsError;

    /// Parse a change such as `G6C` or `A12-`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || SnpsError::MalformedChange { change: s.to_string() };
        let bytes = s.as_bytes();
        if bytes.len() < 3 || !bytes[0].is_ascii() || !bytes[bytes.len() - 1].is_ascii() {
            return Err(malformed());
        }

        let position: usize = s[1..s.len() - 1].parse().map_err(|_| malformed())?;
        if position == 0 {
            return Err(malformed());
        }
        Ok(Self { reference: bytes[0], position, query: bytes[bytes.len() - 1] })
    }
}

/// The differences found for one query sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Query identifier.
    pub id: String,
    /// Ordinal of the query in its input stream.
    pub ordinal: u64,
    /// Differences in increasing position order.
    pub calls: Vec<SnpCall>,
}

impl QueryResult {
    /// The calls joined with `|`, as written in per-query output.
    #[must_use]
    pub fn joined_calls(&self) -> String {
        let mut out = String::with_capacity(self.calls.len() * 6);
        for (i, call) in self.calls.iter().enumerate() {
            if i > 0 {
                out.push('|');
            }
            out.push_str(&call.to_string());
        }
        out
    }
}

/// Compares queries against a fixed reference.
///
/// Cloning is cheap: the reference is shared behind an [`Arc`] and never mutated, so
/// each worker thread can hold its own engine.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    reference: Arc<[u8]>,
    codec: SymbolCodec,
}

impl DiffEngine {
    /// Create an engine from an encoded reference sequence.
    #[must_use]
    pub fn new(reference: impl Into<Arc<[u8]>>, codec: SymbolCodec) -> Self {
        Self { reference: reference.into(), codec }
    }

    /// Length of the reference in alignment columns.
    #[must_use]
    pub fn reference_len(&self) -> usize {
        self.reference.len()
    }

    /// Compare one query against the reference.
    ///
    /// # Errors
    ///
    /// Returns [`SnpsError::LengthMismatch`] if the query is not the same length as the
    /// reference.
    pub fn compare(&self, record: EncodedRecord) -> Result<QueryResult> {
        if record.seq.len() != self.reference.len() {
            return Err(SnpsError::LengthMismatch {
                id: record.id,
                expected: self.reference.len(),
                actual: record.seq.len(),
            });
        }

        let calls = self
            .reference
            .iter()
            .zip(&record.seq)
            .enumerate()
            .filter(|(_, (r, q))| is_difference(**r, **q))
            .map(|(i, (&r, &q))| SnpCall {
                reference: self.codec.decode(r),
                position: i + 1,
                query: self.codec.decode(q),
            })
            .collect();

        Ok(QueryResult { id: record.id, ordinal: record.ordinal, calls })
    }
}
