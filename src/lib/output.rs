//! Writers that drain query results into the two output formats.
//!
//! - [`OrderedWriter`] writes one `query,SNPs` line per query, restoring input order
//!   with a [`ReorderBuffer`].
//! - [`AggregateWriter`] tallies how many queries carry each change and writes a
//!   `change,proportion` table once all results are in.
//!
//! Both take results in any arrival order through the [`SnpWriter`] trait.

use std::io::{BufWriter, Write};

use ahash::AHashMap;
use anyhow::{Context, Result};
use log::{debug, warn};

use crate::diff::{QueryResult, SnpCall};
use crate::reorder_buffer::ReorderBuffer;

/// Header line of per-query output.
pub const PER_QUERY_HEADER: &str = "query,SNPs";

/// Header line of aggregated output.
pub const AGGREGATE_HEADER: &str = "change,proportion";

/// Decimal places used for proportions.
pub const PROPORTION_DECIMALS: usize = 9;

/// Counts reported by a writer when it finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Number of query results consumed.
    pub queries: u64,
    /// Number of distinct changes seen (aggregate mode only).
    pub distinct_changes: usize,
    /// Number of lines written after the header.
    pub lines_written: u64,
}

/// A sink for query results arriving in any order.
pub trait SnpWriter {
    /// Consume one query result.
    fn write_result(&mut self, result: QueryResult) -> Result<()>;

    /// Write anything still pending and flush the output.
    fn finish(self) -> Result<WriteSummary>
    where
        Self: Sized;
}

/// Writes per-query lines in input order.
pub struct OrderedWriter<W: Write> {
    out: BufWriter<W>,
    pending: ReorderBuffer<QueryResult>,
    queries: u64,
    lines_written: u64,
}

impl<W: Write> OrderedWriter<W> {
    /// Create the writer and emit the header line.
    pub fn new(writer: W) -> Result<Self> {
        let mut out = BufWriter::new(writer);
        writeln!(out, "{PER_QUERY_HEADER}").context("Failed to write output header")?;
        Ok(Self { out, pending: ReorderBuffer::new(), queries: 0, lines_written: 0 })
    }

    fn write_line(out: &mut BufWriter<W>, result: &QueryResult) -> std::io::Result<()> {
        out.write_all(result.id.as_bytes())?;
        out.write_all(b",")?;
        for (i, call) in result.calls.iter().enumerate() {
            if i > 0 {
                out.write_all(b"|")?;
            }
            write!(out, "{call}")?;
        }
        out.write_all(b"\n")
    }
}

impl<W: Write> SnpWriter for OrderedWriter<W> {
    fn write_result(&mut self, result: QueryResult) -> Result<()> {
        self.queries += 1;
        self.pending.insert(result.ordinal, result);
        for ready in self.pending.drain_ready() {
            Self::write_line(&mut self.out, &ready)
                .with_context(|| format!("Failed to write result for '{}'", ready.id))?;
            self.lines_written += 1;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<WriteSummary> {
        if !self.pending.is_empty() {
            warn!(
                "{} results were still waiting on ordinal {} at end of input",
                self.pending.len(),
                self.pending.next_seq()
            );
        }
        for result in self.pending.drain_remaining() {
            Self::write_line(&mut self.out, &result)
                .with_context(|| format!("Failed to write result for '{}'", result.id))?;
            self.lines_written += 1;
        }
        self.out.flush().context("Failed to flush output")?;

        Ok(WriteSummary {
            queries: self.queries,
            distinct_changes: 0,
            lines_written: self.lines_written,
        })
    }
}

/// Tallies change frequencies and writes them sorted by position then allele.
pub struct AggregateWriter<W: Write> {
    out: BufWriter<W>,
    threshold: f64,
    counts: AHashMap<SnpCall, u64>,
    queries: u64,
}

impl<W: Write> AggregateWriter<W> {
    /// Create the writer and emit the header line.
    ///
    /// Changes carried by a smaller proportion of queries than `threshold` are omitted.
    pub fn new(writer: W, threshold: f64) -> Result<Self> {
        let mut out = BufWriter::new(writer);
        writeln!(out, "{AGGREGATE_HEADER}").context("Failed to write output header")?;
        Ok(Self { out, threshold, counts: AHashMap::new(), queries: 0 })
    }

    /// Changes with their proportions, sorted for output, before thresholding.
    #[allow(clippy::cast_precision_loss)]
    fn proportions(&self) -> Vec<(SnpCall, f64)> {
        let total = self.queries as f64;
        let mut rows: Vec<_> =
            self.counts.iter().map(|(call, &count)| (*call, count as f64 / total)).collect();
        rows.sort_unstable_by_key(|(call, _)| call.sort_key());
        rows
    }
}

impl<W: Write> SnpWriter for AggregateWriter<W> {
    fn write_result(&mut self, result: QueryResult) -> Result<()> {
        self.queries += 1;
        for call in result.calls {
            *self.counts.entry(call).or_insert(0) += 1;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<WriteSummary> {
        let rows = self.proportions();
        let mut lines_written = 0;
        for (call, proportion) in &rows {
            if *proportion < self.threshold {
                continue;
            }
            writeln!(self.out, "{call},{proportion:.PROPORTION_DECIMALS$}")
                .with_context(|| format!("Failed to write change {call}"))?;
            lines_written += 1;
        }
        self.out.flush().context("Failed to flush output")?;

        debug!(
            "Reported {lines_written} of {} changes at threshold {}",
            rows.len(),
            self.threshold
        );
        Ok(WriteSummary { queries: self.queries, distinct_changes: rows.len(), lines_written })
    }
}
