//! Reader / worker pool / writer pipeline.
//!
//! ```text
//! ┌──────────────┐  records  ┌──────────────┐  results  ┌──────────────┐
//! │ FASTA reader │──bounded─>│ diff workers │──bounded─>│    writer    │
//! │  (1 thread)  │           │  (N threads) │           │(caller thread│
//! └──────────────┘           └──────────────┘           └──────────────┘
//! ```
//!
//! The reference is read synchronously before anything starts. Both queues are bounded,
//! which is the only backpressure. Workers emit results in whatever order they finish;
//! the writer is responsible for order (see [`crate::output`]).
//!
//! The first error raised by any thread is stored and every thread stops at its next
//! queue operation. A run that fails never calls [`SnpWriter::finish`], so an aggregate
//! table is never written from partial input.

use std::io::{BufRead, Write};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, info};
use parking_lot::Mutex;

use crate::diff::{DiffEngine, QueryResult};
use crate::errors::SnpsError;
use crate::fasta::{AlignmentReader, EncodedRecord, read_reference};
use crate::iupac::{GapPolicy, SymbolCodec};
use crate::output::{AggregateWriter, OrderedWriter, SnpWriter, WriteSummary};
use crate::progress::ProgressTracker;
use crate::validation::{validate_threads, validate_threshold};

/// How often workers log the number of queries compared.
const PROGRESS_LOG_INTERVAL: u64 = 100_000;

/// Which output the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One line per query listing its changes, in input order.
    #[default]
    PerQuery,
    /// Proportion of queries carrying each change.
    Aggregate,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerQuery => write!(f, "per-query"),
            Self::Aggregate => write!(f, "aggregate"),
        }
    }
}

/// Number of worker threads used when none is given.
#[must_use]
pub fn default_threads() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Configuration for one run, built once and passed to [`run_snps`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How gaps compare against other symbols.
    pub gap_policy: GapPolicy,
    /// Output format.
    pub mode: OutputMode,
    /// Minimum proportion (inclusive) for a change to be reported in aggregate mode.
    pub threshold: f64,
    /// Number of diff workers.
    pub threads: usize,
    /// Capacity of each bounded queue.
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_threads(default_threads())
    }
}

impl PipelineConfig {
    /// Default configuration with `threads` workers and a matching queue capacity.
    #[must_use]
    pub fn with_threads(threads: usize) -> Self {
        Self {
            gap_policy: GapPolicy::Soft,
            mode: OutputMode::PerQuery,
            threshold: 0.0,
            threads,
            queue_capacity: threads.max(1),
        }
    }

    /// Check that the values can drive a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is outside `[0, 1]`, or if the thread count or
    /// queue capacity is zero.
    pub fn validate(&self) -> crate::errors::Result<()> {
        validate_threshold(self.threshold)?;
        validate_threads(self.threads)?;
        if self.queue_capacity == 0 {
            return Err(SnpsError::InvalidParameter {
                parameter: "queue_capacity".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Length of the reference in alignment columns.
    pub reference_len: usize,
    /// Counts reported by the writer.
    pub output: WriteSummary,
}

/// State shared by every pipeline thread.
struct PipelineState {
    /// Flag indicating an error occurred.
    error_flag: AtomicBool,
    /// Storage for the first error.
    error: Mutex<Option<anyhow::Error>>,
    progress: ProgressTracker,
}

impl PipelineState {
    fn new() -> Self {
        Self {
            error_flag: AtomicBool::new(false),
            error: Mutex::new(None),
            progress: ProgressTracker::new("Compared queries").with_interval(PROGRESS_LOG_INTERVAL),
        }
    }

    /// Record an error and signal threads to stop. Only the first error is kept.
    fn set_error(&self, error: anyhow::Error) {
        self.error_flag.store(true, Ordering::SeqCst);
        let mut guard = self.error.lock();
        if guard.is_none() {
            *guard = Some(error);
        }
    }

    fn has_error(&self) -> bool {
        self.error_flag.load(Ordering::Relaxed)
    }

    fn take_error(&self) -> Option<anyhow::Error> {
        self.error.lock().take()
    }
}

/// Extract a human-readable message from a panic payload.
fn extract_panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Read the reference and all queries, compare them, and write the configured output.
///
/// `reference_name` and `query_name` are used in log and error messages.
///
/// # Errors
///
/// Returns the first error from reading either stream, comparing a query (for example
/// [`SnpsError::LengthMismatch`]), or writing the output.
pub fn run_snps<R, Q, W>(
    reference: R,
    reference_name: &str,
    query: Q,
    query_name: &str,
    output: W,
    config: &PipelineConfig,
) -> Result<PipelineSummary>
where
    R: BufRead,
    Q: BufRead + Send,
    W: Write,
{
    config.validate()?;

    let codec = SymbolCodec::new(config.gap_policy);
    let reference = read_reference(reference, codec, reference_name)?;
    info!("Reference '{}' has {} alignment columns", reference.id, reference.len());

    let engine = DiffEngine::new(reference.seq, codec);
    let records = AlignmentReader::new(query, codec, query_name);

    let output = match config.mode {
        OutputMode::PerQuery => run_pipeline(
            records,
            &engine,
            OrderedWriter::new(output)?,
            config.threads,
            config.queue_capacity,
        )?,
        OutputMode::Aggregate => run_pipeline(
            records,
            &engine,
            AggregateWriter::new(output, config.threshold)?,
            config.threads,
            config.queue_capacity,
        )?,
    };

    Ok(PipelineSummary { reference_len: engine.reference_len(), output })
}

/// Run the reader, `threads` diff workers and `writer` until the records are exhausted.
///
/// The writer runs on the calling thread; reader and workers run on scoped threads.
///
/// # Errors
///
/// Returns the first error raised by any stage, or a panic in any thread as an error.
pub fn run_pipeline<I, S>(
    records: I,
    engine: &DiffEngine,
    writer: S,
    threads: usize,
    queue_capacity: usize,
) -> Result<WriteSummary>
where
    I: Iterator<Item = Result<EncodedRecord>> + Send,
    S: SnpWriter,
{
    let threads = threads.max(1);
    let state = PipelineState::new();
    let state = &state;

    let (record_tx, record_rx) = bounded::<EncodedRecord>(queue_capacity.max(1));
    let (result_tx, result_rx) = bounded::<QueryResult>(queue_capacity.max(1));

    debug!("Starting pipeline with {threads} workers and queue capacity {queue_capacity}");

    let writer = thread::scope(|scope| {
        let reader = scope.spawn(move || read_records(records, &record_tx, state));

        let workers: Vec<_> = (0..threads)
            .map(|_| {
                let rx = record_rx.clone();
                let tx = result_tx.clone();
                let engine = engine.clone();
                scope.spawn(move || compare_records(&engine, &rx, &tx, state))
            })
            .collect();

        // only the workers hold these now, so the queues close when they finish
        drop(record_rx);
        drop(result_tx);

        let writer = write_results(writer, result_rx, state);

        if let Err(panic) = reader.join() {
            let msg = extract_panic_message(&*panic);
            state.set_error(anyhow!("Reader thread panicked: {msg}"));
        }
        for (i, worker) in workers.into_iter().enumerate() {
            if let Err(panic) = worker.join() {
                let msg = extract_panic_message(&*panic);
                state.set_error(anyhow!("Worker thread {i} panicked: {msg}"));
            }
        }

        writer
    });

    if let Some(error) = state.take_error() {
        return Err(error);
    }

    state.progress.log_final();
    writer.finish()
}

fn read_records<I>(records: I, tx: &Sender<EncodedRecord>, state: &PipelineState)
where
    I: Iterator<Item = Result<EncodedRecord>>,
{
    for record in records {
        if state.has_error() {
            return;
        }
        match record {
            Ok(record) => {
                if tx.send(record).is_err() {
                    // every worker has stopped
                    return;
                }
            }
            Err(e) => {
                state.set_error(e);
                return;
            }
        }
    }
}

fn compare_records(
    engine: &DiffEngine,
    rx: &Receiver<EncodedRecord>,
    tx: &Sender<QueryResult>,
    state: &PipelineState,
) {
    for record in rx {
        if state.has_error() {
            return;
        }
        match engine.compare(record) {
            Ok(result) => {
                state.progress.log_if_needed(1);
                if tx.send(result).is_err() {
                    return;
                }
            }
            Err(e) => {
                state.set_error(e.into());
                return;
            }
        }
    }
}

fn write_results<S: SnpWriter>(
    mut writer: S,
    rx: Receiver<QueryResult>,
    state: &PipelineState,
) -> S {
    for result in rx {
        if state.has_error() {
            break;
        }
        if let Err(e) = writer.write_result(result) {
            state.set_error(e);
            break;
        }
    }
    writer
}
