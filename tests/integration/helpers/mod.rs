//! Helper utilities for integration tests.

pub mod alignment_generator;

pub use alignment_generator::*;

use snps_lib::iupac::GapPolicy;
use snps_lib::pipeline::{OutputMode, PipelineConfig, PipelineSummary, run_snps};

/// Reference used by the documented scenarios.
pub const REFERENCE: &str = ">ref\nATGATG\n";

/// The four queries of the aggregate scenario.
pub const SCENARIO_QUERIES: &str =
    ">Query1\nATGATG\n>Query2\nATGATC\n>Query3\nATTTTW\n>Query4\nATTTTG\n";

/// Build a configuration for a test run.
pub fn config(mode: OutputMode, gap_policy: GapPolicy, threads: usize) -> PipelineConfig {
    PipelineConfig { gap_policy, mode, ..PipelineConfig::with_threads(threads) }
}

/// Run the pipeline over in-memory inputs and return the output text.
pub fn run_to_string(
    reference: &str,
    queries: &str,
    config: &PipelineConfig,
) -> anyhow::Result<(String, PipelineSummary)> {
    let mut out = Vec::new();
    let summary =
        run_snps(reference.as_bytes(), "reference", queries.as_bytes(), "query", &mut out, config)?;
    Ok((String::from_utf8(out)?, summary))
}

/// Per-query output for the given inputs.
pub fn per_query(reference: &str, queries: &str, gap_policy: GapPolicy, threads: usize) -> String {
    let config = config(OutputMode::PerQuery, gap_policy, threads);
    run_to_string(reference, queries, &config).unwrap().0
}

/// Aggregate output for the given inputs.
pub fn aggregate(reference: &str, queries: &str, threshold: f64, threads: usize) -> String {
    let config = PipelineConfig { threshold, ..config(OutputMode::Aggregate, GapPolicy::Soft, threads) };
    run_to_string(reference, queries, &config).unwrap().0
}
