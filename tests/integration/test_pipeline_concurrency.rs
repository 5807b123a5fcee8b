//! Output must not depend on how many workers run or how they are scheduled.

use rstest::rstest;
use snps_lib::iupac::GapPolicy;
use snps_lib::pipeline::{OutputMode, PipelineConfig};

use crate::helpers::{
    REFERENCE, SCENARIO_QUERIES, aggregate, per_query, run_to_string, synthetic_alignment,
};

#[rstest]
#[case(1)]
#[case(2)]
#[case(8)]
fn test_per_query_same_for_any_worker_count(#[case] threads: usize) {
    let alignment = synthetic_alignment(1_000, 2_000, 70);
    assert_eq!(
        per_query(&alignment.reference, &alignment.queries, GapPolicy::Soft, threads),
        alignment.expected_output()
    );
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(8)]
fn test_aggregate_same_for_any_worker_count(#[case] threads: usize) {
    assert_eq!(
        aggregate(REFERENCE, SCENARIO_QUERIES, 0.0, threads),
        aggregate(REFERENCE, SCENARIO_QUERIES, 0.0, 1)
    );
}

#[test]
fn test_small_queues() {
    let alignment = synthetic_alignment(200, 500, 200);
    let config = PipelineConfig { queue_capacity: 1, ..PipelineConfig::with_threads(8) };
    let (out, summary) = run_to_string(&alignment.reference, &alignment.queries, &config).unwrap();
    assert_eq!(out, alignment.expected_output());
    assert_eq!(summary.output.queries, 500);
    assert_eq!(summary.output.lines_written, 500);
}

#[test]
fn test_repeated_runs_are_identical() {
    let alignment = synthetic_alignment(300, 400, 50);
    let config = PipelineConfig { mode: OutputMode::Aggregate, ..PipelineConfig::with_threads(4) };
    let first = run_to_string(&alignment.reference, &alignment.queries, &config).unwrap().0;
    for _ in 0..5 {
        let again = run_to_string(&alignment.reference, &alignment.queries, &config).unwrap().0;
        assert_eq!(again, first);
    }
}
