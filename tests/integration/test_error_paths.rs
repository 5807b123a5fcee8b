//! Error path integration tests.
//!
//! These tests verify that malformed inputs and invalid parameters fail the whole run
//! with a typed error, and that no aggregate table is written from partial input.

use rstest::rstest;
use snps_lib::errors::SnpsError;
use snps_lib::iupac::GapPolicy;
use snps_lib::pipeline::{OutputMode, PipelineConfig, run_snps};

use crate::helpers::{REFERENCE, config, run_to_string};

fn snps_error(err: &anyhow::Error) -> &SnpsError {
    err.downcast_ref::<SnpsError>().unwrap_or_else(|| panic!("not a SnpsError: {err:#}"))
}

// ==================== Reference ====================

#[rstest]
#[case::empty("")]
#[case::blank_lines("\n\n\n")]
fn test_empty_reference(#[case] reference: &str) {
    let config = PipelineConfig::with_threads(1);
    let err = run_to_string(reference, ">q\nATGATG\n", &config).unwrap_err();
    assert!(matches!(snps_error(&err), SnpsError::EmptyReference { .. }));
}

#[test]
fn test_multiple_references() {
    let config = PipelineConfig::with_threads(1);
    let err = run_to_string(">a\nATG\n>b\nATG\n", ">q\nATG\n", &config).unwrap_err();
    assert!(matches!(snps_error(&err), SnpsError::MultipleReferences { count: 2, .. }));
}

#[test]
fn test_reference_without_header() {
    let config = PipelineConfig::with_threads(1);
    let err = run_to_string("ATGATG\n", ">q\nATGATG\n", &config).unwrap_err();
    assert!(matches!(snps_error(&err), SnpsError::Format { .. }));
    assert!(err.to_string().contains("reference"));
}

// ==================== Queries ====================

#[rstest]
#[case(1)]
#[case(2)]
#[case(8)]
fn test_length_mismatch_fails_run(#[case] threads: usize) {
    let mut queries = String::new();
    for i in 0..100 {
        queries.push_str(&format!(">ok{i}\nATGATG\n"));
    }
    queries.push_str(">short\nATGA\n");

    let config = config(OutputMode::PerQuery, GapPolicy::Soft, threads);
    let err = run_to_string(REFERENCE, &queries, &config).unwrap_err();
    match snps_error(&err) {
        SnpsError::LengthMismatch { id, expected, actual } => {
            assert_eq!(id, "short");
            assert_eq!(*expected, 6);
            assert_eq!(*actual, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_query_without_header() {
    let config = PipelineConfig::with_threads(2);
    let err = run_to_string(REFERENCE, "ATGATG\n>q\nATGATG\n", &config).unwrap_err();
    assert!(matches!(snps_error(&err), SnpsError::Format { .. }));
    assert!(err.to_string().contains("badly formatted input"));
}

#[test]
fn test_invalid_symbol_in_query() {
    let config = PipelineConfig::with_threads(2);
    let err = run_to_string(REFERENCE, ">q1\nATGATG\n>q2\nATG*TG\n", &config).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("q2"), "{msg}");
    assert!(msg.contains('*'), "{msg}");
}

#[test]
fn test_aggregate_table_not_written_on_error() {
    let config = config(OutputMode::Aggregate, GapPolicy::Soft, 4);
    let mut out = Vec::new();
    let result = run_snps(
        REFERENCE.as_bytes(),
        "reference",
        ">a\nATGATC\n>b\nATGATC\n>c\nATGATCA\n".as_bytes(),
        "query",
        &mut out,
        &config,
    );
    assert!(result.is_err());
    let out = String::from_utf8(out).unwrap();
    assert!(!out.contains("G6C"), "{out}");
}

// ==================== Parameters ====================

#[rstest]
#[case(-0.01)]
#[case(1.01)]
fn test_invalid_threshold(#[case] threshold: f64) {
    let config = PipelineConfig { threshold, ..config(OutputMode::Aggregate, GapPolicy::Soft, 1) };
    let err = run_to_string(REFERENCE, ">q\nATGATG\n", &config).unwrap_err();
    assert!(matches!(snps_error(&err), SnpsError::InvalidThreshold { .. }));
}

#[test]
fn test_zero_threads() {
    let config = config(OutputMode::PerQuery, GapPolicy::Soft, 0);
    let err = run_to_string(REFERENCE, ">q\nATGATG\n", &config).unwrap_err();
    assert!(matches!(snps_error(&err), SnpsError::InvalidParameter { .. }));
}
