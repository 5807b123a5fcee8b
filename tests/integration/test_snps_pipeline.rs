//! End-to-end per-query output tests.

use rstest::rstest;
use snps_lib::iupac::GapPolicy;
use snps_lib::pipeline::{OutputMode, PipelineConfig, run_snps};
use tempfile::TempDir;

use crate::helpers::{REFERENCE, per_query, synthetic_alignment};

#[rstest]
#[case::exact_match(">Query1\nATGATG\n", GapPolicy::Soft, "Query1,")]
#[case::single_substitution(">Query2\nATGATC\n", GapPolicy::Soft, "Query2,G6C")]
#[case::ambiguity_code(">Query3\nATTTTW\n", GapPolicy::Soft, "Query3,G3T|A4T|G6W")]
#[case::soft_gaps(">Query1\n--GATG\n", GapPolicy::Soft, "Query1,")]
#[case::hard_gaps(">Query1\n--GATG\n", GapPolicy::Hard, "Query1,A1-|T2-")]
#[case::compatible_ambiguity(">Query1\nRYKRWS\n", GapPolicy::Soft, "Query1,")]
#[case::unknown_symbol(">Query1\n??????\n", GapPolicy::Hard, "Query1,")]
#[case::lower_case(">Query1\natgatc\n", GapPolicy::Soft, "Query1,G6C")]
fn test_documented_scenarios(
    #[case] queries: &str,
    #[case] gap_policy: GapPolicy,
    #[case] expected_line: &str,
) {
    let out = per_query(REFERENCE, queries, gap_policy, 2);
    assert_eq!(out, format!("query,SNPs\n{expected_line}\n"));
}

#[test]
fn test_multiple_queries_keep_input_order() {
    let queries = ">Query1\nATGATG\n>Query2\nATGATC\n>Query3\nATTTTW\n";
    assert_eq!(
        per_query(REFERENCE, queries, GapPolicy::Soft, 4),
        "query,SNPs\nQuery1,\nQuery2,G6C\nQuery3,G3T|A4T|G6W\n"
    );
}

#[test]
fn test_wrapped_and_crlf_input() {
    let reference = ">ref\r\nATG\r\nATG\r\n";
    let queries = ">Query2 with description\r\nAT\r\n\r\nGATC\r\n";
    assert_eq!(per_query(reference, queries, GapPolicy::Soft, 1), "query,SNPs\nQuery2,G6C\n");
}

#[test]
fn test_empty_query_stream_writes_header() {
    assert_eq!(per_query(REFERENCE, "", GapPolicy::Soft, 3), "query,SNPs\n");
}

#[test]
fn test_ambiguous_reference() {
    let reference = ">ref\nNNRYAC\n";
    let queries = ">q\nACGTGA\n";
    // N matches anything; R = A/G vs G; Y = C/T vs T; A vs G; C vs A
    assert_eq!(per_query(reference, queries, GapPolicy::Soft, 1), "query,SNPs\nq,A5G|C6A\n");
}

#[test]
fn test_synthetic_alignment() {
    let alignment = synthetic_alignment(500, 200, 60);
    assert_eq!(
        per_query(&alignment.reference, &alignment.queries, GapPolicy::Soft, 4),
        alignment.expected_output()
    );
}

#[test]
fn test_files_on_disk() {
    let dir = TempDir::new().unwrap();
    let reference_path = dir.path().join("ref.fa");
    let query_path = dir.path().join("aln.fa");
    let output_path = dir.path().join("snps.csv");
    std::fs::write(&reference_path, REFERENCE).unwrap();
    std::fs::write(&query_path, ">Query2\nATGATC\n").unwrap();

    let config = PipelineConfig { mode: OutputMode::PerQuery, ..PipelineConfig::with_threads(2) };
    let summary = run_snps(
        snps_lib::io::open_input(&reference_path).unwrap(),
        "ref.fa",
        snps_lib::io::open_input(&query_path).unwrap(),
        "aln.fa",
        snps_lib::io::open_output(&output_path).unwrap(),
        &config,
    )
    .unwrap();

    assert_eq!(summary.reference_len, 6);
    assert_eq!(summary.output.queries, 1);
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "query,SNPs\nQuery2,G6C\n");
}
