#![deny(unsafe_code)]
// Clippy lint configuration for CI
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::module_name_repetitions
)]

//! # snps - IUPAC-aware SNP finding
//!
//! This library compares every sequence of a multiple sequence alignment against a single
//! reference sequence and reports the alignment columns at which they differ. Ambiguity
//! codes are respected: a column only counts as a change when the reference and query
//! symbols cannot stand for the same nucleotide.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`iupac`]** - Bitmask encoding of IUPAC nucleotide symbols and the difference test
//! - **[`fasta`]** - Streaming FASTA reader producing encoded records
//! - **[`diff`]** - Per-query comparison against the reference
//! - **[`output`]** - Per-query and aggregated writers
//! - **[`pipeline`]** - Multi-threaded reader / worker / writer pipeline
//!
//! ### Utilities
//!
//! - **[`io`]** - Opening files or stdin/stdout from paths
//! - **[`validation`]** - Input validation for parameters and files
//! - **[`progress`]** - Progress tracking and logging
//! - **[`logging`]** - Formatting helpers and run summaries
//! - **[`reorder_buffer`]** - Restores input order for results finishing out of order
//!
//! ## Quick Start
//!
//! ```
//! use snps_lib::pipeline::{OutputMode, PipelineConfig, run_snps};
//!
//! # fn main() -> anyhow::Result<()> {
//! let reference = b">ref\nATGATG\n";
//! let queries = b">Query1\nATGATG\n>Query2\nATGATC\n>Query3\nATTTTW\n";
//!
//! let config = PipelineConfig { mode: OutputMode::PerQuery, ..PipelineConfig::with_threads(2) };
//! let mut out = Vec::new();
//! run_snps(&reference[..], "ref", &queries[..], "queries", &mut out, &config)?;
//!
//! assert_eq!(
//!     String::from_utf8(out)?,
//!     "query,SNPs\nQuery1,\nQuery2,G6C\nQuery3,G3T|A4T|G6W\n"
//! );
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod errors;
pub mod fasta;
pub mod io;
pub mod iupac;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod reorder_buffer;
pub mod validation;
