//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use snps_lib::pipeline::default_threads;
use snps_lib::validation::{validate_input, validate_single_stdin, validate_threads};

/// Input/output options for commands that compare an alignment against a reference.
#[derive(Debug, Clone, Args)]
pub struct AlignmentIoOptions {
    /// Reference FASTA holding exactly one sequence (`-` for stdin)
    #[arg(short = 'r', long = "reference")]
    pub reference: PathBuf,

    /// Aligned query FASTA (`-` for stdin)
    #[arg(short = 'q', long = "query", default_value = "-")]
    pub query: PathBuf,

    /// Output CSV file (`-` for stdout)
    #[arg(short = 'o', long = "output", visible_alias = "outfile", default_value = "-")]
    pub output: PathBuf,
}

impl AlignmentIoOptions {
    /// Validates that file inputs exist and that stdin is read at most once.
    ///
    /// # Errors
    ///
    /// Returns an error if an input file does not exist or both inputs are stdin.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_single_stdin(&self.reference, &self.query)?;
        validate_input(&self.reference, "Reference FASTA")?;
        validate_input(&self.query, "Query FASTA")?;
        Ok(())
    }
}

/// Threading options for the comparison pipeline.
#[derive(Debug, Clone, Default, Args)]
pub struct ThreadingOptions {
    /// Number of comparison worker threads [default: available cores]
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,
}

impl ThreadingOptions {
    /// Creates threading options with N threads.
    #[must_use]
    pub fn new(threads: usize) -> Self {
        Self { threads: Some(threads) }
    }

    /// Returns the number of worker threads.
    ///
    /// # Errors
    ///
    /// Returns an error if zero threads were requested.
    pub fn num_threads(&self) -> anyhow::Result<usize> {
        match self.threads {
            Some(n) => Ok(validate_threads(n)?),
            None => Ok(default_threads()),
        }
    }

    /// Returns the capacity of each pipeline queue for `threads` workers.
    ///
    /// Twice the worker count keeps workers busy while bounding memory.
    #[must_use]
    pub fn queue_len(threads: usize) -> usize {
        threads * 2
    }
}
