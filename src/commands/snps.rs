//! Find SNPs between a reference sequence and every sequence of an alignment.
//!
//! Reads the reference first, then streams the query alignment through a pool of
//! comparison workers and writes either one line per query or a table of how often
//! each change occurs.

use anyhow::Result;
use clap::Args;
use log::{debug, info, warn};

use snps_lib::io::{display_name, open_input, open_output};
use snps_lib::iupac::GapPolicy;
use snps_lib::logging::{OperationTimer, log_run_summary};
use snps_lib::pipeline::{OutputMode, PipelineConfig, run_snps};
use snps_lib::validation::validate_threshold;

use crate::commands::command::Command;
use crate::commands::common::{AlignmentIoOptions, ThreadingOptions};

/// Find SNPs between a reference and each sequence of an alignment.
#[derive(Debug, Args)]
pub struct Snps {
    /// Input/output options
    #[command(flatten)]
    pub io: AlignmentIoOptions,

    /// Treat gaps as differences instead of missing data
    #[arg(long = "hard-gaps", default_value = "false")]
    pub hard_gaps: bool,

    /// Report the proportion of queries carrying each change instead of per-query lists
    #[arg(long = "aggregate", default_value = "false")]
    pub aggregate: bool,

    /// Minimum proportion (inclusive) for a change to be reported with --aggregate
    #[arg(long = "threshold", default_value_t = 0.0)]
    pub threshold: f64,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,
}

impl Snps {
    fn mode(&self) -> OutputMode {
        if self.aggregate { OutputMode::Aggregate } else { OutputMode::PerQuery }
    }

    /// Builds the pipeline configuration from the parsed arguments.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let threads = self.threading.num_threads()?;
        Ok(PipelineConfig {
            gap_policy: GapPolicy::from_hard_gaps(self.hard_gaps),
            mode: self.mode(),
            threshold: validate_threshold(self.threshold)?,
            threads,
            queue_capacity: ThreadingOptions::queue_len(threads),
        })
    }
}

impl Command for Snps {
    fn execute(&self, command_line: &str) -> Result<()> {
        debug!("Command line: {command_line}");

        self.io.validate()?;
        let config = self.pipeline_config()?;

        if config.mode == OutputMode::PerQuery && self.threshold > 0.0 {
            warn!("--threshold has no effect without --aggregate");
        }

        let reference_name = display_name(&self.io.reference);
        let query_name = display_name(&self.io.query);

        info!("Reference: {reference_name}");
        info!("Query: {query_name}");
        info!("Output: {}", self.io.output.display());
        info!("Gaps: {}", config.gap_policy);
        info!("Output mode: {}", config.mode);
        if config.mode == OutputMode::Aggregate {
            info!("Threshold: {}", config.threshold);
        }
        info!("Using {} worker threads", config.threads);

        let timer = OperationTimer::new("Finding SNPs");

        let reference = open_input(&self.io.reference)?;
        let query = open_input(&self.io.query)?;
        let output = open_output(&self.io.output)?;

        let summary = run_snps(reference, &reference_name, query, &query_name, output, &config)?;

        log_run_summary(&summary, config.mode);
        timer.log_completion(summary.output.queries);
        Ok(())
    }
}
