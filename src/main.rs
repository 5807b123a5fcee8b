#![deny(unsafe_code)]
pub mod commands;
mod version;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use commands::command::Command;
use commands::snps::Snps;
use env_logger::Env;
use log::info;

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(
    name = "snps",
    version,
    styles = STYLES,
    about = "Find SNPs between a reference and each sequence of an alignment",
    long_about = r#"
Find SNPs between a reference sequence and each sequence of a multiple sequence alignment.

Every query must be aligned to the reference (same length). IUPAC ambiguity codes are
respected: a column is only reported when the reference and query symbols cannot stand
for the same nucleotide, so e.g. A vs R is not a SNP but G vs W is.

By default one line is written per query listing its changes as <ref><position><alt>,
joined by '|'. With --aggregate, the proportion of queries carrying each change is
written instead, sorted by position.

Gaps are treated as missing data unless --hard-gaps is given.

Example usage:
  snps -r reference.fa -q alignment.fa -o snps.csv
  snps -r reference.fa -q alignment.fa --aggregate --threshold 0.05 -o snps.csv
  cat alignment.fa | snps -r reference.fa --hard-gaps > snps.csv
"#
)]
struct Args {
    #[command(flatten)]
    snps: Snps,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let command_line = std::env::args().collect::<Vec<_>>().join(" ");
    let args = Args::parse();

    info!("Running snps version {}", version::VERSION.as_str());
    args.snps.execute(&command_line)
}
