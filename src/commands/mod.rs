//! CLI command implementations for snps.
//!
//! - [`snps`] - Find SNPs between a reference and each sequence of an alignment

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod command;
pub mod common;
pub mod snps;
