//! Integration tests for the snps library.
//!
//! These tests run the reference loader, the reader / worker / writer pipeline and both
//! output formats end to end, over in-memory buffers and temporary files.

mod helpers;
mod test_error_paths;
mod test_pipeline_concurrency;
mod test_snps_pipeline;
