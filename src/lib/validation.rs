//! Input validation utilities
//!
//! Validation functions for command-line parameters and file paths, returning the
//! structured errors from [`crate::errors`].

use crate::errors::{Result, SnpsError};
use crate::io::is_stdin_path;
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Reference FASTA")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use snps_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/ref.fa", "Reference FASTA");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(SnpsError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate an input path, skipping the check for stdin
///
/// # Errors
/// Returns an error if the path is not stdin and the file does not exist
pub fn validate_input<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    if is_stdin_path(&path) { Ok(()) } else { validate_file_exists(path, description) }
}

/// Validate that at most one of the inputs reads from stdin
///
/// # Errors
/// Returns an error if both paths refer to stdin
pub fn validate_single_stdin<P: AsRef<Path>, Q: AsRef<Path>>(reference: P, query: Q) -> Result<()> {
    if is_stdin_path(reference) && is_stdin_path(query) {
        return Err(SnpsError::InvalidParameter {
            parameter: "reference".to_string(),
            reason: "reference and query cannot both be read from stdin".to_string(),
        });
    }
    Ok(())
}

/// Validate that a proportion threshold lies in `[0, 1]`
///
/// # Errors
/// Returns an error if the threshold is outside the range or not a number
///
/// # Example
/// ```
/// use snps_lib::validation::validate_threshold;
///
/// assert!(validate_threshold(0.25).is_ok());
/// assert!(validate_threshold(1.5).is_err());
/// ```
pub fn validate_threshold(value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) { Ok(value) } else { Err(SnpsError::InvalidThreshold { value }) }
}

/// Validate a worker thread count
///
/// # Errors
/// Returns an error if `threads` is zero
pub fn validate_threads(threads: usize) -> Result<usize> {
    if threads == 0 {
        return Err(SnpsError::InvalidParameter {
            parameter: "threads".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(threads)
}
